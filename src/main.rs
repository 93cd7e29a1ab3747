use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sweepgrid::manifest::load_stitch_manifest;
use sweepgrid::ops::{generate_batch, generate_combination, stitch_grid, StitchParams};
use sweepgrid::text_paint::FontPainter;

#[derive(Debug, Parser)]
#[command(name = "sweepgrid")]
#[command(about = "Parameter-sweep combination indexing and comparison-grid compositing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a stitch manifest and print its sweep summary.
    Check { manifest: PathBuf },
    /// Print every combination of the given axes in linear order.
    Combos {
        #[arg(long, default_value = "")]
        x: String,
        #[arg(long, default_value = "")]
        y: String,
        #[arg(long, default_value = "")]
        z: String,
    },
    /// Print the combination at one linear index (with wraparound).
    At {
        #[arg(long, default_value = "")]
        x: String,
        #[arg(long, default_value = "")]
        y: String,
        #[arg(long, default_value = "")]
        z: String,
        #[arg(long)]
        index: usize,
    },
    /// Composite the images listed in a manifest into a labeled grid image.
    Stitch {
        manifest: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => run_check(&manifest),
        Commands::Combos { x, y, z } => run_combos(&x, &y, &z),
        Commands::At { x, y, z, index } => run_at(&x, &y, &z, index),
        Commands::Stitch { manifest, output } => run_stitch(&manifest, &output),
    }
}

fn run_check(manifest_path: &Path) -> Result<()> {
    let manifest = load_stitch_manifest(manifest_path)?;
    let batch = generate_batch(&manifest.axes.x, &manifest.axes.y, &manifest.axes.z);

    println!(
        "OK: {} ({} combinations, {} images listed, {:?} layout, bands {}x{}, gap {})",
        manifest_path.display(),
        batch.total,
        manifest.images.len(),
        manifest.grid.layout,
        manifest.grid.label_width,
        manifest.grid.label_height,
        manifest.grid.gap
    );
    Ok(())
}

fn run_combos(x: &str, y: &str, z: &str) -> Result<()> {
    let batch = generate_batch(x, y, z);
    if batch.total == 0 {
        println!("No combinations");
        return Ok(());
    }

    for index in 0..batch.total {
        println!(
            "{index}: X={} Y={} Z={}",
            batch.x_values[index], batch.y_values[index], batch.z_values[index]
        );
    }
    println!("total: {}", batch.total);
    Ok(())
}

fn run_at(x: &str, y: &str, z: &str, index: usize) -> Result<()> {
    let combination = generate_combination(x, y, z, index);
    println!("{}", combination.summary());
    Ok(())
}

fn run_stitch(manifest_path: &Path, output_path: &Path) -> Result<()> {
    let manifest = load_stitch_manifest(manifest_path)?;

    let mut images = Vec::with_capacity(manifest.images.len());
    for image_path in &manifest.images {
        let tile = image::open(image_path)
            .with_context(|| format!("failed to decode {}", image_path.display()))?
            .to_rgba8();
        images.push(tile);
    }

    let font_size = manifest.font.resolved_size(manifest.grid.label_height);
    let mut painter = FontPainter::from_path(&manifest.font.path, font_size)?;

    let params = StitchParams {
        label_height: manifest.grid.label_height,
        label_width: manifest.grid.label_width,
        gap: manifest.grid.gap,
        style: manifest.grid.layout,
    };
    let grid = stitch_grid(
        &images,
        &manifest.axes.x,
        &manifest.axes.y,
        &manifest.axes.z,
        &params,
        true,
        &mut painter,
    );

    grid.save(output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    println!("Wrote {}", output_path.display());
    Ok(())
}
