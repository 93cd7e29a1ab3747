//! YAML stitch manifests for the CLI: axis text, grid settings, font, and the
//! ordered list of per-combination image files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::grid_layout::LayoutStyle;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StitchManifest {
    pub axes: Axes,
    #[serde(default)]
    pub grid: GridSettings,
    pub font: FontSettings,
    /// Image files in linear combination order (X fastest, then Y, then Z).
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Axes {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub z: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    #[serde(default = "default_label_height")]
    pub label_height: u32,
    #[serde(default = "default_label_width")]
    pub label_width: u32,
    #[serde(default = "default_gap")]
    pub gap: u32,
    #[serde(default)]
    pub layout: LayoutStyle,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            label_height: default_label_height(),
            label_width: default_label_width(),
            gap: default_gap(),
            layout: LayoutStyle::default(),
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<()> {
        if self.label_height > 300 {
            bail!("label_height must be <= 300, got {}", self.label_height);
        }
        if self.label_width > 300 {
            bail!("label_width must be <= 300, got {}", self.label_width);
        }
        if self.gap > 50 {
            bail!("gap must be <= 50, got {}", self.gap);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSettings {
    pub path: PathBuf,
    /// Pixel size; derived from the label band height when omitted.
    #[serde(default)]
    pub size: Option<f32>,
}

impl FontSettings {
    pub fn resolved_size(&self, label_height: u32) -> f32 {
        self.size
            .unwrap_or_else(|| label_height.saturating_sub(4).clamp(48, 96) as f32)
    }
}

fn default_label_height() -> u32 {
    120
}

fn default_label_width() -> u32 {
    150
}

fn default_gap() -> u32 {
    4
}

pub fn load_stitch_manifest(path: &Path) -> Result<StitchManifest> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let mut manifest: StitchManifest = serde_yaml::from_str(&contents).map_err(|error| {
        let location = error
            .location()
            .map(|location| format!("line {}, column {}", location.line(), location.column()))
            .unwrap_or_else(|| "unknown location".to_owned());
        anyhow!(
            "failed to parse yaml in {} at {}: {}",
            path.display(),
            location,
            error
        )
    })?;

    manifest.grid.validate()?;

    // Image and font paths are relative to the manifest's directory.
    let manifest_dir = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    for image_path in &mut manifest.images {
        if image_path.is_relative() {
            *image_path = manifest_dir.join(&*image_path);
        }
    }
    if manifest.font.path.is_relative() {
        manifest.font.path = manifest_dir.join(&manifest.font.path);
    }

    Ok(manifest)
}
