//! The operation surface exposed to the hosting environment. Each operation
//! is invoked independently with typed inputs and outputs, and none of them
//! fail: degenerate inputs produce defined empty or placeholder outputs with
//! a status string saying what happened.

use image::{Rgba, RgbaImage};
use log::{info, warn};

use crate::axis::{parse_axis, parse_z_axis};
use crate::collector::CollectionStore;
use crate::combination::{all_combinations, combination_at, Combination};
use crate::compositor::composite;
use crate::grid_layout::{layout, GridParams, LayoutMode, LayoutStyle};
use crate::text_paint::TextPaint;

pub use crate::combination::{string_to_number, NumberKind, StepIterator, StepOutput};

/// Opaque black fill used wherever the contract calls for a placeholder
/// instead of a real composite.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
}

/// Resolves one combination from raw axis text, wrapping `index` modulo the
/// total so callers can feed an ever-incrementing counter.
pub fn generate_combination(
    x_values: &str,
    y_values: &str,
    z_values: &str,
    index: usize,
) -> Combination {
    let x = parse_axis(x_values);
    let y = parse_axis(y_values);
    let z = parse_z_axis(z_values);

    let combination = combination_at(&x, &y, &z, index);
    info!("{}", combination.summary());
    combination
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub x_values: Vec<String>,
    pub y_values: Vec<String>,
    pub z_values: Vec<String>,
    pub total: usize,
}

/// Enumerates every combination up front as parallel per-axis value lists.
pub fn generate_batch(x_values: &str, y_values: &str, z_values: &str) -> BatchOutput {
    let x = parse_axis(x_values);
    let y = parse_axis(y_values);
    let z = parse_z_axis(z_values);

    let combinations = all_combinations(&x, &y, &z);
    if combinations.is_empty() {
        return BatchOutput {
            x_values: vec![String::new()],
            y_values: vec![String::new()],
            z_values: vec![String::new()],
            total: 0,
        };
    }

    let total = combinations.len();
    let mut batch = BatchOutput {
        x_values: Vec::with_capacity(total),
        y_values: Vec::with_capacity(total),
        z_values: Vec::with_capacity(total),
        total,
    };
    for (x_value, y_value, z_value) in combinations {
        batch.x_values.push(x_value);
        batch.y_values.push(y_value);
        batch.z_values.push(z_value);
    }

    info!("generated {total} combinations");
    batch
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchParams {
    pub label_height: u32,
    pub label_width: u32,
    pub gap: u32,
    pub style: LayoutStyle,
}

/// Composites an ordered image batch into a labeled comparison grid.
///
/// With `is_complete = false` (an upstream collector still gathering) this
/// returns a tiny 8x8 placeholder so downstream save steps have nothing
/// useful to persist. An empty batch yields a 512x512 placeholder. A
/// degenerate Z axis forces the flat layout regardless of `style`.
pub fn stitch_grid(
    images: &[RgbaImage],
    x_labels: &str,
    y_labels: &str,
    z_labels: &str,
    params: &StitchParams,
    is_complete: bool,
    painter: &mut dyn TextPaint,
) -> RgbaImage {
    if !is_complete {
        info!("stitch skipped: waiting for the full image batch");
        return placeholder(8, 8);
    }

    let Some(first) = images.first() else {
        info!("stitch skipped: no images supplied");
        return placeholder(512, 512);
    };

    let x = parse_axis(x_labels);
    let y = parse_axis(y_labels);
    let z = parse_z_axis(z_labels);

    let mode = if z.len() <= 1 {
        LayoutMode::Flat
    } else {
        match params.style {
            LayoutStyle::Blocked => LayoutMode::Blocked,
            LayoutStyle::ZHorizontal => LayoutMode::ZHorizontal,
        }
    };
    let grid = GridParams {
        image_width: first.width(),
        image_height: first.height(),
        label_height: params.label_height,
        label_width: params.label_width,
        gap: params.gap,
    };

    let geometry = layout(mode, &x, &y, &z, &grid);
    info!(
        "stitched {} images into a {}x{}x{} grid ({}x{} px)",
        images.len(),
        x.len(),
        y.len(),
        z.len(),
        geometry.width,
        geometry.height
    );
    composite(images, &geometry, painter)
}

#[derive(Debug, Clone)]
pub struct CollectOutput {
    pub images: Vec<RgbaImage>,
    pub collected_count: usize,
    pub is_complete: bool,
    pub status: String,
}

/// Automatic accumulation policy: append, drain when the expected total is
/// reached, auto-reset afterwards. While collecting, the echoed image is a
/// 1x1 placeholder so save steps triggered per run have nothing to keep.
pub fn auto_collect(
    store: &CollectionStore,
    images: &[RgbaImage],
    total_combinations: usize,
    collection_id: &str,
    reset: bool,
) -> CollectOutput {
    if reset {
        store.reset(collection_id);
        info!("reset collection '{collection_id}'");
        return CollectOutput {
            images: vec![placeholder(512, 512)],
            collected_count: 0,
            is_complete: false,
            status: "Collection reset".to_owned(),
        };
    }

    let collected_count = store.append(collection_id, images);
    match store.drain_if_complete(collection_id, total_combinations) {
        Some(collected) => {
            let status = format!("Complete: outputting all {collected_count} images");
            info!("{status}");
            CollectOutput {
                images: collected,
                collected_count,
                is_complete: true,
                status,
            }
        }
        None => {
            let status = format!("Collecting {collected_count}/{total_combinations}");
            info!("{status}");
            CollectOutput {
                images: vec![placeholder(1, 1)],
                collected_count,
                is_complete: false,
                status,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectMode {
    /// Append and echo the just-appended batch for live preview.
    Collect,
    /// Return the whole collection and clear it.
    OutputAndReset,
    /// Return a copy of the whole collection, leaving it intact.
    OutputOnly,
    /// Clear the collection.
    ResetOnly,
}

/// Manual accumulation policy with explicit mode control.
pub fn manual_collect(
    store: &CollectionStore,
    images: &[RgbaImage],
    collection_id: &str,
    mode: CollectMode,
    expected_count: usize,
) -> CollectOutput {
    match mode {
        CollectMode::ResetOnly => {
            store.reset(collection_id);
            info!("reset collection '{collection_id}'");
            CollectOutput {
                images: vec![placeholder(512, 512)],
                collected_count: 0,
                is_complete: false,
                status: format!("Collection '{collection_id}' reset"),
            }
        }
        CollectMode::Collect => {
            let collected_count = store.append(collection_id, images);
            let is_complete = collected_count >= expected_count;
            let mut status = format!("Collected {collected_count}/{expected_count} images");
            if is_complete {
                status.push_str(" - ready to output");
            }
            info!("{status}");
            CollectOutput {
                // Echo the current batch, not the whole collection.
                images: images.to_vec(),
                collected_count,
                is_complete,
                status,
            }
        }
        CollectMode::OutputAndReset | CollectMode::OutputOnly => {
            let collected = if mode == CollectMode::OutputAndReset {
                store.drain(collection_id)
            } else {
                store.snapshot(collection_id)
            };
            if collected.is_empty() {
                warn!("collection '{collection_id}' is empty");
                return CollectOutput {
                    images: vec![placeholder(512, 512)],
                    collected_count: 0,
                    is_complete: false,
                    status: format!("Collection '{collection_id}' is empty"),
                };
            }

            let collected_count = collected.len();
            let status = if mode == CollectMode::OutputAndReset {
                format!("Output {collected_count} images and reset collection")
            } else {
                format!("Output {collected_count} images")
            };
            info!("{status}");
            CollectOutput {
                images: collected,
                collected_count,
                is_complete: true,
                status,
            }
        }
    }
}
