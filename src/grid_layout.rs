//! Pure pixel geometry for the comparison-grid layouts. Nothing here touches
//! image data; the compositor consumes the slots this module computes.

use serde::Deserialize;

/// Per-cell pixel inputs shared by every layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParams {
    pub image_width: u32,
    pub image_height: u32,
    /// Height of the horizontal label band above each column row.
    pub label_height: u32,
    /// Width of the vertical label band left of each row column.
    pub label_width: u32,
    pub gap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single X-by-Y grid; used whenever the Z axis is degenerate.
    Flat,
    /// One flat grid per Z value, side by side, each under its own Z label.
    ZHorizontal,
    /// A1111 style: one vertically stacked block per X value, each block a
    /// Y-by-Z grid with a rotated X label down the far-left band.
    Blocked,
}

/// Caller-facing style choice for stitching; `Flat` is never selected
/// directly, it is implied by a degenerate Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    #[default]
    #[serde(alias = "a1111", alias = "x_blocks")]
    Blocked,
    ZHorizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    /// Position of this cell's image in the linear image sequence.
    pub image_index: usize,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrientation {
    Horizontal,
    /// Rotated 90 degrees counter-clockwise (blocked-mode X labels).
    Rotated90,
}

/// A label plus the band region it is centered within. The compositor does
/// the centering once it has measured the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSlot {
    pub text: String,
    pub region_x: u32,
    pub region_y: u32,
    pub region_width: u32,
    pub region_height: u32,
    pub orientation: LabelOrientation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellSlot>,
    pub labels: Vec<LabelSlot>,
    /// Set when an axis is empty and the grid has no area. Not an error.
    pub is_empty: bool,
}

impl GridGeometry {
    fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            labels: Vec::new(),
            is_empty: true,
        }
    }
}

pub fn layout(
    mode: LayoutMode,
    x: &[String],
    y: &[String],
    z: &[String],
    params: &GridParams,
) -> GridGeometry {
    match mode {
        LayoutMode::Flat => flat_layout(x, y, params),
        LayoutMode::ZHorizontal => z_horizontal_layout(x, y, z, params),
        LayoutMode::Blocked => blocked_layout(x, y, z, params),
    }
}

fn flat_width(columns: usize, params: &GridParams) -> u32 {
    params.label_width
        + columns as u32 * params.image_width
        + (columns as u32 + 1) * params.gap
}

fn flat_height(rows: usize, params: &GridParams) -> u32 {
    params.label_height + rows as u32 * params.image_height + (rows as u32 + 1) * params.gap
}

/// Emits the cells and column/row labels of one flat grid whose top-left
/// corner sits at (origin_x, origin_y). Images are consumed row-major with
/// the column axis fastest, starting at `image_base`.
fn emit_flat_grid(
    geometry: &mut GridGeometry,
    columns: &[String],
    rows: &[String],
    params: &GridParams,
    origin_x: u32,
    origin_y: u32,
    image_base: usize,
) {
    for (column, text) in columns.iter().enumerate() {
        geometry.labels.push(LabelSlot {
            text: text.clone(),
            region_x: origin_x
                + params.label_width
                + params.gap
                + column as u32 * (params.image_width + params.gap),
            region_y: origin_y,
            region_width: params.image_width,
            region_height: params.label_height,
            orientation: LabelOrientation::Horizontal,
        });
    }

    for (row, text) in rows.iter().enumerate() {
        let cell_y = origin_y
            + params.label_height
            + params.gap
            + row as u32 * (params.image_height + params.gap);

        geometry.labels.push(LabelSlot {
            text: text.clone(),
            region_x: origin_x,
            region_y: cell_y,
            region_width: params.label_width,
            region_height: params.image_height,
            orientation: LabelOrientation::Horizontal,
        });

        for column in 0..columns.len() {
            geometry.cells.push(CellSlot {
                image_index: image_base + row * columns.len() + column,
                x: origin_x
                    + params.label_width
                    + params.gap
                    + column as u32 * (params.image_width + params.gap),
                y: cell_y,
            });
        }
    }
}

fn flat_layout(x: &[String], y: &[String], params: &GridParams) -> GridGeometry {
    if x.is_empty() || y.is_empty() {
        return GridGeometry::empty();
    }

    let mut geometry = GridGeometry {
        width: flat_width(x.len(), params),
        height: flat_height(y.len(), params),
        cells: Vec::with_capacity(x.len() * y.len()),
        labels: Vec::new(),
        is_empty: false,
    };
    emit_flat_grid(&mut geometry, x, y, params, 0, 0, 0);
    geometry
}

/// One flat grid per Z value, laid out left to right with an extra top band
/// of Z labels. Sub-grid z consumes the contiguous image slice starting at
/// `z * |X| * |Y|`.
fn z_horizontal_layout(
    x: &[String],
    y: &[String],
    z: &[String],
    params: &GridParams,
) -> GridGeometry {
    if x.is_empty() || y.is_empty() || z.is_empty() {
        return GridGeometry::empty();
    }

    let sub_width = flat_width(x.len(), params);
    let sub_height = flat_height(y.len(), params);
    let images_per_grid = x.len() * y.len();

    let mut geometry = GridGeometry {
        width: z.len() as u32 * sub_width + (z.len() as u32 + 1) * params.gap,
        height: sub_height + params.label_height,
        cells: Vec::with_capacity(images_per_grid * z.len()),
        labels: Vec::new(),
        is_empty: false,
    };

    for (z_index, text) in z.iter().enumerate() {
        let origin_x = z_index as u32 * sub_width + (z_index as u32 + 1) * params.gap;
        geometry.labels.push(LabelSlot {
            text: text.clone(),
            region_x: origin_x,
            region_y: 0,
            region_width: sub_width,
            region_height: params.label_height,
            orientation: LabelOrientation::Horizontal,
        });
        emit_flat_grid(
            &mut geometry,
            x,
            y,
            params,
            origin_x,
            params.label_height,
            z_index * images_per_grid,
        );
    }
    geometry
}

/// A1111-style blocked layout: one block per X value, stacked vertically.
/// Each block is a Y-by-Z grid (Z columns) with its own label bands, plus a
/// rotated X label in the `label_height`-wide band on the canvas's far left.
/// Block x consumes the contiguous image slice starting at `x * |Y| * |Z|`,
/// row-major with Z fastest.
fn blocked_layout(
    x: &[String],
    y: &[String],
    z: &[String],
    params: &GridParams,
) -> GridGeometry {
    if x.is_empty() || y.is_empty() || z.is_empty() {
        return GridGeometry::empty();
    }

    let block_width = flat_width(z.len(), params);
    let block_height = flat_height(y.len(), params);
    let images_per_block = y.len() * z.len();

    let mut geometry = GridGeometry {
        width: params.label_height + block_width,
        height: x.len() as u32 * block_height + (x.len() as u32 + 1) * params.gap,
        cells: Vec::with_capacity(images_per_block * x.len()),
        labels: Vec::new(),
        is_empty: false,
    };

    for (x_index, text) in x.iter().enumerate() {
        let origin_y = params.gap + x_index as u32 * (block_height + params.gap);
        geometry.labels.push(LabelSlot {
            text: text.clone(),
            region_x: 0,
            region_y: origin_y,
            region_width: params.label_height,
            region_height: block_height,
            orientation: LabelOrientation::Rotated90,
        });
        emit_flat_grid(
            &mut geometry,
            z,
            y,
            params,
            params.label_height,
            origin_y,
            x_index * images_per_block,
        );
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_owned()).collect()
    }

    fn params() -> GridParams {
        GridParams {
            image_width: 100,
            image_height: 100,
            label_height: 120,
            label_width: 150,
            gap: 4,
        }
    }

    #[test]
    fn flat_canvas_dimensions() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a", "b", "c"]),
            &labels(&["1", "2"]),
            &labels(&[""]),
            &params(),
        );
        assert_eq!(geometry.width, 150 + 3 * 100 + 4 * 4); // 466
        assert_eq!(geometry.height, 120 + 2 * 100 + 3 * 4); // 332
        assert_eq!(geometry.cells.len(), 6);
        assert!(!geometry.is_empty);
    }

    #[test]
    fn flat_cell_origins_and_consumption_order() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a", "b"]),
            &labels(&["1", "2"]),
            &labels(&[""]),
            &params(),
        );

        let indices: Vec<usize> = geometry.cells.iter().map(|cell| cell.image_index).collect();
        assert_eq!(indices, [0, 1, 2, 3]);

        let first = geometry.cells[0];
        assert_eq!((first.x, first.y), (150 + 4, 120 + 4));
        let second = geometry.cells[1];
        assert_eq!((second.x, second.y), (150 + 4 + 104, 120 + 4));
        let third = geometry.cells[2];
        assert_eq!((third.x, third.y), (150 + 4, 120 + 4 + 104));
    }

    #[test]
    fn flat_emits_one_row_label_per_row() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a", "b", "c"]),
            &labels(&["1", "2"]),
            &labels(&[""]),
            &params(),
        );
        let row_labels: Vec<&LabelSlot> = geometry
            .labels
            .iter()
            .filter(|label| label.region_x == 0)
            .collect();
        assert_eq!(row_labels.len(), 2);
        assert_eq!(row_labels[0].text, "1");
        assert_eq!(row_labels[1].text, "2");
    }

    #[test]
    fn z_horizontal_canvas_dimensions() {
        let geometry = layout(
            LayoutMode::ZHorizontal,
            &labels(&["a", "b"]),
            &labels(&["1"]),
            &labels(&["p", "q", "r"]),
            &params(),
        );

        let sub_width = 150 + 2 * 100 + 3 * 4;
        let sub_height = 120 + 100 + 2 * 4;
        assert_eq!(geometry.width, 3 * sub_width + 4 * 4);
        assert_eq!(geometry.height, sub_height + 120);
        assert_eq!(geometry.cells.len(), 6);
    }

    #[test]
    fn z_horizontal_consumes_contiguous_slices() {
        let geometry = layout(
            LayoutMode::ZHorizontal,
            &labels(&["a", "b"]),
            &labels(&["1", "2"]),
            &labels(&["p", "q"]),
            &params(),
        );

        let indices: Vec<usize> = geometry.cells.iter().map(|cell| cell.image_index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4, 5, 6, 7]);

        // Second sub-grid starts one full sub-grid width further right.
        let sub_width = 150 + 2 * 100 + 3 * 4;
        assert_eq!(geometry.cells[4].x, geometry.cells[0].x + sub_width + 4);
        assert_eq!(geometry.cells[4].y, geometry.cells[0].y);
    }

    #[test]
    fn blocked_canvas_dimensions() {
        let geometry = layout(
            LayoutMode::Blocked,
            &labels(&["a", "b"]),
            &labels(&["1", "2", "3"]),
            &labels(&["p", "q"]),
            &params(),
        );

        let block_width = 150 + 2 * 100 + 3 * 4;
        let block_height = 3 * 100 + 4 * 4 + 120;
        assert_eq!(geometry.width, 120 + block_width);
        assert_eq!(geometry.height, 2 * block_height + 3 * 4);
        assert_eq!(geometry.cells.len(), 12);
    }

    #[test]
    fn blocked_consumes_z_fastest_within_each_block() {
        let geometry = layout(
            LayoutMode::Blocked,
            &labels(&["a", "b"]),
            &labels(&["1", "2"]),
            &labels(&["p", "q"]),
            &params(),
        );

        // Block 0 holds images 0..4 in (y, z) row-major order; block 1 holds 4..8.
        let indices: Vec<usize> = geometry.cells.iter().map(|cell| cell.image_index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4, 5, 6, 7]);

        // Within block 0, cells 0 and 1 share a row (same y, z varies).
        assert_eq!(geometry.cells[0].y, geometry.cells[1].y);
        assert!(geometry.cells[0].x < geometry.cells[1].x);
        // Cell 2 starts the next row.
        assert!(geometry.cells[2].y > geometry.cells[0].y);
    }

    #[test]
    fn blocked_x_labels_are_rotated_and_span_their_block() {
        let geometry = layout(
            LayoutMode::Blocked,
            &labels(&["a", "b"]),
            &labels(&["1"]),
            &labels(&["p", "q"]),
            &params(),
        );

        let x_labels: Vec<&LabelSlot> = geometry
            .labels
            .iter()
            .filter(|label| label.orientation == LabelOrientation::Rotated90)
            .collect();
        assert_eq!(x_labels.len(), 2);
        assert_eq!(x_labels[0].region_width, 120);
        assert_eq!(x_labels[0].region_height, 100 + 2 * 4 + 120);
        assert_eq!(x_labels[0].region_y, 4);
    }

    #[test]
    fn empty_axis_yields_zero_area_geometry() {
        for mode in [LayoutMode::Flat, LayoutMode::ZHorizontal, LayoutMode::Blocked] {
            let geometry = layout(mode, &[], &labels(&["1"]), &labels(&[""]), &params());
            assert!(geometry.is_empty);
            assert_eq!((geometry.width, geometry.height), (0, 0));
            assert!(geometry.cells.is_empty());
        }
    }
}
