//! Paints a batch of images and their axis labels onto a background-filled
//! canvas following the geometry computed by [`crate::grid_layout`].

use image::{imageops, Rgba, RgbaImage};

use crate::grid_layout::{GridGeometry, LabelOrientation};
use crate::text_paint::TextPaint;

pub const BACKGROUND: Rgba<u8> = Rgba([40, 40, 40, 255]);
pub const LABEL_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Composites `images` into the canvas described by `geometry`. A short image
/// supply is not an error: cells past the end of the batch keep the
/// background color (e.g. a caller previewing before collection completes).
pub fn composite(
    images: &[RgbaImage],
    geometry: &GridGeometry,
    painter: &mut dyn TextPaint,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(geometry.width, geometry.height, BACKGROUND);
    if geometry.is_empty {
        return canvas;
    }

    for cell in &geometry.cells {
        let Some(tile) = images.get(cell.image_index) else {
            continue;
        };
        imageops::replace(&mut canvas, tile, i64::from(cell.x), i64::from(cell.y));
    }

    for label in &geometry.labels {
        if label.text.is_empty() {
            continue;
        }
        let (text_width, text_height) = painter.measure(&label.text);
        if text_width == 0 || text_height == 0 {
            continue;
        }

        match label.orientation {
            LabelOrientation::Horizontal => {
                let x = label.region_x + label.region_width.saturating_sub(text_width) / 2;
                let y = label.region_y + label.region_height.saturating_sub(text_height) / 2;
                painter.draw(&mut canvas, x as i32, y as i32, &label.text, LABEL_COLOR);
            }
            LabelOrientation::Rotated90 => {
                // Paint into a transparent scratch image, then rotate 90
                // degrees counter-clockwise and center it within the band.
                let mut scratch = RgbaImage::new(text_width, text_height);
                painter.draw(&mut scratch, 0, 0, &label.text, LABEL_COLOR);
                let rotated = imageops::rotate270(&scratch);

                let x = label.region_x + label.region_width.saturating_sub(rotated.width()) / 2;
                let y = label.region_y + label.region_height.saturating_sub(rotated.height()) / 2;
                imageops::overlay(&mut canvas, &rotated, i64::from(x), i64::from(y));
            }
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::{composite, BACKGROUND};
    use crate::grid_layout::{layout, GridParams, LayoutMode};
    use crate::text_paint::TextPaint;
    use image::{Rgba, RgbaImage};

    /// Paints a solid rectangle sized like the measured text. Keeps the
    /// compositor tests independent of any real font file.
    struct BlockPainter;

    impl TextPaint for BlockPainter {
        fn measure(&mut self, text: &str) -> (u32, u32) {
            (8 * text.chars().count() as u32, 10)
        }

        fn draw(&mut self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: [u8; 4]) {
            let (width, height) = self.measure(text);
            for dy in 0..height {
                for dx in 0..width {
                    let px = x + dx as i32;
                    let py = y + dy as i32;
                    if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32
                    {
                        continue;
                    }
                    canvas.put_pixel(px as u32, py as u32, Rgba(color));
                }
            }
        }
    }

    fn labels(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_owned()).collect()
    }

    fn red_tile(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 0, 0, 255]))
    }

    fn small_params() -> GridParams {
        GridParams {
            image_width: 10,
            image_height: 10,
            label_height: 12,
            label_width: 15,
            gap: 2,
        }
    }

    #[test]
    fn places_images_at_cell_origins() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a", "b"]),
            &labels(&["1"]),
            &labels(&[""]),
            &small_params(),
        );
        let images = vec![red_tile(10, 10), red_tile(10, 10)];
        let canvas = composite(&images, &geometry, &mut BlockPainter);

        assert_eq!(canvas.width(), 15 + 2 * 10 + 3 * 2);
        assert_eq!(canvas.height(), 12 + 10 + 2 * 2);

        // Top-left pixel of the first cell is image data, not background.
        assert_eq!(*canvas.get_pixel(15 + 2, 12 + 2), Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn short_image_supply_leaves_background_cells() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a", "b"]),
            &labels(&["1", "2"]),
            &labels(&[""]),
            &small_params(),
        );
        let images = vec![red_tile(10, 10)]; // 1 of 4
        let canvas = composite(&images, &geometry, &mut BlockPainter);

        assert_eq!(*canvas.get_pixel(15 + 2, 12 + 2), Rgba([200, 0, 0, 255]));
        // Last cell stays at background fill.
        let last = geometry.cells.last().unwrap();
        assert_eq!(*canvas.get_pixel(last.x, last.y), BACKGROUND);
    }

    #[test]
    fn degenerate_geometry_yields_zero_area_canvas() {
        let geometry = layout(
            LayoutMode::Flat,
            &[],
            &labels(&["1"]),
            &labels(&[""]),
            &small_params(),
        );
        let canvas = composite(&[], &geometry, &mut BlockPainter);
        assert_eq!((canvas.width(), canvas.height()), (0, 0));
    }

    #[test]
    fn horizontal_labels_are_centered_in_their_band() {
        let geometry = layout(
            LayoutMode::Flat,
            &labels(&["a"]),
            &labels(&["1"]),
            &labels(&[""]),
            &small_params(),
        );
        let canvas = composite(&[red_tile(10, 10)], &geometry, &mut BlockPainter);

        // "a" measures 8x10, column band is 10 wide at x = 15 + 2, 12 tall.
        let label_x = 15 + 2 + (10 - 8) / 2;
        let label_y = (12 - 10) / 2;
        assert_eq!(*canvas.get_pixel(label_x, label_y), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(label_x - 2, label_y), BACKGROUND);
    }

    #[test]
    fn rotated_labels_land_in_the_left_band() {
        let geometry = layout(
            LayoutMode::Blocked,
            &labels(&["aa"]),
            &labels(&["1"]),
            &labels(&["p", "q"]),
            &small_params(),
        );
        let canvas = composite(
            &[red_tile(10, 10), red_tile(10, 10)],
            &geometry,
            &mut BlockPainter,
        );

        // "aa" measures 16x10; rotated it is 10x16, centered in the 12-wide
        // far-left band spanning the block's vertical extent.
        let block_height = 10 + 2 * 2 + 12;
        let x = (12 - 10) / 2;
        let y = 2 + (block_height - 16) / 2;
        assert_eq!(*canvas.get_pixel(x, y), Rgba([255, 255, 255, 255]));
        // The band outside the rotated label stays background.
        assert_eq!(*canvas.get_pixel(x, 0), BACKGROUND);
    }
}
