//! Label text rendering. The layout and compositing code only needs two
//! capabilities, "measure this text" and "paint it here", so they sit behind
//! the [`TextPaint`] trait; [`FontPainter`] is the fontdue-backed
//! implementation with a per-glyph raster cache.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign, WrapStyle,
};
use fontdue::Font;
use image::RgbaImage;

pub trait TextPaint {
    /// Pixel extent of the rendered text.
    fn measure(&mut self, text: &str) -> (u32, u32);

    /// Paints text with its top-left corner at (x, y), clipped to the canvas.
    fn draw(&mut self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: [u8; 4]);
}

#[derive(Debug, Clone)]
struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

pub struct FontPainter {
    font: Font,
    font_size: f32,
    glyph_cache: HashMap<fontdue::layout::GlyphRasterConfig, GlyphBitmap>,
}

impl FontPainter {
    pub fn from_path(font_path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(font_path)
            .with_context(|| format!("failed to read font file {}", font_path.display()))?;
        Self::from_bytes(bytes, font_size)
            .with_context(|| format!("failed to load font {}", font_path.display()))
    }

    pub fn from_bytes(bytes: Vec<u8>, font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|error| anyhow!("failed to parse font: {error}"))?;
        Ok(Self {
            font,
            font_size: font_size.max(1.0),
            glyph_cache: HashMap::new(),
        })
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn layout_for(&self, x: f32, y: f32, text: &str) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x,
            y,
            max_width: None,
            max_height: None,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_height: 1.0,
            wrap_style: WrapStyle::Letter,
            wrap_hard_breaks: true,
        });
        layout.append(&[&self.font], &TextStyle::new(text, self.font_size, 0));
        layout
    }
}

impl TextPaint for FontPainter {
    fn measure(&mut self, text: &str) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }

        let layout = self.layout_for(0.0, 0.0, text);
        let mut width = 0.0_f32;
        let mut height = 0.0_f32;
        for glyph in layout.glyphs() {
            width = width.max(glyph.x + glyph.width as f32);
            height = height.max(glyph.y + glyph.height as f32);
        }
        (width.ceil() as u32, height.ceil() as u32)
    }

    fn draw(&mut self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: [u8; 4]) {
        if text.is_empty() {
            return;
        }

        let (canvas_width, canvas_height) = canvas.dimensions();
        let layout = self.layout_for(x as f32, y as f32, text);
        let frame: &mut [u8] = canvas;

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let bitmap = self.glyph_cache.entry(glyph.key).or_insert_with(|| {
                let (_, coverage) = self.font.rasterize_config(glyph.key);
                GlyphBitmap {
                    width: glyph.width,
                    height: glyph.height,
                    coverage,
                }
            });

            blend_glyph(
                frame,
                canvas_width,
                canvas_height,
                glyph.x.round() as i32,
                glyph.y.round() as i32,
                bitmap,
                color,
            );
        }
    }
}

fn blend_glyph(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    x: i32,
    y: i32,
    glyph: &GlyphBitmap,
    color: [u8; 4],
) {
    for row in 0..glyph.height {
        let py = y + row as i32;
        if py < 0 || py >= frame_height as i32 {
            continue;
        }

        for col in 0..glyph.width {
            let px = x + col as i32;
            if px < 0 || px >= frame_width as i32 {
                continue;
            }

            let mask = glyph.coverage[row * glyph.width + col];
            if mask == 0 {
                continue;
            }

            let alpha = ((u16::from(mask) * u16::from(color[3])) / 255) as u8;
            let index = ((py as u32 * frame_width + px as u32) * 4) as usize;
            blend_pixel(frame, index, [color[0], color[1], color[2], alpha]);
        }
    }
}

fn blend_pixel(frame: &mut [u8], index: usize, src: [u8; 4]) {
    let alpha = u16::from(src[3]);
    if alpha == 0 {
        return;
    }

    let inv_alpha = 255_u16.saturating_sub(alpha);
    for channel in 0..3 {
        let dst = u16::from(frame[index + channel]);
        let src_channel = u16::from(src[channel]);
        frame[index + channel] = ((src_channel * alpha + dst * inv_alpha + 127) / 255) as u8;
    }
    frame[index + 3] = 255;
}
