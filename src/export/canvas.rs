//! Layout-proof rasterizer built on the `image` crate.
//!
//! Renders the poster chrome at the exact export size without map tiles:
//!
//! | Element | Source |
//! |---|---|
//! | Paper | `palette.background` |
//! | Map area (inside the margin) | `palette.landuse` |
//! | Frame | `palette.border`, shape from `format.border_style` |
//! | Text backdrop band | `palette.background` blended at `typography.backdrop_alpha` |
//!
//! Useful for checking margins, frame weight, and backdrop placement at
//! print size before committing to a full map render.

use super::backend::{RasterError, Rasterizer};
use super::calculations::{PixelRect, calculate_band_height, calculate_map_area};
use crate::poster::{BorderStyle, ExportResolution, PosterConfig, TextBackdrop, TextPosition};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa` into a pixel.
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, RasterError> {
    let invalid = || RasterError::InvalidColor(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgb[i] = v * 17;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                255
            };
            Ok(Rgba([r, g, b, a]))
        }
        _ => Err(invalid()),
    }
}

/// Renders poster layout proofs as PNG.
pub struct CanvasRasterizer;

impl CanvasRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CanvasRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CanvasRasterizer {
    fn render(
        &self,
        poster: &PosterConfig,
        resolution: &ExportResolution,
    ) -> Result<Vec<u8>, RasterError> {
        let image = render_canvas(poster, resolution.width, resolution.height)?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RasterError::Encoding(e.to_string()))?;
        Ok(bytes)
    }
}

/// Render the proof into an in-memory buffer of exactly `width`×`height`.
pub fn render_canvas(
    poster: &PosterConfig,
    width: u32,
    height: u32,
) -> Result<RgbaImage, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyTarget { width, height });
    }
    let palette = &poster.palette;
    let paper = parse_hex_color(&palette.background)?;
    let land = parse_hex_color(&palette.landuse)?;
    let ink = parse_hex_color(&palette.border)?;

    let mut image = RgbaImage::from_pixel(width, height, paper);
    let map_area = calculate_map_area(width, height, poster.format.margin);
    fill_rect(&mut image, map_area, land);
    draw_frame(&mut image, map_area, poster.format.border_style, ink);

    let typography = &poster.typography;
    let has_text = typography.show_title || typography.show_subtitle;
    if has_text && typography.text_backdrop != TextBackdrop::None {
        draw_backdrop(&mut image, map_area, poster, paper);
    }

    Ok(image)
}

fn stroke_width(width: u32, style: BorderStyle) -> u32 {
    match style {
        BorderStyle::Thick => (width / 120).max(2),
        _ => (width / 400).max(1),
    }
}

fn draw_frame(image: &mut RgbaImage, area: PixelRect, style: BorderStyle, color: Rgba<u8>) {
    let stroke = stroke_width(image.width(), style);
    match style {
        BorderStyle::None => {}
        BorderStyle::Thin | BorderStyle::Thick => stroke_rect(image, area, stroke, color),
        BorderStyle::Double => {
            stroke_rect(image, area, stroke, color);
            stroke_rect(image, shrink(area, stroke * 3), stroke, color);
        }
        BorderStyle::Inset => {
            // Frame sits halfway into the margin, outside the map
            let (x, _, _, _) = area;
            let offset = x / 2;
            stroke_rect(image, grow(area, offset, image.dimensions()), stroke, color);
        }
    }
}

fn draw_backdrop(image: &mut RgbaImage, area: PixelRect, poster: &PosterConfig, color: Rgba<u8>) {
    let typography = &poster.typography;
    let (map_x, map_y, map_w, map_h) = area;
    let band = calculate_band_height(map_h, typography.backdrop_height);
    if band == 0 {
        return;
    }

    let top = match typography.position {
        TextPosition::Top => map_y,
        TextPosition::Center => map_y + (map_h - band) / 2,
        TextPosition::Bottom => map_y + map_h - band,
    };
    let base_alpha = (typography.backdrop_alpha / 100.0).clamp(0.0, 1.0);
    let strength = match typography.text_backdrop {
        TextBackdrop::Subtle => 0.5,
        _ => 1.0,
    };

    for row in 0..band {
        let t = (row as f64 + 0.5) / band as f64;
        let ramp = match (typography.text_backdrop, typography.position) {
            (TextBackdrop::Gradient, TextPosition::Top) => 1.0 - t,
            (TextBackdrop::Gradient, TextPosition::Bottom) => t,
            (TextBackdrop::Gradient, TextPosition::Center) => 1.0 - (2.0 * t - 1.0).abs(),
            _ => 1.0,
        };
        let alpha = base_alpha * strength * ramp;
        let y = top + row;
        for x in map_x..map_x + map_w {
            blend(image.get_pixel_mut(x, y), color, alpha);
        }
    }
}

fn fill_rect(image: &mut RgbaImage, (x, y, w, h): PixelRect, color: Rgba<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            image.put_pixel(px, py, color);
        }
    }
}

fn stroke_rect(image: &mut RgbaImage, rect: PixelRect, stroke: u32, color: Rgba<u8>) {
    let (x, y, w, h) = rect;
    if w == 0 || h == 0 {
        return;
    }
    let stroke = stroke.min(w / 2).min(h / 2).max(1);
    fill_rect(image, (x, y, w, stroke), color);
    fill_rect(image, (x, y + h - stroke, w, stroke), color);
    fill_rect(image, (x, y, stroke, h), color);
    fill_rect(image, (x + w - stroke, y, stroke, h), color);
}

fn shrink((x, y, w, h): PixelRect, by: u32) -> PixelRect {
    let by = by.min(w / 2).min(h / 2);
    (x + by, y + by, w - 2 * by, h - 2 * by)
}

fn grow((x, y, w, h): PixelRect, by: u32, (max_w, max_h): (u32, u32)) -> PixelRect {
    let by = by.min(x).min(y);
    let nx = x - by;
    let ny = y - by;
    (nx, ny, (w + 2 * by).min(max_w - nx), (h + 2 * by).min(max_h - ny))
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, alpha: f64) {
    for i in 0..3 {
        let mixed = src.0[i] as f64 * alpha + dst.0[i] as f64 * (1.0 - alpha);
        dst.0[i] = mixed.round().clamp(0.0, 255.0) as u8;
    }
}
