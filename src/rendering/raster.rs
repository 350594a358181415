//! Rasterizer: paint commands to an RGBA bitmap, then PNG.
//!
//! Text is drawn with the Spleen 8x16 PSF2 bitmap font, scaled by integer
//! nearest-neighbor. The whole surface is rendered at an oversampling factor
//! for print sharpness and the background is forced white.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use spleen_font::{PSF2Font, FONT_8X16};

use super::layout::{CHAR_HEIGHT, CHAR_WIDTH};
use super::paint::PaintCommand;
use super::Screenshot;
use crate::error::{Error, Result};

/// An uncompressed RGBA capture.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// RGBA, row-major.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    fn new(width: u32, height: u32) -> Self {
        // Background forced to opaque white.
        let pixels = vec![255u8; (width * height * 4) as usize];
        Self { width, height, pixels }
    }

    fn set_px(&mut self, x: i64, y: i64, rgba: (u8, u8, u8, u8)) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx] = rgba.0;
        self.pixels[idx + 1] = rgba.1;
        self.pixels[idx + 2] = rgba.2;
        self.pixels[idx + 3] = rgba.3;
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, rgba: (u8, u8, u8, u8)) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.set_px(x + dx, y + dy, rgba);
            }
        }
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Screenshot> {
        let mut png_data = Vec::new();
        PngEncoder::new(&mut png_data)
            .write_image(&self.pixels, self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(Screenshot {
            width: self.width,
            height: self.height,
            png_data,
        })
    }

    /// Raw RGB bytes for PDF embedding (alpha dropped, background is opaque).
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

/// Execute a paint list into a fresh white bitmap of
/// `width * oversample` x `height * oversample` device pixels.
pub fn rasterize(commands: &[PaintCommand], width: u32, height: u32, oversample: u32) -> Result<Bitmap> {
    if width == 0 || height == 0 || oversample == 0 {
        return Err(Error::Rasterization(format!(
            "degenerate surface {}x{} @ {}",
            width, height, oversample
        )));
    }
    let mut bitmap = Bitmap::new(width * oversample, height * oversample);
    let os = oversample as i64;

    let mut font = PSF2Font::new(FONT_8X16)
        .map_err(|e| Error::Rasterization(format!("font load: {:?}", e)))?;

    for command in commands {
        match command {
            PaintCommand::SolidRect { x, y, width: w, height: h, rgba } => {
                bitmap.fill_rect(
                    *x as i64 * os,
                    *y as i64 * os,
                    w * oversample,
                    h * oversample,
                    *rgba,
                );
            }
            PaintCommand::Text { x, y, text, scale, rgba } => {
                let glyph_scale = (*scale as i64) * os;
                let mut pen_y = *y as i64 * os;
                for line in text.lines() {
                    let mut pen_x = *x as i64 * os;
                    for ch in line.chars() {
                        let utf8 = ch.to_string();
                        match font.glyph_for_utf8(utf8.as_bytes()) {
                            Some(glyph) => {
                                for (row_y, row) in glyph.enumerate() {
                                    for (col_x, on) in row.enumerate() {
                                        if on {
                                            bitmap.fill_rect(
                                                pen_x + col_x as i64 * glyph_scale,
                                                pen_y + row_y as i64 * glyph_scale,
                                                glyph_scale as u32,
                                                glyph_scale as u32,
                                                *rgba,
                                            );
                                        }
                                    }
                                }
                            }
                            None => {
                                // Unknown glyph: box outline placeholder.
                                let w = CHAR_WIDTH as i64 * glyph_scale;
                                let h = CHAR_HEIGHT as i64 * glyph_scale;
                                bitmap.fill_rect(pen_x, pen_y, w as u32, glyph_scale as u32, *rgba);
                                bitmap.fill_rect(pen_x, pen_y + h - glyph_scale, w as u32, glyph_scale as u32, *rgba);
                                bitmap.fill_rect(pen_x, pen_y, glyph_scale as u32, h as u32, *rgba);
                                bitmap.fill_rect(pen_x + w - glyph_scale, pen_y, glyph_scale as u32, h as u32, *rgba);
                            }
                        }
                        pen_x += CHAR_WIDTH as i64 * glyph_scale;
                    }
                    pen_y += CHAR_HEIGHT as i64 * glyph_scale;
                }
            }
        }
    }

    Ok(bitmap)
}

/// Data-URL form of an encoded capture.
pub fn data_url(screenshot: &Screenshot) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(&screenshot.png_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::BLACK;

    #[test]
    fn background_is_forced_white() {
        let bitmap = rasterize(&[], 4, 4, 2).unwrap();
        assert_eq!(bitmap.width, 8);
        assert_eq!(bitmap.height, 8);
        assert!(bitmap.pixels.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn text_leaves_ink() {
        let commands = vec![PaintCommand::Text {
            x: 0,
            y: 0,
            text: "A".to_string(),
            scale: 1,
            rgba: BLACK,
        }];
        let bitmap = rasterize(&commands, 16, 20, 1).unwrap();
        assert!(bitmap.pixels.chunks_exact(4).any(|px| px[0] == 0));
    }

    #[test]
    fn oversampling_scales_ink_area() {
        let commands = vec![PaintCommand::SolidRect {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
            rgba: BLACK,
        }];
        let count_ink = |b: &Bitmap| b.pixels.chunks_exact(4).filter(|px| px[0] == 0).count();
        let one = rasterize(&commands, 8, 8, 1).unwrap();
        let three = rasterize(&commands, 8, 8, 3).unwrap();
        assert_eq!(count_ink(&one), 4);
        assert_eq!(count_ink(&three), 36);
    }

    #[test]
    fn png_encoding_and_data_url() {
        let bitmap = rasterize(&[], 4, 4, 1).unwrap();
        let shot = bitmap.encode_png().unwrap();
        assert_eq!(&shot.png_data[1..4], b"PNG");
        assert!(data_url(&shot).starts_with("data:image/png;base64,"));
    }

    #[test]
    fn degenerate_surface_is_rejected() {
        assert!(rasterize(&[], 0, 10, 1).is_err());
        assert!(rasterize(&[], 10, 10, 0).is_err());
    }

    #[test]
    fn rgb_drop_alpha() {
        let bitmap = rasterize(&[], 2, 1, 1).unwrap();
        assert_eq!(bitmap.rgb_bytes().len(), 6);
    }
}
