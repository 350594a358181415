//! Single-page US-Letter PDF assembly.
//!
//! The rasterized capture is embedded as one image XObject. Because the
//! staged width may differ from the canonical 816px on-screen page width,
//! the image is centered horizontally instead of stretched: the offset is 0
//! when the widths match and grows symmetrically as the staged width
//! shrinks.

use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};

use crate::error::{Error, Result};
use crate::rendering::raster::Bitmap;

/// US-Letter page, millimetres.
pub const LETTER_WIDTH_MM: f64 = 215.9;
pub const LETTER_HEIGHT_MM: f64 = 279.4;

/// Canonical on-screen template width the centering math is anchored to.
pub const REFERENCE_WIDTH_PX: f64 = 816.0;

/// Horizontal centering offset for a capture staged at `css_width_px`.
pub fn centering_offset_mm(css_width_px: u32) -> f64 {
    let ratio = css_width_px as f64 / REFERENCE_WIDTH_PX;
    ((LETTER_WIDTH_MM - LETTER_WIDTH_MM * ratio) / 2.0).max(0.0)
}

/// Build the single-page PDF byte stream for one capture.
///
/// `css_width_px` is the staged container width (not the oversampled device
/// width); it drives the centering offset only.
pub fn assemble_letter_pdf(bitmap: &Bitmap, css_width_px: u32, title: &str) -> Result<Vec<u8>> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(Error::Pdf("empty capture".to_string()));
    }

    let offset = centering_offset_mm(css_width_px);
    let target_w_mm = LETTER_WIDTH_MM - offset * 2.0;

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(LETTER_WIDTH_MM as f32),
        Mm(LETTER_HEIGHT_MM as f32),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let xobject = ImageXObject {
        width: Px(bitmap.width as usize),
        height: Px(bitmap.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: bitmap.rgb_bytes(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };
    let image = Image::from(xobject);

    // printpdf sizes an image from pixel count and dpi. Pick the dpi that
    // maps the capture width onto the centered target width, then correct the
    // vertical scale so the page height is filled exactly.
    let dpi = bitmap.width as f64 * 25.4 / target_w_mm;
    let natural_h_mm = bitmap.height as f64 * 25.4 / dpi;
    let scale_y = LETTER_HEIGHT_MM / natural_h_mm;

    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(offset as f32)),
            translate_y: Some(Mm(0.0)),
            scale_y: Some(scale_y as f32),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}
