//! Bitmap rendering of a staged render tree.
//!
//! The pipeline renders the cloned template in three steps that mirror a
//! browser paint: block layout of the tree into positioned boxes, a flat
//! paint-command list, and rasterization into an RGBA bitmap with a bitmap
//! font. The rasterizer does not paginate; anything past the staged height
//! is clipped, which is what the dimensional override table compensates for.

pub mod layout;
pub mod paint;
pub mod raster;

use crate::dom::RenderNode;
use crate::error::Result;

/// An encoded capture of the staged render tree.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

/// Render a staged tree to a bitmap at the given oversampling factor.
///
/// `width`/`height` are the staged container's CSS pixel size; the returned
/// bitmap is `oversample` times larger in both axes with a white background
/// forced, matching print capture.
pub fn render_surface(
    root: &RenderNode,
    width: u32,
    height: u32,
    oversample: u32,
    font_em: f64,
) -> Result<raster::Bitmap> {
    let nodes = layout::layout_surface(root, width, height, font_em);
    let commands = paint::build_paint_list(&nodes);
    raster::rasterize(&commands, width, height, oversample)
}
