//! Offscreen staging container.
//!
//! The clone is staged in a fixed-size container positioned far outside the
//! viewport, sized to the Letter aspect ratio, with chrome stripped and
//! sizing forced so the rasterizer sees exactly one page worth of content.
//! Release is guaranteed on success and failure alike: dropping the stage
//! releases it, and callers on the happy path release explicitly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::dom::RenderNode;

/// Off-viewport staging position, CSS pixels.
pub const OFFSCREEN_POSITION_PX: i32 = -9999;

pub struct OffscreenStage {
    pub width: u32,
    pub height: u32,
    content: Option<RenderNode>,
    released: Arc<AtomicBool>,
}

impl OffscreenStage {
    pub fn new(width: u32, height: u32) -> Self {
        log::debug!(
            "staging offscreen container {}x{} at ({}, {})",
            width,
            height,
            OFFSCREEN_POSITION_PX,
            OFFSCREEN_POSITION_PX
        );
        Self {
            width,
            height,
            content: None,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert the clone, normalizing it to the stage dimensions.
    pub fn stage(&mut self, mut clone: RenderNode) {
        clone.strip_chrome();
        let width = format!("{}px", self.width);
        let height = format!("{}px", self.height);
        clone.set_styles(&[
            ("width", &width),
            ("min-width", &width),
            ("max-width", &width),
            ("height", &height),
            ("max-height", &height),
            ("overflow", "hidden"),
            ("background", "white"),
            ("transform", "none"),
            ("margin", "0 auto"),
            ("padding", "0"),
            ("box-sizing", "border-box"),
        ]);
        self.content = Some(clone);
    }

    pub fn content(&self) -> Option<&RenderNode> {
        self.content.as_ref()
    }

    /// Handle that observes whether this stage has been released; used by
    /// tests to check cleanup on failure paths.
    pub fn release_probe(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }

    /// Remove the staged content. Idempotent.
    pub fn release(&mut self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.content = None;
            log::debug!("offscreen container released");
        }
    }
}

impl Drop for OffscreenStage {
    fn drop(&mut self) {
        self.release();
    }
}
