//! Invoicepress
//!
//! Invoice template rendering and export: a fixed catalog of HTML invoice
//! templates, a replace-only in-memory record store, and an export pipeline
//! that turns a rendered template into an isolated print document or a
//! single-page US-Letter PDF with an embedded raster capture.
//!
//! # Features
//!
//! - **Strategy-chain resolution**: heterogeneous template markup is located
//!   through a prioritized fallback chain, never a single selector
//! - **Curated override table**: templates known to clip or lose footers get
//!   tightened dimensions, consulted identically by print and PDF flows
//! - **Guaranteed cleanup**: offscreen staging is released on success and
//!   failure alike
//!
//! # Example
//!
//! ```no_run
//! use invoicepress::{catalog, ExportConfig, ExportPipeline, InvoiceStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InvoiceStore::new();
//! let record = store.current();
//! let page = catalog::render_page(&record, 1);
//!
//! let pipeline = ExportPipeline::new(ExportConfig::default());
//! let artifact = pipeline
//!     .export_pdf(&page, catalog::PAGE_CONTAINER_ID, &record, 1)
//!     .await?;
//! println!("exported {} ({} bytes)", artifact.filename, artifact.bytes.len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod catalog;
pub mod dom;
pub mod model;
pub mod overrides;
pub mod resolve;
pub mod store;

pub mod rendering;

pub mod export;

// Re-export the main surface at the crate root for ergonomic callers
pub use export::filename::{derive_filename, Clock, SystemClock};
pub use export::print::{PrintSurface, SpoolProvider, SurfaceProvider};
pub use export::{ExportArtifact, ExportPipeline};
pub use model::InvoiceRecord;
pub use store::InvoiceStore;

/// Configuration for the export pipeline
///
/// The staged size is a "safe" content size chosen to avoid clipping at the
/// US-Letter aspect ratio (800 x 1030 CSS px against the canonical 816px
/// on-screen page width), and the oversampling factor trades memory for
/// print sharpness. The delay fields are minimum settle waits, not readiness
/// signals; their exact durations are not load-bearing and tests zero them.
///
/// # Examples
///
/// ```
/// let cfg = invoicepress::ExportConfig::default();
/// assert_eq!(cfg.safe_width_px, 800);
/// assert_eq!(cfg.oversample, 3);
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Staged container width in CSS pixels
    pub safe_width_px: u32,
    /// Staged container height in CSS pixels (Letter aspect of the width)
    pub safe_height_px: u32,
    /// Device pixels per CSS pixel when rasterizing
    pub oversample: u32,
    /// Settle wait before rasterizing the staged clone, in milliseconds
    pub settle_ms: u64,
    /// Settle wait before triggering the platform print, in milliseconds
    pub print_settle_ms: u64,
    /// Delay before closing the print surface, in milliseconds
    pub close_delay_ms: u64,
    /// Fallback timer bounding the wait for the surface ready signal
    pub surface_timeout_ms: u64,
    /// Where exported PDFs are saved; `None` keeps artifacts in memory
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            safe_width_px: 800,
            safe_height_px: 1030,
            oversample: 3,
            settle_ms: 1500,
            print_settle_ms: 800,
            close_delay_ms: 1000,
            surface_timeout_ms: 1500,
            output_dir: None,
        }
    }
}

impl ExportConfig {
    /// Configuration with every settle wait zeroed, for tests and batch use.
    pub fn immediate() -> Self {
        Self {
            settle_ms: 0,
            print_settle_ms: 0,
            close_delay_ms: 0,
            surface_timeout_ms: 0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.safe_width_px, 800);
        assert_eq!(config.safe_height_px, 1030);
        assert_eq!(config.oversample, 3);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_immediate_config_zeroes_waits() {
        let config = ExportConfig::immediate();
        assert_eq!(config.settle_ms, 0);
        assert_eq!(config.print_settle_ms, 0);
        assert_eq!(config.close_delay_ms, 0);
        assert_eq!(config.surface_timeout_ms, 0);
        assert_eq!(config.safe_width_px, 800);
    }
}
