//! Export pipeline.
//!
//! One invocation is one strictly sequential asynchronous unit of work:
//! resolve the render surface, clone it into an offscreen stage, wait for
//! styles to settle, rasterize, assemble the PDF, save under the derived
//! filename, release the stage. Callers get a single completion or failure;
//! the progress variant additionally reports coarse milestone percentages.
//! Concurrent invocations are not synchronized against each other.

pub mod filename;
pub mod offscreen;
pub mod pdf;
pub mod print;

use std::path::PathBuf;

use scraper::Html;
use tokio::time;

use crate::dom::RenderNode;
use crate::error::{Error, Result};
use crate::model::InvoiceRecord;
use crate::overrides::override_for;
use crate::rendering::{render_surface, Screenshot};
use crate::resolve::{find_container, resolve_render_root};
use crate::ExportConfig;

use filename::{derive_filename, Clock, SystemClock};
use offscreen::OffscreenStage;
use print::SurfaceProvider;

/// Unscaled on-screen template page size, CSS pixels. The full-size capture
/// path stages at these dimensions instead of the safe export size.
pub const FULL_PAGE_WIDTH_PX: u32 = 816;
pub const FULL_PAGE_HEIGHT_PX: u32 = 1056;

/// Progress milestones reported by the progress-reporting variant.
const PROGRESS_LOCATED: u8 = 10;
const PROGRESS_STAGED: u8 = 30;
const PROGRESS_RASTERIZED: u8 = 50;
const PROGRESS_ENCODED: u8 = 80;
const PROGRESS_COMPLETE: u8 = 100;

/// The finished output of one export invocation.
#[derive(Debug)]
pub struct ExportArtifact {
    pub filename: String,
    /// The PDF byte stream.
    pub bytes: Vec<u8>,
    /// The rasterized capture embedded in the PDF.
    pub screenshot: Screenshot,
    /// Where the artifact was saved, when an output directory is configured.
    pub path: Option<PathBuf>,
}

/// Orchestrates print and PDF export over host pages.
pub struct ExportPipeline {
    config: ExportConfig,
    clock: Box<dyn Clock>,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Pipeline with an explicit time source, for deterministic filenames.
    pub fn with_clock(config: ExportConfig, clock: Box<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export the container's rendered template as a single-page Letter PDF.
    pub async fn export_pdf(
        &self,
        page_html: &str,
        container_id: &str,
        record: &InvoiceRecord,
        template_id: i32,
    ) -> Result<ExportArtifact> {
        self.export_inner(page_html, container_id, record, template_id, &mut |_| {})
            .await
    }

    /// Export staged at the unscaled 816x1056 template size, as the template
    /// browsing surface does. No horizontal centering is needed at this width.
    pub async fn export_pdf_full_size(
        &self,
        page_html: &str,
        container_id: &str,
        record: &InvoiceRecord,
        template_id: i32,
    ) -> Result<ExportArtifact> {
        self.export_sized(
            page_html,
            container_id,
            record,
            template_id,
            FULL_PAGE_WIDTH_PX,
            FULL_PAGE_HEIGHT_PX,
            &mut |_| {},
        )
        .await
    }

    /// Same flow, reporting monotone milestone percentages.
    pub async fn export_pdf_with_progress(
        &self,
        page_html: &str,
        container_id: &str,
        record: &InvoiceRecord,
        template_id: i32,
        progress: &mut dyn FnMut(u8),
    ) -> Result<ExportArtifact> {
        self.export_inner(page_html, container_id, record, template_id, progress)
            .await
    }

    /// Run the isolated print flow for the container's rendered template.
    pub async fn print(
        &self,
        page_html: &str,
        container_id: &str,
        template_id: i32,
        provider: &dyn SurfaceProvider,
    ) -> Result<()> {
        print::print_invoice(page_html, container_id, template_id, provider, &self.config).await
    }

    async fn export_inner(
        &self,
        page_html: &str,
        container_id: &str,
        record: &InvoiceRecord,
        template_id: i32,
        progress: &mut dyn FnMut(u8),
    ) -> Result<ExportArtifact> {
        self.export_sized(
            page_html,
            container_id,
            record,
            template_id,
            self.config.safe_width_px,
            self.config.safe_height_px,
            progress,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn export_sized(
        &self,
        page_html: &str,
        container_id: &str,
        record: &InvoiceRecord,
        template_id: i32,
        stage_width: u32,
        stage_height: u32,
        progress: &mut dyn FnMut(u8),
    ) -> Result<ExportArtifact> {
        let clone = locate_clone(page_html, container_id)?;
        progress(PROGRESS_LOCATED);

        let mut stage = OffscreenStage::new(stage_width, stage_height);
        stage.stage(clone);
        progress(PROGRESS_STAGED);

        // Minimum settle wait for fonts and styles; not a readiness signal.
        time::sleep(time::Duration::from_millis(self.config.settle_ms)).await;

        // The stage is released when it drops, so every failure path below
        // cleans up the scratch container.
        let staged = stage
            .content()
            .ok_or_else(|| Error::Rasterization("stage is empty".to_string()))?;
        let font_em = override_for(template_id).font_scale.em();
        let bitmap = render_surface(
            staged,
            stage.width,
            stage.height,
            self.config.oversample,
            font_em,
        )
        .map_err(|e| {
            log::error!("rasterization failed: {}", e);
            e
        })?;
        progress(PROGRESS_RASTERIZED);

        let screenshot = bitmap.encode_png()?;
        let bytes = pdf::assemble_letter_pdf(&bitmap, stage_width, "Invoice")
            .map_err(|e| {
                log::error!("pdf assembly failed: {}", e);
                e
            })?;
        progress(PROGRESS_ENCODED);

        let name = derive_filename(record, template_id, self.clock.as_ref());
        let path = match &self.config.output_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(&name);
                std::fs::write(&path, &bytes)?;
                log::info!("exported {}", path.display());
                Some(path)
            }
            None => None,
        };

        stage.release();
        progress(PROGRESS_COMPLETE);
        Ok(ExportArtifact {
            filename: name,
            bytes,
            screenshot,
            path,
        })
    }
}

/// Resolve and clone the render root out of the host page. Synchronous on
/// purpose: the parsed document is not `Send` and must not live across an
/// await point.
fn locate_clone(page_html: &str, container_id: &str) -> Result<RenderNode> {
    let doc = Html::parse_document(page_html);
    let container = find_container(&doc, container_id)?;
    let root = resolve_render_root(container);
    Ok(RenderNode::from_element(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_clone_missing_container() {
        let err = locate_clone("<html><body></body></html>", "invoice-preview").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(_)));
    }
}
