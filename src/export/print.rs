//! Isolated-document print flow.
//!
//! The resolved render root is cloned, normalized, and injected into a fresh
//! presentation surface together with a print stylesheet scoped to the
//! `invoice-template-print` marker class. The surface is a trait seam so
//! hosts can supply a real window, a spool file, or a test double; a blocked
//! surface (the popup case) aborts the flow before any content is generated.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use scraper::Html;
use tokio::time;

use crate::dom::RenderNode;
use crate::error::{Error, Result};
use crate::overrides::{override_for, DimensionalOverride, FontScale};
use crate::resolve::{find_template_node, resolve_render_root};
use crate::ExportConfig;

/// Marker class scoping every print style rule.
pub const PRINT_MARKER_CLASS: &str = "invoice-template-print";

const READY_POLL_MS: u64 = 25;

/// An isolated presentation surface able to show and print one document.
pub trait PrintSurface: Send {
    /// Whether the surface has finished loading.
    fn ready(&self) -> bool;

    /// Inject the final document and trigger the platform print.
    fn present(&mut self, document: &str) -> Result<()>;

    /// Tear the surface down. Must tolerate being called after failure.
    fn close(&mut self);
}

/// Opens presentation surfaces. Opening can fail (popup policy, headless
/// host without a spool directory); that failure aborts the print flow.
pub trait SurfaceProvider: Send + Sync {
    fn open(&self, width: u32, height: u32) -> Result<Box<dyn PrintSurface>>;
}

/// Default provider: spools the print document to a file per invocation.
pub struct SpoolProvider {
    pub dir: PathBuf,
}

static SPOOL_SEQ: AtomicU64 = AtomicU64::new(0);

impl SurfaceProvider for SpoolProvider {
    fn open(&self, width: u32, height: u32) -> Result<Box<dyn PrintSurface>> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::SurfaceUnavailable(format!("spool dir: {}", e)))?;
        let seq = SPOOL_SEQ.fetch_add(1, Ordering::SeqCst);
        let path = self.dir.join(format!("print-{}x{}-{}.html", width, height, seq));
        Ok(Box::new(SpoolSurface { path, printed: false }))
    }
}

struct SpoolSurface {
    path: PathBuf,
    printed: bool,
}

impl PrintSurface for SpoolSurface {
    fn ready(&self) -> bool {
        true
    }

    fn present(&mut self, document: &str) -> Result<()> {
        std::fs::write(&self.path, document)?;
        self.printed = true;
        log::info!("print document spooled to {}", self.path.display());
        Ok(())
    }

    fn close(&mut self) {
        if !self.printed {
            log::warn!("print surface closed without printing");
        }
    }
}

/// Per-invocation guard: the close-and-print sequence runs at most once even
/// if both the ready signal and the fallback timer fire.
struct PresentOnce(bool);

impl PresentOnce {
    fn new() -> Self {
        Self(false)
    }

    fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.0, true)
    }
}

/// Run the full print flow against a host page.
pub async fn print_invoice(
    page_html: &str,
    container_id: &str,
    template_id: i32,
    provider: &dyn SurfaceProvider,
    config: &ExportConfig,
) -> Result<()> {
    let overrides = override_for(template_id);

    // Resolution holds non-Send parser types; keep it scoped so the future
    // stays Send.
    let clone = {
        let doc = Html::parse_document(page_html);
        let node = find_template_node(&doc, container_id, template_id)?;
        RenderNode::from_element(resolve_render_root(node))
    };
    let clone = prepare_print_clone(clone, &overrides);
    let document = build_print_document(&clone, &overrides);

    let mut surface = provider.open(overrides.container_width, overrides.container_height)?;
    log::debug!("print surface opened for template {}", template_id);

    // Wait for the ready signal, bounded by the fallback timer for surfaces
    // whose signal never fires.
    let fallback = time::sleep(Duration::from_millis(config.surface_timeout_ms));
    tokio::pin!(fallback);
    loop {
        if surface.ready() {
            break;
        }
        tokio::select! {
            _ = &mut fallback => break,
            _ = time::sleep(Duration::from_millis(READY_POLL_MS)) => {}
        }
    }

    let mut guard = PresentOnce::new();
    let presented = if guard.fire() {
        // Let styles and fonts settle before the platform print.
        time::sleep(Duration::from_millis(config.print_settle_ms)).await;
        surface.present(&document)
    } else {
        Ok(())
    };

    // The surface is torn down whether presenting succeeded or not.
    time::sleep(Duration::from_millis(config.close_delay_ms)).await;
    surface.close();
    presented
}

/// Normalize the clone for printing: chrome stripped, override dimensions
/// applied to the root, marker classes added.
pub fn prepare_print_clone(mut clone: RenderNode, overrides: &DimensionalOverride) -> RenderNode {
    clone.strip_chrome();
    let width = format!("{}px", overrides.container_width);
    let height = format!("{}px", overrides.container_height);
    let padding = format!("{}px", overrides.container_padding);
    clone.set_styles(&[
        ("width", &width),
        ("min-width", &width),
        ("max-width", &width),
        ("height", &height),
        ("min-height", &height),
        ("max-height", &height),
        ("margin", "0 auto"),
        ("padding", &padding),
        ("background", "white"),
        ("border-radius", "0"),
        ("transform", "none"),
        ("overflow", "hidden"),
        ("box-sizing", "border-box"),
        ("display", "flex"),
        ("flex-direction", "column"),
        ("position", "relative"),
        ("page-break-inside", "avoid"),
    ]);
    clone.add_class(PRINT_MARKER_CLASS);
    clone.add_class(overrides.font_scale.class());
    clone
}

/// The print stylesheet, fixed to 8.5in x 11in with the template's
/// dimensional override folded in.
pub fn print_style_sheet(overrides: &DimensionalOverride) -> String {
    let compact = overrides.font_scale == FontScale::Compact;
    let (h1, h2, h3) = if compact {
        ("2rem", "1rem", "0.9rem")
    } else {
        ("2.2rem", "1.1rem", "0.95rem")
    };
    let (table_font, cell_padding) = if compact {
        ("0.75rem", "0.3rem 0.5rem")
    } else {
        ("0.8rem", "0.4rem 0.6rem")
    };

    format!(
        "@page {{\n\
           size: 8.5in 11in;\n\
           margin: {margins};\n\
           print-color-adjust: exact;\n\
         }}\n\
         html, body {{\n\
           background: white;\n\
           margin: 0;\n\
           padding: 0;\n\
           width: 100%;\n\
           height: 100%;\n\
           print-color-adjust: exact;\n\
         }}\n\
         body {{\n\
           display: flex;\n\
           justify-content: center;\n\
           align-items: flex-start;\n\
         }}\n\
         .{marker} {{\n\
           width: 7.5in;\n\
           height: {print_height};\n\
           max-height: {print_height};\n\
           margin: 0 auto;\n\
           padding: 0.4in;\n\
           overflow: hidden;\n\
           display: flex;\n\
           flex-direction: column;\n\
           page-break-inside: avoid;\n\
           font-size: {em}em;\n\
         }}\n\
         .{marker} h1 {{ font-size: {h1}; line-height: 1.2; }}\n\
         .{marker} h2 {{ font-size: {h2}; line-height: 1.2; }}\n\
         .{marker} h3 {{ font-size: {h3}; line-height: 1.2; }}\n\
         .{marker} table {{ font-size: {table_font}; line-height: 1.3; }}\n\
         .{marker} td, .{marker} th {{ padding: {cell_padding}; }}\n\
         .{marker} > div:last-child {{ margin-top: auto; margin-bottom: 0; }}\n\
         .{marker} * {{ border: none; box-shadow: none; outline: none; print-color-adjust: exact; }}\n",
        margins = overrides.page_margins,
        print_height = overrides.print_height,
        em = overrides.font_scale.em(),
        marker = PRINT_MARKER_CLASS,
        h1 = h1,
        h2 = h2,
        h3 = h3,
        table_font = table_font,
        cell_padding = cell_padding,
    )
}

/// Wrap the prepared clone in a standalone print document.
pub fn build_print_document(clone: &RenderNode, overrides: &DimensionalOverride) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Print Invoice</title>\n\
         <meta charset=\"utf-8\">\n<style>\n{}\n</style>\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        print_style_sheet(overrides),
        clone.to_html()
    )
}
