//! Template catalog.
//!
//! A fixed, ordered list of renderable invoice layouts addressed by 1-based
//! id. Lookup clamps to the catalog: any id outside `[1, TEMPLATE_COUNT]`
//! falls back to the first template. The markup each template emits is
//! deliberately heterogeneous (inline width marker, marker class, white
//! background, or no marker at all) which is exactly why render-root
//! resolution runs a fallback chain instead of a single selector.

use crate::dom::escape_text;
use crate::model::InvoiceRecord;
use crate::resolve::PREVIEW_ID_PREFIX;

/// Number of templates in the catalog.
pub const TEMPLATE_COUNT: usize = 13;

/// Container id used by [`render_page`] for the host page.
pub const PAGE_CONTAINER_ID: &str = "invoice-preview";

/// How a template marks its page root, mirroring the markers the
/// resolution chain probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootMarker {
    /// Inline `width: 816px` plus the `invoice-template` class.
    WidthAndClass,
    /// Inline `width: 816px` only.
    WidthStyle,
    /// `invoice-template` class only.
    ClassOnly,
    /// White background style only.
    WhiteBackground,
    /// No marker; resolution falls through to the first child.
    Plain,
}

/// One renderable template variant.
pub struct TemplateHandle {
    pub id: i32,
    pub name: &'static str,
    marker: RootMarker,
    accent: &'static str,
}

impl TemplateHandle {
    /// Render the record into this template's preview container.
    pub fn render(&self, record: &InvoiceRecord) -> String {
        format!(
            "<div id=\"{}{}\" class=\"template-preview\">{}</div>",
            PREVIEW_ID_PREFIX,
            self.id,
            self.render_root(record)
        )
    }

    fn render_root(&self, record: &InvoiceRecord) -> String {
        let (class_attr, style_attr) = match self.marker {
            RootMarker::WidthAndClass => (
                " class=\"invoice-template\"",
                "width: 816px; min-height: 1056px; background: white; padding: 48px".to_string(),
            ),
            RootMarker::WidthStyle => (
                "",
                "width: 816px; min-height: 1056px; background: white; padding: 48px".to_string(),
            ),
            RootMarker::ClassOnly => (
                " class=\"invoice-template\"",
                "background: white; padding: 48px".to_string(),
            ),
            RootMarker::WhiteBackground => (
                "",
                "background: white; padding: 40px".to_string(),
            ),
            RootMarker::Plain => ("", "padding: 40px".to_string()),
        };
        format!(
            "<div{} style=\"{}\">{}</div>",
            class_attr,
            style_attr,
            self.render_body(record)
        )
    }

    fn render_body(&self, r: &InvoiceRecord) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "<div style=\"margin-bottom: 2rem; border-bottom: 2px solid {}\">\
               <h1 style=\"color: {}\">INVOICE</h1>\
               <h2>{}</h2><p>{}</p><p>{}</p>\
             </div>",
            self.accent,
            self.accent,
            escape_text(&r.issuer.name),
            escape_text(&r.issuer.address),
            escape_text(&r.issuer.phone),
        ));

        out.push_str(&format!(
            "<div style=\"margin-bottom: 2rem\">\
               <p>Invoice #: {}</p><p>Date: {}</p><p>Payment due: {}</p>\
             </div>",
            escape_text(&r.invoice.number),
            r.invoice.date.format("%b %d, %Y"),
            r.invoice.payment_date.format("%b %d, %Y"),
        ));

        out.push_str(&format!(
            "<div style=\"margin-bottom: 2rem\">\
               <div><h3>Bill To</h3><p>{}</p><p>{}</p><p>{}</p></div>\
               <div><h3>Ship To</h3><p>{}</p><p>{}</p><p>{}</p></div>\
             </div>",
            escape_text(&r.bill_to.name),
            escape_text(&r.bill_to.address),
            escape_text(&r.bill_to.phone),
            escape_text(&r.ship_to.name),
            escape_text(&r.ship_to.address),
            escape_text(&r.ship_to.phone),
        ));

        out.push_str("<table style=\"border: 1px solid #ddd\"><tr>");
        for head in ["Item", "Description", "Qty", "Amount", "Total"] {
            out.push_str(&format!("<th>{}</th>", head));
        }
        out.push_str("</tr>");
        for item in &r.items {
            let name = match &item.model {
                Some(model) => format!("{} ({})", item.name, model),
                None => item.name.clone(),
            };
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_text(&name),
                escape_text(&item.description),
                item.quantity,
                money(item.amount, &r.currency),
                money(item.total, &r.currency),
            ));
        }
        out.push_str("</table>");

        out.push_str(&format!(
            "<div style=\"margin-top: 2rem\">\
               <p>Subtotal: {}</p><p>Tax ({}%): {}</p>\
               <p style=\"color: {}\"><b>Total: {}</b></p>\
             </div>",
            money(r.sub_total, &r.currency),
            r.tax_percentage,
            money(r.tax_amount, &r.currency),
            self.accent,
            money(r.grand_total, &r.currency),
        ));

        if !r.notes.is_empty() {
            out.push_str(&format!(
                "<div style=\"margin-top: 2rem\"><h3>Notes</h3><p>{}</p></div>",
                escape_text(&r.notes)
            ));
        }

        // Footer stays the last direct child; print styling pins it to the
        // page bottom with an auto top margin.
        out.push_str(&format!(
            "<div style=\"margin-bottom: 4rem\"><p>{} &middot; {}</p></div>",
            escape_text(&r.issuer.name),
            self.name,
        ));

        out
    }
}

fn money(amount: f64, currency: &str) -> String {
    format!("{} {:.2}", currency, amount)
}

/// The fixed, ordered template catalog.
pub struct TemplateCatalog {
    handles: [TemplateHandle; TEMPLATE_COUNT],
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            handles: [
                handle(1, "Classic", RootMarker::WidthAndClass, "#1f3a5f"),
                handle(2, "Modern", RootMarker::WidthAndClass, "#0d9488"),
                handle(3, "Professional", RootMarker::WidthAndClass, "#374151"),
                handle(4, "Minimal", RootMarker::WidthStyle, "#111111"),
                handle(5, "Elegant", RootMarker::WhiteBackground, "#7c3aed"),
                handle(6, "Compact", RootMarker::WidthAndClass, "#b45309"),
                handle(7, "Corporate", RootMarker::WidthAndClass, "#1d4ed8"),
                handle(8, "Friendly", RootMarker::ClassOnly, "#db2777"),
                handle(9, "Ledger", RootMarker::WidthStyle, "#065f46"),
                handle(10, "Creative", RootMarker::WhiteBackground, "#ea580c"),
                handle(11, "Bold", RootMarker::ClassOnly, "#991b1b"),
                handle(12, "Natural", RootMarker::Plain, "#3f6212"),
                handle(13, "Banner", RootMarker::WidthStyle, "#0e7490"),
            ],
        }
    }

    /// 1-based lookup, clamped: any id outside the catalog yields template 1.
    pub fn get(&self, id: i32) -> &TemplateHandle {
        if id >= 1 && id <= TEMPLATE_COUNT as i32 {
            &self.handles[(id - 1) as usize]
        } else {
            &self.handles[0]
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateHandle> {
        self.handles.iter()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn handle(id: i32, name: &'static str, marker: RootMarker, accent: &'static str) -> TemplateHandle {
    TemplateHandle {
        id,
        name,
        marker,
        accent,
    }
}

/// Render a minimal host page holding the preview for one template, the way
/// the pipeline and the tests consume it.
pub fn render_page(record: &InvoiceRecord, template_id: i32) -> String {
    let catalog = TemplateCatalog::new();
    let preview = catalog.get(template_id).render(record);
    format!(
        "<!DOCTYPE html><html><head><title>Invoice</title></head>\
         <body><div id=\"{}\">{}</div></body></html>",
        PAGE_CONTAINER_ID, preview
    )
}
