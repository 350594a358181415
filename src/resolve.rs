//! Render-root resolution.
//!
//! Template markup is heterogeneous across the catalog, so no single selector
//! is guaranteed to hit. Resolution runs a prioritized list of strategies and
//! falls back to the container itself, which guarantees a non-null result
//! whenever the container exists. Each strategy is independently testable and
//! the list stays open for extension when new templates join the catalog.

use scraper::{ElementRef, Html};

use crate::error::{Error, Result};

/// Prefix used by the catalog for per-template preview containers.
pub const PREVIEW_ID_PREFIX: &str = "template-preview-";

/// Canonical on-screen page width of a template root, in pixels.
pub const PAGE_WIDTH_MARKER_PX: u32 = 816;

/// One way of locating the rendered template node inside a container.
pub trait ResolveStrategy {
    fn name(&self) -> &'static str;
    fn locate<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>>;
}

/// Matches an element declaring the fixed page width, either through an
/// inline style or the dedicated `invoice-template` class.
pub struct PageWidthMarker;

impl ResolveStrategy for PageWidthMarker {
    fn name(&self) -> &'static str {
        "page-width-marker"
    }

    fn locate<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        descendant_elements(container).find(|el| {
            let style = el.value().attr("style").unwrap_or("");
            style.contains("width: 816px")
                || style.contains("width:816px")
                || el.value().classes().any(|c| c == "invoice-template")
        })
    }
}

/// Matches a `div` painted white, the usual background of a template page.
pub struct WhiteBackground;

impl ResolveStrategy for WhiteBackground {
    fn name(&self) -> &'static str {
        "white-background"
    }

    fn locate<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        descendant_elements(container).find(|el| {
            if el.value().name() != "div" {
                return false;
            }
            let style = el.value().attr("style").unwrap_or("");
            style.contains("background: white") || style.contains("background:white")
        })
    }
}

/// Falls back to the container's first element child.
pub struct FirstElementChild;

impl ResolveStrategy for FirstElementChild {
    fn name(&self) -> &'static str {
        "first-element-child"
    }

    fn locate<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        container.children().find_map(ElementRef::wrap)
    }
}

/// The strategy chain in priority order.
pub fn strategies() -> [&'static dyn ResolveStrategy; 3] {
    [&PageWidthMarker, &WhiteBackground, &FirstElementChild]
}

/// Locate the template node to operate on. Never fails: if no strategy
/// matches, the container itself is the render root.
pub fn resolve_render_root(container: ElementRef<'_>) -> ElementRef<'_> {
    for strategy in strategies() {
        if let Some(found) = strategy.locate(container) {
            log::debug!("render root resolved via {}", strategy.name());
            return found;
        }
    }
    log::debug!("render root resolution fell back to the container");
    container
}

/// Find an element by id anywhere in the document.
pub fn element_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr("id") == Some(id))
}

/// Resolve the export container by id, or fail with `ElementNotFound`.
pub fn find_container<'a>(doc: &'a Html, container_id: &str) -> Result<ElementRef<'a>> {
    element_by_id(doc, container_id)
        .ok_or_else(|| Error::ElementNotFound(format!("container '{}'", container_id)))
}

/// Resolve the template node for the print flow.
///
/// An id already naming a preview container is used directly; any other id is
/// treated as an outer container that must hold the preview for the requested
/// template.
pub fn find_template_node<'a>(
    doc: &'a Html,
    container_id: &str,
    template_id: i32,
) -> Result<ElementRef<'a>> {
    if container_id.starts_with(PREVIEW_ID_PREFIX) {
        return find_container(doc, container_id);
    }
    let container = find_container(doc, container_id)?;
    let preview_id = format!("{}{}", PREVIEW_ID_PREFIX, template_id);
    container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr("id") == Some(preview_id.as_str()))
        .ok_or_else(|| Error::ElementNotFound(format!("preview '{}'", preview_id)))
}

fn descendant_elements(container: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    container.descendants().skip(1).filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn width_marker_wins_over_background() {
        let d = doc(
            r#"<div id="c">
                 <div style="background: white">plain</div>
                 <div style="width: 816px; background: white">page</div>
               </div>"#,
        );
        let container = element_by_id(&d, "c").unwrap();
        let root = resolve_render_root(container);
        assert!(root.value().attr("style").unwrap().contains("816px"));
    }

    #[test]
    fn class_marker_matches_without_inline_width() {
        let d = doc(r#"<div id="c"><section class="invoice-template">x</section></div>"#);
        let container = element_by_id(&d, "c").unwrap();
        let root = resolve_render_root(container);
        assert_eq!(root.value().name(), "section");
    }

    #[test]
    fn white_background_requires_div() {
        let d = doc(
            r#"<div id="c">
                 <span style="background: white">not a page</span>
                 <div style="background:white">page</div>
               </div>"#,
        );
        let container = element_by_id(&d, "c").unwrap();
        let found = WhiteBackground.locate(container).unwrap();
        assert_eq!(found.value().name(), "div");
    }

    #[test]
    fn falls_back_to_first_child_then_container() {
        let d = doc(r#"<div id="c"><p>first</p><p>second</p></div>"#);
        let container = element_by_id(&d, "c").unwrap();
        assert_eq!(resolve_render_root(container).value().name(), "p");

        let d = doc(r#"<div id="empty">just text</div>"#);
        let container = element_by_id(&d, "empty").unwrap();
        assert_eq!(
            resolve_render_root(container).value().attr("id"),
            Some("empty")
        );
    }

    #[test]
    fn missing_container_is_element_not_found() {
        let d = doc("<div id=\"other\"></div>");
        let err = find_container(&d, "nope").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(_)));
    }

    #[test]
    fn preview_id_is_used_directly() {
        let d = doc(r#"<div id="template-preview-3"><div>t</div></div>"#);
        let el = find_template_node(&d, "template-preview-3", 3).unwrap();
        assert_eq!(el.value().attr("id"), Some("template-preview-3"));
    }

    #[test]
    fn outer_container_requires_matching_preview() {
        let d = doc(r#"<div id="page"><div id="template-preview-2">t</div></div>"#);
        assert!(find_template_node(&d, "page", 2).is_ok());
        assert!(matches!(
            find_template_node(&d, "page", 5).unwrap_err(),
            Error::ElementNotFound(_)
        ));
    }
}
