//! Owned render tree.
//!
//! The export pipeline never mutates the host page. Instead the resolved
//! render surface is deep-cloned out of the parsed document into a
//! `RenderNode` tree that the pipeline owns outright, so staging, style
//! normalization and rasterization cannot disturb live UI state. This is the
//! crate's equivalent of `cloneNode(true)` into an offscreen container.

use scraper::ElementRef;

/// Inline-style properties that count as interactive chrome. Print and PDF
/// output must not show any of them.
const CHROME_PROPS: [&str; 7] = [
    "border",
    "border-left",
    "border-right",
    "border-top",
    "border-bottom",
    "box-shadow",
    "outline",
];

/// A child of a render node: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderChild {
    Element(RenderNode),
    Text(String),
}

/// One element of the cloned render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline style declarations in source order.
    pub styles: Vec<(String, String)>,
    pub children: Vec<RenderChild>,
}

impl RenderNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Deep-clone a parsed element into an owned tree.
    pub fn from_element(el: ElementRef<'_>) -> Self {
        let mut node = Self::new(el.value().name());
        node.id = el.value().attr("id").map(|s| s.to_string());
        node.classes = el.value().classes().map(|c| c.to_string()).collect();
        if let Some(style) = el.value().attr("style") {
            node.styles = parse_inline_style(style);
        }
        for child in el.children() {
            if let Some(child_el) = ElementRef::wrap(child) {
                node.children
                    .push(RenderChild::Element(Self::from_element(child_el)));
            } else if let Some(text) = child.value().as_text() {
                let text: &str = text;
                if !text.trim().is_empty() {
                    node.children.push(RenderChild::Text(text.to_string()));
                }
            }
        }
        node
    }

    /// Look up an inline style declaration.
    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style declaration, replacing any existing value.
    pub fn set_style(&mut self, prop: &str, value: &str) {
        if let Some(entry) = self.styles.iter_mut().find(|(p, _)| p == prop) {
            entry.1 = value.to_string();
        } else {
            self.styles.push((prop.to_string(), value.to_string()));
        }
    }

    /// Set several declarations at once.
    pub fn set_styles(&mut self, decls: &[(&str, &str)]) {
        for (prop, value) in decls {
            self.set_style(prop, value);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Force border, box-shadow and outline to `none` on this element and
    /// every descendant. On-screen chrome must not survive into output.
    pub fn strip_chrome(&mut self) {
        for prop in CHROME_PROPS {
            self.set_style(prop, "none");
        }
        for child in &mut self.children {
            if let RenderChild::Element(el) = child {
                el.strip_chrome();
            }
        }
    }

    /// Collected text content, text runs separated by single spaces.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        for child in &self.children {
            match child {
                RenderChild::Text(t) => {
                    let trimmed = t.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !trimmed.is_empty() {
                        out.push(trimmed);
                    }
                }
                RenderChild::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Visit this node and every descendant element, depth first.
    pub fn for_each(&self, f: &mut impl FnMut(&RenderNode)) {
        f(self);
        for child in &self.children {
            if let RenderChild::Element(el) = child {
                el.for_each(f);
            }
        }
    }

    /// Child elements in order, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &RenderNode> {
        self.children.iter().filter_map(|c| match c {
            RenderChild::Element(el) => Some(el),
            RenderChild::Text(_) => None,
        })
    }

    /// Serialize back to HTML, e.g. for injection into a print document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&self.classes.join(" "))));
        }
        if !self.styles.is_empty() {
            out.push_str(&format!(
                " style=\"{}\"",
                escape_attr(&serialize_inline_style(&self.styles))
            ));
        }
        out.push('>');
        for child in &self.children {
            match child {
                RenderChild::Element(el) => el.write_html(out),
                RenderChild::Text(t) => out.push_str(&escape_text(t)),
            }
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

/// Parse an inline `style` attribute into ordered declarations.
pub fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if prop.is_empty() || value.is_empty() {
                None
            } else {
                Some((prop, value))
            }
        })
        .collect()
}

/// Serialize declarations back into a `style` attribute value.
pub fn serialize_inline_style(styles: &[(String, String)]) -> String {
    styles
        .iter()
        .map(|(p, v)| format!("{}: {}", p, v))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn parse_root(html: &str) -> RenderNode {
        let doc = Html::parse_fragment(html);
        let all = Selector::parse("*").unwrap();
        let el = doc
            .select(&all)
            .find(|e| e.value().name() != "html")
            .expect("fragment root");
        RenderNode::from_element(el)
    }

    #[test]
    fn clone_preserves_structure_and_styles() {
        let node = parse_root(
            r#"<div id="a" class="x y" style="width: 816px; background: white">
                 <span style="border: 1px solid red">hi</span>
               </div>"#,
        );
        assert_eq!(node.tag, "div");
        assert_eq!(node.id.as_deref(), Some("a"));
        assert!(node.has_class("y"));
        assert_eq!(node.style("width"), Some("816px"));
        assert_eq!(node.child_elements().count(), 1);
        assert_eq!(node.text(), "hi");
    }

    #[test]
    fn strip_chrome_is_exhaustive() {
        let mut node = parse_root(
            r#"<div style="border: 1px solid black">
                 <p style="box-shadow: 0 0 4px gray"><b style="outline: 2px dotted blue">x</b></p>
                 <p style="border-left: 3px solid red">y</p>
               </div>"#,
        );
        node.strip_chrome();
        let mut violations = 0usize;
        node.for_each(&mut |el| {
            for prop in ["border", "box-shadow", "outline", "border-left"] {
                if el.style(prop).map(|v| v != "none").unwrap_or(false) {
                    violations += 1;
                }
            }
        });
        assert_eq!(violations, 0);
    }

    #[test]
    fn set_style_replaces_existing() {
        let mut node = RenderNode::new("div");
        node.set_style("width", "100px");
        node.set_style("width", "200px");
        assert_eq!(node.style("width"), Some("200px"));
        assert_eq!(node.styles.len(), 1);
    }

    #[test]
    fn html_round_trip_keeps_markers() {
        let mut node = RenderNode::new("div");
        node.add_class("invoice-template");
        node.set_style("width", "816px");
        node.children.push(RenderChild::Text("a < b".to_string()));
        let html = node.to_html();
        assert!(html.contains("class=\"invoice-template\""));
        assert!(html.contains("width: 816px"));
        assert!(html.contains("a &lt; b"));
    }
}
