//! Block layout of a staged render tree.
//!
//! Deliberately simple: blocks stack vertically with fixed margins and
//! padding, text wraps on an estimated character width, and the last direct
//! child of the root (the template footer) is pinned to the bottom edge the
//! same way the print stylesheet pins it with an auto top margin.

use crate::dom::RenderNode;

/// Base glyph cell of the raster font, CSS pixels at scale 1.
pub const CHAR_WIDTH: u32 = 8;
pub const CHAR_HEIGHT: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    pub margin: u32,
    pub border: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub rect: Rect,
    pub box_model: BoxModel,
}

impl LayoutBox {
    pub fn content_width(&self) -> u32 {
        let total = self.box_model.margin + self.box_model.border + self.box_model.padding;
        self.rect.width.saturating_sub(total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Title,
    Heading,
    Paragraph,
    TableRow,
    Footer,
}

/// A positioned text block with its glyph scale.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub lb: LayoutBox,
    pub text: String,
    pub elem_type: ElementType,
    pub scale: u32,
}

/// Lay out the staged tree for a container of `width` x `height` CSS pixels.
pub fn layout_surface(root: &RenderNode, width: u32, height: u32, font_em: f64) -> Vec<LayoutNode> {
    let side_padding = 16u32;
    let mut y = 16u32;
    let mut nodes = Vec::new();

    let mut blocks = Vec::new();
    let direct_children: Vec<&RenderNode> = root.child_elements().collect();
    for (idx, child) in direct_children.iter().enumerate() {
        let is_footer = idx + 1 == direct_children.len() && direct_children.len() > 1;
        collect_blocks(child, is_footer, &mut blocks);
    }

    let footer_blocks: Vec<_> = blocks.iter().filter(|b| b.1 == ElementType::Footer).cloned().collect();

    for (text, elem_type) in blocks.iter().filter(|b| b.1 != ElementType::Footer) {
        let scale = scale_for(*elem_type);
        let node = place_block(text, *elem_type, scale, side_padding, y, width, font_em);
        y += node.lb.rect.height + node.lb.box_model.margin;
        if y >= height {
            // No pagination: content past the page bottom is clipped.
            nodes.push(node);
            break;
        }
        nodes.push(node);
    }

    // Footer pinned to the bottom edge, bottom-up.
    let mut bottom = height.saturating_sub(16);
    for (text, _) in footer_blocks.iter().rev() {
        let scale = scale_for(ElementType::Footer);
        let mut node = place_block(text, ElementType::Footer, scale, side_padding, 0, width, font_em);
        bottom = bottom.saturating_sub(node.lb.rect.height);
        node.lb.rect.y = bottom as i32;
        nodes.push(node);
    }

    nodes
}

fn scale_for(elem_type: ElementType) -> u32 {
    match elem_type {
        ElementType::Title => 2,
        _ => 1,
    }
}

/// Flatten one subtree into (text, type) blocks in document order.
fn collect_blocks(node: &RenderNode, in_footer: bool, out: &mut Vec<(String, ElementType)>) {
    let elem_type = match node.tag.as_str() {
        "h1" => Some(ElementType::Title),
        "h2" | "h3" => Some(ElementType::Heading),
        "p" => Some(ElementType::Paragraph),
        "tr" => Some(ElementType::TableRow),
        _ => None,
    };
    match elem_type {
        Some(t) => {
            let text = node.text();
            if !text.is_empty() {
                let t = if in_footer { ElementType::Footer } else { t };
                out.push((text, t));
            }
        }
        None => {
            for child in node.child_elements() {
                collect_blocks(child, in_footer, out);
            }
        }
    }
}

fn place_block(
    text: &str,
    elem_type: ElementType,
    scale: u32,
    side_padding: u32,
    y: u32,
    page_width: u32,
    font_em: f64,
) -> LayoutNode {
    let padding = 6u32;
    let char_w = ((CHAR_WIDTH * scale) as f64 * font_em).max(1.0) as u32;
    let line_h = ((CHAR_HEIGHT * scale) as f64 * font_em).max(1.0) as u32;

    let rect_width = page_width.saturating_sub(side_padding * 2);
    let content_w = rect_width.saturating_sub(padding * 2);
    let chars_per_line = if content_w >= char_w {
        (content_w / char_w) as usize
    } else {
        1
    };

    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if cur.len() + word.len() + 1 > chars_per_line && !cur.is_empty() {
            lines.push(cur);
            cur = word.to_string();
        } else {
            if !cur.is_empty() {
                cur.push(' ');
            }
            cur.push_str(word);
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    let wrapped = lines.join("\n");
    let line_count = (wrapped.lines().count() as u32).max(1);
    let box_h = line_count * line_h + padding * 2;

    let margin = match elem_type {
        ElementType::Title => 10,
        ElementType::Heading => 8,
        _ => 6,
    };

    LayoutNode {
        lb: LayoutBox {
            rect: Rect {
                x: side_padding as i32,
                y: y as i32,
                width: rect_width,
                height: box_h,
            },
            box_model: BoxModel {
                margin,
                border: 0,
                padding,
            },
        },
        text: wrapped,
        elem_type,
        scale,
    }
}
