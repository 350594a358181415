//! Flat paint command list built from layout output.

use super::layout::LayoutNode;

pub const WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);
pub const BLACK: (u8, u8, u8, u8) = (0, 0, 0, 255);
const RULE_GRAY: (u8, u8, u8, u8) = (210, 210, 210, 255);

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: (u8, u8, u8, u8),
    },
}

/// Turn positioned blocks into draw commands. The rasterizer clears to white
/// itself, so only content is emitted here.
pub fn build_paint_list(nodes: &[LayoutNode]) -> Vec<PaintCommand> {
    let mut commands = Vec::new();
    for node in nodes {
        if node.elem_type == super::layout::ElementType::TableRow {
            // Thin rule under each table row keeps rows legible without a
            // real table layout.
            commands.push(PaintCommand::SolidRect {
                x: node.lb.rect.x,
                y: node.lb.rect.y + node.lb.rect.height as i32 - 1,
                width: node.lb.rect.width,
                height: 1,
                rgba: RULE_GRAY,
            });
        }
        commands.push(PaintCommand::Text {
            x: node.lb.rect.x + node.lb.box_model.padding as i32,
            y: node.lb.rect.y + node.lb.box_model.padding as i32,
            text: node.text.clone(),
            scale: node.scale,
            rgba: BLACK,
        });
    }
    commands
}
