//! Edit toolbar: shape buttons down the left edge, node buttons below them
//! and mode tabs down the right edge.

use crate::creature::{EditMode, EditSession, Rgba, Shape, Tool};
use super::Rect;

pub const BUTTON_SIZE: f32 = 40.0;

/// What a toolbar click selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarHit {
    Shape(Shape),
    PlaceNode,
    RemoveNode,
    Mode(EditMode),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub color: Rgba,
    pub hit: ToolbarHit,
}

impl Button {
    const fn new(x: f32, y: f32, color: Rgba, hit: ToolbarHit) -> Self {
        Self {
            rect: Rect::new(x, y, BUTTON_SIZE, BUTTON_SIZE),
            color,
            hit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    pub shapes: [Button; 3],
    pub add_node: Button,
    pub remove_node: Button,
    pub modes: [Button; 3],
}

impl Toolbar {
    /// Mode tabs hug the right edge of a world `width` wide
    pub fn new(width: f32) -> Self {
        let tab_x = width - 50.0;
        Self {
            shapes: [
                Button::new(10.0, 50.0, Rgba::new(255, 0, 0, 255), ToolbarHit::Shape(Shape::Rectangle)),
                Button::new(10.0, 100.0, Rgba::new(0, 255, 0, 255), ToolbarHit::Shape(Shape::Circle)),
                Button::new(10.0, 150.0, Rgba::new(0, 0, 255, 255), ToolbarHit::Shape(Shape::Triangle)),
            ],
            add_node: Button::new(10.0, 200.0, Rgba::new(255, 255, 0, 255), ToolbarHit::PlaceNode),
            remove_node: Button::new(10.0, 250.0, Rgba::new(255, 0, 255, 255), ToolbarHit::RemoveNode),
            modes: [
                Button::new(tab_x, 10.0, Rgba::new(200, 200, 200, 255), ToolbarHit::Mode(EditMode::Torso)),
                Button::new(tab_x, 60.0, Rgba::new(150, 150, 150, 255), ToolbarHit::Mode(EditMode::Appendage)),
                Button::new(tab_x, 110.0, Rgba::new(100, 100, 100, 255), ToolbarHit::Mode(EditMode::HandsFeet)),
            ],
        }
    }

    /// Buttons shown in `mode`, in draw order. Node buttons are hidden in
    /// hands/feet mode.
    pub fn visible(&self, mode: EditMode) -> Vec<&Button> {
        let mut buttons: Vec<&Button> = self.shapes.iter().collect();
        if mode.allows_node_tools() {
            buttons.push(&self.add_node);
            buttons.push(&self.remove_node);
        }
        buttons.extend(self.modes.iter());
        buttons
    }

    pub fn hit(&self, x: f32, y: f32, mode: EditMode) -> Option<ToolbarHit> {
        self.visible(mode)
            .into_iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.hit)
    }

    /// Buttons to outline: the body shape in torso mode, the armed shape
    /// otherwise, the armed node tool and the current mode tab
    pub fn highlighted(&self, session: &EditSession, root_shape: Shape) -> Vec<Rect> {
        let mode = session.mode();
        self.visible(mode)
            .into_iter()
            .filter(|b| match b.hit {
                ToolbarHit::Shape(shape) => match (mode, session.tool()) {
                    (EditMode::Torso, _) => shape == root_shape,
                    (_, Tool::Appendage(armed)) => shape == armed,
                    _ => false,
                },
                ToolbarHit::PlaceNode => session.tool() == Tool::PlaceNode,
                ToolbarHit::RemoveNode => session.tool() == Tool::RemoveNode,
                ToolbarHit::Mode(tab) => tab == mode,
            })
            .map(|b| b.rect)
            .collect()
    }
}
