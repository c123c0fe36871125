//! Input state management
//!
//! Polls keyboard and mouse through macroquad and folds them into a
//! per-frame `FrameInput`.

use macroquad::prelude::{
    is_key_down, is_key_pressed, is_key_released, is_mouse_button_down, is_mouse_button_pressed,
    is_mouse_button_released, mouse_position, KeyCode, MouseButton,
};
use crate::creature::Vec2;
use super::{Action, ActionSet};

#[derive(Debug, Clone, Copy)]
enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

fn bindings(action: Action) -> &'static [Binding] {
    match action {
        Action::MoveLeft => &[Binding::Key(KeyCode::A), Binding::Key(KeyCode::Left)],
        Action::MoveRight => &[Binding::Key(KeyCode::D), Binding::Key(KeyCode::Right)],
        Action::Jump => &[Binding::Key(KeyCode::Space), Binding::Key(KeyCode::W)],
        Action::ToggleEdit => &[Binding::Key(KeyCode::Tab)],
        Action::RemoveNode => &[Binding::Key(KeyCode::Key1)],
        Action::Primary => &[Binding::Mouse(MouseButton::Left)],
        Action::Secondary => &[Binding::Mouse(MouseButton::Right)],
    }
}

impl Binding {
    fn down(self) -> bool {
        match self {
            Binding::Key(key) => is_key_down(key),
            Binding::Mouse(button) => is_mouse_button_down(button),
        }
    }

    fn pressed(self) -> bool {
        match self {
            Binding::Key(key) => is_key_pressed(key),
            Binding::Mouse(button) => is_mouse_button_pressed(button),
        }
    }

    fn released(self) -> bool {
        match self {
            Binding::Key(key) => is_key_released(key),
            Binding::Mouse(button) => is_mouse_button_released(button),
        }
    }
}

/// One frame of input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer in world coordinates
    pub pointer: Vec2,
    pub pointer_moved: bool,
    pub down: ActionSet,
    pub pressed: ActionSet,
    pub released: ActionSet,
}

impl FrameInput {
    pub fn down(&self, action: Action) -> bool {
        self.down.contains(action)
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    pub fn released(&self, action: Action) -> bool {
        self.released.contains(action)
    }
}

/// Remembers the last pointer position to report motion
#[derive(Debug, Default)]
pub struct InputState {
    last_pointer: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before handling input
    pub fn poll(&mut self) -> FrameInput {
        let (x, y) = mouse_position();
        let pointer = Vec2::new(x, y);
        let pointer_moved = self.last_pointer != Some(pointer);
        self.last_pointer = Some(pointer);

        let mut frame = FrameInput {
            pointer,
            pointer_moved,
            ..FrameInput::default()
        };
        for action in Action::ALL {
            let keys = bindings(action);
            if keys.iter().any(|b| b.down()) {
                frame.down.insert(action);
            }
            if keys.iter().any(|b| b.pressed()) {
                frame.pressed.insert(action);
            }
            if keys.iter().any(|b| b.released()) {
                frame.released.insert(action);
            }
        }
        frame
    }
}
