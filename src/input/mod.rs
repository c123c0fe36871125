//! Input handling
//!
//! Provides an action-based input layer over macroquad's keyboard and mouse
//! polling. Each frame is reduced to a `FrameInput` snapshot, so everything
//! downstream works on plain data.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
