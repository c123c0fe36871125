//! Editing toolbar
//!
//! Simple rectangle-based layout with fixed button positions. Buttons are
//! plain data; hit testing happens here and drawing in the renderer.

mod rect;
mod toolbar;

pub use rect::*;
pub use toolbar::*;
