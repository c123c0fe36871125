//! Creature Module
//!
//! Articulated 2D creatures built from simple shapes, edited live and
//! simulated with a minimal physics step.
//!
//! Key concepts:
//! - Part: a shape with a frame, a table of attachment nodes and children
//! - Creature: arena tree of parts rooted at the core body
//! - Propagation: parents place children at their nodes every frame
//! - Simulation: gravity, ground, walking, jumping and grabbing
//! - EditSession: mode, armed tool and drag state of the edit overlay
//!
//! Nothing here touches macroquad; drawing and input live in the renderer
//! and input modules.

pub mod math;
pub mod transform;
pub mod shape;
pub mod id;
pub mod slots;
pub mod part;
pub mod tree;
pub mod propagate;
pub mod query;
pub mod gait;
pub mod grab;
pub mod sim;
pub mod session;
pub mod event;
pub mod settings;
pub mod error;

/// Fixed capacities and geometry constants
pub mod limits {
    pub use super::math::GEOMETRY_EPSILON;

    /// Nodes per part
    pub const MAX_NODES: usize = 50;
    /// Direct children per part
    pub const MAX_APPENDAGES: usize = 20;
    /// A pointer within 10 px of a node picks it
    pub const NODE_PICK_RADIUS_SQ: f32 = 100.0;
    /// New appendages are square
    pub const APPENDAGE_SIZE: f32 = 50.0;
    /// Initial offset of a new appendage below its node
    pub const APPENDAGE_STANDOFF: f32 = 50.0;
    /// Legs may reach their half height plus this far from their node
    pub const LEG_REACH_MARGIN: f32 = 40.0;
    /// A leg this close above the ground counts as touching it
    pub const GROUND_CONTACT_TOLERANCE: f32 = 1.0;
}

// Re-export main types
pub use error::{EditError, SettingsError};
pub use event::{CreatureEvent, CreatureEvents};
pub use grab::{GrabId, Grabbable, Grabbables};
pub use id::PartId;
pub use math::Vec2;
pub use part::{Part, Rgba};
pub use session::{DragKind, EditMode, EditSession, PressOutcome, Tool};
pub use settings::Settings;
pub use shape::Shape;
pub use sim::{Intents, Simulation};
pub use tree::{Attached, Creature, Visit};
