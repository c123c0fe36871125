//! Creature events
//!
//! Structural edits and motion transitions are queued here as they happen.
//! The app drains the queue once per frame and logs what changed, so the
//! tree code never has to know who is listening.

use super::grab::GrabId;
use super::id::PartId;
use super::shape::Shape;

/// Events raised by one creature, oldest first, until the app drains them
#[derive(Debug, Default)]
pub struct CreatureEvents {
    events: Vec<CreatureEvent>,
}

impl CreatureEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, event: CreatureEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatureEvent> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = CreatureEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the tree layout changed since the last drain
    pub fn has_structural(&self) -> bool {
        self.events.iter().any(CreatureEvent::is_structural)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreatureEvent {
    NodeAdded { part: PartId, index: usize },
    NodeRemoved { part: PartId, index: usize },
    AppendageAdded { part: PartId, parent: PartId, node: usize },
    /// Fired once per destroyed part, children before parents
    AppendageDestroyed { part: PartId },
    ShapeSwitched { part: PartId, from: Shape, to: Shape },
    /// Root came to rest on the ground after falling
    Landed { fall_speed: f32 },
    Jumped { grounded_feet: usize },
    Grabbed { hand: PartId, object: GrabId },
    Released { hand: PartId, object: GrabId },
}

impl CreatureEvent {
    /// Structural changes alter the tree layout; the rest are motion
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CreatureEvent::NodeAdded { .. }
                | CreatureEvent::NodeRemoved { .. }
                | CreatureEvent::AppendageAdded { .. }
                | CreatureEvent::AppendageDestroyed { .. }
                | CreatureEvent::ShapeSwitched { .. }
        )
    }
}
