//! Edit session
//!
//! Which editing mode is active, which tool is armed and what is being
//! dragged. Lives beside the creature rather than inside it; every entry
//! point takes the creature it acts on.
//!
//! The input layer resolves device events into these calls and only routes
//! them while the edit overlay is open.

use std::f32::consts::FRAC_PI_2;
use log::{debug, info, warn};
use super::error::EditError;
use super::id::PartId;
use super::math::Vec2;
use super::shape::Shape;
use super::tree::{Attached, Creature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Shape buttons change the root body
    Torso,
    /// Shape buttons arm a plain appendage
    Appendage,
    /// Shape buttons arm a hand or foot; node tools and dragging are off
    HandsFeet,
}

impl EditMode {
    pub const ALL: [EditMode; 3] = [EditMode::Torso, EditMode::Appendage, EditMode::HandsFeet];

    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Torso => "Torso",
            EditMode::Appendage => "Appendage",
            EditMode::HandsFeet => "Hands/Feet",
        }
    }

    pub fn allows_node_tools(&self) -> bool {
        *self != EditMode::HandsFeet
    }
}

/// What the next primary press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Start dragging an appendage
    None,
    PlaceNode,
    RemoveNode,
    /// Attach an appendage of this shape
    Appendage(Shape),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Writes the appendage's offset
    Move,
    /// Writes the appendage's rotation
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub part: PartId,
    pub kind: DragKind,
}

/// Result of a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Nothing,
    NodePlaced { part: PartId, index: usize },
    NodeRemoved { part: PartId, index: usize },
    AppendageAdded(Attached),
    DragStarted(Drag),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    tool: Tool,
    drag: Option<Drag>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            mode: EditMode::Torso,
            tool: Tool::None,
            drag: None,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    /// Switching mode disarms any tool
    pub fn set_mode(&mut self, mode: EditMode) {
        debug!("edit mode tab: {}", mode.label());
        self.mode = mode;
        self.tool = Tool::None;
        self.drag = None;
    }

    /// Shape button. Changes the body in torso mode, arms an appendage
    /// otherwise.
    pub fn select_shape(&mut self, creature: &mut Creature, shape: Shape) -> Result<(), EditError> {
        match self.mode {
            EditMode::Torso => {
                self.tool = Tool::None;
                creature.switch_shape(creature.root(), shape)
            }
            EditMode::Appendage | EditMode::HandsFeet => {
                debug!("armed {} appendage ({})", shape.label(), self.mode.label());
                self.tool = Tool::Appendage(shape);
                Ok(())
            }
        }
    }

    /// Returns false when the mode has no node tools
    pub fn arm_place_node(&mut self) -> bool {
        if self.mode.allows_node_tools() {
            self.tool = Tool::PlaceNode;
            true
        } else {
            false
        }
    }

    pub fn arm_remove_node(&mut self) -> bool {
        if self.mode.allows_node_tools() {
            self.tool = Tool::RemoveNode;
            true
        } else {
            false
        }
    }

    /// Add a node to the first appendage containing `point`, else the root
    pub fn place_node(&self, creature: &mut Creature, point: Vec2) -> Result<(PartId, usize), EditError> {
        let target = creature.find_appendage_at(point).unwrap_or(creature.root());
        let index = creature.add_node(target, point)?;
        Ok((target, index))
    }

    /// Remove-node key. Ignored in hands/feet mode.
    pub fn remove_at(&mut self, creature: &mut Creature, point: Vec2) -> Result<PressOutcome, EditError> {
        if !self.mode.allows_node_tools() {
            return Ok(PressOutcome::Nothing);
        }
        self.stop_stale_drag(creature);
        let (part, index) = creature.remove_node(point)?;
        self.stop_stale_drag(creature);
        Ok(PressOutcome::NodeRemoved { part, index })
    }

    /// Left press in the world (not on the toolbar)
    pub fn primary_press(&mut self, creature: &mut Creature, point: Vec2) -> Result<PressOutcome, EditError> {
        match self.tool {
            Tool::PlaceNode if self.mode.allows_node_tools() => {
                self.tool = Tool::None;
                let (part, index) = self.place_node(creature, point)?;
                Ok(PressOutcome::NodePlaced { part, index })
            }
            Tool::RemoveNode if self.mode.allows_node_tools() => {
                self.tool = Tool::None;
                let (part, index) = creature.remove_node(point)?;
                self.stop_stale_drag(creature);
                Ok(PressOutcome::NodeRemoved { part, index })
            }
            Tool::Appendage(shape) => {
                let hand_or_foot = self.mode == EditMode::HandsFeet;
                // A miss returns early and leaves the tool armed
                let attached = creature.add_appendage(point, shape, hand_or_foot)?;
                self.tool = Tool::None;
                creature.propagate();
                Ok(PressOutcome::AppendageAdded(attached))
            }
            _ if self.mode.allows_node_tools() => Ok(self.begin_drag(creature, point, DragKind::Move)),
            _ => Ok(PressOutcome::Nothing),
        }
    }

    /// Right press: rotate an appendage, only with no tool armed
    pub fn secondary_press(&mut self, creature: &Creature, point: Vec2) -> PressOutcome {
        if self.tool != Tool::None || !self.mode.allows_node_tools() {
            return PressOutcome::Nothing;
        }
        self.begin_drag(creature, point, DragKind::Rotate)
    }

    fn begin_drag(&mut self, creature: &Creature, point: Vec2, kind: DragKind) -> PressOutcome {
        match creature.find_appendage_at(point) {
            Some(part) => {
                info!("started {:?} drag of {}", kind, part);
                let drag = Drag { part, kind };
                self.drag = Some(drag);
                PressOutcome::DragStarted(drag)
            }
            None => {
                debug!("no appendage at ({:.2}, {:.2})", point.x, point.y);
                PressOutcome::Nothing
            }
        }
    }

    /// Pointer motion. A move drag puts the appendage under the pointer;
    /// a rotate drag points it from its parent node towards the pointer.
    pub fn pointer_moved(&mut self, creature: &mut Creature, point: Vec2) {
        self.stop_stale_drag(creature);
        let Some(drag) = self.drag else {
            return;
        };
        let Some(node) = creature.parent_node_position(drag.part) else {
            warn!("no parent node for dragged {}", drag.part);
            return;
        };

        let result = match drag.kind {
            DragKind::Move => {
                let rotation = creature.part(drag.part).map_or(0.0, |p| p.frame.rotation);
                creature.set_offset(drag.part, (point - node).rotate(-rotation))
            }
            // Limbs hang along their local +y, a quarter turn from +x
            DragKind::Rotate => creature.set_rotation(drag.part, (point - node).angle() - FRAC_PI_2),
        };
        if let Err(e) = result {
            warn!("drag of {} failed: {}", drag.part, e);
            self.drag = None;
            return;
        }
        creature.propagate();
    }

    pub fn primary_release(&mut self) {
        if matches!(self.drag, Some(Drag { kind: DragKind::Move, .. })) {
            debug!("stopped dragging");
            self.drag = None;
        }
    }

    pub fn secondary_release(&mut self) {
        if matches!(self.drag, Some(Drag { kind: DragKind::Rotate, .. })) {
            debug!("stopped rotating");
            self.drag = None;
        }
    }

    /// End a drag whose target has been destroyed
    fn stop_stale_drag(&mut self, creature: &Creature) {
        if let Some(drag) = self.drag {
            if !creature.contains(drag.part) {
                info!("dragged {} no longer exists", drag.part);
                self.drag = None;
            }
        }
    }
}
