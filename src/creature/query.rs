//! Interaction queries over the tree

use super::id::PartId;
use super::math::Vec2;
use super::shape::Bounds;
use super::tree::{Creature, Visit};

/// At most this many legs drive ground contact and the gait
pub const MAX_FEET: usize = 2;

impl Creature {
    /// First appendage (pre-order) whose shape contains `point`.
    /// Overlapping limbs resolve to whichever comes first.
    pub fn find_appendage_at(&self, point: Vec2) -> Option<PartId> {
        self.find(|_, part| !part.is_core() && part.contains_point(point))
    }

    /// Legs anywhere in the tree, lowest first, capped at `MAX_FEET`
    pub fn feet(&self) -> Vec<PartId> {
        let mut legs: Vec<(PartId, f32)> = Vec::new();
        self.walk(self.root(), |id, part, _| {
            if part.role.is_leg {
                legs.push((id, part.bounds().max.y));
            }
            Visit::Continue
        });
        // Larger y is lower on screen; stable so ties keep tree order
        legs.sort_by(|a, b| b.1.total_cmp(&a.1));
        legs.truncate(MAX_FEET);
        legs.into_iter().map(|(id, _)| id).collect()
    }

    /// Legs in tree order. The gait pairs feet this way so a foot keeps
    /// its phase when the two swap heights mid-stride.
    pub fn legs(&self) -> Vec<PartId> {
        let mut legs = Vec::new();
        self.walk(self.root(), |id, part, _| {
            if part.role.is_leg {
                legs.push(id);
            }
            Visit::Continue
        });
        legs
    }

    /// Number of feet reporting ground contact
    pub fn grounded_feet(&self) -> usize {
        self.feet()
            .into_iter()
            .filter(|&id| self.part(id).map_or(false, |p| p.on_ground))
            .count()
    }

    /// Hand-or-foot parts that are not legs, in tree order
    pub fn hands(&self) -> Vec<PartId> {
        let mut hands = Vec::new();
        self.walk(self.root(), |id, part, _| {
            if part.role.is_hand() {
                hands.push(id);
            }
            Visit::Continue
        });
        hands
    }

    /// Rotation-aware bounds of the whole tree
    pub fn extents(&self) -> Bounds {
        let mut bounds = self.root_part().bounds();
        self.walk(self.root(), |_, part, _| {
            bounds = bounds.union(part.bounds());
            Visit::Continue
        });
        bounds
    }
}
