//! Propagation
//!
//! Recomputes every appendage's world frame from its parent, top down.
//! A child sits at its parent node plus its offset rotated by the child's
//! own rotation, so turning a limb also swings where its offset points.
//! Legs have a maximum reach; when the offset exceeds it the corrected
//! offset is written back, so the clamp sticks between ticks.

use log::warn;
use super::id::PartId;
use super::limits;
use super::math::{Vec2, GEOMETRY_EPSILON};
use super::part::Part;
use super::tree::Creature;

/// Furthest a leg (or tracking hand) may sit from its parent node
pub fn reach_cap(part: &Part) -> f32 {
    part.frame.height * 0.5 + limits::LEG_REACH_MARGIN
}

/// Whether a part's lowest extent touches `ground_y`
pub fn touches_ground(part: &Part, ground_y: f32) -> bool {
    part.bounds().max.y >= ground_y - limits::GROUND_CONTACT_TOLERANCE
}

impl Creature {
    /// Full pass from the root. Pure function of stored state: running it
    /// twice without edits in between changes nothing.
    pub fn propagate(&mut self) {
        let ground_y = self.ground_y();
        for id in self.preorder() {
            let children = match self.part_mut(id) {
                Some(part) => {
                    let frame = part.frame;
                    part.nodes.refresh(&frame);
                    part.children.clone()
                }
                None => continue,
            };
            for child in children {
                self.place_child(id, child, ground_y);
            }
        }
    }

    fn place_child(&mut self, parent: PartId, child: PartId, ground_y: f32) {
        let Some(attachment) = self.part(child).and_then(|c| c.attachment) else {
            return;
        };
        let Some(node_pos) = self.part(parent).and_then(|p| p.node_position(attachment)) else {
            warn!("{} pinned to missing node {} of {}", child, attachment, parent);
            return;
        };
        let Some(limb) = self.part_mut(child) else {
            return;
        };

        let rotation = limb.frame.rotation;
        let mut reach = limb.offset.rotate(rotation);
        if limb.role.is_leg {
            let cap = reach_cap(limb);
            if reach.len() > cap + GEOMETRY_EPSILON {
                reach = reach.clamp_len(cap);
                limb.offset = reach.rotate(-rotation);
            }
        }
        limb.frame.center = node_pos + reach;

        limb.on_ground = limb.role.is_leg && touches_ground(limb, ground_y);
    }

    /// Recompute foot contact without moving anything
    pub fn refresh_ground_contact(&mut self) {
        let ground_y = self.ground_y();
        for id in self.preorder() {
            if let Some(part) = self.part_mut(id) {
                part.on_ground = part.role.is_leg && touches_ground(part, ground_y);
            }
        }
    }

    /// World position of the node `id` hangs from
    pub fn parent_node_position(&self, id: PartId) -> Option<Vec2> {
        let attachment = self.part(id)?.attachment?;
        let parent = self.parent_of(id)?;
        self.part(parent)?.node_position(attachment)
    }
}
