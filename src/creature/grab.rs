//! Grabbable objects
//!
//! Free-standing balls outside the creature tree. A hand holds at most one;
//! the object keeps a back-reference to its holder so a destroyed hand can
//! be noticed and the object dropped.

use super::id::PartId;
use super::math::{Vec2, GEOMETRY_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabId(u32);

impl GrabId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for GrabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grabbable {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub held_by: Option<PartId>,
}

impl Grabbable {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            held_by: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Grabbables {
    items: Vec<Grabbable>,
}

impl Grabbables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: Grabbable) -> GrabId {
        self.items.push(object);
        GrabId((self.items.len() - 1) as u32)
    }

    pub fn get(&self, id: GrabId) -> Option<&Grabbable> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: GrabId) -> Option<&mut Grabbable> {
        self.items.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrabId, &Grabbable)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, obj)| (GrabId(i as u32), obj))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Nearest free object within its radius plus `tolerance` of `point`.
    /// Points on the ground line never grab, so a standing hand resting
    /// on the floor doesn't pick anything up.
    pub fn get_grabbable_at(&self, point: Vec2, tolerance: f32, ground_y: f32) -> Option<GrabId> {
        if (point.y - ground_y).abs() < GEOMETRY_EPSILON {
            return None;
        }
        self.iter()
            .filter(|(_, obj)| obj.held_by.is_none())
            .filter_map(|(id, obj)| {
                let reach = obj.radius + tolerance;
                let dist_sq = obj.position.distance_sq(point);
                (dist_sq <= reach * reach).then_some((id, dist_sq))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Gravity and ground collision for every object nobody is holding
    pub fn fall(&mut self, gravity: f32, ground_y: f32) {
        for obj in self.items.iter_mut().filter(|o| o.held_by.is_none()) {
            obj.velocity.y += gravity;
            obj.position = obj.position + obj.velocity;
            if obj.position.y + obj.radius >= ground_y {
                obj.position.y = ground_y - obj.radius;
                obj.velocity = Vec2::ZERO;
            }
        }
    }

    /// Drop objects whose holder no longer satisfies `alive`
    pub fn release_orphans<F: Fn(PartId) -> bool>(&mut self, alive: F) -> Vec<(PartId, GrabId)> {
        let mut dropped = Vec::new();
        for (i, obj) in self.items.iter_mut().enumerate() {
            if let Some(holder) = obj.held_by {
                if !alive(holder) {
                    obj.held_by = None;
                    dropped.push((holder, GrabId(i as u32)));
                }
            }
        }
        dropped
    }
}
