//! Creature tree
//!
//! The creature is an arena of `Part`s. The root lives inline, appendages
//! live in `Slots` keyed by generational `PartId`, and each part lists its
//! children in attachment order. There are no parent pointers: walking up
//! is a search from the root (`parent_of`).
//!
//! Every query and pass over the tree goes through `walk`, a pre-order
//! traversal driven by a visitor.

use log::{debug, info, warn};
use super::error::EditError;
use super::event::{CreatureEvent, CreatureEvents};
use super::id::{PartAllocator, PartId};
use super::limits;
use super::math::Vec2;
use super::part::{Node, NodeKind, NodeTable, Part, Role};
use super::shape::Shape;
use super::slots::Slots;

/// What a `walk` visitor wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Don't descend into this part's children
    SkipChildren,
    Stop,
}

/// Result of a successful `add_appendage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attached {
    pub part: PartId,
    pub parent: PartId,
    pub node: usize,
}

pub struct Creature {
    allocator: PartAllocator,
    root_id: PartId,
    root: Part,
    parts: Slots<Part>,
    /// World y of the ground line, used for foot contact
    ground_y: f32,
    events: CreatureEvents,
}

impl Creature {
    /// Root body with the shape's default nodes. The ground starts at
    /// infinity until the simulation sets it.
    pub fn new(shape: Shape, center: Vec2, width: f32, height: f32) -> Self {
        let mut allocator = PartAllocator::new();
        let root_id = allocator.allocate();
        Self {
            allocator,
            root_id,
            root: Part::core(shape, center, width, height),
            parts: Slots::new(),
            ground_y: f32::INFINITY,
            events: CreatureEvents::new(),
        }
    }

    /// Root body with an empty node table
    pub fn without_nodes(shape: Shape, center: Vec2, width: f32, height: f32) -> Self {
        let mut creature = Self::new(shape, center, width, height);
        creature.root.nodes = NodeTable::default();
        creature
    }

    pub fn root(&self) -> PartId {
        self.root_id
    }

    pub fn root_part(&self) -> &Part {
        &self.root
    }

    pub fn root_part_mut(&mut self) -> &mut Part {
        &mut self.root
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        if id == self.root_id {
            Some(&self.root)
        } else {
            self.parts.get(id)
        }
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        if id == self.root_id {
            Some(&mut self.root)
        } else {
            self.parts.get_mut(id)
        }
    }

    /// False for ids whose part has been destroyed
    pub fn contains(&self, id: PartId) -> bool {
        self.allocator.is_alive(id)
    }

    /// Number of parts, root included
    pub fn len(&self) -> usize {
        self.allocator.alive_count() as usize
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn set_ground_y(&mut self, ground_y: f32) {
        self.ground_y = ground_y;
    }

    pub fn events(&self) -> &CreatureEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut CreatureEvents {
        &mut self.events
    }

    /// Pre-order traversal from `start`. Siblings are visited in
    /// attachment order. The visitor also gets the depth below `start`.
    pub fn walk<F>(&self, start: PartId, mut visit: F)
    where
        F: FnMut(PartId, &Part, usize) -> Visit,
    {
        let mut stack = vec![(start, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(part) = self.part(id) else {
                continue;
            };
            match visit(id, part, depth) {
                Visit::Stop => return,
                Visit::SkipChildren => {}
                Visit::Continue => {
                    for &child in part.children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
    }

    /// First part in pre-order matching `pred`
    pub fn find<F>(&self, mut pred: F) -> Option<PartId>
    where
        F: FnMut(PartId, &Part) -> bool,
    {
        let mut found = None;
        self.walk(self.root_id, |id, part, _| {
            if pred(id, part) {
                found = Some(id);
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        found
    }

    /// Ids of `start` and every descendant, parents first
    pub fn subtree(&self, start: PartId) -> Vec<PartId> {
        let mut out = Vec::new();
        self.walk(start, |id, _, _| {
            out.push(id);
            Visit::Continue
        });
        out
    }

    /// All parts, parents first
    pub fn preorder(&self) -> Vec<PartId> {
        self.subtree(self.root_id)
    }

    /// Search-by-identity for the part listing `id` as a child
    pub fn parent_of(&self, id: PartId) -> Option<PartId> {
        if id == self.root_id {
            return None;
        }
        self.find(|_, part| part.children.contains(&id))
    }

    /// Add a custom node to `id` at the clamped image of `world`.
    pub fn add_node(&mut self, id: PartId, world: Vec2) -> Result<usize, EditError> {
        let part = self.part_mut(id).ok_or(EditError::UnknownPart(id))?;
        if part.nodes.is_full() {
            warn!("node limit reached ({}) for {}", limits::MAX_NODES, id);
            return Err(EditError::NodeCapacity { part: id, capacity: limits::MAX_NODES });
        }

        let rel = part.frame.to_relative(world);
        let rel = part.shape.clamp_relative(rel, part.frame.half_extents());
        let abs = part.frame.to_absolute(rel);
        let index = part
            .nodes
            .push(Node { rel, abs, kind: NodeKind::Custom })
            .ok_or(EditError::NodeCapacity { part: id, capacity: limits::MAX_NODES })?;

        debug!("added node {} to {} at ({:.2}, {:.2}) rel ({:.2}, {:.2})", index, id, abs.x, abs.y, rel.x, rel.y);
        self.events.send(CreatureEvent::NodeAdded { part: id, index });
        self.debug_validate();
        Ok(index)
    }

    /// Remove the node nearest `world` on the first part (pre-order) that
    /// has one within pick radius. Appendages pinned to it are destroyed
    /// along with their subtrees; later attachments shift down by one.
    pub fn remove_node(&mut self, world: Vec2) -> Result<(PartId, usize), EditError> {
        let mut hit = None;
        self.walk(self.root_id, |id, part, _| {
            match part.nodes.nearest_within(world, limits::NODE_PICK_RADIUS_SQ) {
                Some(index) => {
                    hit = Some((id, index));
                    Visit::Stop
                }
                None => Visit::Continue,
            }
        });
        let (owner, index) = hit.ok_or(EditError::NoNodeNearby)?;

        let children = match self.part_mut(owner) {
            Some(part) => {
                part.nodes.remove(index);
                part.children.clone()
            }
            None => return Err(EditError::UnknownPart(owner)),
        };

        let mut doomed = Vec::new();
        for child in children {
            let Some(part) = self.parts.get_mut(child) else {
                continue;
            };
            match part.attachment {
                Some(a) if a == index => {
                    part.attachment = None;
                    doomed.push(child);
                }
                Some(a) if a > index => part.attachment = Some(a - 1),
                _ => {}
            }
        }

        if let Some(part) = self.part_mut(owner) {
            part.children.retain(|c| !doomed.contains(c));
        }
        for child in &doomed {
            info!("node {} of {} carried {}, destroying it", index, owner, child);
            self.destroy_subtree(*child);
        }

        debug!("removed node {} from {}", index, owner);
        self.events.send(CreatureEvent::NodeRemoved { part: owner, index });
        self.debug_validate();
        Ok((owner, index))
    }

    /// Attach a new limb to the first node (pre-order, then table order)
    /// within pick radius of `world`. A full parent refuses outright; the
    /// search does not move on to other parts.
    pub fn add_appendage(
        &mut self,
        world: Vec2,
        shape: Shape,
        is_hand_or_foot: bool,
    ) -> Result<Attached, EditError> {
        let mut hit = None;
        self.walk(self.root_id, |id, part, _| {
            match part.nodes.first_within(world, limits::NODE_PICK_RADIUS_SQ) {
                Some(index) => {
                    hit = Some((id, index));
                    Visit::Stop
                }
                None => Visit::Continue,
            }
        });
        let (parent_id, node) = hit.ok_or(EditError::NoNodeNearby)?;

        let parent = self.part(parent_id).ok_or(EditError::UnknownPart(parent_id))?;
        if !parent.has_free_appendage_slot() {
            warn!("appendage limit reached ({}) for {}", limits::MAX_APPENDAGES, parent_id);
            return Err(EditError::AppendageCapacity {
                part: parent_id,
                capacity: limits::MAX_APPENDAGES,
            });
        }
        let node_pos = parent.node_position(node).ok_or(EditError::NoNodeNearby)?;
        let limb = Part::appendage(shape, node_pos, node, parent.frame.rotation, is_hand_or_foot);
        let is_leg = limb.role.is_leg;

        let id = self.allocator.allocate();
        self.parts.insert(id, limb);
        if let Some(parent) = self.part_mut(parent_id) {
            parent.children.push(id);
        }

        info!(
            "added {} {} to node {} of {} (leg: {})",
            if is_hand_or_foot { "hand/foot" } else { "appendage" },
            shape.label(),
            node,
            parent_id,
            is_leg
        );
        self.events.send(CreatureEvent::AppendageAdded { part: id, parent: parent_id, node });
        self.debug_validate();
        Ok(Attached { part: id, parent: parent_id, node })
    }

    /// Detach and destroy an appendage and everything hanging off it
    pub fn remove_appendage(&mut self, id: PartId) -> Result<(), EditError> {
        if id == self.root_id {
            return Err(EditError::RootNotRemovable);
        }
        if !self.contains(id) {
            return Err(EditError::UnknownPart(id));
        }
        if let Some(parent) = self.parent_of(id).and_then(|p| self.part_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        self.destroy_subtree(id);
        self.debug_validate();
        Ok(())
    }

    /// Change a part's shape. Defaults are rebuilt for the new shape,
    /// custom nodes are re-clamped into it and dependents are re-pinned
    /// so every attachment stays valid. Propagates afterwards.
    pub fn switch_shape(&mut self, id: PartId, shape: Shape) -> Result<(), EditError> {
        let part = self.part_mut(id).ok_or(EditError::UnknownPart(id))?;
        let from = part.shape;
        if from == shape {
            return Ok(());
        }

        let frame = part.frame;
        let half = frame.half_extents();
        let mut table = NodeTable::defaults(shape, &frame);
        let default_count = table.len();

        let nearest_default = |table: &NodeTable, rel: Vec2| -> usize {
            let mut best = (0, f32::INFINITY);
            for (i, node) in table.iter().take(default_count).enumerate() {
                let d = node.rel.distance_sq(rel);
                if d < best.1 {
                    best = (i, d);
                }
            }
            best.0
        };

        // Old index -> new index
        let mut remap = Vec::with_capacity(part.nodes.len());
        for node in part.nodes.iter() {
            let new_index = match node.kind {
                NodeKind::Default => nearest_default(&table, node.rel),
                NodeKind::Custom => {
                    let rel = shape.clamp_relative(node.rel, half);
                    let clamped = Node { rel, abs: frame.to_absolute(rel), kind: NodeKind::Custom };
                    match table.push(clamped) {
                        Some(i) => i,
                        None => {
                            warn!("{} dropped a custom node switching to {}", id, shape.label());
                            nearest_default(&table, rel)
                        }
                    }
                }
            };
            remap.push(new_index);
        }

        part.shape = shape;
        part.role = Role::for_shape(shape, part.role.is_hand_or_foot);
        part.nodes = table;
        let children = part.children.clone();

        for child in children {
            if let Some(limb) = self.parts.get_mut(child) {
                if let Some(a) = limb.attachment {
                    limb.attachment = Some(remap.get(a).copied().unwrap_or(0));
                }
            }
        }

        info!("{} switched shape {} -> {}", id, from.label(), shape.label());
        self.events.send(CreatureEvent::ShapeSwitched { part: id, from, to: shape });
        self.propagate();
        self.debug_validate();
        Ok(())
    }

    /// Write an appendage's offset (its displacement from the parent node,
    /// in its own frame)
    pub fn set_offset(&mut self, id: PartId, offset: Vec2) -> Result<(), EditError> {
        let part = self.part_mut(id).ok_or(EditError::UnknownPart(id))?;
        if part.is_core() {
            return Err(EditError::NotAnAppendage(id));
        }
        part.offset = offset;
        Ok(())
    }

    pub fn set_rotation(&mut self, id: PartId, rotation: f32) -> Result<(), EditError> {
        let part = self.part_mut(id).ok_or(EditError::UnknownPart(id))?;
        part.frame.rotation = rotation;
        Ok(())
    }

    /// Shift every part and cached node rigidly
    pub fn translate(&mut self, delta: Vec2) {
        self.root.translate(delta);
        for (_, part) in self.parts.iter_mut() {
            part.translate(delta);
        }
    }

    /// Free `id` and its descendants, children first. The caller unlinks
    /// `id` from its parent.
    fn destroy_subtree(&mut self, id: PartId) {
        let doomed = self.subtree(id);
        for part in doomed.into_iter().rev() {
            self.parts.remove(part);
            self.allocator.free(part);
            debug!("destroyed {}", part);
            self.events.send(CreatureEvent::AppendageDestroyed { part });
        }
    }

    /// Structural consistency check
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.root.attachment.is_some() {
            return Err("root has an attachment".to_string());
        }

        let mut problems = Vec::new();
        let mut reachable = 0usize;
        self.walk(self.root_id, |id, part, _| {
            reachable += 1;
            if part.nodes.len() > limits::MAX_NODES {
                problems.push(format!("{} has {} nodes", id, part.nodes.len()));
            }
            if part.children.len() > limits::MAX_APPENDAGES {
                problems.push(format!("{} has {} appendages", id, part.children.len()));
            }
            if part.role.is_leg && !part.role.is_hand_or_foot {
                problems.push(format!("{} is a leg but not a hand/foot", id));
            }
            for &child in &part.children {
                match self.part(child) {
                    None => problems.push(format!("{} lists dead child {}", id, child)),
                    Some(limb) => match limb.attachment {
                        Some(a) if a < part.nodes.len() => {}
                        Some(a) => problems.push(format!(
                            "{} pinned to node {} of {} which has {}",
                            child,
                            a,
                            id,
                            part.nodes.len()
                        )),
                        None => problems.push(format!("{} has no attachment", child)),
                    },
                }
            }
            Visit::Continue
        });

        if reachable != self.len() || reachable != self.parts.count() + 1 {
            problems.push(format!(
                "{} reachable parts, {} alive, {} stored",
                reachable,
                self.len(),
                self.parts.count() + 1
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    fn debug_validate(&self) {
        if cfg!(debug_assertions) {
            if let Err(problem) = self.check_invariants() {
                panic!("creature invariant violated: {}", problem);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_root() -> Creature {
        Creature::new(Shape::Rectangle, Vec2::new(350.0, 350.0), 50.0, 50.0)
    }

    const TOP: Vec2 = Vec2::new(350.0, 325.0);
    const BOTTOM: Vec2 = Vec2::new(350.0, 375.0);
    const LEFT: Vec2 = Vec2::new(325.0, 350.0);
    const RIGHT: Vec2 = Vec2::new(375.0, 350.0);

    #[test]
    fn test_add_leg_at_top_node() {
        let mut c = rect_root();
        let attached = c.add_appendage(TOP, Shape::Rectangle, true).unwrap();

        assert_eq!(attached.parent, c.root());
        assert_eq!(attached.node, 0);
        let limb = c.part(attached.part).unwrap();
        assert_eq!(limb.attachment, Some(0));
        assert!(limb.role.is_leg);
        assert!(!limb.is_core());
        assert!((limb.offset.len() - limits::APPENDAGE_STANDOFF).abs() < 1e-4);
        assert_eq!(c.root_part().children, vec![attached.part]);
    }

    #[test]
    fn test_non_rectangle_hand_is_not_leg() {
        let mut c = rect_root();
        let attached = c.add_appendage(RIGHT, Shape::Circle, true).unwrap();
        let limb = c.part(attached.part).unwrap();
        assert!(limb.role.is_hand_or_foot);
        assert!(!limb.role.is_leg);
    }

    #[test]
    fn test_add_appendage_requires_nearby_node() {
        let mut c = rect_root();
        assert_eq!(
            c.add_appendage(Vec2::new(350.0, 350.0), Shape::Circle, false),
            Err(EditError::NoNodeNearby)
        );
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_node_capacity() {
        let mut c = Creature::without_nodes(Shape::Rectangle, Vec2::new(350.0, 350.0), 50.0, 50.0);
        let root = c.root();
        let mut added = 0;
        for row in 0..5 {
            for col in 0..10 {
                let p = Vec2::new(330.0 + col as f32 * 4.0, 340.0 + row as f32 * 4.0);
                c.add_node(root, p).unwrap();
                added += 1;
            }
        }
        assert_eq!(added, limits::MAX_NODES);
        assert_eq!(c.root_part().nodes.len(), limits::MAX_NODES);

        let err = c.add_node(root, Vec2::new(350.0, 350.0)).unwrap_err();
        assert_eq!(err, EditError::NodeCapacity { part: root, capacity: limits::MAX_NODES });
        assert_eq!(c.root_part().nodes.len(), limits::MAX_NODES);
    }

    #[test]
    fn test_add_node_clamps_into_shape() {
        let mut c = rect_root();
        let index = c.add_node(c.root(), Vec2::new(500.0, 350.0)).unwrap();
        let node = c.root_part().nodes.get(index).unwrap();
        assert_eq!(node.kind, NodeKind::Custom);
        assert!((node.abs.x - 375.0).abs() < 1e-3);
        assert!((node.rel.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_appendage_capacity() {
        let mut c = rect_root();
        for _ in 0..limits::MAX_APPENDAGES {
            c.add_appendage(LEFT, Shape::Circle, false).unwrap();
        }
        let before = c.root_part().children.clone();
        let err = c.add_appendage(LEFT, Shape::Circle, false).unwrap_err();
        assert_eq!(
            err,
            EditError::AppendageCapacity { part: c.root(), capacity: limits::MAX_APPENDAGES }
        );
        assert_eq!(c.root_part().children, before);
    }

    #[test]
    fn test_remove_node_renumbers_later_attachments() {
        let mut c = rect_root();
        // Node 2 is the left node
        let limb = c.add_appendage(LEFT, Shape::Rectangle, false).unwrap().part;
        assert_eq!(c.part(limb).unwrap().attachment, Some(2));

        // Remove node 1 (bottom)
        assert_eq!(c.remove_node(BOTTOM).unwrap(), (c.root(), 1));
        assert_eq!(c.part(limb).unwrap().attachment, Some(1));
        assert!(c.contains(limb));
        assert_eq!(c.root_part().nodes.len(), 3);
        c.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_pinned_node_destroys_subtree() {
        let mut c = rect_root();
        let limb = c.add_appendage(LEFT, Shape::Rectangle, false).unwrap().part;
        // The limb's own bottom node sits 25 below its centre
        let limb_bottom = c.part(limb).unwrap().node_position(1).unwrap();
        let grandchild = c.add_appendage(limb_bottom, Shape::Circle, false).unwrap().part;
        assert_eq!(c.len(), 3);

        c.events_mut().drain().for_each(drop);
        c.remove_node(LEFT).unwrap();

        assert!(!c.contains(limb));
        assert!(!c.contains(grandchild));
        assert!(c.root_part().children.is_empty());
        assert_eq!(c.len(), 1);

        let destroyed: Vec<_> = c
            .events()
            .iter()
            .filter_map(|e| match e {
                CreatureEvent::AppendageDestroyed { part } => Some(*part),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed, vec![grandchild, limb]);
        c.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_node_prefers_outer_part() {
        let mut c = rect_root();
        let limb = c.add_appendage(RIGHT, Shape::Rectangle, false).unwrap().part;
        let limb_right = c.part(limb).unwrap().node_position(3).unwrap();

        // Only the limb has a node here
        assert_eq!(c.remove_node(limb_right).unwrap(), (limb, 3));
        assert_eq!(c.root_part().nodes.len(), 4);
        assert_eq!(c.part(limb).unwrap().nodes.len(), 3);

        assert_eq!(c.remove_node(Vec2::new(0.0, 0.0)), Err(EditError::NoNodeNearby));
    }

    #[test]
    fn test_node_indices_stay_valid() {
        let mut c = rect_root();
        let root = c.root();
        // Deterministic pseudo-random edit sequence
        let mut seed: u32 = 12345;
        let mut next = move || {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) as f32 / 65_536.0
        };

        for _ in 0..300 {
            let ids = c.preorder();
            let target = ids[(next() * ids.len() as f32) as usize % ids.len()];
            let part = c.part(target).unwrap();
            let frame = part.frame;
            let count = part.nodes.len();
            match (next() * 3.0) as u32 {
                0 => {
                    let rel = Vec2::new(next() * 2.0 - 1.0, next() * 2.0 - 1.0);
                    let _ = c.add_node(target, frame.to_absolute(rel));
                }
                1 if count > 0 => {
                    let pick = (next() * count as f32) as usize % count;
                    let p = c.part(target).unwrap().node_position(pick).unwrap();
                    let _ = c.remove_node(p);
                }
                _ if count > 0 => {
                    let pick = (next() * count as f32) as usize % count;
                    let p = c.part(target).unwrap().node_position(pick).unwrap();
                    let shape = Shape::ALL[(next() * 3.0) as usize % 3];
                    let _ = c.add_appendage(p, shape, next() > 0.5);
                }
                _ => {}
            }
            c.propagate();
            c.check_invariants().unwrap();
        }
        assert!(c.contains(root));
    }

    #[test]
    fn test_switch_shape_repins_dependents() {
        let mut c = rect_root();
        let root = c.root();
        let custom = c.add_node(root, Vec2::new(370.0, 370.0)).unwrap();
        assert_eq!(custom, 4);

        let on_left = c.add_appendage(LEFT, Shape::Circle, false).unwrap().part;
        let on_custom = c
            .add_appendage(c.root_part().node_position(custom).unwrap(), Shape::Circle, false)
            .unwrap()
            .part;

        c.switch_shape(root, Shape::Triangle).unwrap();

        let nodes = &c.root_part().nodes;
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.get(3).unwrap().kind, NodeKind::Custom);
        // Left (-1, 0) is closest to bottom-left (-1, 1)
        assert_eq!(c.part(on_left).unwrap().attachment, Some(1));
        assert_eq!(c.part(on_custom).unwrap().attachment, Some(3));
        // Custom node now lies inside the triangle
        let rel = nodes.get(3).unwrap().rel;
        let half = c.root_part().frame.half_extents();
        assert!(Shape::Triangle.contains_local(Vec2::new(rel.x * half.x, rel.y * half.y), half));
        c.check_invariants().unwrap();
    }

    #[test]
    fn test_switch_shape_overflow_falls_back_to_default() {
        // Large triangle so 47 custom nodes fit more than a pick radius apart
        let mut c = Creature::new(Shape::Triangle, Vec2::new(350.0, 350.0), 400.0, 400.0);
        let root = c.root();
        let mut points = Vec::new();
        for i in 0..24 {
            points.push(Vec2::new(350.0 - 138.0 + 12.0 * i as f32, 450.0));
        }
        for i in 0..23 {
            points.push(Vec2::new(350.0 - 132.0 + 12.0 * i as f32, 500.0));
        }
        for &p in &points {
            c.add_node(root, p).unwrap();
        }
        assert_eq!(c.root_part().nodes.len(), limits::MAX_NODES);

        let last = *points.last().unwrap();
        let attached = c.add_appendage(last, Shape::Circle, false).unwrap();
        assert_eq!(attached.node, limits::MAX_NODES - 1);

        // 4 rectangle defaults + 47 customs is one over capacity
        c.switch_shape(root, Shape::Rectangle).unwrap();
        assert_eq!(c.root_part().nodes.len(), limits::MAX_NODES);
        let pinned = c.part(attached.part).unwrap().attachment.unwrap();
        assert!(pinned < 4);
        // (0.66, 0.75) is nearest the bottom default
        assert_eq!(pinned, 1);
        c.check_invariants().unwrap();
    }

    #[test]
    fn test_parent_of_searches_full_depth() {
        let mut c = rect_root();
        let a = c.add_appendage(BOTTOM, Shape::Rectangle, false).unwrap().part;
        let a_bottom = c.part(a).unwrap().node_position(1).unwrap();
        let b = c.add_appendage(a_bottom, Shape::Rectangle, false).unwrap().part;
        let b_bottom = c.part(b).unwrap().node_position(1).unwrap();
        let d = c.add_appendage(b_bottom, Shape::Circle, false).unwrap().part;

        assert_eq!(c.parent_of(d), Some(b));
        assert_eq!(c.parent_of(b), Some(a));
        assert_eq!(c.parent_of(a), Some(c.root()));
        assert_eq!(c.parent_of(c.root()), None);
    }

    #[test]
    fn test_remove_appendage() {
        let mut c = rect_root();
        let a = c.add_appendage(TOP, Shape::Circle, false).unwrap().part;
        assert_eq!(c.remove_appendage(c.root()), Err(EditError::RootNotRemovable));
        c.remove_appendage(a).unwrap();
        assert!(!c.contains(a));
        assert_eq!(c.remove_appendage(a), Err(EditError::UnknownPart(a)));
    }

    #[test]
    fn test_set_offset_rejects_root() {
        let mut c = rect_root();
        let root = c.root();
        assert_eq!(c.set_offset(root, Vec2::ZERO), Err(EditError::NotAnAppendage(root)));
        c.set_rotation(root, 0.5).unwrap();
        assert_eq!(c.root_part().frame.rotation, 0.5);
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut c = rect_root();
        let a = c.add_appendage(TOP, Shape::Rectangle, false).unwrap().part;
        let b = c.add_appendage(BOTTOM, Shape::Rectangle, false).unwrap().part;
        let a_top = c.part(a).unwrap().node_position(0).unwrap();
        let a1 = c.add_appendage(a_top, Shape::Circle, false).unwrap().part;

        assert_eq!(c.preorder(), vec![c.root(), a, a1, b]);

        let mut depths = Vec::new();
        c.walk(c.root(), |_, _, depth| {
            depths.push(depth);
            Visit::Continue
        });
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }
}
