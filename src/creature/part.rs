//! Parts and their node tables
//!
//! A `Part` is one shape in the creature: the root body or an appendage.
//! Parts never own each other directly; the tree keeps them in an arena and
//! each part lists its children by `PartId`.

use super::grab::GrabId;
use super::id::PartId;
use super::limits;
use super::math::Vec2;
use super::shape::{Bounds, Shape};
use super::transform::Frame;

/// Solid RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const CORE: Rgba = Rgba::new(255, 0, 0, 255);
    pub const APPENDAGE: Rgba = Rgba::new(0, 255, 0, 255);
    pub const HAND_OR_FOOT: Rgba = Rgba::new(255, 255, 0, 255);
}

/// Whether a node came from the shape's default layout or was placed by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Default,
    Custom,
}

/// An attachment point. `rel` is authoritative, `abs` is a cache
/// refreshed from it whenever the owning frame moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub rel: Vec2,
    pub abs: Vec2,
    pub kind: NodeKind,
}

/// Bounded, ordered node list. Indices are attachment handles for children,
/// so removal shifts later nodes down by one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
}

impl NodeTable {
    /// Default layout for `shape` placed in `frame`
    pub fn defaults(shape: Shape, frame: &Frame) -> Self {
        let nodes = shape
            .default_nodes()
            .iter()
            .map(|&rel| Node {
                rel,
                abs: frame.to_absolute(rel),
                kind: NodeKind::Default,
            })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() >= limits::MAX_NODES
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Append a node. Returns its index, or None when full.
    pub fn push(&mut self, node: Node) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.nodes.push(node);
        Some(self.nodes.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index < self.nodes.len() {
            Some(self.nodes.remove(index))
        } else {
            None
        }
    }

    /// Recompute cached world positions
    pub fn refresh(&mut self, frame: &Frame) {
        for node in &mut self.nodes {
            node.abs = frame.to_absolute(node.rel);
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        for node in &mut self.nodes {
            node.abs = node.abs + delta;
        }
    }

    /// First node (in table order) within `radius_sq` of `point`
    pub fn first_within(&self, point: Vec2, radius_sq: f32) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.abs.distance_sq(point) <= radius_sq)
    }

    /// Closest node within `radius_sq` of `point`
    pub fn nearest_within(&self, point: Vec2, radius_sq: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            let dist = node.abs.distance_sq(point);
            // Ties keep the earlier node
            if dist <= radius_sq && best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// End-effector flags. `is_leg` implies `is_hand_or_foot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Role {
    pub is_hand_or_foot: bool,
    pub is_leg: bool,
}

impl Role {
    pub fn for_shape(shape: Shape, is_hand_or_foot: bool) -> Self {
        Self {
            is_hand_or_foot,
            is_leg: is_hand_or_foot && shape == Shape::Rectangle,
        }
    }

    /// Hand-or-foot that is not a leg
    pub fn is_hand(&self) -> bool {
        self.is_hand_or_foot && !self.is_leg
    }
}

#[derive(Debug, Clone)]
pub struct Part {
    pub shape: Shape,
    /// World placement. `frame.rotation` is the part's own stored rotation.
    pub frame: Frame,
    pub color: Rgba,
    pub nodes: NodeTable,
    /// Index into the parent's node table. None only on the root.
    pub attachment: Option<usize>,
    /// Displacement from the parent node, in this part's rotated frame
    pub offset: Vec2,
    pub role: Role,
    pub on_ground: bool,
    pub grabbing: bool,
    pub grabbed: Option<GrabId>,
    pub velocity: Vec2,
    pub children: Vec<PartId>,
}

impl Part {
    /// Root body
    pub fn core(shape: Shape, center: Vec2, width: f32, height: f32) -> Self {
        let frame = Frame::new(center, width, height);
        Self {
            shape,
            nodes: NodeTable::defaults(shape, &frame),
            frame,
            color: Rgba::CORE,
            attachment: None,
            offset: Vec2::ZERO,
            role: Role::default(),
            on_ground: false,
            grabbing: false,
            grabbed: None,
            velocity: Vec2::ZERO,
            children: Vec::new(),
        }
    }

    /// Limb pinned to `node_index` of a parent whose node sits at `node_pos`.
    /// Starts with the parent's rotation, standing off along its own +y.
    pub fn appendage(
        shape: Shape,
        node_pos: Vec2,
        node_index: usize,
        rotation: f32,
        is_hand_or_foot: bool,
    ) -> Self {
        let offset = Vec2::new(0.0, limits::APPENDAGE_STANDOFF);
        let mut frame = Frame::new(
            node_pos + offset.rotate(rotation),
            limits::APPENDAGE_SIZE,
            limits::APPENDAGE_SIZE,
        );
        frame.rotation = rotation;
        Self {
            shape,
            nodes: NodeTable::defaults(shape, &frame),
            frame,
            color: if is_hand_or_foot { Rgba::HAND_OR_FOOT } else { Rgba::APPENDAGE },
            attachment: Some(node_index),
            offset,
            role: Role::for_shape(shape, is_hand_or_foot),
            on_ground: false,
            grabbing: false,
            grabbed: None,
            velocity: Vec2::ZERO,
            children: Vec::new(),
        }
    }

    pub fn is_core(&self) -> bool {
        self.attachment.is_none()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains(&self.frame, point)
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds(&self.frame)
    }

    pub fn node_position(&self, index: usize) -> Option<Vec2> {
        self.nodes.get(index).map(|n| n.abs)
    }

    pub fn has_free_appendage_slot(&self) -> bool {
        self.children.len() < limits::MAX_APPENDAGES
    }

    /// Move the part and its cached nodes rigidly
    pub fn translate(&mut self, delta: Vec2) {
        self.frame.center = self.frame.center + delta;
        self.nodes.translate(delta);
    }
}
