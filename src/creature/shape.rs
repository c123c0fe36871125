//! Shape primitives
//!
//! The closed set of shapes a part can take. All shape math runs in the
//! part's local (unrotated, centred) frame; `Frame` handles the world side.
//!
//! Triangle layout: apex at the top centre, base along the bottom edge,
//! so the local vertices are (0, -hh), (-hw, hh), (hw, hh).

use super::math::{Vec2, barycentric, closest_point_on_segment, GEOMETRY_EPSILON};
use super::transform::Frame;

/// Slack for triangle hit-testing, in barycentric units
const TRIANGLE_HIT_TOLERANCE: f32 = 0.01;

/// Slack for "already inside" during clamping, so a clamped point stays put
const TRIANGLE_CLAMP_TOLERANCE: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Rectangle,
    Circle,
    Triangle,
}

/// Axis-aligned world bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Rectangle, Shape::Circle, Shape::Triangle];

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Rectangle => "Rectangle",
            Shape::Circle => "Circle",
            Shape::Triangle => "Triangle",
        }
    }

    /// Default attachment points in relative coordinates
    pub fn default_nodes(&self) -> &'static [Vec2] {
        const CARDINAL: [Vec2; 4] = [
            Vec2::new(0.0, -1.0), // top
            Vec2::new(0.0, 1.0),  // bottom
            Vec2::new(-1.0, 0.0), // left
            Vec2::new(1.0, 0.0),  // right
        ];
        const TRIANGLE: [Vec2; 3] = [
            Vec2::new(0.0, -1.0), // apex
            Vec2::new(-1.0, 1.0), // bottom left
            Vec2::new(1.0, 1.0),  // bottom right
        ];
        match self {
            Shape::Rectangle | Shape::Circle => &CARDINAL,
            Shape::Triangle => &TRIANGLE,
        }
    }

    /// Hit test a world point
    pub fn contains(&self, frame: &Frame, world: Vec2) -> bool {
        match self {
            Shape::Circle => {
                // Rotation-invariant, skip the inverse rotation
                let r = frame.width * 0.5;
                frame.center.distance_sq(world) <= r * r
            }
            _ => self.contains_local(frame.world_to_local(world), frame.half_extents()),
        }
    }

    /// Hit test a point in the local frame
    pub fn contains_local(&self, local: Vec2, half: Vec2) -> bool {
        match self {
            Shape::Rectangle => local.x.abs() <= half.x && local.y.abs() <= half.y,
            Shape::Circle => local.len_sq() <= half.x * half.x,
            Shape::Triangle => {
                let [a, b, c] = triangle_vertices(half);
                match barycentric(local, a, b, c) {
                    Some((u, v, w)) => {
                        u >= -TRIANGLE_HIT_TOLERANCE
                            && v >= -TRIANGLE_HIT_TOLERANCE
                            && w >= -TRIANGLE_HIT_TOLERANCE
                            && u + v + w <= 1.0 + TRIANGLE_HIT_TOLERANCE
                    }
                    None => false,
                }
            }
        }
    }

    /// Project a local point onto the shape if it lies outside
    pub fn clamp_local(&self, local: Vec2, half: Vec2) -> Vec2 {
        match self {
            Shape::Rectangle => Vec2::new(
                local.x.clamp(-half.x, half.x),
                local.y.clamp(-half.y, half.y),
            ),
            Shape::Circle => {
                let r = half.x;
                let dist = local.len();
                if dist > r && dist > GEOMETRY_EPSILON {
                    local.scale(r / dist)
                } else {
                    local
                }
            }
            Shape::Triangle => {
                let [a, b, c] = triangle_vertices(half);
                let weights = match barycentric(local, a, b, c) {
                    Some(weights) => weights,
                    // Zero-area triangle: nowhere to project to but the apex
                    None => return a,
                };
                let (u, v, w) = weights;
                if u >= -TRIANGLE_CLAMP_TOLERANCE
                    && v >= -TRIANGLE_CLAMP_TOLERANCE
                    && w >= -TRIANGLE_CLAMP_TOLERANCE
                {
                    return local;
                }
                nearest_on_edges(local, &[a, b, c])
            }
        }
    }

    /// Project a world point onto the shape if it lies outside
    pub fn clamp_point(&self, frame: &Frame, world: Vec2) -> Vec2 {
        let local = self.clamp_local(frame.world_to_local(world), frame.half_extents());
        frame.local_to_world(local)
    }

    /// Project a relative coordinate onto the shape if it lies outside
    pub fn clamp_relative(&self, rel: Vec2, half: Vec2) -> Vec2 {
        let local = self.clamp_local(Vec2::new(rel.x * half.x, rel.y * half.y), half);
        Vec2::new(local.x / half.x, local.y / half.y)
    }

    /// Rotation-aware world bounds
    pub fn bounds(&self, frame: &Frame) -> Bounds {
        let half = frame.half_extents();
        match self {
            Shape::Circle => {
                let r = Vec2::new(half.x, half.x);
                Bounds {
                    min: frame.center - r,
                    max: frame.center + r,
                }
            }
            Shape::Rectangle => {
                let corners = [
                    Vec2::new(-half.x, -half.y),
                    Vec2::new(half.x, -half.y),
                    Vec2::new(half.x, half.y),
                    Vec2::new(-half.x, half.y),
                ];
                bounds_of(frame, &corners)
            }
            Shape::Triangle => bounds_of(frame, &triangle_vertices(half)),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Rectangle
    }
}

/// Local triangle vertices: apex, bottom left, bottom right
pub fn triangle_vertices(half: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(0.0, -half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, half.y),
    ]
}

fn nearest_on_edges(p: Vec2, verts: &[Vec2; 3]) -> Vec2 {
    let mut best = verts[0];
    let mut best_dist = f32::INFINITY;
    for i in 0..3 {
        let candidate = closest_point_on_segment(p, verts[i], verts[(i + 1) % 3]);
        let dist = candidate.distance_sq(p);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

fn bounds_of(frame: &Frame, local_points: &[Vec2]) -> Bounds {
    let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &p in local_points {
        let w = frame.local_to_world(p);
        min = Vec2::new(min.x.min(w.x), min.y.min(w.y));
        max = Vec2::new(max.x.max(w.x), max.y.max(w.y));
    }
    Bounds { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rotation: f32) -> Frame {
        Frame {
            center: Vec2::new(200.0, 100.0),
            rotation,
            width: 50.0,
            height: 40.0,
        }
    }

    #[test]
    fn test_center_inside_far_outside() {
        for shape in Shape::ALL {
            for &rot in &[0.0, 0.7, 2.9] {
                let f = frame(rot);
                assert!(shape.contains(&f, f.center), "{:?} centre", shape);
                let far = 2.0 * f.half_extents().x.max(f.half_extents().y) + 1.0;
                for dir in [Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0)] {
                    assert!(!shape.contains(&f, f.center + dir * far), "{:?} far {:?}", shape, dir);
                }
            }
        }
    }

    #[test]
    fn test_rectangle_edges_inclusive() {
        let f = frame(0.0);
        assert!(Shape::Rectangle.contains(&f, Vec2::new(225.0, 120.0)));
        assert!(!Shape::Rectangle.contains(&f, Vec2::new(225.1, 100.0)));
    }

    #[test]
    fn test_rotated_rectangle() {
        let f = frame(std::f32::consts::FRAC_PI_2);
        // 50 wide becomes 50 tall
        assert!(Shape::Rectangle.contains(&f, Vec2::new(200.0, 124.0)));
        assert!(!Shape::Rectangle.contains(&f, Vec2::new(224.0, 100.0)));
    }

    #[test]
    fn test_triangle_hit() {
        let f = Frame::new(Vec2::ZERO, 50.0, 50.0);
        assert!(Shape::Triangle.contains(&f, Vec2::new(0.0, -24.0)));
        assert!(Shape::Triangle.contains(&f, Vec2::new(-24.0, 24.0)));
        // Top corners of the bounding box are outside
        assert!(!Shape::Triangle.contains(&f, Vec2::new(-20.0, -20.0)));
        assert!(!Shape::Triangle.contains(&f, Vec2::new(20.0, -20.0)));
    }

    #[test]
    fn test_degenerate_triangle_reports_outside() {
        let f = Frame::new(Vec2::ZERO, 50.0, 0.0);
        assert!(!Shape::Triangle.contains(&f, Vec2::ZERO));
    }

    #[test]
    fn test_triangle_clamp_is_nearest_boundary_point() {
        let half = Vec2::new(25.0, 25.0);
        // Straight out past the base lands on the base directly below
        let p = Shape::Triangle.clamp_local(Vec2::new(5.0, 60.0), half);
        assert!((p.x - 5.0).abs() < 1e-4 && (p.y - 25.0).abs() < 1e-4);

        // Beyond a corner lands on the corner
        let p = Shape::Triangle.clamp_local(Vec2::new(60.0, 60.0), half);
        assert!((p.x - 25.0).abs() < 1e-3 && (p.y - 25.0).abs() < 1e-3);

        // Inside points are untouched
        let inside = Vec2::new(0.0, 10.0);
        assert_eq!(Shape::Triangle.clamp_local(inside, half), inside);
    }

    #[test]
    fn test_circle_clamp_radial() {
        let half = Vec2::new(25.0, 25.0);
        let p = Shape::Circle.clamp_local(Vec2::new(0.0, 100.0), half);
        assert!(p.x.abs() < 1e-4 && (p.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_relative_idempotent() {
        let half = Vec2::new(25.0, 15.0);
        let samples = [
            Vec2::new(3.0, -2.0),
            Vec2::new(-0.4, 0.2),
            Vec2::new(0.9, -0.95),
            Vec2::new(-7.0, 7.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(1.2, 1.2),
        ];
        for shape in Shape::ALL {
            for &r in &samples {
                let once = shape.clamp_relative(r, half);
                let twice = shape.clamp_relative(once, half);
                assert!((once.x - twice.x).abs() < 1e-4, "{:?} {:?}", shape, r);
                assert!((once.y - twice.y).abs() < 1e-4, "{:?} {:?}", shape, r);
            }
        }
    }

    #[test]
    fn test_clamped_points_are_contained() {
        let f = frame(0.9);
        let outside = [Vec2::new(500.0, 100.0), Vec2::new(200.0, -300.0), Vec2::new(-50.0, 400.0)];
        // Grow the frame a hair so float error on the boundary still counts
        let mut slack = f;
        slack.width += 1e-2;
        slack.height += 1e-2;
        for shape in Shape::ALL {
            for &p in &outside {
                let c = shape.clamp_point(&f, p);
                assert!(shape.contains(&slack, c), "{:?} {:?} -> {:?}", shape, p, c);
            }
        }
    }

    #[test]
    fn test_rotated_bounds() {
        let mut f = Frame::new(Vec2::new(0.0, 0.0), 40.0, 10.0);
        f.rotation = std::f32::consts::FRAC_PI_2;
        let b = Shape::Rectangle.bounds(&f);
        assert!((b.max.y - 20.0).abs() < 1e-4);
        assert!((b.max.x - 5.0).abs() < 1e-4);
    }
}
