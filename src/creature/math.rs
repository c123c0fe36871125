//! 2D vector math for the creature model
//!
//! Screen-style coordinates: +x right, +y down. Angles are radians and
//! rotate +x towards +y.

use std::ops::{Add, Mul, Neg, Sub};

/// Below this, lengths and determinants are treated as zero.
pub const GEOMETRY_EPSILON: f32 = 1e-4;

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).len_sq()
    }

    pub fn normalize(self) -> Vec2 {
        let l = self.len();
        if l < GEOMETRY_EPSILON {
            return Vec2::ZERO;
        }
        Vec2 {
            x: self.x / l,
            y: self.y / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Rotate about the origin
    pub fn rotate(self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Move `t` of the way towards `target`
    pub fn lerp(self, target: Vec2, t: f32) -> Vec2 {
        self + (target - self) * t
    }

    /// Shorten to `max_len` if longer, keeping direction
    pub fn clamp_len(self, max_len: f32) -> Vec2 {
        let l = self.len();
        if l > max_len && l > GEOMETRY_EPSILON {
            self.scale(max_len / l)
        } else {
            self
        }
    }

    /// Angle of this vector measured from +x
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Barycentric weights of `p` in triangle (v1, v2, v3).
/// Returns None for a degenerate (near zero area) triangle.
pub fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> Option<(f32, f32, f32)> {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if d.abs() < GEOMETRY_EPSILON {
        return None;
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    Some((u, v, w))
}

/// Closest point to `p` on segment a-b.
/// A zero-length segment projects onto its endpoint.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.len_sq();
    if len_sq < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return a;
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
