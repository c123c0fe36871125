//! Part frames
//!
//! Every part owns a `Frame`: world centre, world rotation and full
//! extents. Node coordinates are stored "relative": -1..1 per axis in the
//! part's half-extent frame, so (1, 0) is always the middle of the right
//! edge no matter how the part is sized or rotated.
//!
//! relative --scale by half extents--> local --rotate, translate--> world

use super::math::Vec2;

/// World-space placement and size of a part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Centre in world space
    pub center: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Full width
    pub width: f32,
    /// Full height
    pub height: f32,
}

impl Frame {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            rotation: 0.0,
            width,
            height,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// World point -> unrotated offset from centre
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        (world - self.center).rotate(-self.rotation)
    }

    /// Unrotated offset from centre -> world point
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.center + local.rotate(self.rotation)
    }

    /// World point -> relative coordinate. Zero extents are a configuration
    /// error and produce non-finite results.
    pub fn to_relative(&self, world: Vec2) -> Vec2 {
        let local = self.world_to_local(world);
        let half = self.half_extents();
        Vec2::new(local.x / half.x, local.y / half.y)
    }

    /// Relative coordinate -> world point. Exact inverse of `to_relative`.
    pub fn to_absolute(&self, rel: Vec2) -> Vec2 {
        let half = self.half_extents();
        self.local_to_world(Vec2::new(rel.x * half.x, rel.y * half.y))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Frame> {
        let mut out = Vec::new();
        for &rotation in &[0.0, 0.3, 1.7, -2.4, std::f32::consts::PI] {
            for &(w, h) in &[(50.0, 50.0), (80.0, 20.0), (12.0, 64.0)] {
                out.push(Frame {
                    center: Vec2::new(350.0, 275.0),
                    rotation,
                    width: w,
                    height: h,
                });
            }
        }
        out
    }

    #[test]
    fn test_relative_absolute_round_trip() {
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-0.25, 0.8),
            Vec2::new(-1.0, 1.0),
            Vec2::new(0.5, 0.0),
        ];
        for frame in frames() {
            for &rel in &samples {
                let back = frame.to_relative(frame.to_absolute(rel));
                assert!((back.x - rel.x).abs() < 1e-4, "{:?} {:?} -> {:?}", frame, rel, back);
                assert!((back.y - rel.y).abs() < 1e-4, "{:?} {:?} -> {:?}", frame, rel, back);
            }
        }
    }

    #[test]
    fn test_unrotated_absolute() {
        let frame = Frame::new(Vec2::new(350.0, 350.0), 50.0, 50.0);
        let top = frame.to_absolute(Vec2::new(0.0, -1.0));
        assert!((top.x - 350.0).abs() < 1e-4);
        assert!((top.y - 325.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotated_absolute() {
        let mut frame = Frame::new(Vec2::new(0.0, 0.0), 20.0, 10.0);
        frame.rotation = std::f32::consts::FRAC_PI_2;
        // Right edge midpoint swings down to +y
        let right = frame.to_absolute(Vec2::new(1.0, 0.0));
        assert!(right.x.abs() < 1e-4);
        assert!((right.y - 10.0).abs() < 1e-4);
    }
}
