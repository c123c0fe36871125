//! Walking gait
//!
//! One phase in [0, 1) advances by `dt / cycle` while walking. Each foot
//! reads a sinusoid of the phase; the second foot runs half a cycle behind
//! the first so they alternate.

use super::math::Vec2;
use super::settings::GaitSettings;

/// Rotation and offset for one foot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootPose {
    pub rotation: f32,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct Gait {
    phase: f32,
    walking: bool,
}

impl Gait {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Step the cycle forward. Wraps at 1.0.
    pub fn advance(&mut self, dt: f32, cycle_duration: f32) {
        self.walking = true;
        // A long tick may cover several cycles
        self.phase = (self.phase + dt / cycle_duration).rem_euclid(1.0);
    }

    /// Stop walking. Returns true on the walking -> stopped transition,
    /// which is when feet should go back to the neutral pose.
    pub fn stop(&mut self) -> bool {
        let was_walking = self.walking;
        self.walking = false;
        self.phase = 0.0;
        was_walking
    }

    /// Pose for foot `index` (0 or 1) walking in `direction` (+1 right, -1 left)
    pub fn pose(&self, index: usize, direction: f32, settings: &GaitSettings) -> FootPose {
        let mut phase = self.phase + if index % 2 == 1 { 0.5 } else { 0.0 };
        if phase >= 1.0 {
            phase -= 1.0;
        }
        let angle = phase * std::f32::consts::TAU;
        FootPose {
            rotation: angle.sin() * settings.rotation_amplitude,
            offset: Vec2::new(
                angle.cos() * settings.stride * direction,
                settings.neutral_standoff - settings.lift * angle.sin(),
            ),
        }
    }

    pub fn neutral(settings: &GaitSettings) -> FootPose {
        FootPose {
            rotation: 0.0,
            offset: Vec2::new(0.0, settings.neutral_standoff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: FootPose, b: FootPose) -> bool {
        (a.rotation - b.rotation).abs() < 1e-3
            && (a.offset.x - b.offset.x).abs() < 1e-2
            && (a.offset.y - b.offset.y).abs() < 1e-2
    }

    #[test]
    fn test_cycle_returns_to_start() {
        let settings = GaitSettings::default();
        let dt = 1.0 / 60.0;
        let mut gait = Gait::new();
        gait.advance(dt, settings.cycle_duration);
        let start = gait.pose(0, 1.0, &settings);

        let ticks = (settings.cycle_duration / dt).round() as usize;
        for _ in 0..ticks {
            gait.advance(dt, settings.cycle_duration);
            assert!(gait.phase() >= 0.0 && gait.phase() < 1.0);
        }
        assert!(close(start, gait.pose(0, 1.0, &settings)));
    }

    #[test]
    fn test_long_tick_still_wraps() {
        let mut gait = Gait::new();
        for _ in 0..3 {
            gait.advance(1.0, 0.5);
            assert!(gait.phase() >= 0.0 && gait.phase() < 1.0);
        }
        assert_eq!(gait.phase(), 0.0);

        // 1.6 cycles lands 0.6 of the way through
        gait.advance(0.8, 0.5);
        assert!((gait.phase() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_feet_alternate() {
        let settings = GaitSettings::default();
        let mut gait = Gait::new();
        gait.advance(0.125, 0.5); // quarter cycle
        let a = gait.pose(0, 1.0, &settings);
        let b = gait.pose(1, 1.0, &settings);
        assert!((a.rotation + b.rotation).abs() < 1e-4);
        assert!((a.offset.y - settings.neutral_standoff + settings.lift).abs() < 1e-3);
        assert!((b.offset.y - settings.neutral_standoff - settings.lift).abs() < 1e-3);
    }

    #[test]
    fn test_stop_reports_transition_once() {
        let mut gait = Gait::new();
        assert!(!gait.stop());
        gait.advance(0.1, 0.5);
        assert!(gait.stop());
        assert_eq!(gait.phase(), 0.0);
        assert!(!gait.stop());
    }

    #[test]
    fn test_direction_mirrors_stride() {
        let settings = GaitSettings::default();
        let gait = Gait::new();
        let right = gait.pose(0, 1.0, &settings);
        let left = gait.pose(0, -1.0, &settings);
        assert!((right.offset.x - settings.stride).abs() < 1e-4);
        assert!((left.offset.x + settings.stride).abs() < 1e-4);
    }
}
