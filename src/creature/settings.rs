//! Settings
//!
//! Every tunable of the sandbox in one RON file. Missing fields fall back
//! to their defaults, so a settings file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use super::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: f32,
    /// Also the ground line
    pub height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self { width: 700.0, height: 700.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Added to the root's vertical velocity every tick
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    /// Extra jump strength per grounded foot beyond the first
    pub jump_extra_foot_scale: f32,
    pub jump_horizontal_boost: f32,
    /// A grounded creature whose lowest point lifts off by at most this much
    /// (a stepping foot) is pulled back onto the ground
    pub ground_snap: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            move_speed: 5.0,
            jump_velocity: 12.0,
            jump_extra_foot_scale: 0.25,
            jump_horizontal_boost: 3.0,
            ground_snap: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitSettings {
    /// Seconds per full step cycle
    pub cycle_duration: f32,
    pub stride: f32,
    pub lift: f32,
    /// Peak foot rotation in radians
    pub rotation_amplitude: f32,
    /// Foot offset below its node when standing
    pub neutral_standoff: f32,
}

impl Default for GaitSettings {
    fn default() -> Self {
        Self {
            cycle_duration: 0.5,
            stride: 20.0,
            lift: 10.0,
            rotation_amplitude: 0.3,
            neutral_standoff: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabSettings {
    /// Slack added to an object's radius when a hand reaches for it
    pub tolerance: f32,
    /// Fraction of the remaining distance a hand covers per tick
    pub hand_smoothing: f32,
    pub ball_radius: f32,
}

impl Default for GrabSettings {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            hand_smoothing: 0.2,
            ball_radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub physics: PhysicsSettings,
    pub gait: GaitSettings,
    pub grab: GrabSettings,
    pub target_fps: f32,
    /// Start with the edit overlay open
    pub start_in_edit_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            physics: PhysicsSettings::default(),
            gait: GaitSettings::default(),
            grab: GrabSettings::default(),
            target_fps: 60.0,
            start_in_edit_mode: false,
        }
    }
}

fn positive(value: f32, name: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be positive and finite, got {}", name, value))
    }
}

fn finite(value: f32, name: &str) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{} must be finite, got {}", name, value))
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&contents)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    pub fn from_ron_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Settings = ron::from_str(s)?;
        settings.validate().map_err(SettingsError::ValidationError)?;
        Ok(settings)
    }

    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    pub fn validate(&self) -> Result<(), String> {
        positive(self.world.width, "world.width")?;
        positive(self.world.height, "world.height")?;
        finite(self.physics.gravity, "physics.gravity")?;
        finite(self.physics.move_speed, "physics.move_speed")?;
        finite(self.physics.jump_velocity, "physics.jump_velocity")?;
        finite(self.physics.jump_extra_foot_scale, "physics.jump_extra_foot_scale")?;
        finite(self.physics.jump_horizontal_boost, "physics.jump_horizontal_boost")?;
        finite(self.physics.ground_snap, "physics.ground_snap")?;
        positive(self.gait.cycle_duration, "gait.cycle_duration")?;
        finite(self.gait.stride, "gait.stride")?;
        finite(self.gait.lift, "gait.lift")?;
        finite(self.gait.rotation_amplitude, "gait.rotation_amplitude")?;
        finite(self.gait.neutral_standoff, "gait.neutral_standoff")?;
        finite(self.grab.tolerance, "grab.tolerance")?;
        positive(self.grab.ball_radius, "grab.ball_radius")?;
        positive(self.target_fps, "target_fps")?;
        let s = self.grab.hand_smoothing;
        if !(s > 0.0 && s <= 1.0) {
            return Err(format!("grab.hand_smoothing must be in (0, 1], got {}", s));
        }
        Ok(())
    }

    /// Seconds per simulation tick
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.target_fps
    }

    /// `<config dir>/critter-forge/settings.ron`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("critter-forge").join("settings.ron"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    /// Settings from the default path, or defaults when there is no file
    /// or it doesn't parse
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::info!("no settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = Settings::default();
        s.validate().unwrap();
        assert_eq!(s.world.width, 700.0);
        assert_eq!(s.physics.gravity, 0.6);
        assert!((s.tick_seconds() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let s = Settings::from_ron_str("(physics: (move_speed: 8.0), target_fps: 30.0)").unwrap();
        assert_eq!(s.physics.move_speed, 8.0);
        assert_eq!(s.physics.gravity, 0.6);
        assert_eq!(s.target_fps, 30.0);
        assert_eq!(s.gait, GaitSettings::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = Settings::from_ron_str("(target_fps: 0.0)").unwrap_err();
        assert!(matches!(err, SettingsError::ValidationError(_)));

        let err = Settings::from_ron_str("(grab: (hand_smoothing: 1.5))").unwrap_err();
        assert!(matches!(err, SettingsError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_ron_str("(world: (width: ").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");

        let mut s = Settings::default();
        s.gait.stride = 32.0;
        s.start_in_edit_mode = true;
        s.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), s);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::IoError(_)));
    }
}
