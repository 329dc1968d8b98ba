//! Shared configuration for the sculpting app
//!
//! This crate provides the single source of truth for brush defaults, slider
//! ranges, the initial sphere tessellation, and history depth. It is used by
//! the browser entry point and by native tooling alike.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default brush radius in world units
pub const DEFAULT_BRUSH_RADIUS: f32 = 0.5;

/// Default brush intensity
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Default paint color
pub const DEFAULT_PAINT_COLOR: &str = "#ef4444";

/// Default mesh display tint
pub const DEFAULT_MESH_TINT: &str = "#ffffff";

/// Default radius of the starting sphere
pub const DEFAULT_SPHERE_RADIUS: f32 = 2.0;

/// Default segment count of the starting sphere (both directions)
pub const DEFAULT_SEGMENTS: u32 = 200;

/// Default number of undo snapshots kept
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Largest accepted history depth
pub const MAX_HISTORY_DEPTH: usize = 1000;

/// Sphere segment range
pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 1024;

/// Radius slider range
pub const MIN_BRUSH_RADIUS: f32 = 0.1;
pub const MAX_BRUSH_RADIUS: f32 = 2.0;

/// Intensity slider range
pub const MIN_INTENSITY: f32 = 0.1;
pub const MAX_INTENSITY: f32 = 5.0;

/// Environment variable overriding [`SphereConfig::segments`]
pub const ENV_SEGMENTS: &str = "SCULPT_SEGMENTS";

/// Environment variable overriding [`SculptConfig::history_depth`]
pub const ENV_HISTORY_DEPTH: &str = "SCULPT_HISTORY_DEPTH";

/// Errors loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {field} range: min {min} must be positive and not above max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("Default {field} {value} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Sphere radius must be positive, got {0}")]
    InvalidSphereRadius(f32),

    #[error("Sphere segments must lie in [3, 1024], got {0}")]
    InvalidSegments(u32),

    #[error("History depth must lie in [1, 1000], got {0}")]
    InvalidHistoryDepth(usize),
}

/// Initial brush settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub radius: f32,
    pub intensity: f32,
    /// `#rrggbb` paint color
    pub paint_color: String,
    /// `#rrggbb` display tint
    pub mesh_tint: String,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            intensity: DEFAULT_INTENSITY,
            paint_color: DEFAULT_PAINT_COLOR.to_string(),
            mesh_tint: DEFAULT_MESH_TINT.to_string(),
        }
    }
}

/// Slider ranges for brush parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderLimits {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_intensity: f32,
    pub max_intensity: f32,
}

impl Default for SliderLimits {
    fn default() -> Self {
        Self {
            min_radius: MIN_BRUSH_RADIUS,
            max_radius: MAX_BRUSH_RADIUS,
            min_intensity: MIN_INTENSITY,
            max_intensity: MAX_INTENSITY,
        }
    }
}

/// Starting sphere tessellation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    /// Segments around the equator and from pole to pole
    pub segments: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SPHERE_RADIUS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

impl SphereConfig {
    /// Vertex count of the generated sphere
    pub fn vertex_count(&self) -> usize {
        let s = self.segments as usize + 1;
        s * s
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    pub brush: BrushConfig,
    pub limits: SliderLimits,
    pub sphere: SphereConfig,
    /// Maximum snapshots kept by the undo history
    pub history_depth: usize,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            brush: BrushConfig::default(),
            limits: SliderLimits::default(),
            sphere: SphereConfig::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl SculptConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Apply `SCULPT_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_SEGMENTS) {
            match value.trim().parse::<u32>() {
                Ok(segments) if (MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) => {
                    self.sphere.segments = segments
                }
                _ => warn!("Ignoring {}={:?}: not a segment count", ENV_SEGMENTS, value),
            }
        }

        if let Some(value) = lookup(ENV_HISTORY_DEPTH) {
            match value.trim().parse::<usize>() {
                Ok(depth) if (1..=MAX_HISTORY_DEPTH).contains(&depth) => self.history_depth = depth,
                _ => warn!("Ignoring {}={:?}: not a history depth", ENV_HISTORY_DEPTH, value),
            }
        }
    }

    /// Check ranges and that the brush defaults fall inside the sliders
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        check_range("radius", limits.min_radius, limits.max_radius)?;
        check_range("intensity", limits.min_intensity, limits.max_intensity)?;
        check_default("radius", self.brush.radius, limits.min_radius, limits.max_radius)?;
        check_default(
            "intensity",
            self.brush.intensity,
            limits.min_intensity,
            limits.max_intensity,
        )?;

        if !(self.sphere.radius.is_finite() && self.sphere.radius > 0.0) {
            return Err(ConfigError::InvalidSphereRadius(self.sphere.radius));
        }
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&self.sphere.segments) {
            return Err(ConfigError::InvalidSegments(self.sphere.segments));
        }
        if !(1..=MAX_HISTORY_DEPTH).contains(&self.history_depth) {
            return Err(ConfigError::InvalidHistoryDepth(self.history_depth));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > 0.0 && min <= max && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn check_default(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::DefaultOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SculptConfig::default();
        assert_eq!(config.brush.radius, DEFAULT_BRUSH_RADIUS);
        assert_eq!(config.brush.intensity, DEFAULT_INTENSITY);
        assert_eq!(config.brush.paint_color, "#ef4444");
        assert_eq!(config.sphere.segments, DEFAULT_SEGMENTS);
        assert_eq!(config.sphere.vertex_count(), 201 * 201);
        assert_eq!(config.history_depth, DEFAULT_HISTORY_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SculptConfig::from_json(r#"{"sphere": {"segments": 64}, "history_depth": 5}"#)
            .unwrap();
        assert_eq!(config.sphere.segments, 64);
        assert_eq!(config.sphere.radius, DEFAULT_SPHERE_RADIUS);
        assert_eq!(config.history_depth, 5);
        assert_eq!(config.limits, SliderLimits::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SculptConfig::default();
        config.brush.radius = 1.25;
        let json = config.to_json().unwrap();
        assert_eq!(SculptConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SculptConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"limits": {"min_radius": 3.0, "max_radius": 1.0}}"#),
            Err(ConfigError::InvalidRange { field: "radius", .. })
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"brush": {"intensity": 9.0}}"#),
            Err(ConfigError::DefaultOutOfRange { field: "intensity", .. })
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"history_depth": 0}"#),
            Err(ConfigError::InvalidHistoryDepth(0))
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"sphere": {"radius": -1.0}}"#),
            Err(ConfigError::InvalidSphereRadius(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_history_and_sphere() {
        assert!(matches!(
            SculptConfig::from_json(
                r#"{"sphere": {"segments": 8}, "history_depth": 18446744073709551615}"#
            ),
            Err(ConfigError::InvalidHistoryDepth(usize::MAX))
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"history_depth": 100000000000}"#),
            Err(ConfigError::InvalidHistoryDepth(_))
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"sphere": {"segments": 100000}}"#),
            Err(ConfigError::InvalidSegments(100_000))
        ));
        assert!(matches!(
            SculptConfig::from_json(r#"{"sphere": {"segments": 2}}"#),
            Err(ConfigError::InvalidSegments(2))
        ));

        let config =
            SculptConfig::from_json(r#"{"sphere": {"segments": 1024}, "history_depth": 1000}"#)
                .unwrap();
        assert_eq!(config.history_depth, MAX_HISTORY_DEPTH);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SculptConfig::default();
        config.apply_overrides(lookup(&[(ENV_SEGMENTS, "48"), (ENV_HISTORY_DEPTH, " 7 ")]));
        assert_eq!(config.sphere.segments, 48);
        assert_eq!(config.history_depth, 7);
    }

    #[test]
    fn test_bad_env_overrides_are_ignored() {
        let mut config = SculptConfig::default();
        config.apply_overrides(lookup(&[(ENV_SEGMENTS, "lots"), (ENV_HISTORY_DEPTH, "0")]));
        assert_eq!(config, SculptConfig::default());

        config.apply_overrides(lookup(&[(ENV_SEGMENTS, "5000"), (ENV_HISTORY_DEPTH, "99999")]));
        assert_eq!(config, SculptConfig::default());
    }
}
