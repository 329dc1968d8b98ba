//! Brush settings and their validation.
//!
//! The brush is the configuration layer in front of the tool dispatcher:
//! radius and intensity are validated here so the per-vertex loops can
//! assume positive, finite inputs.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::INTENSITY_SCALE;
use crate::error::{Result, SculptError};
use crate::falloff::FalloffCurve;
use crate::types::{MaterialPreset, ToolType};

/// Paint swatches offered by the properties panel.
pub const PAINT_SWATCHES: [&str; 8] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#3b82f6", "#a855f7", "#ffffff", "#000000",
];

/// Mesh tint swatches offered by the properties panel.
pub const TINT_SWATCHES: [&str; 6] = [
    "#ffffff", "#f5f5f5", "#a3a3a3", "#ffedd5", "#fee2e2", "#dbeafe",
];

/// Allowed slider ranges for brush parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushLimits {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_intensity: f32,
    pub max_intensity: f32,
}

impl Default for BrushLimits {
    fn default() -> Self {
        Self {
            min_radius: 0.1,
            max_radius: 2.0,
            min_intensity: 0.1,
            max_intensity: 5.0,
        }
    }
}

/// User-controlled brush state. Not part of the undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Radius in world units
    pub radius: f32,
    /// Unitless strength multiplier
    pub intensity: f32,
    /// Active tool
    pub tool: ToolType,
    /// Target color for the paint tool (RGB 0-1)
    pub paint_color: Vec3,
    /// Display tint multiplied into all vertex colors (never stored)
    pub mesh_tint: Vec3,
    /// Display material preset
    pub material: MaterialPreset,
    /// Display wireframe overlay
    pub wireframe: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: 0.5,
            intensity: 1.0,
            tool: ToolType::Standard,
            paint_color: Vec3::new(239.0, 68.0, 68.0) / 255.0,
            mesh_tint: Vec3::ONE,
            material: MaterialPreset::Standard,
            wireframe: false,
        }
    }
}

impl Brush {
    /// Create a brush with the given tool and default settings.
    pub fn with_tool(tool: ToolType) -> Self {
        Self {
            tool,
            ..Default::default()
        }
    }

    /// Check that radius and intensity are usable by the dispatcher.
    pub fn validate(&self) -> Result<()> {
        validate_radius(self.radius)?;
        validate_intensity(self.intensity)?;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_intensity(&mut self, intensity: f32) -> Result<()> {
        validate_intensity(intensity)?;
        self.intensity = intensity;
        Ok(())
    }

    /// Set the paint color from a `#rrggbb` or `#rgb` string.
    pub fn set_paint_hex(&mut self, hex: &str) -> Result<()> {
        self.paint_color = parse_hex_color(hex)?;
        Ok(())
    }

    /// Set the display tint from a `#rrggbb` or `#rgb` string.
    pub fn set_tint_hex(&mut self, hex: &str) -> Result<()> {
        self.mesh_tint = parse_hex_color(hex)?;
        Ok(())
    }

    /// Clamp radius and intensity into the slider ranges.
    pub fn clamp_to(&mut self, limits: &BrushLimits) {
        self.radius = self.radius.clamp(limits.min_radius, limits.max_radius);
        self.intensity = self
            .intensity
            .clamp(limits.min_intensity, limits.max_intensity);
    }

    /// Intensity converted to a world-space displacement step.
    pub fn intensity_scale(&self) -> f32 {
        self.intensity * INTENSITY_SCALE
    }

    /// Falloff taper for the active tool.
    pub fn falloff_curve(&self) -> FalloffCurve {
        match self.tool {
            ToolType::Paint => FalloffCurve::Paint,
            _ => FalloffCurve::Sculpt,
        }
    }
}

fn validate_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(SculptError::InvalidRadius(radius))
    }
}

fn validate_intensity(intensity: f32) -> Result<()> {
    if intensity.is_finite() && intensity > 0.0 {
        Ok(())
    } else {
        Err(SculptError::InvalidIntensity(intensity))
    }
}

/// Parse `#rrggbb` or `#rgb` into RGB channels in `[0, 1]`.
///
/// Channels are divided by 255 with no color-space conversion, so vertex
/// colors are stored in display (sRGB) space.
pub fn parse_hex_color(hex: &str) -> Result<Vec3> {
    let invalid = || SculptError::InvalidColor(hex.to_string());

    let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    let (r, g, b) = match digits.len() {
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        3 => {
            // #abc expands to #aabbcc
            let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            (expand(0)?, expand(1)?, expand(2)?)
        }
        _ => return Err(invalid()),
    };

    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Format RGB channels in `[0, 1]` as `#rrggbb`.
pub fn to_hex_color(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}
