//! Core sculpting types shared by the brush, tools and the UI protocol.

use serde::{Deserialize, Serialize};

/// Tool applied by a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ToolType {
    /// Push vertices out along their own normals (builds volume)
    #[default]
    Standard = 0,
    /// Relax vertices toward the centroid of the brush region
    Smooth = 1,
    /// Project vertices toward the average plane of the brush region
    Flatten = 2,
    /// Pull vertices toward the brush center
    Pinch = 3,
    /// Blend vertex colors toward the paint color
    Paint = 4,
}

impl ToolType {
    /// All tools in toolbar order.
    pub const ALL: [ToolType; 5] = [
        ToolType::Standard,
        ToolType::Smooth,
        ToolType::Flatten,
        ToolType::Pinch,
        ToolType::Paint,
    ];

    /// Whether this tool moves vertices (and therefore needs normals recomputed).
    pub fn deforms(self) -> bool {
        !matches!(self, ToolType::Paint)
    }

    /// Whether this tool needs the average-plane pre-pass before displacing.
    pub fn needs_plane_estimate(self) -> bool {
        matches!(self, ToolType::Smooth | ToolType::Flatten)
    }

    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            ToolType::Standard => "BRUSH",
            ToolType::Smooth => "SMOOTH",
            ToolType::Flatten => "FLATTEN",
            ToolType::Pinch => "PINCH",
            ToolType::Paint => "PAINT",
        }
    }
}

/// Display material preset. Has no geometric effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    #[default]
    Standard,
    Clay,
    Metallic,
}

impl MaterialPreset {
    /// PBR roughness used by the renderer.
    pub fn roughness(self) -> f32 {
        match self {
            MaterialPreset::Standard => 0.5,
            MaterialPreset::Clay => 0.8,
            MaterialPreset::Metallic => 0.2,
        }
    }

    /// PBR metalness used by the renderer.
    pub fn metalness(self) -> f32 {
        match self {
            MaterialPreset::Standard => 0.5,
            MaterialPreset::Clay => 0.1,
            MaterialPreset::Metallic => 0.9,
        }
    }
}
