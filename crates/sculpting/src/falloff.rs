//! Brush falloff evaluation.
//!
//! A vertex is inside the brush when its squared distance to the brush center
//! is strictly below `radius²`. Inside, the weight tapers from 1 at the
//! center to 0 at the boundary as `(1 - d²/r²)^n`, with `n = 2` for
//! deformation and `n = 3` for paint.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{PAINT_FALLOFF_EXPONENT, SCULPT_FALLOFF_EXPONENT};

/// Taper applied to the brush weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FalloffCurve {
    /// Quadratic taper for the deformation tools
    #[default]
    Sculpt = 0,
    /// Cubic taper for painting
    Paint = 1,
}

impl FalloffCurve {
    pub fn exponent(self) -> i32 {
        match self {
            FalloffCurve::Sculpt => SCULPT_FALLOFF_EXPONENT,
            FalloffCurve::Paint => PAINT_FALLOFF_EXPONENT,
        }
    }

    /// Weight for a normalized squared distance `t = d²/r²` in `[0, 1)`.
    #[inline]
    pub fn weight(self, t: f32) -> f32 {
        (1.0 - t).max(0.0).powi(self.exponent())
    }
}

/// Result of testing one vertex against the brush sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FalloffSample {
    /// Strictly inside the brush sphere
    pub in_sphere: bool,
    /// Squared distance from the vertex to the brush center
    pub dist_sq: f32,
    /// Influence weight in `[0, 1]`; zero outside the sphere
    pub falloff: f32,
}

/// Evaluate the falloff for a single vertex.
///
/// Takes `radius_sq` rather than the radius so callers can hoist the square
/// out of the per-vertex loop.
#[inline]
pub fn evaluate(
    vertex_pos: Vec3,
    brush_center: Vec3,
    radius_sq: f32,
    curve: FalloffCurve,
) -> FalloffSample {
    let dist_sq = vertex_pos.distance_squared(brush_center);
    if dist_sq < radius_sq {
        FalloffSample {
            in_sphere: true,
            dist_sq,
            falloff: curve.weight(dist_sq / radius_sq),
        }
    } else {
        FalloffSample {
            in_sphere: false,
            dist_sq,
            falloff: 0.0,
        }
    }
}
