//! Tuned constants for stamp strength and history depth.
//!
//! Tuned by eye against the default sphere and slider ranges.

/// Multiplier turning the intensity slider into a world-space displacement.
pub const INTENSITY_SCALE: f32 = 0.015;

/// Extra gain applied to the Smooth tool's pull toward the local centroid.
pub const SMOOTH_FACTOR: f32 = 2.0;

/// Extra gain applied to the Flatten tool's projection toward the average plane.
pub const FLATTEN_FACTOR: f32 = 2.0;

/// Extra gain applied to the Pinch tool's pull toward the brush center.
pub const PINCH_FACTOR: f32 = 1.5;

/// Damping for paint blending so repeated passes build color gradually.
pub const PAINT_DAMPING: f32 = 0.2;

/// Falloff exponent for the deformation tools.
pub const SCULPT_FALLOFF_EXPONENT: i32 = 2;

/// Falloff exponent for the paint tool (softer edge at vertex resolution).
pub const PAINT_FALLOFF_EXPONENT: i32 = 3;

/// Maximum number of snapshots retained by the history.
pub const MAX_HISTORY: usize = 20;

/// Default vertex color of a freshly created mesh (light grey).
pub const BASE_VERTEX_GREY: f32 = 0.8;
