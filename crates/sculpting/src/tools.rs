//! Tool dispatch: applies one brush stamp to every vertex inside the brush.
//!
//! Each stamp is a single pass over the whole vertex buffer (no spatial
//! index). Smooth and Flatten need the centroid/average plane of the brush
//! region first, so they run a read-only pre-pass before the displacement
//! pass. All displacement uses `falloff * brush.intensity_scale()` scaled by
//! a per-tool gain from [`crate::constants`].

use glam::Vec3;
use tracing::trace;

use crate::brush::Brush;
use crate::constants::{FLATTEN_FACTOR, PAINT_DAMPING, PINCH_FACTOR, SMOOTH_FACTOR};
use crate::falloff::{FalloffCurve, evaluate};
use crate::mesh::MeshBuffer;
use crate::types::ToolType;

/// Outcome of one stamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StampResult {
    /// Vertices strictly inside the brush sphere
    pub vertices_affected: usize,
    /// Positions were modified (normals have been recomputed)
    pub geometry_changed: bool,
    /// Colors were modified
    pub colors_changed: bool,
}

/// Centroid and averaged normal of the vertices under the brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEstimate {
    pub centroid: Vec3,
    /// Normalized average of vertex normals (zero if they cancel out)
    pub avg_normal: Vec3,
    /// Number of vertices contributing
    pub count: usize,
}

impl PlaneEstimate {
    /// Signed distance of `point` from the plane along `avg_normal`.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.centroid).dot(self.avg_normal)
    }
}

/// Read-only pre-pass for Smooth and Flatten.
///
/// Returns `None` when no vertex lies inside the brush.
pub fn plane_estimate(mesh: &MeshBuffer, center: Vec3, radius_sq: f32) -> Option<PlaneEstimate> {
    let mut sum_pos = Vec3::ZERO;
    let mut sum_normal = Vec3::ZERO;
    let mut count = 0usize;

    for (position, normal) in mesh.positions().iter().zip(mesh.normals()) {
        if position.distance_squared(center) < radius_sq {
            sum_pos += *position;
            sum_normal += *normal;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    Some(PlaneEstimate {
        centroid: sum_pos / count as f32,
        avg_normal: sum_normal.normalize_or_zero(),
        count,
    })
}

/// Apply one stamp of the brush's active tool at `point` (mesh-local space).
///
/// Recomputes normals when a deformation tool touched at least one vertex.
pub fn apply_stamp(mesh: &mut MeshBuffer, brush: &Brush, point: Vec3) -> StampResult {
    debug_assert!(
        brush.validate().is_ok(),
        "brush must be validated before dispatch: {:?}",
        brush
    );

    let radius_sq = brush.radius * brush.radius;
    let scale = brush.intensity_scale();

    let result = match brush.tool {
        ToolType::Standard => apply_standard(mesh, point, radius_sq, scale),
        ToolType::Smooth => apply_smooth(mesh, point, radius_sq, scale),
        ToolType::Flatten => apply_flatten(mesh, point, radius_sq, scale),
        ToolType::Pinch => apply_pinch(mesh, point, radius_sq, scale),
        ToolType::Paint => apply_paint(mesh, point, radius_sq, brush.intensity, brush.paint_color),
    };

    if result.geometry_changed {
        mesh.recompute_normals();
    }

    trace!(
        "stamp {:?} at {:?}: {} vertices",
        brush.tool, point, result.vertices_affected
    );
    result
}

fn deformed(vertices_affected: usize) -> StampResult {
    StampResult {
        vertices_affected,
        geometry_changed: vertices_affected > 0,
        colors_changed: false,
    }
}

/// Standard: push each vertex out along its own normal.
pub fn apply_standard(mesh: &mut MeshBuffer, center: Vec3, radius_sq: f32, scale: f32) -> StampResult {
    let mut affected = 0;

    for i in 0..mesh.vertex_count() {
        let position = mesh.position(i);
        let sample = evaluate(position, center, radius_sq, FalloffCurve::Sculpt);
        if !sample.in_sphere {
            continue;
        }

        let influence = sample.falloff * scale;
        mesh.set_position(i, position + mesh.normal(i) * influence);
        affected += 1;
    }

    deformed(affected)
}

/// Smooth: pull each vertex toward the centroid of the brush region.
pub fn apply_smooth(mesh: &mut MeshBuffer, center: Vec3, radius_sq: f32, scale: f32) -> StampResult {
    let Some(plane) = plane_estimate(mesh, center, radius_sq) else {
        return StampResult::default();
    };

    let mut affected = 0;
    for i in 0..mesh.vertex_count() {
        let position = mesh.position(i);
        let sample = evaluate(position, center, radius_sq, FalloffCurve::Sculpt);
        if !sample.in_sphere {
            continue;
        }

        let influence = sample.falloff * scale * SMOOTH_FACTOR;
        mesh.set_position(i, position + (plane.centroid - position) * influence);
        affected += 1;
    }

    deformed(affected)
}

/// Flatten: project each vertex toward the average plane of the brush region.
pub fn apply_flatten(mesh: &mut MeshBuffer, center: Vec3, radius_sq: f32, scale: f32) -> StampResult {
    let Some(plane) = plane_estimate(mesh, center, radius_sq) else {
        return StampResult::default();
    };

    let mut affected = 0;
    for i in 0..mesh.vertex_count() {
        let position = mesh.position(i);
        let sample = evaluate(position, center, radius_sq, FalloffCurve::Sculpt);
        if !sample.in_sphere {
            continue;
        }

        let influence = sample.falloff * scale * FLATTEN_FACTOR;
        let offset = -plane.avg_normal * plane.signed_distance(position) * influence;
        mesh.set_position(i, position + offset);
        affected += 1;
    }

    deformed(affected)
}

/// Pinch: pull each vertex toward the brush center point.
pub fn apply_pinch(mesh: &mut MeshBuffer, center: Vec3, radius_sq: f32, scale: f32) -> StampResult {
    let mut affected = 0;

    for i in 0..mesh.vertex_count() {
        let position = mesh.position(i);
        let sample = evaluate(position, center, radius_sq, FalloffCurve::Sculpt);
        if !sample.in_sphere {
            continue;
        }

        let influence = sample.falloff * scale * PINCH_FACTOR;
        mesh.set_position(i, position + (center - position) * influence);
        affected += 1;
    }

    deformed(affected)
}

/// Paint: blend each vertex color toward `paint_color`. Never moves vertices.
pub fn apply_paint(
    mesh: &mut MeshBuffer,
    center: Vec3,
    radius_sq: f32,
    intensity: f32,
    paint_color: Vec3,
) -> StampResult {
    let mut affected = 0;

    for i in 0..mesh.vertex_count() {
        let sample = evaluate(mesh.position(i), center, radius_sq, FalloffCurve::Paint);
        if !sample.in_sphere {
            continue;
        }

        let strength = (sample.falloff * intensity * PAINT_DAMPING).min(1.0);
        let color = mesh.color(i);
        mesh.set_color(i, color.lerp(paint_color, strength));
        affected += 1;
    }

    StampResult {
        vertices_affected: affected,
        geometry_changed: false,
        colors_changed: affected > 0,
    }
}
