//! Ray picking against the sculpted mesh.
//!
//! Brute force over every face with the Moller-Trumbore test. The UI layer
//! uses this to turn a pointer ray into the stroke point.

use glam::Vec3;

use crate::mesh::MeshBuffer;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric weight of the second vertex
    pub u: f32,
    /// Barycentric weight of the third vertex
    pub v: f32,
}

/// Closest surface point under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Intersection point in mesh space
    pub point: Vec3,
    /// Interpolated vertex normal at the hit (normalized)
    pub normal: Vec3,
    /// Index of the hit face
    pub face: usize,
    /// Distance along the ray, in units of `ray_dir`
    pub distance: f32,
}

/// Moller-Trumbore ray-triangle intersection.
///
/// Hits from either side are accepted; hits behind the origin are not.
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Parallel to the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Find the nearest face hit by the ray.
///
/// Returns `None` for a zero direction, when the ray misses the bounding
/// sphere, or when no face is hit.
pub fn pick(mesh: &MeshBuffer, ray_origin: Vec3, ray_dir: Vec3) -> Option<SurfaceHit> {
    if ray_dir.length_squared() < EPSILON * EPSILON {
        return None;
    }

    if !ray_hits_sphere(ray_origin, ray_dir, mesh.bounds().center, mesh.bounds().radius) {
        return None;
    }

    let positions = mesh.positions();
    let normals = mesh.normals();
    let mut best: Option<(usize, TriangleHit)> = None;

    for (face, tri) in mesh.faces().iter().enumerate() {
        let [a, b, c] = tri.map(|i| i as usize);
        let Some(hit) =
            ray_triangle_intersection(ray_origin, ray_dir, positions[a], positions[b], positions[c])
        else {
            continue;
        };
        if best.is_none_or(|(_, current)| hit.t < current.t) {
            best = Some((face, hit));
        }
    }

    best.map(|(face, hit)| {
        let [a, b, c] = mesh.faces()[face].map(|i| i as usize);
        let w = 1.0 - hit.u - hit.v;
        let normal = (normals[a] * w + normals[b] * hit.u + normals[c] * hit.v).normalize_or_zero();
        SurfaceHit {
            point: ray_origin + ray_dir * hit.t,
            normal,
            face,
            distance: hit.t,
        }
    })
}

/// Whether the ray (forward half only) passes within `radius` of `center`.
fn ray_hits_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> bool {
    let to_center = center - origin;
    let radius_sq = radius * radius;
    if to_center.length_squared() <= radius_sq {
        return true;
    }

    let along = to_center.dot(dir);
    if along < 0.0 {
        return false;
    }

    let closest = origin + dir * (along / dir.length_squared());
    closest.distance_squared(center) <= radius_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::{SphereParams, build_sphere};

    #[test]
    fn test_triangle_hit_front() {
        let hit = ray_triangle_intersection(
            Vec3::new(0.25, 1.0, 0.25),
            Vec3::NEG_Y,
            Vec3::ZERO,
            Vec3::Z,
            Vec3::X,
        )
        .expect("ray should hit");
        assert!((hit.t - 1.0).abs() < 1e-6);
        assert!((hit.u - 0.25).abs() < 1e-6);
        assert!((hit.v - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss_and_behind() {
        let outside =
            ray_triangle_intersection(Vec3::new(2.0, 1.0, 2.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::Z, Vec3::X);
        assert!(outside.is_none());

        let behind =
            ray_triangle_intersection(Vec3::new(0.25, 1.0, 0.25), Vec3::Y, Vec3::ZERO, Vec3::Z, Vec3::X);
        assert!(behind.is_none());

        let parallel =
            ray_triangle_intersection(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, Vec3::ZERO, Vec3::Z, Vec3::X);
        assert!(parallel.is_none());
    }

    #[test]
    fn test_pick_sphere_returns_near_side() {
        let mesh = build_sphere(&SphereParams::new(2.0, 32)).unwrap();
        // Slightly off-axis so the ray does not graze a shared vertex.
        let hit = pick(&mesh, Vec3::new(0.05, 0.07, 10.0), Vec3::NEG_Z).expect("should hit sphere");

        assert!(hit.point.z > 1.9, "hit {:?} should be on the +Z side", hit.point);
        assert!((hit.distance - (10.0 - hit.point.z)).abs() < 1e-4);
        assert!(hit.normal.dot(Vec3::Z) > 0.95);
        assert!(hit.face < mesh.face_count());
    }

    #[test]
    fn test_pick_misses() {
        let mesh = build_sphere(&SphereParams::new(2.0, 16)).unwrap();
        assert!(pick(&mesh, Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z).is_none());
        assert!(pick(&mesh, Vec3::new(0.0, 0.0, 10.0), Vec3::Z).is_none());
        assert!(pick(&mesh, Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).is_none());
    }
}
