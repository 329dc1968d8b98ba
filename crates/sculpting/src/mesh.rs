//! Fixed-topology mesh buffer.
//!
//! [`MeshBuffer`] owns the live per-vertex position, normal and color arrays
//! of the sculpted mesh plus its immutable triangle list. The vertex count is
//! fixed at construction; sculpting only ever rewrites values in place.
//!
//! Vertex indices passed to the accessors are trusted. An out-of-range index
//! is a programming error and panics.

use std::cell::Cell;

use glam::Vec3;
use tracing::trace;

use crate::error::{Result, SculptError};

/// Sphere enclosing every vertex position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Compute a bounding sphere centered on the AABB of `positions`.
    pub fn from_points(positions: &[Vec3]) -> Self {
        if positions.is_empty() {
            return Self {
                center: Vec3::ZERO,
                radius: 0.0,
            };
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in positions {
            min = min.min(p);
            max = max.max(p);
        }

        let center = (min + max) * 0.5;
        let radius_sq = positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max);

        Self {
            center,
            radius: radius_sq.sqrt(),
        }
    }

    /// Whether a brush sphere at `center` with `radius` can touch this volume.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let reach = self.radius + radius;
        self.center.distance_squared(center) <= reach * reach
    }
}

/// Immutable copy of the editable mesh state (positions and colors).
///
/// Normals are not stored: they are derived data and are recomputed on restore.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
}

impl MeshSnapshot {
    /// Number of vertices captured.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }
}

/// Live vertex buffers of the sculpted mesh.
#[derive(Debug, Clone)]
pub struct MeshBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    /// Lazily computed; cleared whenever a position changes.
    bounds: Cell<Option<BoundingSphere>>,
}

impl MeshBuffer {
    /// Build a mesh from positions and a triangle list, filling every vertex
    /// with `base_color`. Normals are computed immediately.
    pub fn new(positions: Vec<Vec3>, faces: Vec<[u32; 3]>, base_color: Vec3) -> Result<Self> {
        let colors = vec![base_color; positions.len()];
        Self::with_colors(positions, colors, faces)
    }

    /// Build a mesh from explicit per-vertex colors.
    ///
    /// # Panics
    ///
    /// Panics if `colors` and `positions` differ in length.
    pub fn with_colors(
        positions: Vec<Vec3>,
        colors: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self> {
        assert_eq!(
            positions.len(),
            colors.len(),
            "position and color arrays must have the same vertex count"
        );

        if positions.is_empty() {
            return Err(SculptError::EmptyMesh);
        }

        let vertex_count = positions.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SculptError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        let mut mesh = Self {
            normals: vec![Vec3::ZERO; vertex_count],
            positions,
            colors,
            faces,
            bounds: Cell::new(None),
        };
        mesh.recompute_normals();
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Overwrite a vertex position. Normals are not updated until
    /// [`recompute_normals`](Self::recompute_normals) runs.
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
        self.bounds.set(None);
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        self.normals[index]
    }

    pub fn color(&self, index: usize) -> Vec3 {
        self.colors[index]
    }

    pub fn set_color(&mut self, index: usize, color: Vec3) {
        self.colors[index] = color;
    }

    /// Stored color multiplied by a display tint. Never written back.
    pub fn display_color(&self, index: usize, tint: Vec3) -> Vec3 {
        self.colors[index] * tint
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice for upload.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat float slice for upload.
    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Colors as a flat float slice for upload.
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Triangle indices as a flat slice for upload.
    pub fn index_slice(&self) -> &[u32] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Recompute every vertex normal as the normalized sum of its adjacent
    /// (area-weighted) face normals.
    pub fn recompute_normals(&mut self) {
        self.normals.fill(Vec3::ZERO);

        for tri in &self.faces {
            let [a, b, c] = tri.map(|i| i as usize);
            let v0 = self.positions[a];
            let edge1 = self.positions[b] - v0;
            let edge2 = self.positions[c] - v0;
            let face_normal = edge1.cross(edge2);

            self.normals[a] += face_normal;
            self.normals[b] += face_normal;
            self.normals[c] += face_normal;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }

        trace!("recomputed {} vertex normals", self.normals.len());
    }

    /// Copy the current positions and colors.
    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot {
            positions: self.positions.clone(),
            colors: self.colors.clone(),
        }
    }

    /// Overwrite positions and colors from a snapshot, then recompute normals.
    ///
    /// Invalidates the cached bounding sphere.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot was taken from a mesh with a different vertex count.
    pub fn restore(&mut self, snapshot: &MeshSnapshot) {
        assert_eq!(
            snapshot.vertex_count(),
            self.vertex_count(),
            "snapshot vertex count does not match mesh"
        );

        self.positions.copy_from_slice(&snapshot.positions);
        self.colors.copy_from_slice(&snapshot.colors);
        self.bounds.set(None);
        self.recompute_normals();
    }

    /// Bounding sphere of the current positions, computed on first use after
    /// any position change.
    pub fn bounds(&self) -> BoundingSphere {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        self.compute_bounds()
    }

    /// Recompute and cache the bounding sphere.
    pub fn compute_bounds(&self) -> BoundingSphere {
        let bounds = BoundingSphere::from_points(&self.positions);
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Whether the bounding sphere cache is currently valid.
    pub fn has_cached_bounds(&self) -> bool {
        self.bounds.get().is_some()
    }
}
