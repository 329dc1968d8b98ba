//! UV sphere tessellation used as the initial sculpting surface.
//!
//! Vertices are laid out row by row from the +Y pole to the -Y pole with
//! `width_segments + 1` vertices per row (the seam column is duplicated so
//! each row wraps cleanly). Pole rows emit a single triangle per quad, which
//! leaves one seam copy of each pole unreferenced by any face; those two
//! vertices keep a zero normal.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use tracing::debug;

use crate::constants::BASE_VERTEX_GREY;
use crate::error::Result;
use crate::mesh::MeshBuffer;

/// Minimum segments around the equator.
pub const MIN_WIDTH_SEGMENTS: u32 = 3;
/// Minimum segments from pole to pole.
pub const MIN_HEIGHT_SEGMENTS: u32 = 2;
/// Maximum segments in either direction.
pub const MAX_SEGMENTS: u32 = 1024;

/// Parameters of the generated sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub base_color: Vec3,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 2.0,
            width_segments: 200,
            height_segments: 200,
            base_color: Vec3::splat(BASE_VERTEX_GREY),
        }
    }
}

impl SphereParams {
    /// Sphere with the given radius and an equal number of segments both ways.
    pub fn new(radius: f32, segments: u32) -> Self {
        Self {
            radius,
            width_segments: segments,
            height_segments: segments,
            ..Default::default()
        }
    }

    /// Number of vertices the tessellation will produce.
    pub fn vertex_count(&self) -> usize {
        let (w, h) = self.clamped_segments();
        (w as usize + 1) * (h as usize + 1)
    }

    fn clamped_segments(&self) -> (u32, u32) {
        (
            self.width_segments.clamp(MIN_WIDTH_SEGMENTS, MAX_SEGMENTS),
            self.height_segments.clamp(MIN_HEIGHT_SEGMENTS, MAX_SEGMENTS),
        )
    }
}

/// Generate sphere positions and triangles.
pub fn sphere_geometry(params: &SphereParams) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let (width, height) = params.clamped_segments();
    let row_len = width + 1;

    let mut positions = Vec::with_capacity(params.vertex_count());
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let theta = v * PI;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let phi = u * TAU;
            positions.push(Vec3::new(
                -params.radius * phi.cos() * theta.sin(),
                params.radius * theta.cos(),
                params.radius * phi.sin() * theta.sin(),
            ));
        }
    }

    let mut faces = Vec::with_capacity(width as usize * height as usize * 2);
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row_len + ix + 1;
            let b = iy * row_len + ix;
            let c = (iy + 1) * row_len + ix;
            let d = (iy + 1) * row_len + ix + 1;

            if iy != 0 {
                faces.push([a, b, d]);
            }
            if iy != height - 1 {
                faces.push([b, c, d]);
            }
        }
    }

    (positions, faces)
}

/// Build a ready-to-sculpt sphere mesh.
pub fn build_sphere(params: &SphereParams) -> Result<MeshBuffer> {
    let (positions, faces) = sphere_geometry(params);
    debug!(
        "Building sphere: radius={}, vertices={}, faces={}",
        params.radius,
        positions.len(),
        faces.len()
    );
    MeshBuffer::new(positions, faces, params.base_color)
}
