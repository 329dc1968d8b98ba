//! Error types for the sculpting core.
//!
//! Only the configuration edges can fail: building a mesh from external data
//! and validating brush settings coming from the UI. Everything past those
//! edges is total over valid input.

use thiserror::Error;

/// Errors raised while configuring a brush or constructing a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SculptError {
    #[error("Brush radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Brush intensity must be positive and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("Invalid color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Mesh has no vertices")]
    EmptyMesh,
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, SculptError>;
