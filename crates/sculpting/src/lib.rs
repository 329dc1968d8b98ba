//! Brush-based mesh sculpting core.
//!
//! This crate provides the editing half of a browser sculpting tool:
//! - A fixed-topology vertex buffer with snapshot/restore
//! - Quadratic and cubic brush falloff
//! - Five tools (Standard, Smooth, Flatten, Pinch, Paint)
//! - Bounded undo/redo over full snapshots
//! - A stroke controller tying input events to the above
//! - OBJ export and ray picking
//!
//! # Architecture
//!
//! Every brush stamp is a brute-force pass over all vertices; there is no
//! spatial index. History stores full copies of positions and colors, one per
//! completed stroke, capped at [`constants::MAX_HISTORY`].
//!
//! ## Key Components
//!
//! - **Mesh**: live position/normal/color arrays and immutable faces
//! - **Falloff**: per-vertex brush weight
//! - **Tools**: per-tool displacement and color blending
//! - **History**: snapshot stack with branch truncation
//! - **Stroke**: [`SculptSession`], the control surface used by the UI

pub mod brush;
pub mod constants;
pub mod error;
pub mod export;
pub mod falloff;
pub mod history;
pub mod mesh;
pub mod raycast;
pub mod sphere;
pub mod stroke;
pub mod tools;
pub mod types;

pub use brush::{Brush, BrushLimits, parse_hex_color, to_hex_color};
pub use error::{Result, SculptError};
pub use export::{export_file_name, export_obj};
pub use falloff::{FalloffCurve, FalloffSample, evaluate};
pub use history::{HistoryManager, HistoryState};
pub use mesh::{BoundingSphere, MeshBuffer, MeshSnapshot};
pub use raycast::{SurfaceHit, pick};
pub use sphere::{SphereParams, build_sphere};
pub use stroke::{CameraControl, HistoryOutcome, NavigationGate, SculptSession, StrokeSummary};
pub use tools::{PlaneEstimate, StampResult, apply_stamp};
pub use types::{MaterialPreset, ToolType};
