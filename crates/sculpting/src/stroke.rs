//! Stroke controller and the control surface exposed to the UI layer.
//!
//! [`SculptSession`] owns the mesh, the brush, and the history. A stroke is
//! `begin_stroke` (disables camera navigation, stamps once), any number of
//! `perform_stroke` samples (one stamp each, no debouncing), then `end_stroke`
//! (re-enables navigation, commits unconditionally).
//!
//! Undo and redo are refused while a stroke is in progress: the session
//! returns [`HistoryOutcome::Blocked`] and touches neither the mesh nor the
//! history.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::brush::{Brush, BrushLimits};
use crate::error::Result;
use crate::export::export_obj;
use crate::history::{HistoryManager, HistoryState};
use crate::mesh::MeshBuffer;
use crate::raycast::{SurfaceHit, pick};
use crate::sphere::{SphereParams, build_sphere};
use crate::tools::{StampResult, apply_stamp};
use crate::types::{MaterialPreset, ToolType};

/// Receives camera navigation enable/disable transitions.
pub trait CameraControl {
    fn set_camera_enabled(&mut self, enabled: bool);
}

/// Tracks whether camera navigation may respond to pointer drags.
#[derive(Default)]
pub struct NavigationGate {
    disabled: bool,
    observer: Option<Box<dyn CameraControl>>,
}

impl std::fmt::Debug for NavigationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGate")
            .field("enabled", &self.is_enabled())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl NavigationGate {
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn set_observer(&mut self, observer: Box<dyn CameraControl>) {
        self.observer = Some(observer);
    }

    /// Change the enabled state; the observer only hears actual transitions.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.is_enabled() == enabled {
            return;
        }
        self.disabled = !enabled;
        if let Some(observer) = self.observer.as_mut() {
            observer.set_camera_enabled(enabled);
        }
    }
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryOutcome {
    /// The mesh was restored from another snapshot
    Applied,
    /// Already at the oldest (undo) or newest (redo) snapshot
    AtLimit,
    /// A stroke is in progress
    Blocked,
}

impl HistoryOutcome {
    pub fn changed(self) -> bool {
        self == HistoryOutcome::Applied
    }
}

/// Totals reported when a stroke is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeSummary {
    /// History index of the snapshot created by this stroke
    pub snapshot_index: usize,
    /// History length after the commit
    pub history_len: usize,
    /// In-sphere vertex count summed over every stamp
    pub vertices_affected: usize,
    /// Number of stamps applied, including the initial contact
    pub stamps: usize,
}

#[derive(Debug, Default)]
struct ActiveStroke {
    stamps: usize,
    vertices_affected: usize,
}

impl ActiveStroke {
    fn record(&mut self, stamp: &StampResult) {
        self.stamps += 1;
        self.vertices_affected += stamp.vertices_affected;
    }
}

/// Interactive sculpting session over one mesh.
#[derive(Debug)]
pub struct SculptSession {
    mesh: MeshBuffer,
    brush: Brush,
    limits: BrushLimits,
    history: HistoryManager,
    /// Mesh local-to-world transform
    transform: Affine3A,
    /// Cached inverse for world-to-local conversion
    inverse_transform: Affine3A,
    navigation: NavigationGate,
    active_stroke: Option<ActiveStroke>,
}

impl SculptSession {
    /// Start a session on `mesh` with default brush and history depth.
    pub fn new(mesh: MeshBuffer) -> Self {
        Self::with_history(mesh, HistoryManager::default())
    }

    /// Start a session with a caller-supplied (typically sized) history.
    ///
    /// The history is reset to the mesh's current state.
    pub fn with_history(mesh: MeshBuffer, mut history: HistoryManager) -> Self {
        history.capture_initial(&mesh);
        info!(
            "Sculpt session: {} vertices, {} faces, history depth {}",
            mesh.vertex_count(),
            mesh.face_count(),
            history.capacity()
        );
        Self {
            mesh,
            brush: Brush::default(),
            limits: BrushLimits::default(),
            history,
            transform: Affine3A::IDENTITY,
            inverse_transform: Affine3A::IDENTITY,
            navigation: NavigationGate::default(),
            active_stroke: None,
        }
    }

    /// Build the sphere described by `params` and start a session on it.
    pub fn from_sphere(params: &SphereParams, history_depth: usize) -> Result<Self> {
        let mesh = build_sphere(params)?;
        Ok(Self::with_history(mesh, HistoryManager::new(history_depth)))
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn limits(&self) -> &BrushLimits {
        &self.limits
    }

    pub fn transform(&self) -> Affine3A {
        self.transform
    }

    pub fn camera_enabled(&self) -> bool {
        self.navigation.is_enabled()
    }

    pub fn is_stroke_active(&self) -> bool {
        self.active_stroke.is_some()
    }

    /// Register a listener for camera enable/disable transitions.
    pub fn set_camera_observer(&mut self, observer: Box<dyn CameraControl>) {
        self.navigation.set_observer(observer);
    }

    /// Set the mesh local-to-world transform used to map stroke points.
    pub fn set_transform(&mut self, transform: Affine3A) {
        self.transform = transform;
        self.inverse_transform = transform.inverse();
    }

    // ---- Brush settings ----

    /// Replace the whole brush after validating it and clamping to the limits.
    pub fn set_brush(&mut self, mut brush: Brush) -> Result<()> {
        brush.validate()?;
        brush.clamp_to(&self.limits);
        self.brush = brush;
        Ok(())
    }

    /// Replace the slider limits and re-clamp the current brush.
    pub fn set_limits(&mut self, limits: BrushLimits) {
        self.limits = limits;
        self.brush.clamp_to(&self.limits);
    }

    pub fn set_tool(&mut self, tool: ToolType) {
        debug!("Brush tool: {}", tool.label());
        self.brush.tool = tool;
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.brush.set_radius(radius)?;
        self.brush.clamp_to(&self.limits);
        Ok(())
    }

    pub fn set_intensity(&mut self, intensity: f32) -> Result<()> {
        self.brush.set_intensity(intensity)?;
        self.brush.clamp_to(&self.limits);
        Ok(())
    }

    pub fn set_paint_color(&mut self, hex: &str) -> Result<()> {
        self.brush.set_paint_hex(hex)
    }

    pub fn set_mesh_tint(&mut self, hex: &str) -> Result<()> {
        self.brush.set_tint_hex(hex)
    }

    pub fn set_material(&mut self, material: MaterialPreset) {
        self.brush.material = material;
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.brush.wireframe = wireframe;
    }

    // ---- Stroke lifecycle ----

    /// Start a stroke at `world_point` and apply the first stamp there.
    ///
    /// A stroke already in progress is committed first.
    pub fn begin_stroke(&mut self, world_point: Vec3) -> StampResult {
        if self.active_stroke.is_some() {
            warn!("begin_stroke while a stroke is active; committing the previous stroke");
            self.end_stroke();
        }

        self.navigation.set_enabled(false);
        let mut stroke = ActiveStroke::default();
        let result = self.stamp(world_point);
        stroke.record(&result);
        self.active_stroke = Some(stroke);

        debug!(
            "Stroke begin: tool={}, radius={}, intensity={}",
            self.brush.tool.label(),
            self.brush.radius,
            self.brush.intensity
        );
        result
    }

    /// Apply one stamp at `world_point` for the active stroke.
    ///
    /// Returns `None` when no stroke is active.
    pub fn perform_stroke(&mut self, world_point: Vec3) -> Option<StampResult> {
        if self.active_stroke.is_none() {
            trace!("perform_stroke ignored: no active stroke");
            return None;
        }

        let result = self.stamp(world_point);
        if let Some(stroke) = self.active_stroke.as_mut() {
            stroke.record(&result);
        }
        Some(result)
    }

    /// Finish the active stroke, re-enable navigation, and commit a snapshot.
    ///
    /// The commit happens even if no vertex was touched. Returns `None` when
    /// no stroke is active.
    pub fn end_stroke(&mut self) -> Option<StrokeSummary> {
        let stroke = self.active_stroke.take()?;

        self.navigation.set_enabled(true);
        self.history.commit(&self.mesh);
        self.mesh.compute_bounds();

        let summary = StrokeSummary {
            snapshot_index: self.history.pointer(),
            history_len: self.history.len(),
            vertices_affected: stroke.vertices_affected,
            stamps: stroke.stamps,
        };
        debug!(
            "Stroke end: {} stamps, {} vertex hits, snapshot {}/{}",
            summary.stamps,
            summary.vertices_affected,
            summary.snapshot_index + 1,
            summary.history_len
        );
        Some(summary)
    }

    /// Abandon the active stroke, restoring the last committed state.
    ///
    /// Returns false when no stroke is active.
    pub fn cancel_stroke(&mut self) -> bool {
        if self.active_stroke.take().is_none() {
            return false;
        }

        self.history.revert(&mut self.mesh);
        self.navigation.set_enabled(true);
        debug!("Stroke cancelled");
        true
    }

    fn stamp(&mut self, world_point: Vec3) -> StampResult {
        let local = self.inverse_transform.transform_point3(world_point);
        apply_stamp(&mut self.mesh, &self.brush, local)
    }

    // ---- History ----

    pub fn undo(&mut self) -> HistoryOutcome {
        if self.active_stroke.is_some() {
            debug!("Undo refused: stroke in progress");
            return HistoryOutcome::Blocked;
        }
        if self.history.undo(&mut self.mesh) {
            HistoryOutcome::Applied
        } else {
            HistoryOutcome::AtLimit
        }
    }

    pub fn redo(&mut self) -> HistoryOutcome {
        if self.active_stroke.is_some() {
            debug!("Redo refused: stroke in progress");
            return HistoryOutcome::Blocked;
        }
        if self.history.redo(&mut self.mesh) {
            HistoryOutcome::Applied
        } else {
            HistoryOutcome::AtLimit
        }
    }

    // ---- Queries ----

    /// Serialize the live mesh as OBJ text.
    pub fn export_current_state(&self) -> String {
        if self.is_stroke_active() {
            warn!("Exporting while a stroke is in progress");
        }
        let obj = export_obj(&self.mesh);
        info!(
            "Exported {} vertices, {} faces ({} bytes)",
            self.mesh.vertex_count(),
            self.mesh.face_count(),
            obj.len()
        );
        obj
    }

    /// Pick the mesh surface with a world-space ray. The hit is in world space.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<SurfaceHit> {
        let local_origin = self.inverse_transform.transform_point3(ray_origin);
        let local_dir = self.inverse_transform.transform_vector3(ray_dir);
        let hit = pick(&self.mesh, local_origin, local_dir)?;

        Some(SurfaceHit {
            point: self.transform.transform_point3(hit.point),
            normal: self.transform.transform_vector3(hit.normal).normalize_or_zero(),
            ..hit
        })
    }
}
