//! Sculpt core compiled to WASM
//!
//! The renderer and UI live in JavaScript. This crate exposes a
//! [`SculptApp`] that owns the mesh and history, accepts JSON protocol
//! messages (directly or through the CustomEvent bridge), and hands out the
//! vertex buffers for upload.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use sculpt_config::SculptConfig;
use sculpt_ipc::{Shortcut, UiToSculpt};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod bridge;
pub mod controller;
pub mod error;
pub mod logging;

pub use controller::SculptController;
pub use error::AppError;

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    tracing::info!("Sculpt WASM module loaded");
}

fn to_js(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Sculpting session handle for JavaScript.
#[wasm_bindgen]
pub struct SculptApp {
    controller: Rc<RefCell<SculptController>>,
}

#[wasm_bindgen]
impl SculptApp {
    /// Session with the default configuration plus any `SCULPT_*`
    /// environment overrides (none in the browser).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SculptApp, JsValue> {
        Self::from_config(&SculptConfig::from_env()).map_err(to_js)
    }

    /// Session configured from a JSON `SculptConfig`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<SculptApp, JsValue> {
        let config = SculptConfig::from_json(json).map_err(|e| to_js(e.into()))?;
        Self::from_config(&config).map_err(to_js)
    }

    /// Listen for `sculpt:ui-to-core` events and answer with
    /// `sculpt:core-to-ui`.
    #[wasm_bindgen(js_name = attachBridge)]
    pub fn attach_bridge(&self) -> Result<(), JsValue> {
        #[cfg(target_arch = "wasm32")]
        {
            bridge::attach(self.controller.clone())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(JsValue::from_str("bridge requires a browser"))
        }
    }

    /// Handle one JSON `UiToSculpt` message; returns a JSON array of
    /// `SculptToUi` replies.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, json: &str) -> String {
        self.controller.borrow_mut().handle_json(json)
    }

    #[wasm_bindgen(js_name = beginStroke)]
    pub fn begin_stroke(&self, x: f32, y: f32, z: f32) {
        self.send(UiToSculpt::BeginStroke { point: [x, y, z] });
    }

    #[wasm_bindgen(js_name = moveStroke)]
    pub fn move_stroke(&self, x: f32, y: f32, z: f32) {
        self.send(UiToSculpt::MoveStroke { point: [x, y, z] });
    }

    #[wasm_bindgen(js_name = endStroke)]
    pub fn end_stroke(&self) {
        self.send(UiToSculpt::EndStroke);
    }

    /// Returns whether the mesh changed.
    pub fn undo(&self) -> bool {
        self.history(Shortcut::Undo)
    }

    /// Returns whether the mesh changed.
    pub fn redo(&self) -> bool {
        self.history(Shortcut::Redo)
    }

    /// Current mesh as OBJ text.
    #[wasm_bindgen(js_name = exportObj)]
    pub fn export_obj(&self) -> String {
        self.controller.borrow().session().export_current_state()
    }

    /// Pick the surface under a world-space ray.
    ///
    /// Returns `[px, py, pz, nx, ny, nz]` or `undefined` on a miss.
    pub fn pick(&self, ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> Option<Vec<f32>> {
        let controller = self.controller.borrow();
        let hit = controller
            .session()
            .pick(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz))?;
        let mut out = hit.point.to_array().to_vec();
        out.extend_from_slice(&hit.normal.to_array());
        Some(out)
    }

    // ---- Buffers for the renderer ----

    pub fn positions(&self) -> Vec<f32> {
        self.controller.borrow().session().mesh().position_floats().to_vec()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.controller.borrow().session().mesh().normal_floats().to_vec()
    }

    /// Stored vertex colors (untinted).
    pub fn colors(&self) -> Vec<f32> {
        self.controller.borrow().session().mesh().color_floats().to_vec()
    }

    /// Vertex colors multiplied by the mesh tint, for display.
    #[wasm_bindgen(js_name = displayColors)]
    pub fn display_colors(&self) -> Vec<f32> {
        let controller = self.controller.borrow();
        let session = controller.session();
        let tint = session.brush().mesh_tint;
        let mesh = session.mesh();
        (0..mesh.vertex_count())
            .flat_map(|i| mesh.display_color(i, tint).to_array())
            .collect()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.controller.borrow().session().mesh().index_slice().to_vec()
    }

    // ---- Display material ----

    pub fn roughness(&self) -> f32 {
        self.controller.borrow().session().brush().material.roughness()
    }

    pub fn metalness(&self) -> f32 {
        self.controller.borrow().session().brush().material.metalness()
    }

    pub fn wireframe(&self) -> bool {
        self.controller.borrow().session().brush().wireframe
    }
}

impl SculptApp {
    /// Build from an already parsed config.
    pub fn from_config(config: &SculptConfig) -> Result<SculptApp, AppError> {
        Ok(Self {
            controller: Rc::new(RefCell::new(SculptController::new(config)?)),
        })
    }

    fn send(&self, msg: UiToSculpt) {
        let replies = self.controller.borrow_mut().handle(msg);
        #[cfg(target_arch = "wasm32")]
        for reply in &replies {
            bridge::send_to_ui(reply);
        }
        #[cfg(not(target_arch = "wasm32"))]
        drop(replies);
    }

    fn history(&self, shortcut: Shortcut) -> bool {
        let before = self.controller.borrow().session().history().pointer();
        let msg = match shortcut {
            Shortcut::Undo => UiToSculpt::Undo,
            Shortcut::Redo => UiToSculpt::Redo,
        };
        self.send(msg);
        self.controller.borrow().session().history().pointer() != before
    }
}
