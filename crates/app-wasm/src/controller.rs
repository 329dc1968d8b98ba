//! Message-driven front end over a [`SculptSession`].
//!
//! Translates `UiToSculpt` messages into session calls and collects the
//! `SculptToUi` replies. Contains no browser types so it runs natively too.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use sculpt_config::SculptConfig;
use sculpt_ipc::{
    BrushState, ERROR_INVALID_BRUSH, ERROR_INVALID_COLOR, MaterialKind, SculptToUi, SculptTool,
    Shortcut, UiToSculpt,
};
use sculpting::{
    Brush, BrushLimits, CameraControl, HistoryManager, HistoryOutcome, MaterialPreset,
    SculptError, SculptSession, SphereParams, StampResult, ToolType, build_sphere,
    export_file_name, parse_hex_color, to_hex_color,
};
use tracing::{debug, error, info, warn};

use crate::error::AppError;

type Outbox = Rc<RefCell<Vec<SculptToUi>>>;

/// Forwards camera enable/disable transitions into the reply queue.
struct CameraRelay(Outbox);

impl CameraControl for CameraRelay {
    fn set_camera_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().push(SculptToUi::CameraControl { enabled });
    }
}

/// Owns the session and turns protocol messages into session calls.
pub struct SculptController {
    session: SculptSession,
    outbox: Outbox,
}

impl SculptController {
    /// Build the starting sphere and brush from `config`.
    pub fn new(config: &SculptConfig) -> Result<Self, AppError> {
        config.validate()?;

        let params = SphereParams::new(config.sphere.radius, config.sphere.segments);
        let mesh = build_sphere(&params)?;
        let mut session =
            SculptSession::with_history(mesh, HistoryManager::new(config.history_depth));

        session.set_limits(BrushLimits {
            min_radius: config.limits.min_radius,
            max_radius: config.limits.max_radius,
            min_intensity: config.limits.min_intensity,
            max_intensity: config.limits.max_intensity,
        });
        session.set_brush(Brush {
            radius: config.brush.radius,
            intensity: config.brush.intensity,
            paint_color: parse_hex_color(&config.brush.paint_color)?,
            mesh_tint: parse_hex_color(&config.brush.mesh_tint)?,
            ..Brush::default()
        })?;

        let outbox: Outbox = Rc::default();
        session.set_camera_observer(Box::new(CameraRelay(outbox.clone())));

        info!(
            "Sculpt controller ready: {} segments, history depth {}",
            config.sphere.segments, config.history_depth
        );
        Ok(Self { session, outbox })
    }

    pub fn session(&self) -> &SculptSession {
        &self.session
    }

    /// Apply one message and return the replies in emission order.
    pub fn handle(&mut self, msg: UiToSculpt) -> Vec<SculptToUi> {
        let mut replies = Vec::new();

        match msg {
            UiToSculpt::BeginStroke { point } => {
                let stamp = self.session.begin_stroke(Vec3::from_array(point));
                push_mesh_changed(&mut replies, &stamp);
            }
            UiToSculpt::MoveStroke { point } => {
                if let Some(stamp) = self.session.perform_stroke(Vec3::from_array(point)) {
                    push_mesh_changed(&mut replies, &stamp);
                }
            }
            UiToSculpt::EndStroke => {
                if self.session.end_stroke().is_some() {
                    replies.push(self.history_changed());
                }
            }
            UiToSculpt::CancelStroke => {
                if self.session.cancel_stroke() {
                    replies.push(SculptToUi::MeshChanged {
                        positions: true,
                        colors: true,
                    });
                }
            }
            UiToSculpt::Undo => self.apply_history(Shortcut::Undo, &mut replies),
            UiToSculpt::Redo => self.apply_history(Shortcut::Redo, &mut replies),
            UiToSculpt::Export => replies.push(self.export()),
            UiToSculpt::SetTool { tool } => {
                self.session.set_tool(tool_from_ipc(tool));
                replies.push(self.brush_updated());
            }
            UiToSculpt::SetRadius { radius } => {
                let result = self.session.set_radius(radius);
                replies.push(self.brush_result(result));
            }
            UiToSculpt::SetIntensity { intensity } => {
                let result = self.session.set_intensity(intensity);
                replies.push(self.brush_result(result));
            }
            UiToSculpt::SetPaintColor { hex } => {
                let result = self.session.set_paint_color(&hex);
                replies.push(self.brush_result(result));
            }
            UiToSculpt::SetMeshTint { hex } => {
                let result = self.session.set_mesh_tint(&hex);
                replies.push(self.brush_result(result));
            }
            UiToSculpt::SetMaterial { material } => {
                self.session.set_material(material_from_ipc(material));
                replies.push(self.brush_updated());
            }
            UiToSculpt::SetWireframe { enabled } => {
                self.session.set_wireframe(enabled);
                replies.push(self.brush_updated());
            }
            UiToSculpt::Key(event) => match Shortcut::from_key(&event) {
                Some(shortcut) => self.apply_history(shortcut, &mut replies),
                None => debug!("Unmapped key: {:?}", event.key),
            },
        }

        // Camera transitions happen inside the session calls above and go first.
        let mut out: Vec<SculptToUi> = self.outbox.borrow_mut().drain(..).collect();
        out.extend(replies);
        out
    }

    /// Decode, handle, and encode in one step for the JS boundary.
    ///
    /// Always returns a JSON array; decode failures become an `Error` reply.
    pub fn handle_json(&mut self, json: &str) -> String {
        let replies = match UiToSculpt::from_json(json) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                warn!("Rejected UI message: {}", e);
                vec![SculptToUi::error(e.code(), e.to_string())]
            }
        };

        match SculptToUi::batch_to_json(&replies) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to encode replies: {}", e);
                "[]".to_string()
            }
        }
    }

    fn apply_history(&mut self, shortcut: Shortcut, replies: &mut Vec<SculptToUi>) {
        let outcome = match shortcut {
            Shortcut::Undo => self.session.undo(),
            Shortcut::Redo => self.session.redo(),
        };

        if outcome == HistoryOutcome::Applied {
            replies.push(SculptToUi::MeshChanged {
                positions: true,
                colors: true,
            });
            replies.push(self.history_changed());
        }
    }

    fn export(&self) -> SculptToUi {
        SculptToUi::Exported {
            file_name: export_file_name(now_ms()),
            contents: self.session.export_current_state(),
        }
    }

    fn history_changed(&self) -> SculptToUi {
        let state = self.session.history_state();
        SculptToUi::HistoryChanged {
            len: state.len,
            pointer: state.pointer,
            can_undo: state.can_undo,
            can_redo: state.can_redo,
        }
    }

    fn brush_result(&self, result: Result<(), SculptError>) -> SculptToUi {
        match result {
            Ok(()) => self.brush_updated(),
            Err(e) => {
                warn!("Rejected brush setting: {}", e);
                let code = match e {
                    SculptError::InvalidColor(_) => ERROR_INVALID_COLOR,
                    _ => ERROR_INVALID_BRUSH,
                };
                SculptToUi::error(code, e.to_string())
            }
        }
    }

    fn brush_updated(&self) -> SculptToUi {
        SculptToUi::BrushUpdated(brush_state(self.session.brush()))
    }
}

fn push_mesh_changed(replies: &mut Vec<SculptToUi>, stamp: &StampResult) {
    if stamp.geometry_changed || stamp.colors_changed {
        replies.push(SculptToUi::MeshChanged {
            positions: stamp.geometry_changed,
            colors: stamp.colors_changed,
        });
    }
}

/// Protocol view of the brush.
pub fn brush_state(brush: &Brush) -> BrushState {
    BrushState {
        tool: tool_to_ipc(brush.tool),
        radius: brush.radius,
        intensity: brush.intensity,
        paint_color: to_hex_color(brush.paint_color),
        mesh_tint: to_hex_color(brush.mesh_tint),
        material: material_to_ipc(brush.material),
        wireframe: brush.wireframe,
    }
}

fn tool_from_ipc(tool: SculptTool) -> ToolType {
    match tool {
        SculptTool::Standard => ToolType::Standard,
        SculptTool::Smooth => ToolType::Smooth,
        SculptTool::Flatten => ToolType::Flatten,
        SculptTool::Pinch => ToolType::Pinch,
        SculptTool::Paint => ToolType::Paint,
    }
}

fn tool_to_ipc(tool: ToolType) -> SculptTool {
    match tool {
        ToolType::Standard => SculptTool::Standard,
        ToolType::Smooth => SculptTool::Smooth,
        ToolType::Flatten => SculptTool::Flatten,
        ToolType::Pinch => SculptTool::Pinch,
        ToolType::Paint => SculptTool::Paint,
    }
}

fn material_from_ipc(material: MaterialKind) -> MaterialPreset {
    match material {
        MaterialKind::Standard => MaterialPreset::Standard,
        MaterialKind::Clay => MaterialPreset::Clay,
        MaterialKind::Metallic => MaterialPreset::Metallic,
    }
}

fn material_to_ipc(material: MaterialPreset) -> MaterialKind {
    match material {
        MaterialPreset::Standard => MaterialKind::Standard,
        MaterialPreset::Clay => MaterialKind::Clay,
        MaterialPreset::Metallic => MaterialKind::Metallic,
    }
}

/// Wall-clock milliseconds for export file names.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculpt_ipc::{KeyboardEvent, Modifiers};

    fn controller() -> SculptController {
        let mut config = SculptConfig::default();
        config.sphere.segments = 16;
        SculptController::new(&config).unwrap()
    }

    const POLE: [f32; 3] = [0.0, 2.0, 0.0];

    #[test]
    fn test_stroke_messages() {
        let mut c = controller();

        let replies = c.handle(UiToSculpt::BeginStroke { point: POLE });
        assert_eq!(replies[0], SculptToUi::CameraControl { enabled: false });
        assert_eq!(
            replies[1],
            SculptToUi::MeshChanged {
                positions: true,
                colors: false
            }
        );

        let replies = c.handle(UiToSculpt::MoveStroke { point: POLE });
        assert_eq!(replies.len(), 1);

        let replies = c.handle(UiToSculpt::EndStroke);
        assert_eq!(
            replies,
            vec![
                SculptToUi::CameraControl { enabled: true },
                SculptToUi::HistoryChanged {
                    len: 2,
                    pointer: 1,
                    can_undo: true,
                    can_redo: false,
                },
            ]
        );
    }

    #[test]
    fn test_stray_messages_produce_no_replies() {
        let mut c = controller();
        assert!(c.handle(UiToSculpt::MoveStroke { point: POLE }).is_empty());
        assert!(c.handle(UiToSculpt::EndStroke).is_empty());
        assert!(c.handle(UiToSculpt::CancelStroke).is_empty());
        assert!(c.handle(UiToSculpt::Undo).is_empty());
    }

    #[test]
    fn test_undo_via_shortcut() {
        let mut c = controller();
        c.handle(UiToSculpt::BeginStroke { point: POLE });
        c.handle(UiToSculpt::EndStroke);

        let key = KeyboardEvent {
            key: "z".to_string(),
            pressed: true,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        };
        let replies = c.handle(UiToSculpt::Key(key));
        assert!(replies.contains(&SculptToUi::HistoryChanged {
            len: 2,
            pointer: 0,
            can_undo: false,
            can_redo: true,
        }));
        assert_eq!(c.session().history().pointer(), 0);
    }

    #[test]
    fn test_undo_refused_mid_stroke() {
        let mut c = controller();
        c.handle(UiToSculpt::BeginStroke { point: POLE });
        c.handle(UiToSculpt::EndStroke);
        c.handle(UiToSculpt::BeginStroke { point: POLE });

        assert!(c.handle(UiToSculpt::Undo).is_empty());
        assert!(c.session().is_stroke_active());
    }

    #[test]
    fn test_brush_settings() {
        let mut c = controller();

        match c.handle(UiToSculpt::SetTool {
            tool: SculptTool::Paint,
        })
        .as_slice()
        {
            [SculptToUi::BrushUpdated(state)] => assert_eq!(state.tool, SculptTool::Paint),
            other => panic!("unexpected replies {other:?}"),
        }

        match c.handle(UiToSculpt::SetRadius { radius: 0.0 }).as_slice() {
            [SculptToUi::Error { code, .. }] => assert_eq!(code, ERROR_INVALID_BRUSH),
            other => panic!("unexpected replies {other:?}"),
        }

        match c
            .handle(UiToSculpt::SetPaintColor {
                hex: "blue".to_string(),
            })
            .as_slice()
        {
            [SculptToUi::Error { code, .. }] => assert_eq!(code, ERROR_INVALID_COLOR),
            other => panic!("unexpected replies {other:?}"),
        }

        c.handle(UiToSculpt::SetMeshTint {
            hex: "#dbeafe".to_string(),
        });
        c.handle(UiToSculpt::SetMaterial {
            material: MaterialKind::Metallic,
        });
        let state = brush_state(c.session().brush());
        assert_eq!(state.mesh_tint, "#dbeafe");
        assert_eq!(state.material, MaterialKind::Metallic);
    }

    #[test]
    fn test_paint_stroke_reports_color_change() {
        let mut c = controller();
        c.handle(UiToSculpt::SetTool {
            tool: SculptTool::Paint,
        });
        let replies = c.handle(UiToSculpt::BeginStroke { point: POLE });
        assert!(replies.contains(&SculptToUi::MeshChanged {
            positions: false,
            colors: true
        }));
    }

    #[test]
    fn test_export_reply() {
        let mut c = controller();
        match c.handle(UiToSculpt::Export).as_slice() {
            [SculptToUi::Exported {
                file_name,
                contents,
            }] => {
                assert!(file_name.starts_with("sculpt_"));
                assert!(file_name.ends_with(".obj"));
                assert!(contents.starts_with("# Os-s Export\no object\n"));
            }
            other => panic!("unexpected replies {other:?}"),
        }
    }

    #[test]
    fn test_handle_json() {
        let mut c = controller();
        let out = c.handle_json(r#"{"type":"SetWireframe","data":{"enabled":true}}"#);
        let replies: Vec<SculptToUi> = serde_json::from_str(&out).unwrap();
        assert!(matches!(&replies[..], [SculptToUi::BrushUpdated(s)] if s.wireframe));

        let out = c.handle_json("{oops");
        let replies: Vec<SculptToUi> = serde_json::from_str(&out).unwrap();
        assert!(matches!(&replies[..], [SculptToUi::Error { code, .. }] if code == "invalid_message"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SculptConfig::default();
        config.brush.paint_color = "red".to_string();
        assert!(matches!(
            SculptController::new(&config),
            Err(AppError::Sculpt(SculptError::InvalidColor(_)))
        ));

        config = SculptConfig::default();
        config.history_depth = 0;
        assert!(matches!(SculptController::new(&config), Err(AppError::Config(_))));
    }
}
