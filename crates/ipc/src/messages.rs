//! Message enums exchanged between the UI and the sculpt core.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::input::KeyboardEvent;

/// Error code for a brush setting the core refused.
pub const ERROR_INVALID_BRUSH: &str = "invalid_brush";
/// Error code for a color string that is not `#rgb` or `#rrggbb`.
pub const ERROR_INVALID_COLOR: &str = "invalid_color";

/// Sculpting tool selectable from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SculptTool {
    #[default]
    Standard,
    Smooth,
    Flatten,
    Pinch,
    Paint,
}

/// Display material preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Standard,
    Clay,
    Metallic,
}

/// Brush state mirrored to the properties panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushState {
    pub tool: SculptTool,
    pub radius: f32,
    pub intensity: f32,
    /// `#rrggbb`
    pub paint_color: String,
    /// `#rrggbb`
    pub mesh_tint: String,
    pub material: MaterialKind,
    pub wireframe: bool,
}

/// Messages from the UI to the sculpt core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToSculpt {
    /// Pointer pressed on the mesh (world-space hit point)
    BeginStroke { point: [f32; 3] },
    /// Pointer dragged while pressed
    MoveStroke { point: [f32; 3] },
    /// Pointer released
    EndStroke,
    /// Pointer capture lost; discard the stroke
    CancelStroke,
    Undo,
    Redo,
    /// Request an OBJ export of the current mesh
    Export,
    SetTool { tool: SculptTool },
    SetRadius { radius: f32 },
    SetIntensity { intensity: f32 },
    SetPaintColor { hex: String },
    SetMeshTint { hex: String },
    SetMaterial { material: MaterialKind },
    SetWireframe { enabled: bool },
    /// Raw key event, mapped to shortcuts by the core
    Key(KeyboardEvent),
}

/// Messages from the sculpt core to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SculptToUi {
    /// Camera orbit controls must be enabled/disabled
    CameraControl { enabled: bool },
    /// Undo stack changed
    HistoryChanged {
        len: usize,
        pointer: usize,
        can_undo: bool,
        can_redo: bool,
    },
    /// Vertex buffers changed and need re-upload
    MeshChanged { positions: bool, colors: bool },
    /// OBJ export ready for download
    Exported { file_name: String, contents: String },
    /// Brush settings after a change was applied
    BrushUpdated(BrushState),
    /// Error notification
    Error { code: String, message: String },
}

impl UiToSculpt {
    /// Decode a single message from JSON.
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        serde_json::from_str(json).map_err(IpcError::Decode)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        serde_json::to_string(self).map_err(IpcError::Encode)
    }
}

impl SculptToUi {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        SculptToUi::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        serde_json::from_str(json).map_err(IpcError::Decode)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        serde_json::to_string(self).map_err(IpcError::Encode)
    }

    /// Encode a batch of replies as a JSON array.
    pub fn batch_to_json(messages: &[SculptToUi]) -> Result<String, IpcError> {
        serde_json::to_string(messages).map_err(IpcError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_message_wire_format() {
        let msg = UiToSculpt::BeginStroke {
            point: [0.0, 2.0, 0.5],
        };
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"BeginStroke","data":{"point":[0.0,2.0,0.5]}}"#
        );
        assert_eq!(UiToSculpt::Undo.to_json().unwrap(), r#"{"type":"Undo"}"#);
    }

    #[test]
    fn test_decode_ui_messages() {
        assert_eq!(
            UiToSculpt::from_json(r#"{"type":"SetTool","data":{"tool":"flatten"}}"#).unwrap(),
            UiToSculpt::SetTool {
                tool: SculptTool::Flatten
            }
        );
        assert_eq!(
            UiToSculpt::from_json(r##"{"type":"SetPaintColor","data":{"hex":"#22c55e"}}"##)
                .unwrap(),
            UiToSculpt::SetPaintColor {
                hex: "#22c55e".to_string()
            }
        );
        assert_eq!(
            UiToSculpt::from_json(r#"{"type":"EndStroke"}"#).unwrap(),
            UiToSculpt::EndStroke
        );
    }

    #[test]
    fn test_decode_key_message() {
        let json = r#"{"type":"Key","data":{"key":"z","pressed":true,"modifiers":{"shift":false,"ctrl":true,"alt":false,"meta":false}}}"#;
        match UiToSculpt::from_json(json).unwrap() {
            UiToSculpt::Key(event) => {
                assert_eq!(event.key, "z");
                assert!(event.modifiers.ctrl);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_message() {
        let err = UiToSculpt::from_json(r#"{"type":"Explode"}"#).unwrap_err();
        assert!(matches!(err, IpcError::Decode(_)));
        assert_eq!(err.code(), "invalid_message");
    }

    #[test]
    fn test_batch_encoding() {
        let json = SculptToUi::batch_to_json(&[
            SculptToUi::CameraControl { enabled: false },
            SculptToUi::error(ERROR_INVALID_COLOR, "bad"),
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"type":"CameraControl","data":{"enabled":false}},{"type":"Error","data":{"code":"invalid_color","message":"bad"}}]"#
        );
    }

    #[test]
    fn test_core_message_round_trip() {
        let msg = SculptToUi::BrushUpdated(BrushState {
            tool: SculptTool::Paint,
            radius: 0.5,
            intensity: 1.0,
            paint_color: "#ef4444".to_string(),
            mesh_tint: "#ffffff".to_string(),
            material: MaterialKind::Clay,
            wireframe: true,
        });
        let json = msg.to_json().unwrap();
        assert!(json.contains(r#""tool":"paint""#));
        assert_eq!(SculptToUi::from_json(&json).unwrap(), msg);
    }
}
