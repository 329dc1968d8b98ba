//! IPC message protocol for the sculpting app
//!
//! Defines the JSON messages exchanged between the browser UI and the sculpt
//! core. Both directions use adjacently tagged enums
//! (`{"type": ..., "data": ...}`).

pub mod error;
pub mod input;
pub mod messages;

pub use error::IpcError;
pub use input::{KeyboardEvent, Modifiers, Shortcut};
pub use messages::{
    BrushState, ERROR_INVALID_BRUSH, ERROR_INVALID_COLOR, MaterialKind, SculptTool, SculptToUi,
    UiToSculpt,
};
