//! JavaScript bridge for the sculpting UI
//!
//! Messages are passed via CustomEvents on the window object. The UI
//! dispatches `sculpt:ui-to-core` with a JSON `UiToSculpt` in `detail`; each
//! reply is dispatched back as `sculpt:core-to-ui`.

use std::cell::RefCell;
use std::rc::Rc;

use sculpt_ipc::{SculptToUi, UiToSculpt};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::controller::SculptController;

/// Event the UI dispatches to reach the core
pub const UI_TO_CORE_EVENT: &str = "sculpt:ui-to-core";

/// Event the core dispatches to reach the UI
pub const CORE_TO_UI_EVENT: &str = "sculpt:core-to-ui";

/// Install the window listener that feeds UI events to `controller`.
pub fn attach(controller: Rc<RefCell<SculptController>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            warn!("Ignoring {} event without a string detail", UI_TO_CORE_EVENT);
            return;
        };

        // Release the borrow before dispatching; listeners may call back in.
        let replies = match UiToSculpt::from_json(&detail) {
            Ok(msg) => controller.borrow_mut().handle(msg),
            Err(e) => {
                warn!("Failed to parse UI message: {}", e);
                vec![SculptToUi::error(e.code(), e.to_string())]
            }
        };

        for reply in &replies {
            send_to_ui(reply);
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(UI_TO_CORE_EVENT, closure.as_ref().unchecked_ref())?;

    // Keep the closure alive
    closure.forget();

    info!("Sculpt bridge listening on {}", UI_TO_CORE_EVENT);
    Ok(())
}

/// Dispatch one message to the UI.
pub fn send_to_ui(msg: &SculptToUi) {
    let Some(window) = web_sys::window() else {
        error!("No global window; dropping {:?}", msg);
        return;
    };

    let json = match msg.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize core message: {}", e);
            return;
        }
    };

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));

    let dispatched = web_sys::CustomEvent::new_with_event_init_dict(CORE_TO_UI_EVENT, &init)
        .and_then(|event| window.dispatch_event(&event));
    if let Err(e) = dispatched {
        error!("Failed to dispatch {}: {:?}", CORE_TO_UI_EVENT, e);
    }
}
