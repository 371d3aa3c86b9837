//! Bridge to the page's global `showNotification(message, severity, duration_ms)`
//! toast function. Pages without it get a console line instead.

use js_sys::{Function, Reflect};
use shared::{CalculatorConfig, Notification, Severity};
use wasm_bindgen::{JsCast, JsValue};

use crate::services::logging::Logger;

const GLOBAL_NOTIFY_FN: &str = "showNotification";

pub fn notify(notification: &Notification) {
    if call_global(notification).is_err() {
        Logger::warn_with_component(
            "notify",
            &format!("{}: {}", notification.severity.as_str(), notification.message),
        );
    }
}

pub fn notify_success(message: impl Into<String>) {
    notify(&Notification::success(message));
}

pub fn notify_error(message: impl Into<String>) {
    notify(&Notification::error(message));
}

pub fn notify_with(message: impl Into<String>, severity: Severity) {
    notify(&Notification::new(message, severity));
}

fn call_global(notification: &Notification) -> Result<(), JsValue> {
    let window = gloo::utils::window();
    let function = Reflect::get(&window, &JsValue::from_str(GLOBAL_NOTIFY_FN))?.dyn_into::<Function>()?;
    let duration_ms = CalculatorConfig::default().notification_duration_ms;
    function.call3(
        &JsValue::NULL,
        &JsValue::from_str(&notification.message),
        &JsValue::from_str(notification.severity.as_str()),
        &JsValue::from(duration_ms),
    )?;
    Ok(())
}
