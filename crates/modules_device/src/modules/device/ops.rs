//! Device Operations
//!
//! Deno ops for the PDL bindings. Each op validates its arguments,
//! forwards to the installed SDK backend, and maps failures to thrown
//! exceptions carrying the native error string.

use deno_core::{error::CoreError, op2};
use sdk::{Orientation, ScreenMetrics, SdkError, backend, events, hardware};
use std::io::{Error as IoError, ErrorKind};

use super::handlers;

fn sdk_error(err: SdkError) -> CoreError {
    let kind = match err {
        SdkError::InvalidArgument(_) => ErrorKind::InvalidInput,
        SdkError::Native { .. } => ErrorKind::Other,
    };
    IoError::new(kind, err.to_string()).into()
}

#[op2(fast)]
pub fn op_device_init(flags: u32) -> Result<(), CoreError> {
    backend().init(flags).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_quit() {
    backend().quit();
}

#[op2(fast)]
pub fn op_device_banner_messages_enable(enable: bool) -> Result<(), CoreError> {
    backend().banner_messages_enable(enable).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_custom_pause_ui_enable(enable: bool) -> Result<(), CoreError> {
    backend().custom_pause_ui_enable(enable).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_enable_compass(activate: bool) -> Result<(), CoreError> {
    backend().enable_compass(activate).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_enable_location_tracking(activate: bool) -> Result<(), CoreError> {
    backend()
        .enable_location_tracking(activate)
        .map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_gestures_enable(enable: bool) -> Result<(), CoreError> {
    backend().gestures_enable(enable).map_err(sdk_error)
}

#[op2]
#[string]
pub fn op_device_get_data_file_path(#[string] name: String) -> Result<String, CoreError> {
    backend().data_file_path(&name).map_err(sdk_error)
}

#[op2]
#[string]
pub fn op_device_get_device_name() -> Result<String, CoreError> {
    backend().device_name().map_err(sdk_error)
}

#[op2]
#[string]
pub fn op_device_get_language() -> Result<String, CoreError> {
    backend().language().map_err(sdk_error)
}

#[op2(fast)]
#[smi]
pub fn op_device_get_pdk_version() -> i32 {
    backend().pdk_version()
}

#[op2]
#[string]
pub fn op_device_get_region_country_code() -> Result<String, CoreError> {
    backend().region_country_code().map_err(sdk_error)
}

#[op2]
#[serde]
pub fn op_device_get_screen_metrics() -> Result<ScreenMetrics, CoreError> {
    backend().screen_metrics().map_err(sdk_error)
}

#[op2(fast)]
#[smi]
pub fn op_device_get_hardware_id() -> i32 {
    backend().hardware_id()
}

#[op2]
#[string]
pub fn op_device_get_unique_id() -> Result<String, CoreError> {
    backend().unique_id().map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_is_plugin() -> bool {
    backend().is_plugin()
}

#[op2(fast)]
pub fn op_device_launch_browser(#[string] url: &str) -> Result<(), CoreError> {
    backend().launch_browser(url).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_launch_email(
    #[string] subject: &str,
    #[string] body: &str,
) -> Result<(), CoreError> {
    backend().launch_email(subject, body).map_err(sdk_error)
}

#[op2]
pub fn op_device_launch_email_to(
    #[string] subject: String,
    #[string] body: String,
    #[serde] recipients: Vec<String>,
) -> Result<(), CoreError> {
    backend()
        .launch_email_to(&subject, &body, &recipients)
        .map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_minimize() -> Result<(), CoreError> {
    backend().minimize().map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_notify_music_playing(playing: bool) -> Result<(), CoreError> {
    backend().notify_music_playing(playing).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_screen_timeout_enable(enable: bool) -> Result<(), CoreError> {
    backend().screen_timeout_enable(enable).map_err(sdk_error)
}

/// Only 0, 90, 180 and 270 reach the native call.
#[op2(fast)]
pub fn op_device_set_orientation(degrees: i32) -> Result<(), CoreError> {
    let orientation = Orientation::from_degrees(degrees).map_err(sdk_error)?;
    backend().set_orientation(orientation).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_vibrate(period_ms: i32, duration_ms: i32) -> Result<(), CoreError> {
    backend().vibrate(period_ms, duration_ms).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_set_firewall_port_status(port: u16, open: bool) -> Result<(), CoreError> {
    backend()
        .set_firewall_port_status(port, open)
        .map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_set_keyboard_state(visible: bool) -> Result<(), CoreError> {
    backend().set_keyboard_state(visible).map_err(sdk_error)
}

#[op2(fast)]
pub fn op_device_js_registration_complete() -> Result<(), CoreError> {
    backend().js_registration_complete().map_err(sdk_error)
}

#[op2]
pub fn op_device_call_js(
    #[string] name: String,
    #[serde] args: Vec<String>,
) -> Result<(), CoreError> {
    backend().call_js(&name, &args).map_err(sdk_error)
}

/// Register `name` in the handler table, then hand the shared router
/// to the SDK. The JS function itself stays in the script realm.
#[op2(fast)]
pub fn op_device_register_handler(#[string] name: &str) -> Result<(), CoreError> {
    handlers::register(name);
    backend()
        .register_polling_handler(name, handlers::router)
        .map_err(sdk_error)
}

/// Let the SDK deliver pending calls through the router. Returns how
/// many it handled; the queued dispatches are picked up by
/// `op_device_drain_js_calls`.
#[op2(fast)]
#[smi]
pub fn op_device_pump_js_calls() -> Result<u32, CoreError> {
    backend().handle_js_calls().map_err(sdk_error)
}

#[op2]
#[serde]
pub fn op_device_drain_js_calls() -> Vec<handlers::JsDispatch> {
    handlers::drain()
}

/// Numeric constants from the PDL headers, spread onto the JS module.
#[op2]
#[serde]
pub fn op_device_constants() -> serde_json::Value {
    serde_json::json!({
        "HARDWARE_UNKNOWN": hardware::UNKNOWN,
        "HARDWARE_PRE": hardware::PRE,
        "HARDWARE_PRE_PLUS": hardware::PRE_PLUS,
        "HARDWARE_PIXI": hardware::PIXI,
        "HARDWARE_VEER": hardware::VEER,
        "HARDWARE_PRE_2": hardware::PRE_2,
        "HARDWARE_PRE_3": hardware::PRE_3,
        "HARDWARE_TOUCHPAD": hardware::TOUCHPAD,
        "GPS_UPDATE": events::GPS_UPDATE,
        "GPS_FAILURE": events::GPS_FAILURE,
        "COMPASS": events::COMPASS,
    })
}
