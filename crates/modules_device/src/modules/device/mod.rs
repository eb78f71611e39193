//! luna/device Module
//!
//! Bindings over the PDL device library for scripts.
//!
//! Features:
//! - Hardware and locale queries (device name, language, unique id)
//! - Sensor toggles (compass, location tracking, gestures)
//! - Screen orientation, vibration, keyboard state
//! - System messaging (browser, email, banner messages)
//! - Native-to-JS polling handler bridge

mod handlers;
mod ops;

deno_core::extension!(
    luna_device,
    ops = [
        ops::op_device_init,
        ops::op_device_quit,
        ops::op_device_banner_messages_enable,
        ops::op_device_custom_pause_ui_enable,
        ops::op_device_enable_compass,
        ops::op_device_enable_location_tracking,
        ops::op_device_gestures_enable,
        ops::op_device_get_data_file_path,
        ops::op_device_get_device_name,
        ops::op_device_get_language,
        ops::op_device_get_pdk_version,
        ops::op_device_get_region_country_code,
        ops::op_device_get_screen_metrics,
        ops::op_device_get_hardware_id,
        ops::op_device_get_unique_id,
        ops::op_device_is_plugin,
        ops::op_device_launch_browser,
        ops::op_device_launch_email,
        ops::op_device_launch_email_to,
        ops::op_device_minimize,
        ops::op_device_notify_music_playing,
        ops::op_device_screen_timeout_enable,
        ops::op_device_set_orientation,
        ops::op_device_vibrate,
        ops::op_device_set_firewall_port_status,
        ops::op_device_set_keyboard_state,
        ops::op_device_js_registration_complete,
        ops::op_device_call_js,
        ops::op_device_register_handler,
        ops::op_device_pump_js_calls,
        ops::op_device_drain_js_calls,
        ops::op_device_constants,
    ],
    esm_entry_point = "ext:luna_device/device.js",
    esm = [ dir "src/modules/device", "device.js" ],
);

/// Register the device module extension
pub fn init() -> deno_core::Extension {
    luna_device::init()
}
