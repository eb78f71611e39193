//! Backend selection
//!
//! One backend serves the whole process. Hosts with the `device`
//! feature get the raw PDL bindings; everything else (and every test)
//! gets the recording mock.

use std::sync::{Arc, RwLock};

use crate::error::SdkResult;
use crate::types::{Orientation, ScreenMetrics};

/// Router installed for native polling-handler dispatch. Called once
/// per pending JS call with the handler name and its stringified
/// parameters; returns whether the call was accepted.
pub type JsRouter = fn(name: &str, args: &[String]) -> bool;

/// The PDL entry points, one method per native call. Implementations
/// own all device behavior; callers only marshal.
pub trait DeviceSdk: Send + Sync {
    fn init(&self, flags: u32) -> SdkResult<()>;
    fn quit(&self);

    fn banner_messages_enable(&self, enable: bool) -> SdkResult<()>;
    fn custom_pause_ui_enable(&self, enable: bool) -> SdkResult<()>;
    fn enable_compass(&self, activate: bool) -> SdkResult<()>;
    fn enable_location_tracking(&self, activate: bool) -> SdkResult<()>;
    fn gestures_enable(&self, enable: bool) -> SdkResult<()>;
    fn notify_music_playing(&self, playing: bool) -> SdkResult<()>;
    fn screen_timeout_enable(&self, enable: bool) -> SdkResult<()>;
    fn set_keyboard_state(&self, visible: bool) -> SdkResult<()>;

    fn data_file_path(&self, name: &str) -> SdkResult<String>;
    fn device_name(&self) -> SdkResult<String>;
    fn language(&self) -> SdkResult<String>;
    fn region_country_code(&self) -> SdkResult<String>;
    fn unique_id(&self) -> SdkResult<String>;
    fn screen_metrics(&self) -> SdkResult<ScreenMetrics>;

    // Infallible in the native API: no error branch exists.
    fn pdk_version(&self) -> i32;
    fn hardware_id(&self) -> i32;
    fn is_plugin(&self) -> bool;

    fn launch_browser(&self, url: &str) -> SdkResult<()>;
    fn launch_email(&self, subject: &str, body: &str) -> SdkResult<()>;
    fn launch_email_to(&self, subject: &str, body: &str, recipients: &[String]) -> SdkResult<()>;
    fn minimize(&self) -> SdkResult<()>;
    fn set_orientation(&self, orientation: Orientation) -> SdkResult<()>;
    fn vibrate(&self, period_ms: i32, duration_ms: i32) -> SdkResult<()>;
    fn set_firewall_port_status(&self, port: u16, open: bool) -> SdkResult<()>;

    fn js_registration_complete(&self) -> SdkResult<()>;
    fn call_js(&self, name: &str, args: &[String]) -> SdkResult<()>;
    fn register_polling_handler(&self, name: &str, router: JsRouter) -> SdkResult<()>;
    fn handle_js_calls(&self) -> SdkResult<u32>;
}

lazy_static::lazy_static! {
    static ref BACKEND: RwLock<Arc<dyn DeviceSdk>> = RwLock::new(default_backend());
}

#[cfg(feature = "device")]
fn default_backend() -> Arc<dyn DeviceSdk> {
    Arc::new(crate::ffi::NativeSdk::new())
}

#[cfg(not(feature = "device"))]
fn default_backend() -> Arc<dyn DeviceSdk> {
    Arc::new(crate::mock::MockSdk::new())
}

/// The currently installed backend.
pub fn backend() -> Arc<dyn DeviceSdk> {
    BACKEND.read().unwrap().clone()
}

/// Replace the process-wide backend. Tests install a fresh mock here.
pub fn install(sdk: Arc<dyn DeviceSdk>) {
    *BACKEND.write().unwrap() = sdk;
}
