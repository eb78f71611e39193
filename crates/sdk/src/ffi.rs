//! Raw PDL bindings
//!
//! Thin `extern "C"` surface over libpdl plus the `NativeSdk` backend
//! that marshals between it and the trait. String-returning calls go
//! through fixed buffers the way the C API expects; failures read
//! `PDL_GetError` for the message.

#![allow(non_camel_case_types, non_snake_case)]

use std::ffi::{CStr, CString};
use std::sync::OnceLock;

use libc::{c_char, c_int, c_uint};

use crate::backend::{DeviceSdk, JsRouter};
use crate::error::{SdkError, SdkResult};
use crate::types::{Orientation, ScreenMetrics};

type PDL_bool = c_int;
const PDL_TRUE: PDL_bool = 1;
const PDL_FALSE: PDL_bool = 0;

type PDL_Err = c_int;
const PDL_NOERROR: PDL_Err = 0;

#[repr(C)]
struct PDL_ScreenMetrics {
    horizontalPixels: c_int,
    verticalPixels: c_int,
    horizontalDPI: c_int,
    verticalDPI: c_int,
    aspectRatio: f32,
}

/// Opaque parameter block handed to polling handlers.
#[repr(C)]
struct PDL_JSParameters {
    _private: [u8; 0],
}

type PDL_JSHandlerFunc = extern "C" fn(*mut PDL_JSParameters) -> PDL_bool;

#[link(name = "pdl")]
unsafe extern "C" {
    fn PDL_Init(flags: c_uint) -> PDL_Err;
    fn PDL_Quit();
    fn PDL_GetError() -> *const c_char;

    fn PDL_BannerMessagesEnable(enable: PDL_bool) -> PDL_Err;
    fn PDL_CustomPauseUiEnable(enable: PDL_bool) -> PDL_Err;
    fn PDL_EnableCompass(activate: PDL_bool) -> PDL_Err;
    fn PDL_EnableLocationTracking(activate: PDL_bool) -> PDL_Err;
    fn PDL_GesturesEnable(enable: PDL_bool) -> PDL_Err;
    fn PDL_NotifyMusicPlaying(playing: PDL_bool) -> PDL_Err;
    fn PDL_ScreenTimeoutEnable(enable: PDL_bool) -> PDL_Err;
    fn PDL_SetKeyboardState(visible: PDL_bool) -> PDL_Err;

    fn PDL_GetDataFilePath(name: *const c_char, buffer: *mut c_char, len: c_int) -> PDL_Err;
    fn PDL_GetDeviceName(buffer: *mut c_char, len: c_int) -> PDL_Err;
    fn PDL_GetLanguage(buffer: *mut c_char, len: c_int) -> PDL_Err;
    fn PDL_GetRegionCountryCode(buffer: *mut c_char, len: c_int) -> PDL_Err;
    fn PDL_GetUniqueID(buffer: *mut c_char, len: c_int) -> PDL_Err;
    fn PDL_GetScreenMetrics(metrics: *mut PDL_ScreenMetrics) -> PDL_Err;

    fn PDL_GetPDKVersion() -> c_int;
    fn PDL_GetHardwareID() -> c_int;
    fn PDL_IsPlugin() -> PDL_bool;

    fn PDL_LaunchBrowser(url: *const c_char) -> PDL_Err;
    fn PDL_LaunchEmail(subject: *const c_char, body: *const c_char) -> PDL_Err;
    fn PDL_LaunchEmailTo(
        subject: *const c_char,
        body: *const c_char,
        count: c_int,
        recipients: *const *const c_char,
    ) -> PDL_Err;
    fn PDL_Minimize() -> PDL_Err;
    fn PDL_SetOrientation(degrees: c_int) -> PDL_Err;
    fn PDL_Vibrate(period_ms: c_int, duration_ms: c_int) -> PDL_Err;
    fn PDL_SetFirewallPortStatus(port: c_int, open: PDL_bool) -> PDL_Err;

    fn PDL_JSRegistrationComplete() -> PDL_Err;
    fn PDL_CallJS(name: *const c_char, args: *const *const c_char, count: c_int) -> PDL_Err;
    fn PDL_RegisterPollingJSHandler(name: *const c_char, handler: PDL_JSHandlerFunc) -> PDL_Err;
    fn PDL_HandleJSCalls() -> c_int;

    fn PDL_GetJSFunctionName(params: *mut PDL_JSParameters) -> *const c_char;
    fn PDL_GetNumJSParams(params: *mut PDL_JSParameters) -> c_int;
    fn PDL_GetJSParamString(params: *mut PDL_JSParameters, index: c_int) -> *const c_char;
}

// One router for the whole process; PDL keys dispatch by handler name.
static ROUTER: OnceLock<JsRouter> = OnceLock::new();

extern "C" fn js_router_trampoline(params: *mut PDL_JSParameters) -> PDL_bool {
    let Some(router) = ROUTER.get() else {
        return PDL_FALSE;
    };

    let (name, args) = unsafe {
        let name = cstr_to_string(PDL_GetJSFunctionName(params));
        let count = PDL_GetNumJSParams(params).max(0);
        let args = (0..count)
            .map(|i| cstr_to_string(PDL_GetJSParamString(params, i)))
            .collect::<Vec<_>>();
        (name, args)
    };

    if router(&name, &args) { PDL_TRUE } else { PDL_FALSE }
}

unsafe fn cstr_to_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

fn pdl_bool(value: bool) -> PDL_bool {
    if value { PDL_TRUE } else { PDL_FALSE }
}

fn native_error(call: &str) -> SdkError {
    let message = unsafe { cstr_to_string(PDL_GetError()) };
    SdkError::Native {
        call: call.to_string(),
        message,
    }
}

fn check(call: &str, err: PDL_Err) -> SdkResult<()> {
    if err == PDL_NOERROR {
        Ok(())
    } else {
        Err(native_error(call))
    }
}

fn c_string(call: &str, value: &str) -> SdkResult<CString> {
    CString::new(value).map_err(|_| {
        SdkError::InvalidArgument(format!("{call}: argument contains a NUL byte"))
    })
}

fn string_out(
    call: &str,
    f: impl FnOnce(*mut c_char, c_int) -> PDL_Err,
) -> SdkResult<String> {
    let mut buffer = [0 as c_char; 256];
    check(call, f(buffer.as_mut_ptr(), buffer.len() as c_int))?;
    Ok(unsafe { cstr_to_string(buffer.as_ptr()) })
}

/// Backend that forwards every call straight into libpdl.
pub struct NativeSdk;

impl NativeSdk {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceSdk for NativeSdk {
    fn init(&self, flags: u32) -> SdkResult<()> {
        check("init", unsafe { PDL_Init(flags as c_uint) })
    }

    fn quit(&self) {
        unsafe { PDL_Quit() }
    }

    fn banner_messages_enable(&self, enable: bool) -> SdkResult<()> {
        check("banner_messages_enable", unsafe {
            PDL_BannerMessagesEnable(pdl_bool(enable))
        })
    }

    fn custom_pause_ui_enable(&self, enable: bool) -> SdkResult<()> {
        check("custom_pause_ui_enable", unsafe {
            PDL_CustomPauseUiEnable(pdl_bool(enable))
        })
    }

    fn enable_compass(&self, activate: bool) -> SdkResult<()> {
        check("enable_compass", unsafe {
            PDL_EnableCompass(pdl_bool(activate))
        })
    }

    fn enable_location_tracking(&self, activate: bool) -> SdkResult<()> {
        check("enable_location_tracking", unsafe {
            PDL_EnableLocationTracking(pdl_bool(activate))
        })
    }

    fn gestures_enable(&self, enable: bool) -> SdkResult<()> {
        check("gestures_enable", unsafe {
            PDL_GesturesEnable(pdl_bool(enable))
        })
    }

    fn notify_music_playing(&self, playing: bool) -> SdkResult<()> {
        check("notify_music_playing", unsafe {
            PDL_NotifyMusicPlaying(pdl_bool(playing))
        })
    }

    fn screen_timeout_enable(&self, enable: bool) -> SdkResult<()> {
        check("screen_timeout_enable", unsafe {
            PDL_ScreenTimeoutEnable(pdl_bool(enable))
        })
    }

    fn set_keyboard_state(&self, visible: bool) -> SdkResult<()> {
        check("set_keyboard_state", unsafe {
            PDL_SetKeyboardState(pdl_bool(visible))
        })
    }

    fn data_file_path(&self, name: &str) -> SdkResult<String> {
        let name = c_string("data_file_path", name)?;
        string_out("data_file_path", |buffer, len| unsafe {
            PDL_GetDataFilePath(name.as_ptr(), buffer, len)
        })
    }

    fn device_name(&self) -> SdkResult<String> {
        string_out("device_name", |buffer, len| unsafe {
            PDL_GetDeviceName(buffer, len)
        })
    }

    fn language(&self) -> SdkResult<String> {
        string_out("language", |buffer, len| unsafe {
            PDL_GetLanguage(buffer, len)
        })
    }

    fn region_country_code(&self) -> SdkResult<String> {
        string_out("region_country_code", |buffer, len| unsafe {
            PDL_GetRegionCountryCode(buffer, len)
        })
    }

    fn unique_id(&self) -> SdkResult<String> {
        string_out("unique_id", |buffer, len| unsafe {
            PDL_GetUniqueID(buffer, len)
        })
    }

    fn screen_metrics(&self) -> SdkResult<ScreenMetrics> {
        let mut out = PDL_ScreenMetrics {
            horizontalPixels: 0,
            verticalPixels: 0,
            horizontalDPI: 0,
            verticalDPI: 0,
            aspectRatio: 0.0,
        };
        check("screen_metrics", unsafe { PDL_GetScreenMetrics(&mut out) })?;
        Ok(ScreenMetrics {
            horizontal_pixels: out.horizontalPixels,
            vertical_pixels: out.verticalPixels,
            horizontal_dpi: out.horizontalDPI,
            vertical_dpi: out.verticalDPI,
            aspect_ratio: out.aspectRatio as f64,
        })
    }

    fn pdk_version(&self) -> i32 {
        unsafe { PDL_GetPDKVersion() }
    }

    fn hardware_id(&self) -> i32 {
        unsafe { PDL_GetHardwareID() }
    }

    fn is_plugin(&self) -> bool {
        unsafe { PDL_IsPlugin() != PDL_FALSE }
    }

    fn launch_browser(&self, url: &str) -> SdkResult<()> {
        let url = c_string("launch_browser", url)?;
        check("launch_browser", unsafe { PDL_LaunchBrowser(url.as_ptr()) })
    }

    fn launch_email(&self, subject: &str, body: &str) -> SdkResult<()> {
        let subject = c_string("launch_email", subject)?;
        let body = c_string("launch_email", body)?;
        check("launch_email", unsafe {
            PDL_LaunchEmail(subject.as_ptr(), body.as_ptr())
        })
    }

    fn launch_email_to(&self, subject: &str, body: &str, recipients: &[String]) -> SdkResult<()> {
        let subject = c_string("launch_email_to", subject)?;
        let body = c_string("launch_email_to", body)?;
        let recipients = recipients
            .iter()
            .map(|r| c_string("launch_email_to", r))
            .collect::<SdkResult<Vec<_>>>()?;
        let pointers: Vec<*const c_char> = recipients.iter().map(|r| r.as_ptr()).collect();
        check("launch_email_to", unsafe {
            PDL_LaunchEmailTo(
                subject.as_ptr(),
                body.as_ptr(),
                pointers.len() as c_int,
                pointers.as_ptr(),
            )
        })
    }

    fn minimize(&self) -> SdkResult<()> {
        check("minimize", unsafe { PDL_Minimize() })
    }

    fn set_orientation(&self, orientation: Orientation) -> SdkResult<()> {
        check("set_orientation", unsafe {
            PDL_SetOrientation(orientation.degrees())
        })
    }

    fn vibrate(&self, period_ms: i32, duration_ms: i32) -> SdkResult<()> {
        check("vibrate", unsafe { PDL_Vibrate(period_ms, duration_ms) })
    }

    fn set_firewall_port_status(&self, port: u16, open: bool) -> SdkResult<()> {
        check("set_firewall_port_status", unsafe {
            PDL_SetFirewallPortStatus(port as c_int, pdl_bool(open))
        })
    }

    fn js_registration_complete(&self) -> SdkResult<()> {
        check("js_registration_complete", unsafe {
            PDL_JSRegistrationComplete()
        })
    }

    fn call_js(&self, name: &str, args: &[String]) -> SdkResult<()> {
        let name = c_string("call_js", name)?;
        let args = args
            .iter()
            .map(|a| c_string("call_js", a))
            .collect::<SdkResult<Vec<_>>>()?;
        let pointers: Vec<*const c_char> = args.iter().map(|a| a.as_ptr()).collect();
        check("call_js", unsafe {
            PDL_CallJS(name.as_ptr(), pointers.as_ptr(), pointers.len() as c_int)
        })
    }

    fn register_polling_handler(&self, name: &str, router: JsRouter) -> SdkResult<()> {
        let _ = ROUTER.set(router);
        let name = c_string("register_polling_handler", name)?;
        check("register_polling_handler", unsafe {
            PDL_RegisterPollingJSHandler(name.as_ptr(), js_router_trampoline)
        })
    }

    fn handle_js_calls(&self) -> SdkResult<u32> {
        let handled = unsafe { PDL_HandleJSCalls() };
        if handled < 0 {
            return Err(native_error("handle_js_calls"));
        }
        Ok(handled as u32)
    }
}
