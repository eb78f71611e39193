//! Recording mock backend
//!
//! Stands in for the PDL library everywhere the `device` feature is
//! off. Records every call with its marshaled arguments, returns
//! values from a configurable profile, and can be programmed to fail
//! any call with a given message. Pending JS calls queued with
//! `queue_js_call` are delivered through the registered router when
//! `handle_js_calls` runs, mirroring the native polling flow.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::backend::{DeviceSdk, JsRouter, install};
use crate::error::{SdkError, SdkResult};
use crate::types::{Orientation, ScreenMetrics, hardware};

/// The values the mock device reports.
#[derive(Debug, Clone)]
pub struct MockProfile {
    pub device_name: String,
    pub language: String,
    pub region_country_code: String,
    pub unique_id: String,
    pub data_root: String,
    pub pdk_version: i32,
    pub hardware_id: i32,
    pub is_plugin: bool,
    pub screen_metrics: ScreenMetrics,
}

impl Default for MockProfile {
    fn default() -> Self {
        Self {
            device_name: "Emulator".to_string(),
            language: "en_US".to_string(),
            region_country_code: "US".to_string(),
            unique_id: "mock-0000-0000".to_string(),
            data_root: "/media/internal".to_string(),
            pdk_version: 200,
            hardware_id: hardware::UNKNOWN,
            is_plugin: false,
            screen_metrics: ScreenMetrics {
                horizontal_pixels: 1024,
                vertical_pixels: 768,
                horizontal_dpi: 132,
                vertical_dpi: 132,
                aspect_ratio: 4.0 / 3.0,
            },
        }
    }
}

#[derive(Default)]
pub struct MockSdk {
    profile: Mutex<MockProfile>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, String>>,
    routers: Mutex<HashMap<String, JsRouter>>,
    queued: Mutex<VecDeque<(String, Vec<String>)>>,
}

impl MockSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh mock and make it the process-wide backend.
    pub fn install() -> Arc<MockSdk> {
        let mock = Arc::new(MockSdk::new());
        install(mock.clone());
        mock
    }

    /// Every call recorded so far, in order, with marshaled arguments.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Adjust the values the mock device reports.
    pub fn configure(&self, f: impl FnOnce(&mut MockProfile)) {
        f(&mut self.profile.lock().unwrap());
    }

    /// Make `call` fail with `message` until reprogrammed.
    pub fn fail_with(&self, call: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(call.to_string(), message.to_string());
    }

    /// Queue a pending native-to-JS call for the next `handle_js_calls`.
    pub fn queue_js_call(&self, name: &str, args: &[&str]) {
        self.queued.lock().unwrap().push_back((
            name.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
    }

    /// Handler names currently registered with the mock, sorted.
    pub fn registered_handlers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.routers.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, call: &str) -> SdkResult<()> {
        if let Some(message) = self.failures.lock().unwrap().get(call) {
            return Err(SdkError::Native {
                call: call.to_string(),
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn forward(&self, call: &str, rendered: String) -> SdkResult<()> {
        self.record(rendered);
        self.check(call)
    }
}

impl DeviceSdk for MockSdk {
    fn init(&self, flags: u32) -> SdkResult<()> {
        self.forward("init", format!("init({flags})"))
    }

    fn quit(&self) {
        self.record("quit()".to_string());
    }

    fn banner_messages_enable(&self, enable: bool) -> SdkResult<()> {
        self.forward(
            "banner_messages_enable",
            format!("banner_messages_enable({enable})"),
        )
    }

    fn custom_pause_ui_enable(&self, enable: bool) -> SdkResult<()> {
        self.forward(
            "custom_pause_ui_enable",
            format!("custom_pause_ui_enable({enable})"),
        )
    }

    fn enable_compass(&self, activate: bool) -> SdkResult<()> {
        self.forward("enable_compass", format!("enable_compass({activate})"))
    }

    fn enable_location_tracking(&self, activate: bool) -> SdkResult<()> {
        self.forward(
            "enable_location_tracking",
            format!("enable_location_tracking({activate})"),
        )
    }

    fn gestures_enable(&self, enable: bool) -> SdkResult<()> {
        self.forward("gestures_enable", format!("gestures_enable({enable})"))
    }

    fn notify_music_playing(&self, playing: bool) -> SdkResult<()> {
        self.forward(
            "notify_music_playing",
            format!("notify_music_playing({playing})"),
        )
    }

    fn screen_timeout_enable(&self, enable: bool) -> SdkResult<()> {
        self.forward(
            "screen_timeout_enable",
            format!("screen_timeout_enable({enable})"),
        )
    }

    fn set_keyboard_state(&self, visible: bool) -> SdkResult<()> {
        self.forward(
            "set_keyboard_state",
            format!("set_keyboard_state({visible})"),
        )
    }

    fn data_file_path(&self, name: &str) -> SdkResult<String> {
        self.forward("data_file_path", format!("data_file_path({name})"))?;
        let root = self.profile.lock().unwrap().data_root.clone();
        Ok(format!("{root}/{name}"))
    }

    fn device_name(&self) -> SdkResult<String> {
        self.forward("device_name", "device_name()".to_string())?;
        Ok(self.profile.lock().unwrap().device_name.clone())
    }

    fn language(&self) -> SdkResult<String> {
        self.forward("language", "language()".to_string())?;
        Ok(self.profile.lock().unwrap().language.clone())
    }

    fn region_country_code(&self) -> SdkResult<String> {
        self.forward("region_country_code", "region_country_code()".to_string())?;
        Ok(self.profile.lock().unwrap().region_country_code.clone())
    }

    fn unique_id(&self) -> SdkResult<String> {
        self.forward("unique_id", "unique_id()".to_string())?;
        Ok(self.profile.lock().unwrap().unique_id.clone())
    }

    fn screen_metrics(&self) -> SdkResult<ScreenMetrics> {
        self.forward("screen_metrics", "screen_metrics()".to_string())?;
        Ok(self.profile.lock().unwrap().screen_metrics)
    }

    fn pdk_version(&self) -> i32 {
        self.record("pdk_version()".to_string());
        self.profile.lock().unwrap().pdk_version
    }

    fn hardware_id(&self) -> i32 {
        self.record("hardware_id()".to_string());
        self.profile.lock().unwrap().hardware_id
    }

    fn is_plugin(&self) -> bool {
        self.record("is_plugin()".to_string());
        self.profile.lock().unwrap().is_plugin
    }

    fn launch_browser(&self, url: &str) -> SdkResult<()> {
        self.forward("launch_browser", format!("launch_browser({url})"))
    }

    fn launch_email(&self, subject: &str, body: &str) -> SdkResult<()> {
        self.forward("launch_email", format!("launch_email({subject}, {body})"))
    }

    fn launch_email_to(&self, subject: &str, body: &str, recipients: &[String]) -> SdkResult<()> {
        self.forward(
            "launch_email_to",
            format!(
                "launch_email_to({subject}, {body}, [{}])",
                recipients.join(", ")
            ),
        )
    }

    fn minimize(&self) -> SdkResult<()> {
        self.forward("minimize", "minimize()".to_string())
    }

    fn set_orientation(&self, orientation: Orientation) -> SdkResult<()> {
        self.forward(
            "set_orientation",
            format!("set_orientation({})", orientation.degrees()),
        )
    }

    fn vibrate(&self, period_ms: i32, duration_ms: i32) -> SdkResult<()> {
        self.forward("vibrate", format!("vibrate({period_ms}, {duration_ms})"))
    }

    fn set_firewall_port_status(&self, port: u16, open: bool) -> SdkResult<()> {
        self.forward(
            "set_firewall_port_status",
            format!("set_firewall_port_status({port}, {open})"),
        )
    }

    fn js_registration_complete(&self) -> SdkResult<()> {
        self.forward(
            "js_registration_complete",
            "js_registration_complete()".to_string(),
        )
    }

    fn call_js(&self, name: &str, args: &[String]) -> SdkResult<()> {
        self.forward("call_js", format!("call_js({name}, [{}])", args.join(", ")))
    }

    fn register_polling_handler(&self, name: &str, router: JsRouter) -> SdkResult<()> {
        self.forward(
            "register_polling_handler",
            format!("register_polling_handler({name})"),
        )?;
        self.routers.lock().unwrap().insert(name.to_string(), router);
        Ok(())
    }

    fn handle_js_calls(&self) -> SdkResult<u32> {
        self.forward("handle_js_calls", "handle_js_calls()".to_string())?;

        let pending: Vec<(String, Vec<String>)> =
            self.queued.lock().unwrap().drain(..).collect();
        let routers = self.routers.lock().unwrap().clone();

        let mut handled = 0u32;
        for (name, args) in pending {
            match routers.get(&name) {
                Some(router) => {
                    if router(&name, &args) {
                        handled += 1;
                    }
                }
                None => {
                    tracing::debug!(target: "sdk.mock", "dropping js call for unregistered handler {name}");
                }
            }
        }
        Ok(handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mock = MockSdk::new();
        mock.init(8).unwrap();
        mock.vibrate(100, 500).unwrap();
        assert_eq!(mock.calls(), vec!["init(8)", "vibrate(100, 500)"]);
    }

    #[test]
    fn programmed_failure_carries_call_and_message() {
        let mock = MockSdk::new();
        mock.fail_with("vibrate", "device busy");
        let err = mock.vibrate(1, 2).unwrap_err();
        assert_eq!(err.to_string(), "vibrate: device busy");
        // the call is still recorded before it fails
        assert_eq!(mock.calls(), vec!["vibrate(1, 2)"]);
    }

    #[test]
    fn profile_values_flow_back() {
        let mock = MockSdk::new();
        mock.configure(|profile| {
            profile.device_name = "TouchPad".to_string();
            profile.hardware_id = hardware::TOUCHPAD;
        });
        assert_eq!(mock.device_name().unwrap(), "TouchPad");
        assert_eq!(mock.hardware_id(), hardware::TOUCHPAD);
    }

    #[test]
    fn handle_js_calls_routes_queued_calls() {
        fn accept(_: &str, _: &[String]) -> bool {
            true
        }

        let mock = MockSdk::new();
        mock.register_polling_handler("tick", accept).unwrap();
        mock.queue_js_call("tick", &["1"]);
        mock.queue_js_call("tick", &["2"]);
        mock.queue_js_call("nobody", &[]);

        assert_eq!(mock.handle_js_calls().unwrap(), 2);
        // queue drains even for unregistered names
        assert_eq!(mock.handle_js_calls().unwrap(), 0);
    }

    #[test]
    fn last_handler_registration_wins() {
        fn accept(_: &str, _: &[String]) -> bool {
            true
        }
        fn reject(_: &str, _: &[String]) -> bool {
            false
        }

        let mock = MockSdk::new();
        mock.register_polling_handler("tick", reject).unwrap();
        mock.register_polling_handler("tick", accept).unwrap();
        mock.queue_js_call("tick", &[]);
        assert_eq!(mock.handle_js_calls().unwrap(), 1);
        assert_eq!(mock.registered_handlers(), vec!["tick"]);
    }

    #[test]
    fn data_file_path_joins_profile_root() {
        let mock = MockSdk::new();
        assert_eq!(
            mock.data_file_path("save.dat").unwrap(),
            "/media/internal/save.dat"
        );
    }
}
