//! End-to-end tests for the device module: a real runtime with the
//! extension loaded, driving the recording mock backend.

use std::sync::{Arc, Mutex, MutexGuard};

use deno_core::{JsRuntime, RuntimeOptions, serde_v8, v8};
use sdk::mock::MockSdk;

// The backend and the handler table are process-wide, so tests that
// install a mock must not interleave.
static GUARD: Mutex<()> = Mutex::new(());

fn setup() -> (MutexGuard<'static, ()>, Arc<MockSdk>, JsRuntime) {
    let guard = GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mock = MockSdk::install();
    let runtime = JsRuntime::new(RuntimeOptions {
        extensions: modules_device::extensions(),
        ..Default::default()
    });
    (guard, mock, runtime)
}

fn eval(runtime: &mut JsRuntime, code: &'static str) -> Result<serde_json::Value, String> {
    match runtime.execute_script("test.js", code) {
        Ok(global) => {
            deno_core::scope!(scope, runtime);
            let local = v8::Local::new(scope, global);
            Ok(serde_v8::from_v8(scope, local).expect("result not serializable"))
        }
        Err(err) => Err(err.to_string()),
    }
}

#[test]
fn getters_return_backend_values() {
    let (_guard, mock, mut runtime) = setup();
    mock.configure(|profile| {
        profile.device_name = "TouchPad Go".to_string();
        profile.language = "de_DE".to_string();
        profile.pdk_version = 300;
    });

    assert_eq!(
        eval(&mut runtime, "device.getDeviceName()").unwrap(),
        "TouchPad Go"
    );
    assert_eq!(eval(&mut runtime, "device.getLanguage()").unwrap(), "de_DE");
    assert_eq!(eval(&mut runtime, "device.getPdkVersion()").unwrap(), 300);
    assert_eq!(eval(&mut runtime, "device.isPlugin()").unwrap(), false);
}

#[test]
fn screen_metrics_come_back_camel_cased() {
    let (_guard, _mock, mut runtime) = setup();
    let metrics = eval(&mut runtime, "device.getScreenMetrics()").unwrap();
    assert_eq!(metrics["horizontalPixels"], 1024);
    assert_eq!(metrics["verticalPixels"], 768);
    assert_eq!(metrics["horizontalDpi"], 132);
}

#[test]
fn calls_forward_with_marshaled_arguments() {
    let (_guard, mock, mut runtime) = setup();
    eval(&mut runtime, "device.init(8)").unwrap();
    eval(&mut runtime, "device.vibrate(100, 500)").unwrap();
    eval(&mut runtime, "device.enableCompass(true)").unwrap();
    eval(&mut runtime, "device.setFirewallPortStatus(8080, true)").unwrap();
    eval(&mut runtime, "device.getDataFilePath('save.dat')").unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            "init(8)",
            "vibrate(100, 500)",
            "enable_compass(true)",
            "set_firewall_port_status(8080, true)",
            "data_file_path(save.dat)",
        ]
    );
}

#[test]
fn orientation_whitelist_is_enforced() {
    let (_guard, mock, mut runtime) = setup();

    eval(&mut runtime, "device.setOrientation(270)").unwrap();
    assert_eq!(mock.calls(), vec!["set_orientation(270)"]);

    let err = eval(&mut runtime, "device.setOrientation(45)").unwrap_err();
    assert!(err.contains("degrees must be 0, 90, 180, or 270"), "{err}");
    // the rejected value never reached the backend
    assert_eq!(mock.calls(), vec!["set_orientation(270)"]);
}

#[test]
fn illegal_orientation_throws_a_type_error() {
    let (_guard, mock, mut runtime) = setup();
    let caught = eval(
        &mut runtime,
        r#"
        (() => {
            try {
                device.setOrientation(45);
                return "no exception";
            } catch (e) {
                return e.constructor.name;
            }
        })()
        "#,
    )
    .unwrap();
    assert_eq!(caught, "TypeError");
    assert!(mock.calls().is_empty());
}

#[test]
fn init_requires_a_numeric_flags_argument() {
    let (_guard, mock, mut runtime) = setup();
    let caught = eval(
        &mut runtime,
        r#"
        (() => {
            try {
                device.init();
                return "no exception";
            } catch (e) {
                return e.constructor.name;
            }
        })()
        "#,
    )
    .unwrap();
    assert_eq!(caught, "TypeError");
    assert!(mock.calls().is_empty());
}

#[test]
fn native_failures_surface_as_exceptions() {
    let (_guard, mock, mut runtime) = setup();
    mock.fail_with("vibrate", "device busy");

    let err = eval(&mut runtime, "device.vibrate(1, 2)").unwrap_err();
    assert!(err.contains("vibrate: device busy"), "{err}");
}

#[test]
fn argument_types_are_validated_before_any_op() {
    let (_guard, mock, mut runtime) = setup();

    let err = eval(&mut runtime, "device.launchBrowser(42)").unwrap_err();
    assert!(err.contains("url must be a string"), "{err}");

    let err = eval(&mut runtime, "device.callJs('f', 'not-an-array')").unwrap_err();
    assert!(err.contains("args must be an array of strings"), "{err}");

    let err = eval(&mut runtime, "device.setFirewallPortStatus(70000, true)").unwrap_err();
    assert!(err.contains("port must be between 0 and 65535"), "{err}");

    assert!(mock.calls().is_empty());
}

#[test]
fn email_recipients_marshal_as_a_list() {
    let (_guard, mock, mut runtime) = setup();
    eval(
        &mut runtime,
        "device.launchEmailTo('hi', 'text', ['a@x.com', 'b@x.com'])",
    )
    .unwrap();
    assert_eq!(
        mock.calls(),
        vec!["launch_email_to(hi, text, [a@x.com, b@x.com])"]
    );
}

#[test]
fn constants_are_exposed_on_the_module() {
    let (_guard, _mock, mut runtime) = setup();
    assert_eq!(eval(&mut runtime, "device.HARDWARE_TOUCHPAD").unwrap(), 601);
    assert_eq!(eval(&mut runtime, "device.HARDWARE_UNKNOWN").unwrap(), -1);
    assert_eq!(eval(&mut runtime, "device.GPS_FAILURE").unwrap(), 2);
}

#[test]
fn polling_handlers_receive_queued_calls() {
    let (_guard, mock, mut runtime) = setup();
    eval(
        &mut runtime,
        r#"
        globalThis.seen = [];
        device.registerPollingHandler('onScore', (a, b) => {
            globalThis.seen.push(`${a}:${b}`);
        });
        device.jsRegistrationComplete();
        "#,
    )
    .unwrap();
    assert_eq!(mock.registered_handlers(), vec!["onScore"]);

    mock.queue_js_call("onScore", &["12", "34"]);
    mock.queue_js_call("onScore", &["56", "78"]);
    mock.queue_js_call("nobody", &["x"]);

    let handled = eval(&mut runtime, "device.handleJsCalls()").unwrap();
    assert_eq!(handled, 2);
    assert_eq!(
        eval(&mut runtime, "globalThis.seen").unwrap(),
        serde_json::json!(["12:34", "56:78"])
    );
}

#[test]
fn re_registering_a_handler_replaces_the_function() {
    let (_guard, mock, mut runtime) = setup();
    eval(
        &mut runtime,
        r#"
        globalThis.winner = null;
        device.registerPollingHandler('onTurn', () => { globalThis.winner = 'first'; });
        device.registerPollingHandler('onTurn', () => { globalThis.winner = 'second'; });
        "#,
    )
    .unwrap();

    mock.queue_js_call("onTurn", &[]);
    eval(&mut runtime, "device.handleJsCalls()").unwrap();
    assert_eq!(eval(&mut runtime, "globalThis.winner").unwrap(), "second");
}

#[test]
fn register_polling_handler_rejects_non_functions() {
    let (_guard, mock, mut runtime) = setup();
    let err = eval(&mut runtime, "device.registerPollingHandler('bad', 7)").unwrap_err();
    assert!(err.contains("handler must be a function"), "{err}");
    assert!(mock.registered_handlers().is_empty());
}

#[test]
fn call_js_forwards_name_and_arguments() {
    let (_guard, mock, mut runtime) = setup();
    eval(&mut runtime, "device.callJs('score', ['9000'])").unwrap();
    assert_eq!(mock.calls(), vec!["call_js(score, [9000])"]);
}
