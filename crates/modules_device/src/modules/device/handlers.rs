//! Polling handler table
//!
//! The native library dispatches JS calls by handler name. The JS half
//! of each handler lives in the script realm (device.js keeps the
//! name-to-function map); this table holds the Rust half: which names
//! are registered, and the calls routed to them that the script has
//! not yet drained. Names are never removed; re-registering a name is
//! allowed and the newest JS function wins on the script side.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use serde::Serialize;

/// One native-to-JS call waiting for the script to dispatch it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsDispatch {
    pub name: String,
    pub args: Vec<String>,
}

lazy_static::lazy_static! {
    static ref REGISTERED: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
    static ref PENDING: Mutex<VecDeque<JsDispatch>> = Mutex::new(VecDeque::new());
}

/// Mark `name` as registered. Lives for the rest of the process.
pub fn register(name: &str) {
    REGISTERED.lock().unwrap().insert(name.to_string());
}

/// Router handed to the SDK. Accepts the call if the name is
/// registered and queues it for the next drain.
pub fn router(name: &str, args: &[String]) -> bool {
    if !REGISTERED.lock().unwrap().contains(name) {
        tracing::debug!(target: "device.handlers", "no handler registered for {name}");
        return false;
    }
    PENDING.lock().unwrap().push_back(JsDispatch {
        name: name.to_string(),
        args: args.to_vec(),
    });
    true
}

/// Take every queued call, oldest first.
pub fn drain() -> Vec<JsDispatch> {
    PENDING.lock().unwrap().drain(..).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // The table is process-wide; tests touching it must not interleave.
    static GUARD: Mutex<()> = Mutex::new(());

    fn lock() -> MutexGuard<'static, ()> {
        GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn unregistered_names_are_rejected() {
        let _guard = lock();
        drain();
        assert!(!router("never-registered", &[]));
        assert!(drain().is_empty());
    }

    #[test]
    fn routed_calls_drain_in_order() {
        let _guard = lock();
        drain();
        register("onTick");
        assert!(router("onTick", &["1".to_string()]));
        assert!(router("onTick", &["2".to_string()]));

        let calls = drain();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, vec!["1"]);
        assert_eq!(calls[1].args, vec!["2"]);
        assert!(drain().is_empty());
    }
}
