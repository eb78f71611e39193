//! luna-sdk
//!
//! The seam between the binding shim and the native PDL device
//! library. `DeviceSdk` mirrors the PDL entry points with Rust
//! signatures; the process-wide installed backend is either the raw
//! FFI implementation (feature `device`) or the recording mock.

mod backend;
mod error;
#[cfg(feature = "device")]
mod ffi;
pub mod mock;
mod types;

pub use backend::{DeviceSdk, JsRouter, backend, install};
pub use error::{SdkError, SdkResult};
pub use types::{Orientation, ScreenMetrics, events, hardware};
