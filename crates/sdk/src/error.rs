use thiserror::Error;

/// How a call into the native layer fails.
///
/// `Native` carries the SDK's own error string (`PDL_GetError`)
/// prefixed by the call that failed, which is exactly the text the
/// script sees in the thrown exception. There is no taxonomy beyond
/// "the library said no".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SdkError {
    #[error("{call}: {message}")]
    Native { call: String, message: String },

    /// Rejected before reaching the native layer.
    #[error("{0}")]
    InvalidArgument(String),
}

pub type SdkResult<T> = Result<T, SdkError>;
