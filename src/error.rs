//! Error types.
//!
//! Domain input never fails: numeric fields are sanitized and unknown
//! keyword entries are dropped. The errors here cover the two places
//! where the caller's own code or an explicit parse is involved.

use thiserror::Error;

/// Failure raised by a participant hook or a global modifier trigger.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HookError {
    /// The hook ran and reported a failure.
    #[error("hook `{hook}` failed: {message}")]
    Failed {
        /// Name of the hook or trigger that failed.
        hook: String,
        /// Caller-supplied reason.
        message: String,
    },
}

impl HookError {
    /// Create a failure for the named hook.
    pub fn failed(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            hook: hook.into(),
            message: message.into(),
        }
    }
}

/// A keyword id that is not one of the closed set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown keyword `{0}`")]
pub struct KeywordParseError(pub String);

/// Failure converting an untyped keyword container.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The container was neither a list nor a map.
    #[error("keyword container must be an array or an object, got {0}")]
    UnsupportedContainer(&'static str),
}
