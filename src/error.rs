/*
 * Error types for the frameless windowing layer.
 *
 * Setup paths (registration, interceptor attach) report failures through
 * `PlatformError`. Message-pump paths never propagate errors outward: the OS
 * blocks on every intercepted message, so failures there are logged and
 * absorbed with a safe default instead.
 */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A subsystem could not be brought up (subclass installation, proxy
    /// attachment, config loading).
    InitializationFailed(String),
    /// A null or stale native window handle was passed in.
    InvalidHandle(String),
    /// A native call failed after initialization succeeded.
    OperationFailed(String),
    /// The running OS lacks the required capability and no fallback applies.
    Unsupported(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InitializationFailed(msg) => {
                write!(f, "Initialization failed: {msg}")
            }
            PlatformError::InvalidHandle(msg) => write!(f, "Invalid handle: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "Operation failed: {msg}"),
            PlatformError::Unsupported(msg) => write!(f, "Unsupported platform: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail_message() {
        let err = PlatformError::InvalidHandle("window id is null".to_string());
        assert_eq!(err.to_string(), "Invalid handle: window id is null");
    }
}
