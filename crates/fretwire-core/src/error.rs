//! Error types for the Fretwire framework.

use std::fmt;

/// Errors that can occur in Fretwire translators.
#[derive(Debug)]
pub enum PluginError {
    /// Plugin initialization failed.
    InitializationFailed(String),
    /// Event processing error.
    ProcessingError(String),
    /// State serialization/deserialization error.
    StateError(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Self::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            Self::StateError(msg) => write!(f, "State error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

/// Result type for Fretwire operations.
pub type PluginResult<T> = Result<T, PluginError>;
