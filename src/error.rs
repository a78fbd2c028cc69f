/*
 * Error Module
 *
 * Error types for the node network engine and its configuration.
 * The engine has a single failure class (no drawing surface at mount time);
 * configuration errors only arise when the host loads params from a file.
 */

use std::fmt;

/// Errors reported by the engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// `mount` was called without a drawing surface.
    SurfaceUnavailable,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SurfaceUnavailable => {
                write!(f, "Drawing surface unavailable; node network will not render")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors that can occur while loading or validating `NetworkParams`.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    Io(std::io::Error),
    /// The file is not valid JSON for `NetworkParams`.
    Parse(serde_json::Error),
    /// A value lies outside its allowed range.
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "Config value `{}` out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
