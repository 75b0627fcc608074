//! # Error Types
//!
//! Custom error types for Spacestick using `thiserror`.

use thiserror::Error;

/// Main error type for Spacestick
#[derive(Debug, Error)]
pub enum SpacestickError {
    /// Configuration value out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedded configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial link errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// None of the candidate serial devices could be opened
    #[error("No HID bridge found (tried: {0})")]
    SerialPortNotFound(String),

    /// Analog input device errors
    #[error("Sampler error: {0}")]
    Sampler(String),

    /// No input device exposes the configured axes
    #[error("No analog input device found with the configured axes")]
    SamplerNotFound,

    /// Bridge framing errors
    #[error("Frame error: {0}")]
    Frame(String),

    /// Startup zeroing misuse
    #[error("Calibration error: {0}")]
    Calibration(String),
}

/// Result type alias for Spacestick
pub type Result<T> = std::result::Result<T, SpacestickError>;
