//! Apollo TV error types with granular categories

use thiserror::Error;

/// Top-level error type for all Apollo TV operations
#[derive(Debug, Error)]
pub enum DecoderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Sample source error: {0}")]
    Source(#[from] SourceError),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid sample rate: {rate} Hz (must be > 0)")]
    InvalidSampleRate { rate: u32 },

    #[error(
        "Sample rate {rate} Hz is too low to resolve a {field} of {computed_samples} samples for {mode} mode"
    )]
    SampleRateTooLow {
        rate: u32,
        mode: &'static str,
        field: &'static str,
        computed_samples: i64,
    },

    #[error("Invalid FM deviation: {deviation_hz} Hz (must be > 0)")]
    InvalidDeviation { deviation_hz: f64 },

    #[error("Unrecognised mode '{name}' (expected 'mono' or 'colour')")]
    UnknownMode { name: String },

    #[error("Unrecognised sample source device '{name}' (expected 'file' or 'rtlsdr')")]
    UnknownDevice { name: String },
}

/// Resource acquisition errors (files, devices, buffers)
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to open input file '{path}': {reason}")]
    FileOpenFailed { path: String, reason: String },

    #[error("Failed to open SDR device #{index}: {reason}")]
    DeviceOpenFailed { index: u32, reason: String },

    #[error("Failed to configure SDR device: {reason}")]
    DeviceConfigFailed { reason: String },
}

/// Sample source errors surfaced during the read loop
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source underrun: read() returned 0 samples")]
    Underrun,

    #[error("I/O error reading samples: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Apollo TV operations
pub type Result<T> = std::result::Result<T, DecoderError>;
