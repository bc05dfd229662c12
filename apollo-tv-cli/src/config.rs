//! CLI-specific configuration: TOML file loading merged with command-line
//! overrides.

use std::path::{Path, PathBuf};

use apollo_tv_core::config::{DEFAULT_DEVIATION_HZ, DEFAULT_FREQUENCY_HZ};
use apollo_tv_core::Mode;
use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which sample source to read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    File,
    #[serde(rename = "rtlsdr")]
    RtlSdr,
}

/// Top-level CLI configuration, loadable from a TOML file and overridable
/// by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,

    #[serde(default = "default_device")]
    pub device: Device,

    /// Path to the input file, when `device = "file"`.
    #[serde(default)]
    pub input_path: Option<PathBuf>,

    /// RTL-SDR device index, when `device = "rtlsdr"`.
    #[serde(default)]
    pub device_index: u32,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u64,

    #[serde(default = "default_deviation_hz")]
    pub deviation_hz: f64,

    #[serde(default)]
    pub freq_correction_ppm: i32,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_mode() -> Mode {
    Mode::Mono
}

fn default_device() -> Device {
    Device::File
}

fn default_sample_rate() -> u32 {
    2_250_000
}

fn default_frequency_hz() -> u64 {
    DEFAULT_FREQUENCY_HZ
}

fn default_deviation_hz() -> f64 {
    DEFAULT_DEVIATION_HZ
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            device: default_device(),
            input_path: None,
            device_index: 0,
            sample_rate: default_sample_rate(),
            frequency_hz: default_frequency_hz(),
            deviation_hz: default_deviation_hz(),
            freq_correction_ppm: 0,
            logging: LoggingConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads a TOML configuration file, filling in any fields it omits with
    /// [`CliConfig::default`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).wrap_err("Failed to parse TOML configuration")
    }
}

/// Logging output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_target")]
    pub target: LogTarget,

    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_target() -> LogTarget {
    LogTarget::Stderr
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: default_log_target(),
            file_path: None,
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Converts the CLI's logging config into the core decoder's logging
    /// config (subsystem toggles are left at their defaults: all enabled).
    pub fn to_core_log_config(&self) -> apollo_tv_core::logging::LogConfig {
        use apollo_tv_core::logging::{LogConfig as CoreLogConfig, LogLevel as CoreLogLevel};

        let level = match self.level {
            LogLevel::Trace => CoreLogLevel::Trace,
            LogLevel::Debug => CoreLogLevel::Debug,
            LogLevel::Info => CoreLogLevel::Info,
            LogLevel::Warn => CoreLogLevel::Warn,
            LogLevel::Error => CoreLogLevel::Error,
        };

        CoreLogConfig {
            level,
            ..CoreLogConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Logfmt,
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
