//! Decoder configuration: transmission mode and the derived sample-domain
//! dimensions that follow from a mode and a sample rate.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result};

/// Default FM deviation of the Apollo USB TV video subcarrier, in Hz.
///
/// Not present in the distilled spec; taken from `original_source/apollo-tv.c`'s
/// hardcoded `deviation` constant.
pub const DEFAULT_DEVIATION_HZ: f64 = 125_000.0;

/// Default Apollo USB TV video carrier frequency, in Hz (from `original_source/apollo-tv.c`).
pub const DEFAULT_FREQUENCY_HZ: u64 = 855_250_000;

/// Transmission format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 320 lines/frame, 10 fps progressive, monochrome.
    Mono,
    /// 525 lines/frame, ~29.97 fields/s, 2:1 interlaced, field-sequential colour.
    Colour,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Mono => "mono",
            Mode::Colour => "colour",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mono" => Ok(Mode::Mono),
            "colour" | "color" => Ok(Mode::Colour),
            other => Err(ConfigError::UnknownMode {
                name: other.to_string(),
            }),
        }
    }
}

/// Immutable decoder configuration: the sample rate and mode, plus every
/// sample-domain dimension derived from them (spec.md §3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub sample_rate: u32,
    pub mode: Mode,

    pub lines: u32,
    pub active_lines: u32,
    pub frame_rate_num: u32,
    pub frame_rate_den: u32,

    /// Full line length in samples.
    pub width: u32,
    pub hsync_width: u32,
    pub vsync_width: u32,
    pub active_left: u32,
    pub active_width: u32,

    /// Colour-only field-sequential-colour reference burst window.
    pub fsc_left: u32,
    pub fsc_width: u32,
}

impl DecoderConfig {
    /// Build the derived dimensions for `mode` at `sample_rate`, rounding the
    /// mode's microsecond constants (spec.md §6) to the nearest sample.
    ///
    /// Rejects sample rates too low to resolve `hsync_width`/`vsync_width`
    /// as at least one sample (spec.md §9 open question, resolved here).
    pub fn new(sample_rate: u32, mode: Mode) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate { rate: sample_rate }.into());
        }

        let sr = sample_rate as f64;

        let (lines, active_lines, frame_rate_num, frame_rate_den);
        let (hsync_width, vsync_width, active_left, active_width_us);
        let mut fsc_left = 0u32;
        let mut fsc_width = 0u32;

        match mode {
            Mode::Colour => {
                lines = 525;
                active_lines = 480;
                frame_rate_num = 30_000;
                frame_rate_den = 1_001;

                hsync_width = round_samples(sr, 0.000_004_70);
                vsync_width = round_samples(sr, 0.000_027_10);
                active_left = round_samples(sr, 0.000_009_20);
                active_width_us = ceil_samples(sr, 0.000_052_90);

                fsc_left = round_samples(sr, 0.000_014_70);
                fsc_width = round_samples(sr, 0.000_020_00);
            }
            Mode::Mono => {
                lines = 320;
                active_lines = 312;
                frame_rate_num = 10;
                frame_rate_den = 1;

                hsync_width = round_samples(sr, 0.000_020_00);
                vsync_width = round_samples(sr, 0.000_267_5);
                active_left = round_samples(sr, 0.000_025_00);
                active_width_us = ceil_samples(sr, 0.000_282_5);
            }
        }

        let width = (sr / lines as f64 / (frame_rate_num as f64 / frame_rate_den as f64)).round() as u32;
        let active_width = active_width_us.min(width);

        if hsync_width < 3 {
            // Level tracking needs iline[1 .. hsync_width - 1] to be non-empty.
            return Err(ConfigError::SampleRateTooLow {
                rate: sample_rate,
                mode: mode.label(),
                field: "hsync_width",
                computed_samples: hsync_width as i64,
            }
            .into());
        }
        if vsync_width < 1 {
            return Err(ConfigError::SampleRateTooLow {
                rate: sample_rate,
                mode: mode.label(),
                field: "vsync_width",
                computed_samples: vsync_width as i64,
            }
            .into());
        }
        if width < 1 {
            return Err(ConfigError::SampleRateTooLow {
                rate: sample_rate,
                mode: mode.label(),
                field: "width",
                computed_samples: width as i64,
            }
            .into());
        }

        Ok(Self {
            sample_rate,
            mode,
            lines,
            active_lines,
            frame_rate_num,
            frame_rate_den,
            width,
            hsync_width,
            vsync_width,
            active_left,
            active_width,
            fsc_left,
            fsc_width,
        })
    }

    /// Frame (or field, in colour mode) interval in milliseconds, halved in
    /// colour mode since frames are delivered per field (spec.md §6).
    pub fn frame_interval_ms(&self) -> f64 {
        let ms = 1000.0 * self.frame_rate_den as f64 / self.frame_rate_num as f64;
        match self.mode {
            Mode::Colour => ms / 2.0,
            Mode::Mono => ms,
        }
    }

    pub fn framebuffer_len(&self) -> usize {
        self.active_width as usize * self.active_lines as usize
    }
}

fn round_samples(sample_rate: f64, seconds: f64) -> u32 {
    (sample_rate * seconds).round() as u32
}

fn ceil_samples(sample_rate: f64, seconds: f64) -> u32 {
    (sample_rate * seconds).ceil() as u32
}
