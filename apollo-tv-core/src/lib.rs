//! Apollo USB TV core library
//!
//! FM demodulation, horizontal/vertical sync recovery, field-sequential
//! colour tracking, and active-region rasterization for the Apollo Unified
//! S-Band analog television downlink.

pub mod config;
pub mod decoder;
pub mod demod;
pub mod errors;
pub mod framebuffer;
pub mod logging;
pub mod source;
pub mod streaming;

pub use config::{DecoderConfig, Mode};
pub use decoder::{ReadOutcome, TvDecoder};
pub use demod::FmDemodulator;
pub use errors::{ConfigError, DecoderError, ResourceError, Result, SourceError};
pub use framebuffer::Framebuffer;
