//! Decoder validation test suite.
//!
//! Black-box coverage of the general properties and concrete scenarios
//! from the decoder's behavioural specification, one file per concern.
//! Internals exercised directly (hsync register math, vsync shift-register
//! bit patterns) live as unit tests beside their modules; this suite drives
//! everything through the public `TvDecoder`/`FmDemodulator`/`SampleSource`
//! surface.

mod colour;
mod framebuffer;
mod levels;
mod mono;
mod properties;
mod source;
