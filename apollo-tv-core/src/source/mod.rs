//! Sample source abstraction: a capability with `read` and `close`,
//! implemented by a file reader and (optionally) a live RTL-SDR receiver.

pub mod file;
#[cfg(feature = "rtlsdr")]
pub mod rtlsdr;

use crate::errors::SourceError;

pub use file::FileSource;
#[cfg(feature = "rtlsdr")]
pub use rtlsdr::RtlSdrSource;

/// A blocking IQ sample source. `read` fills `out` with up to `out.len() /
/// 2` interleaved IQ pairs and returns the number of samples read; 0 means
/// end-of-stream, an error means a fault in the source itself.
pub trait SampleSource {
    /// Reads interleaved IQ samples into `out` (length `2 * n_samples`),
    /// returning how many complex samples were written.
    fn read(&mut self, out: &mut [f64]) -> Result<usize, SourceError>;

    /// Releases the underlying device/file. Idempotent.
    fn close(&mut self);

    /// Cumulative count of sample buffers dropped before this source could
    /// hand them to a reader. Sources with no internal buffering (e.g.
    /// [`FileSource`]) can never overflow and keep the default of 0.
    fn overflow_count(&self) -> u64 {
        0
    }
}
