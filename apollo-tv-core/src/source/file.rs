//! File-backed sample source: raw 8-bit unsigned interleaved IQ.

use std::fs::File;
use std::io::{BufReader, Read};

use crate::errors::SourceError;

use super::SampleSource;

/// Reads raw 8-bit unsigned IQ samples from a file, converting each byte
/// `b` to `i16` via `b as i16 + i16::from(i8::MIN)` (maps `[0, 255]` to
/// `[-128, 127]`).
pub struct FileSource {
    reader: BufReader<File>,
    scratch: Vec<u8>,
    closed: bool,
}

impl FileSource {
    pub fn open(file: File) -> Self {
        Self {
            reader: BufReader::new(file),
            scratch: Vec::new(),
            closed: false,
        }
    }
}

impl SampleSource for FileSource {
    fn read(&mut self, out: &mut [f64]) -> Result<usize, SourceError> {
        if self.closed {
            return Ok(0);
        }

        let n_samples = out.len() / 2;
        self.scratch.resize(n_samples * 2, 0);

        let mut total_read = 0;
        while total_read < self.scratch.len() {
            match self.reader.read(&mut self.scratch[total_read..]) {
                Ok(0) => break,
                Ok(n) => total_read += n,
                Err(e) => return Err(SourceError::Io(e)),
            }
        }

        let samples_read = total_read / 2;
        for i in 0..samples_read {
            out[i * 2] = (self.scratch[i * 2] as i16 + i16::from(i8::MIN)) as f64;
            out[i * 2 + 1] = (self.scratch[i * 2 + 1] as i16 + i16::from(i8::MIN)) as f64;
        }

        Ok(samples_read)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
