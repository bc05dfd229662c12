//! Live RTL-SDR sample source. Runs an async receive loop on a background
//! thread and hands buffers to the decoder thread through a [`SampleRing`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use rtlsdr_rs::RtlSdr;

use crate::errors::{ResourceError, SourceError};
use crate::streaming::SampleRing;

use super::SampleSource;

const BUF_LEN: usize = 16384;
const BUF_COUNT: usize = 4;

/// Configuration needed to open and tune an RTL-SDR device.
#[derive(Debug, Clone, Copy)]
pub struct RtlSdrConfig {
    pub device_index: u32,
    pub sample_rate: u32,
    pub frequency_hz: u64,
    pub freq_correction_ppm: i32,
}

/// Drives an RTL-SDR device on a background thread and exposes its samples
/// through the blocking [`SampleSource`] interface.
pub struct RtlSdrSource {
    consumer: crate::streaming::RingConsumer,
    producer_thread: Option<JoinHandle<()>>,
    stop_flag: Arc<std::sync::atomic::AtomicBool>,
    overflow_count: Arc<AtomicU64>,
    scratch: Vec<f64>,
    cursor: usize,
}

impl RtlSdrSource {
    pub fn open(config: RtlSdrConfig) -> Result<Self, ResourceError> {
        let (mut sdr, _info) =
            RtlSdr::open(config.device_index).map_err(|e| ResourceError::DeviceOpenFailed {
                index: config.device_index,
                reason: e.to_string(),
            })?;

        sdr.set_sample_rate(config.sample_rate)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.set_agc_mode(true)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.set_bias_tee(false)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.set_center_freq(config.frequency_hz)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.set_tuner_bandwidth(0)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.set_freq_correction(config.freq_correction_ppm)
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;
        sdr.reset_buffer()
            .map_err(|e| ResourceError::DeviceConfigFailed { reason: e.to_string() })?;

        let ring = Arc::new(SampleRing::new(BUF_COUNT, BUF_LEN));
        let consumer = ring.consumer();
        let stop_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let overflow_count = Arc::new(AtomicU64::new(0));

        let producer_ring = Arc::clone(&ring);
        let producer_stop = Arc::clone(&stop_flag);
        let producer_overflow = Arc::clone(&overflow_count);
        let producer_thread = std::thread::spawn(move || {
            let mut producer = producer_ring.producer();
            let mut raw = vec![0u8; BUF_LEN * 2];

            while !producer_stop.load(std::sync::atomic::Ordering::Relaxed) {
                if sdr.read_sync(&mut raw).is_err() {
                    break;
                }

                let mut iq = vec![0.0f64; BUF_LEN * 2];
                for (i, chunk) in raw.chunks_exact(2).enumerate().take(BUF_LEN) {
                    iq[i * 2] = (chunk[0] as i16 + i16::from(i8::MIN)) as f64;
                    iq[i * 2 + 1] = (chunk[1] as i16 + i16::from(i8::MIN)) as f64;
                }

                if !producer.publish(&iq) {
                    producer_overflow.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

        Ok(Self {
            consumer,
            producer_thread: Some(producer_thread),
            stop_flag,
            overflow_count,
            scratch: Vec::new(),
            cursor: 0,
        })
    }
}

impl SampleSource for RtlSdrSource {
    fn read(&mut self, out: &mut [f64]) -> Result<usize, SourceError> {
        if self.cursor >= self.scratch.len() {
            let n = self.consumer.take(&mut self.scratch);
            self.cursor = 0;
            if n == 0 {
                return Ok(0);
            }
        }

        let available = self.scratch.len() - self.cursor;
        let n = available.min(out.len());
        out[..n].copy_from_slice(&self.scratch[self.cursor..self.cursor + n]);
        self.cursor += n;

        Ok(n / 2)
    }

    fn close(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.producer_thread.take() {
            let _ = handle.join();
        }
    }

    fn overflow_count(&self) -> u64 {
        self.overflow_count.load(Ordering::Relaxed)
    }
}

impl Drop for RtlSdrSource {
    fn drop(&mut self) {
        self.close();
    }
}
