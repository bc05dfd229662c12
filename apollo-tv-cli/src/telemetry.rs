//! Telemetry sampling and statistical aggregation over the decode loop.

use std::time::Instant;

use chrono::Utc;

use crate::logging::{StatisticsEvent, TelemetryEvent};

/// Accumulates per-frame decoder telemetry and emits periodic samples plus
/// a final summary.
pub struct TelemetryAggregator {
    frames_decoded: u64,
    overflow_count: u64,
    last_sample_time: Instant,
    start_time: Instant,
    sample_interval_secs: f64,
}

impl TelemetryAggregator {
    pub fn new(sample_interval_secs: f64) -> Self {
        Self {
            frames_decoded: 0,
            overflow_count: 0,
            last_sample_time: Instant::now(),
            start_time: Instant::now(),
            sample_interval_secs,
        }
    }

    pub fn record_frame(&mut self) {
        self.frames_decoded += 1;
    }

    /// Updates the overflow count from a sample source's cumulative total.
    /// Sources report a running total rather than discrete events, so this
    /// sets rather than increments.
    pub fn sync_overflows(&mut self, total: u64) {
        self.overflow_count = total;
    }

    pub fn should_sample(&self) -> bool {
        self.last_sample_time.elapsed().as_secs_f64() >= self.sample_interval_secs
    }

    /// Emits a telemetry sample if the interval has elapsed, resetting the
    /// sampling timer.
    pub fn sample(&mut self, hsync_offset: i32, sync_level: f64) -> Option<TelemetryEvent> {
        if !self.should_sample() {
            return None;
        }

        let event = TelemetryEvent {
            timestamp: Utc::now(),
            frames_decoded: self.frames_decoded,
            overflow_count: self.overflow_count,
            hsync_offset,
            sync_level,
        };

        self.last_sample_time = Instant::now();

        Some(event)
    }

    pub fn statistics(&self) -> StatisticsEvent {
        StatisticsEvent {
            timestamp: Utc::now(),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
            total_frames: self.frames_decoded,
            total_overflows: self.overflow_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_respects_interval() {
        let mut telemetry = TelemetryAggregator::new(3600.0);
        telemetry.record_frame();
        assert!(telemetry.sample(0, 0.0).is_none());
    }

    #[test]
    fn counts_frames_and_overflows() {
        let mut telemetry = TelemetryAggregator::new(0.0);
        telemetry.record_frame();
        telemetry.record_frame();
        telemetry.sync_overflows(3);

        let stats = telemetry.statistics();
        assert_eq!(stats.total_frames, 2);
        assert_eq!(stats.total_overflows, 3);
    }

    #[test]
    fn sync_overflows_reflects_latest_total_not_a_delta() {
        let mut telemetry = TelemetryAggregator::new(0.0);
        telemetry.sync_overflows(5);
        telemetry.sync_overflows(5);
        assert_eq!(telemetry.statistics().total_overflows, 5);
    }
}
