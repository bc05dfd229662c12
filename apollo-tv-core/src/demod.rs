//! FM demodulation of interleaved IQ samples into scalar (int16-range) samples.

use std::f64::consts::PI;

/// Differential-phase FM demodulator. Holds the previous sample's phase so
/// demodulation is consistent across successive blocks of input.
#[derive(Debug, Clone, Copy)]
pub struct FmDemodulator {
    sample_rate: u32,
    deviation_hz: f64,
    theta_prev: f64,
}

impl FmDemodulator {
    pub fn new(sample_rate: u32, deviation_hz: f64) -> Self {
        Self {
            sample_rate,
            deviation_hz,
            theta_prev: 0.0,
        }
    }

    /// Demodulates `iq` (interleaved I, Q pairs, length `2 * n`) in place into
    /// the first `n` entries of `iq`, one scalar sample per IQ pair.
    ///
    /// Returns the number of scalar samples produced (`iq.len() / 2`).
    pub fn demodulate(&mut self, iq: &mut [f64]) -> usize {
        let n = iq.len() / 2;
        let scale = (self.sample_rate as f64 / (2.0 * PI * self.deviation_hz)) * i16::MAX as f64;

        for i in 0..n {
            let theta = iq[i * 2].atan2(iq[i * 2 + 1]);

            let mut d = self.theta_prev - theta;
            if d < -PI {
                d += 2.0 * PI;
            }
            if d >= PI {
                d -= 2.0 * PI;
            }

            iq[i] = (d * scale).round();
            self.theta_prev = theta;
        }

        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deviation_input_demodulates_to_zero() {
        let mut demod = FmDemodulator::new(2_250_000, 125_000.0);
        // Constant phase (I=0, Q=1 repeated) means successive theta values
        // are identical, so the differential is zero after the first sample.
        let mut buf = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let n = demod.demodulate(&mut buf);
        assert_eq!(n, 3);
        assert_eq!(buf[1], 0.0);
        assert_eq!(buf[2], 0.0);
    }

    #[test]
    fn phase_persists_across_blocks() {
        let mut demod = FmDemodulator::new(2_250_000, 125_000.0);
        let mut first = vec![1.0, 0.0];
        demod.demodulate(&mut first);
        let theta_after_first = demod.theta_prev;

        let mut second = vec![0.0, 1.0];
        demod.demodulate(&mut second);
        assert_eq!(theta_after_first, std::f64::consts::FRAC_PI_2);
    }
}
