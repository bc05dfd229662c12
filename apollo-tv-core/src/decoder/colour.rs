//! Field-sequential colour identification (colour mode only).

/// Tracks which colour channel the current field carries, and the
/// once-per-frame reset triggered by the white reference burst.
#[derive(Debug, Clone, Copy)]
pub struct FscTracker {
    pub fsc: u8,
    fsc_hold: bool,
}

impl Default for FscTracker {
    fn default() -> Self {
        Self { fsc: 0, fsc_hold: false }
    }
}

impl FscTracker {
    /// Advances the colour phase at the start of each field (`line == 1` or
    /// `line == 264`), clearing the hold once the cycle returns to the
    /// known red-channel phase.
    pub fn advance_on_field_boundary(&mut self, line: u32) {
        if line == 1 || line == 264 {
            self.fsc = (self.fsc + 1) % 3;
            if self.fsc == 1 {
                self.fsc_hold = false;
            }
        }
    }

    /// At the reference lines (18, 281), resets `fsc` to the red channel if
    /// the white burst is observed and the hold has not already fired this
    /// frame.
    pub fn maybe_reset_from_burst(
        &mut self,
        line: u32,
        iline: &[i16],
        fsc_left: u32,
        fsc_width: u32,
        white_level: f64,
        black_level: f64,
    ) {
        if self.fsc_hold || (line != 18 && line != 281) {
            return;
        }

        let left = fsc_left as usize;
        let width = fsc_width as usize;
        let burst = iline[left..left + width].iter().map(|&s| s as f64).sum::<f64>() / width as f64;

        if burst > (white_level + black_level) / 2.0 {
            self.fsc = 1;
            self.fsc_hold = true;
        }
    }

    /// The byte offset (0, 8, or 16) of the channel the current field writes to.
    pub fn channel_byte_offset(&self) -> u32 {
        self.fsc as u32 * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_three_channels() {
        let mut tracker = FscTracker::default();
        assert_eq!(tracker.fsc, 0);
        tracker.advance_on_field_boundary(1);
        assert_eq!(tracker.fsc, 1);
        tracker.advance_on_field_boundary(264);
        assert_eq!(tracker.fsc, 2);
        tracker.advance_on_field_boundary(1);
        assert_eq!(tracker.fsc, 0);
    }

    #[test]
    fn hold_prevents_second_reset_in_same_frame() {
        let mut tracker = FscTracker::default();
        let iline = vec![32000i16; 400];
        tracker.maybe_reset_from_burst(18, &iline, 30, 30, 32767.0, 0.0);
        assert_eq!(tracker.fsc, 1);

        tracker.fsc = 2;
        tracker.maybe_reset_from_burst(281, &iline, 30, 30, 32767.0, 0.0);
        assert_eq!(tracker.fsc, 2);
    }
}
