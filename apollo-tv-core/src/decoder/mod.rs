//! The video decoder state machine: line accumulation, timing recovery,
//! level/vsync/colour tracking, and active-region rasterization.

mod colour;
mod levels;
mod raster;
mod timing;
mod vsync;

use crate::config::{DecoderConfig, Mode};
use crate::framebuffer::Framebuffer;
use crate::logging::{LogConfig, SignalLogger};

use colour::FscTracker;
use levels::LevelTracker;
use timing::HsyncTracker;
use vsync::VsyncTracker;

/// Outcome of one call to [`TvDecoder::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The input slice was exhausted before a full line could be assembled;
    /// the caller should supply more demodulated samples.
    NeedMoreInput,
    /// A line was processed but no frame (or field, in colour mode) boundary
    /// was crossed.
    Continue,
    /// A line was processed and a displayable frame (mono) or field
    /// (colour, at the mid-frame boundary) is ready in the framebuffer.
    FrameReady,
}

/// The core FM-video decoder. Consumes demodulated scalar samples one line
/// at a time and maintains horizontal/vertical sync, level, and (in colour
/// mode) field-sequential-colour tracking across calls.
pub struct TvDecoder {
    config: DecoderConfig,

    iline: Vec<i16>,
    iline_len: usize,
    hsync_offset: i32,

    hsync: HsyncTracker,
    levels: LevelTracker,
    vsync: VsyncTracker,
    fsc: Option<FscTracker>,

    line: u32,
    frame: u64,

    framebuffer: Framebuffer,
    logger: SignalLogger,
}

impl TvDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        let fsc = matches!(config.mode, Mode::Colour).then(FscTracker::default);

        Self {
            iline: vec![0; config.width as usize],
            iline_len: 0,
            hsync_offset: 0,
            hsync: HsyncTracker::new(config.hsync_width),
            levels: LevelTracker::default(),
            vsync: VsyncTracker::default(),
            fsc,
            line: 1,
            frame: 0,
            framebuffer: Framebuffer::new(config.active_width, config.active_lines),
            logger: SignalLogger::new(LogConfig::default()),
            config,
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.logger = SignalLogger::new(log_config);
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Current horizontal-sync phase correction pending for the next line,
    /// in samples. Used by callers for diagnostics; converges to `{-1, 0,
    /// 1}` once hsync lock is acquired (spec.md §8).
    pub fn hsync_offset(&self) -> i32 {
        self.hsync_offset
    }

    pub fn sync_level(&self) -> f64 {
        self.levels.sync_level
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    /// Consumes demodulated samples from `input` (advancing `*cursor`) until
    /// one full line has been accumulated and processed, applying the
    /// pending hsync phase correction as it goes (§4.2).
    pub fn feed(&mut self, input: &[i16], cursor: &mut usize) -> ReadOutcome {
        let width = self.config.width as usize;

        while self.iline_len < width {
            if self.hsync_offset < 0 {
                self.iline_len += 1;
                self.hsync_offset += 1;
                continue;
            } else if self.iline_len > 0 && self.hsync_offset > 0 {
                self.iline_len -= 1;
                self.hsync_offset -= 1;
                continue;
            }

            if *cursor >= input.len() {
                return ReadOutcome::NeedMoreInput;
            }

            self.iline[self.iline_len] = input[*cursor];
            self.iline_len += 1;
            *cursor += 1;
        }

        self.iline_len = 0;
        self.process_line()
    }

    fn process_line(&mut self) -> ReadOutcome {
        let colour = matches!(self.config.mode, Mode::Colour);

        let correction = self.hsync.scan(&self.iline, self.config.width);
        self.hsync_offset += correction;
        if correction != 0 {
            self.logger.trace("HSYNC", format!("offset correction {correction:+}"));
        }

        self.levels.update(&self.iline, self.config.hsync_width, colour);

        if let Some(new_line) = self.vsync.scan(
            &self.iline,
            self.config.vsync_width,
            self.config.width,
            self.levels.blank_level,
            colour,
            self.config.lines,
        ) {
            self.logger.debug("VSYNC", format!("pattern match, line -> {new_line}"));
            self.line = new_line;
        }

        if let Some(fsc) = self.fsc.as_mut() {
            fsc.advance_on_field_boundary(self.line);
            fsc.maybe_reset_from_burst(
                self.line,
                &self.iline,
                self.config.fsc_left,
                self.config.fsc_width,
                self.levels.white_level,
                self.levels.black_level,
            );
        }

        if let Some(aline) = raster::active_line_index(self.line, self.config.active_lines, colour) {
            let channel_offset = self.fsc.as_ref().map(|f| f.channel_byte_offset());
            raster::rasterize_line(
                &self.iline,
                self.config.active_left,
                self.config.active_width,
                aline,
                self.levels.black_level,
                self.levels.white_level,
                channel_offset,
                &mut self.framebuffer,
            );
        }

        self.line += 1;

        if self.line > self.config.lines {
            self.line = 1;
            self.frame += 1;
            return ReadOutcome::FrameReady;
        }

        if colour && self.line == 264 {
            return ReadOutcome::FrameReady;
        }

        ReadOutcome::Continue
    }
}
