//! General clamping and level-filter properties, exercised end-to-end.
//!
//! The exact convergence rate of the sync-tip low-pass is unit tested in
//! `decoder::levels`; this file checks that pathological input never
//! escapes the framebuffer's packed-pixel invariants.

use apollo_tv_core::{DecoderConfig, Mode, TvDecoder};

#[test]
fn extreme_input_never_produces_out_of_range_pixels() {
    let config = DecoderConfig::new(2_250_000, Mode::Mono).unwrap();
    let width = config.width as usize;
    let lines = config.lines as usize;
    let mut decoder = TvDecoder::new(config);

    // Alternate between the two int16 extremes line-to-line; clamping must
    // hold regardless of how far outside [black, white] the input strays.
    let mut input = Vec::with_capacity(width * lines);
    for line_idx in 0..lines {
        let value = if line_idx % 2 == 0 { i16::MAX } else { i16::MIN };
        input.extend(std::iter::repeat(value).take(width));
    }

    let mut cursor = 0;
    for _ in 0..lines {
        decoder.feed(&input, &mut cursor);
    }

    for &pixel in decoder.framebuffer().as_slice() {
        // Alpha byte is always zero; the packed pixel never exceeds
        // 0x00FFFFFF regardless of how extreme the input was.
        assert_eq!(pixel & 0xFF_00_00_00, 0, "pixel = {pixel:#010x}");
    }
}
