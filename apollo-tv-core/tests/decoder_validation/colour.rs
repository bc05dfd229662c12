//! Colour-mode general properties.
//!
//! The exact FSC advance/hold sequence (scenario 4) and the exact
//! channel-overlay byte combination (scenario 5, `0x00408020`) are unit
//! tested beside the modules that own them (`decoder::colour`,
//! `framebuffer`), since asserting them end-to-end would require pinning
//! the hsync tracker's per-sample phase drift, which this black-box
//! surface has no way to hold fixed. This file covers the properties that
//! are robust to that drift: every call to `feed` yields exactly one line
//! event, so frame/field cadence is exact regardless of phase.

use apollo_tv_core::{DecoderConfig, Mode, ReadOutcome, TvDecoder};

#[test]
fn general_property_colour_dimensional_consistency() {
    let config = DecoderConfig::new(2_250_000, Mode::Colour).unwrap();
    assert!(config.active_width <= config.width);
    assert!(config.fsc_width > 0);

    let decoder = TvDecoder::new(config);
    assert_eq!(
        decoder.framebuffer().as_slice().len(),
        config.framebuffer_len()
    );
}

#[test]
fn general_property_colour_emits_two_frame_events_per_525_line_cycle() {
    let config = DecoderConfig::new(2_250_000, Mode::Colour).unwrap();
    let width = config.width as usize;
    let lines = config.lines as usize;
    let mut decoder = TvDecoder::new(config);

    // A flat line drives the single-step hsync tracker to a constant
    // per-line correction, so consumption per `feed` call only ever
    // shrinks (insert/discard never increases it past `width` real
    // samples) -- sizing the input at `lines * width` never starves.
    let input: Vec<i16> = vec![1000i16; width].repeat(lines);

    let mut cursor = 0;
    let mut events = 0;
    for _ in 0..lines {
        match decoder.feed(&input, &mut cursor) {
            ReadOutcome::NeedMoreInput => panic!("starved before completing a cycle"),
            ReadOutcome::FrameReady => events += 1,
            ReadOutcome::Continue => {}
        }
    }

    assert_eq!(events, 2, "expected field-ready at line 264 and at wrap");
}
