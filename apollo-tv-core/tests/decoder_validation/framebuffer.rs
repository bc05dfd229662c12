//! Mono colour-independence property, exercised end-to-end.

use apollo_tv_core::{DecoderConfig, Mode, TvDecoder};

#[test]
fn mono_pixels_always_have_equal_rgb_channels() {
    let config = DecoderConfig::new(2_250_000, Mode::Mono).unwrap();
    let width = config.width as usize;
    let lines = config.lines as usize;
    let mut decoder = TvDecoder::new(config);

    let input: Vec<i16> = vec![12_345i16; width].repeat(lines);

    let mut cursor = 0;
    for _ in 0..lines {
        decoder.feed(&input, &mut cursor);
    }

    for &pixel in decoder.framebuffer().as_slice() {
        let [_, r, g, b] = pixel.to_be_bytes();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
