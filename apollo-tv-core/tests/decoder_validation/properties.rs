//! General properties checked across a spread of sample rates and mode
//! choices, rather than a handful of hand-picked cases.

use proptest::prelude::*;

use apollo_tv_core::{DecoderConfig, Mode};

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Mono), Just(Mode::Colour)]
}

proptest! {
    /// Dimensional consistency (spec.md §8): whenever a sample rate is
    /// accepted, every derived dimension is non-negative and the active
    /// region never exceeds the full line.
    #[test]
    fn dimensional_consistency_holds_for_any_accepted_sample_rate(
        sample_rate in 1u32..10_000_000,
        mode in mode_strategy(),
    ) {
        if let Ok(config) = DecoderConfig::new(sample_rate, mode) {
            prop_assert!(config.active_width <= config.width);
            prop_assert!(config.width > 0);
            prop_assert!(config.hsync_width >= 3);
            prop_assert!(config.vsync_width >= 1);
            prop_assert_eq!(
                config.framebuffer_len(),
                config.active_width as usize * config.active_lines as usize
            );
        }
    }
}
