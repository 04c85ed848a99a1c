use chart_layout::core::{ContinuousRange, generate_continuous_ticks};
use chart_layout::render::{Font, NullRenderer, Style};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ticks_include_both_endpoints(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        domain in 1i32..4096,
        vertical in any::<bool>()
    ) {
        let max = min + span;
        let mut renderer = NullRenderer::new();
        let style = Style::default().with_font(Font::monospace()).with_font_size(10.0);
        let range = ContinuousRange::new(min, max, domain);
        let ticks = generate_continuous_ticks(&mut renderer, &range, vertical, &style, None);

        prop_assert!(ticks.len() >= 2);
        prop_assert_eq!(ticks.first().map(|tick| tick.value), Some(min));
        prop_assert_eq!(ticks.last().map(|tick| tick.value), Some(max));
    }

    #[test]
    fn ticks_never_exceed_the_sanity_limit(domain in 1i32..2_000_000) {
        let mut renderer = NullRenderer::new();
        let style = Style::default().with_font(Font::monospace()).with_font_size(10.0);
        let range = ContinuousRange::new(0.0, 1.0, domain);
        let ticks = generate_continuous_ticks(&mut renderer, &range, true, &style, None);
        prop_assert!(ticks.len() <= 1025);
    }

    #[test]
    fn translate_hits_domain_edges(
        min in -1e6f64..1e6,
        span in 0.001f64..1e6,
        domain in 1i32..8192
    ) {
        use chart_layout::core::Range;
        let range = ContinuousRange::new(min, min + span, domain);
        prop_assert_eq!(range.translate(min), 0);
        prop_assert_eq!(range.translate(min + span), domain);

        let descending = range.with_descending(true);
        prop_assert_eq!(descending.translate(min), domain);
        prop_assert_eq!(descending.translate(min + span), 0);
    }
}
