use approx::assert_relative_eq;
use chart_layout::api::XAxis;
use chart_layout::core::math::round_to_for_delta;
use chart_layout::core::{
    AxisRange, ContinuousRange, ExplicitTicksRange, Range, Tick, generate_continuous_ticks,
};
use chart_layout::render::{Font, NullRenderer, Style};

fn label_style() -> Style {
    Style::default()
        .with_font(Font::monospace())
        .with_font_size(10.0)
}

fn values(ticks: &[Tick]) -> Vec<f64> {
    ticks.iter().map(|tick| tick.value).collect()
}

#[test]
fn wide_domain_yields_sixteen_ticks() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(10.0, 100.0, 1024);
    let ticks = generate_continuous_ticks(&mut renderer, &range, false, &label_style(), None);

    assert_eq!(ticks.len(), 16);
    assert_eq!(ticks[0], Tick::new(10.0, "10.00"));
    assert_relative_eq!(ticks[1].value, 16.0, epsilon = 1e-9);
    assert_eq!(ticks[15], Tick::new(100.0, "100.00"));
}

#[test]
fn generation_is_idempotent() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(-3.7, 512.25, 777);
    let first = generate_continuous_ticks(&mut renderer, &range, true, &label_style(), None);
    let second = generate_continuous_ticks(&mut renderer, &range, true, &label_style(), None);
    assert_eq!(first, second);
}

#[test]
fn descending_ranges_start_from_max() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(10.0, 100.0, 1024).with_descending(true);
    let ticks = generate_continuous_ticks(&mut renderer, &range, false, &label_style(), None);

    assert_eq!(ticks.first().map(|tick| tick.value), Some(100.0));
    assert_eq!(ticks.last().map(|tick| tick.value), Some(10.0));
    assert_relative_eq!(ticks[1].value, 94.0, epsilon = 1e-9);
}

#[test]
fn equal_bounds_emit_one_tick() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(5.0, 5.0, 100);
    let ticks = generate_continuous_ticks(&mut renderer, &range, false, &label_style(), None);
    assert_eq!(ticks, vec![Tick::new(5.0, "5.00")]);
}

#[test]
fn cramped_domain_keeps_only_endpoints() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(0.0, 10.0, 50);
    let ticks = generate_continuous_ticks(&mut renderer, &range, false, &label_style(), None);
    assert_eq!(values(&ticks), vec![0.0, 10.0]);
}

#[test]
fn round_to_is_pinned_across_magnitudes() {
    assert_relative_eq!(round_to_for_delta(1.0), 0.01, epsilon = 1e-12);
    assert_relative_eq!(round_to_for_delta(6.6), 0.1, epsilon = 1e-12);
    assert_relative_eq!(round_to_for_delta(100.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(round_to_for_delta(1e6), 1e4, epsilon = 1e-6);
    assert_eq!(round_to_for_delta(0.0), 0.0);
}

#[test]
fn intermediate_ticks_snap_per_magnitude() {
    let mut renderer = NullRenderer::new();
    let cases = [
        (1.0, [0.059, 0.118, 0.177]),
        (100.0, [5.9, 11.8, 17.7]),
        (1e6, [59_000.0, 118_000.0, 177_000.0]),
    ];
    for (max, expected) in cases {
        let range = ContinuousRange::new(0.0, max, 1000);
        let ticks = generate_continuous_ticks(&mut renderer, &range, false, &label_style(), None);
        assert_eq!(ticks.len(), 18, "delta {max}");
        for (tick, want) in ticks[1..4].iter().zip(expected) {
            assert_relative_eq!(tick.value, want, max_relative = 1e-9);
        }
    }
}

#[test]
fn axis_ticks_override_generation() {
    let mut renderer = NullRenderer::new();
    let axis = XAxis::default().with_ticks(vec![Tick::new(1.0, "1.0")]);
    let range = ContinuousRange::new(10.0, 100.0, 1024);
    let ticks = axis.get_ticks(&mut renderer, &range, &label_style(), None);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].value, 1.0);
}

#[test]
fn explicit_ticks_range_fills_missing_labels() {
    let mut renderer = NullRenderer::new();
    let range: AxisRange = ExplicitTicksRange::new(
        ContinuousRange::new(0.0, 2.0, 200),
        vec![Tick::new(0.0, "zero"), Tick::new(2.0, "")],
    )
    .into();
    assert!(range.ticks_provider().is_some());

    let ticks = XAxis::default().get_ticks(&mut renderer, &range, &label_style(), None);
    assert_eq!(ticks, vec![Tick::new(0.0, "zero"), Tick::new(2.0, "2.00")]);
}
