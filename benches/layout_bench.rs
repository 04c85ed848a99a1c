use chart_layout::api::Chart;
use chart_layout::core::{ContinuousRange, ContinuousSeries, generate_continuous_ticks};
use chart_layout::render::{Font, NullRenderer, Style, svg};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_continuous_ticks_wide_domain(c: &mut Criterion) {
    let mut renderer = NullRenderer::default();
    let style = Style::default()
        .with_font(Font::monospace())
        .with_font_size(10.0);
    let range = ContinuousRange::new(-1_234.5, 98_765.4, 4_096);

    c.bench_function("continuous_ticks_wide_domain", |b| {
        b.iter(|| {
            let _ = generate_continuous_ticks(
                &mut renderer,
                black_box(&range),
                black_box(false),
                &style,
                None,
            );
        })
    });
}

fn bench_svg_line_chart_2k(c: &mut Criterion) {
    let x_values: Vec<f64> = (0..2_000).map(f64::from).collect();
    let y_values: Vec<f64> = x_values
        .iter()
        .map(|x| 400.0 + (x * 0.05).sin() * 25.0)
        .collect();
    let chart = Chart::new(1600, 900)
        .with_title("bench")
        .with_series(ContinuousSeries::new(x_values, y_values).with_name("sine"));

    c.bench_function("svg_line_chart_2k", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(256 * 1024);
            chart
                .render(svg, black_box(&mut output))
                .expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_continuous_ticks_wide_domain,
    bench_svg_line_chart_2k
);
criterion_main!(benches);
