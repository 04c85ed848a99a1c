use chart_layout::api::{GridLine, TickPosition, XAxis, YAxis, generate_grid_lines};
use chart_layout::core::{ChartBox, ContinuousRange, Tick};
use chart_layout::render::{Color, Font, NullRenderer, Style};

fn axis_defaults() -> Style {
    Style::default()
        .with_font(Font::monospace())
        .with_font_size(10.0)
        .with_font_color(Color::new(51, 51, 51, 255))
        .with_stroke_color(Color::new(51, 51, 51, 255))
        .with_stroke_width(1.0)
}

fn unit_ticks() -> Vec<Tick> {
    vec![
        Tick::new(1.0, "1.0"),
        Tick::new(2.0, "2.0"),
        Tick::new(3.0, "3.0"),
    ]
}

#[test]
fn x_axis_measure_matches_fixture() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(1.0, 3.0, 100);
    let measured = XAxis::default().measure(
        &mut renderer,
        ChartBox::new(0, 0, 100, 100),
        &range,
        &axis_defaults(),
        &unit_ticks(),
    );
    assert_eq!(measured.width(), 122);
    assert_eq!(measured.height(), 22);
    assert_eq!(measured.top, 100);
}

#[test]
fn x_axis_measure_sorts_ticks() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(1.0, 3.0, 100);
    let mut shuffled = unit_ticks();
    shuffled.reverse();
    let canvas = ChartBox::new(0, 0, 100, 100);
    let axis = XAxis::default().with_tick_position(TickPosition::BetweenTicks);
    assert_eq!(
        axis.measure(&mut renderer, canvas, &range, &axis_defaults(), &shuffled),
        axis.measure(&mut renderer, canvas, &range, &axis_defaults(), &unit_ticks()),
    );
}

#[test]
fn hidden_name_reserves_no_space() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(1.0, 3.0, 100);
    let canvas = ChartBox::new(0, 0, 100, 100);
    let axis = XAxis::default()
        .with_name("Date")
        .with_name_style(Style::hidden());
    let measured = axis.measure(&mut renderer, canvas, &range, &axis_defaults(), &unit_ticks());
    assert_eq!(measured.height(), 22);
}

#[test]
fn x_axis_render_emits_baseline_marks_and_labels() {
    let mut renderer = NullRenderer::new();
    let range = ContinuousRange::new(1.0, 3.0, 100);
    XAxis::default().with_name("Date").render(
        &mut renderer,
        ChartBox::new(0, 0, 100, 100),
        &range,
        &axis_defaults(),
        &unit_ticks(),
    );
    // baseline plus one mark per tick
    assert_eq!(renderer.path_count, 4);
    let bodies: Vec<_> = renderer.texts.iter().map(|text| text.body.as_str()).collect();
    assert_eq!(bodies, vec!["1.0", "2.0", "3.0", "Date"]);

    let name = &renderer.texts[3];
    assert_eq!(name.x, 100 - (50 + 15));
    assert_eq!(name.y, 100 + 10 + 12 + 10 + 12);
}

#[test]
fn grid_lines_need_an_explicit_stroke_color() {
    let range = ContinuousRange::new(0.0, 10.0, 100);
    let canvas = ChartBox::new(0, 0, 100, 100);
    let ticks: Vec<Tick> = (0..=5)
        .map(|index| Tick::new(f64::from(index) * 2.0, index.to_string()))
        .collect();

    let mut plain = NullRenderer::new();
    XAxis::default().render(&mut plain, canvas, &range, &axis_defaults(), &ticks);

    let mut gridded = NullRenderer::new();
    XAxis::default()
        .with_grid_major_style(Style::default().with_stroke_color(Color::BLACK))
        .with_grid_minor_style(Style::default().with_stroke_color(Color::BLACK))
        .render(&mut gridded, canvas, &range, &axis_defaults(), &ticks);

    assert_eq!(gridded.path_count - plain.path_count, 4);
}

#[test]
fn user_grid_lines_replace_generated_ones() {
    let ticks = unit_ticks();
    let axis = YAxis::default().with_grid_lines(vec![GridLine::new(1.5), GridLine::new(2.5)]);
    let lines = axis.get_grid_lines(&ticks);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].value, 2.5);

    let generated = generate_grid_lines(&ticks, &Style::default(), &Style::default());
    assert_eq!(generated.len(), 1);
    assert!(!generated[0].is_minor);
}

#[test]
fn secondary_y_axis_draws_labels_right_aligned_to_the_left() {
    let mut renderer = NullRenderer::new();
    let canvas = ChartBox::new(10, 60, 160, 110);
    let range = ContinuousRange::new(0.0, 10.0, 100);
    let ticks = vec![Tick::new(0.0, "0.00"), Tick::new(10.0, "10.00")];
    YAxis::secondary().render(&mut renderer, canvas, &range, &axis_defaults(), &ticks);

    let label = &renderer.texts[1];
    assert_eq!(label.body, "10.00");
    assert_eq!(label.x, 60 - 1 - 10 - 39);
    assert_eq!(label.y, 10 + 6);
}
