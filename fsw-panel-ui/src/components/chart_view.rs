use crate::app::App;
use fsw_dashboard::chart::ChartSpec;
use fsw_dashboard::controller::ChartState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    match app.controller.chart() {
        ChartState::Empty => placeholder(f, area, "no series selected"),
        ChartState::Loading => placeholder(f, area, "fetching observations..."),
        ChartState::Failed(message) => {
            let text = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title(" Chart "));
            f.render_widget(text, area);
        }
        ChartState::Ready(spec) => draw_spec(f, area, spec),
    }
}

fn placeholder(f: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Chart "));
    f.render_widget(text, area);
}

/// Draw one chart spec: the z-score line in cyan plus the two red
/// threshold guides spanning the plotted date range.
fn draw_spec(f: &mut Frame, area: Rect, spec: &ChartSpec) {
    use chrono::Datelike;

    let line: Vec<(f64, f64)> = spec
        .points
        .iter()
        .map(|point| (point.date.num_days_from_ce() as f64, point.z))
        .collect();

    // The axis spans every derived date, not just the defined points,
    // so the guides keep reaching across publication holes.
    let (x_min, x_max) = match spec.date_range() {
        Some((first, last)) if first < last => (
            first.num_days_from_ce() as f64,
            last.num_days_from_ce() as f64,
        ),
        Some((only, _)) => (
            only.num_days_from_ce() as f64 - 1.0,
            only.num_days_from_ce() as f64 + 1.0,
        ),
        None => (0.0, 1.0),
    };

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for guide in &spec.guides {
        y_min = y_min.min(guide.y);
        y_max = y_max.max(guide.y);
    }
    for (_, z) in &line {
        y_min = y_min.min(*z);
        y_max = y_max.max(*z);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min) * 0.1).max(0.25);
    let (y_min, y_max) = (y_min - pad, y_max + pad);

    let guide_segments: Vec<[(f64, f64); 2]> = spec
        .guides
        .iter()
        .map(|guide| [(x_min, guide.y), (x_max, guide.y)])
        .collect();

    let mut datasets = vec![Dataset::default()
        .name(spec.trace_name.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&line)];
    for segment in &guide_segments {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(segment),
        );
    }

    let x_labels: Vec<Span> = match spec.date_range() {
        Some((first, last)) => vec![
            Span::raw(first.format("%Y-%m-%d").to_string()),
            Span::raw(last.format("%Y-%m-%d").to_string()),
        ],
        None => Vec::new(),
    };
    let y_labels: Vec<Span> = vec![
        Span::raw(format!("{:.2}", y_min)),
        Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.2}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", spec.title)),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_label.clone())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label.clone())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}
