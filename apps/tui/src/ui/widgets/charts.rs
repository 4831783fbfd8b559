use krishi_mate::models::{CropPrice, SensorReading};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

fn render_empty(f: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Padded y bounds so a flat series still gets a visible line.
fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(max.abs() * 0.02).max(1.0);
    [(min - pad).max(0.0), max + pad]
}

pub fn render_price_chart(f: &mut Frame<'_>, area: Rect, crop: &CropPrice) {
    let title = format!(" {} price trend ", crop.name);
    if crop.price_history.len() < 2 {
        render_empty(f, area, &title, "No price history");
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f64, f64)> = crop
        .price_history
        .iter()
        .enumerate()
        .map(|(index, point)| (index as f64, point.price))
        .collect();

    let color = if crop.change() >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    let [low, high] = value_bounds(points.iter().map(|(_, price)| *price));

    let first = crop.price_history.first().map(|p| p.date.format("%d %b").to_string());
    let last = crop.price_history.last().map(|p| p.date.format("%d %b").to_string());
    let x_labels = vec![
        Span::raw(first.unwrap_or_default()),
        Span::raw(last.unwrap_or_default()),
    ];
    let y_labels = vec![
        Span::raw(format!("₹{low:.0}")),
        Span::raw(format!("₹{high:.0}")),
    ];

    let datasets = vec![Dataset::default()
        .name(format!("₹/{}", crop.unit))
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    #[allow(clippy::cast_precision_loss)]
    let x_max = (points.len() - 1) as f64;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([low, high])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// One bar per day. `scale` keeps one decimal of small values such as rain.
pub fn render_day_bars(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    days: &[(&str, f64)],
    color: Color,
    unit: &str,
) {
    if days.is_empty() {
        render_empty(f, area, title, "No forecast available");
        return;
    }

    let scale = 10.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bars: Vec<Bar<'_>> = days
        .iter()
        .map(|(day, value)| {
            Bar::default()
                .value((value.max(0.0) * scale).round() as u64)
                .text_value(format!("{value:.0}{unit}"))
                .label(TextLine::from((*day).to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_value = days
        .iter()
        .map(|(_, value)| (value.max(0.0) * scale).round() as u64)
        .max()
        .unwrap_or(0)
        .max(1);

    let width = (area.width.saturating_sub(2) / u16::try_from(days.len()).unwrap_or(1))
        .saturating_sub(1)
        .clamp(3, 8);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(width);

    f.render_widget(chart, area);
}

pub fn render_sensor_history(f: &mut Frame<'_>, area: Rect, reading: &SensorReading) {
    if reading.history.is_empty() {
        render_empty(f, area, "Today", "No readings");
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f64, f64)> = reading
        .history
        .iter()
        .enumerate()
        .map(|(index, (_, value))| (index as f64, *value))
        .collect();
    let [low, high] = value_bounds(points.iter().map(|(_, value)| *value));

    let x_labels = vec![
        Span::raw(reading.history.first().map(|(t, _)| t.clone()).unwrap_or_default()),
        Span::raw(reading.history.last().map(|(t, _)| t.clone()).unwrap_or_default()),
    ];

    #[allow(clippy::cast_precision_loss)]
    let x_max = (points.len().max(2) - 1) as f64;

    let chart = Chart::new(vec![Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)])
    .x_axis(
        Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, x_max])
            .labels(x_labels),
    )
    .y_axis(
        Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([low, high])
            .labels(vec![
                Span::raw(format!("{low:.0}")),
                Span::raw(format!("{high:.0}")),
            ]),
    );

    f.render_widget(chart, area);
}
