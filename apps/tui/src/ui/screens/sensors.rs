use crate::ui::widgets::charts::render_sensor_history;
use krishi_mate::fallback::sensor_readings;
use krishi_mate::models::SensorReading;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

fn status_color(status: &str) -> Color {
    match status {
        "optimal" => Color::Green,
        "low" => Color::Yellow,
        "high" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn render_sensors(f: &mut Frame<'_>, area: Rect) {
    let readings = sensor_readings();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (column, cell) in cells.iter().enumerate() {
            if let Some(reading) = readings.get(row_index * 2 + column) {
                render_sensor_card(reading, f, *cell);
            }
        }
    }
}

fn render_sensor_card(reading: &SensorReading, f: &mut Frame<'_>, area: Rect) {
    let status = reading.status();
    let color = status_color(status);

    let block = Block::default()
        .title(format!(" {} ", reading.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    let headline = Paragraph::new(TextLine::from(vec![
        Span::styled(
            format!("{:.0}{}", reading.value, reading.unit),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(status.to_uppercase(), Style::default().fg(color)),
    ]));
    f.render_widget(headline, parts[0]);

    let (min, max) = reading.range;
    let ratio = if max > min {
        ((reading.value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(ratio)
        .label(format!("{min:.0} to {max:.0}{}", reading.unit));
    f.render_widget(gauge, parts[1]);

    render_sensor_history(f, parts[2], reading);
}
