use crate::app::App;
use crate::ui::widgets::charts::render_day_bars;
use crate::ui::widgets::loading::{render_idle, render_loading, with_source_banner};
use krishi_mate::cache::SlotView;
use krishi_mate::models::{DomainData, WeatherAnalysis};
use krishi_mate::DataDomain;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_weather(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.slot(DataDomain::WeatherAnalysis) {
        SlotView::Ready(DomainData::WeatherAnalysis(analysis)) => {
            render_analysis(analysis, f, area);
        }
        SlotView::Loading => render_loading(app, f, area, "Analysing weather for your crop..."),
        _ => render_idle(f, area, "Weather analysis not loaded yet"),
    }
}

fn render_analysis(analysis: &WeatherAnalysis, f: &mut Frame<'_>, area: Rect) {
    let area = with_source_banner(f, area, analysis.source);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(columns[0]);

    let current = &analysis.current;
    let now = Paragraph::new(vec![
        TextLine::from(Span::styled(
            current.condition.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(format!(
            "{:.0}°C | Humidity {:.0}% | Wind {:.0} km/h | Rain {:.1} mm",
            current.temperature, current.humidity, current.wind_speed, current.rainfall
        )),
    ])
    .block(
        Block::default()
            .title(format!(" Conditions for {} ", analysis.crop))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(now, left[0]);

    let forecast: Vec<(&str, f64)> = analysis
        .forecast
        .iter()
        .map(|day| (day.day.as_str(), day.temp))
        .collect();
    render_day_bars(f, left[1], " Forecast (°C) ", &forecast, Color::Yellow, "°");

    let mut lines = Vec::new();
    for insight in &analysis.insights {
        let color = match insight.kind.to_lowercase().as_str() {
            "warning" | "alert" => Color::Red,
            "success" => Color::Green,
            _ => Color::Cyan,
        };
        lines.push(TextLine::from(Span::styled(
            insight.message.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        if !insight.action.is_empty() {
            lines.push(TextLine::from(vec![
                Span::styled("→ ", Style::default().fg(Color::Gray)),
                Span::raw(insight.action.as_str()),
            ]));
        }
        lines.push(TextLine::from(""));
    }
    if lines.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "No advice for this week",
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" Farming advice ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}
