use crate::app::App;
use crate::ui::widgets::charts::render_day_bars;
use crate::ui::widgets::loading::{render_idle, render_loading, with_source_banner};
use krishi_mate::cache::SlotView;
use krishi_mate::models::{DomainData, FarmerProfile, WeatherView};
use krishi_mate::DataDomain;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_farm(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_profile(app.farmer(), f, columns[0]);

    match app.slot(DataDomain::Weather) {
        SlotView::Ready(DomainData::Weather(view)) => render_conditions(view, f, columns[1]),
        SlotView::Loading => render_loading(app, f, columns[1], "Loading weather..."),
        _ => render_idle(f, columns[1], "Weather not loaded yet"),
    }
}

fn render_profile(farmer: Option<&FarmerProfile>, f: &mut Frame<'_>, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let lines = farmer.map_or_else(
        || vec![TextLine::from("No farmer profile")],
        |farmer| {
            let row = |name: &'static str, text: String| {
                TextLine::from(vec![
                    Span::styled(format!("{name}: "), label),
                    Span::styled(text, value),
                ])
            };
            vec![
                row("Name", farmer.display_name().to_string()),
                row("Mobile", farmer.mobile.clone()),
                row("Location", farmer.display_location().to_string()),
                row(
                    "Main crop",
                    farmer.main_crop.clone().unwrap_or_else(|| "-".to_string()),
                ),
                row(
                    "Farm size",
                    farmer
                        .farm_size
                        .as_ref()
                        .map_or_else(|| "-".to_string(), |size| format!("{size} acres")),
                ),
            ]
        },
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" My Farm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_conditions(view: &WeatherView, f: &mut Frame<'_>, area: Rect) {
    let area = with_source_banner(f, area, view.source);
    let alert_rows = u16::try_from(view.alerts.len()).unwrap_or(u16::MAX);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Min(6),
            Constraint::Length(alert_rows.saturating_add(2).min(6)),
        ])
        .split(area);

    let current = &view.current;
    let now = Paragraph::new(TextLine::from(vec![
        Span::styled(
            format!("{}  ", current.condition),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "{:.0}°C | Humidity {:.0}% | Wind {:.0} km/h | Rain {:.1} mm",
            current.temperature, current.humidity, current.wind_speed, current.rainfall
        )),
    ]))
    .block(
        Block::default()
            .title(format!(" Now in {} ", view.place))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(now, rows[0]);

    let temps: Vec<(&str, f64)> = view
        .weekly
        .iter()
        .map(|day| (day.day.as_str(), day.temp_max))
        .collect();
    let rain: Vec<(&str, f64)> = view
        .weekly
        .iter()
        .map(|day| (day.day.as_str(), day.rain))
        .collect();

    render_day_bars(f, rows[1], " Max temperature (°C) ", &temps, Color::Yellow, "°");
    render_day_bars(f, rows[2], " Rain (mm) ", &rain, Color::Blue, "");

    let alerts: Vec<TextLine<'_>> = if view.alerts.is_empty() {
        vec![TextLine::from(Span::styled(
            "No weather alerts this week",
            Style::default().fg(Color::Green),
        ))]
    } else {
        view.alerts
            .iter()
            .map(|alert| TextLine::from(Span::styled(alert.as_str(), Style::default().fg(Color::Red))))
            .collect()
    };
    let alerts = Paragraph::new(Text::from(alerts))
        .block(
            Block::default()
                .title(" Alerts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(alerts, rows[3]);
}
