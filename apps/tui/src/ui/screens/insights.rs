use crate::app::App;
use crate::ui::widgets::loading::{render_idle, render_loading, with_source_banner};
use krishi_mate::cache::SlotView;
use krishi_mate::models::{DomainData, InsightKind, InsightsView, Priority};
use krishi_mate::DataDomain;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_insights(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.slot(DataDomain::Insights) {
        SlotView::Ready(DomainData::Insights(view)) => render_view(view, f, area),
        SlotView::Loading => render_loading(app, f, area, "Gathering insights..."),
        _ => render_idle(f, area, "Insights not loaded yet"),
    }
}

const fn kind_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Tip => Color::Cyan,
        InsightKind::Success => Color::Green,
        InsightKind::Warning => Color::Red,
    }
}

const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

fn render_view(view: &InsightsView, f: &mut Frame<'_>, area: Rect) {
    let area = with_source_banner(f, area, view.source);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let alert_color = if view.active_alerts > 0 {
        Color::Red
    } else {
        Color::Green
    };
    let header = Paragraph::new(TextLine::from(vec![
        Span::styled(
            format!("{} active alerts", view.active_alerts),
            Style::default().fg(alert_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  |  {} insights", view.insights.len()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(
        Block::default()
            .title(" Smart Insights ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(header, rows[0]);

    let mut lines = Vec::new();
    for insight in &view.insights {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("[{}] ", insight.kind.label()),
                Style::default().fg(kind_color(insight.kind)),
            ),
            Span::styled(
                insight.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", insight.priority.as_str()),
                Style::default().fg(priority_color(insight.priority)),
            ),
        ]));
        lines.push(TextLine::from(insight.description.as_str()));
        lines.push(TextLine::from(""));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}
