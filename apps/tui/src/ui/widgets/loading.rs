use crate::app::App;
use krishi_mate::models::DataSource;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect, label: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(rows[1]);

    let throbber = Throbber::default()
        .label(label.to_string())
        .style(Style::default().fg(Color::Green))
        .throbber_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX);

    // Rendering advances a copy; the loop owns the real state.
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, columns[1], &mut state);
}

pub fn render_idle(f: &mut Frame<'_>, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );
    f.render_widget(paragraph, area);
}

/// Splits a one-line banner off the top of `area` for demo data and
/// returns what is left for the content.
pub fn with_source_banner(f: &mut Frame<'_>, area: Rect, source: DataSource) -> Rect {
    if !source.is_demo() {
        return area;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let banner = Paragraph::new(" Live data unavailable, showing demo data ")
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);
    chunks[1]
}
