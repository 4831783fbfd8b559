use crate::app::App;
use crate::ui::widgets::loading::render_loading;
use krishi_mate::models::CropAdvice;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_recommendations(app: &App, f: &mut Frame<'_>, area: Rect) {
    let location = app
        .farmer()
        .map_or("your area", |farmer| farmer.display_location());

    let recommendations = match &app.recommendations.result {
        None => {
            render_loading(app, f, area, "Fetching crop recommendations...");
            return;
        }
        Some(Err(message)) => {
            let paragraph = Paragraph::new(vec![
                TextLine::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
                TextLine::from(""),
                TextLine::from(Span::styled("Press r to retry", Style::default().fg(Color::Gray))),
            ])
            .block(
                Block::default()
                    .title(format!(" Recommendations for {location} "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
            return;
        }
        Some(Ok(recommendations)) => recommendations,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let favorable_focused = app.recommendations.selected_favorable;
    render_advice_column(
        f,
        columns[0],
        " Recommended crops ",
        &recommendations.favorable,
        Color::Green,
        favorable_focused,
    );
    render_advice_column(
        f,
        columns[1],
        " Crops to avoid ",
        &recommendations.unfavorable,
        Color::Red,
        !favorable_focused,
    );
}

fn render_advice_column(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    advice: &[CropAdvice],
    color: Color,
    focused: bool,
) {
    let mut lines = Vec::new();
    if advice.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "Nothing to show",
            Style::default().fg(Color::Gray),
        )));
    }
    for item in advice {
        lines.push(TextLine::from(Span::styled(
            item.name.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        if !item.reason.is_empty() {
            lines.push(TextLine::from(item.reason.as_str()));
        }
        lines.push(TextLine::from(""));
    }

    let border = if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}
