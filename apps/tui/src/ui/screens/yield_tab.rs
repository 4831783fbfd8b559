use crate::app::forms::YieldField;
use crate::app::App;
use crate::ui::widgets::loading::render_loading;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_yield(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.yield_form;

    if form.metadata.is_none() {
        if let Some(error) = &form.metadata_error {
            let paragraph = Paragraph::new(vec![
                TextLine::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                TextLine::from(""),
                TextLine::from(Span::styled("Press r to retry", Style::default().fg(Color::Gray))),
            ])
            .block(
                Block::default()
                    .title(" Predict Yield ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        } else {
            render_loading(app, f, area, "Loading form data...");
        }
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(app, f, columns[0]);
    render_result(app, f, columns[1]);
}

fn render_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.yield_form;
    let focused_field = form.field();
    let mut lines = vec![TextLine::from("")];

    for field in YieldField::ALL {
        let focused = field == focused_field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = form.value(field);
        let shown = match (field, value.is_empty()) {
            (YieldField::Area, _) if focused => format!("{value}▏"),
            (YieldField::Area, true) => "-".to_string(),
            (YieldField::Area, false) => value.to_string(),
            (_, true) if form.options(field).is_empty() => "(no options)".to_string(),
            (_, true) => "< choose >".to_string(),
            (_, false) if focused => format!("< {value} >"),
            (_, false) => value.to_string(),
        };

        lines.push(TextLine::from(vec![
            Span::styled(if focused { "> " } else { "  " }, label_style),
            Span::styled(format!("{:<16}", field.label()), label_style),
            Span::styled(shown, Style::default().fg(Color::White)),
        ]));
        lines.push(TextLine::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Predict Yield ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_result(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Prediction ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match &app.yield_form.result {
        None => vec![TextLine::from(Span::styled(
            "Fill in the form and press Enter.",
            Style::default().fg(Color::Gray),
        ))],
        Some(Err(message)) => vec![TextLine::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))],
        Some(Ok(prediction)) => vec![
            TextLine::from(Span::styled(
                "Predicted yield",
                Style::default().fg(Color::Gray),
            )),
            TextLine::from(Span::styled(
                format!("{:.2} tonnes/hectare", prediction.predicted_yield),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from(""),
            TextLine::from(Span::styled(
                "Total production",
                Style::default().fg(Color::Gray),
            )),
            TextLine::from(Span::styled(
                format!("{:.2} tonnes", prediction.predicted_production),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
    };

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
