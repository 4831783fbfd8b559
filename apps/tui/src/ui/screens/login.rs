use crate::app::forms::{LoginField, MAIN_CROPS};
use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_login(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(80, 80, f.area().inner(Margin::new(2, 1)));

    let block = Block::default()
        .title("== Krishi-Mate: Farmer Sign Up ==")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner.inner(Margin::new(1, 0)));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    render_fields(app, f, columns[0]);
    render_picker(app, f, columns[1]);
    render_login_status(app, f, rows[1]);

    let hints = Paragraph::new(TextLine::from(vec![
        Span::styled("Tab/Enter", Style::default().fg(Color::Yellow)),
        Span::styled(": Next field | ", Style::default().fg(Color::Gray)),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::styled(": Pick | ", Style::default().fg(Color::Gray)),
        Span::styled("Enter on Main Crop", Style::default().fg(Color::Yellow)),
        Span::styled(": Sign up | ", Style::default().fg(Color::Gray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(": Quit", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hints, rows[2]);
}

fn render_fields(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.login;
    let mut lines = Vec::new();

    for field in LoginField::ALL {
        let focused = form.field == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut value = form.value(field).to_string();
        if focused && field != LoginField::MainCrop {
            value.push('▏');
        }
        let committed = match field {
            LoginField::State => form.state.is_some(),
            LoginField::District => form.district.is_some(),
            _ => true,
        };
        let value_style = if committed {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let optional = matches!(field, LoginField::FarmSize | LoginField::MainCrop);
        lines.push(TextLine::from(vec![
            Span::styled(if focused { "> " } else { "  " }, label_style),
            Span::styled(
                format!("{}{}: ", field.label(), if optional { " (optional)" } else { "" }),
                label_style,
            ),
            Span::styled(value, value_style),
        ]));
        lines.push(TextLine::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Your details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_picker(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.login;

    let (title, choices, selected): (&str, Vec<&str>, Option<usize>) = match form.field {
        LoginField::State => (" States ", form.choices(), Some(form.picker_index)),
        LoginField::District if form.state.is_none() => {
            (" Districts ", vec!["Choose a state first"], None)
        }
        LoginField::District => (" Districts ", form.choices(), Some(form.picker_index)),
        LoginField::MainCrop => (" Main crops ", MAIN_CROPS.to_vec(), form.main_crop),
        _ => (" Tips ", Vec::new(), None),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if choices.is_empty() {
        let message = if form.field.is_picker() {
            "No matches. Keep typing or press Backspace."
        } else {
            "Type to fill the highlighted field.\nState and district are picked from a list."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(choices.len(), visible, selected.unwrap_or(0));

    let items: Vec<ListItem<'_>> = choices
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, choice)| {
            let style = if Some(index) == selected {
                Style::default()
                    .bg(Color::Green)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled((*choice).to_string(), style))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_login_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (text, color) = if app.status_message.is_empty() {
        ("Sign up once; your profile is kept on this machine.", Color::Gray)
    } else if app.pending.is_some() {
        (app.status_message.as_str(), Color::Green)
    } else {
        (app.status_message.as_str(), Color::Yellow)
    };

    let paragraph = Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
