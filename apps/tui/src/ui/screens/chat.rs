use crate::app::{App, PendingAction};
use krishi_mate::models::{ChatMessage, MessageKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Greedy word wrap. Words longer than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(index, _)| index);
                let rest = word.split_off(split);
                lines.push(word);
                word = rest;
            }

            let needed = current.chars().count()
                + usize::from(!current.is_empty())
                + word.chars().count();
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn message_lines(message: &ChatMessage, width: usize) -> Vec<TextLine<'static>> {
    let (who, color) = match message.kind {
        MessageKind::User => ("You", Color::Cyan),
        MessageKind::Bot => ("Krishi-Mate", Color::Green),
    };

    let mut lines = vec![TextLine::from(vec![
        Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if message.image.is_some() {
        lines.push(TextLine::from(Span::styled(
            "[image attached]",
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.extend(
        wrap_text(&message.content, width)
            .into_iter()
            .map(TextLine::from),
    );
    lines.push(TextLine::from(""));
    lines
}

pub fn render_chat(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let history_block = Block::default()
        .title(" AI Farming Assistant ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = history_block.inner(rows[0]);
    let width = inner.width as usize;
    let height = inner.height as usize;

    let mut lines: Vec<TextLine<'static>> = app
        .chat
        .messages
        .iter()
        .flat_map(|message| message_lines(message, width))
        .collect();
    if matches!(app.pending, Some(PendingAction::SendChat(_))) {
        lines.push(TextLine::from(Span::styled(
            "Krishi-Mate is typing...",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Scroll counts lines up from the newest message.
    let max_scroll = lines.len().saturating_sub(height);
    let from_top = max_scroll.saturating_sub(app.chat.scroll.min(max_scroll));
    let visible: Vec<TextLine<'static>> = lines.into_iter().skip(from_top).take(height).collect();

    f.render_widget(
        Paragraph::new(Text::from(visible)).block(history_block),
        rows[0],
    );

    let (title, color) = if app.chat.attaching {
        (" Image path (Enter to attach, Esc to cancel) ", Color::Magenta)
    } else {
        (" Ask about crops, weather or prices (F2 to attach an image) ", Color::Cyan)
    };
    let input = Paragraph::new(TextLine::from(vec![
        Span::styled("> ", Style::default().fg(color)),
        Span::raw(app.chat.input.clone()),
        Span::styled("▏", Style::default().fg(color)),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(input, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("sow wheat after the rain", 10),
            vec!["sow wheat", "after the", "rain"]
        );
    }

    #[test]
    fn splits_words_longer_than_width() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn keeps_blank_lines_between_paragraphs() {
        assert_eq!(wrap_text("a\n\nb", 5), vec!["a", "", "b"]);
    }
}
