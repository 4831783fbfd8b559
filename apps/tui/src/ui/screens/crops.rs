use krishi_mate::fallback::crop_progress;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

const BAR_WIDTH: u16 = 20;

fn progress_bar(percent: u16) -> String {
    let width = usize::from(BAR_WIDTH);
    let filled = usize::from(percent.min(100)) * width / 100;
    format!(
        "{}{} {percent}%",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

pub fn render_crops(f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Crop"),
        Cell::from("Stage"),
        Cell::from("Growth"),
        Cell::from("Harvest in"),
        Cell::from("Health"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = crop_progress().into_iter().map(|crop| {
        let health = match crop.health.as_str() {
            "Excellent" => Color::Green,
            "Good" => Color::Cyan,
            _ => Color::Yellow,
        };
        Row::new(vec![
            Cell::from(crop.name),
            Cell::from(crop.stage),
            Cell::from(progress_bar(crop.progress)).style(Style::default().fg(Color::Green)),
            Cell::from(format!("{} days", crop.days_to_harvest)),
            Cell::from(crop.health).style(Style::default().fg(health)),
        ])
        .height(2)
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(BAR_WIDTH + 6),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(" Crop Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(50).chars().filter(|c| *c == '█').count(), 10);
        assert!(progress_bar(150).starts_with(&"█".repeat(usize::from(BAR_WIDTH))));
    }
}
