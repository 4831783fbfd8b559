use crate::app::App;
use crate::ui::widgets::charts::render_price_chart;
use crate::ui::widgets::loading::{render_idle, render_loading, with_source_banner};
use crate::ui::widgets::tables::scroll_offset;
use krishi_mate::models::{CropPrice, MarketView};
use krishi_mate::DataDomain;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

fn change_color(change: f64) -> Color {
    if change > 0.0 {
        Color::Green
    } else if change < 0.0 {
        Color::Red
    } else {
        Color::Gray
    }
}

pub fn render_market(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(view) = app.market_view() else {
        if app.slot(DataDomain::Market).is_loading() {
            render_loading(app, f, area, "Fetching mandi rates...");
        } else {
            render_idle(f, area, "Market rates not loaded yet. Press r to fetch.");
        }
        return;
    };

    let area = with_source_banner(f, area, view.source);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_price_table(app, view, f, columns[0]);

    let detail = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(columns[1]);

    if let Some(crop) = view.prices.get(app.market.selected) {
        render_crop_detail(crop, f, detail[0]);
        render_price_chart(f, detail[1], crop);
    }
    render_market_summary(view, f, detail[2]);
}

fn render_price_table(app: &App, view: &MarketView, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Crop"),
        Cell::from("Price"),
        Cell::from("Change"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = view.prices.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.market.selected);

    let rows = view
        .prices
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, crop)| {
            let style = if index == app.market.selected {
                Style::default()
                    .bg(Color::Green)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let percent = crop.change_percent();
            Row::new(vec![
                Cell::from(crop.name.clone()),
                Cell::from(format!("₹{:.0}", crop.current_price)),
                Cell::from(format!("{percent:+.1}%"))
                    .style(Style::default().fg(change_color(percent))),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let title = if total_rows == 0 {
        " Mandi Rates ".to_string()
    } else {
        format!(" Mandi Rates ({} of {total_rows}) ", app.market.selected + 1)
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_crop_detail(crop: &CropPrice, f: &mut Frame<'_>, area: Rect) {
    let change = crop.change();
    let color = change_color(change);
    let lines = vec![
        TextLine::from(vec![
            Span::styled(
                format!("₹{:.0}", crop.current_price),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" per {}  ", crop.unit), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{change:+.0} ({:+.1}%)", crop.change_percent()),
                Style::default().fg(color),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Mandi: ", Style::default().fg(Color::Gray)),
            Span::raw(crop.mandi.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::Gray)),
            Span::raw(crop.last_updated.clone()),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(format!(" {} ", crop.name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_market_summary(view: &MarketView, f: &mut Frame<'_>, area: Rect) {
    let summary = view.summary();
    let best = summary.best.as_ref().map_or_else(
        || "-".to_string(),
        |(name, percent)| format!("{name} ({percent:+.1}%)"),
    );

    let lines = vec![
        TextLine::from(vec![
            Span::styled(
                format!("▲ {} gaining", summary.gainers),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!(" (avg {:+.1}%)   ", summary.avg_gain_percent),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("▼ {} falling", summary.losers),
                Style::default().fg(Color::Red),
            ),
            Span::styled(
                format!(" (avg {:+.1}%)", summary.avg_loss_percent),
                Style::default().fg(Color::Gray),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Best performer: ", Style::default().fg(Color::Gray)),
            Span::styled(
                best,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Market Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}
