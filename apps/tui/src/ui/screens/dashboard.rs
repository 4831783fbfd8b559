use crate::app::App;
use crate::ui::screens::{
    chat, crops, farm, insights, market, recommendations, sensors, weather, yield_tab,
};
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use krishi_mate::Tab;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Tab bar
            Constraint::Min(8),    // Tab content
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_header(app, f, layout[0]);
    render_tab_bar(app, f, layout[1]);

    let content = layout[2];
    match app.tab {
        Tab::Farm => farm::render_farm(app, f, content),
        Tab::Sensors => sensors::render_sensors(f, content),
        Tab::Crops => crops::render_crops(f, content),
        Tab::Market => market::render_market(app, f, content),
        Tab::Yield => yield_tab::render_yield(app, f, content),
        Tab::Recommendations => recommendations::render_recommendations(app, f, content),
        Tab::Weather => weather::render_weather(app, f, content),
        Tab::Insights => insights::render_insights(app, f, content),
        Tab::Chat => chat::render_chat(app, f, content),
    }

    render_status_section(app, f, layout[3]);
    render_shortcuts(app, f, layout[4]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Krishi-Mate ==")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let (name, location) = app
        .farmer()
        .map_or(("Farmer", "your area"), |farmer| {
            (farmer.display_name(), farmer.display_location())
        });

    let line = TextLine::from(vec![
        Span::styled(
            format!("Namaste, {name}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(Color::Gray)),
        Span::styled(location.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  |  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("Crop: {}", app.orchestrator.context().crop),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_tab_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!("{} {}", tab.index() + 1, tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        let loading = app.orchestrator.cache().any_pending();
        Text::from(Span::styled(
            if loading { "Fetching farm data..." } else { "" },
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error")
            || app.status_message.starts_with("Could not")
        {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint_span(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn shortcuts_line(tab: Tab) -> TextLine<'static> {
    let mut spans = vec![key_span("Tab"), hint_span(": Next tab | ")];

    match tab {
        Tab::Market => spans.extend([
            key_span("↑/↓"),
            hint_span(": Select crop | "),
            key_span("r"),
            hint_span(": Refresh | "),
        ]),
        Tab::Yield => spans.extend([
            key_span("↑/↓"),
            hint_span(": Field | "),
            key_span("←/→"),
            hint_span(": Choose | "),
            key_span("Enter"),
            hint_span(": Predict | "),
        ]),
        Tab::Recommendations => spans.extend([key_span("r"), hint_span(": Retry | ")]),
        Tab::Chat => {
            return TextLine::from(vec![
                key_span("Tab"),
                hint_span(": Next tab | "),
                key_span("Enter"),
                hint_span(": Send | "),
                key_span("F2"),
                hint_span(": Attach image | "),
                key_span("Esc"),
                hint_span(": Clear | "),
                key_span("F1"),
                hint_span(": Help"),
            ]);
        }
        _ => {}
    }

    spans.extend([
        key_span("1-9"),
        hint_span(": Jump | "),
        key_span("?"),
        hint_span(": Help | "),
        key_span("L"),
        hint_span(": Log out | "),
        key_span("q"),
        hint_span(": Quit"),
    ]);
    TextLine::from(spans)
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph = Paragraph::new(shortcuts_line(app.tab)).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn help_entry(key: &'static str, text: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {text}")),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Krishi-Mate",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Weather, mandi prices, insights, yield prediction and crop advice for your farm.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        help_entry("Tab / Shift+Tab", "Next / previous tab"),
        help_entry("1-9", "Jump to a tab (outside text fields)"),
        help_entry("? / F1", "Toggle this help popup"),
        help_entry("r", "Refresh market rates or retry recommendations"),
        help_entry("L", "Log out and clear the stored profile"),
        help_entry("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Tabs:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    lines.extend(
        Tab::ALL
            .iter()
            .map(|tab| TextLine::from(format!("  {} - {}", tab.index() + 1, tab.label()))),
    );

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![Span::styled(
        "CLI Options:",
        Style::default().add_modifier(Modifier::BOLD),
    )]));

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
