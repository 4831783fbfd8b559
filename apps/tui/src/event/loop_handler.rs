use color_eyre::Result;
use crossterm::event::{self, Event};
use krishi_mate::cache::TabCache;
use krishi_mate::fetch::FetchContext;
use krishi_mate::models::{
    DataSource, DomainData, FarmerProfile, InsightsView, MarketSummary, MarketView,
    WeatherAnalysis, WeatherView,
};
use krishi_mate::orchestrator::Orchestrator;
use krishi_mate::DataDomain;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use tokio::task::JoinHandle;

use crate::app::{handle_input, ActionOutcome, App};
use crate::ui;

/// Fetch every data domain for the current context, then print a summary
/// instead of opening the dashboard.
pub async fn run_headless(
    orchestrator: &mut Orchestrator,
    farmer: Option<&FarmerProfile>,
    json: bool,
) -> Result<()> {
    for domain in DataDomain::ALL {
        orchestrator.request(domain);
    }
    while let Some((domain, stored)) = orchestrator.next_completion().await {
        tracing::debug!(%domain, stored, "headless fetch finished");
    }

    let summary = build_headless_summary(orchestrator.cache(), orchestrator.context(), farmer);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_headless_text(&summary);
    }

    Ok(())
}

#[derive(Serialize)]
struct HeadlessSummary<'a> {
    farmer: Option<&'a str>,
    location: &'a str,
    crop: &'a str,
    weather: Option<&'a WeatherView>,
    market: Option<&'a MarketView>,
    market_summary: Option<MarketSummary>,
    insights: Option<&'a InsightsView>,
    weather_analysis: Option<&'a WeatherAnalysis>,
}

fn build_headless_summary<'a>(
    cache: &'a TabCache,
    context: &'a FetchContext,
    farmer: Option<&'a FarmerProfile>,
) -> HeadlessSummary<'a> {
    let mut summary = HeadlessSummary {
        farmer: farmer.map(FarmerProfile::display_name),
        location: &context.location,
        crop: &context.crop,
        weather: None,
        market: None,
        market_summary: None,
        insights: None,
        weather_analysis: None,
    };

    for domain in DataDomain::ALL {
        match cache.get(domain) {
            Some(DomainData::Weather(view)) => summary.weather = Some(view),
            Some(DomainData::Market(view)) => {
                summary.market_summary = Some(view.summary());
                summary.market = Some(view);
            }
            Some(DomainData::Insights(view)) => summary.insights = Some(view),
            Some(DomainData::WeatherAnalysis(view)) => summary.weather_analysis = Some(view),
            None => {}
        }
    }

    summary
}

const fn source_tag(source: DataSource) -> &'static str {
    match source {
        DataSource::Live => "",
        DataSource::Demo => " (demo data)",
    }
}

fn render_headless_text(summary: &HeadlessSummary<'_>) {
    println!("\nKrishi-Mate");
    println!("===========");
    if let Some(name) = summary.farmer {
        println!("Farmer: {name}");
    }
    println!("Location: {}", summary.location);
    println!("Crop: {}", summary.crop);

    if let Some(weather) = summary.weather {
        println!("\nWeather in {}{}:", weather.place, source_tag(weather.source));
        println!(
            "- Now: {} | {:.0}°C | humidity {:.0}% | wind {:.0} km/h",
            weather.current.condition,
            weather.current.temperature,
            weather.current.humidity,
            weather.current.wind_speed
        );
        for day in &weather.weekly {
            println!(
                "- {}: {:.0}°C, {:.1} mm, {}",
                day.day, day.temp_max, day.rain, day.condition
            );
        }
        for alert in &weather.alerts {
            println!("! {alert}");
        }
    }

    if let Some(market) = summary.market {
        println!("\nMandi Rates{}:", source_tag(market.source));
        for price in &market.prices {
            println!(
                "- {} | ₹{:.0}/{} | {:+.1}% | {}",
                price.name,
                price.current_price,
                price.unit,
                price.change_percent(),
                price.mandi
            );
        }
    }
    if let Some(stats) = &summary.market_summary {
        println!(
            "Gainers: {} | Losers: {}",
            stats.gainers, stats.losers
        );
        if let Some((name, percent)) = &stats.best {
            println!("Best performer: {name} ({percent:+.1}%)");
        }
    }

    if let Some(insights) = summary.insights {
        println!(
            "\nInsights{} ({} active alerts):",
            source_tag(insights.source),
            insights.active_alerts
        );
        for insight in &insights.insights {
            println!(
                "- [{}] {}: {}",
                insight.priority.as_str(),
                insight.title,
                insight.description
            );
        }
    }

    if let Some(analysis) = summary.weather_analysis {
        println!(
            "\nWeather Analysis for {}{}:",
            analysis.crop,
            source_tag(analysis.source)
        );
        for insight in &analysis.insights {
            println!("- {}: {} -> {}", insight.kind, insight.message, insight.action);
        }
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Land finished fetches and advance the spinner
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }

        if let Some(action) = &app.pending {
            tracing::debug!(?action, "running queued action");
            if let Some(task) = app.begin_pending().await {
                wait_for_action(terminal, app, task, EVENT_POLL_TIMEOUT).await?;
            }
        }
    }
    Ok(())
}

/// Keeps drawing and landing cache fetches while a queued backend call
/// runs. Keys pressed meanwhile go through `handle_input`, which ignores
/// them until the action is done.
async fn wait_for_action(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut task: JoinHandle<ActionOutcome>,
    frame_ms: u64,
) -> Result<()> {
    let mut frames = tokio::time::interval(std::time::Duration::from_millis(frame_ms));

    loop {
        tokio::select! {
            outcome = &mut task => {
                app.finish_action(outcome);
                return Ok(());
            }
            _ = frames.tick() => {
                app.tick();
                if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                    task.abort();
                    return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
                }
                while matches!(event::poll(std::time::Duration::ZERO), Ok(true)) {
                    if let Ok(Event::Key(key)) = event::read() {
                        handle_input(app, key.code);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{pune_farmer, OfflineBackend};
    use std::sync::Arc;

    fn offline_orchestrator(location: &str) -> Orchestrator {
        Orchestrator::new(
            Arc::new(OfflineBackend),
            FetchContext {
                location: location.to_string(),
                crop: "Sugarcane".to_string(),
                insights_count: 5,
            },
        )
    }

    #[tokio::test]
    async fn headless_summary_covers_every_domain() {
        let farmer = pune_farmer();
        let mut orchestrator = offline_orchestrator(&farmer.location);
        for domain in DataDomain::ALL {
            orchestrator.request(domain);
        }
        while orchestrator.next_completion().await.is_some() {}

        let summary =
            build_headless_summary(orchestrator.cache(), orchestrator.context(), Some(&farmer));
        assert_eq!(summary.farmer, Some("Asha"));
        assert!(summary.weather.is_some_and(|view| view.source.is_demo()));
        assert!(summary.market.is_some_and(|view| !view.prices.is_empty()));
        assert!(summary.insights.is_some());
        assert_eq!(
            summary.weather_analysis.map(|analysis| analysis.crop.as_str()),
            Some("Sugarcane")
        );
    }

    #[tokio::test]
    async fn headless_json_marks_demo_sources() -> Result<()> {
        let mut orchestrator = offline_orchestrator("Unknown");
        orchestrator.request(DataDomain::Market);
        while orchestrator.next_completion().await.is_some() {}

        let summary = build_headless_summary(orchestrator.cache(), orchestrator.context(), None);
        let value = serde_json::to_value(&summary)?;
        assert_eq!(value["market"]["source"], "demo");
        assert!(value["weather"].is_null());
        Ok(())
    }
}
