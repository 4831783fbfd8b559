mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use krishi_mate::backend::http::HttpBackend;
use krishi_mate::backend::FarmBackend;
use krishi_mate::config::AppConfig;
use krishi_mate::db::{create_database_pool, ProfileStore};
use krishi_mate::logging::init_logging;
use krishi_mate::models::FarmerProfile;
use krishi_mate::orchestrator::Orchestrator;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env();

    // Dropping the guard flushes the log file
    let _log_guard = init_logging(&config.log_dir, args.debug)?;

    let pool = create_database_pool(&config.database_url()?).await?;
    let profile = ProfileStore::init(pool).await?;
    let backend: Arc<dyn FarmBackend> = Arc::new(HttpBackend::new(&config)?);

    if args.headless || !is_terminal() {
        let farmer = headless_farmer(profile.get(), args.location.as_deref());
        if farmer.is_none() {
            tracing::warn!("no stored profile or --location, fetching demo data");
        }
        let context = App::fetch_context(farmer.as_ref(), &config);
        let mut orchestrator = Orchestrator::new(backend, context);
        return event::run_headless(&mut orchestrator, farmer.as_ref(), args.json).await;
    }

    let context = App::fetch_context(profile.get(), &config);
    let orchestrator = Orchestrator::new(backend, context);
    let mut app = App::new(orchestrator, profile, config);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with an error");
    }
    result
}

/// The stored profile, with its location replaced by `--location` if given.
fn headless_farmer(stored: Option<&FarmerProfile>, location: Option<&str>) -> Option<FarmerProfile> {
    let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) else {
        return stored.cloned();
    };
    Some(FarmerProfile {
        location: location.to_string(),
        ..stored.cloned().unwrap_or_default()
    })
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::pune_farmer;

    #[test]
    fn location_flag_overrides_stored_profile() {
        let stored = pune_farmer();
        let farmer = headless_farmer(Some(&stored), Some(" Nashik, Maharashtra "));
        assert_eq!(
            farmer.as_ref().map(|f| (f.name.as_str(), f.location.as_str())),
            Some(("Asha", "Nashik, Maharashtra"))
        );
    }

    #[test]
    fn no_profile_and_no_flag_means_no_farmer() {
        assert_eq!(headless_farmer(None, Some("  ")), None);
    }
}
