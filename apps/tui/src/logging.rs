use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "krishi-mate.log";

/// Filter directive used when `RUST_LOG` is not set.
pub const fn default_directive(debug: bool) -> &'static str {
    if debug {
        "krishi_mate=debug,info"
    } else {
        "info"
    }
}

/// Sends tracing output to a daily rolling file under `log_dir`.
///
/// The terminal belongs to the dashboard, so nothing is written to stdout.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(log_dir: &Path, debug: bool) -> color_eyre::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(debug)))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialised");
    Ok(guard)
}
