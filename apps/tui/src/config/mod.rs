use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_DATABASE_NAME: &str = "krishi.db";
pub const DEFAULT_CROP: &str = "Wheat";
pub const DEFAULT_INSIGHTS_COUNT: u32 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Runtime settings, read from the environment (and `.env`) once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub database_name: String,
    pub default_crop: String,
    pub insights_count: u32,
    pub http_timeout_secs: u64,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            default_crop: DEFAULT_CROP.to_string(),
            insights_count: DEFAULT_INSIGHTS_COUNT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl AppConfig {
    /// Loads `.env`, then layers environment variables over the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        Self {
            api_url: text("KRISHI_API_URL", defaults.api_url),
            geocoding_url: text("GEOCODING_URL", defaults.geocoding_url),
            forecast_url: text("FORECAST_URL", defaults.forecast_url),
            database_name: text("DATABASE_NAME", defaults.database_name),
            default_crop: text("DEFAULT_CROP", defaults.default_crop),
            insights_count: lookup("INSIGHTS_COUNT")
                .and_then(|value| value.trim().parse().ok())
                .filter(|count| *count > 0)
                .unwrap_or(defaults.insights_count),
            http_timeout_secs: lookup("KRISHI_HTTP_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.http_timeout_secs),
            log_dir: lookup("KRISHI_LOG_DIR")
                .filter(|value| !value.trim().is_empty())
                .map_or(defaults.log_dir, PathBuf::from),
        }
    }

    /// SQLx URL for the local profile store, relative to the current directory.
    pub fn database_url(&self) -> color_eyre::eyre::Result<String> {
        let base_dir = env::current_dir()?;
        database_url_for(&base_dir.join(&self.database_name))
    }
}

/// Formats a sqlite path the way SQLx expects it:
/// three slashes for absolute paths, two for relative ones.
pub fn database_url_for(database_path: &Path) -> color_eyre::eyre::Result<String> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;
    let clean_path = path_str.trim_start_matches('/');

    let database_url = if database_path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    };

    tracing::debug!(%database_url, "resolved database url");
    Ok(database_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("KRISHI_API_URL", "http://10.0.0.5:9000"),
            ("INSIGHTS_COUNT", "3"),
            ("DEFAULT_CROP", "Cotton"),
            ("KRISHI_HTTP_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.api_url, "http://10.0.0.5:9000");
        assert_eq!(config.insights_count, 3);
        assert_eq!(config.default_crop, "Cotton");
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn invalid_numbers_and_blanks_keep_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("INSIGHTS_COUNT", "many"),
            ("KRISHI_HTTP_TIMEOUT_SECS", "0"),
            ("KRISHI_API_URL", "   "),
        ]));

        assert_eq!(config.insights_count, DEFAULT_INSIGHTS_COUNT);
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn absolute_paths_get_three_slashes() -> color_eyre::eyre::Result<()> {
        let path = env::temp_dir().join("krishi-config-test").join("profile.db");
        let url = database_url_for(&path)?;
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("profile.db"));
        Ok(())
    }
}
