use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "krishi-mate",
    version,
    about = "Farmer dashboard: weather, mandi prices, insights and crop advice"
)]
pub struct CliArgs {
    /// Fetch every data domain, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Override the Krishi-Mate backend URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Location for headless mode, e.g. "Pune, Maharashtra"
    #[arg(long, value_name = "\"DISTRICT, STATE\"")]
    pub location: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(url) = &self.api_url {
            std::env::set_var("KRISHI_API_URL", url);
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_flags() {
        let args = CliArgs::try_parse_from([
            "krishi-mate",
            "--headless",
            "--json",
            "--location",
            "Nashik, Maharashtra",
        ]);
        let args = args.unwrap();
        assert!(args.headless && args.json);
        assert_eq!(args.location.as_deref(), Some("Nashik, Maharashtra"));
        assert_eq!(args.api_url, None);
    }

    #[test]
    fn help_lists_overrides() {
        let help = CliArgs::help_text();
        assert!(help.contains("--api-url"));
        assert!(help.contains("--db"));
    }
}
