use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::models::NewsSource;

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| "Invalid tick rate".to_string())
        .and_then(|v| {
            if v > 0.0 && v <= 5.0 {
                Ok(v)
            } else {
                Err("Tick rate must be between 0 and 5 seconds".to_string())
            }
        })
}

#[derive(Parser, Debug)]
#[command(name = "fakenews-dash")]
#[command(about = "Browse news headlines and check them against a fake-news classifier")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Base URL of the prediction backend
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Path to a config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive dashboard (default)
    #[command(visible_aliases = &["dash", "d"])]
    Dashboard(DashboardArgs),

    /// Print the current headlines for a source
    #[command(visible_alias = "h")]
    Headlines {
        /// News source to fetch
        #[arg(short, long, value_enum, default_value = "bbc")]
        source: NewsSource,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Classify a piece of text
    #[command(visible_alias = "a")]
    Analyze {
        /// Headline or article text
        text: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DashboardArgs {
    /// Initially selected news source
    #[arg(short, long, value_enum, default_value = "bbc")]
    pub source: NewsSource,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Screen refresh interval in seconds (supports decimals, e.g. 0.1)
    #[arg(long, default_value = "0.1", value_parser = parse_tick_rate)]
    pub tick_rate: f64,
}

impl Default for DashboardArgs {
    fn default() -> Self {
        Self {
            source: NewsSource::Bbc,
            dark: false,
            tick_rate: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
