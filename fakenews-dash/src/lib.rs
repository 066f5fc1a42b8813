pub mod backend;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod formatters;
pub mod logging;
pub mod models;

use anyhow::{Context, Result};
use backend::{HttpBackend, NewsBackend};
use cli::{Cli, Commands, DashboardArgs, OutputFormat};
use config::{Overrides, Settings};
use dashboard::DashboardOptions;
use indicatif::{ProgressBar, ProgressStyle};
use models::{NewsSource, Prediction};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Dashboard(DashboardArgs::default()));
    let interactive = matches!(command, Commands::Dashboard(_));

    if let Err(err) = logging::init(!interactive) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let settings = config::load_settings(&Overrides {
        config_path: cli.global.config,
        backend_url: cli.global.backend_url,
        timeout_secs: cli.global.timeout,
    })?;
    info!(backend = %settings.backend_url, timeout = ?settings.request_timeout, "settings loaded");
    let backend = build_backend(&settings)?;

    match command {
        Commands::Dashboard(args) => {
            let options = DashboardOptions {
                source: args.source,
                dark: args.dark,
                tick_rate: Duration::from_secs_f64(args.tick_rate),
            };
            dashboard::run_dashboard(Arc::new(backend), options).await
        }
        Commands::Headlines { source, format } => {
            show_headlines(&backend, source, format, &mut io::stdout()).await
        }
        Commands::Analyze { text, format } => {
            analyze(&backend, &text, format, &mut io::stdout()).await
        }
    }
}

fn build_backend(settings: &Settings) -> Result<HttpBackend> {
    HttpBackend::new(settings.backend_url.clone(), settings.request_timeout)
        .context("failed to build HTTP client")
}

async fn show_headlines(
    backend: &dyn NewsBackend,
    source: NewsSource,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let pb = spinner(format!("Fetching {} headlines...", source.display_name()));
    let result = backend.fetch_headlines(source).await;
    pb.finish_and_clear();
    let headlines = result.with_context(|| format!("could not fetch {} headlines", source.display_name()))?;

    write_headlines(out, source, &headlines, format)
}

fn write_headlines(
    out: &mut impl Write,
    source: NewsSource,
    headlines: &[String],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table if headlines.is_empty() => {
            writeln!(out, "No headlines returned for {}.", source.display_name())?;
        }
        OutputFormat::Table => {
            writeln!(out, "{}", formatters::format_headlines_table(source, headlines))?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", formatters::format_headlines_json(source, headlines)?)?;
        }
        OutputFormat::Csv => {
            write!(out, "{}", formatters::format_headlines_csv(source, headlines)?)?;
        }
    }
    Ok(())
}

async fn analyze(
    backend: &dyn NewsBackend,
    text: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let pb = spinner("Analyzing...".to_string());
    let result = backend.predict(text).await;
    pb.finish_and_clear();
    let prediction = result.context("prediction request failed")?;

    write_prediction(out, text, &prediction, format)
}

fn write_prediction(
    out: &mut impl Write,
    text: &str,
    prediction: &Prediction,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", formatters::format_prediction_table(text, prediction))?;
            write!(out, "{}", formatters::format_prediction_summary(prediction))?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", formatters::format_prediction_json(prediction)?)?;
        }
        OutputFormat::Csv => {
            write!(out, "{}", formatters::format_prediction_csv(text, prediction)?)?;
        }
    }
    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
