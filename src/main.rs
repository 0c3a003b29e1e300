use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pairform::cli::{Cli, Commands};
use pairform::config::Config;
use pairform::form::Validator;
use pairform::models::FieldPair;
use pairform::tui;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "pairform=info");
    }

    // Initialize logging to a file; stderr would corrupt the TUI screen
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "pairform.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { delay_ms, export } => {
            let mut config = Config::from_env()?;
            if let Some(delay_ms) = delay_ms {
                config.submit_delay_ms = delay_ms;
            }
            if export.is_some() {
                config.export_path = export;
            }
            config.validate()?;

            info!("Launching form with {} options", config.options.len());
            tui::run(config).await
        }

        Commands::Validate { input, strict } => {
            let config = Config::from_env()?;
            config.validate()?;

            let json = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let pairs: Vec<FieldPair> = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            let validator = if strict {
                Validator::with_known_options(&config.options)
            } else {
                Validator::new()
            };
            let report = validator.validate(&pairs);

            if report.is_valid() {
                println!("Valid: {} field pair(s)", pairs.len());
                return Ok(());
            }

            if let Some(ref message) = report.collection_error {
                println!("Collection: {}", message);
            }
            for error in &report.field_errors {
                println!(
                    "Pair {}, {}: {}",
                    error.index + 1,
                    error.field.as_str(),
                    error.message
                );
            }
            std::process::exit(1);
        }
    }
}
