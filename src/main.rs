//! Multibar - text progress bars
//!
//! CLI entry point: renders one bar to stdout.

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use multibar::cli::{Cli, OutputFormat};
use multibar::client::ProgressbarClient;
use multibar::config::Config;
use multibar::signature::Chars;

fn setup_logging(verbose: bool) -> Result<()> {
    // Setup tracing subscriber - write to stderr, stdout carries the bar
    let mut filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

/// Fold command line overrides into the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(length) = cli.length {
        config.render.length = length;
    }
    if let Some(preset) = &cli.preset {
        config.render.preset = preset.clone();
        config.render.signature = None;
    }
    if !cli.glyphs.is_empty() {
        let chars = Chars::from_glyphs(cli.glyphs.as_slice()).context("Invalid glyphs")?;
        config.render.signature = Some(chars.to_signature());
    }
    if cli.report_only {
        config.contracts.raise_errors = false;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli)?;
    config.validate().context("Invalid configuration")?;

    debug!(
        current = %cli.current,
        total = %cli.total,
        length = %config.render.length,
        preset = %config.render.preset,
        "main: rendering"
    );

    let client = ProgressbarClient::from_config(&config)?;
    let report = client
        .get_report(cli.current, cli.total, config.render.length)
        .context("Failed to render progress bar")?;

    match cli.format {
        OutputFormat::Text => println!("{}", report.bar),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
