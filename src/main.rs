//! Brewery Atlas main entry point
//!
//! Runs one crawl, writes the dataset to CSV, reads the head of the file back
//! as a smoke check, and prints the crawl report.

use anyhow::Context;
use brewery_atlas::config::{load_config_with_hash, validate, Config};
use brewery_atlas::crawler::crawl;
use brewery_atlas::output::{print_preview, print_report, read_preview, CsvOutput, DatasetSink};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Brewery Atlas: a paginated brewery directory crawler
///
/// Collects every brewery listed on the directory site into one CSV file.
/// With no arguments the built-in defaults are used.
#[derive(Parser, Debug)]
#[command(name = "brewery-atlas")]
#[command(version = "1.0.0")]
#[command(about = "A paginated brewery directory crawler", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_deref())?;

    let outcome = tokio::select! {
        result = crawl(config.clone()) => result.context("crawl failed")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning crawl");
            anyhow::bail!("crawl interrupted");
        }
    };

    let csv_path = Path::new(&config.output.csv_path);
    let mut sink = CsvOutput::new(csv_path);
    sink.write_dataset(&outcome.dataset)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    let preview = read_preview(csv_path, config.output.preview_rows)
        .with_context(|| format!("failed to read back {}", csv_path.display()))?;
    print_preview(&preview);
    println!();

    print_report(&outcome.report);

    if !outcome.report.is_complete() {
        tracing::warn!(
            "Crawl finished with failures; {} regions aborted",
            outcome.report.aborted_regions().count()
        );
    }

    Ok(())
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let config = Config::default();
            validate(&config).context("default configuration is invalid")?;
            tracing::info!("Using default configuration");
            Ok(config)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("brewery_atlas=info,warn"),
            1 => EnvFilter::new("brewery_atlas=debug,info"),
            2 => EnvFilter::new("brewery_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
