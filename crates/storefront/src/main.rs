//! Kruzhki Storefront - personalized mug shop in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! kruzhki-storefront
//!
//! # Custom catalog
//! kruzhki-storefront --catalog mugs.json
//!
//! # Replay a recorded session
//! kruzhki-storefront --script session.txt
//! ```
//!
//! # Architecture
//!
//! - `kruzhki-core` holds the cart, catalog and order state
//! - Askama text templates render the page to stdout
//! - Logs go to stderr via `tracing`, so rendered pages stay clean

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use kruzhki_storefront::{LogFormat, Result, Shell, StorefrontConfig, catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kruzhki-storefront")]
#[command(author, version, about = "Personalized mug storefront")]
struct Cli {
    /// JSON catalog file (overrides `STOREFRONT_CATALOG`)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kruzhki_storefront=info,kruzhki_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();

    // Configuration is loaded before tracing so the log format can be chosen
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(&cli, &config) {
        tracing::error!("Storefront failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &StorefrontConfig) -> Result<()> {
    let catalog_path = cli.catalog.as_ref().or(config.catalog_path.as_ref());
    let catalog = catalog::load(catalog_path.map(PathBuf::as_path))?;

    let mut shell = Shell::new(config, catalog);
    let mut out = io::stdout().lock();

    match &cli.script {
        Some(path) => {
            tracing::info!(script = %path.display(), "Replaying session script");
            shell.run(BufReader::new(File::open(path)?), &mut out)
        }
        None => shell.run(io::stdin().lock(), &mut out),
    }
}
