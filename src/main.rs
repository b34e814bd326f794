mod cli;
mod conversion;
mod engine;
mod models;
mod policy;
mod source;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::cli::Cli;
use crate::conversion::{CryptoCompareRates, RateSource, StaticRates};
use crate::engine::{Outcome, ScanEngine};
use crate::policy::SelectionPolicy;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    //NOTE: The date filter is validated before the ledger is touched so a bad date never triggers a download.
    let policy = SelectionPolicy::from_filters(cli.token.as_deref(), cli.date.as_deref())?;
    let ledger = cli.ledger_source().ensure().await?;

    let timer = Instant::now();

    let outcome = match &cli.rates {
        Some(path) => {
            let rates = StaticRates::from_path(path)?;
            info!("Loaded {} rates from {}", rates.token_count(), path.display());
            scan(rates, &ledger, &policy).await?
        }
        None => scan(CryptoCompareRates::new(cli.conversion_api.as_str()), &ledger, &policy).await?
    };

    let duration = timer.elapsed();
    info!("Processed ledger in: {duration:?}");

    write_outcome_to_stdout(&outcome)?;

    Ok(())
}

async fn scan<R: RateSource>(rates: R, ledger: &Path, policy: &SelectionPolicy) -> Result<Outcome> {
    let engine = ScanEngine::new(Arc::new(rates));
    Ok(engine.run(ledger, policy).await?)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the result, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_outcome_to_stdout(outcome: &Outcome) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    outcome.write_to(&mut output)?;

    output.flush()?;

    Ok(())
}
