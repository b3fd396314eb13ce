// Main entry point for the lenspost bot

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lenspost::config::Config;
use lenspost::deps::BotDeps;
use lenspost::ledger::Ledger;
use lenspost::runner::Runner;

/// How often the scheduler checks whether a cycle is due.
const TICK: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "lenspost")]
#[command(about = "Posts a never-before-used stock photo with an AI caption")]
#[command(version)]
struct Cli {
    /// Run one post cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lenspost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        interval_minutes = config.post_interval.as_secs() / 60,
        ledger = %config.ledger_path.display(),
        "Configuration loaded"
    );

    let deps = BotDeps::from_config(&config);
    let runner = Runner::new(
        deps,
        Ledger::new(&config.ledger_path),
        &config.analysis_image_path,
        &config.publish_image_path,
    );

    tracing::info!("Starting lenspost");

    // First cycle immediately; the interval only paces the ones after it.
    runner.run().await;

    if cli.once {
        tracing::info!("One-shot mode, exiting");
        return Ok(());
    }

    let mut next_due = Instant::now() + config.post_interval;
    loop {
        tokio::time::sleep(TICK).await;
        if Instant::now() >= next_due {
            runner.run().await;
            // Due time advances from the end of the run; a slow cycle
            // delays the next one rather than queueing it.
            next_due = Instant::now() + config.post_interval;
        }
    }
}
