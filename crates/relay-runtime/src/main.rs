//! `beacon-relay` entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use tracing::info;

use relay_runtime::cli::{Cli, Command, MonitorArgs, RelayArgs};
use relay_runtime::{feed_source, run_monitor, RelayRuntime, ReportFormat, RuntimeConfig};
use relay_telemetry::{init_telemetry, TelemetryConfig};

async fn relay(args: RelayArgs) -> Result<()> {
    let mut config =
        RuntimeConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);

    let runtime = RelayRuntime::bind(config.clone()).await?;
    info!(
        addr = %runtime.local_addr(),
        mode = %runtime.mode(),
        "Relay ready"
    );

    let source = feed_source(config.feed.as_deref()).await?;
    let summary = runtime.run(source).await?;
    info!(
        cycles = summary.cycles,
        batches = summary.batches_sent,
        records = summary.records_sent,
        "Relay stopped"
    );
    Ok(())
}

async fn monitor(args: MonitorArgs) -> Result<()> {
    let trusted: HashSet<String> = args.trusted.into_iter().collect();
    let format = if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    let batches = run_monitor(&args.addr, trusted, format).await?;
    info!(batches, "Relay closed the connection");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let _telemetry = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    match cli.command {
        Command::Relay(args) => relay(args).await,
        Command::Monitor(args) => monitor(args).await,
    }
}
