// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host/Datastore Pairing Check
//!
//! Evaluates an inventory snapshot and reports VMs using datastores that are
//! not paired with their current host.
//!
//! Run with: cargo run --bin pairing-check -- /path/to/snapshot.json
//!
//! Configuration comes from `PAIRING_*` environment variables (see
//! `PairingConfig::from_env`). When `NATS_URL` is set the report is also
//! published to `monitoring.pairing.<state>`.
//!
//! The process exits with the monitoring state code: 0 OK, 2 CRITICAL,
//! 3 UNKNOWN.

use anyhow::{Context, Result};
use cim_infrastructure_pairing::{
    CheckReport, InventorySnapshot, NatsConfig, NatsReportPublisher, PairingCheck, PairingConfig,
    PairingResult, PairingRun, ReportSink, ServiceState,
};
use tracing::{error, info};

/// Run the check, folding every failure into an aborted result
fn evaluate(snapshot_path: &str) -> PairingResult<PairingRun> {
    let config = PairingConfig::from_env()?;
    let snapshot = InventorySnapshot::load(snapshot_path)?;
    PairingCheck::new(config)?.run(&snapshot)
}

async fn publish(report: &CheckReport, nats_url: &str) -> Result<()> {
    let config = NatsConfig::default().with_servers(nats_url);
    let publisher = NatsReportPublisher::connect(config)
        .await
        .context("Failed to connect to NATS")?;
    publisher
        .publish(report)
        .await
        .context("Failed to publish report")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let snapshot_path = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PAIRING_SNAPSHOT").ok())
    {
        Some(path) => path,
        None => {
            println!(
                "{}: no inventory snapshot given (argument or PAIRING_SNAPSHOT)",
                ServiceState::Unknown
            );
            std::process::exit(ServiceState::Unknown.exit_code());
        }
    };

    let result = evaluate(&snapshot_path);
    if let Err(e) = &result {
        error!("Pairing check aborted: {}", e);
    }

    let report = CheckReport::from_result(&result);
    println!("{}", report.render());

    if let Ok(nats_url) = std::env::var("NATS_URL") {
        match publish(&report, &nats_url).await {
            Ok(()) => info!(report_id = %report.report_id, "Report published"),
            Err(e) => error!("Report publication failed: {:#}", e),
        }
    }

    std::process::exit(report.state.exit_code());
}
