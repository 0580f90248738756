// Copyright (c) 2025 - Cowboy AI, Inc.
//! Report publication over NATS

use async_nats::{Client, ConnectOptions};
use futures::{Stream, StreamExt};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{PublishError, PublishResult};
use crate::report::CheckReport;
use crate::subjects;

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "pairing-check".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl NatsConfig {
    /// Configuration for a comma separated server list
    pub fn with_servers(mut self, servers: &str) -> Self {
        self.servers = servers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

/// Decode a published report payload
pub fn decode_report(payload: &[u8]) -> PublishResult<CheckReport> {
    serde_json::from_slice(payload).map_err(|e| PublishError::Deserialization(e.to_string()))
}

/// Destination for finished check reports
#[async_trait::async_trait]
pub trait ReportSink: Send + Sync {
    async fn publish(&self, report: &CheckReport) -> PublishResult<()>;
}

/// Publishes reports on `monitoring.pairing.<state>`
#[derive(Clone)]
pub struct NatsReportPublisher {
    client: Client,
}

impl NatsReportPublisher {
    /// Connect with the given configuration
    pub async fn connect(config: NatsConfig) -> PublishResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self { client })
    }

    /// Subscribe to every pairing report, decoding payloads
    pub async fn subscribe_reports(
        &self,
    ) -> PublishResult<impl Stream<Item = PublishResult<CheckReport>>> {
        let subject = subjects::all_pairing_reports();
        let subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .map_err(|e| PublishError::Subscribe(e.to_string()))?;

        info!("Subscribed to subject: {}", subject);
        Ok(subscriber.map(|msg| decode_report(&msg.payload)))
    }

}

#[async_trait::async_trait]
impl ReportSink for NatsReportPublisher {
    async fn publish(&self, report: &CheckReport) -> PublishResult<()> {
        let subject = subjects::pairing_report(report.state);
        let payload = serde_json::to_vec(report)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .map_err(|e| PublishError::Publish(e.to_string()))?;
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Publish(e.to_string()))?;

        debug!(report_id = %report.report_id, "Published report to subject: {}", subject);
        Ok(())
    }
}

/// Keeps reports in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<CheckReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports published so far
    pub fn reports(&self) -> Vec<CheckReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ReportSink for MemorySink {
    async fn publish(&self, report: &CheckReport) -> PublishResult<()> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|e| PublishError::Publish(e.to_string()))?;
        reports.push(report.clone());
        Ok(())
    }
}
