// Copyright (c) 2025 - Cowboy AI, Inc.
//! Monitoring Report
//!
//! Turns a pairing run into the state, summary line and long output a
//! monitoring system consumes.
//!
//! | Run result                  | State      | Exit code |
//! |-----------------------------|------------|-----------|
//! | evaluated, no mismatches    | `OK`       | 0         |
//! | evaluated, mismatches found | `CRITICAL` | 2         |
//! | aborted with an error       | `UNKNOWN`  | 3         |
//!
//! An aborted run is never reported as clean.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::check::PairingRun;
use crate::errors::PairingResult;
use crate::validation::{MismatchRecord, MismatchedDatastore};

/// Service state understood by Nagios-compatible monitoring systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Lowercase label used in subjects
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Ok => "ok",
            ServiceState::Warning => "warning",
            ServiceState::Critical => "critical",
            ServiceState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_uppercase())
    }
}

/// Report for one pairing check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub state: ServiceState,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    pub vms_evaluated: usize,
    pub resource_pools_evaluated: usize,
    pub mismatched_vms: usize,
}

impl CheckReport {
    /// Build the report for a finished or aborted run
    pub fn from_result(result: &PairingResult<PairingRun>) -> Self {
        match result {
            Ok(run) => Self::from_run(run),
            Err(e) => Self::new(
                ServiceState::Unknown,
                format!("datastore pairing evaluation aborted: {}", e),
                Vec::new(),
                (0, 0, 0),
            ),
        }
    }

    fn from_run(run: &PairingRun) -> Self {
        let evaluation = &run.evaluation;
        let scope = format!(
            "evaluated {}, {}",
            count(evaluation.vms_evaluated, "VM", "VMs"),
            count(evaluation.resource_pools_evaluated, "resource pool", "resource pools")
        );

        let (state, summary) = if evaluation.is_clean() {
            (
                ServiceState::Ok,
                format!("No datastore pairing mismatches detected ({})", scope),
            )
        } else {
            (
                ServiceState::Critical,
                format!(
                    "{} with datastore pairing mismatches detected ({})",
                    count(evaluation.mismatch_count(), "VM", "VMs"),
                    scope
                ),
            )
        };

        let mut details: Vec<String> = evaluation
            .mismatches
            .iter()
            .map(|(vm, record)| mismatch_line(vm, record))
            .collect();

        let paired = run.index.datastore_names();
        if !paired.is_empty() {
            details.push(format!("Datastores paired with hosts: {}", paired.join(", ")));
        }

        Self::new(
            state,
            summary,
            details,
            (
                evaluation.vms_evaluated,
                evaluation.resource_pools_evaluated,
                evaluation.mismatch_count(),
            ),
        )
    }

    fn new(
        state: ServiceState,
        summary: String,
        details: Vec<String>,
        (vms_evaluated, resource_pools_evaluated, mismatched_vms): (usize, usize, usize),
    ) -> Self {
        Self {
            report_id: Uuid::now_v7(),
            generated_at: Utc::now(),
            state,
            summary,
            details,
            vms_evaluated,
            resource_pools_evaluated,
            mismatched_vms,
        }
    }

    /// Summary line followed by long output
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.state, self.summary);
        if !self.details.is_empty() {
            out.push_str("\n\n");
            out.push_str(
                &self
                    .details
                    .iter()
                    .map(|line| format!("* {}", line))
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
        out
    }
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { plural })
}

fn datastore_label(ds: &MismatchedDatastore) -> String {
    match &ds.tag {
        Some(tag) => format!("{} [{}]", ds.name, tag),
        None => format!("{} [not paired]", ds.name),
    }
}

fn mismatch_line(vm: &str, record: &MismatchRecord) -> String {
    format!(
        "{} on {} [{}]: {}",
        vm,
        record.host_name,
        record.host_tag,
        record
            .datastores
            .iter()
            .map(datastore_label)
            .collect::<Vec<_>>()
            .join(", ")
    )
}
