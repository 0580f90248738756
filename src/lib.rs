// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host-to-datastore pairing validation for virtualization inventories
//!
//! Hosts and datastores carry a classification custom attribute (for example
//! a location code). Datastores whose attribute matches a host's are
//! compatible with that host. Every VM must only use datastores compatible
//! with the host it currently runs on; VMs that do not are reported to a
//! monitoring system.
//!
//! ```text
//! InventorySnapshot ─> domain::Tagged ─> pairing::PairingIndex
//!                                              │
//!                 validation::evaluate_all <───┘
//!                              │
//!                   report::CheckReport ─> nats::ReportSink
//! ```
//!
//! The engine (`domain`, `pairing`, `validation`) is synchronous and free of
//! I/O. Snapshot loading, reporting and publication sit around it.

pub mod check;
pub mod config;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod nats;
pub mod pairing;
pub mod report;
pub mod subjects;
pub mod validation;

// Re-export commonly used types
pub use check::{PairingCheck, PairingRun};
pub use config::PairingConfig;
pub use domain::{
    Datastore, EntityId, Host, MissingTagPolicy, TagValue, Tagged, TaggedDatastore, TaggedHost,
    VirtualMachine,
};
pub use errors::{CompilationFailure, PairingError, PairingResult, PublishError, PublishResult};
pub use inventory::{InventorySnapshot, VmSelection};
pub use nats::{MemorySink, NatsConfig, NatsReportPublisher, ReportSink};
pub use pairing::{build_pairing_index, HostPairing, MatchMode, PairingIndex};
pub use report::{CheckReport, ServiceState};
pub use validation::{evaluate_all, validate_vm, Evaluation, IgnoreList, MismatchRecord, VmOutcome};
