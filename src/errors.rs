// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for pairing evaluation and report publication

use thiserror::Error;

use crate::domain::{EntityId, EntityKind};

/// Reason a pairing index could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationFailure {
    #[error("no hosts supplied")]
    NoHosts,

    #[error("no datastores supplied")]
    NoDatastores,

    #[error("prefix matching requested with an empty {0} separator")]
    EmptySeparator(EntityKind),

    #[error("index contains no host entries")]
    EmptyIndex,
}

/// Errors that abort a pairing evaluation
///
/// Every variant aborts the current unit of work. `TagNotSet` is a data
/// quality condition and is only raised when missing attributes are not
/// tolerated; `TagRetrievalFailed` is an operational fault and is always
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Custom attribute absent from the entity
    #[error("custom attribute '{attribute}' not set on {kind} '{entity}'")]
    TagNotSet {
        kind: EntityKind,
        entity: String,
        attribute: String,
    },

    /// Custom attribute could not be read
    #[error("failed to retrieve custom attribute '{attribute}' from {kind} '{entity}': {reason}")]
    TagRetrievalFailed {
        kind: EntityKind,
        entity: String,
        attribute: String,
        reason: String,
    },

    /// Pairing index could not be built
    #[error("pairing compilation failed: {0}")]
    PairingCompilationFailed(CompilationFailure),

    /// VM has no resolvable current host
    #[error("host reference missing for VM '{vm}'; insufficient privileges?")]
    HostReferenceMissing { vm: String },

    /// VM host ID is not a key of the pairing index
    #[error("host '{host_id}' of VM '{vm}' not present in pairing index")]
    IndexDesynchronized { host_id: EntityId, vm: String },

    /// Datastore ID bound to a VM exists neither in the index nor in inventory
    #[error("datastore '{datastore_id}' of VM '{vm}' on host '{host}' not found in inventory")]
    DatastoreUnresolvable {
        datastore_id: EntityId,
        vm: String,
        host: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inventory snapshot could not be read or decoded
    #[error("Inventory snapshot error: {0}")]
    Snapshot(String),
}

/// Result type for pairing operations
pub type PairingResult<T> = Result<T, PairingError>;

impl From<CompilationFailure> for PairingError {
    fn from(failure: CompilationFailure) -> Self {
        PairingError::PairingCompilationFailed(failure)
    }
}

impl From<serde_json::Error> for PairingError {
    fn from(err: serde_json::Error) -> Self {
        PairingError::Snapshot(err.to_string())
    }
}

/// Errors that can occur while publishing reports
#[derive(Debug, Error)]
pub enum PublishError {
    /// NATS connection error
    #[error("NATS connection error: {0}")]
    Connection(String),

    /// NATS publish error
    #[error("NATS publish error: {0}")]
    Publish(String),

    /// NATS subscribe error
    #[error("NATS subscribe error: {0}")]
    Subscribe(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Result type for report publication
pub type PublishResult<T> = Result<T, PublishError>;

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        PublishError::Serialization(err.to_string())
    }
}
