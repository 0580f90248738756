// Copyright (c) 2025 - Cowboy AI, Inc.
//! VM Pairing Validator
//!
//! Checks that every datastore a VM uses is compatible with the VM's
//! current host.
//!
//! # Flow
//!
//! ```text
//! VM ─> host reference ─> index entry ─> bound − compatible
//!        │ missing          │ absent         │
//!        ▼                  ▼                ▼ for each leftover ID
//!  HostReferenceMissing  IndexDesynchronized  resolve name:
//!                                               1. pairing index
//!                                               2. full datastore inventory
//!                                               3. neither → DatastoreUnresolvable
//!                                             ignored name → dropped
//!                                             otherwise   → mismatch
//! ```
//!
//! The pairing index only holds datastores whose attribute matched some
//! host. An untagged datastore is never indexed, so a miss in the index
//! alone cannot tell "does not exist" from "exists but unpaired"; the
//! second stage against the full inventory settles it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ignore::IgnoreList;
use crate::domain::{Datastore, EntityId, TagValue, TaggedDatastore, VirtualMachine};
use crate::errors::{PairingError, PairingResult};
use crate::pairing::PairingIndex;

/// A datastore bound to a VM but not compatible with its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchedDatastore {
    pub id: EntityId,
    pub name: String,
    /// Pairing attribute, `None` when the datastore is not in the pairing index
    pub tag: Option<TagValue>,
}

/// Failed validation of one VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchRecord {
    pub vm_id: EntityId,
    pub host_name: String,
    pub host_tag: TagValue,
    pub datastores: Vec<MismatchedDatastore>,
}

impl MismatchRecord {
    pub fn datastore_names(&self) -> Vec<String> {
        self.datastores.iter().map(|ds| ds.name.clone()).collect()
    }
}

/// Result of validating one VM
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmOutcome {
    Clean,
    Mismatched(MismatchRecord),
}

impl VmOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, VmOutcome::Clean)
    }

    /// Names of mismatched datastores, empty when clean
    pub fn mismatch_names(&self) -> Vec<String> {
        match self {
            VmOutcome::Clean => Vec::new(),
            VmOutcome::Mismatched(record) => record.datastore_names(),
        }
    }
}

/// Where a non-compatible datastore ID was found
enum Resolution<'a> {
    Indexed(&'a TaggedDatastore),
    Inventory(&'a Datastore),
    Missing,
}

fn resolve<'a>(
    datastore_id: &EntityId,
    index: &'a PairingIndex,
    inventory: &'a [Datastore],
) -> Resolution<'a> {
    if let Some(ds) = index.datastore(datastore_id) {
        return Resolution::Indexed(ds);
    }
    match inventory.iter().find(|ds| &ds.id == datastore_id) {
        Some(ds) => Resolution::Inventory(ds),
        None => Resolution::Missing,
    }
}

/// Validate the datastores of one VM against its host's compatible set
///
/// `inventory` is the full, unfiltered datastore list, including datastores
/// that carry no pairing attribute.
pub fn validate_vm(
    vm: &VirtualMachine,
    index: &PairingIndex,
    inventory: &[Datastore],
    ignore: &IgnoreList,
) -> PairingResult<VmOutcome> {
    let host_id = vm
        .host_id()
        .ok_or_else(|| PairingError::HostReferenceMissing {
            vm: vm.name.clone(),
        })?;

    let pairing = index
        .host(host_id)
        .ok_or_else(|| PairingError::IndexDesynchronized {
            host_id: host_id.clone(),
            vm: vm.name.clone(),
        })?;

    let compatible = pairing.datastore_ids();
    let mut seen = HashSet::new();
    let mut retained = Vec::new();

    for datastore_id in &vm.datastores {
        if compatible.contains(datastore_id) || !seen.insert(datastore_id) {
            continue;
        }

        let mismatch = match resolve(datastore_id, index, inventory) {
            Resolution::Indexed(ds) => MismatchedDatastore {
                id: ds.id().clone(),
                name: ds.name().to_string(),
                tag: Some(ds.tag().clone()),
            },
            Resolution::Inventory(ds) => {
                trace!(datastore = %ds.name, "resolved outside pairing index");
                MismatchedDatastore {
                    id: ds.id.clone(),
                    name: ds.name.clone(),
                    tag: None,
                }
            }
            Resolution::Missing => {
                return Err(PairingError::DatastoreUnresolvable {
                    datastore_id: datastore_id.clone(),
                    vm: vm.name.clone(),
                    host: pairing.host().name().to_string(),
                });
            }
        };

        if ignore.contains(&mismatch.name) {
            debug!(vm = %vm.name, datastore = %mismatch.name, "ignored datastore skipped");
            continue;
        }
        retained.push(mismatch);
    }

    if retained.is_empty() {
        return Ok(VmOutcome::Clean);
    }

    debug!(
        vm = %vm.name,
        host = pairing.host().name(),
        mismatches = retained.len(),
        "datastore pairing mismatch"
    );
    Ok(VmOutcome::Mismatched(MismatchRecord {
        vm_id: vm.id.clone(),
        host_name: pairing.host().name().to_string(),
        host_tag: pairing.host().tag().clone(),
        datastores: retained,
    }))
}
