// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pairing Check Pipeline
//!
//! ```text
//! InventorySnapshot + PairingConfig
//!     │
//!     ├─ tag hosts            (configured missing-attribute policy)
//!     ├─ tag datastores       (ignored datastores always tolerated)
//!     ├─ build_pairing_index  (literal or prefix mode)
//!     ├─ select VMs           (power state, ignored VMs, resource pools)
//!     └─ evaluate_all         (full datastore inventory for second stage)
//!             │
//!             ▼
//!        PairingRun { index, evaluation }
//! ```
//!
//! A run is a pure function of its inputs; nothing is cached between runs.

use tracing::{info, instrument};

use crate::config::PairingConfig;
use crate::domain::{tag_entities, MissingTagPolicy, Tagged, TaggedDatastore};
use crate::errors::PairingResult;
use crate::inventory::{InventorySnapshot, VmSelection};
use crate::pairing::{build_pairing_index, PairingIndex};
use crate::validation::{evaluate_all, Evaluation, IgnoreList};

/// Result of a successful pairing check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRun {
    pub index: PairingIndex,
    pub evaluation: Evaluation,
}

/// Runs the pairing check for one configuration
#[derive(Debug, Clone)]
pub struct PairingCheck {
    config: PairingConfig,
    ignore: IgnoreList,
}

impl PairingCheck {
    pub fn new(config: PairingConfig) -> PairingResult<Self> {
        config.validate()?;
        let ignore = config.ignore_list();
        Ok(Self { config, ignore })
    }

    /// Tag the snapshot entities and build the pairing index
    pub fn build_index(&self, snapshot: &InventorySnapshot) -> PairingResult<PairingIndex> {
        let hosts = tag_entities(
            &snapshot.hosts,
            &self.config.host_attribute,
            self.config.missing_attribute,
        )?;

        let datastores = snapshot
            .datastores
            .iter()
            .map(|ds| {
                let policy = if self.ignore.contains(&ds.name) {
                    MissingTagPolicy::Tolerate
                } else {
                    self.config.missing_attribute
                };
                Tagged::resolve(ds.clone(), &self.config.datastore_attribute, policy)
            })
            .collect::<PairingResult<Vec<TaggedDatastore>>>()?;

        build_pairing_index(&hosts, &datastores, &self.config.match_mode())
    }

    /// Evaluate every selected VM in the snapshot
    #[instrument(skip_all, fields(
        host_attribute = %self.config.host_attribute,
        datastore_attribute = %self.config.datastore_attribute
    ))]
    pub fn run(&self, snapshot: &InventorySnapshot) -> PairingResult<PairingRun> {
        let index = self.build_index(snapshot)?;

        let vms = VmSelection::from_config(&self.config).select(snapshot);
        info!(
            selected = vms.len(),
            total = snapshot.virtual_machines.len(),
            "virtual machines selected"
        );

        let evaluation = evaluate_all(vms, &index, &snapshot.datastores, &self.ignore)?;
        Ok(PairingRun { index, evaluation })
    }
}
