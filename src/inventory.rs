// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Snapshot
//!
//! Materialized collections handed over by an external collector, plus the
//! VM selection rules applied before evaluation.
//!
//! # Snapshot Format
//!
//! ```json
//! {
//!   "hosts": [{"id": "host-1", "name": "esx01", "attributes": {...}}],
//!   "datastores": [{"id": "datastore-1", "name": "ds01", "attributes": {...}}],
//!   "virtual_machines": [{"id": "vm-1", "name": "web01", "host": "host-1",
//!                         "datastores": ["datastore-1"], "power_state": "poweredOn",
//!                         "resource_pool": "resgroup-8"}],
//!   "resource_pools": [{"id": "resgroup-8", "name": "Production"}]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PairingConfig;
use crate::domain::{normalize_name, Datastore, EntityId, Host, ResourcePool, VirtualMachine};
use crate::errors::{PairingError, PairingResult};

/// Point-in-time view of the inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub datastores: Vec<Datastore>,
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,
    #[serde(default)]
    pub resource_pools: Vec<ResourcePool>,
}

impl InventorySnapshot {
    pub fn from_json_str(json: &str) -> PairingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> PairingResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PairingError::Snapshot(format!("{}: {}", path.display(), e)))?;
        let snapshot = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            hosts = snapshot.hosts.len(),
            datastores = snapshot.datastores.len(),
            vms = snapshot.virtual_machines.len(),
            "inventory snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn resource_pool(&self, id: &EntityId) -> Option<&ResourcePool> {
        self.resource_pools.iter().find(|pool| &pool.id == id)
    }
}

/// Which VMs take part in an evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmSelection {
    ignored_vms: HashSet<String>,
    include_pools: HashSet<String>,
    exclude_pools: HashSet<String>,
    include_powered_off: bool,
}

fn lowered(names: &[String]) -> HashSet<String> {
    names
        .iter()
        .map(|n| normalize_name(n))
        .filter(|n| !n.is_empty())
        .collect()
}

impl VmSelection {
    pub fn from_config(config: &PairingConfig) -> Self {
        Self {
            ignored_vms: lowered(&config.ignored_vms),
            include_pools: lowered(&config.include_resource_pools),
            exclude_pools: lowered(&config.exclude_resource_pools),
            include_powered_off: config.include_powered_off,
        }
    }

    /// VMs from the snapshot that pass every filter, in snapshot order
    ///
    /// Pool filters match resource pool names case-insensitively. A VM whose
    /// pool is unknown never matches an include list.
    pub fn select<'a>(&self, snapshot: &'a InventorySnapshot) -> Vec<&'a VirtualMachine> {
        snapshot
            .virtual_machines
            .iter()
            .filter(|vm| self.include_powered_off || vm.is_powered_on())
            .filter(|vm| !self.ignored_vms.contains(&normalize_name(&vm.name)))
            .filter(|vm| {
                let pool = vm
                    .resource_pool
                    .as_ref()
                    .and_then(|id| snapshot.resource_pool(id))
                    .map(|pool| normalize_name(&pool.name));

                if !self.include_pools.is_empty() {
                    return pool.is_some_and(|name| self.include_pools.contains(&name));
                }
                pool.map_or(true, |name| !self.exclude_pools.contains(&name))
            })
            .collect()
    }
}
