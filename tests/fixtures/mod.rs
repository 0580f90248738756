// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for pairing validation
//!
//! Provides deterministic inventory data for pairing scenarios.
//! All IDs, names and attribute values are fixed constants so tests are
//! reproducible.
//!
//! # Inventory
//! ```text
//! H1 [DC1] ── D1 [DC1]
//! H2 [DC2] ── D2 [DC2]
//!             D3 (no attribute)
//! ```

#![allow(dead_code)]

use cim_infrastructure_pairing::domain::{
    CustomAttributes, Datastore, Host, ResourcePool, VirtualMachine,
};
use cim_infrastructure_pairing::InventorySnapshot;

pub const ATTRIBUTE: &str = "Location";

pub const HOST_1: &str = "host-1";
pub const HOST_2: &str = "host-2";

pub const DATASTORE_1: &str = "datastore-1";
pub const DATASTORE_2: &str = "datastore-2";
pub const DATASTORE_3: &str = "datastore-3";

pub const POOL_PRODUCTION: &str = "resgroup-1";
pub const POOL_TEST: &str = "resgroup-2";

/// Attribute store with the pairing attribute set
pub fn location(value: &str) -> CustomAttributes {
    CustomAttributes::default().with_value(ATTRIBUTE, value)
}

pub fn hosts() -> Vec<Host> {
    vec![
        Host::new(HOST_1, "H1").with_attributes(location("DC1")),
        Host::new(HOST_2, "H2").with_attributes(location("DC2")),
    ]
}

/// D1 and D2 are tagged, D3 carries no pairing attribute
pub fn datastores() -> Vec<Datastore> {
    vec![
        Datastore::new(DATASTORE_1, "D1").with_attributes(location("DC1")),
        Datastore::new(DATASTORE_2, "D2").with_attributes(location("DC2")),
        Datastore::new(DATASTORE_3, "D3").with_attributes(CustomAttributes::default().with_definition(ATTRIBUTE)),
    ]
}

pub fn resource_pools() -> Vec<ResourcePool> {
    vec![
        ResourcePool::new(POOL_PRODUCTION, "Production"),
        ResourcePool::new(POOL_TEST, "Test"),
    ]
}

/// VM on the given host using the given datastores
pub fn vm(name: &str, host: &str, datastores: &[&str]) -> VirtualMachine {
    datastores.iter().fold(
        VirtualMachine::new(format!("vm-{}", name), name).on_host(host),
        |vm, ds| vm.with_datastore(*ds),
    )
}

/// Snapshot with the fixed hosts, datastores and pools
pub fn snapshot(virtual_machines: Vec<VirtualMachine>) -> InventorySnapshot {
    InventorySnapshot {
        hosts: hosts(),
        datastores: datastores(),
        virtual_machines,
        resource_pools: resource_pools(),
    }
}

/// The same inventory in collector JSON form
pub const SNAPSHOT_JSON: &str = r#"{
  "hosts": [
    {"id": "host-1", "name": "H1", "attributes": {
      "availableField": [{"key": 101, "name": "Location"}],
      "customValue": [{"key": 101, "value": "DC1"}]}},
    {"id": "host-2", "name": "H2", "attributes": {
      "availableField": [{"key": 101, "name": "Location"}],
      "customValue": [{"key": 101, "value": "DC2"}]}}
  ],
  "datastores": [
    {"id": "datastore-1", "name": "D1", "attributes": {
      "availableField": [{"key": 101, "name": "Location"}],
      "customValue": [{"key": 101, "value": "DC1"}]}},
    {"id": "datastore-2", "name": "D2", "attributes": {
      "availableField": [{"key": 101, "name": "Location"}],
      "customValue": [{"key": 101, "value": "DC2"}]}},
    {"id": "datastore-3", "name": "D3", "attributes": {
      "availableField": [{"key": 101, "name": "Location"}],
      "customValue": []}}
  ],
  "virtual_machines": [
    {"id": "vm-app01", "name": "app01", "host": "host-1",
     "datastores": ["datastore-1"], "resource_pool": "resgroup-1"},
    {"id": "vm-app02", "name": "app02", "host": "host-1",
     "datastores": ["datastore-1", "datastore-2"], "resource_pool": "resgroup-1"},
    {"id": "vm-app03", "name": "app03", "host": "host-2",
     "datastores": ["datastore-2"], "power_state": "poweredOff",
     "resource_pool": "resgroup-2"}
  ],
  "resource_pools": [
    {"id": "resgroup-1", "name": "Production"},
    {"id": "resgroup-2", "name": "Test"}
  ]
}"#;
