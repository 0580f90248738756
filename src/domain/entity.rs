// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Entities
//!
//! Read-only views of the managed objects a pairing evaluation works on.
//! Entities are materialized by an external collector and handed to the
//! engine as a snapshot; nothing here talks to the virtualization platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::attributes::CustomAttributes;

/// Managed object reference value (e.g. `host-12`, `datastore-1031`)
///
/// Identity is the raw reference string. Equality is exact: two IDs that
/// differ only in case are different objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a managed object reference value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the reference value as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty reference never identifies an object
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Which side of a pairing an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// ESXi host
    Host,
    /// Datastore
    Datastore,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Host => write!(f, "host"),
            EntityKind::Datastore => write!(f, "datastore"),
        }
    }
}

/// An inventory object that can carry a pairing attribute
pub trait Entity {
    /// Kind reported in diagnostics
    const KIND: EntityKind;

    /// Stable unique identity
    fn id(&self) -> &EntityId;

    /// Display name
    fn name(&self) -> &str;

    /// Custom attribute store
    fn attributes(&self) -> &CustomAttributes;
}

/// ESXi host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub attributes: CustomAttributes,
}

impl Host {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: CustomAttributes::default(),
        }
    }

    /// Replace the attribute store
    pub fn with_attributes(mut self, attributes: CustomAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Entity for Host {
    const KIND: EntityKind = EntityKind::Host;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &CustomAttributes {
        &self.attributes
    }
}

/// Datastore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datastore {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub attributes: CustomAttributes,
}

impl Datastore {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: CustomAttributes::default(),
        }
    }

    /// Replace the attribute store
    pub fn with_attributes(mut self, attributes: CustomAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Entity for Datastore {
    const KIND: EntityKind = EntityKind::Datastore;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &CustomAttributes {
        &self.attributes
    }
}

/// VM runtime power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerState {
    #[default]
    PoweredOn,
    PoweredOff,
    Suspended,
}

/// Virtual machine
///
/// `host` is `None` when the runtime host property could not be read, which
/// usually means the account lacks privileges on the host object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub host: Option<EntityId>,
    #[serde(default)]
    pub datastores: Vec<EntityId>,
    #[serde(default)]
    pub power_state: PowerState,
    #[serde(default)]
    pub resource_pool: Option<EntityId>,
}

impl VirtualMachine {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            host: None,
            datastores: Vec::new(),
            power_state: PowerState::PoweredOn,
            resource_pool: None,
        }
    }

    /// Set the current host
    pub fn on_host(mut self, host: impl Into<EntityId>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Add a bound datastore
    pub fn with_datastore(mut self, datastore: impl Into<EntityId>) -> Self {
        self.datastores.push(datastore.into());
        self
    }

    pub fn with_power_state(mut self, power_state: PowerState) -> Self {
        self.power_state = power_state;
        self
    }

    pub fn in_resource_pool(mut self, pool: impl Into<EntityId>) -> Self {
        self.resource_pool = Some(pool.into());
        self
    }

    /// Current host ID, if set and non-empty
    pub fn host_id(&self) -> Option<&EntityId> {
        self.host.as_ref().filter(|id| !id.is_empty())
    }

    pub fn is_powered_on(&self) -> bool {
        self.power_state == PowerState::PoweredOn
    }
}

/// Resource pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub id: EntityId,
    pub name: String,
}

impl ResourcePool {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
