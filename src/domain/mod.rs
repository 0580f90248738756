// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Entities of a virtualization inventory and their pairing classification.
//!
//! # Entities
//!
//! - [`Host`], [`Datastore`] - carry the pairing custom attribute
//! - [`VirtualMachine`] - runs on a host, binds datastores
//! - [`ResourcePool`] - groups VMs for selection and reporting
//!
//! # Classification
//!
//! - [`CustomAttributes`] - attribute store with three-way lookup
//! - [`Tagged`] - entity plus resolved [`TagValue`]

pub mod attributes;
pub mod entity;
pub mod names;
pub mod tagged;

pub use attributes::{AttributeLookup, CustomAttributes, CustomFieldDef, CustomFieldValue, CustomValue};
pub use entity::{Datastore, Entity, EntityId, EntityKind, Host, PowerState, ResourcePool, VirtualMachine};
pub use names::{fold_case, normalize_name};
pub use tagged::{tag_entities, MissingTagPolicy, TagValue, Tagged, TaggedDatastore, TaggedHost};
