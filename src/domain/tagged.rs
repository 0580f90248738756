// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tagged Entities
//!
//! A [`Tagged`] value pairs an inventory entity with the resolved value of
//! its pairing attribute. The entity and its classification are kept as
//! separate fields; neither changes after construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::attributes::AttributeLookup;
use super::entity::{Datastore, Entity, EntityId, Host};
use crate::errors::{PairingError, PairingResult};

/// Resolved pairing attribute value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagValue {
    Set(String),
    /// Attribute absent and tolerated by [`MissingTagPolicy::Tolerate`]
    NotSet,
}

impl TagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Set(value) => Some(value),
            TagValue::NotSet => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, TagValue::Set(_))
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Set(value) => write!(f, "{}", value),
            TagValue::NotSet => write!(f, "<not set>"),
        }
    }
}

/// What to do when an entity lacks the pairing attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTagPolicy {
    /// Abort with [`PairingError::TagNotSet`]
    #[default]
    Fail,
    /// Substitute [`TagValue::NotSet`]
    Tolerate,
}

/// Entity plus its resolved pairing attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<E> {
    entity: E,
    tag: TagValue,
}

/// Host with its pairing attribute
pub type TaggedHost = Tagged<Host>;

/// Datastore with its pairing attribute
pub type TaggedDatastore = Tagged<Datastore>;

impl<E: Entity> Tagged<E> {
    pub fn new(entity: E, tag: TagValue) -> Self {
        Self { entity, tag }
    }

    /// Resolve the named attribute on `entity`
    ///
    /// Retrieval failures are returned regardless of `policy`.
    pub fn resolve(entity: E, attribute: &str, policy: MissingTagPolicy) -> PairingResult<Self> {
        let tag = match entity.attributes().lookup(attribute) {
            AttributeLookup::Found(value) => TagValue::Set(value),
            AttributeLookup::NotSet => match policy {
                MissingTagPolicy::Fail => {
                    return Err(PairingError::TagNotSet {
                        kind: E::KIND,
                        entity: entity.name().to_string(),
                        attribute: attribute.to_string(),
                    });
                }
                MissingTagPolicy::Tolerate => {
                    warn!(
                        kind = %E::KIND,
                        entity = entity.name(),
                        attribute,
                        "custom attribute not set, tolerating"
                    );
                    TagValue::NotSet
                }
            },
            AttributeLookup::Failed(reason) => {
                return Err(PairingError::TagRetrievalFailed {
                    kind: E::KIND,
                    entity: entity.name().to_string(),
                    attribute: attribute.to_string(),
                    reason,
                });
            }
        };

        Ok(Self { entity, tag })
    }

    pub fn id(&self) -> &EntityId {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn tag(&self) -> &TagValue {
        &self.tag
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }
}

/// Resolve the pairing attribute for every entity, stopping at the first error
pub fn tag_entities<E>(
    entities: &[E],
    attribute: &str,
    policy: MissingTagPolicy,
) -> PairingResult<Vec<Tagged<E>>>
where
    E: Entity + Clone,
{
    entities
        .iter()
        .map(|entity| Tagged::resolve(entity.clone(), attribute, policy))
        .collect()
}
