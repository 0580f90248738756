// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pairing Index Builder
//!
//! Partitions datastores across hosts by pairing attribute equality.
//!
//! # Comparison Keys
//!
//! ```text
//! Literal:  "DC1-RACK3"                      → "dc1-rack3"
//! Prefix:   "DC1-RACK3" (separator "-")      → "dc1"
//!           "DC1"       (separator absent)   → "dc1"
//! NotSet:                                     → no key, never matches
//! ```
//!
//! Keys are case-folded per character, so matching ignores case. Each host is compared with
//! every datastore; a datastore may pair with any number of hosts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::index::{HostPairing, PairingIndex};
use crate::domain::{fold_case, EntityKind, TagValue, TaggedDatastore, TaggedHost};
use crate::errors::{CompilationFailure, PairingResult};

/// How pairing attribute values are compared
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum MatchMode {
    /// Compare full values
    #[default]
    Literal,
    /// Compare the part before the first separator occurrence
    Prefix {
        host_separator: String,
        datastore_separator: String,
    },
}

impl MatchMode {
    /// Build from the flat flag form used by callers
    pub fn from_flags(
        using_prefixes: bool,
        host_separator: impl Into<String>,
        datastore_separator: impl Into<String>,
    ) -> Self {
        if using_prefixes {
            MatchMode::Prefix {
                host_separator: host_separator.into(),
                datastore_separator: datastore_separator.into(),
            }
        } else {
            MatchMode::Literal
        }
    }

    /// Both separators must be non-empty in prefix mode
    pub fn validate(&self) -> Result<(), CompilationFailure> {
        if let MatchMode::Prefix {
            host_separator,
            datastore_separator,
        } = self
        {
            if host_separator.is_empty() {
                return Err(CompilationFailure::EmptySeparator(EntityKind::Host));
            }
            if datastore_separator.is_empty() {
                return Err(CompilationFailure::EmptySeparator(EntityKind::Datastore));
            }
        }
        Ok(())
    }

    fn separator(&self, kind: EntityKind) -> Option<&str> {
        match (self, kind) {
            (MatchMode::Literal, _) => None,
            (MatchMode::Prefix { host_separator, .. }, EntityKind::Host) => Some(host_separator),
            (
                MatchMode::Prefix {
                    datastore_separator,
                    ..
                },
                EntityKind::Datastore,
            ) => Some(datastore_separator),
        }
    }
}

/// Comparison key for a tag value, `None` for [`TagValue::NotSet`]
pub fn comparison_key(tag: &TagValue, separator: Option<&str>) -> Option<String> {
    let value = tag.as_str()?;
    let key = match separator {
        Some(sep) => value.split_once(sep).map_or(value, |(prefix, _)| prefix),
        None => value,
    };
    Some(fold_case(key))
}

/// Build the host → compatible datastores index
///
/// Fails without returning a partial index when either input is empty or a
/// prefix separator is empty.
#[instrument(skip_all, fields(hosts = hosts.len(), datastores = datastores.len()))]
pub fn build_pairing_index(
    hosts: &[TaggedHost],
    datastores: &[TaggedDatastore],
    mode: &MatchMode,
) -> PairingResult<PairingIndex> {
    if hosts.is_empty() {
        return Err(CompilationFailure::NoHosts.into());
    }
    if datastores.is_empty() {
        return Err(CompilationFailure::NoDatastores.into());
    }
    mode.validate()?;

    let host_sep = mode.separator(EntityKind::Host);
    let ds_sep = mode.separator(EntityKind::Datastore);

    let datastore_keys: Vec<(Option<String>, &TaggedDatastore)> = datastores
        .iter()
        .map(|ds| (comparison_key(ds.tag(), ds_sep), ds))
        .collect();

    let mut entries = BTreeMap::new();
    for host in hosts {
        let host_key = comparison_key(host.tag(), host_sep);

        let matched: Vec<TaggedDatastore> = match &host_key {
            Some(key) => datastore_keys
                .iter()
                .filter(|(ds_key, _)| ds_key.as_deref() == Some(key.as_str()))
                .map(|(_, ds)| {
                    debug!(host = host.name(), datastore = ds.name(), key = %key, "paired");
                    (*ds).clone()
                })
                .collect(),
            None => Vec::new(),
        };

        if matched.is_empty() {
            debug!(host = host.name(), tag = %host.tag(), "no datastores paired, adding stub entry");
        }

        if entries
            .insert(host.id().clone(), HostPairing::new(host.clone(), matched))
            .is_some()
        {
            warn!(host_id = %host.id(), "duplicate host ID supplied, keeping last");
        }
    }

    if entries.is_empty() {
        return Err(CompilationFailure::EmptyIndex.into());
    }

    let index = PairingIndex::from_entries(entries);
    info!(
        hosts = index.len(),
        paired_datastores = index.datastore_names().len(),
        "pairing index built"
    );
    Ok(index)
}
