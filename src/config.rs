// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pairing check configuration

use serde::{Deserialize, Serialize};

use crate::domain::MissingTagPolicy;
use crate::errors::{PairingError, PairingResult};
use crate::pairing::MatchMode;
use crate::validation::IgnoreList;

/// Configuration for a pairing evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Custom attribute read from hosts
    pub host_attribute: String,

    /// Custom attribute read from datastores
    pub datastore_attribute: String,

    /// Compare attribute prefixes instead of full values
    pub using_prefixes: bool,

    /// Separator ending the host attribute prefix
    pub host_prefix_separator: String,

    /// Separator ending the datastore attribute prefix
    pub datastore_prefix_separator: String,

    /// Behaviour for entities without the attribute
    pub missing_attribute: MissingTagPolicy,

    /// Datastores never reported as mismatches
    pub ignored_datastores: Vec<String>,

    /// VMs excluded from evaluation
    pub ignored_vms: Vec<String>,

    /// Only evaluate VMs in these resource pools
    pub include_resource_pools: Vec<String>,

    /// Skip VMs in these resource pools
    pub exclude_resource_pools: Vec<String>,

    /// Evaluate powered-off VMs too
    pub include_powered_off: bool,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            host_attribute: "Location".to_string(),
            datastore_attribute: "Location".to_string(),
            using_prefixes: false,
            host_prefix_separator: "-".to_string(),
            datastore_prefix_separator: "-".to_string(),
            missing_attribute: MissingTagPolicy::Fail,
            ignored_datastores: Vec::new(),
            ignored_vms: Vec::new(),
            include_resource_pools: Vec::new(),
            exclude_resource_pools: Vec::new(),
            include_powered_off: false,
        }
    }
}

impl PairingConfig {
    /// Use one attribute name for hosts and datastores
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.host_attribute = name.clone();
        self.datastore_attribute = name;
        self
    }

    /// Enable prefix matching with the given separators
    pub fn with_prefixes(mut self, host_separator: impl Into<String>, datastore_separator: impl Into<String>) -> Self {
        self.using_prefixes = true;
        self.host_prefix_separator = host_separator.into();
        self.datastore_prefix_separator = datastore_separator.into();
        self
    }

    pub fn with_missing_attribute(mut self, policy: MissingTagPolicy) -> Self {
        self.missing_attribute = policy;
        self
    }

    pub fn with_ignored_datastores<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_datastores = names.into_iter().map(Into::into).collect();
        self
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults. `PAIRING_DATASTORE_ATTRIBUTE`
    /// falls back to the host attribute name.
    pub fn from_env() -> PairingResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> PairingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host_attribute = lookup("PAIRING_HOST_ATTRIBUTE").unwrap_or(defaults.host_attribute);
        let datastore_attribute =
            lookup("PAIRING_DATASTORE_ATTRIBUTE").unwrap_or_else(|| host_attribute.clone());

        let missing_attribute = if parse_bool(&lookup, "PAIRING_IGNORE_MISSING_ATTRIBUTE")?.unwrap_or(false) {
            MissingTagPolicy::Tolerate
        } else {
            MissingTagPolicy::Fail
        };

        let config = Self {
            host_attribute,
            datastore_attribute,
            using_prefixes: parse_bool(&lookup, "PAIRING_USE_PREFIXES")?.unwrap_or(defaults.using_prefixes),
            host_prefix_separator: lookup("PAIRING_HOST_SEPARATOR").unwrap_or(defaults.host_prefix_separator),
            datastore_prefix_separator: lookup("PAIRING_DATASTORE_SEPARATOR")
                .unwrap_or(defaults.datastore_prefix_separator),
            missing_attribute,
            ignored_datastores: parse_list(&lookup, "PAIRING_IGNORED_DATASTORES"),
            ignored_vms: parse_list(&lookup, "PAIRING_IGNORED_VMS"),
            include_resource_pools: parse_list(&lookup, "PAIRING_INCLUDE_POOLS"),
            exclude_resource_pools: parse_list(&lookup, "PAIRING_EXCLUDE_POOLS"),
            include_powered_off: parse_bool(&lookup, "PAIRING_INCLUDE_POWERED_OFF")?
                .unwrap_or(defaults.include_powered_off),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a meaningful evaluation
    pub fn validate(&self) -> PairingResult<()> {
        if self.host_attribute.trim().is_empty() {
            return Err(PairingError::Configuration(
                "host attribute name is empty".to_string(),
            ));
        }
        if self.datastore_attribute.trim().is_empty() {
            return Err(PairingError::Configuration(
                "datastore attribute name is empty".to_string(),
            ));
        }
        if let Err(failure) = self.match_mode().validate() {
            return Err(PairingError::Configuration(failure.to_string()));
        }
        if !self.include_resource_pools.is_empty() && !self.exclude_resource_pools.is_empty() {
            return Err(PairingError::Configuration(
                "resource pools cannot be both included and excluded".to_string(),
            ));
        }
        Ok(())
    }

    pub fn match_mode(&self) -> MatchMode {
        MatchMode::from_flags(
            self.using_prefixes,
            self.host_prefix_separator.as_str(),
            self.datastore_prefix_separator.as_str(),
        )
    }

    pub fn ignore_list(&self) -> IgnoreList {
        IgnoreList::new(&self.ignored_datastores)
    }
}

fn parse_list<F>(lookup: &F, key: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_bool<F>(lookup: &F, key: &str) -> PairingResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
        other => Err(PairingError::Configuration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
