// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pairing Index
//!
//! Read-only map from host ID to the datastores compatible with that host.
//! Every host handed to the builder is a key, including hosts with no
//! compatible datastore (stub entries). A missing key therefore always means
//! "host was never supplied", never "host has no datastores".

use std::collections::{BTreeMap, HashSet};

use crate::domain::{fold_case, EntityId, TaggedDatastore, TaggedHost};

/// A host and the datastores paired with it, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPairing {
    host: TaggedHost,
    datastores: Vec<TaggedDatastore>,
}

impl HostPairing {
    pub(crate) fn new(host: TaggedHost, datastores: Vec<TaggedDatastore>) -> Self {
        Self { host, datastores }
    }

    pub fn host(&self) -> &TaggedHost {
        &self.host
    }

    pub fn datastores(&self) -> &[TaggedDatastore] {
        &self.datastores
    }

    /// Host was supplied but nothing paired with it
    pub fn is_stub(&self) -> bool {
        self.datastores.is_empty()
    }

    /// Whether the datastore is compatible with this host
    pub fn contains(&self, datastore_id: &EntityId) -> bool {
        self.datastores.iter().any(|ds| ds.id() == datastore_id)
    }

    /// IDs of all compatible datastores
    pub fn datastore_ids(&self) -> HashSet<&EntityId> {
        self.datastores.iter().map(|ds| ds.id()).collect()
    }
}

/// Host ID → compatible datastore set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingIndex {
    entries: BTreeMap<EntityId, HostPairing>,
}

impl PairingIndex {
    pub(crate) fn from_entries(entries: BTreeMap<EntityId, HostPairing>) -> Self {
        Self { entries }
    }

    /// Pairing record for a host, `None` if the host was never supplied
    pub fn host(&self, host_id: &EntityId) -> Option<&HostPairing> {
        self.entries.get(host_id)
    }

    /// Pairing record for the first host with this exact name
    pub fn host_by_name(&self, name: &str) -> Option<&HostPairing> {
        self.entries.values().find(|p| p.host.name() == name)
    }

    /// Find a datastore anywhere in the index
    pub fn datastore(&self, datastore_id: &EntityId) -> Option<&TaggedDatastore> {
        self.entries
            .values()
            .flat_map(|p| p.datastores.iter())
            .find(|ds| ds.id() == datastore_id)
    }

    pub fn datastore_name(&self, datastore_id: &EntityId) -> Option<&str> {
        self.datastore(datastore_id).map(|ds| ds.name())
    }

    pub fn contains_datastore(&self, datastore_id: &EntityId) -> bool {
        self.datastore(datastore_id).is_some()
    }

    /// All hosts a datastore is paired with
    pub fn hosts_for_datastore(&self, datastore_id: &EntityId) -> Vec<&HostPairing> {
        self.entries
            .values()
            .filter(|p| p.contains(datastore_id))
            .collect()
    }

    /// Names of every indexed datastore, once each, sorted case-insensitively
    ///
    /// For display only.
    pub fn datastore_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = self
            .entries
            .values()
            .flat_map(|p| p.datastores.iter())
            .filter(|ds| seen.insert(ds.id().clone()))
            .map(|ds| ds.name().to_string())
            .collect();
        names.sort_by_key(|name| fold_case(name));
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &HostPairing)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Datastore, Host, TagValue, Tagged};

    fn tagged_host(id: &str, name: &str, tag: &str) -> TaggedHost {
        Tagged::new(Host::new(id, name), TagValue::Set(tag.to_string()))
    }

    fn tagged_ds(id: &str, name: &str, tag: &str) -> TaggedDatastore {
        Tagged::new(Datastore::new(id, name), TagValue::Set(tag.to_string()))
    }

    fn sample_index() -> PairingIndex {
        let shared = tagged_ds("datastore-3", "shared", "DC1");
        let mut entries = BTreeMap::new();
        entries.insert(
            EntityId::new("host-1"),
            HostPairing::new(
                tagged_host("host-1", "esx01", "DC1"),
                vec![tagged_ds("datastore-1", "beta", "DC1"), shared.clone()],
            ),
        );
        entries.insert(
            EntityId::new("host-2"),
            HostPairing::new(
                tagged_host("host-2", "esx02", "DC1"),
                vec![tagged_ds("datastore-2", "Alpha", "DC1"), shared],
            ),
        );
        entries.insert(
            EntityId::new("host-3"),
            HostPairing::new(tagged_host("host-3", "esx03", "DC9"), Vec::new()),
        );
        PairingIndex::from_entries(entries)
    }

    #[test]
    fn test_stub_entry_is_found() {
        let index = sample_index();
        let stub = index.host(&EntityId::new("host-3")).unwrap();
        assert!(stub.is_stub());
        assert!(index.host(&EntityId::new("host-99")).is_none());
    }

    #[test]
    fn test_host_by_name() {
        let index = sample_index();
        assert_eq!(
            index.host_by_name("esx02").unwrap().host().id(),
            &EntityId::new("host-2")
        );
        assert!(index.host_by_name("ESX02").is_none());
    }

    #[test]
    fn test_datastore_lookup_scans_all_hosts() {
        let index = sample_index();
        assert_eq!(index.datastore_name(&EntityId::new("datastore-2")), Some("Alpha"));
        assert!(index.contains_datastore(&EntityId::new("datastore-1")));
        assert!(!index.contains_datastore(&EntityId::new("datastore-9")));
    }

    #[test]
    fn test_hosts_for_datastore() {
        let index = sample_index();
        let hosts: Vec<_> = index
            .hosts_for_datastore(&EntityId::new("datastore-3"))
            .iter()
            .map(|p| p.host().name().to_string())
            .collect();
        assert_eq!(hosts, vec!["esx01", "esx02"]);
    }

    #[test]
    fn test_datastore_names_sorted_and_unique() {
        let index = sample_index();
        assert_eq!(index.datastore_names(), vec!["Alpha", "beta", "shared"]);
    }
}
