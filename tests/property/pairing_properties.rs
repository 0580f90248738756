// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Pairing
//!
//! Verifies properties of index construction and VM validation over
//! generated hosts and datastores:
//! - every host has an index entry, untagged hosts get stubs
//! - a host pairs with a datastore exactly when their comparison keys match
//! - prefix mode without separators in the values behaves like literal mode
//! - matching ignores case
//! - ignoring datastores never adds mismatches
//! - a VM on its host's paired datastores is always clean

use std::collections::{BTreeMap, BTreeSet};

use cim_infrastructure_pairing::domain::{fold_case, Datastore, Host, TagValue, Tagged};
use cim_infrastructure_pairing::{
    build_pairing_index, validate_vm, IgnoreList, MatchMode, PairingIndex, TaggedDatastore,
    TaggedHost, VirtualMachine, VmOutcome,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Location codes without separators, mixed case, sometimes unset
fn plain_tag() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Ca-c][1-3]")
}

/// Location codes with an optional rack suffix, mixed case, sometimes unset
fn rack_tag() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Ca-cΣσς][1-3](-[Rr][0-9])?")
}

fn tag_value(tag: &Option<String>) -> TagValue {
    tag.clone().map_or(TagValue::NotSet, TagValue::Set)
}

fn tagged_hosts(tags: &[Option<String>]) -> Vec<TaggedHost> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            Tagged::new(
                Host::new(format!("host-{}", i), format!("H{}", i)),
                tag_value(tag),
            )
        })
        .collect()
}

fn tagged_datastores(tags: &[Option<String>]) -> Vec<TaggedDatastore> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            Tagged::new(
                Datastore::new(format!("datastore-{}", i), format!("D{}", i)),
                tag_value(tag),
            )
        })
        .collect()
}

fn inventory(datastores: &[TaggedDatastore]) -> Vec<Datastore> {
    datastores.iter().map(|ds| ds.entity().clone()).collect()
}

/// Host ID → paired datastore IDs
fn pairs(index: &PairingIndex) -> BTreeMap<String, BTreeSet<String>> {
    index
        .iter()
        .map(|(id, pairing)| {
            let datastores = pairing
                .datastores()
                .iter()
                .map(|ds| ds.id().to_string())
                .collect();
            (id.to_string(), datastores)
        })
        .collect()
}

fn recase(tags: &[Option<String>], f: fn(&str) -> String) -> Vec<Option<String>> {
    tags.iter().map(|tag| tag.as_deref().map(f)).collect()
}

fn first_segment(tag: &Option<String>, separator: Option<char>) -> Option<String> {
    let value = tag.as_deref()?;
    let segment = match separator {
        Some(sep) => value.split(sep).next().unwrap_or(value),
        None => value,
    };
    Some(fold_case(segment))
}

// ============================================================================
// Index Construction Properties
// ============================================================================

proptest! {
    /// Property: Every supplied host has exactly one entry
    #[test]
    fn prop_every_host_has_entry(
        host_tags in prop::collection::vec(plain_tag(), 1..6),
        ds_tags in prop::collection::vec(plain_tag(), 1..8),
    ) {
        let hosts = tagged_hosts(&host_tags);
        let index = build_pairing_index(&hosts, &tagged_datastores(&ds_tags), &MatchMode::Literal)
            .unwrap();

        prop_assert_eq!(index.len(), hosts.len());
        for host in &hosts {
            let pairing = index.host(host.id());
            prop_assert!(pairing.is_some());
            if !host.tag().is_set() {
                prop_assert!(pairing.unwrap().is_stub());
            }
        }
    }

    /// Property: A host pairs with a datastore iff their keys are equal
    #[test]
    fn prop_pairing_follows_key_equality(
        host_tags in prop::collection::vec(rack_tag(), 1..6),
        ds_tags in prop::collection::vec(rack_tag(), 1..8),
        use_prefix in any::<bool>(),
    ) {
        let hosts = tagged_hosts(&host_tags);
        let datastores = tagged_datastores(&ds_tags);
        let mode = MatchMode::from_flags(use_prefix, "-", "-");
        let separator = if use_prefix { Some('-') } else { None };

        let index = build_pairing_index(&hosts, &datastores, &mode).unwrap();

        for (host, host_tag) in hosts.iter().zip(&host_tags) {
            let pairing = index.host(host.id()).unwrap();
            let host_key = first_segment(host_tag, separator);

            for (ds, ds_tag) in datastores.iter().zip(&ds_tags) {
                let ds_key = first_segment(ds_tag, separator);
                let expected = host_key.is_some() && host_key == ds_key;
                prop_assert_eq!(pairing.contains(ds.id()), expected);
            }
        }
    }

    /// Property: Prefix mode equals literal mode when no value has a separator
    #[test]
    fn prop_prefix_without_separator_equals_literal(
        host_tags in prop::collection::vec(plain_tag(), 1..6),
        ds_tags in prop::collection::vec(plain_tag(), 1..8),
    ) {
        let hosts = tagged_hosts(&host_tags);
        let datastores = tagged_datastores(&ds_tags);

        let literal = build_pairing_index(&hosts, &datastores, &MatchMode::Literal).unwrap();
        let prefix =
            build_pairing_index(&hosts, &datastores, &MatchMode::from_flags(true, "-", "-"))
                .unwrap();

        prop_assert_eq!(pairs(&literal), pairs(&prefix));
    }

    /// Property: Changing the case of any value changes nothing
    #[test]
    fn prop_matching_ignores_case(
        host_tags in prop::collection::vec(rack_tag(), 1..6),
        ds_tags in prop::collection::vec(rack_tag(), 1..8),
        use_prefix in any::<bool>(),
    ) {
        let mode = MatchMode::from_flags(use_prefix, "-", "-");
        let lowered = recase(&host_tags, str::to_lowercase);
        let shouted = recase(&ds_tags, str::to_uppercase);

        let original =
            build_pairing_index(&tagged_hosts(&host_tags), &tagged_datastores(&ds_tags), &mode)
                .unwrap();
        let recased =
            build_pairing_index(&tagged_hosts(&lowered), &tagged_datastores(&shouted), &mode)
                .unwrap();

        prop_assert_eq!(pairs(&original), pairs(&recased));
    }
}

// ============================================================================
// Validation Properties
// ============================================================================

proptest! {
    /// Property: Ignoring datastores only ever removes mismatches
    #[test]
    fn prop_ignoring_never_adds_mismatches(
        host_tag in plain_tag(),
        ds_tags in prop::collection::vec(plain_tag(), 1..8),
        ignored in prop::collection::vec(any::<bool>(), 8),
    ) {
        let hosts = tagged_hosts(&[host_tag]);
        let datastores = tagged_datastores(&ds_tags);
        let index = build_pairing_index(&hosts, &datastores, &MatchMode::Literal).unwrap();
        let inventory = inventory(&datastores);

        let vm = inventory.iter().fold(
            VirtualMachine::new("vm-1", "app01").on_host("host-0"),
            |vm, ds| vm.with_datastore(ds.id.clone()),
        );

        let ignore = IgnoreList::new(
            inventory
                .iter()
                .zip(&ignored)
                .filter(|(_, ignored)| **ignored)
                .map(|(ds, _)| ds.name.as_str()),
        );

        let unfiltered = validate_vm(&vm, &index, &inventory, &IgnoreList::default())
            .unwrap()
            .mismatch_names();
        let filtered = validate_vm(&vm, &index, &inventory, &ignore)
            .unwrap()
            .mismatch_names();

        prop_assert!(filtered.len() <= unfiltered.len());
        for name in &filtered {
            prop_assert!(unfiltered.contains(name));
            prop_assert!(!ignore.contains(name));
        }

        let everything = IgnoreList::new(inventory.iter().map(|ds| ds.name.as_str()));
        prop_assert_eq!(
            validate_vm(&vm, &index, &inventory, &everything).unwrap(),
            VmOutcome::Clean
        );
    }

    /// Property: A VM using only its host's paired datastores is clean
    #[test]
    fn prop_paired_datastores_are_clean(
        host_tags in prop::collection::vec(plain_tag(), 1..6),
        ds_tags in prop::collection::vec(plain_tag(), 1..8),
        host_pick in any::<prop::sample::Index>(),
    ) {
        let hosts = tagged_hosts(&host_tags);
        let datastores = tagged_datastores(&ds_tags);
        let index = build_pairing_index(&hosts, &datastores, &MatchMode::Literal).unwrap();
        let host = &hosts[host_pick.index(hosts.len())];

        let vm = index.host(host.id()).unwrap().datastores().iter().fold(
            VirtualMachine::new("vm-1", "app01").on_host(host.id().clone()),
            |vm, ds| vm.with_datastore(ds.id().clone()),
        );

        prop_assert_eq!(
            validate_vm(&vm, &index, &inventory(&datastores), &IgnoreList::default()).unwrap(),
            VmOutcome::Clean
        );
    }
}
