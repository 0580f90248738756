// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host-to-Datastore Pairing
//!
//! Groups hosts and datastores sharing a pairing attribute into compatible
//! sets, then answers "which datastores may VMs on this host use?".
//!
//! ```text
//! Tagged hosts ──┐
//!                ├─ build_pairing_index(mode) ─> PairingIndex
//! Tagged datastores ┘                             host ID → [datastores]
//! ```
//!
//! The index is built once per evaluation and only read afterwards, so it
//! can be shared across threads freely.

pub mod builder;
pub mod index;

pub use builder::{build_pairing_index, comparison_key, MatchMode};
pub use index::{HostPairing, PairingIndex};
