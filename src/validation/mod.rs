// Copyright (c) 2025 - Cowboy AI, Inc.
//! VM Datastore Pairing Validation
//!
//! - [`validate_vm`] - one VM against its host's compatible datastores
//! - [`evaluate_all`] - every VM, fail-fast, aggregated into an [`Evaluation`]
//! - [`IgnoreList`] - datastores never reported as mismatches

pub mod batch;
pub mod ignore;
pub mod validator;

pub use batch::{evaluate_all, Evaluation, MismatchIndex};
pub use ignore::IgnoreList;
pub use validator::{validate_vm, MismatchRecord, MismatchedDatastore, VmOutcome};
