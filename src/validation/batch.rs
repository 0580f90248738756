// Copyright (c) 2025 - Cowboy AI, Inc.
//! Batch Evaluator
//!
//! Runs the validator over every selected VM. The first fatal outcome aborts
//! the batch and no partial result is returned.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use super::ignore::IgnoreList;
use super::validator::{validate_vm, MismatchRecord, VmOutcome};
use crate::domain::{Datastore, VirtualMachine};
use crate::errors::PairingResult;
use crate::pairing::PairingIndex;

/// Mismatching VMs keyed by VM name
pub type MismatchIndex = BTreeMap<String, MismatchRecord>;

/// Outcome of a complete evaluation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mismatches: MismatchIndex,
    pub vms_evaluated: usize,
    /// Distinct resource pools of the evaluated VMs
    pub resource_pools_evaluated: usize,
}

impl Evaluation {
    /// No VM failed validation
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches.len()
    }
}

/// Validate every VM, aborting on the first fatal error
#[instrument(skip_all, fields(datastores = inventory.len(), ignored = ignore.len()))]
pub fn evaluate_all<'a, I>(
    vms: I,
    index: &PairingIndex,
    inventory: &[Datastore],
    ignore: &IgnoreList,
) -> PairingResult<Evaluation>
where
    I: IntoIterator<Item = &'a VirtualMachine>,
{
    let mut evaluation = Evaluation::default();
    let mut pools = HashSet::new();

    for vm in vms {
        let outcome = match validate_vm(vm, index, inventory, ignore) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(vm = %vm.name, host = ?vm.host, "evaluation aborted: {}", e);
                return Err(e);
            }
        };

        evaluation.vms_evaluated += 1;
        if let Some(pool) = &vm.resource_pool {
            pools.insert(pool.clone());
        }

        if let VmOutcome::Mismatched(record) = outcome {
            let key = if evaluation.mismatches.contains_key(&vm.name) {
                warn!(vm = %vm.name, id = %vm.id, "duplicate VM name, keying by name and ID");
                format!("{} ({})", vm.name, vm.id)
            } else {
                vm.name.clone()
            };
            evaluation.mismatches.insert(key, record);
        }
    }

    evaluation.resource_pools_evaluated = pools.len();

    info!(
        vms = evaluation.vms_evaluated,
        resource_pools = evaluation.resource_pools_evaluated,
        mismatched = evaluation.mismatch_count(),
        "pairing evaluation complete"
    );
    Ok(evaluation)
}
