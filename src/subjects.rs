// Copyright (c) 2025 - Cowboy AI, Inc.

//! NATS subject hierarchy for monitoring reports
//!
//! # Subject Pattern
//!
//! ```text
//! monitoring.{check}.{state}
//! ```
//!
//! This allows for:
//! - Precise subscriptions (`monitoring.pairing.critical`)
//! - Check-level wildcards (`monitoring.pairing.>`)
//! - Global subscriptions (`monitoring.>`)
//!
//! # Examples
//!
//! ```rust
//! use cim_infrastructure_pairing::report::ServiceState;
//! use cim_infrastructure_pairing::subjects::{CheckKind, SubjectBuilder};
//!
//! let subject = SubjectBuilder::new(CheckKind::Pairing)
//!     .state(ServiceState::Critical)
//!     .build();
//! assert_eq!(subject, "monitoring.pairing.critical");
//!
//! let wildcard = SubjectBuilder::new(CheckKind::Pairing).build_wildcard();
//! assert_eq!(wildcard, "monitoring.pairing.>");
//! ```

use std::fmt;

use crate::report::ServiceState;

/// Root namespace for all monitoring subjects
pub const MONITORING_ROOT: &str = "monitoring";

/// Checks that publish reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Host-to-datastore pairing validation
    Pairing,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Pairing => write!(f, "pairing"),
        }
    }
}

/// Builder for monitoring NATS subjects
#[derive(Debug, Clone)]
pub struct SubjectBuilder {
    check: CheckKind,
    state: Option<ServiceState>,
}

impl SubjectBuilder {
    pub fn new(check: CheckKind) -> Self {
        Self { check, state: None }
    }

    /// Set the service state
    pub fn state(mut self, state: ServiceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the subject string
    ///
    /// Without a state this is the check-level wildcard.
    pub fn build(self) -> String {
        match self.state {
            Some(state) => format!("{}.{}.{}", MONITORING_ROOT, self.check, state.label()),
            None => self.build_wildcard(),
        }
    }

    /// Returns: `monitoring.{check}.>`
    pub fn build_wildcard(self) -> String {
        format!("{}.{}.>", MONITORING_ROOT, self.check)
    }

    /// Returns: `monitoring.>`
    pub fn build_all() -> String {
        format!("{}.>", MONITORING_ROOT)
    }
}

/// Subject a pairing report with the given state is published on
pub fn pairing_report(state: ServiceState) -> String {
    SubjectBuilder::new(CheckKind::Pairing).state(state).build()
}

/// Subscription for every pairing report
pub fn all_pairing_reports() -> String {
    SubjectBuilder::new(CheckKind::Pairing).build_wildcard()
}
