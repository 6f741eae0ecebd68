//! Core runtime configuration.
//!
//! Configuration is resolved once by the embedding host and passed into core
//! services as an `Arc<CoreConfig>`. Nothing in the request path reads
//! process-wide state; policy changes are a matter of constructing services
//! with a different config, not of redeploying the core.

use crate::error::{RecordError, RecordResult};
use std::collections::BTreeSet;

/// Core configuration resolved at startup.
///
/// Currently this is the mutation-authorization policy: the set of
/// organization identifiers permitted to create and update records.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    authorized_orgs: BTreeSet<String>,
}

impl CoreConfig {
    /// Create a new `CoreConfig` from the authorized-organization set.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Validation` if the set is empty or any
    /// identifier is empty or whitespace-only.
    pub fn new(authorized_orgs: impl IntoIterator<Item = String>) -> RecordResult<Self> {
        let mut orgs = BTreeSet::new();
        for org in authorized_orgs {
            if org.trim().is_empty() {
                return Err(RecordError::Validation(
                    "authorized organization id cannot be empty".into(),
                ));
            }
            orgs.insert(org);
        }

        if orgs.is_empty() {
            return Err(RecordError::Validation(
                "at least one authorized organization is required".into(),
            ));
        }

        Ok(Self {
            authorized_orgs: orgs,
        })
    }

    /// The organizations permitted to perform mutating operations.
    pub fn authorized_orgs(&self) -> &BTreeSet<String> {
        &self.authorized_orgs
    }

    /// Whether `org` is permitted to perform mutating operations.
    pub fn is_authorized(&self, org: &str) -> bool {
        self.authorized_orgs.contains(org)
    }
}
