//! Organization-level authorization for mutating operations.

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use std::sync::Arc;

/// Authorizes calling organizations against the configured allow-list.
///
/// Only mutating operations consult the guard; reads are open to any caller.
/// The policy is injected through [`CoreConfig`], so changing it never means
/// recompiling the core.
#[derive(Clone, Debug)]
pub struct AccessGuard {
    config: Arc<CoreConfig>,
}

impl AccessGuard {
    /// Creates a guard over the configured policy.
    pub fn new(config: Arc<CoreConfig>) -> Self {
        Self { config }
    }

    /// Checks that `caller_org` may perform mutating operations.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Unauthorized` naming the rejected organization.
    pub fn authorize(&self, caller_org: &str) -> RecordResult<()> {
        if self.config.is_authorized(caller_org) {
            return Ok(());
        }
        Err(RecordError::Unauthorized(caller_org.to_string()))
    }
}
