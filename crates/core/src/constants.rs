//! Key-namespace constants.
//!
//! Records and audit entries share one ordered key namespace, distinguished
//! only by these prefixes. All of them are shared with existing datasets and
//! must stay bit-exact.

/// Prefix of creation audit keys: `AUDIT-CREATE-<formId>-<txId>`.
pub const CREATION_AUDIT_PREFIX: &str = "AUDIT-CREATE-";

/// Prefix of update audit keys: `AUDIT-<formId>-<txId>`.
///
/// Also the prefix that marks *any* audit key, creation keys included, which
/// is what record listing filters on.
pub const UPDATE_AUDIT_PREFIX: &str = "AUDIT-";

/// High sentinel appended to a key prefix to bound its range scan.
///
/// `~` (0x7E) sorts after every character that appears in transaction ids.
pub const RANGE_END_SENTINEL: &str = "~";

/// `action` value carried by creation audit entries.
pub const CREATION_ACTION: &str = "CREATE_NEW_FORM";
