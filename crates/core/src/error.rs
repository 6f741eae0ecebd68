use dxl_ledger::StoreError;
use dxl_records::WireError;

/// Errors returned by the record-management core.
///
/// Every variant names the violated precondition; none is used for normal
/// control flow. Audit-write failures have no variant here on purpose: they
/// are logged and swallowed inside the repository and never surface to the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Required input was missing or malformed.
    #[error("invalid input: {0}")]
    Validation(String),
    /// A record with this form id already exists.
    #[error("diagnosis form {0} already exists")]
    Conflict(String),
    /// No record exists under this form id.
    #[error("diagnosis form {0} does not exist")]
    NotFound(String),
    /// No audit entries exist for this form id.
    #[error("no audit entries recorded for form {0}")]
    AuditNotFound(String),
    /// The calling organization is not permitted to mutate records.
    #[error("unauthorized organization: {0}")]
    Unauthorized(String),
    /// A record or patch document failed to encode or decode.
    #[error("record wire format error: {0}")]
    Wire(#[from] WireError),
    /// An audit entry failed to serialize.
    #[error("failed to serialize audit entry: {0}")]
    AuditSerialization(#[source] serde_json::Error),
    /// The underlying keyed store failed.
    #[error("keyed store failure: {0}")]
    Store(#[from] StoreError),
    /// The external predicate query engine failed.
    #[error("predicate query failed: {0}")]
    Query(#[source] StoreError),
}

/// Result type for core operations.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
