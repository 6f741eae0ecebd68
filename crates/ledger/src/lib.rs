//! DXL keyed-store substrate interfaces.
//!
//! This crate defines the seam between the DXL record-management core and the
//! external ordered key-value substrate it runs against. The core never talks
//! to a concrete database; it talks to these traits:
//!
//! - [`KeyedStore`] — atomic get/put plus ordered range scans
//! - [`SelectorQuery`] — predicate queries over stored JSON documents
//!
//! A [`MemoryLedger`] reference implementation of both traits is included so
//! the core can be exercised end-to-end without an external store. Embedding
//! hosts that sit on a real substrate implement the traits against it.
//!
//! ## Atomicity contract
//!
//! All reads and writes issued by one public operation of the core must be
//! committed together or not at all, with no interleaving from concurrent
//! operations. The core relies on this for its create-time existence check
//! and performs no locking or retries of its own. `MemoryLedger` satisfies
//! the contract structurally: every operation holds the sole `&mut` borrow
//! of the ledger for its duration.

mod memory;
mod store;

pub use memory::MemoryLedger;
pub use store::{DocScan, KeyedStore, RangeScan, SelectorQuery, TxContext};

/// Errors surfaced by a keyed store or predicate query engine.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying substrate failed.
    #[error("store backend failure: {0}")]
    Backend(String),
    /// A range scan was requested with an end key below its start key.
    #[error("invalid scan range: {0}")]
    InvalidRange(String),
    /// A selector document was malformed or unsupported.
    #[error("invalid selector document: {0}")]
    InvalidSelector(String),
    /// A transaction context was constructed from invalid identity data.
    #[error("invalid transaction context: {0}")]
    InvalidContext(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
