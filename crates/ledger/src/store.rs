//! Store traits, scan cursors and the per-invocation transaction context.
//!
//! The types here mirror the primitives the external substrate offers:
//! atomic single-key reads and writes, ordered range scans, and a predicate
//! query engine. Scans are deliberately modelled as *owned*, finite,
//! non-restartable iterators: whatever resources a backend ties to a cursor
//! are released when the scan value is dropped, on every exit path of the
//! consumer — including early `?` returns.

use crate::StoreResult;

/// An ordered key-value store committing each invocation atomically.
///
/// Keys are UTF-8 strings ordered bytewise; values are opaque byte strings.
///
/// Implementations must guarantee that the read set and write set of one
/// public core operation commit together with serializable isolation. Under
/// that contract a read-check followed by a conditional write is a sound
/// put-if-absent; without it, concurrent creations of the same key can both
/// succeed.
pub trait KeyedStore {
    /// Reads the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any existing value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Scans `[start, end)` in key order.
    ///
    /// An empty `start` means "from the first key"; an empty `end` means
    /// "through the last key". The returned scan is finite and yields each
    /// entry at most once.
    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeScan>;
}

/// A predicate query engine over stored JSON documents.
///
/// The engine accepts a selector document of the form
/// `{"selector": {"<field>": <value>, ...}}` and yields every stored document
/// whose top-level fields equal the selector's. The core only ever constructs
/// single-field equality selectors; engines may support a richer language.
pub trait SelectorQuery {
    /// Runs `selector` and returns the matching documents.
    fn query_selector(&self, selector: &serde_json::Value) -> StoreResult<DocScan>;
}

/// A finite, non-restartable cursor over `(key, value)` entries.
///
/// Backends that hold resources open while iterating (connections, snapshot
/// handles) tie them to the boxed iterator, so dropping the scan releases
/// them regardless of how far the consumer got.
pub struct RangeScan {
    inner: Box<dyn Iterator<Item = StoreResult<(String, Vec<u8>)>> + Send>,
}

impl RangeScan {
    /// Wraps a backend iterator.
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = StoreResult<(String, Vec<u8>)>> + Send + 'static,
    {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Builds a scan over already-materialised entries.
    pub fn from_entries(entries: Vec<(String, Vec<u8>)>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }
}

impl Iterator for RangeScan {
    type Item = StoreResult<(String, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for RangeScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan").finish_non_exhaustive()
    }
}

/// A finite, non-restartable cursor over matching documents.
pub struct DocScan {
    inner: Box<dyn Iterator<Item = StoreResult<Vec<u8>>> + Send>,
}

impl DocScan {
    /// Wraps a backend iterator.
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = StoreResult<Vec<u8>>> + Send + 'static,
    {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Builds a scan over already-materialised documents.
    pub fn from_docs(docs: Vec<Vec<u8>>) -> Self {
        Self::new(docs.into_iter().map(Ok))
    }
}

impl Iterator for DocScan {
    type Item = StoreResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for DocScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocScan").finish_non_exhaustive()
    }
}

/// Verified identity and ordering data for one invocation.
///
/// The invocation infrastructure resolves the caller's organization and
/// assigns the transaction id and timestamp; the core consumes all three as
/// opaque strings and never derives them itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxContext {
    tx_id: String,
    caller_org: String,
    timestamp: String,
}

impl TxContext {
    /// Creates a context from the invocation infrastructure's values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidContext`](crate::StoreError::InvalidContext)
    /// if `tx_id` or `caller_org` is empty. The timestamp is opaque and not
    /// validated.
    pub fn new(
        tx_id: impl Into<String>,
        caller_org: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> StoreResult<Self> {
        let tx_id = tx_id.into();
        let caller_org = caller_org.into();
        let timestamp = timestamp.into();

        if tx_id.is_empty() {
            return Err(crate::StoreError::InvalidContext(
                "transaction id cannot be empty".into(),
            ));
        }
        if caller_org.is_empty() {
            return Err(crate::StoreError::InvalidContext(
                "caller organization cannot be empty".into(),
            ));
        }

        Ok(Self {
            tx_id,
            caller_org,
            timestamp,
        })
    }

    /// The unique transaction identifier.
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// The verified identifier of the invoking organization.
    pub fn caller_org(&self) -> &str {
        &self.caller_org
    }

    /// The transaction timestamp assigned by the infrastructure.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
