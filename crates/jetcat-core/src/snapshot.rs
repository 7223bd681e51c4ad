//! In-memory catalog snapshots.
//!
//! A [`CatalogSnapshot`] holds pre-materialized native rowsets keyed by object
//! kind. [`SnapshotDriver`] serves them through the [`NativeDriver`] trait so
//! the engine can run without a live database, e.g. from a JSON dump:
//!
//! ```json
//! {
//!   "tables":  [{ "Name": "Students", "TableType": "TABLE" }],
//!   "indexes": [{ "TableName": "Students", "Name": "PK_Students", "IsPrimaryKey": true }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use jetcat_types::{ObjectKind, RawRow};
use parking_lot::Mutex;
use tracing::info;

use crate::error::{DriverError, SnapshotError};
use crate::source::NativeDriver;

/// Native rowsets captured ahead of time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    rowsets: BTreeMap<ObjectKind, Vec<RawRow>>,
}

impl CatalogSnapshot {
    /// Create an empty snapshot. Every kind reports zero rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot keyed by SHOW keyword.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: BTreeMap<String, Vec<RawRow>> = serde_json::from_str(json)?;

        let mut snapshot = Self::new();
        for (key, rows) in raw {
            let kind = ObjectKind::from_keyword(&key).ok_or(SnapshotError::UnknownKind(key))?;
            snapshot.rowsets.entry(kind).or_default().extend(rows);
        }
        Ok(snapshot)
    }

    /// Load a JSON snapshot from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            kinds = snapshot.rowsets.len(),
            rows = snapshot.total_rows(),
            "loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Replace the rows of a kind (builder style).
    pub fn with_rows(mut self, kind: ObjectKind, rows: Vec<RawRow>) -> Self {
        self.insert(kind, rows);
        self
    }

    /// Replace the rows of a kind.
    pub fn insert(&mut self, kind: ObjectKind, rows: Vec<RawRow>) {
        self.rowsets.insert(kind, rows);
    }

    /// Rows stored for a kind, in stored order.
    pub fn rows(&self, kind: ObjectKind) -> &[RawRow] {
        self.rowsets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds with stored rows.
    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.rowsets.keys().copied()
    }

    /// Total rows across all kinds.
    pub fn total_rows(&self) -> usize {
        self.rowsets.values().map(Vec::len).sum()
    }
}

/// Shared record of the kinds a [`SnapshotDriver`] was asked for.
#[derive(Debug, Clone, Default)]
pub struct FetchLog(Arc<Mutex<Vec<ObjectKind>>>);

impl FetchLog {
    /// Kinds fetched so far, in call order.
    pub fn fetched(&self) -> Vec<ObjectKind> {
        self.0.lock().clone()
    }

    /// Number of fetches recorded.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Whether nothing has been fetched.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    fn record(&self, kind: ObjectKind) {
        self.0.lock().push(kind);
    }
}

/// A [`NativeDriver`] backed by a [`CatalogSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotDriver {
    snapshot: CatalogSnapshot,
    log: FetchLog,
    failure: Option<String>,
}

impl SnapshotDriver {
    /// Serve rows from a snapshot.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            log: FetchLog::default(),
            failure: None,
        }
    }

    /// Make every fetch fail with `reason`, as a closed connection would.
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Restore or revoke availability.
    pub fn set_failure(&mut self, reason: Option<String>) {
        self.failure = reason;
    }

    /// A handle onto the fetch log that stays valid after the driver moves
    /// into an engine.
    pub fn fetch_log(&self) -> FetchLog {
        self.log.clone()
    }

    /// The backing snapshot.
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

impl NativeDriver for SnapshotDriver {
    fn fetch_rowset(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, DriverError> {
        self.log.record(kind);
        match &self.failure {
            Some(reason) => Err(DriverError::new(reason.clone())),
            None => Ok(self.snapshot.rows(kind).to_vec()),
        }
    }
}
