//! Rowset sources: the boundary to the native driver.
//!
//! A [`NativeDriver`] materializes the raw rowset for an object kind. The
//! [`RowsetSource`] registry sits in front of it: one fetch per statement, no
//! filtering, no ordering, no retries.

use jetcat_types::{ObjectKind, RawRow};
use tracing::{debug, warn};

use crate::error::{DriverError, Error};

/// The native driver collaborator.
///
/// Fetches are blocking and uncancellable. `&mut self` makes ownership of the
/// underlying connection exclusive for the duration of a call; callers that
/// need timeouts wrap the driver, not the engine.
pub trait NativeDriver {
    /// Materialize every row of the kind's native rowset, in whatever order
    /// the engine produces them.
    fn fetch_rowset(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, DriverError>;
}

impl<D: NativeDriver + ?Sized> NativeDriver for &mut D {
    fn fetch_rowset(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, DriverError> {
        (**self).fetch_rowset(kind)
    }
}

impl<D: NativeDriver + ?Sized> NativeDriver for Box<D> {
    fn fetch_rowset(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, DriverError> {
        (**self).fetch_rowset(kind)
    }
}

/// Registry mapping object kinds to native rowset fetches.
pub struct RowsetSource<D> {
    driver: D,
    fetches: u64,
}

impl<D: NativeDriver> RowsetSource<D> {
    /// Wrap a native driver.
    pub fn new(driver: D) -> Self {
        Self { driver, fetches: 0 }
    }

    /// Fetch the raw, unordered rows for `kind`.
    ///
    /// Driver failures surface as [`Error::SourceUnavailable`] and are not
    /// retried.
    pub fn fetch(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, Error> {
        self.fetches += 1;
        debug!(kind = %kind, rowset = kind.native_rowset(), "fetching native rowset");

        match self.driver.fetch_rowset(kind) {
            Ok(rows) => {
                debug!(kind = %kind, rows = rows.len(), "native rowset fetched");
                Ok(rows)
            }
            Err(source) => {
                warn!(kind = %kind, error = %source, "native rowset unavailable");
                Err(Error::SourceUnavailable { kind, source })
            }
        }
    }

    /// Number of fetches issued through this source, successful or not.
    pub fn fetch_count(&self) -> u64 {
        self.fetches
    }

    /// Borrow the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Unwrap the driver.
    pub fn into_driver(self) -> D {
        self.driver
    }
}
