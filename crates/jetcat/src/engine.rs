//! The catalog engine: parse, fetch, filter, order.

use std::path::Path;

use jetcat_core::{
    CatalogSnapshot, EngineConfig, NativeDriver, QueryExecutor, RowsetSource, SnapshotDriver,
    SnapshotError,
};
use jetcat_lang::ParsedStatement;
use jetcat_types::ResultRowset;
use tracing::debug;

use crate::error::CatalogError;

/// Answers SHOW statements over one native driver.
///
/// The engine owns its driver and borrows it mutably for each call, so one
/// connection never serves two statements at once. Engines over independent
/// drivers may live on different threads.
pub struct CatalogEngine<D> {
    source: RowsetSource<D>,
    config: EngineConfig,
}

impl<D: NativeDriver> CatalogEngine<D> {
    /// Create an engine over a driver.
    pub fn new(driver: D, config: EngineConfig) -> Self {
        Self {
            source: RowsetSource::new(driver),
            config,
        }
    }

    /// Parse and execute a statement.
    ///
    /// Statements that fail to parse are rejected before the driver is
    /// touched.
    pub fn query(&mut self, text: &str) -> Result<ResultRowset, CatalogError> {
        let statement = jetcat_lang::parse(text).map_err(|e| {
            debug!(error = %e, kind = ?e.kind, "statement rejected");
            e
        })?;
        Ok(self.execute(&statement)?)
    }

    /// Execute an already parsed statement.
    pub fn execute(&mut self, statement: &ParsedStatement) -> Result<ResultRowset, jetcat_core::Error> {
        QueryExecutor::new(&mut self.source, &self.config).execute(statement)
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the engine configuration for subsequent statements.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Number of native fetches issued so far.
    pub fn fetch_count(&self) -> u64 {
        self.source.fetch_count()
    }

    /// Borrow the driver.
    pub fn driver(&self) -> &D {
        self.source.driver()
    }

    /// Mutably borrow the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        self.source.driver_mut()
    }

    /// Unwrap the driver.
    pub fn into_driver(self) -> D {
        self.source.into_driver()
    }
}

impl CatalogEngine<SnapshotDriver> {
    /// Create an engine over an in-memory snapshot.
    pub fn from_snapshot(snapshot: CatalogSnapshot, config: EngineConfig) -> Self {
        Self::new(SnapshotDriver::new(snapshot), config)
    }

    /// Create an engine over a JSON snapshot file.
    pub fn open_snapshot(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self, SnapshotError> {
        Ok(Self::from_snapshot(CatalogSnapshot::from_path(path)?, config))
    }
}
