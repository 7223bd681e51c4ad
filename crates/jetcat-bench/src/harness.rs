//! Benchmark harness helpers.

use std::io::Write;

use jetcat::{CatalogEngine, CatalogSnapshot, Collation, EngineConfig, SnapshotDriver};
use tempfile::NamedTempFile;

use crate::fixtures::{catalog_to_json, generate_catalog, Scale};

/// Test context for benchmarks.
///
/// Holds one generated catalog; engines are created per benchmark so fetch
/// counters and configuration never leak between runs.
pub struct TestContext {
    pub snapshot: CatalogSnapshot,
}

impl TestContext {
    /// Create a context with a generated catalog.
    pub fn with_scale(scale: Scale) -> Self {
        Self {
            snapshot: generate_catalog(scale),
        }
    }

    /// Create an engine over this context's catalog.
    pub fn engine(&self, collation: Collation) -> CatalogEngine<SnapshotDriver> {
        CatalogEngine::from_snapshot(self.snapshot.clone(), EngineConfig::new(collation))
    }

    /// Write the catalog to a temporary JSON snapshot file.
    pub fn write_snapshot(&self) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(catalog_to_json(&self.snapshot)?.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::with_scale(Scale::default())
    }
}
