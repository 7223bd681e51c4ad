//! jetcat Benchmark Suite
//!
//! Criterion benchmarks for the catalog query engine.
//!
//! # Benchmark Categories
//!
//! - **Parse**: Statement lexing and parsing
//! - **Query**: Fetch, filter, and sort through the engine
//! - **Matcher**: LIKE pattern evaluation under each collation
//! - **Snapshot**: Loading JSON catalog snapshots

pub mod fixtures;
pub mod harness;

pub use fixtures::{generate_catalog, Scale};
pub use harness::TestContext;
