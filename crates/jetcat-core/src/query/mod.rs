//! Query engine for SHOW statements.
//!
//! The executor takes a parsed statement, fetches the kind's native rowset,
//! and returns a filtered, ordered [`ResultRowset`](jetcat_types::ResultRowset).

mod executor;
mod matcher;

pub use executor::QueryExecutor;
pub use matcher::PatternMatcher;
