//! Engine configuration.

use std::cmp::Ordering;

/// String comparison rules for predicates and ordering.
///
/// The engine's native collation depends on how the database file and the
/// connection were configured, so callers always choose one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    /// Case-sensitive, ordinal comparison.
    Binary,
    /// Case-insensitive comparison (Unicode lowercase folding).
    NoCase,
}

impl Collation {
    /// The character sequence a string compares as.
    ///
    /// `NoCase` lowercases whole strings, so one character may fold to
    /// several (`İ` folds to `i` plus a combining dot).
    pub fn fold(&self, s: &str) -> Vec<char> {
        match self {
            Collation::Binary => s.chars().collect(),
            Collation::NoCase => lowercase(s).collect(),
        }
    }

    /// Compare two strings for equality.
    pub fn equals(&self, a: &str, b: &str) -> bool {
        match self {
            Collation::Binary => a == b,
            Collation::NoCase => lowercase(a).eq(lowercase(b)),
        }
    }

    /// Order two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Binary => a.cmp(b),
            Collation::NoCase => lowercase(a).cmp(lowercase(b)),
        }
    }
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Where null values land in an ascending sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrder {
    /// Nulls sort before every non-null value.
    #[default]
    First,
    /// Nulls sort after every non-null value.
    Last,
}

/// Catalog engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// String comparison rules for WHERE and ORDER BY.
    pub collation: Collation,

    /// Placement of nulls when ordering.
    pub null_order: NullOrder,
}

impl EngineConfig {
    /// Create a configuration with the given collation.
    pub fn new(collation: Collation) -> Self {
        Self {
            collation,
            null_order: NullOrder::default(),
        }
    }

    /// Set the collation.
    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = collation;
        self
    }

    /// Set where nulls sort.
    pub fn with_null_order(mut self, null_order: NullOrder) -> Self {
        self.null_order = null_order;
        self
    }
}
