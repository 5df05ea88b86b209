//! Sort-order keys.

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Where null values sort relative to non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// Nulls sort before non-null values.
    First,
    /// Nulls sort after non-null values.
    Last,
}

/// One sort key of a table's sort order. The sequence of sort keys is
/// order-significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrder {
    /// The sort expression.
    pub transform: Transform,
    /// Sort direction.
    pub direction: SortDirection,
    /// Null placement.
    pub null_ordering: NullOrdering,
}

impl SortOrder {
    /// Creates a sort key.
    #[must_use]
    pub const fn new(
        transform: Transform,
        direction: SortDirection,
        null_ordering: NullOrdering,
    ) -> Self {
        Self {
            transform,
            direction,
            null_ordering,
        }
    }
}
