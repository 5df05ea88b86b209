//! # strata-rel
//!
//! The relational surface of the Strata metadata catalog:
//!
//! - **Entity model**: [`schema::Schema`], [`table::Table`],
//!   [`column::Column`] with immutable builders and audit metadata
//! - **Transform algebra**: partitioning, distribution, and sort-order
//!   expressions over column references ([`transform`], [`distribution`],
//!   [`sort`])
//! - **Mutation engine**: the ordered [`change::TableChange`] algebra and
//!   its application semantics ([`evolve`])
//! - **Adapter contract**: the async [`catalog::SchemaCatalog`] /
//!   [`catalog::TableCatalog`] traits every backend implements
//! - **Capability descriptors**: the data-driven
//!   [`capability::CapabilitySpec`] adapters consult before delegating
//!
//! Everything here is pure and side-effect free; blocking and concurrency
//! live behind the adapter contract.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod catalog;
pub mod change;
pub mod column;
pub mod distribution;
pub mod evolve;
pub mod schema;
pub mod sort;
pub mod table;
pub mod transform;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::capability::CapabilitySpec;
    pub use crate::catalog::{SchemaCatalog, TableCatalog};
    pub use crate::change::{ColumnPosition, TableChange};
    pub use crate::column::Column;
    pub use crate::distribution::{Distribution, DistributionStrategy};
    pub use crate::schema::{Schema, SchemaChange};
    pub use crate::sort::{NullOrdering, SortDirection, SortOrder};
    pub use crate::table::{Table, TableCreation};
    pub use crate::transform::{FieldPath, Transform, TransformStrategy};
    pub use crate::types::{DataType, TypeKind};
}

// Re-export key types at crate root for ergonomics
pub use capability::CapabilitySpec;
pub use catalog::{SchemaCatalog, TableCatalog};
pub use change::{ColumnPosition, TableChange};
pub use column::Column;
pub use distribution::{Distribution, DistributionStrategy};
pub use schema::{Schema, SchemaChange};
pub use sort::{NullOrdering, SortDirection, SortOrder};
pub use table::{Table, TableCreation};
pub use transform::{FieldPath, PartitionAssignment, Transform, TransformStrategy};
pub use types::{DataType, TypeKind};
