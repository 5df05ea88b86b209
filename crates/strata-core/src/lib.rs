//! # strata-core
//!
//! Core abstractions for the Strata unified metadata catalog.
//!
//! This crate provides the foundational types used across all Strata
//! components:
//!
//! - **Identifiers**: hierarchical [`ident::NameIdent`] / [`ident::Namespace`]
//!   addressing (`metalake.catalog.schema.table`)
//! - **Audit Metadata**: immutable creator/modifier records
//! - **Entities**: the configured-catalog record adapters are built from
//! - **Error Taxonomy**: the structured exception kinds every adapter maps
//!   backend failures into
//! - **Configuration**: the bypass-prefix passthrough convention
//!
//! ## Crate Boundary
//!
//! `strata-core` is the only crate allowed to define shared primitives.
//! The relational surface (columns, tables, transforms, mutations) lives in
//! `strata-rel`; backend adapters live in their own crates.
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let table = NameIdent::of(["lake", "hive_cat", "sales", "orders"]).unwrap();
//! assert_eq!(table.namespace().level(0), Some("lake"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod audit;
pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod ident;
pub mod observability;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use strata_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audit::AuditInfo;
    pub use crate::config::{split_bypass, BYPASS_PREFIX};
    pub use crate::entity::{CatalogEntity, CatalogType};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::id::CatalogId;
    pub use crate::ident::{NameIdent, Namespace};
}

// Re-export key types at crate root for ergonomics
pub use audit::AuditInfo;
pub use entity::{CatalogEntity, CatalogType};
pub use error::{Error, ErrorKind, Result};
pub use id::CatalogId;
pub use ident::{NameIdent, Namespace};
pub use observability::{init_logging, LogFormat};
