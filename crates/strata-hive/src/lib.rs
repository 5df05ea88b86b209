//! # strata-hive
//!
//! A Hive-metastore adapter for the Strata metadata catalog.
//!
//! The adapter realizes the generic
//! [`SchemaCatalog`](strata_rel::catalog::SchemaCatalog) /
//! [`TableCatalog`](strata_rel::catalog::TableCatalog) contract against a
//! Hive metastore, enforcing the backend's capability constraints before
//! any metastore call:
//!
//! - partitioning supports the identity transform only
//! - partition fields cannot address nested columns
//! - NOT NULL columns require Hive 3.0+ (gated by the `hive.version`
//!   configuration property)
//!
//! The metastore itself sits behind the [`metastore::MetastoreClient`]
//! trait; [`metastore::MemoryMetastore`] is the in-process implementation
//! used by tests. Backend-native [`metastore::MetastoreError`] values never
//! cross the contract — the adapter maps each one into the shared error
//! taxonomy, chaining the cause for unclassified transport failures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
mod convert;
pub mod metastore;
pub mod types;

pub use catalog::HiveCatalog;
pub use config::{HiveCatalogConfig, HiveVersion, HIVE_VERSION, METASTORE_URIS};
pub use metastore::{MemoryMetastore, MetastoreClient, MetastoreError};
