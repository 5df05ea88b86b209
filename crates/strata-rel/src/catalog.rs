//! The catalog adapter contract.
//!
//! Each backend provides an adapter implementing [`SchemaCatalog`] and
//! [`TableCatalog`]. The contract is where capability constraints are
//! enforced and backend-native failures are translated into the
//! [`strata_core::error`] taxonomy; no backend-native error type crosses
//! this boundary.
//!
//! # Contract rules
//!
//! | Operation | Rule |
//! |-----------|------|
//! | `create_*` | Fails with AlreadyExists on an existing identifier; never overwrites |
//! | `load_*` / `alter_*` | Fail with NotFound on a missing identifier |
//! | `list_tables` | Fails with NotFound when the parent schema is missing, not an empty result |
//! | `alter_table` | All-or-nothing: a failed change sequence leaves the backend state unchanged |
//! | capability checks | Run before any backend mutation is attempted |
//!
//! The state machine per table identifier, observed through the contract:
//! `Absent → create_table → Present → alter_table → Present' → drop_table →
//! Absent`.
//!
//! # Concurrency
//!
//! Implementations must be safe to invoke from multiple concurrent callers
//! against different identifiers. Two concurrent alters of the *same*
//! identifier are serialized by the backend's own concurrency control; in
//! no case may a partially-applied change sequence become visible.

use async_trait::async_trait;
use std::collections::BTreeMap;

use strata_core::error::Result;
use strata_core::ident::{NameIdent, Namespace};

use crate::change::TableChange;
use crate::schema::{Schema, SchemaChange};
use crate::table::{Table, TableCreation};

/// Schema lifecycle operations of a catalog adapter.
#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// Lists the schemas under a catalog namespace
    /// (`metalake.catalog`), as full identifiers in backend order.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the catalog does not exist.
    async fn list_schemas(&self, namespace: &Namespace) -> Result<Vec<NameIdent>>;

    /// Creates a schema at the given identifier.
    ///
    /// # Errors
    ///
    /// Returns AlreadyExists when the identifier is taken; the existing
    /// schema is left untouched.
    async fn create_schema(
        &self,
        ident: &NameIdent,
        comment: Option<&str>,
        properties: BTreeMap<String, String>,
    ) -> Result<Schema>;

    /// Loads the schema at the given identifier.
    ///
    /// Never mutates audit metadata.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the schema does not exist.
    async fn load_schema(&self, ident: &NameIdent) -> Result<Schema>;

    /// Applies an ordered sequence of changes to the schema, returning the
    /// altered schema.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the schema does not exist.
    async fn alter_schema(&self, ident: &NameIdent, changes: &[SchemaChange]) -> Result<Schema>;

    /// Drops the schema. `cascade` permits dropping a schema that still
    /// contains tables.
    ///
    /// Returns false when the schema did not exist.
    ///
    /// # Errors
    ///
    /// Returns NonEmpty when the schema holds tables and `cascade` is
    /// false.
    async fn drop_schema(&self, ident: &NameIdent, cascade: bool) -> Result<bool>;

    /// Returns true when a schema exists at the identifier.
    ///
    /// # Errors
    ///
    /// Returns backend failures only; a missing schema is `Ok(false)`.
    async fn schema_exists(&self, ident: &NameIdent) -> Result<bool> {
        match self.load_schema(ident).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == strata_core::error::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Table lifecycle operations of a catalog adapter.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Lists the tables under a schema namespace
    /// (`metalake.catalog.schema`), as full identifiers in backend order.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the parent schema does not exist — never an
    /// empty result.
    async fn list_tables(&self, namespace: &Namespace) -> Result<Vec<NameIdent>>;

    /// Creates a table at the given identifier.
    ///
    /// Capability constraints (partition strategies, nested fields,
    /// nullability) are validated before the backend is touched.
    ///
    /// # Errors
    ///
    /// Returns AlreadyExists when the identifier is taken; the existing
    /// table is left untouched.
    async fn create_table(&self, ident: &NameIdent, creation: TableCreation) -> Result<Table>;

    /// Loads the table at the given identifier.
    ///
    /// Never mutates audit metadata.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the table does not exist.
    async fn load_table(&self, ident: &NameIdent) -> Result<Table>;

    /// Applies an ordered sequence of changes to the table, returning the
    /// altered table.
    ///
    /// The full post-image is computed and validated before the backend is
    /// touched; a failed sequence leaves the backend's observable state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the table does not exist, and IllegalArgument
    /// when a change violates the mutation rules or a backend capability
    /// constraint.
    async fn alter_table(&self, ident: &NameIdent, changes: &[TableChange]) -> Result<Table>;

    /// Drops the table.
    ///
    /// Returns false when the table did not exist.
    async fn drop_table(&self, ident: &NameIdent) -> Result<bool>;

    /// Returns true when a table exists at the identifier.
    ///
    /// # Errors
    ///
    /// Returns backend failures only; a missing table is `Ok(false)`.
    async fn table_exists(&self, ident: &NameIdent) -> Result<bool> {
        match self.load_table(ident).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == strata_core::error::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}
