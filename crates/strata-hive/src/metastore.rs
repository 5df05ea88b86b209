//! The metastore client seam.
//!
//! [`MetastoreClient`] is the external-collaborator boundary of the Hive
//! adapter: everything behind it speaks metastore-native records and fails
//! with [`MetastoreError`], the backend-native error type the adapter
//! translates into the shared taxonomy. A real deployment backs this trait
//! with a thrift client; [`MemoryMetastore`] is the in-process
//! implementation used by tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Result alias for metastore calls.
pub type MetastoreResult<T> = std::result::Result<T, MetastoreError>;

/// Backend-native metastore failures.
///
/// These never cross the adapter contract; the adapter maps each one to
/// exactly one taxonomy kind.
#[derive(Debug, thiserror::Error)]
pub enum MetastoreError {
    /// The addressed database does not exist.
    #[error("database does not exist: {0}")]
    NoSuchDatabase(String),

    /// A database with the name already exists.
    #[error("database already exists: {0}")]
    DatabaseAlreadyExists(String),

    /// The addressed table does not exist.
    #[error("table does not exist: {database}.{table}")]
    NoSuchTable {
        /// Owning database.
        database: String,
        /// Table name.
        table: String,
    },

    /// A table with the name already exists.
    #[error("table already exists: {database}.{table}")]
    TableAlreadyExists {
        /// Owning database.
        database: String,
        /// Table name.
        table: String,
    },

    /// A non-cascading database drop found remaining tables.
    #[error("database is not empty: {0}")]
    NonEmptyDatabase(String),

    /// A transport-level failure talking to the metastore.
    #[error("metastore transport failure: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MetastoreError {
    /// Creates a transport failure with the given message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }
}

/// A metastore database record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveDatabase {
    /// Database name.
    pub name: String,
    /// Database description.
    pub comment: Option<String>,
    /// Database parameters.
    pub parameters: BTreeMap<String, String>,
}

/// One column of a metastore table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveField {
    /// Column name.
    pub name: String,
    /// Hive type name (e.g. `int`, `struct<a:string>`).
    pub type_name: String,
    /// Column description.
    pub comment: Option<String>,
}

/// One sort key of a metastore table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveSortCol {
    /// The sorted column.
    pub column: String,
    /// Ascending when true.
    pub ascending: bool,
    /// Nulls sort first when true.
    pub nulls_first: bool,
}

/// A metastore table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveTableRepr {
    /// Table name.
    pub name: String,
    /// All columns, in order.
    pub fields: Vec<HiveField>,
    /// Names of the columns the table is partitioned by.
    pub partition_keys: Vec<String>,
    /// Names of the columns carrying a NOT NULL constraint (Hive 3+).
    pub not_null_cols: Vec<String>,
    /// Number of buckets; zero when unbucketed.
    pub num_buckets: u32,
    /// The bucketing columns, in order.
    pub bucket_cols: Vec<String>,
    /// The sort keys, in order.
    pub sort_cols: Vec<HiveSortCol>,
    /// Table description.
    pub comment: Option<String>,
    /// Table parameters.
    pub parameters: BTreeMap<String, String>,
}

/// Async client interface to a Hive metastore.
///
/// `alter_table` swaps in the complete new table record in one call —
/// including a rename when `table.name` differs from `name` — so a failed
/// alteration never leaves a partially-applied record behind.
#[async_trait]
pub trait MetastoreClient: Send + Sync {
    /// Lists database names.
    async fn list_databases(&self) -> MetastoreResult<Vec<String>>;

    /// Creates a database.
    async fn create_database(&self, database: HiveDatabase) -> MetastoreResult<()>;

    /// Fetches a database record.
    async fn get_database(&self, name: &str) -> MetastoreResult<HiveDatabase>;

    /// Replaces a database record.
    async fn alter_database(&self, name: &str, database: HiveDatabase) -> MetastoreResult<()>;

    /// Drops a database; `cascade` drops contained tables too.
    async fn drop_database(&self, name: &str, cascade: bool) -> MetastoreResult<()>;

    /// Lists table names within a database.
    async fn list_tables(&self, database: &str) -> MetastoreResult<Vec<String>>;

    /// Creates a table.
    async fn create_table(&self, database: &str, table: HiveTableRepr) -> MetastoreResult<()>;

    /// Fetches a table record.
    async fn get_table(&self, database: &str, name: &str) -> MetastoreResult<HiveTableRepr>;

    /// Replaces the table record at `name` with `table` in one call.
    async fn alter_table(
        &self,
        database: &str,
        name: &str,
        table: HiveTableRepr,
    ) -> MetastoreResult<()>;

    /// Drops a table.
    async fn drop_table(&self, database: &str, name: &str) -> MetastoreResult<()>;
}

#[derive(Debug)]
struct DatabaseEntry {
    database: HiveDatabase,
    tables: BTreeMap<String, HiveTableRepr>,
}

/// In-process metastore used by tests.
///
/// Operations are serialized through an interior lock, so two concurrent
/// alterations of the same table cannot interleave; each sees either the
/// record before or after the other's full swap.
#[derive(Debug, Default)]
pub struct MemoryMetastore {
    inner: Mutex<BTreeMap<String, DatabaseEntry>>,
}

impl MemoryMetastore {
    /// Creates an empty metastore.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MetastoreResult<MutexGuard<'_, BTreeMap<String, DatabaseEntry>>> {
        self.inner
            .lock()
            .map_err(|_| MetastoreError::transport("metastore state lock poisoned"))
    }
}

#[async_trait]
impl MetastoreClient for MemoryMetastore {
    async fn list_databases(&self) -> MetastoreResult<Vec<String>> {
        Ok(self.locked()?.keys().cloned().collect())
    }

    async fn create_database(&self, database: HiveDatabase) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        if state.contains_key(&database.name) {
            return Err(MetastoreError::DatabaseAlreadyExists(database.name));
        }
        state.insert(
            database.name.clone(),
            DatabaseEntry {
                database,
                tables: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn get_database(&self, name: &str) -> MetastoreResult<HiveDatabase> {
        self.locked()?
            .get(name)
            .map(|entry| entry.database.clone())
            .ok_or_else(|| MetastoreError::NoSuchDatabase(name.to_string()))
    }

    async fn alter_database(&self, name: &str, database: HiveDatabase) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        let entry = state
            .get_mut(name)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(name.to_string()))?;
        entry.database = database;
        Ok(())
    }

    async fn drop_database(&self, name: &str, cascade: bool) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        let entry = state
            .get(name)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(name.to_string()))?;
        if !cascade && !entry.tables.is_empty() {
            return Err(MetastoreError::NonEmptyDatabase(name.to_string()));
        }
        state.remove(name);
        Ok(())
    }

    async fn list_tables(&self, database: &str) -> MetastoreResult<Vec<String>> {
        self.locked()?
            .get(database)
            .map(|entry| entry.tables.keys().cloned().collect())
            .ok_or_else(|| MetastoreError::NoSuchDatabase(database.to_string()))
    }

    async fn create_table(&self, database: &str, table: HiveTableRepr) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        let entry = state
            .get_mut(database)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(database.to_string()))?;
        if entry.tables.contains_key(&table.name) {
            return Err(MetastoreError::TableAlreadyExists {
                database: database.to_string(),
                table: table.name,
            });
        }
        entry.tables.insert(table.name.clone(), table);
        Ok(())
    }

    async fn get_table(&self, database: &str, name: &str) -> MetastoreResult<HiveTableRepr> {
        self.locked()?
            .get(database)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(database.to_string()))?
            .tables
            .get(name)
            .cloned()
            .ok_or_else(|| MetastoreError::NoSuchTable {
                database: database.to_string(),
                table: name.to_string(),
            })
    }

    async fn alter_table(
        &self,
        database: &str,
        name: &str,
        table: HiveTableRepr,
    ) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        let entry = state
            .get_mut(database)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(database.to_string()))?;
        if !entry.tables.contains_key(name) {
            return Err(MetastoreError::NoSuchTable {
                database: database.to_string(),
                table: name.to_string(),
            });
        }
        if table.name != name && entry.tables.contains_key(&table.name) {
            return Err(MetastoreError::TableAlreadyExists {
                database: database.to_string(),
                table: table.name,
            });
        }
        entry.tables.remove(name);
        entry.tables.insert(table.name.clone(), table);
        Ok(())
    }

    async fn drop_table(&self, database: &str, name: &str) -> MetastoreResult<()> {
        let mut state = self.locked()?;
        let entry = state
            .get_mut(database)
            .ok_or_else(|| MetastoreError::NoSuchDatabase(database.to_string()))?;
        if entry.tables.remove(name).is_none() {
            return Err(MetastoreError::NoSuchTable {
                database: database.to_string(),
                table: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(name: &str) -> HiveDatabase {
        HiveDatabase {
            name: name.to_string(),
            comment: None,
            parameters: BTreeMap::new(),
        }
    }

    fn table(name: &str) -> HiveTableRepr {
        HiveTableRepr {
            name: name.to_string(),
            fields: vec![HiveField {
                name: "col_1".to_string(),
                type_name: "int".to_string(),
                comment: None,
            }],
            partition_keys: Vec::new(),
            not_null_cols: Vec::new(),
            num_buckets: 0,
            bucket_cols: Vec::new(),
            sort_cols: Vec::new(),
            comment: None,
            parameters: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn database_lifecycle() {
        let store = MemoryMetastore::new();
        store.create_database(database("db")).await.unwrap();
        assert!(matches!(
            store.create_database(database("db")).await,
            Err(MetastoreError::DatabaseAlreadyExists(_))
        ));
        assert_eq!(store.list_databases().await.unwrap(), vec!["db"]);
        store.drop_database("db", false).await.unwrap();
        assert!(matches!(
            store.get_database("db").await,
            Err(MetastoreError::NoSuchDatabase(_))
        ));
    }

    #[tokio::test]
    async fn non_cascading_drop_refuses_remaining_tables() {
        let store = MemoryMetastore::new();
        store.create_database(database("db")).await.unwrap();
        store.create_table("db", table("t")).await.unwrap();
        assert!(matches!(
            store.drop_database("db", false).await,
            Err(MetastoreError::NonEmptyDatabase(_))
        ));
        store.drop_database("db", true).await.unwrap();
    }

    #[tokio::test]
    async fn alter_table_swaps_the_record_including_renames() {
        let store = MemoryMetastore::new();
        store.create_database(database("db")).await.unwrap();
        store.create_table("db", table("t")).await.unwrap();

        let mut renamed = table("t_new");
        renamed.comment = Some("swapped".to_string());
        store.alter_table("db", "t", renamed).await.unwrap();

        assert!(matches!(
            store.get_table("db", "t").await,
            Err(MetastoreError::NoSuchTable { .. })
        ));
        let fetched = store.get_table("db", "t_new").await.unwrap();
        assert_eq!(fetched.comment.as_deref(), Some("swapped"));
    }

    #[tokio::test]
    async fn rename_collision_is_rejected() {
        let store = MemoryMetastore::new();
        store.create_database(database("db")).await.unwrap();
        store.create_table("db", table("a")).await.unwrap();
        store.create_table("db", table("b")).await.unwrap();
        assert!(matches!(
            store.alter_table("db", "a", table("b")).await,
            Err(MetastoreError::TableAlreadyExists { .. })
        ));
        // Both originals are still present.
        assert!(store.get_table("db", "a").await.is_ok());
        assert!(store.get_table("db", "b").await.is_ok());
    }

    #[tokio::test]
    async fn missing_targets_fail() {
        let store = MemoryMetastore::new();
        assert!(matches!(
            store.list_tables("nope").await,
            Err(MetastoreError::NoSuchDatabase(_))
        ));
        store.create_database(database("db")).await.unwrap();
        assert!(matches!(
            store.get_table("db", "t").await,
            Err(MetastoreError::NoSuchTable { .. })
        ));
        assert!(matches!(
            store.drop_table("db", "t").await,
            Err(MetastoreError::NoSuchTable { .. })
        ));
    }
}
