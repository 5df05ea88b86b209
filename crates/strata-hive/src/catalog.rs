//! The Hive catalog adapter.
//!
//! [`HiveCatalog`] realizes the generic schema/table contract against a
//! Hive metastore. Capability constraints — identity-only partitioning, no
//! nested partition fields, the NOT NULL version gate — are validated
//! before the metastore is touched, so a rejected request never leaves
//! partial backend state. Alterations are computed as a full post-image by
//! the mutation engine and swapped in with a single metastore call.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

use strata_core::audit::AuditInfo;
use strata_core::entity::CatalogEntity;
use strata_core::error::{Error, Result};
use strata_core::ident::{NameIdent, Namespace};
use strata_rel::capability::CapabilitySpec;
use strata_rel::catalog::{SchemaCatalog, TableCatalog};
use strata_rel::change::TableChange;
use strata_rel::column::{find_field, Column};
use strata_rel::evolve;
use strata_rel::schema::{Schema, SchemaChange};
use strata_rel::table::{Table, TableCreation};
use strata_rel::transform::{Transform, TransformStrategy};
use strata_rel::types::DataType;

use crate::config::HiveCatalogConfig;
use crate::convert::{database_to_schema, repr_to_table, schema_to_database, table_to_repr};
use crate::metastore::{MetastoreClient, MetastoreError};

/// A catalog adapter backed by a Hive metastore.
pub struct HiveCatalog {
    entity: CatalogEntity,
    config: HiveCatalogConfig,
    capabilities: CapabilitySpec,
    principal: String,
    client: Arc<dyn MetastoreClient>,
}

impl HiveCatalog {
    /// Constructs the adapter from a configured catalog entity.
    ///
    /// `principal` is the actor stamped into audit metadata for every
    /// create and alter issued through this instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] when the entity's properties do
    /// not form a valid Hive configuration.
    pub fn new(
        entity: CatalogEntity,
        principal: impl Into<String>,
        client: Arc<dyn MetastoreClient>,
    ) -> Result<Self> {
        let config = HiveCatalogConfig::from_properties(&entity.properties)?;
        let capabilities = CapabilitySpec::new("hive")
            .with_partition_strategies([TransformStrategy::Identity])
            .with_nested_partition_fields(false)
            .with_not_null_columns(config.version.supports_not_null());
        Ok(Self {
            entity,
            config,
            capabilities,
            principal: principal.into(),
            client,
        })
    }

    /// Returns the configured catalog entity.
    #[must_use]
    pub const fn entity(&self) -> &CatalogEntity {
        &self.entity
    }

    /// Returns the validated adapter configuration.
    #[must_use]
    pub const fn config(&self) -> &HiveCatalogConfig {
        &self.config
    }

    /// Returns this backend's capability descriptor.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySpec {
        &self.capabilities
    }

    fn metalake(&self) -> &str {
        self.entity.namespace.level(0).unwrap_or_default()
    }

    fn check_namespace(&self, namespace: &Namespace, expected_levels: usize) -> Result<()> {
        if namespace.len() != expected_levels
            || namespace.level(0) != Some(self.metalake())
            || namespace.level(1) != Some(self.entity.name.as_str())
        {
            return Err(Error::illegal_argument(format!(
                "namespace '{namespace}' is not managed by catalog '{}.{}'",
                self.metalake(),
                self.entity.name
            )));
        }
        Ok(())
    }

    fn database_of<'a>(&self, ident: &'a NameIdent) -> Result<&'a str> {
        ident.check_table()?;
        self.check_namespace(ident.namespace(), 3)?;
        ident
            .namespace()
            .level(2)
            .ok_or_else(|| Error::illegal_argument(format!("'{ident}' lacks a schema level")))
    }

    fn schema_ident_of(ident: &NameIdent) -> String {
        ident
            .parent()
            .map_or_else(|| ident.to_string(), |parent| parent.to_string())
    }

    /// The version-gate diagnostic for NOT NULL rejections.
    fn not_null_message(&self) -> String {
        format!(
            "The NOT NULL constraint for column is only supported since Hive 3.0, \
             but the configured catalog runs Hive {}",
            self.config.version
        )
    }

    fn check_column_types<'a>(&self, types: impl Iterator<Item = &'a DataType>) -> Result<()> {
        if self.capabilities.supports_not_null_columns() {
            return Ok(());
        }
        for data_type in types {
            if !data_type.nullable || nested_required(data_type) {
                return Err(Error::illegal_argument(self.not_null_message()));
            }
        }
        Ok(())
    }

    /// Hive stores bucketing and sort keys as plain column names, so both
    /// must be identity references to existing top-level columns.
    fn check_layout_keys<'a>(
        &self,
        transforms: impl Iterator<Item = &'a Transform>,
        columns: &[Column],
        context: &str,
    ) -> Result<()> {
        for transform in transforms {
            match transform {
                Transform::Identity { field } if !field.is_nested() => {
                    if find_field(columns, field).is_none() {
                        return Err(Error::illegal_argument(format!(
                            "hive {context} must match one column, no column matches {field}"
                        )));
                    }
                }
                other => {
                    return Err(Error::illegal_argument(format!(
                        "hive {context} only supports identity references to top-level \
                         columns, got {}",
                        other.strategy()
                    )))
                }
            }
        }
        Ok(())
    }

    fn check_creation(&self, creation: &TableCreation) -> Result<()> {
        self.check_column_types(creation.columns.iter().map(|c| &c.data_type))?;
        self.capabilities
            .check_partitioning(&creation.partitioning, &creation.columns)?;
        self.check_layout_keys(
            creation.distribution.transforms.iter(),
            &creation.columns,
            "distribution keys",
        )?;
        self.check_layout_keys(
            creation.sort_orders.iter().map(|o| &o.transform),
            &creation.columns,
            "sort order",
        )
    }

    /// Capability-checks the column types a change sequence introduces,
    /// before any post-image is computed.
    fn check_changes(&self, changes: &[TableChange]) -> Result<()> {
        let introduced = changes.iter().filter_map(|change| match change {
            TableChange::AddColumn { data_type, .. }
            | TableChange::UpdateColumnType { data_type, .. } => Some(data_type),
            _ => None,
        });
        self.check_column_types(introduced)
    }

    fn map_schema_err(err: MetastoreError, ident: &NameIdent) -> Error {
        match err {
            MetastoreError::NoSuchDatabase(_) => Error::no_such_schema(ident),
            MetastoreError::DatabaseAlreadyExists(_) => Error::schema_already_exists(ident),
            MetastoreError::NonEmptyDatabase(_) => Error::non_empty_schema(ident),
            other => Error::backend_with_source("metastore call failed", other),
        }
    }

    fn map_table_err(err: MetastoreError, ident: &NameIdent) -> Error {
        match err {
            MetastoreError::NoSuchDatabase(_) => {
                Error::no_such_schema(Self::schema_ident_of(ident))
            }
            MetastoreError::NoSuchTable { .. } => Error::no_such_table(ident),
            MetastoreError::TableAlreadyExists { table, .. } => {
                Error::table_already_exists(format!("{}.{table}", Self::schema_ident_of(ident)))
            }
            other => Error::backend_with_source("metastore call failed", other),
        }
    }
}

fn nested_required(data_type: &DataType) -> bool {
    data_type.kind.fields().is_some_and(|fields| {
        fields
            .iter()
            .any(|f| !f.data_type.nullable || nested_required(&f.data_type))
    })
}

#[async_trait]
impl SchemaCatalog for HiveCatalog {
    async fn list_schemas(&self, namespace: &Namespace) -> Result<Vec<NameIdent>> {
        self.check_namespace(namespace, 2)?;
        let names = self
            .client
            .list_databases()
            .await
            .map_err(|err| Error::backend_with_source("metastore call failed", err))?;
        tracing::debug!(
            metalake = %self.metalake(),
            catalog = %self.entity.name,
            schemas = names.len(),
            "hive catalog listed schemas"
        );
        names
            .into_iter()
            .map(|name| NameIdent::new(namespace.clone(), name))
            .collect()
    }

    async fn create_schema(
        &self,
        ident: &NameIdent,
        comment: Option<&str>,
        properties: BTreeMap<String, String>,
    ) -> Result<Schema> {
        ident.check_schema()?;
        self.check_namespace(ident.namespace(), 2)?;

        let audit = AuditInfo::new(self.principal.as_str(), Utc::now());
        let schema = Schema::new(
            ident.name(),
            comment.map(ToString::to_string),
            properties,
            audit,
        );
        self.client
            .create_database(schema_to_database(&schema))
            .await
            .map_err(|err| Self::map_schema_err(err, ident))?;
        tracing::debug!(
            metalake = %self.metalake(),
            catalog = %self.entity.name,
            schema = %ident.name(),
            "hive catalog created schema"
        );
        Ok(schema)
    }

    async fn load_schema(&self, ident: &NameIdent) -> Result<Schema> {
        ident.check_schema()?;
        self.check_namespace(ident.namespace(), 2)?;
        let database = self
            .client
            .get_database(ident.name())
            .await
            .map_err(|err| Self::map_schema_err(err, ident))?;
        database_to_schema(database)
    }

    async fn alter_schema(&self, ident: &NameIdent, changes: &[SchemaChange]) -> Result<Schema> {
        let current = self.load_schema(ident).await?;
        let altered = current.applying(changes, &self.principal, Utc::now());
        self.client
            .alter_database(ident.name(), schema_to_database(&altered))
            .await
            .map_err(|err| Self::map_schema_err(err, ident))?;
        tracing::debug!(
            metalake = %self.metalake(),
            catalog = %self.entity.name,
            schema = %ident.name(),
            changes = changes.len(),
            "hive catalog altered schema"
        );
        Ok(altered)
    }

    async fn drop_schema(&self, ident: &NameIdent, cascade: bool) -> Result<bool> {
        ident.check_schema()?;
        self.check_namespace(ident.namespace(), 2)?;
        match self.client.drop_database(ident.name(), cascade).await {
            Ok(()) => {
                tracing::debug!(
                    metalake = %self.metalake(),
                    catalog = %self.entity.name,
                    schema = %ident.name(),
                    cascade,
                    "hive catalog dropped schema"
                );
                Ok(true)
            }
            Err(MetastoreError::NoSuchDatabase(_)) => Ok(false),
            Err(err) => Err(Self::map_schema_err(err, ident)),
        }
    }
}

#[async_trait]
impl TableCatalog for HiveCatalog {
    async fn list_tables(&self, namespace: &Namespace) -> Result<Vec<NameIdent>> {
        self.check_namespace(namespace, 3)?;
        let database = namespace
            .level(2)
            .ok_or_else(|| Error::illegal_argument(format!("'{namespace}' lacks a schema level")))?;
        let names = self
            .client
            .list_tables(database)
            .await
            .map_err(|err| match err {
                MetastoreError::NoSuchDatabase(_) => Error::no_such_schema(namespace),
                other => Error::backend_with_source("metastore call failed", other),
            })?;
        names
            .into_iter()
            .map(|name| NameIdent::new(namespace.clone(), name))
            .collect()
    }

    async fn create_table(&self, ident: &NameIdent, creation: TableCreation) -> Result<Table> {
        let database = self.database_of(ident)?;
        self.check_creation(&creation)?;

        let TableCreation {
            columns,
            comment,
            properties,
            partitioning,
            distribution,
            sort_orders,
        } = creation;
        let mut builder = Table::builder()
            .name(ident.name())
            .columns(columns)
            .properties(properties)
            .partitioning(partitioning)
            .distribution(distribution)
            .sort_orders(sort_orders)
            .audit(AuditInfo::new(self.principal.as_str(), Utc::now()));
        if let Some(comment) = comment {
            builder = builder.comment(comment);
        }
        let table = builder.try_build()?;

        let repr = table_to_repr(&table)?;
        self.client
            .create_table(database, repr)
            .await
            .map_err(|err| Self::map_table_err(err, ident))?;
        tracing::debug!(
            metalake = %self.metalake(),
            catalog = %self.entity.name,
            schema = %database,
            table = %ident.name(),
            "hive catalog created table"
        );
        Ok(table)
    }

    async fn load_table(&self, ident: &NameIdent) -> Result<Table> {
        let database = self.database_of(ident)?;
        let repr = self
            .client
            .get_table(database, ident.name())
            .await
            .map_err(|err| Self::map_table_err(err, ident))?;
        repr_to_table(repr)
    }

    async fn alter_table(&self, ident: &NameIdent, changes: &[TableChange]) -> Result<Table> {
        let database = self.database_of(ident)?;
        self.check_changes(changes)?;

        let current = self.load_table(ident).await?;
        let post = evolve::apply(&current, changes, &self.principal, Utc::now())?;
        let repr = table_to_repr(&post)?;
        self.client
            .alter_table(database, ident.name(), repr)
            .await
            .map_err(|err| Self::map_table_err(err, ident))?;
        tracing::debug!(
            metalake = %self.metalake(),
            catalog = %self.entity.name,
            schema = %database,
            table = %ident.name(),
            changes = changes.len(),
            "hive catalog altered table"
        );
        Ok(post)
    }

    async fn drop_table(&self, ident: &NameIdent) -> Result<bool> {
        let database = self.database_of(ident)?;
        match self.client.drop_table(database, ident.name()).await {
            Ok(()) => {
                tracing::debug!(
                    metalake = %self.metalake(),
                    catalog = %self.entity.name,
                    schema = %database,
                    table = %ident.name(),
                    "hive catalog dropped table"
                );
                Ok(true)
            }
            Err(MetastoreError::NoSuchTable { .. }) => Ok(false),
            Err(err) => Err(Self::map_table_err(err, ident)),
        }
    }
}
