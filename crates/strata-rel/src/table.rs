//! Tables: the column-bearing entities a catalog manages.
//!
//! A [`Table`] is immutable. The mutation engine
//! ([`evolve`](crate::evolve)) produces a *new* table from an ordered
//! sequence of changes; adapters realize that finished post-image against
//! the backend in one call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use strata_core::audit::AuditInfo;
use strata_core::error::{Error, Result};

use crate::column::Column;
use crate::distribution::Distribution;
use crate::sort::SortOrder;
use crate::transform::Transform;

/// A table definition.
///
/// Column order is significant and caller-visible; column names are unique
/// within the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Table name.
    pub name: String,

    /// The columns, in caller-visible order.
    pub columns: Vec<Column>,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Table properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// Partitioning transforms, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitioning: Vec<Transform>,

    /// Row distribution, or the "none" sentinel.
    #[serde(default, skip_serializing_if = "Distribution::is_none")]
    pub distribution: Distribution,

    /// Sort keys, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_orders: Vec<SortOrder>,

    /// Audit metadata.
    pub audit: AuditInfo,
}

impl Table {
    /// Creates a new builder for constructing tables.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Looks up a top-level column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The caller-supplied description of a table to create.
///
/// This is the request-side counterpart of [`Table`]: everything but the
/// name (carried by the identifier) and the audit metadata (stamped by the
/// adapter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreation {
    /// The columns, in order.
    pub columns: Vec<Column>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Table properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Partitioning transforms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitioning: Vec<Transform>,
    /// Row distribution.
    #[serde(default, skip_serializing_if = "Distribution::is_none")]
    pub distribution: Distribution,
    /// Sort keys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_orders: Vec<SortOrder>,
}

impl TableCreation {
    /// Creates a table-creation request over the given columns.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the properties.
    #[must_use]
    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the partitioning transforms.
    #[must_use]
    pub fn with_partitioning(mut self, partitioning: Vec<Transform>) -> Self {
        self.partitioning = partitioning;
        self
    }

    /// Sets the distribution.
    #[must_use]
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the sort keys.
    #[must_use]
    pub fn with_sort_orders(mut self, sort_orders: Vec<SortOrder>) -> Self {
        self.sort_orders = sort_orders;
        self
    }
}

/// Builder for [`Table`] instances.
#[derive(Debug, Default)]
pub struct TableBuilder {
    name: Option<String>,
    columns: Vec<Column>,
    comment: Option<String>,
    properties: BTreeMap<String, String>,
    partitioning: Vec<Transform>,
    distribution: Distribution,
    sort_orders: Vec<SortOrder>,
    audit: Option<AuditInfo>,
}

impl TableBuilder {
    /// Sets the table name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the columns.
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the properties.
    #[must_use]
    pub fn properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the partitioning transforms.
    #[must_use]
    pub fn partitioning(mut self, partitioning: Vec<Transform>) -> Self {
        self.partitioning = partitioning;
        self
    }

    /// Sets the distribution.
    #[must_use]
    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the sort keys.
    #[must_use]
    pub fn sort_orders(mut self, sort_orders: Vec<SortOrder>) -> Self {
        self.sort_orders = sort_orders;
        self
    }

    /// Sets the audit metadata.
    #[must_use]
    pub fn audit(mut self, audit: AuditInfo) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the name is missing or empty,
    /// no columns are supplied, a column name repeats, or audit metadata is
    /// missing.
    pub fn try_build(self) -> Result<Table> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::illegal_argument("table name cannot be empty"))?;
        if self.columns.is_empty() {
            return Err(Error::illegal_argument(format!(
                "table '{name}' requires at least one column"
            )));
        }
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::illegal_argument(format!(
                    "duplicate column name '{}' in table '{name}'",
                    column.name
                )));
            }
        }
        let audit = self
            .audit
            .ok_or_else(|| Error::illegal_argument("table audit info is required"))?;

        Ok(Table {
            name,
            columns: self.columns,
            comment: self.comment,
            properties: self.properties,
            partitioning: self.partitioning,
            distribution: self.distribution,
            sort_orders: self.sort_orders,
            audit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, TypeKind};
    use chrono::Utc;

    fn audit() -> AuditInfo {
        AuditInfo::new("test_user", Utc::now())
    }

    #[test]
    fn builder_produces_table() {
        let table = Table::builder()
            .name("orders")
            .columns(vec![
                Column::new("col_1", DataType::nullable(TypeKind::I8)),
                Column::new("col_2", DataType::nullable(TypeKind::Date)),
            ])
            .comment("test_comment")
            .audit(audit())
            .try_build()
            .unwrap();

        assert_eq!(table.name, "orders");
        assert_eq!(table.columns.len(), 2);
        assert!(table.distribution.is_none());
        assert!(table.column("col_1").is_some());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn builder_rejects_duplicate_column_names() {
        let result = Table::builder()
            .name("orders")
            .columns(vec![
                Column::new("col_1", DataType::nullable(TypeKind::I8)),
                Column::new("col_1", DataType::nullable(TypeKind::Date)),
            ])
            .audit(audit())
            .try_build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_empty_tables() {
        assert!(Table::builder().name("t").audit(audit()).try_build().is_err());
        assert!(Table::builder()
            .columns(vec![Column::new("c", DataType::nullable(TypeKind::I8))])
            .audit(audit())
            .try_build()
            .is_err());
    }
}
