//! Conversions between Strata entities and metastore-native records.
//!
//! Hive records cannot carry everything the entity model says: audit
//! metadata, the distribution strategy, and NOT NULL constraints ride in
//! table/database parameters and dedicated record fields, and are folded
//! back in on load.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use strata_core::audit::AuditInfo;
use strata_core::error::{Error, Result};
use strata_rel::column::Column;
use strata_rel::distribution::{Distribution, DistributionStrategy};
use strata_rel::schema::Schema;
use strata_rel::sort::{NullOrdering, SortDirection, SortOrder};
use strata_rel::table::Table;
use strata_rel::transform::{FieldPath, Transform};
use strata_rel::types::TypeKind;

use crate::metastore::{HiveDatabase, HiveField, HiveSortCol, HiveTableRepr};
use crate::types::{from_hive_type, to_hive_type};

const CREATOR_KEY: &str = "strata.creator";
const CREATE_TIME_KEY: &str = "strata.create-time";
const LAST_MODIFIER_KEY: &str = "strata.last-modifier";
const LAST_MODIFIED_TIME_KEY: &str = "strata.last-modified-time";
const DISTRIBUTION_STRATEGY_KEY: &str = "strata.distribution.strategy";

fn audit_to_params(audit: &AuditInfo, parameters: &mut BTreeMap<String, String>) {
    parameters.insert(CREATOR_KEY.to_string(), audit.creator.clone());
    parameters.insert(CREATE_TIME_KEY.to_string(), audit.create_time.to_rfc3339());
    if let Some(modifier) = &audit.last_modifier {
        parameters.insert(LAST_MODIFIER_KEY.to_string(), modifier.clone());
    }
    if let Some(time) = &audit.last_modified_time {
        parameters.insert(LAST_MODIFIED_TIME_KEY.to_string(), time.to_rfc3339());
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::backend(format!("malformed audit timestamp '{value}': {e}")))
}

fn audit_from_params(parameters: &mut BTreeMap<String, String>) -> Result<AuditInfo> {
    let creator = parameters
        .remove(CREATOR_KEY)
        .unwrap_or_else(|| "unknown".to_string());
    let create_time = match parameters.remove(CREATE_TIME_KEY) {
        Some(value) => parse_time(&value)?,
        None => DateTime::UNIX_EPOCH,
    };
    let mut audit = AuditInfo::new(creator, create_time);
    audit.last_modifier = parameters.remove(LAST_MODIFIER_KEY);
    audit.last_modified_time = parameters
        .remove(LAST_MODIFIED_TIME_KEY)
        .map(|value| parse_time(&value))
        .transpose()?;
    Ok(audit)
}

/// Renders a schema as a metastore database record.
pub(crate) fn schema_to_database(schema: &Schema) -> HiveDatabase {
    let mut parameters = schema.properties.clone();
    audit_to_params(&schema.audit, &mut parameters);
    HiveDatabase {
        name: schema.name.clone(),
        comment: schema.comment.clone(),
        parameters,
    }
}

/// Reconstructs a schema from a metastore database record.
pub(crate) fn database_to_schema(database: HiveDatabase) -> Result<Schema> {
    let mut parameters = database.parameters;
    let audit = audit_from_params(&mut parameters)?;
    Ok(Schema::new(database.name, database.comment, parameters, audit))
}

/// Returns the single top-level column an identity transform references,
/// which is the only partition/bucket/sort key shape Hive can store.
fn identity_column(transform: &Transform, context: &str) -> Result<String> {
    match transform {
        Transform::Identity { field } if !field.is_nested() => Ok(field.to_string()),
        other => Err(Error::unsupported(format!(
            "hive {context} cannot store a {} transform over {}",
            other.strategy(),
            other
                .referenced_fields()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn collect_required_paths(columns: &[Column], prefix: &str, out: &mut Vec<String>) {
    for column in columns {
        let path = if prefix.is_empty() {
            column.name.clone()
        } else {
            format!("{prefix}.{}", column.name)
        };
        if !column.data_type.nullable {
            out.push(path.clone());
        }
        if let Some(fields) = column.data_type.kind.fields() {
            collect_required_paths(fields, &path, out);
        }
    }
}

fn set_required(columns: &mut [Column], path: &str) -> Result<()> {
    let mut level = columns;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let column = level
            .iter_mut()
            .find(|c| c.name == segment)
            .ok_or_else(|| {
                Error::backend(format!("NOT NULL constraint names unknown column '{path}'"))
            })?;
        if segments.peek().is_none() {
            column.data_type.nullable = false;
            return Ok(());
        }
        level = match &mut column.data_type.kind {
            TypeKind::Struct(fields) => fields,
            _ => {
                return Err(Error::backend(format!(
                    "NOT NULL constraint names unknown column '{path}'"
                )))
            }
        };
    }
    Err(Error::backend(format!(
        "NOT NULL constraint names unknown column '{path}'"
    )))
}

/// Renders a table as a metastore table record.
pub(crate) fn table_to_repr(table: &Table) -> Result<HiveTableRepr> {
    let fields = table
        .columns
        .iter()
        .map(|column| HiveField {
            name: column.name.clone(),
            type_name: to_hive_type(&column.data_type.kind),
            comment: column.comment.clone(),
        })
        .collect();

    let mut not_null_cols = Vec::new();
    collect_required_paths(&table.columns, "", &mut not_null_cols);

    let partition_keys = table
        .partitioning
        .iter()
        .map(|t| identity_column(t, "partitioning"))
        .collect::<Result<Vec<_>>>()?;

    let bucket_cols = table
        .distribution
        .transforms
        .iter()
        .map(|t| identity_column(t, "bucketing"))
        .collect::<Result<Vec<_>>>()?;

    let sort_cols = table
        .sort_orders
        .iter()
        .map(|order| {
            Ok(HiveSortCol {
                column: identity_column(&order.transform, "sort order")?,
                ascending: order.direction == SortDirection::Asc,
                nulls_first: order.null_ordering == NullOrdering::First,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut parameters = table.properties.clone();
    audit_to_params(&table.audit, &mut parameters);
    match table.distribution.strategy {
        DistributionStrategy::None => {}
        DistributionStrategy::Even => {
            parameters.insert(DISTRIBUTION_STRATEGY_KEY.to_string(), "even".to_string());
        }
        DistributionStrategy::Hash => {
            parameters.insert(DISTRIBUTION_STRATEGY_KEY.to_string(), "hash".to_string());
        }
    }

    Ok(HiveTableRepr {
        name: table.name.clone(),
        fields,
        partition_keys,
        not_null_cols,
        num_buckets: table.distribution.number,
        bucket_cols,
        sort_cols,
        comment: table.comment.clone(),
        parameters,
    })
}

/// Reconstructs a table from a metastore table record.
pub(crate) fn repr_to_table(repr: HiveTableRepr) -> Result<Table> {
    let mut parameters = repr.parameters;
    let strategy = parameters.remove(DISTRIBUTION_STRATEGY_KEY);
    let audit = audit_from_params(&mut parameters)?;

    let mut columns = repr
        .fields
        .iter()
        .map(|field| {
            Ok(Column {
                name: field.name.clone(),
                data_type: strata_rel::types::DataType::nullable(from_hive_type(
                    &field.type_name,
                )?),
                comment: field.comment.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    for path in &repr.not_null_cols {
        set_required(&mut columns, path)?;
    }

    let partitioning = repr
        .partition_keys
        .iter()
        .map(|key| Transform::identity(FieldPath::single(key.as_str())))
        .collect();

    let distribution = match strategy.as_deref() {
        None => Distribution::none(),
        Some(strategy @ ("even" | "hash")) => Distribution {
            strategy: if strategy == "even" {
                DistributionStrategy::Even
            } else {
                DistributionStrategy::Hash
            },
            number: repr.num_buckets,
            transforms: repr
                .bucket_cols
                .iter()
                .map(|col| Transform::identity(FieldPath::single(col.as_str())))
                .collect(),
        },
        Some(other) => {
            return Err(Error::backend(format!(
                "unrecognized distribution strategy '{other}' in table parameters"
            )))
        }
    };

    let sort_orders = repr
        .sort_cols
        .iter()
        .map(|sort| {
            SortOrder::new(
                Transform::identity(FieldPath::single(sort.column.as_str())),
                if sort.ascending {
                    SortDirection::Asc
                } else {
                    SortDirection::Desc
                },
                if sort.nulls_first {
                    NullOrdering::First
                } else {
                    NullOrdering::Last
                },
            )
        })
        .collect();

    Ok(Table {
        name: repr.name,
        columns,
        comment: repr.comment,
        properties: parameters,
        partitioning,
        distribution,
        sort_orders,
        audit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_rel::types::{DataType, TypeKind};

    fn sample_table() -> Table {
        Table {
            name: "orders".to_string(),
            columns: vec![
                Column::new("col_1", DataType::required(TypeKind::I8)).with_comment("c"),
                Column::new("col_2", DataType::nullable(TypeKind::Date)).with_comment("c"),
            ],
            comment: Some("test_comment".to_string()),
            properties: BTreeMap::from([("key1".to_string(), "val1".to_string())]),
            partitioning: vec![Transform::identity(FieldPath::single("col_2"))],
            distribution: Distribution {
                strategy: DistributionStrategy::Even,
                number: 10,
                transforms: vec![Transform::identity(FieldPath::single("col_1"))],
            },
            sort_orders: vec![SortOrder::new(
                Transform::identity(FieldPath::single("col_2")),
                SortDirection::Desc,
                NullOrdering::First,
            )],
            audit: AuditInfo::new("creator_user", Utc::now()),
        }
    }

    #[test]
    fn table_round_trips_through_the_metastore_record() {
        let table = sample_table();
        let repr = table_to_repr(&table).unwrap();

        assert_eq!(repr.partition_keys, vec!["col_2"]);
        assert_eq!(repr.not_null_cols, vec!["col_1"]);
        assert_eq!(repr.num_buckets, 10);
        assert_eq!(repr.bucket_cols, vec!["col_1"]);
        assert_eq!(
            repr.parameters.get("strata.creator").map(String::as_str),
            Some("creator_user")
        );

        let reloaded = repr_to_table(repr).unwrap();
        // Timestamps survive at RFC 3339 precision; compare field by field.
        assert_eq!(reloaded.name, table.name);
        assert_eq!(reloaded.columns, table.columns);
        assert_eq!(reloaded.comment, table.comment);
        assert_eq!(reloaded.properties, table.properties);
        assert_eq!(reloaded.partitioning, table.partitioning);
        assert_eq!(reloaded.distribution, table.distribution);
        assert_eq!(reloaded.sort_orders, table.sort_orders);
        assert_eq!(reloaded.audit.creator, table.audit.creator);
        assert!(reloaded.audit.last_modifier.is_none());
    }

    #[test]
    fn schema_round_trips_through_the_database_record() {
        let schema = Schema::new(
            "sales",
            Some("test_comment".to_string()),
            BTreeMap::from([("key1".to_string(), "val1".to_string())]),
            AuditInfo::new("creator_user", Utc::now()),
        );
        let database = schema_to_database(&schema);
        assert_eq!(database.name, "sales");

        let reloaded = database_to_schema(database).unwrap();
        assert_eq!(reloaded.name, schema.name);
        assert_eq!(reloaded.comment, schema.comment);
        assert_eq!(reloaded.properties, schema.properties);
        assert_eq!(reloaded.audit.creator, "creator_user");
    }

    #[test]
    fn non_identity_layout_keys_cannot_be_stored() {
        let mut table = sample_table();
        table.partitioning = vec![Transform::day(FieldPath::single("col_2"))];
        let err = table_to_repr(&table).unwrap_err();
        assert_eq!(err.kind(), strata_core::error::ErrorKind::Unsupported);
    }

    #[test]
    fn nested_not_null_constraints_round_trip() {
        let mut table = sample_table();
        table.partitioning.clear();
        table.columns.push(Column::new(
            "info",
            DataType::nullable(TypeKind::Struct(vec![Column::new(
                "zip",
                DataType::required(TypeKind::String),
            )])),
        ));
        let repr = table_to_repr(&table).unwrap();
        assert!(repr.not_null_cols.contains(&"info.zip".to_string()));

        let reloaded = repr_to_table(repr).unwrap();
        let info = reloaded.column("info").unwrap();
        let zip = &info.data_type.kind.fields().unwrap()[0];
        assert!(!zip.data_type.nullable);
    }

    #[test]
    fn malformed_audit_timestamps_are_backend_errors() {
        let mut database = schema_to_database(&Schema::new(
            "s",
            None,
            BTreeMap::new(),
            AuditInfo::new("u", Utc::now()),
        ));
        database
            .parameters
            .insert("strata.create-time".to_string(), "not-a-time".to_string());
        let err = database_to_schema(database).unwrap_err();
        assert_eq!(err.kind(), strata_core::error::ErrorKind::Backend);
    }
}
