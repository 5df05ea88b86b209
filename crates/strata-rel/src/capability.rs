//! Backend capability descriptors.
//!
//! The transform and mutation algebras are backend-agnostic; each adapter
//! enforces its own subset of legal configurations. A [`CapabilitySpec`]
//! makes that subset explicit and inspectable — which partition strategies
//! the backend accepts, whether nested partition fields are allowed, and
//! whether NOT NULL columns can be expressed — so new backends are added by
//! building a descriptor, not by touching the core algebra.
//!
//! Adapters consult the descriptor *before* delegating any mutation, so
//! capability violations never leave partial backend state.

use std::collections::BTreeSet;

use strata_core::error::{Error, Result};

use crate::column::{find_field, Column};
use crate::transform::{Transform, TransformStrategy};

/// The capability subset of one backend.
#[derive(Debug, Clone)]
pub struct CapabilitySpec {
    backend: String,
    partition_strategies: BTreeSet<TransformStrategy>,
    nested_partition_fields: bool,
    not_null_columns: bool,
}

impl CapabilitySpec {
    /// Creates a permissive descriptor for the named backend: every
    /// partition strategy, nested fields, and NOT NULL columns allowed.
    #[must_use]
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            partition_strategies: [
                TransformStrategy::Identity,
                TransformStrategy::Year,
                TransformStrategy::Month,
                TransformStrategy::Day,
                TransformStrategy::Hour,
                TransformStrategy::Bucket,
                TransformStrategy::Truncate,
                TransformStrategy::List,
                TransformStrategy::Range,
                TransformStrategy::Function,
            ]
            .into_iter()
            .collect(),
            nested_partition_fields: true,
            not_null_columns: true,
        }
    }

    /// Restricts the supported partition strategies.
    #[must_use]
    pub fn with_partition_strategies(
        mut self,
        strategies: impl IntoIterator<Item = TransformStrategy>,
    ) -> Self {
        self.partition_strategies = strategies.into_iter().collect();
        self
    }

    /// Sets whether partition fields may address nested columns.
    #[must_use]
    pub const fn with_nested_partition_fields(mut self, allowed: bool) -> Self {
        self.nested_partition_fields = allowed;
        self
    }

    /// Sets whether NOT NULL columns can be expressed.
    #[must_use]
    pub const fn with_not_null_columns(mut self, allowed: bool) -> Self {
        self.not_null_columns = allowed;
        self
    }

    /// Returns the backend display name used in messages.
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Returns true when the backend can express NOT NULL columns.
    ///
    /// The version-specific diagnostic for a violation belongs to the
    /// adapter, which knows its own gate.
    #[must_use]
    pub const fn supports_not_null_columns(&self) -> bool {
        self.not_null_columns
    }

    /// Validates a partitioning expression against this descriptor and the
    /// table's columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] naming the violated rule: a
    /// disallowed strategy, a nested field path where the backend forbids
    /// one, or a field reference that does not match one column.
    pub fn check_partitioning(
        &self,
        partitioning: &[Transform],
        columns: &[Column],
    ) -> Result<()> {
        for transform in partitioning {
            let strategy = transform.strategy();
            if !self.partition_strategies.contains(&strategy) {
                let supported = self
                    .partition_strategies
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(Error::illegal_argument(format!(
                    "{} partition only supports {supported} transform, got {strategy}",
                    self.backend
                )));
            }
            for field in transform.referenced_fields() {
                if field.is_nested() && !self.nested_partition_fields {
                    return Err(Error::illegal_argument(format!(
                        "{} partition does not support nested field: {field}",
                        self.backend
                    )));
                }
                if find_field(columns, field).is_none() {
                    return Err(Error::illegal_argument(format!(
                        "{} partition must match one column, no column matches {field}",
                        self.backend
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::FieldPath;
    use crate::types::{DataType, TypeKind};

    fn columns() -> Vec<Column> {
        vec![
            Column::new("city", DataType::nullable(TypeKind::I8)),
            Column::new("dt", DataType::nullable(TypeKind::Date)),
            Column::new(
                "info",
                DataType::nullable(TypeKind::Struct(vec![Column::new(
                    "zip",
                    DataType::nullable(TypeKind::String),
                )])),
            ),
        ]
    }

    fn identity_only() -> CapabilitySpec {
        CapabilitySpec::new("hive")
            .with_partition_strategies([TransformStrategy::Identity])
            .with_nested_partition_fields(false)
            .with_not_null_columns(false)
    }

    #[test]
    fn permissive_descriptor_accepts_everything_resolvable() {
        let spec = CapabilitySpec::new("test");
        let partitioning = vec![
            Transform::day(FieldPath::single("dt")),
            Transform::identity(FieldPath::of(["info", "zip"]).unwrap()),
        ];
        assert!(spec.check_partitioning(&partitioning, &columns()).is_ok());
    }

    #[test]
    fn disallowed_strategy_is_rejected_with_the_supported_set() {
        let err = identity_only()
            .check_partitioning(&[Transform::day(FieldPath::single("dt"))], &columns())
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("partition only supports identity transform"));
    }

    #[test]
    fn nested_field_is_rejected_when_disallowed() {
        let err = identity_only()
            .check_partitioning(
                &[Transform::identity(FieldPath::of(["info", "zip"]).unwrap())],
                &columns(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("does not support nested field"));
    }

    #[test]
    fn unresolved_field_is_rejected_naming_the_column() {
        let err = identity_only()
            .check_partitioning(
                &[Transform::identity(FieldPath::single("not_exist_field"))],
                &columns(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("must match one column"));
        assert!(err.to_string().contains("not_exist_field"));
    }

    #[test]
    fn not_null_support_is_inspectable() {
        assert!(CapabilitySpec::new("x").supports_not_null_columns());
        assert!(!identity_only().supports_not_null_columns());
    }
}
