//! The transform algebra: declarative expressions describing how a table's
//! rows are partitioned, distributed, or sorted.
//!
//! Transforms are pure data. Constructors validate *shape* (bucket counts,
//! truncation widths, non-empty function names); they impose no backend
//! constraints. Whether a given strategy, a nested field path, or an
//! unresolved column reference is acceptable is decided by the owning
//! catalog adapter, because different backends support different subsets.
//!
//! # Wire form
//!
//! Transforms serialize as a discriminated union keyed by `strategy`:
//!
//! ```json
//! { "strategy": "identity", "fieldName": ["city"] }
//! { "strategy": "bucket", "numBuckets": 16, "fieldNames": [["id"]] }
//! { "strategy": "truncate", "width": 4, "fieldName": ["zip"] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use strata_core::error::{Error, Result};

/// An ordered, non-empty sequence of name segments addressing a column,
/// supporting nested-field addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Creates a field path from explicit segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if no segments are supplied or
    /// any segment is empty.
    pub fn of<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::illegal_argument("field path cannot be empty"));
        }
        if segments.iter().any(String::is_empty) {
            return Err(Error::illegal_argument(
                "field path segments cannot be empty",
            ));
        }
        Ok(Self(segments))
    }

    /// Creates a single-segment field path. The name must be non-empty.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the first segment, if any.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns true when the path addresses below the top level.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.0.len() > 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A pre-declared partition value set for list/range partitioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionAssignment {
    /// Partition name.
    pub name: String,
    /// The declared values (one per partitioned field for list, an upper
    /// bound for range).
    pub values: Vec<serde_json::Value>,
}

/// Discriminator of a [`Transform`] variant, used by capability
/// descriptors to declare which strategies a backend supports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TransformStrategy {
    /// Partition on the raw column value.
    Identity,
    /// Partition on the year of a date/timestamp column.
    Year,
    /// Partition on the month of a date/timestamp column.
    Month,
    /// Partition on the day of a date/timestamp column.
    Day,
    /// Partition on the hour of a timestamp column.
    Hour,
    /// Hash the listed fields into a fixed number of buckets.
    Bucket,
    /// Truncate the column value to a fixed width.
    Truncate,
    /// Pre-declared list partitions.
    List,
    /// Pre-declared range partitions.
    Range,
    /// A named backend function over arguments.
    Function,
}

impl fmt::Display for TransformStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Bucket => "bucket",
            Self::Truncate => "truncate",
            Self::List => "list",
            Self::Range => "range",
            Self::Function => "function",
        };
        write!(f, "{s}")
    }
}

/// A partitioning, distribution, or sort-key expression over column
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum Transform {
    /// The raw column value.
    Identity {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// The year of a date/timestamp column.
    Year {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// The month of a date/timestamp column.
    Month {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// The day of a date/timestamp column.
    Day {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// The hour of a timestamp column.
    Hour {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// Hash of the listed fields into `num_buckets` buckets.
    Bucket {
        /// Number of buckets, at least one.
        #[serde(rename = "numBuckets")]
        num_buckets: u32,
        /// The referenced columns, at least one.
        #[serde(rename = "fieldNames")]
        fields: Vec<FieldPath>,
    },
    /// The column value truncated to `width`.
    Truncate {
        /// Truncation width, at least one.
        width: u32,
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
    },
    /// Pre-declared list partitions over the listed fields.
    List {
        /// The referenced columns, at least one.
        #[serde(rename = "fieldNames")]
        fields: Vec<FieldPath>,
        /// Optional pre-assigned partitions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        assignments: Vec<PartitionAssignment>,
    },
    /// Pre-declared range partitions over a field.
    Range {
        /// The referenced column.
        #[serde(rename = "fieldName")]
        field: FieldPath,
        /// Optional pre-assigned partitions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        assignments: Vec<PartitionAssignment>,
    },
    /// A named backend function applied to transform arguments.
    Function {
        /// Function name, non-empty.
        #[serde(rename = "funcName")]
        name: String,
        /// Function arguments.
        #[serde(rename = "funcArgs")]
        args: Vec<Transform>,
    },
}

impl Transform {
    /// An identity transform over the given field.
    #[must_use]
    pub fn identity(field: FieldPath) -> Self {
        Self::Identity { field }
    }

    /// A year transform over the given field.
    #[must_use]
    pub fn year(field: FieldPath) -> Self {
        Self::Year { field }
    }

    /// A month transform over the given field.
    #[must_use]
    pub fn month(field: FieldPath) -> Self {
        Self::Month { field }
    }

    /// A day transform over the given field.
    #[must_use]
    pub fn day(field: FieldPath) -> Self {
        Self::Day { field }
    }

    /// An hour transform over the given field.
    #[must_use]
    pub fn hour(field: FieldPath) -> Self {
        Self::Hour { field }
    }

    /// A bucket transform hashing `fields` into `num_buckets` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if `num_buckets` is zero or no
    /// fields are supplied.
    pub fn bucket(num_buckets: u32, fields: Vec<FieldPath>) -> Result<Self> {
        if num_buckets == 0 {
            return Err(Error::illegal_argument(
                "bucket transform requires at least one bucket",
            ));
        }
        if fields.is_empty() {
            return Err(Error::illegal_argument(
                "bucket transform requires at least one field",
            ));
        }
        Ok(Self::Bucket {
            num_buckets,
            fields,
        })
    }

    /// A truncate transform over the given field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if `width` is zero.
    pub fn truncate(width: u32, field: FieldPath) -> Result<Self> {
        if width == 0 {
            return Err(Error::illegal_argument(
                "truncate transform requires a width of at least one",
            ));
        }
        Ok(Self::Truncate { width, field })
    }

    /// A list-partitioning transform with optional pre-assigned partitions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if no fields are supplied.
    pub fn list(fields: Vec<FieldPath>, assignments: Vec<PartitionAssignment>) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::illegal_argument(
                "list transform requires at least one field",
            ));
        }
        Ok(Self::List {
            fields,
            assignments,
        })
    }

    /// A range-partitioning transform with optional pre-assigned
    /// partitions.
    #[must_use]
    pub fn range(field: FieldPath, assignments: Vec<PartitionAssignment>) -> Self {
        Self::Range { field, assignments }
    }

    /// A function transform applying the named backend function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the function name is empty.
    pub fn function(name: impl Into<String>, args: Vec<Transform>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::illegal_argument(
                "function transform requires a non-empty function name",
            ));
        }
        Ok(Self::Function { name, args })
    }

    /// Returns the strategy discriminator of this transform.
    #[must_use]
    pub const fn strategy(&self) -> TransformStrategy {
        match self {
            Self::Identity { .. } => TransformStrategy::Identity,
            Self::Year { .. } => TransformStrategy::Year,
            Self::Month { .. } => TransformStrategy::Month,
            Self::Day { .. } => TransformStrategy::Day,
            Self::Hour { .. } => TransformStrategy::Hour,
            Self::Bucket { .. } => TransformStrategy::Bucket,
            Self::Truncate { .. } => TransformStrategy::Truncate,
            Self::List { .. } => TransformStrategy::List,
            Self::Range { .. } => TransformStrategy::Range,
            Self::Function { .. } => TransformStrategy::Function,
        }
    }

    /// Returns every field path this transform references, in order,
    /// recursing through function arguments.
    #[must_use]
    pub fn referenced_fields(&self) -> Vec<&FieldPath> {
        match self {
            Self::Identity { field }
            | Self::Year { field }
            | Self::Month { field }
            | Self::Day { field }
            | Self::Hour { field }
            | Self::Truncate { field, .. }
            | Self::Range { field, .. } => vec![field],
            Self::Bucket { fields, .. } | Self::List { fields, .. } => fields.iter().collect(),
            Self::Function { args, .. } => {
                args.iter().flat_map(Transform::referenced_fields).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> FieldPath {
        FieldPath::single(name)
    }

    #[test]
    fn field_path_validation() {
        assert!(FieldPath::of(["a", "b"]).is_ok());
        assert!(FieldPath::of(Vec::<String>::new()).is_err());
        assert!(FieldPath::of(["a", ""]).is_err());
        assert!(FieldPath::of(["a", "b"]).unwrap().is_nested());
        assert!(!path("a").is_nested());
    }

    #[test]
    fn bucket_validates_shape() {
        assert!(Transform::bucket(0, vec![path("id")]).is_err());
        assert!(Transform::bucket(16, vec![]).is_err());
        let t = Transform::bucket(16, vec![path("id")]).unwrap();
        assert_eq!(t.strategy(), TransformStrategy::Bucket);
    }

    #[test]
    fn truncate_requires_positive_width() {
        assert!(Transform::truncate(0, path("zip")).is_err());
        assert!(Transform::truncate(4, path("zip")).is_ok());
    }

    #[test]
    fn function_requires_a_name() {
        assert!(Transform::function("", vec![]).is_err());
        let t = Transform::function("to_date", vec![Transform::identity(path("ts"))]).unwrap();
        assert_eq!(
            t.referenced_fields(),
            vec![&path("ts")],
        );
    }

    #[test]
    fn equality_is_structural() {
        let a = Transform::identity(path("city"));
        let b = Transform::identity(path("city"));
        let c = Transform::identity(path("dt"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Transform::day(path("city")));
    }

    #[test]
    fn wire_form_is_strategy_keyed() {
        let t = Transform::identity(path("city"));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["strategy"], "identity");
        assert_eq!(json["fieldName"][0], "city");

        let t = Transform::bucket(16, vec![path("id")]).unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["strategy"], "bucket");
        assert_eq!(json["numBuckets"], 16);
        assert_eq!(json["fieldNames"][0][0], "id");

        let t = Transform::truncate(4, path("zip")).unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["strategy"], "truncate");
        assert_eq!(json["width"], 4);
    }

    #[test]
    fn wire_form_round_trips() {
        let transforms = vec![
            Transform::identity(path("city")),
            Transform::day(path("dt")),
            Transform::bucket(8, vec![path("a"), path("b")]).unwrap(),
            Transform::truncate(10, path("zip")).unwrap(),
            Transform::list(
                vec![path("region")],
                vec![PartitionAssignment {
                    name: "east".to_string(),
                    values: vec![serde_json::json!("us-east")],
                }],
            )
            .unwrap(),
            Transform::range(path("id"), vec![]),
            Transform::function("to_date", vec![Transform::identity(path("ts"))]).unwrap(),
        ];
        for t in transforms {
            let json = serde_json::to_string(&t).unwrap();
            let parsed: Transform = serde_json::from_str(&json).unwrap();
            assert_eq!(t, parsed);
        }
    }

    #[test]
    fn range_assignments_are_omitted_when_empty() {
        let json = serde_json::to_value(Transform::range(path("id"), vec![])).unwrap();
        assert!(!json.as_object().unwrap().contains_key("assignments"));
    }
}
