//! Table columns.

use serde::{Deserialize, Serialize};

use crate::transform::FieldPath;
use crate::types::DataType;

/// A named, typed column.
///
/// Column names are unique within their nesting level; the owning
/// [`Table`](crate::table::Table) enforces uniqueness at build time and the
/// mutation engine preserves it through every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Column data type, including nullability.
    pub data_type: DataType,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    /// Creates a column with no comment.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            comment: None,
        }
    }

    /// Returns a copy of the column with the given comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Resolves a field path against a column tree using exact
/// segment-sequence matches at each nesting level.
#[must_use]
pub fn find_field<'a>(mut columns: &'a [Column], path: &FieldPath) -> Option<&'a Column> {
    let (name, parents) = path.segments().split_last()?;
    for segment in parents {
        let column = columns.iter().find(|c| c.name == *segment)?;
        columns = column.data_type.kind.fields()?;
    }
    columns.iter().find(|c| c.name == *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    #[test]
    fn column_construction() {
        let col = Column::new("col_1", DataType::nullable(TypeKind::I8)).with_comment("c");
        assert_eq!(col.name, "col_1");
        assert!(col.data_type.is_nullable());
        assert_eq!(col.comment.as_deref(), Some("c"));
    }

    #[test]
    fn serde_skips_missing_comment() {
        let col = Column::new("col_1", DataType::nullable(TypeKind::I8));
        let json = serde_json::to_value(&col).unwrap();
        assert!(!json.as_object().unwrap().contains_key("comment"));
    }

    #[test]
    fn find_field_resolves_nested_paths() {
        let columns = vec![
            Column::new("city", DataType::nullable(TypeKind::String)),
            Column::new(
                "info",
                DataType::nullable(TypeKind::Struct(vec![Column::new(
                    "zip",
                    DataType::nullable(TypeKind::String),
                )])),
            ),
        ];

        assert!(find_field(&columns, &FieldPath::single("city")).is_some());
        let zip = find_field(&columns, &FieldPath::of(["info", "zip"]).unwrap());
        assert_eq!(zip.map(|c| c.name.as_str()), Some("zip"));
        assert!(find_field(&columns, &FieldPath::single("zip")).is_none());
        assert!(find_field(&columns, &FieldPath::of(["city", "zip"]).unwrap()).is_none());
    }
}
