//! The ordered table-mutation algebra.
//!
//! A [`TableChange`] is one structural edit to a table's metadata or column
//! tree. A call to alter supplies an ordered sequence of changes; the
//! engine in [`evolve`](crate::evolve) applies them left-to-right as a
//! single logical unit.
//!
//! # Wire form
//!
//! Changes serialize as a discriminated union keyed by `type`, with field
//! paths as ordered name-segment lists:
//!
//! ```json
//! { "type": "rename", "newName": "orders_v2" }
//! { "type": "addColumn", "fieldName": ["col_3"], "dataType": { "kind": "string", "nullable": true } }
//! { "type": "updateColumnPosition", "fieldName": ["col_2"], "position": { "type": "first" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::transform::FieldPath;
use crate::types::DataType;

/// Where a column sits within its parent level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnPosition {
    /// First within the parent level.
    First,
    /// Immediately after the named sibling.
    #[serde(rename_all = "camelCase")]
    After {
        /// The sibling column name.
        column: String,
    },
    /// Immediately before the named sibling.
    #[serde(rename_all = "camelCase")]
    Before {
        /// The sibling column name.
        column: String,
    },
}

impl ColumnPosition {
    /// The first position within the parent level.
    #[must_use]
    pub const fn first() -> Self {
        Self::First
    }

    /// The position immediately after the named sibling.
    #[must_use]
    pub fn after(column: impl Into<String>) -> Self {
        Self::After {
            column: column.into(),
        }
    }

    /// The position immediately before the named sibling.
    #[must_use]
    pub fn before(column: impl Into<String>) -> Self {
        Self::Before {
            column: column.into(),
        }
    }
}

/// One structural edit to a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableChange {
    /// Replaces the table's name; no column effect.
    #[serde(rename_all = "camelCase")]
    Rename {
        /// The new table name.
        new_name: String,
    },

    /// Replaces the table comment.
    #[serde(rename_all = "camelCase")]
    UpdateComment {
        /// The new comment.
        comment: String,
    },

    /// Sets (or replaces) a table property.
    #[serde(rename_all = "camelCase")]
    SetProperty {
        /// Property key.
        property: String,
        /// Property value.
        value: String,
    },

    /// Removes a table property; missing keys are ignored.
    #[serde(rename_all = "camelCase")]
    RemoveProperty {
        /// Property key.
        property: String,
    },

    /// Inserts a column at the addressed path.
    ///
    /// An unspecified position appends at the end of the parent level.
    #[serde(rename_all = "camelCase")]
    AddColumn {
        /// The path of the column to insert; the parent prefix must
        /// resolve to an existing struct level.
        field_name: FieldPath,
        /// The new column's data type.
        data_type: DataType,
        /// Optional comment.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
        /// Optional position within the parent level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<ColumnPosition>,
    },

    /// Renames the column at the path in place, preserving its position,
    /// type, and comment.
    #[serde(rename_all = "camelCase")]
    RenameColumn {
        /// The path of the column to rename.
        field_name: FieldPath,
        /// The new column name.
        new_name: String,
    },

    /// Replaces the comment of the column at the path.
    #[serde(rename_all = "camelCase")]
    UpdateColumnComment {
        /// The path of the column to update.
        field_name: FieldPath,
        /// The new comment.
        comment: String,
    },

    /// Replaces the data type of the column at the path.
    #[serde(rename_all = "camelCase")]
    UpdateColumnType {
        /// The path of the column to update.
        field_name: FieldPath,
        /// The new data type.
        data_type: DataType,
    },

    /// Moves the column at the path within its parent level.
    ///
    /// An unset position is rejected by the engine as invalid input.
    #[serde(rename_all = "camelCase")]
    UpdateColumnPosition {
        /// The path of the column to move.
        field_name: FieldPath,
        /// The target position.
        #[serde(default)]
        position: Option<ColumnPosition>,
    },

    /// Removes the column at the path.
    #[serde(rename_all = "camelCase")]
    DeleteColumn {
        /// The path of the column to remove.
        field_name: FieldPath,
        /// When true, a missing column is a no-op instead of an error.
        if_exists: bool,
    },
}

impl TableChange {
    /// A change renaming the table.
    #[must_use]
    pub fn rename(new_name: impl Into<String>) -> Self {
        Self::Rename {
            new_name: new_name.into(),
        }
    }

    /// A change replacing the table comment.
    #[must_use]
    pub fn update_comment(comment: impl Into<String>) -> Self {
        Self::UpdateComment {
            comment: comment.into(),
        }
    }

    /// A change setting `property` to `value`.
    #[must_use]
    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetProperty {
            property: property.into(),
            value: value.into(),
        }
    }

    /// A change removing `property`.
    #[must_use]
    pub fn remove_property(property: impl Into<String>) -> Self {
        Self::RemoveProperty {
            property: property.into(),
        }
    }

    /// A change appending a column at the end of its parent level.
    #[must_use]
    pub fn add_column(field_name: FieldPath, data_type: DataType) -> Self {
        Self::AddColumn {
            field_name,
            data_type,
            comment: None,
            position: None,
        }
    }

    /// A change inserting a column with an explicit comment and position.
    #[must_use]
    pub fn add_column_with(
        field_name: FieldPath,
        data_type: DataType,
        comment: Option<String>,
        position: Option<ColumnPosition>,
    ) -> Self {
        Self::AddColumn {
            field_name,
            data_type,
            comment,
            position,
        }
    }

    /// A change renaming the column at `field_name`.
    #[must_use]
    pub fn rename_column(field_name: FieldPath, new_name: impl Into<String>) -> Self {
        Self::RenameColumn {
            field_name,
            new_name: new_name.into(),
        }
    }

    /// A change replacing the comment of the column at `field_name`.
    #[must_use]
    pub fn update_column_comment(field_name: FieldPath, comment: impl Into<String>) -> Self {
        Self::UpdateColumnComment {
            field_name,
            comment: comment.into(),
        }
    }

    /// A change replacing the data type of the column at `field_name`.
    #[must_use]
    pub fn update_column_type(field_name: FieldPath, data_type: DataType) -> Self {
        Self::UpdateColumnType {
            field_name,
            data_type,
        }
    }

    /// A change moving the column at `field_name` to `position`.
    ///
    /// `None` is representable so the wire layer can carry an absent
    /// position; the engine rejects it as invalid input.
    #[must_use]
    pub fn update_column_position(
        field_name: FieldPath,
        position: Option<ColumnPosition>,
    ) -> Self {
        Self::UpdateColumnPosition {
            field_name,
            position,
        }
    }

    /// A change removing the column at `field_name`.
    #[must_use]
    pub fn delete_column(field_name: FieldPath, if_exists: bool) -> Self {
        Self::DeleteColumn {
            field_name,
            if_exists,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    #[test]
    fn wire_form_is_type_keyed() {
        let json = serde_json::to_value(TableChange::rename("orders_v2")).unwrap();
        assert_eq!(json["type"], "rename");
        assert_eq!(json["newName"], "orders_v2");

        let json = serde_json::to_value(TableChange::add_column(
            FieldPath::single("col_3"),
            DataType::nullable(TypeKind::String),
        ))
        .unwrap();
        assert_eq!(json["type"], "addColumn");
        assert_eq!(json["fieldName"][0], "col_3");
        assert!(!json.as_object().unwrap().contains_key("position"));

        let json = serde_json::to_value(TableChange::update_column_position(
            FieldPath::single("col_2"),
            Some(ColumnPosition::first()),
        ))
        .unwrap();
        assert_eq!(json["type"], "updateColumnPosition");
        assert_eq!(json["position"]["type"], "first");

        let json = serde_json::to_value(TableChange::delete_column(
            FieldPath::single("col_1"),
            true,
        ))
        .unwrap();
        assert_eq!(json["type"], "deleteColumn");
        assert_eq!(json["ifExists"], true);
    }

    #[test]
    fn wire_form_round_trips() {
        let changes = vec![
            TableChange::rename("t2"),
            TableChange::update_comment("c"),
            TableChange::set_property("k", "v"),
            TableChange::remove_property("k"),
            TableChange::add_column_with(
                FieldPath::of(["info", "zip"]).unwrap(),
                DataType::nullable(TypeKind::String),
                Some("postal code".to_string()),
                Some(ColumnPosition::after("city")),
            ),
            TableChange::rename_column(FieldPath::single("col_2"), "col_2_new"),
            TableChange::update_column_comment(FieldPath::single("col_1"), "new"),
            TableChange::update_column_type(
                FieldPath::single("col_1"),
                DataType::nullable(TypeKind::I32),
            ),
            TableChange::update_column_position(
                FieldPath::single("col_2"),
                Some(ColumnPosition::before("col_1")),
            ),
            TableChange::delete_column(FieldPath::single("col_1"), false),
        ];
        for change in changes {
            let json = serde_json::to_string(&change).unwrap();
            let parsed: TableChange = serde_json::from_str(&json).unwrap();
            assert_eq!(change, parsed);
        }
    }

    #[test]
    fn absent_position_deserializes_to_none() {
        let parsed: TableChange = serde_json::from_str(
            r#"{ "type": "updateColumnPosition", "fieldName": ["col_1"] }"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            TableChange::update_column_position(FieldPath::single("col_1"), None)
        );
    }
}
