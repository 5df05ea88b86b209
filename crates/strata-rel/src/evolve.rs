//! The table-mutation engine.
//!
//! [`apply`] takes an immutable table snapshot and an ordered sequence of
//! [`TableChange`] values and produces a new, validated table. Changes are
//! applied strictly in the order supplied, each against the column tree
//! produced by the previous change, so a column added earlier in the call
//! can be renamed or repositioned later in the same call.
//!
//! The engine computes the full post-image in memory and fails atomically:
//! if any change is invalid, the error carries the violated rule and no
//! partial result is returned. The owning adapter realizes the finished
//! post-image against the backend in a single call, never a stream of
//! incremental edits.

use chrono::{DateTime, Utc};

use strata_core::error::{Error, Result};

use crate::change::{ColumnPosition, TableChange};
use crate::column::Column;
use crate::table::Table;
use crate::transform::FieldPath;
use crate::types::TypeKind;

/// Applies an ordered sequence of changes to a table, producing the
/// post-image.
///
/// `actor` and `at` stamp the result's audit metadata; the creator fields
/// are carried over unchanged. Table partitioning, distribution, and sort
/// order are unaffected by column edits, but edits that would orphan a
/// partition-field reference are rejected.
///
/// # Errors
///
/// Returns [`Error::NoSuchColumn`] when a new column's parent level does
/// not exist, and [`Error::IllegalArgument`] for every other violated rule
/// (unresolved column references, duplicate names, missing positions,
/// partition-referenced column edits). On error the input table is
/// untouched and no partial post-image escapes.
pub fn apply(
    table: &Table,
    changes: &[TableChange],
    actor: &str,
    at: DateTime<Utc>,
) -> Result<Table> {
    let mut post = table.clone();

    for change in changes {
        match change {
            TableChange::Rename { new_name } => {
                if new_name.is_empty() {
                    return Err(Error::illegal_argument("table name cannot be empty"));
                }
                post.name.clone_from(new_name);
            }
            TableChange::UpdateComment { comment } => {
                post.comment = Some(comment.clone());
            }
            TableChange::SetProperty { property, value } => {
                post.properties.insert(property.clone(), value.clone());
            }
            TableChange::RemoveProperty { property } => {
                post.properties.remove(property);
            }
            TableChange::AddColumn {
                field_name,
                data_type,
                comment,
                position,
            } => {
                add_column(
                    &mut post.columns,
                    field_name,
                    Column {
                        name: leaf(field_name).to_string(),
                        data_type: data_type.clone(),
                        comment: comment.clone(),
                    },
                    position.as_ref(),
                )?;
            }
            TableChange::RenameColumn {
                field_name,
                new_name,
            } => {
                check_not_partition_field(&post, field_name, "rename")?;
                rename_column(&mut post.columns, field_name, new_name)?;
            }
            TableChange::UpdateColumnComment {
                field_name,
                comment,
            } => {
                let column = column_mut(&mut post.columns, field_name)?;
                column.comment = Some(comment.clone());
            }
            TableChange::UpdateColumnType {
                field_name,
                data_type,
            } => {
                let column = column_mut(&mut post.columns, field_name)?;
                column.data_type = data_type.clone();
            }
            TableChange::UpdateColumnPosition {
                field_name,
                position,
            } => {
                let position = position
                    .as_ref()
                    .ok_or_else(|| Error::illegal_argument("Column position cannot be null"))?;
                move_column(&mut post.columns, field_name, position)?;
            }
            TableChange::DeleteColumn {
                field_name,
                if_exists,
            } => {
                delete_column(&mut post, field_name, *if_exists)?;
            }
        }
    }

    post.audit = table.audit.with_modification(actor, at);
    Ok(post)
}

fn leaf(path: &FieldPath) -> &str {
    path.segments().last().map_or("", String::as_str)
}

/// Walks the column tree to the level addressed by `parent`, using exact
/// segment-sequence matches.
fn level_mut<'a>(
    mut columns: &'a mut Vec<Column>,
    parent: &[String],
) -> Option<&'a mut Vec<Column>> {
    for segment in parent {
        let column = columns.iter_mut().find(|c| c.name == *segment)?;
        match &mut column.data_type.kind {
            TypeKind::Struct(fields) => columns = fields,
            _ => return None,
        }
    }
    Some(columns)
}

fn column_mut<'a>(columns: &'a mut Vec<Column>, path: &FieldPath) -> Result<&'a mut Column> {
    let (name, parent) = path
        .segments()
        .split_last()
        .ok_or_else(|| Error::illegal_argument("field path cannot be empty"))?;
    level_mut(columns, parent)
        .and_then(|level| level.iter_mut().find(|c| c.name == *name))
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))
}

fn insertion_index(level: &[Column], position: &ColumnPosition) -> Result<usize> {
    match position {
        ColumnPosition::First => Ok(0),
        ColumnPosition::After { column } => level
            .iter()
            .position(|c| c.name == *column)
            .map(|i| i + 1)
            .ok_or_else(|| Error::illegal_argument(format!("Column does not exist: {column}"))),
        ColumnPosition::Before { column } => level
            .iter()
            .position(|c| c.name == *column)
            .ok_or_else(|| Error::illegal_argument(format!("Column does not exist: {column}"))),
    }
}

fn add_column(
    columns: &mut Vec<Column>,
    path: &FieldPath,
    column: Column,
    position: Option<&ColumnPosition>,
) -> Result<()> {
    let (name, parent) = path
        .segments()
        .split_last()
        .ok_or_else(|| Error::illegal_argument("field path cannot be empty"))?;
    let level = level_mut(columns, parent)
        .ok_or_else(|| Error::no_such_column(parent.join(".")))?;
    if level.iter().any(|c| c.name == *name) {
        return Err(Error::illegal_argument(format!(
            "column already exists: {path}"
        )));
    }
    let index = match position {
        None => level.len(),
        Some(position) => insertion_index(level, position)?,
    };
    level.insert(index, column);
    Ok(())
}

fn rename_column(columns: &mut Vec<Column>, path: &FieldPath, new_name: &str) -> Result<()> {
    if new_name.is_empty() {
        return Err(Error::illegal_argument("column name cannot be empty"));
    }
    let (name, parent) = path
        .segments()
        .split_last()
        .ok_or_else(|| Error::illegal_argument("field path cannot be empty"))?;
    let level = level_mut(columns, parent)
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))?;
    let index = level
        .iter()
        .position(|c| c.name == *name)
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))?;
    if level
        .iter()
        .enumerate()
        .any(|(i, c)| i != index && c.name == new_name)
    {
        return Err(Error::illegal_argument(format!(
            "column already exists: {new_name}"
        )));
    }
    level[index].name = new_name.to_string();
    Ok(())
}

fn move_column(
    columns: &mut Vec<Column>,
    path: &FieldPath,
    position: &ColumnPosition,
) -> Result<()> {
    let (name, parent) = path
        .segments()
        .split_last()
        .ok_or_else(|| Error::illegal_argument("field path cannot be empty"))?;
    let level = level_mut(columns, parent)
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))?;
    let current = level
        .iter()
        .position(|c| c.name == *name)
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))?;
    // Sibling references resolve against the level without the moving
    // column; the whole post-image is discarded on error.
    let column = level.remove(current);
    let index = insertion_index(level, position)?;
    level.insert(index, column);
    Ok(())
}

fn level_ref<'a>(mut columns: &'a [Column], parent: &[String]) -> Option<&'a [Column]> {
    for segment in parent {
        let column = columns.iter().find(|c| c.name == *segment)?;
        columns = column.data_type.kind.fields()?;
    }
    Some(columns)
}

fn delete_column(post: &mut Table, path: &FieldPath, if_exists: bool) -> Result<()> {
    let (name, parent) = path
        .segments()
        .split_last()
        .ok_or_else(|| Error::illegal_argument("field path cannot be empty"))?;
    let exists = level_ref(&post.columns, parent)
        .is_some_and(|level| level.iter().any(|c| c.name == *name));
    if !exists {
        if if_exists {
            return Ok(());
        }
        return Err(Error::illegal_argument(format!(
            "column does not exist: {path}"
        )));
    }
    check_not_partition_field(post, path, "delete")?;
    let level = level_mut(&mut post.columns, parent)
        .ok_or_else(|| Error::illegal_argument(format!("column does not exist: {path}")))?;
    level.retain(|c| c.name != *name);
    Ok(())
}

/// Rejects edits that would orphan a partition-field reference, including
/// pre-assigned list/range partitions over the field.
fn check_not_partition_field(table: &Table, path: &FieldPath, verb: &str) -> Result<()> {
    for transform in &table.partitioning {
        for referenced in transform.referenced_fields() {
            if referenced.segments().starts_with(path.segments()) {
                return Err(Error::illegal_argument(format!(
                    "cannot {verb} column {path}: referenced by {} partitioning",
                    transform.strategy()
                )));
            }
        }
    }
    Ok(())
}
