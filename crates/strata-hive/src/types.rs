//! Mapping between Strata data types and Hive type names.
//!
//! Hive type strings carry no nullability; NOT NULL constraints are tracked
//! separately on the table representation. Struct field comments are not
//! representable in a Hive type string and are dropped on conversion.

use strata_core::error::{Error, Result};
use strata_rel::column::Column;
use strata_rel::types::{DataType, TypeKind};

/// Renders a type kind as a Hive type name.
#[must_use]
pub fn to_hive_type(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::I8 => "tinyint".to_string(),
        TypeKind::I16 => "smallint".to_string(),
        TypeKind::I32 => "int".to_string(),
        TypeKind::I64 => "bigint".to_string(),
        TypeKind::F32 => "float".to_string(),
        TypeKind::F64 => "double".to_string(),
        TypeKind::Date => "date".to_string(),
        TypeKind::Timestamp => "timestamp".to_string(),
        TypeKind::String => "string".to_string(),
        TypeKind::Binary => "binary".to_string(),
        TypeKind::Struct(fields) => {
            let inner = fields
                .iter()
                .map(|f| format!("{}:{}", f.name, to_hive_type(&f.data_type.kind)))
                .collect::<Vec<_>>()
                .join(",");
            format!("struct<{inner}>")
        }
    }
}

/// Parses a Hive type name back into a type kind.
///
/// Struct fields parse as nullable and comment-free, which is all a Hive
/// type string can say about them.
///
/// # Errors
///
/// Returns [`Error::Backend`] on an unrecognized or malformed type name.
pub fn from_hive_type(s: &str) -> Result<TypeKind> {
    match s {
        "boolean" => Ok(TypeKind::Boolean),
        "tinyint" => Ok(TypeKind::I8),
        "smallint" => Ok(TypeKind::I16),
        "int" => Ok(TypeKind::I32),
        "bigint" => Ok(TypeKind::I64),
        "float" => Ok(TypeKind::F32),
        "double" => Ok(TypeKind::F64),
        "date" => Ok(TypeKind::Date),
        "timestamp" => Ok(TypeKind::Timestamp),
        "string" => Ok(TypeKind::String),
        "binary" => Ok(TypeKind::Binary),
        _ => {
            if let Some(inner) = s.strip_prefix("struct<").and_then(|r| r.strip_suffix('>')) {
                let mut fields = Vec::new();
                for part in split_top_level(inner) {
                    let (name, type_name) = part.split_once(':').ok_or_else(|| {
                        Error::backend(format!("malformed hive struct field '{part}'"))
                    })?;
                    fields.push(Column::new(
                        name,
                        DataType::nullable(from_hive_type(type_name)?),
                    ));
                }
                Ok(TypeKind::Struct(fields))
            } else {
                Err(Error::backend(format!("unrecognized hive type '{s}'")))
            }
        }
    }
}

/// Splits on commas that are not enclosed by angle brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types_round_trip() {
        let kinds = [
            TypeKind::Boolean,
            TypeKind::I8,
            TypeKind::I16,
            TypeKind::I32,
            TypeKind::I64,
            TypeKind::F32,
            TypeKind::F64,
            TypeKind::Date,
            TypeKind::Timestamp,
            TypeKind::String,
            TypeKind::Binary,
        ];
        for kind in kinds {
            assert_eq!(from_hive_type(&to_hive_type(&kind)).unwrap(), kind);
        }
    }

    #[test]
    fn struct_types_round_trip() {
        let kind = TypeKind::Struct(vec![
            Column::new("city", DataType::nullable(TypeKind::String)),
            Column::new(
                "geo",
                DataType::nullable(TypeKind::Struct(vec![
                    Column::new("lat", DataType::nullable(TypeKind::F64)),
                    Column::new("lon", DataType::nullable(TypeKind::F64)),
                ])),
            ),
        ]);
        let rendered = to_hive_type(&kind);
        assert_eq!(rendered, "struct<city:string,geo:struct<lat:double,lon:double>>");
        assert_eq!(from_hive_type(&rendered).unwrap(), kind);
    }

    #[test]
    fn unrecognized_types_are_backend_errors() {
        let err = from_hive_type("varchar(16)").unwrap_err();
        assert_eq!(err.kind(), strata_core::error::ErrorKind::Backend);
        assert!(err.to_string().contains("varchar(16)"));

        assert!(from_hive_type("struct<broken>").is_err());
    }
}
