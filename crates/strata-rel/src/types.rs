//! Column data types.
//!
//! A [`DataType`] pairs a [`TypeKind`] with a nullability flag. Whether a
//! backend can actually express a NOT NULL constraint is a capability
//! question answered by the owning adapter, not by this model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::column::Column;

/// The shape of a column value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    /// Boolean.
    Boolean,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Calendar date.
    Date,
    /// Instant in time.
    Timestamp,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Binary,
    /// Nested record of named fields.
    Struct(Vec<Column>),
}

impl TypeKind {
    /// Returns the struct fields when this is a struct type.
    #[must_use]
    pub fn fields(&self) -> Option<&[Column]> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::Date => write!(f, "date"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::String => write!(f, "string"),
            Self::Binary => write!(f, "binary"),
            Self::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", field.name, field.data_type)?;
                }
                write!(f, ">")
            }
        }
    }
}

/// A column data type: a kind plus nullability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataType {
    /// The value shape.
    pub kind: TypeKind,
    /// Whether null values are admitted.
    pub nullable: bool,
}

impl DataType {
    /// Creates a nullable data type.
    #[must_use]
    pub const fn nullable(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// Creates a NOT NULL data type.
    #[must_use]
    pub const fn required(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Returns true when null values are admitted.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns true when this is a struct type.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} not null", self.kind)
        }
    }
}
