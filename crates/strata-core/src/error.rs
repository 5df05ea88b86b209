//! Error types and result aliases for Strata.
//!
//! This module defines the exception taxonomy shared by the entity model,
//! the transform algebra, the mutation engine, and every catalog adapter.
//! Adapters translate backend-native failures into exactly one of these
//! kinds; no backend-native error type crosses the adapter boundary.

use std::fmt;

/// The result type used throughout Strata.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Strata catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The addressed metalake does not exist.
    #[error("metalake does not exist: {ident}")]
    NoSuchMetalake {
        /// The offending identifier.
        ident: String,
    },

    /// The addressed catalog does not exist.
    #[error("catalog does not exist: {ident}")]
    NoSuchCatalog {
        /// The offending identifier.
        ident: String,
    },

    /// The addressed schema (database) does not exist.
    #[error("schema (database) does not exist: {ident}")]
    NoSuchSchema {
        /// The offending identifier.
        ident: String,
    },

    /// The addressed table does not exist.
    #[error("table does not exist: {ident}")]
    NoSuchTable {
        /// The offending identifier.
        ident: String,
    },

    /// A column addressed by a mutation does not exist.
    #[error("column does not exist: {path}")]
    NoSuchColumn {
        /// The offending field path.
        path: String,
    },

    /// A create operation targeted a schema identifier that already exists.
    #[error("schema already exists: {ident}")]
    SchemaAlreadyExists {
        /// The offending identifier.
        ident: String,
    },

    /// A create operation targeted a table identifier that already exists.
    #[error("table already exists: {ident}")]
    TableAlreadyExists {
        /// The offending identifier.
        ident: String,
    },

    /// A non-cascading drop targeted a schema that still contains tables.
    #[error("schema is not empty: {ident}")]
    NonEmptySchema {
        /// The offending identifier.
        ident: String,
    },

    /// A structurally invalid or backend-incompatible request.
    ///
    /// Covers unresolved column references, disallowed partition strategies,
    /// nested-field restrictions, missing column positions, and nullability
    /// or version incompatibilities. The message always names the violated
    /// rule.
    #[error("{message}")]
    IllegalArgument {
        /// Description of the violated rule.
        message: String,
    },

    /// The operation is not supported by this catalog provider.
    #[error("unsupported operation: {message}")]
    Unsupported {
        /// Description of the unsupported operation.
        message: String,
    },

    /// An unclassified backend-transport failure.
    ///
    /// The original cause is chained, never swallowed. The core does not
    /// retry these; retry policy belongs to the adapter's transport layer.
    #[error("backend failure: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Coarse classification of an [`Error`], mirroring the taxonomy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The named entity does not exist at the addressed identifier.
    NotFound,
    /// A create operation targets an identifier that already exists.
    AlreadyExists,
    /// A non-cascading drop targeted a non-empty container.
    NonEmpty,
    /// A structurally invalid or backend-incompatible request.
    IllegalArgument,
    /// The operation is not supported by this provider.
    Unsupported,
    /// An unclassified backend failure.
    Backend,
}

impl Error {
    /// Creates an illegal-argument error with the given message.
    #[must_use]
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument {
            message: message.into(),
        }
    }

    /// Creates an unsupported-operation error with the given message.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates a backend error with the given message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a backend error with a source cause.
    #[must_use]
    pub fn backend_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a schema-not-found error for the given identifier.
    #[must_use]
    pub fn no_such_schema(ident: impl fmt::Display) -> Self {
        Self::NoSuchSchema {
            ident: ident.to_string(),
        }
    }

    /// Creates a table-not-found error for the given identifier.
    #[must_use]
    pub fn no_such_table(ident: impl fmt::Display) -> Self {
        Self::NoSuchTable {
            ident: ident.to_string(),
        }
    }

    /// Creates a column-not-found error for the given field path.
    #[must_use]
    pub fn no_such_column(path: impl fmt::Display) -> Self {
        Self::NoSuchColumn {
            path: path.to_string(),
        }
    }

    /// Creates a schema-already-exists error for the given identifier.
    #[must_use]
    pub fn schema_already_exists(ident: impl fmt::Display) -> Self {
        Self::SchemaAlreadyExists {
            ident: ident.to_string(),
        }
    }

    /// Creates a table-already-exists error for the given identifier.
    #[must_use]
    pub fn table_already_exists(ident: impl fmt::Display) -> Self {
        Self::TableAlreadyExists {
            ident: ident.to_string(),
        }
    }

    /// Creates a non-empty-schema error for the given identifier.
    #[must_use]
    pub fn non_empty_schema(ident: impl fmt::Display) -> Self {
        Self::NonEmptySchema {
            ident: ident.to_string(),
        }
    }

    /// Returns the taxonomy kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchMetalake { .. }
            | Self::NoSuchCatalog { .. }
            | Self::NoSuchSchema { .. }
            | Self::NoSuchTable { .. }
            | Self::NoSuchColumn { .. } => ErrorKind::NotFound,
            Self::SchemaAlreadyExists { .. } | Self::TableAlreadyExists { .. } => {
                ErrorKind::AlreadyExists
            }
            Self::NonEmptySchema { .. } => ErrorKind::NonEmpty,
            Self::IllegalArgument { .. } => ErrorKind::IllegalArgument,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Backend { .. } => ErrorKind::Backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_carry_the_identifier() {
        let err = Error::no_such_table("lake.cat.db.orders");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("lake.cat.db.orders"));
    }

    #[test]
    fn schema_not_found_names_the_database() {
        let err = Error::no_such_schema("lake.cat.not_exist_db");
        assert!(err.to_string().contains("schema (database) does not exist"));
        assert!(err.to_string().contains("not_exist_db"));
    }

    #[test]
    fn already_exists_kind() {
        assert_eq!(
            Error::table_already_exists("lake.cat.db.t").kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            Error::schema_already_exists("lake.cat.db").kind(),
            ErrorKind::AlreadyExists
        );
    }

    #[test]
    fn backend_errors_chain_their_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::backend_with_source("metastore unreachable", cause);
        assert_eq!(err.kind(), ErrorKind::Backend);
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(source.map(|s| s.to_string()).unwrap_or_default().contains("refused"));
    }

    #[test]
    fn illegal_argument_states_the_rule() {
        let err = Error::illegal_argument("Column position cannot be null");
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
        assert_eq!(err.to_string(), "Column position cannot be null");
    }
}
