//! Strongly-typed identifiers for Strata entities.
//!
//! Internal entity ids are ULIDs: lexicographically sortable by creation
//! time, globally unique without coordination, and URL-safe. They are
//! distinct from the human-facing [`NameIdent`](crate::ident::NameIdent)
//! addressing scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::error::{Error, Result};

/// A unique identifier for a configured catalog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(Ulid);

impl CatalogId {
    /// Generates a new unique catalog ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Creates a catalog ID from a raw ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CatalogId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| Error::illegal_argument(format!("invalid catalog ID '{s}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_id_roundtrip() {
        let id = CatalogId::generate();
        let parsed: CatalogId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(CatalogId::generate(), CatalogId::generate());
    }

    #[test]
    fn invalid_id_returns_error() {
        let result: Result<CatalogId> = "not-a-valid-ulid".parse();
        assert!(result.is_err());
    }
}
