//! Hierarchical identifiers and namespaces.
//!
//! Every addressable entity in Strata — catalog, schema, table — is named
//! by a [`NameIdent`]: an ordered, non-empty sequence of namespace segments
//! plus a terminal simple name. The namespace levels walk the hierarchy
//! `metalake → catalog → schema`.
//!
//! Equality and hashing are structural and case-sensitive. The dotted string
//! form round-trips: `NameIdent::parse(s)?.to_string() == s` for every valid
//! identifier.
//!
//! # Example
//!
//! ```rust
//! use strata_core::ident::NameIdent;
//!
//! let table = NameIdent::of(["lake", "hive_cat", "sales", "orders"]).unwrap();
//! assert_eq!(table.name(), "orders");
//! assert_eq!(table.namespace().levels(), ["lake", "hive_cat", "sales"]);
//! assert_eq!(table.to_string(), "lake.hive_cat.sales.orders");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The separator character of the dotted string form.
pub const SEPARATOR: char = '.';

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::illegal_argument("identifier segment cannot be empty"));
    }
    if segment.contains(SEPARATOR) {
        return Err(Error::illegal_argument(format!(
            "identifier segment '{segment}' cannot contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}

/// An ordered sequence of name segments, without a terminal name.
///
/// The namespace of a table identifier `lake.cat.db.orders` is
/// `lake.cat.db`. Catalog-scoped operations require at least one segment
/// (the owning metalake).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Returns the empty namespace.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a namespace from the given segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if any segment is empty or
    /// contains the separator character.
    pub fn of<I, S>(levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        for level in &levels {
            validate_segment(level)?;
        }
        Ok(Self(levels))
    }

    /// Parses a namespace from its dotted string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] on empty segments.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::empty());
        }
        Self::of(s.split(SEPARATOR))
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.0
    }

    /// Returns the segment at the given level, if present.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the namespace has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the namespace with the last segment removed.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A fully qualified entity identifier: a namespace plus a terminal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameIdent {
    namespace: Namespace,
    name: String,
}

impl NameIdent {
    /// Creates an identifier from a namespace and a terminal name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the name is empty or contains
    /// the separator character.
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_segment(&name)?;
        Ok(Self { namespace, name })
    }

    /// Creates an identifier from explicit segments; the last segment is
    /// the terminal name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if no segments are supplied or
    /// any segment is invalid.
    pub fn of<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let name = segments
            .pop()
            .ok_or_else(|| Error::illegal_argument("identifier requires at least one segment"))?;
        Self::new(Namespace::of(segments)?, name)
    }

    /// Parses an identifier from its dotted string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] on empty input or empty segments.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::illegal_argument("identifier cannot be empty"));
        }
        Self::of(s.split(SEPARATOR))
    }

    /// Returns the namespace (all but the terminal name).
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the terminal simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent identifier, if the namespace is non-empty.
    ///
    /// The parent of `lake.cat.db.orders` is `lake.cat.db`.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let levels = self.namespace.levels();
        let (name, init) = levels.split_last()?;
        Some(Self {
            namespace: Namespace(init.to_vec()),
            name: name.clone(),
        })
    }

    /// Checks that this identifier addresses a schema
    /// (`metalake.catalog.schema`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the namespace does not have
    /// exactly two levels.
    pub fn check_schema(&self) -> Result<()> {
        if self.namespace.len() == 2 {
            Ok(())
        } else {
            Err(Error::illegal_argument(format!(
                "'{self}' is not a schema identifier (expected metalake.catalog.schema)"
            )))
        }
    }

    /// Checks that this identifier addresses a table
    /// (`metalake.catalog.schema.table`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the namespace does not have
    /// exactly three levels.
    pub fn check_table(&self) -> Result<()> {
        if self.namespace.len() == 3 {
            Ok(())
        } else {
            Err(Error::illegal_argument(format!(
                "'{self}' is not a table identifier (expected metalake.catalog.schema.table)"
            )))
        }
    }
}

impl fmt::Display for NameIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{SEPARATOR}{}", self.namespace, self.name)
        }
    }
}

impl FromStr for NameIdent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
