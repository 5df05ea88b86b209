//! Hive catalog configuration.
//!
//! The adapter is configured through the owning
//! [`CatalogEntity`](strata_core::entity::CatalogEntity)'s properties. Keys
//! prefixed with [`BYPASS_PREFIX`](strata_core::config::BYPASS_PREFIX) are
//! forwarded verbatim (prefix stripped) to the metastore client; everything
//! else is interpreted here.

use std::collections::BTreeMap;
use std::fmt;

use strata_core::config::split_bypass;
use strata_core::error::{Error, Result};

/// Property key naming the metastore thrift endpoints.
pub const METASTORE_URIS: &str = "metastore.uris";

/// Property key naming the Hive server version (`2` or `3`, optionally with
/// a minor suffix such as `3.1`).
pub const HIVE_VERSION: &str = "hive.version";

/// The Hive server major version the adapter talks to.
///
/// The version gates which constraints the backend can express: NOT NULL
/// columns are only supported since Hive 3.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiveVersion {
    /// Hive 2.x.
    #[default]
    V2,
    /// Hive 3.x.
    V3,
}

impl HiveVersion {
    /// Returns true when this version can express NOT NULL constraints.
    #[must_use]
    pub const fn supports_not_null(self) -> bool {
        matches!(self, Self::V3)
    }

    fn parse(s: &str) -> Result<Self> {
        match s.split('.').next() {
            Some("2") => Ok(Self::V2),
            Some("3") => Ok(Self::V3),
            _ => Err(Error::illegal_argument(format!(
                "unsupported {HIVE_VERSION} '{s}' (expected 2.x or 3.x)"
            ))),
        }
    }
}

impl fmt::Display for HiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => write!(f, "2.x"),
            Self::V3 => write!(f, "3.x"),
        }
    }
}

/// Validated Hive adapter configuration.
#[derive(Debug, Clone)]
pub struct HiveCatalogConfig {
    /// Metastore thrift endpoints.
    pub metastore_uris: String,
    /// The Hive server version.
    pub version: HiveVersion,
    /// Backend-native configuration forwarded verbatim to the client
    /// (collected from bypass-prefixed properties).
    pub client_properties: BTreeMap<String, String>,
}

impl HiveCatalogConfig {
    /// Builds the configuration from catalog properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] when `metastore.uris` is missing
    /// or empty, or the version value is unrecognized.
    pub fn from_properties(properties: &BTreeMap<String, String>) -> Result<Self> {
        let (client_properties, generic) = split_bypass(properties);

        let metastore_uris = generic
            .get(METASTORE_URIS)
            .filter(|uris| !uris.is_empty())
            .cloned()
            .ok_or_else(|| {
                Error::illegal_argument(format!(
                    "hive catalog requires the {METASTORE_URIS} property"
                ))
            })?;

        let version = generic
            .get(HIVE_VERSION)
            .map(|v| HiveVersion::parse(v))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            metastore_uris,
            version,
            client_properties,
        })
    }
}
