//! The catalog entity: a named, typed, provider-backed collection of
//! schemas.
//!
//! A [`CatalogEntity`] is the configuration record from which a concrete
//! adapter instance is constructed. It is immutable once built; one
//! provider-backed instance exists per configured catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::audit::AuditInfo;
use crate::error::{Error, Result};
use crate::id::CatalogId;
use crate::ident::Namespace;

/// The kind of entities a catalog manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogType {
    /// Schemas and tables with a relational column model.
    Relational,
}

/// A configured catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntity {
    /// Unique identifier (generated).
    pub id: CatalogId,

    /// Catalog name, unique within the owning metalake.
    pub name: String,

    /// The owning metalake namespace.
    pub namespace: Namespace,

    /// The kind of entities this catalog manages.
    pub catalog_type: CatalogType,

    /// The backend kind realizing this catalog (e.g. `hive`).
    pub provider: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Catalog configuration properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// Audit metadata.
    pub audit: AuditInfo,
}

impl CatalogEntity {
    /// Creates a new builder for constructing catalog entities.
    #[must_use]
    pub fn builder() -> CatalogEntityBuilder {
        CatalogEntityBuilder::default()
    }
}

/// Builder for [`CatalogEntity`] instances.
#[derive(Debug, Default)]
pub struct CatalogEntityBuilder {
    id: Option<CatalogId>,
    name: Option<String>,
    namespace: Option<Namespace>,
    catalog_type: Option<CatalogType>,
    provider: Option<String>,
    comment: Option<String>,
    properties: BTreeMap<String, String>,
    audit: Option<AuditInfo>,
}

impl CatalogEntityBuilder {
    /// Sets the catalog ID; a fresh one is generated when unset.
    #[must_use]
    pub fn id(mut self, id: CatalogId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the catalog name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the owning metalake namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets the catalog type.
    #[must_use]
    pub fn catalog_type(mut self, catalog_type: CatalogType) -> Self {
        self.catalog_type = Some(catalog_type);
        self
    }

    /// Sets the provider (backend kind).
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets a configuration property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replaces all configuration properties.
    #[must_use]
    pub fn properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the audit metadata.
    #[must_use]
    pub fn audit(mut self, audit: AuditInfo) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Builds the catalog entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] if the name, namespace, provider,
    /// or audit metadata is missing, or the namespace does not name a
    /// metalake (exactly one level).
    pub fn try_build(self) -> Result<CatalogEntity> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::illegal_argument("catalog name cannot be empty"))?;
        let namespace = self
            .namespace
            .ok_or_else(|| Error::illegal_argument("catalog namespace is required"))?;
        if namespace.len() != 1 {
            return Err(Error::illegal_argument(format!(
                "catalog namespace must name the owning metalake, got '{namespace}'"
            )));
        }
        let provider = self
            .provider
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::illegal_argument("catalog provider is required"))?;
        let audit = self
            .audit
            .ok_or_else(|| Error::illegal_argument("catalog audit info is required"))?;

        Ok(CatalogEntity {
            id: self.id.unwrap_or_else(CatalogId::generate),
            name,
            namespace,
            catalog_type: self.catalog_type.unwrap_or(CatalogType::Relational),
            provider,
            comment: self.comment,
            properties: self.properties,
            audit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn audit() -> AuditInfo {
        AuditInfo::new("test_user", Utc::now())
    }

    #[test]
    fn builder_produces_relational_catalog_by_default() {
        let entity = CatalogEntity::builder()
            .name("hive_cat")
            .namespace(Namespace::of(["lake"]).unwrap())
            .provider("hive")
            .property("metastore.uris", "thrift://localhost:9083")
            .audit(audit())
            .try_build()
            .unwrap();

        assert_eq!(entity.name, "hive_cat");
        assert_eq!(entity.catalog_type, CatalogType::Relational);
        assert_eq!(entity.provider, "hive");
        assert_eq!(
            entity.properties.get("metastore.uris").map(String::as_str),
            Some("thrift://localhost:9083")
        );
    }

    #[test]
    fn builder_rejects_missing_fields() {
        assert!(CatalogEntity::builder().try_build().is_err());
        assert!(CatalogEntity::builder()
            .name("c")
            .namespace(Namespace::of(["lake"]).unwrap())
            .audit(audit())
            .try_build()
            .is_err());
    }

    #[test]
    fn builder_rejects_multi_level_metalake_namespace() {
        let result = CatalogEntity::builder()
            .name("c")
            .namespace(Namespace::of(["lake", "extra"]).unwrap())
            .provider("hive")
            .audit(audit())
            .try_build();
        assert!(result.is_err());
    }
}
