//! Shared fixtures for the Hive adapter integration tests.

#![allow(dead_code)]

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

use strata_core::audit::AuditInfo;
use strata_core::entity::{CatalogEntity, CatalogType};
use strata_core::ident::{NameIdent, Namespace};
use strata_hive::metastore::MemoryMetastore;
use strata_hive::{HiveCatalog, HIVE_VERSION, METASTORE_URIS};
use strata_rel::catalog::SchemaCatalog;

pub const METALAKE: &str = "metalake";
pub const CATALOG: &str = "test_catalog";
pub const SCHEMA: &str = "test_schema";
pub const COMMENT: &str = "test_comment";
pub const PRINCIPAL: &str = "test_user";

/// A Hive 2.x catalog over a fresh in-memory metastore.
pub fn hive_catalog() -> HiveCatalog {
    hive_catalog_with_version("2")
}

pub fn hive_catalog_with_version(version: &str) -> HiveCatalog {
    let entity = CatalogEntity::builder()
        .name(CATALOG)
        .namespace(Namespace::of([METALAKE]).unwrap())
        .catalog_type(CatalogType::Relational)
        .provider("hive")
        .property(METASTORE_URIS, "thrift://localhost:9083")
        .property(HIVE_VERSION, version)
        .property("bypass.hive.metastore.warehouse.dir", "/tmp/warehouse")
        .audit(AuditInfo::new(PRINCIPAL, Utc::now()))
        .try_build()
        .unwrap();
    HiveCatalog::new(entity, PRINCIPAL, Arc::new(MemoryMetastore::new())).unwrap()
}

pub fn schema_ident() -> NameIdent {
    NameIdent::of([METALAKE, CATALOG, SCHEMA]).unwrap()
}

pub fn table_ident(name: &str) -> NameIdent {
    NameIdent::of([METALAKE, CATALOG, SCHEMA, name]).unwrap()
}

pub fn properties() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("key1".to_string(), "val1".to_string()),
        ("key2".to_string(), "val2".to_string()),
    ])
}

/// Creates the test schema in the catalog and returns its identifier.
pub async fn init_schema(catalog: &HiveCatalog) -> NameIdent {
    let ident = schema_ident();
    catalog
        .create_schema(&ident, Some(COMMENT), properties())
        .await
        .unwrap();
    ident
}
