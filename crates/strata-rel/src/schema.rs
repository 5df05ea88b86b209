//! Schemas: named groupings of tables within a catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use strata_core::audit::AuditInfo;

/// A schema (database) within a catalog.
///
/// Addressed by `metalake.catalog.schema`. Immutable; alterations produce a
/// new instance with refreshed audit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema name.
    pub name: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Schema properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// Audit metadata.
    pub audit: AuditInfo,
}

impl Schema {
    /// Creates a schema record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        comment: Option<String>,
        properties: BTreeMap<String, String>,
        audit: AuditInfo,
    ) -> Self {
        Self {
            name: name.into(),
            comment,
            properties,
            audit,
        }
    }

    /// Returns a new schema with the given changes applied by `actor` at
    /// `at`.
    ///
    /// Removing a property that is not set is a no-op, matching the
    /// table-level semantics.
    #[must_use]
    pub fn applying(&self, changes: &[SchemaChange], actor: &str, at: DateTime<Utc>) -> Self {
        let mut properties = self.properties.clone();
        for change in changes {
            match change {
                SchemaChange::SetProperty { property, value } => {
                    properties.insert(property.clone(), value.clone());
                }
                SchemaChange::RemoveProperty { property } => {
                    properties.remove(property);
                }
            }
        }
        Self {
            name: self.name.clone(),
            comment: self.comment.clone(),
            properties,
            audit: self.audit.with_modification(actor, at),
        }
    }
}

/// One structural edit to a schema's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaChange {
    /// Sets (or replaces) a property.
    #[serde(rename_all = "camelCase")]
    SetProperty {
        /// Property key.
        property: String,
        /// Property value.
        value: String,
    },
    /// Removes a property; missing keys are ignored.
    #[serde(rename_all = "camelCase")]
    RemoveProperty {
        /// Property key.
        property: String,
    },
}

impl SchemaChange {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        let mut properties = BTreeMap::new();
        properties.insert("key1".to_string(), "val1".to_string());
        Schema::new(
            "sales",
            Some("test_comment".to_string()),
            properties,
            AuditInfo::new("alice", Utc::now()),
        )
    }

    #[test]
    fn applying_changes_updates_properties_and_audit() {
        let schema = schema();
        let altered = schema.applying(
            &[
                SchemaChange::set_property("key2", "val2"),
                SchemaChange::remove_property("key1"),
                SchemaChange::remove_property("missing"),
            ],
            "bob",
            Utc::now(),
        );

        assert_eq!(altered.properties.get("key2").map(String::as_str), Some("val2"));
        assert!(!altered.properties.contains_key("key1"));
        assert_eq!(altered.audit.creator, "alice");
        assert_eq!(altered.audit.last_modifier.as_deref(), Some("bob"));

        // The original is untouched.
        assert!(schema.properties.contains_key("key1"));
        assert!(schema.audit.last_modifier.is_none());
    }

    #[test]
    fn change_wire_form_is_type_keyed() {
        let json = serde_json::to_value(SchemaChange::set_property("k", "v")).unwrap();
        assert_eq!(json["type"], "setProperty");
        let json = serde_json::to_value(SchemaChange::remove_property("k")).unwrap();
        assert_eq!(json["type"], "removeProperty");
    }
}
