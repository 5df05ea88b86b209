//! Catalog configuration conventions.
//!
//! Adapter configuration recognizes a reserved key prefix, [`BYPASS_PREFIX`]:
//! the suffix of a bypass-prefixed key is forwarded verbatim as a
//! backend-native configuration entry. This lets operators tune a specific
//! backend without widening the generic configuration surface.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use strata_core::config::split_bypass;
//!
//! let mut props = BTreeMap::new();
//! props.insert("metastore.uris".to_string(), "thrift://hms:9083".to_string());
//! props.insert("bypass.hive.metastore.warehouse.dir".to_string(), "/warehouse".to_string());
//!
//! let (native, generic) = split_bypass(&props);
//! assert_eq!(native.get("hive.metastore.warehouse.dir").map(String::as_str), Some("/warehouse"));
//! assert_eq!(generic.get("metastore.uris").map(String::as_str), Some("thrift://hms:9083"));
//! ```

use std::collections::BTreeMap;

/// Reserved prefix marking a property as backend-native passthrough.
pub const BYPASS_PREFIX: &str = "bypass.";

/// Returns the backend-native suffix of a bypass-prefixed key, if any.
#[must_use]
pub fn bypass_suffix(key: &str) -> Option<&str> {
    key.strip_prefix(BYPASS_PREFIX).filter(|s| !s.is_empty())
}

/// Splits a property map into backend-native passthrough entries (bypass
/// prefix stripped) and the remaining generic entries.
#[must_use]
pub fn split_bypass(
    properties: &BTreeMap<String, String>,
) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut native = BTreeMap::new();
    let mut generic = BTreeMap::new();
    for (key, value) in properties {
        if let Some(suffix) = bypass_suffix(key) {
            native.insert(suffix.to_string(), value.clone());
        } else {
            generic.insert(key.clone(), value.clone());
        }
    }
    (native, generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bypass_suffix_strips_the_prefix() {
        assert_eq!(bypass_suffix("bypass.hive.exec.dynamic"), Some("hive.exec.dynamic"));
        assert_eq!(bypass_suffix("metastore.uris"), None);
        // A bare prefix carries no backend key.
        assert_eq!(bypass_suffix("bypass."), None);
    }

    #[test]
    fn split_separates_native_from_generic() {
        let mut props = BTreeMap::new();
        props.insert("bypass.a.b".to_string(), "1".to_string());
        props.insert("bypass.c".to_string(), "2".to_string());
        props.insert("plain".to_string(), "3".to_string());

        let (native, generic) = split_bypass(&props);
        assert_eq!(native.len(), 2);
        assert_eq!(native.get("a.b").map(String::as_str), Some("1"));
        assert_eq!(native.get("c").map(String::as_str), Some("2"));
        assert_eq!(generic.len(), 1);
        assert_eq!(generic.get("plain").map(String::as_str), Some("3"));
    }
}
