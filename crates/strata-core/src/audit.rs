//! Audit metadata attached to every catalog entity.
//!
//! An [`AuditInfo`] records who created an entity and when, and — only once
//! the entity has actually been altered — who last modified it. Load and
//! list operations never touch audit metadata; every alteration replaces
//! the record rather than mutating it in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable audit record for a catalog entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// The actor that created the entity.
    pub creator: String,

    /// When the entity was created (UTC).
    pub create_time: DateTime<Utc>,

    /// The actor of the most recent alteration, unset until the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modifier: Option<String>,

    /// When the most recent alteration happened, unset until the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// Creates the audit record for a freshly created entity.
    ///
    /// The modifier fields start unset; they are populated only by a
    /// subsequent alteration.
    #[must_use]
    pub fn new(creator: impl Into<String>, create_time: DateTime<Utc>) -> Self {
        Self {
            creator: creator.into(),
            create_time,
            last_modifier: None,
            last_modified_time: None,
        }
    }

    /// Returns a new record reflecting an alteration by `actor` at `time`.
    ///
    /// The creator fields are carried over unchanged.
    #[must_use]
    pub fn with_modification(&self, actor: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            creator: self.creator.clone(),
            create_time: self.create_time,
            last_modifier: Some(actor.into()),
            last_modified_time: Some(time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_leaves_modifier_unset() {
        let audit = AuditInfo::new("alice", Utc::now());
        assert_eq!(audit.creator, "alice");
        assert!(audit.last_modifier.is_none());
        assert!(audit.last_modified_time.is_none());
    }

    #[test]
    fn modification_preserves_creator() {
        let created = Utc::now();
        let audit = AuditInfo::new("alice", created);
        let altered = audit.with_modification("bob", Utc::now());

        assert_eq!(altered.creator, "alice");
        assert_eq!(altered.create_time, created);
        assert_eq!(altered.last_modifier.as_deref(), Some("bob"));
        assert!(altered.last_modified_time.is_some());

        // The original record is untouched.
        assert!(audit.last_modifier.is_none());
    }

    #[test]
    fn serde_skips_unset_modifier_fields() {
        let audit = AuditInfo::new("alice", Utc::now());
        let json = serde_json::to_value(&audit).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("creator"));
        assert!(obj.contains_key("createTime"));
        assert!(!obj.contains_key("lastModifier"));
        assert!(!obj.contains_key("lastModifiedTime"));
    }
}
