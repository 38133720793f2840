//! Auditing collaborator
//!
//! Audit metadata records who created and last modified a record, and when.
//! Application logic never writes these fields: persistence adapters ask an
//! [`AuditorAware`] for the current actor and stamp the record on save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::OperationMetadata;

/// Audit fields attached to a persisted record
///
/// All fields stay at their zero value until the store saves the record
/// for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Save counter maintained by the store
    pub version: Option<i64>,
}

impl AuditMetadata {
    /// Returns true if the record has never been saved
    pub fn is_new(&self) -> bool {
        self.created_at.is_none()
    }

    /// Stamps the audit fields for a save performed by `actor` at `now`
    ///
    /// Creation fields are only written on the first save; the version
    /// starts at 0 and increments on every subsequent save.
    pub fn stamp(&mut self, actor: Option<String>, now: DateTime<Utc>) {
        if self.is_new() {
            self.created_by = actor.clone();
            self.created_at = Some(now);
            self.version = Some(0);
        } else {
            self.version = Some(self.version.map_or(0, |v| v + 1));
        }
        self.modified_by = actor;
        self.modified_at = Some(now);
    }
}

/// Resolves the actor responsible for the current operation
pub trait AuditorAware: Send + Sync {
    /// Returns the current actor, if one can be determined
    fn current_auditor(&self, metadata: Option<&OperationMetadata>) -> Option<String>;
}

/// Auditor that reads the initiating actor from operation metadata
///
/// The transport layer places the authenticated subject in
/// `OperationMetadata::initiated_by`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataAuditor;

impl AuditorAware for MetadataAuditor {
    fn current_auditor(&self, metadata: Option<&OperationMetadata>) -> Option<String> {
        metadata
            .and_then(|m| m.initiated_by.as_ref())
            .map(|actor| actor.trim())
            .filter(|actor| !actor.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_first_stamp_sets_creation_fields() {
        let now = Utc::now();
        let mut audit = AuditMetadata::default();
        assert!(audit.is_new());

        audit.stamp(Some("alice".to_string()), now);

        assert_eq!(audit.created_by.as_deref(), Some("alice"));
        assert_eq!(audit.created_at, Some(now));
        assert_eq!(audit.modified_by.as_deref(), Some("alice"));
        assert_eq!(audit.version, Some(0));
    }

    #[test]
    fn test_later_stamp_keeps_creation_fields() {
        let created = Utc::now();
        let later = created + Duration::minutes(5);
        let mut audit = AuditMetadata::default();
        audit.stamp(Some("alice".to_string()), created);
        audit.stamp(Some("bob".to_string()), later);

        assert_eq!(audit.created_by.as_deref(), Some("alice"));
        assert_eq!(audit.created_at, Some(created));
        assert_eq!(audit.modified_by.as_deref(), Some("bob"));
        assert_eq!(audit.modified_at, Some(later));
        assert_eq!(audit.version, Some(1));
    }

    #[test]
    fn test_metadata_auditor() {
        let auditor = MetadataAuditor;
        assert_eq!(auditor.current_auditor(None), None);

        let blank = OperationMetadata::initiated_by("  ");
        assert_eq!(auditor.current_auditor(Some(&blank)), None);

        let metadata = OperationMetadata::initiated_by("00u1abcd");
        assert_eq!(
            auditor.current_auditor(Some(&metadata)),
            Some("00u1abcd".to_string())
        );
    }
}
