//! Ticket record, draft, and patch types.
//!
//! A [`TicketDraft`] is what the validator hands the store: the caller-
//! supplied fields, checked but not yet persisted. The store assigns the
//! identifier and timestamps to produce a [`TicketRecord`]. All subsequent
//! mutation goes through [`TicketRecord::apply`] with a [`TicketPatch`]:
//! there is no field-by-field merge of untyped maps, and a patch can never
//! reach `id` or `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classification::ClassificationAttachment;
use crate::taxonomy::{Category, Priority, TicketStatus};

/// A validated ticket that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub customer_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    /// Free-form nested metadata carried through from the import payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// A stored ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: String,
    pub customer_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketRecord {
    /// Builds a record from a validated draft with a store-assigned id.
    pub fn from_draft(id: impl Into<String>, draft: TicketDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            customer_id: draft.customer_id,
            customer_email: draft.customer_email,
            customer_name: draft.customer_name,
            subject: draft.subject,
            description: draft.description,
            status: draft.status,
            category: None,
            priority: None,
            classification: None,
            metadata: draft.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a patch in place.
    ///
    /// Only the fields named in the patch change. `id` and `created_at` are
    /// not patchable; `updated_at` is stamped with the supplied clock value.
    pub fn apply(&mut self, patch: TicketPatch, now: DateTime<Utc>) {
        let TicketPatch {
            subject,
            description,
            status,
            category,
            priority,
            classification,
            metadata,
        } = patch;

        if let Some(subject) = subject {
            self.subject = subject;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(category) = category {
            self.category = Some(category);
        }
        if let Some(priority) = priority {
            self.priority = Some(priority);
        }
        if let Some(classification) = classification {
            self.classification = Some(classification);
        }
        if let Some(metadata) = metadata {
            self.metadata = Some(metadata);
        }
        self.updated_at = now;
    }
}

/// A partial update to a stored ticket.
///
/// Every field is optional; `None` means "leave unchanged". Note the
/// deliberate omissions: identifier, customer fields, and creation time
/// cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub classification: Option<ClassificationAttachment>,
    pub metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> TicketDraft {
        TicketDraft {
            customer_id: "CUST-001".into(),
            customer_email: "jo@example.com".into(),
            customer_name: "Jo".into(),
            subject: "Cannot login".into(),
            description: "Locked out since this morning".into(),
            status: TicketStatus::Open,
            metadata: None,
        }
    }

    #[test]
    fn from_draft_stamps_both_timestamps() {
        let now = Utc::now();
        let record = TicketRecord::from_draft("TCK-1", draft(), now);

        assert_eq!(record.id, "TCK-1");
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert!(record.classification.is_none());
        assert!(record.category.is_none());
    }

    #[test]
    fn apply_replaces_only_named_fields() {
        let created = Utc::now();
        let mut record = TicketRecord::from_draft("TCK-2", draft(), created);

        let later = created + Duration::seconds(5);
        record.apply(
            TicketPatch {
                status: Some(TicketStatus::InProgress),
                priority: Some(Priority::High),
                ..TicketPatch::default()
            },
            later,
        );

        assert_eq!(record.status, TicketStatus::InProgress);
        assert_eq!(record.priority, Some(Priority::High));
        // Untouched fields survive.
        assert_eq!(record.subject, "Cannot login");
        assert_eq!(record.category, None);
    }

    #[test]
    fn apply_never_touches_id_or_created_at() {
        let created = Utc::now();
        let mut record = TicketRecord::from_draft("TCK-3", draft(), created);

        let later = created + Duration::seconds(60);
        record.apply(
            TicketPatch {
                subject: Some("Updated subject".into()),
                ..TicketPatch::default()
            },
            later,
        );

        assert_eq!(record.id, "TCK-3");
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn empty_patch_still_bumps_updated_at() {
        let created = Utc::now();
        let mut record = TicketRecord::from_draft("TCK-4", draft(), created);

        let later = created + Duration::seconds(1);
        record.apply(TicketPatch::default(), later);

        assert_eq!(record.updated_at, later);
        assert_eq!(record.subject, "Cannot login");
    }
}
