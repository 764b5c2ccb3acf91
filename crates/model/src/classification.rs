//! Classification output types.
//!
//! [`ClassificationResult`] is the engine's return value: created fresh on
//! every call, immutable once returned, and owned by whatever embeds it.
//! [`ClassificationAttachment`] is the persisted form carried by a ticket
//! record, adding the classification timestamp and the manual-override
//! marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::{Category, Priority};

/// One free-text explanation per scoring axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub category_reasoning: String,
    pub priority_reasoning: String,
}

/// The outcome of classifying one ticket's subject + description.
///
/// Confidence values are clamped to `[0, 1]` and rounded to two decimal
/// places; `overall_confidence` is the arithmetic mean of the two axis
/// confidences. `keywords_found` holds every keyword that matched during
/// either scan, deduplicated, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub priority: Priority,
    pub category_confidence: f64,
    pub priority_confidence: f64,
    pub overall_confidence: f64,
    pub reasoning: Reasoning,
    pub keywords_found: Vec<String>,
}

/// A classification as stored on a ticket record.
///
/// Absent entirely on a never-classified ticket. `manual_override = true`
/// means a human is the authority for the ticket's current category and
/// priority; the engine only replaces such an attachment when re-running
/// classification is explicitly requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationAttachment {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub classified_at: DateTime<Utc>,
    pub manual_override: bool,
}

impl ClassificationAttachment {
    /// An engine-assigned classification.
    pub fn system(result: ClassificationResult, classified_at: DateTime<Utc>) -> Self {
        Self {
            result,
            classified_at,
            manual_override: false,
        }
    }

    /// A human-assigned classification.
    pub fn manual(result: ClassificationResult, classified_at: DateTime<Utc>) -> Self {
        Self {
            result,
            classified_at,
            manual_override: true,
        }
    }
}
