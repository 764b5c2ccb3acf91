//! Support ticket triage.
//!
//! This crate stitches the pipeline stages together so callers can
//! operate the whole flow through one dependency: multi-format payload
//! normalization, row validation, record storage, and deterministic
//! keyword classification.
//!
//! ## The flow
//!
//! raw bytes → [`normalize`](normalize()) → field-mappings →
//! [`TicketValidator`] → [`TicketStore`] → [`Classifier`] → classified
//! records, with [`Importer`] driving the whole batch and
//! [`ImportSummary`] reporting the outcome.
//!
//! ## What lives where
//!
//! - **model**: closed enums, ticket record/patch, classification types
//! - **classify**: rule tables + the pure scoring engine
//! - **normalize**: CSV / JSON / XML normalizers behind one contract
//! - **import**: the orchestrator, triggers, and boundary traits
//! - here: re-exports, one-shot helpers, and YAML configuration loading
//!
//! Classification is pure and total: no I/O, no clock, no ambient state,
//! and every input classifies to *something*, worst case the fallback
//! category and priority at low confidence.

mod config;

pub use crate::config::{ConfigLoadError, TriageConfig};

pub use classify::{
    CategoryRule, Classifier, PriorityBoosts, PriorityRule, RuleError, RuleSet,
    FALLBACK_CATEGORY_CONFIDENCE, FALLBACK_PRIORITY_CONFIDENCE,
};
pub use import::{
    BasicValidator, FieldError, ImportError, ImportSummary, Importer, InMemoryStore, RowFailure,
    StoreError, TicketStore, TicketValidator,
};
pub use model::{
    Category, ClassificationAttachment, ClassificationResult, FieldMap, Priority, Reasoning,
    TicketDraft, TicketPatch, TicketRecord, TicketStatus, UnknownVariant,
};
pub use normalize::{
    normalize, normalize_csv, normalize_json, normalize_xml, Format, NormalizeError,
};

/// One-shot classification with the reference rule tables.
///
/// Builds a throwaway [`Classifier`] per call; callers on a hot path
/// should construct one and reuse it.
pub fn classify_with_defaults(subject: &str, description: &str) -> ClassificationResult {
    Classifier::with_defaults().classify(subject, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_helper_matches_an_explicit_engine() {
        let subject = "Refund for double charge";
        let description = "My invoice shows the subscription billed twice";

        let explicit = Classifier::with_defaults().classify(subject, description);
        let one_shot = classify_with_defaults(subject, description);

        assert_eq!(one_shot, explicit);
        assert_eq!(one_shot.category, Category::BillingQuestion);
    }
}
