//! Bulk import orchestration and classification triggers.
//!
//! This is where the pipeline stages meet. [`Importer`] drives
//! normalize → validate → store → classify for each record in a batch:
//!
//! - **Normalize**: raw bytes become ordered field-mappings via the
//!   declared format's normalizer. Failure here is batch-fatal.
//! - **Validate**: each row goes through the injected
//!   [`TicketValidator`]. A rejected row is recorded (position, raw
//!   data, messages) and never disturbs its neighbors.
//! - **Store**: accepted rows are created through the injected
//!   [`TicketStore`].
//! - **Classify** (optional): freshly created records are scored by the
//!   pure engine and the result is persisted through a typed patch.
//!
//! The single-ticket trigger, [`Importer::auto_classify`], re-runs the
//! engine against an already-stored ticket. It is the only place
//! classification has a side effect; the scoring itself stays pure.
//!
//! Everything is synchronous and sequential within a batch; ordering of
//! the failure-detail list matches input order. Structured logs via
//! `tracing` at the batch level only.

use std::time::Instant;

use chrono::Utc;
use classify::Classifier;
use model::{ClassificationAttachment, ClassificationResult, TicketPatch};
use normalize::Format;
use tracing::{info, warn, Level};

mod error;
mod store;
mod summary;
mod validate;

pub use crate::error::ImportError;
pub use crate::store::{InMemoryStore, StoreError, TicketStore};
pub use crate::summary::{ImportSummary, RowFailure};
pub use crate::validate::{BasicValidator, FieldError, TicketValidator};

/// The bulk import orchestrator.
///
/// Owns its collaborators: a store, a validator, and a classifier over
/// immutable rule tables. All three are injected, which keeps every piece
/// replaceable in tests and embeddings.
pub struct Importer<S, V> {
    store: S,
    validator: V,
    classifier: Classifier,
}

impl<S: TicketStore, V: TicketValidator> Importer<S, V> {
    pub fn new(store: S, validator: V, classifier: Classifier) -> Self {
        Self {
            store,
            validator,
            classifier,
        }
    }

    /// The underlying store, for inspection after an import.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The engine this importer classifies with.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Imports a batch of records from raw payload bytes.
    ///
    /// Returns the per-batch summary (`total == successful + failed`,
    /// failures itemized in input order). Only a payload that cannot be
    /// parsed as `format` fails the call; invalid rows are isolated.
    pub fn import(
        &mut self,
        raw: &[u8],
        format: Format,
        auto_classify: bool,
    ) -> Result<ImportSummary, ImportError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "import.batch", format = %format, auto_classify);
        let _guard = span.enter();

        let rows = match normalize::normalize(format, raw) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "import_normalization_failed"
                );
                return Err(err.into());
            }
        };

        let mut summary = ImportSummary::with_total(rows.len());
        for (index, fields) in rows.into_iter().enumerate() {
            match self.validator.validate(&fields, true) {
                Ok(draft) => {
                    let record = self.store.create(draft)?;
                    if auto_classify {
                        let result = self
                            .classifier
                            .classify(&record.subject, &record.description);
                        self.store.update(&record.id, merge_patch(result))?;
                    }
                    summary.record_success();
                }
                Err(field_errors) => {
                    summary.record_failure(RowFailure {
                        row: index + 1,
                        data: fields,
                        errors: field_errors.iter().map(ToString::to_string).collect(),
                    });
                }
            }
        }

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            elapsed_micros = start.elapsed().as_micros(),
            "import_complete"
        );
        Ok(summary)
    }

    /// Imports a batch, resolving the normalizer from a declared content
    /// type first.
    pub fn import_content_type(
        &mut self,
        raw: &[u8],
        content_type: &str,
        auto_classify: bool,
    ) -> Result<ImportSummary, ImportError> {
        let format = Format::from_content_type(content_type)
            .ok_or_else(|| ImportError::UnsupportedFormat(content_type.to_string()))?;
        self.import(raw, format, auto_classify)
    }

    /// Re-runs classification against a stored ticket and persists the
    /// result as a system-assigned attachment.
    ///
    /// Calling this is the explicit request to re-classify, so an
    /// existing `manual_override = true` attachment is replaced. An
    /// unknown identifier fails with [`ImportError::TicketNotFound`]
    /// before any store mutation.
    pub fn auto_classify(&mut self, ticket_id: &str) -> Result<ClassificationResult, ImportError> {
        let start = Instant::now();

        let record = self
            .store
            .find_by_id(ticket_id)?
            .ok_or_else(|| ImportError::TicketNotFound(ticket_id.to_string()))?;

        let result = self
            .classifier
            .classify(&record.subject, &record.description);
        self.store.update(&record.id, merge_patch(result.clone()))?;

        info!(
            ticket_id,
            category = %result.category,
            priority = %result.priority,
            overall_confidence = result.overall_confidence,
            elapsed_micros = start.elapsed().as_micros(),
            "auto_classify_complete"
        );
        Ok(result)
    }
}

/// The patch that merges an engine result into a record: category and
/// priority surface on the ticket, the full result rides along as a
/// system attachment stamped with the current time.
fn merge_patch(result: ClassificationResult) -> TicketPatch {
    TicketPatch {
        category: Some(result.category),
        priority: Some(result.priority),
        classification: Some(ClassificationAttachment::system(result, Utc::now())),
        ..TicketPatch::default()
    }
}
