//! Error surface of the import pipeline.

use normalize::NormalizeError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that abort an import or classify call outright.
///
/// Row-level validation failures are *not* errors: they accumulate in the
/// returned [`crate::ImportSummary`] and never touch the surrounding
/// batch. Everything here is whole-call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The payload could not be parsed as its declared format.
    /// Distinguishable from a successful import of zero valid rows.
    #[error("normalization failed: {0}")]
    Normalization(#[from] NormalizeError),

    /// The declared content type maps to no known normalizer.
    #[error("unsupported content type: {0}")]
    UnsupportedFormat(String),

    /// The ticket referenced by a classify trigger does not exist.
    #[error("ticket {0} not found")]
    TicketNotFound(String),

    /// The store backend failed; propagated unchanged, no retries.
    #[error(transparent)]
    Store(#[from] StoreError),
}
