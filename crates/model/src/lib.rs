//! Shared data model for the ticket triage pipeline.
//!
//! Every type that crosses a stage boundary lives here: the closed
//! category/priority/status enums, the ticket record and its typed patch,
//! and the classification result types. They are designed to be:
//!
//! - **Serializable**: snake_case wire names via serde
//! - **Cloneable**: cheap to clone for pipeline processing
//! - **Comparable**: equality checks for testing
//! - **Closed**: category, priority, and status are enums, not bare
//!   strings, so every decision point matches exhaustively and adding a
//!   variant is a compile-time-checked change
//!
//! Records are mutated only through [`TicketRecord::apply`], which takes a
//! [`TicketPatch`] of named optional fields. `id` and `created_at` cannot
//! be patched.

mod classification;
mod taxonomy;
mod ticket;

pub use crate::classification::{ClassificationAttachment, ClassificationResult, Reasoning};
pub use crate::taxonomy::{Category, Priority, TicketStatus, UnknownVariant};
pub use crate::ticket::{TicketDraft, TicketPatch, TicketRecord};

/// One normalized import row: field name → string value or nested mapping.
///
/// Produced by the format normalizers, consumed by the validator. Nested
/// objects are permitted (e.g. a `metadata` sub-mapping); everything else
/// is expected to be a string or scalar.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;
