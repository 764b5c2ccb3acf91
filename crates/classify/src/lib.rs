//! Ticket classification engine.
//!
//! Assigns a category and a priority to a free-text support request using
//! deterministic substring matching against configured keyword tables.
//!
//! ## What we do
//!
//! - Count, per category rule, how many keywords occur in the lowercased
//!   subject + description (presence, not frequency)
//! - Pick the strictly-highest-scoring category; ties go to the earliest
//!   declared rule; zero matches fall back to `other`
//! - Pick the highest-severity priority whose triggers hit; no hit falls
//!   back to `medium`
//! - Attach per-axis confidences, a human-readable reasoning pair, and the
//!   deduplicated list of matched keywords
//!
//! ## Pure function guarantee
//!
//! [`Classifier::classify`] performs no I/O, no clock reads, and no
//! logging. Same subject + description + rule set, same result, on any
//! machine, from any number of threads. Rule tables are injected at
//! construction and never read from ambient state, which also makes the
//! engine trivially testable with alternate rule sets.
//!
//! Persisting a result is the caller's concern; see the import crate's
//! classify trigger.

mod engine;
mod rules;

pub use crate::engine::{
    Classifier, FALLBACK_CATEGORY_CONFIDENCE, FALLBACK_PRIORITY_CONFIDENCE,
};
pub use crate::rules::{CategoryRule, PriorityBoosts, PriorityRule, RuleError, RuleSet};
