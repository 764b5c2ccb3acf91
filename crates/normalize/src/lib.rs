//! Multi-format payload normalization.
//!
//! This is where bulk-import payloads enter the pipeline. Each normalizer
//! converts the raw bytes of one wire format into an ordered sequence of
//! flat field-mappings ([`model::FieldMap`]) behind a single shared
//! contract:
//!
//! - it never panics the caller;
//! - all failure is a typed [`NormalizeError`] carrying the underlying
//!   parser's message;
//! - a well-formed payload with zero records is a *successful* empty
//!   parse, not an error.
//!
//! Format selection is the caller's concern: HTTP routing dispatches on
//! the declared content type via [`Format::from_content_type`] and hands
//! the resolved [`Format`] to [`normalize()`]. Validation of the resulting
//! field-mappings is likewise downstream; a payload that parses cleanly
//! but describes nonsense still normalizes.

use std::fmt;

use model::FieldMap;
use serde::{Deserialize, Serialize};

mod csv;
mod error;
mod json;
mod xml;

pub use crate::csv::normalize_csv;
pub use crate::error::NormalizeError;
pub use crate::json::normalize_json;
pub use crate::xml::normalize_xml;

/// Wire formats accepted by bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl Format {
    /// Maps a declared content type to a format, if a normalizer exists
    /// for it. Media-type parameters (`; charset=...`) are ignored.
    pub fn from_content_type(value: &str) -> Option<Format> {
        let media_type = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match media_type.as_str() {
            "text/csv" | "application/csv" => Some(Format::Csv),
            "application/json" | "text/json" => Some(Format::Json),
            "application/xml" | "text/xml" => Some(Format::Xml),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes raw payload bytes in the given format into one field-mapping
/// per record, in payload order.
pub fn normalize(format: Format, raw: &[u8]) -> Result<Vec<FieldMap>, NormalizeError> {
    match format {
        Format::Csv => normalize_csv(raw),
        Format::Json => normalize_json(raw),
        Format::Xml => normalize_xml(raw),
    }
}
