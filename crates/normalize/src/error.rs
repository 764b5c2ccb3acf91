//! Error surface of the normalization stage.

use thiserror::Error;

/// A raw payload could not be interpreted as its declared format.
///
/// Normalization failure is always whole-payload: there is no such thing
/// as a partially malformed CSV header or an almost-balanced XML tree.
/// Import treats these as batch-fatal, unlike row-level validation
/// failures which are accumulated per row. The underlying parser's
/// message is preserved for the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    /// CSV could not be parsed (bad quoting, ragged rows, undecodable
    /// fields).
    #[error("invalid csv payload: {0}")]
    Csv(String),

    /// Payload is not a JSON object or array of objects.
    #[error("invalid json payload: {0}")]
    Json(String),

    /// XML is malformed or violates the single-root requirement.
    #[error("invalid xml payload: {0}")]
    Xml(String),

    /// Payload bytes are not valid UTF-8.
    #[error("payload is not valid utf-8: {0}")]
    InvalidUtf8(String),
}
