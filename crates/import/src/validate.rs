//! The validation boundary.
//!
//! Full request validation lives with the service layer; the import
//! pipeline only needs the contract: a field-mapping goes in, and either a
//! normalized [`TicketDraft`] or a list of field-level errors comes out.
//! Errors are data, never panics, and never abort a batch.
//!
//! [`BasicValidator`] is the reference implementation used by tests and
//! the demo binary: required-field presence, e-mail shape, closed-set
//! status, and length caps.

use std::fmt;

use model::{FieldMap, TicketDraft, TicketStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation boundary consumed by the import pipeline, one row at a
/// time.
pub trait TicketValidator {
    /// Checks a normalized field-mapping. With `require_all`, every
    /// mandatory field must be present; without it, present fields are
    /// still checked but absence is tolerated (partial-update shape).
    fn validate(&self, fields: &FieldMap, require_all: bool)
        -> Result<TicketDraft, Vec<FieldError>>;
}

const REQUIRED_FIELDS: [&str; 5] = [
    "customer_id",
    "customer_email",
    "customer_name",
    "subject",
    "description",
];

const MAX_SUBJECT_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// Reference validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicValidator;

impl TicketValidator for BasicValidator {
    fn validate(
        &self,
        fields: &FieldMap,
        require_all: bool,
    ) -> Result<TicketDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        for name in REQUIRED_FIELDS {
            if require_all && string_field(fields, name).is_none() {
                errors.push(FieldError::new(name, "is required"));
            }
        }

        let customer_email = string_field(fields, "customer_email").unwrap_or_default();
        if !customer_email.is_empty() && !looks_like_email(&customer_email) {
            errors.push(FieldError::new(
                "customer_email",
                "is not a valid e-mail address",
            ));
        }

        let subject = string_field(fields, "subject").unwrap_or_default();
        if subject.chars().count() > MAX_SUBJECT_LEN {
            errors.push(FieldError::new(
                "subject",
                format!("must be at most {MAX_SUBJECT_LEN} characters"),
            ));
        }

        let description = string_field(fields, "description").unwrap_or_default();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                "description",
                format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
            ));
        }

        let status = match string_field(fields, "status") {
            // Absent or blank status defaults to open.
            None => TicketStatus::default(),
            Some(raw) => match raw.parse::<TicketStatus>() {
                Ok(status) => status,
                Err(err) => {
                    errors.push(FieldError::new("status", err.to_string()));
                    TicketStatus::default()
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TicketDraft {
            customer_id: string_field(fields, "customer_id").unwrap_or_default(),
            customer_email,
            customer_name: string_field(fields, "customer_name").unwrap_or_default(),
            subject,
            description,
            status,
            metadata: fields.get("metadata").filter(|v| v.is_object()).cloned(),
        })
    }
}

/// A trimmed, non-empty string view of a field. Scalar numbers are
/// coerced; JSON payloads routinely carry numeric customer ids.
fn string_field(fields: &FieldMap, name: &str) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(entries: &[(&str, &str)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    fn valid_fields() -> FieldMap {
        fields(&[
            ("customer_id", "CUST-001"),
            ("customer_email", "jo@example.com"),
            ("customer_name", "Jo"),
            ("subject", "Cannot login"),
            ("description", "Locked out since this morning"),
            ("status", "open"),
        ])
    }

    #[test]
    fn a_complete_row_validates() {
        let draft = BasicValidator
            .validate(&valid_fields(), true)
            .expect("valid row");

        assert_eq!(draft.customer_id, "CUST-001");
        assert_eq!(draft.status, TicketStatus::Open);
        assert!(draft.metadata.is_none());
    }

    #[test]
    fn missing_required_fields_are_itemized() {
        let mut row = valid_fields();
        row.remove("customer_email");
        row.remove("description");

        let errors = BasicValidator.validate(&row, true).expect_err("invalid");
        let named: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(named, vec!["customer_email", "description"]);
        assert!(errors.iter().all(|e| e.message == "is required"));
    }

    #[test]
    fn absence_is_tolerated_without_require_all() {
        let mut row = valid_fields();
        row.remove("customer_name");

        let draft = BasicValidator.validate(&row, false).expect("partial row");
        assert!(draft.customer_name.is_empty());
    }

    #[test]
    fn malformed_email_is_rejected_even_without_require_all() {
        let mut row = valid_fields();
        row.insert("customer_email".into(), Value::String("not-an-email".into()));

        let errors = BasicValidator.validate(&row, false).expect_err("invalid");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "customer_email");
    }

    #[test]
    fn email_shape_cases() {
        for good in ["a@b.co", "first.last@sub.example.com"] {
            assert!(looks_like_email(good), "{good}");
        }
        for bad in ["", "@b.co", "a@", "a@nodot", "a@.co", "a@b.", "a b@c.de"] {
            assert!(!looks_like_email(bad), "{bad}");
        }
    }

    #[test]
    fn unknown_status_is_a_field_error() {
        let mut row = valid_fields();
        row.insert("status".into(), Value::String("pending".into()));

        let errors = BasicValidator.validate(&row, true).expect_err("invalid");
        assert_eq!(errors[0].field, "status");
        assert!(errors[0].message.contains("pending"));
    }

    #[test]
    fn missing_status_defaults_to_open() {
        let mut row = valid_fields();
        row.remove("status");

        let draft = BasicValidator.validate(&row, true).expect("valid");
        assert_eq!(draft.status, TicketStatus::Open);
    }

    #[test]
    fn overlong_subject_is_rejected() {
        let mut row = valid_fields();
        row.insert("subject".into(), Value::String("x".repeat(201)));

        let errors = BasicValidator.validate(&row, true).expect_err("invalid");
        assert_eq!(errors[0].field, "subject");
    }

    #[test]
    fn numeric_scalars_are_coerced_to_strings() {
        let mut row = valid_fields();
        row.insert("customer_id".into(), json!(1042));

        let draft = BasicValidator.validate(&row, true).expect("valid");
        assert_eq!(draft.customer_id, "1042");
    }

    #[test]
    fn nested_metadata_objects_pass_through() {
        let mut row = valid_fields();
        row.insert("metadata".into(), json!({"source": "web"}));

        let draft = BasicValidator.validate(&row, true).expect("valid");
        assert_eq!(draft.metadata, Some(json!({"source": "web"})));
    }

    #[test]
    fn scalar_metadata_is_dropped() {
        let mut row = valid_fields();
        row.insert("metadata".into(), Value::String("just a note".into()));

        let draft = BasicValidator.validate(&row, true).expect("valid");
        assert!(draft.metadata.is_none());
    }

    #[test]
    fn multiple_failures_accumulate_on_one_row() {
        let row = fields(&[("customer_email", "bad"), ("status", "bogus")]);

        let errors = BasicValidator.validate(&row, true).expect_err("invalid");
        // Four missing required fields + bad email + bad status.
        assert_eq!(errors.len(), 6);
    }
}
