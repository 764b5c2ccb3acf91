//! CSV normalization.
//!
//! The first row is the header and defines field names; every subsequent
//! row becomes one field-mapping keyed by those names. Blank lines are
//! skipped and surrounding whitespace is trimmed from headers and fields.

use model::FieldMap;
use serde_json::Value;

use crate::error::NormalizeError;

/// Parses CSV bytes into one field-mapping per data row.
///
/// A header-only file (zero data rows) is a successful parse yielding an
/// empty sequence, not an error.
pub fn normalize_csv(raw: &[u8]) -> Result<Vec<FieldMap>, NormalizeError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(raw);

    let headers = reader
        .headers()
        .map_err(|err| NormalizeError::Csv(err.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| NormalizeError::Csv(err.to_string()))?;
        let mut fields = FieldMap::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            fields.insert(name.to_string(), Value::String(value.to_string()));
        }
        rows.push(fields);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "customer_id,customer_email,customer_name,subject,description,status";

    #[test]
    fn rows_map_to_header_field_names() {
        let raw = format!(
            "{HEADER}\nCUST-001,jo@example.com,Jo,Login issue,Cannot sign in,open\n"
        );
        let rows = normalize_csv(raw.as_bytes()).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["customer_id"], "CUST-001");
        assert_eq!(rows[0]["subject"], "Login issue");
        assert_eq!(rows[0]["status"], "open");
    }

    #[test]
    fn header_only_file_is_a_successful_empty_parse() {
        let rows = normalize_csv(HEADER.as_bytes()).expect("parse");
        assert!(rows.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let raw = format!(
            "{HEADER}\n\nCUST-001,a@b.com,A,S1,D1,open\n\n\nCUST-002,c@d.com,C,S2,D2,open\n"
        );
        let rows = normalize_csv(raw.as_bytes()).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["customer_id"], "CUST-001");
        assert_eq!(rows[1]["customer_id"], "CUST-002");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let raw = format!("{HEADER}\n  CUST-001 , jo@example.com ,  Jo ,  Help  , Desc , open\n");
        let rows = normalize_csv(raw.as_bytes()).expect("parse");

        assert_eq!(rows[0]["customer_id"], "CUST-001");
        assert_eq!(rows[0]["customer_email"], "jo@example.com");
        assert_eq!(rows[0]["subject"], "Help");
    }

    #[test]
    fn row_order_is_preserved() {
        let raw = format!(
            "{HEADER}\nCUST-003,a@b.com,A,S3,D,open\nCUST-001,a@b.com,A,S1,D,open\nCUST-002,a@b.com,A,S2,D,open\n"
        );
        let rows = normalize_csv(raw.as_bytes()).expect("parse");

        let ids: Vec<&str> = rows
            .iter()
            .map(|row| row["customer_id"].as_str().expect("string field"))
            .collect();
        assert_eq!(ids, vec!["CUST-003", "CUST-001", "CUST-002"]);
    }

    #[test]
    fn ragged_rows_are_a_normalization_failure() {
        let raw = format!("{HEADER}\nCUST-001,only-two-fields\n");
        let err = normalize_csv(raw.as_bytes()).expect_err("ragged row");
        assert!(matches!(err, NormalizeError::Csv(_)));
    }
}
