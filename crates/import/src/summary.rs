//! Import outcome reporting.

use model::FieldMap;
use serde::{Deserialize, Serialize};

/// Failure detail for one rejected row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based position of the row in the normalized payload.
    pub row: usize,
    /// The offending raw field-mapping, as normalized.
    pub data: FieldMap,
    /// The validator's messages for this row.
    pub errors: Vec<String>,
}

/// Aggregate outcome of one bulk-import call.
///
/// Ephemeral: exists for the duration of the response, never persisted.
/// `total == successful + failed` always holds on return, and the failure
/// list is ordered by input row position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RowFailure>,
}

impl ImportSummary {
    /// A summary for a batch of `total` normalized rows, before any row
    /// has been processed.
    pub(crate) fn with_total(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.successful += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: RowFailure) {
        self.failed += 1;
        self.errors.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_partition_the_total() {
        let mut summary = ImportSummary::with_total(3);
        summary.record_success();
        summary.record_failure(RowFailure {
            row: 2,
            data: FieldMap::new(),
            errors: vec!["subject: is required".into()],
        });
        summary.record_success();

        assert_eq!(summary.total, summary.successful + summary.failed);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors[0].row, 2);
    }

    #[test]
    fn clean_summaries_omit_the_error_list_on_the_wire() {
        let mut summary = ImportSummary::with_total(1);
        summary.record_success();

        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(value["total"], 1);
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn failures_carry_the_raw_row_data() {
        let mut data = FieldMap::new();
        data.insert("customer_id".into(), "CUST-009".into());

        let mut summary = ImportSummary::with_total(1);
        summary.record_failure(RowFailure {
            row: 1,
            data,
            errors: vec!["customer_email: is required".into()],
        });

        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(value["errors"][0]["row"], 1);
        assert_eq!(value["errors"][0]["data"]["customer_id"], "CUST-009");
        assert_eq!(value["errors"][0]["errors"][0], "customer_email: is required");
    }
}
