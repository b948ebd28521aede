use std::collections::HashSet;

use nrz_core::{ErrorInfo, NrzError, Sex, SubjectRecord};

fn row_error(code: &str, message: String, row: usize) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("row", row.to_string())
}

/// Checks subject records and returns normalized copies.
///
/// Rows are numbered from 1 in error context. The returned records carry
/// `sex` as `"M"`, `"F"` or `None`; every other field is copied unchanged.
pub fn validate_subjects(subjects: &[SubjectRecord]) -> Result<Vec<SubjectRecord>, NrzError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(subjects.len());
    let mut normalized = Vec::with_capacity(subjects.len());

    for (idx, subject) in subjects.iter().enumerate() {
        let row = idx + 1;
        if subject.id.trim().is_empty() {
            return Err(NrzError::Validation(
                row_error("empty-id", format!("subject at row {row} has an empty id"), row)
                    .with_hint("every subject needs a non-empty identifier"),
            ));
        }
        if !seen.insert(subject.id.as_str()) {
            return Err(NrzError::Validation(
                row_error(
                    "duplicate-id",
                    format!("duplicate subject id detected: {}", subject.id),
                    row,
                )
                .with_context("subject_id", subject.id.as_str()),
            ));
        }
        if let Some(weight) = subject.weight {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(NrzError::Validation(
                    row_error(
                        "non-positive-weight",
                        format!("subject {} has non-positive weight {weight}", subject.id),
                        row,
                    )
                    .with_context("subject_id", subject.id.as_str()),
                ));
            }
        }
        let sex = match subject.sex.as_deref() {
            None => None,
            Some(raw) => Sex::normalize(raw).map_err(|info| {
                NrzError::Validation(
                    info.with_context("row", row.to_string())
                        .with_context("subject_id", subject.id.as_str()),
                )
            })?,
        };

        let mut record = subject.clone();
        record.sex = sex.map(|sex| sex.as_str().to_string());
        normalized.push(record);
    }

    Ok(normalized)
}
