use std::collections::BTreeMap;

use nrz_core::{StratifyKey, SubjectRecord, MISSING_LABEL};

/// Key shared by every subject when no stratification component applies.
pub const WHOLE_POPULATION_KEY: &str = "ALL";

const WEIGHT_BUCKET_WIDTH: f64 = 5.0;

/// Five-unit weight bucket (`floor(weight / 5)`), or `NA`.
pub fn weight_bucket(weight: Option<f64>) -> String {
    match weight {
        Some(value) => format!("{}", (value / WEIGHT_BUCKET_WIDTH).floor() as i64),
        None => MISSING_LABEL.to_string(),
    }
}

/// Grouping key for one subject.
///
/// The key is only ever compared for equality and sorted to fix processing
/// order. With `weight_balance` on and `weight` not listed explicitly, a
/// `w`-prefixed bucket is appended.
pub fn stratum_key(subject: &SubjectRecord, keys: &[StratifyKey], weight_balance: bool) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(keys.len() + 1);
    for key in keys {
        let part = match key {
            StratifyKey::Sex => subject.sex_label().to_string(),
            StratifyKey::Cage => subject.cage_label().to_string(),
            StratifyKey::Age => subject
                .age
                .map(|age| format!("{age}"))
                .unwrap_or_else(|| MISSING_LABEL.to_string()),
            StratifyKey::Weight => weight_bucket(subject.weight),
        };
        parts.push(part);
    }
    if weight_balance && !keys.contains(&StratifyKey::Weight) {
        parts.push(format!("w{}", weight_bucket(subject.weight)));
    }
    if parts.is_empty() {
        WHOLE_POPULATION_KEY.to_string()
    } else {
        parts.join("|")
    }
}

/// Buckets subjects by stratum key; iteration order is lexicographic by key
/// and subjects keep their input order inside a stratum.
pub fn partition_strata<'a>(
    subjects: &'a [SubjectRecord],
    keys: &[StratifyKey],
    weight_balance: bool,
) -> BTreeMap<String, Vec<&'a SubjectRecord>> {
    let mut strata: BTreeMap<String, Vec<&SubjectRecord>> = BTreeMap::new();
    for subject in subjects {
        strata
            .entry(stratum_key(subject, keys, weight_balance))
            .or_default()
            .push(subject);
    }
    strata
}
