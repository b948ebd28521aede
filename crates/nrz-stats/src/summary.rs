use std::collections::{BTreeMap, HashMap};

use nrz_core::{AssignmentRecord, ErrorInfo, NrzError, SubjectRecord, MISSING_LABEL};
use serde::{Deserialize, Serialize};

use crate::effect::{cohens_d, mean, population_sd};

/// Default |d| at which a weight imbalance warning is raised.
pub const DEFAULT_WEIGHT_D_WARNING: f64 = 0.8;

/// Warning emitted when group sizes differ by more than one subject.
pub const SIZE_IMBALANCE_WARNING: &str = "Group size imbalance exceeds 1 subject.";

/// Tunables for the statistics pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsOptions {
    /// Absolute Cohen's d on weight at which a pair is flagged.
    #[serde(default = "default_weight_d_warning")]
    pub weight_d_warning: f64,
}

fn default_weight_d_warning() -> f64 {
    DEFAULT_WEIGHT_D_WARNING
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            weight_d_warning: DEFAULT_WEIGHT_D_WARNING,
        }
    }
}

/// Descriptive statistics for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Subjects assigned to the group.
    pub n: usize,
    /// Mean weight over subjects with a weight, rounded to 4 decimals.
    pub weight_mean: Option<f64>,
    /// Population SD of weight, rounded to 4 decimals.
    pub weight_sd: f64,
    /// Counts keyed `M`, `F` and `NA`; all three keys are always present.
    pub sex_distribution: BTreeMap<String, usize>,
    /// Counts keyed by cage, missing cages under `NA`.
    pub cage_distribution: BTreeMap<String, usize>,
}

/// Pairwise effect sizes for one group pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// Cohen's d on weight, rounded to 4 decimals.
    pub cohens_d_weight: f64,
}

/// Balance diagnostics for a finished allocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Per-group summaries keyed by group name.
    pub groups: BTreeMap<String, GroupStats>,
    /// Effect sizes keyed `"A vs B"` with `A < B` lexicographically.
    pub effect_sizes: BTreeMap<String, EffectSize>,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn weights(members: &[&SubjectRecord]) -> Vec<f64> {
    members.iter().filter_map(|subject| subject.weight).collect()
}

fn summarize(members: &[&SubjectRecord]) -> GroupStats {
    let weights = weights(members);
    let mut sex_distribution: BTreeMap<String, usize> = ["M", "F", MISSING_LABEL]
        .into_iter()
        .map(|label| (label.to_string(), 0))
        .collect();
    let mut cage_distribution = BTreeMap::new();
    for subject in members {
        *sex_distribution
            .entry(subject.sex_label().to_string())
            .or_insert(0) += 1;
        *cage_distribution
            .entry(subject.cage_label().to_string())
            .or_insert(0) += 1;
    }
    GroupStats {
        n: members.len(),
        weight_mean: mean(&weights).map(round4),
        weight_sd: round4(population_sd(&weights)),
        sex_distribution,
        cage_distribution,
    }
}

/// Computes group statistics and balance warnings.
///
/// Every name in `group_names` gets an entry even when empty, as does any
/// group that only appears in `assignments`. Subjects are expected to be
/// validated (normalized sex). An assignment naming an unknown subject is a
/// configuration error.
pub fn compute_statistics(
    subjects: &[SubjectRecord],
    assignments: &[AssignmentRecord],
    group_names: &[String],
    options: &StatsOptions,
) -> Result<(Statistics, Vec<String>), NrzError> {
    let by_id: HashMap<&str, &SubjectRecord> = subjects
        .iter()
        .map(|subject| (subject.id.as_str(), subject))
        .collect();

    let mut members: BTreeMap<&str, Vec<&SubjectRecord>> = group_names
        .iter()
        .map(|name| (name.as_str(), Vec::new()))
        .collect();
    for row in assignments {
        let subject = by_id.get(row.subject_id.as_str()).copied().ok_or_else(|| {
            NrzError::Configuration(
                ErrorInfo::new(
                    "unknown-subject",
                    format!("assignment references unknown subject {}", row.subject_id),
                )
                .with_context("subject_id", row.subject_id.as_str())
                .with_context("group", row.group.as_str()),
            )
        })?;
        members.entry(row.group.as_str()).or_default().push(subject);
    }

    let mut stats = Statistics::default();
    let mut warnings = Vec::new();
    for (group, rows) in &members {
        stats.groups.insert(group.to_string(), summarize(rows));
    }

    let names: Vec<&str> = members.keys().copied().collect();
    for (idx, first) in names.iter().enumerate() {
        for second in &names[idx + 1..] {
            let d = round4(cohens_d(
                &weights(&members[first]),
                &weights(&members[second]),
            ));
            let label = format!("{first} vs {second}");
            if d.abs() >= options.weight_d_warning {
                warnings.push(format!(
                    "Weight imbalance warning ({label}): Cohen's d={d}"
                ));
            }
            stats
                .effect_sizes
                .insert(label, EffectSize { cohens_d_weight: d });
        }
    }

    let sizes = stats.groups.values().map(|group| group.n);
    if let (Some(max), Some(min)) = (sizes.clone().max(), sizes.min()) {
        if max - min > 1 {
            warnings.push(SIZE_IMBALANCE_WARNING.to_string());
        }
    }

    Ok((stats, warnings))
}
