use chrono::Utc;
use nrz_core::{AssignmentRecord, RandomizationConfig, StudyMetadata, SubjectRecord};
use nrz_integrity::IntegrityHashes;
use nrz_stats::Statistics;
use serde::{Deserialize, Serialize};

use crate::audit::AuditEvent;

/// Everything known about one study: inputs, configuration, the latest
/// results and the cumulative audit trail.
///
/// The whole model is serde-serializable so a snapshot persister can write it
/// out and read it back without losing any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Study description.
    pub metadata: StudyMetadata,
    /// Subject records; replaced by their normalized form after a run.
    pub subjects: Vec<SubjectRecord>,
    /// Run configuration; `seed` holds the resolved value after a run.
    pub config: RandomizationConfig,
    /// Group names as entered for the study.
    pub groups: Vec<String>,
    /// Cumulative audit trail across runs.
    #[serde(default)]
    pub audit_log: Vec<AuditEvent>,
    /// Latest assignments.
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
    /// Latest statistics.
    #[serde(default)]
    pub stats: Statistics,
    /// Latest warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Latest integrity hashes.
    #[serde(default)]
    pub hashes: IntegrityHashes,
    /// Version of the engine that produced the results.
    #[serde(default = "default_software_version")]
    pub software_version: String,
    /// Build date (`YYYY-MM-DD`).
    #[serde(default)]
    pub build_date: String,
}

fn default_software_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl ProjectModel {
    /// New project with no results yet.
    pub fn new(
        metadata: StudyMetadata,
        subjects: Vec<SubjectRecord>,
        config: RandomizationConfig,
    ) -> Self {
        Self {
            metadata,
            subjects,
            groups: config.group_names.clone(),
            config,
            audit_log: Vec::new(),
            assignments: Vec::new(),
            stats: Statistics::default(),
            warnings: Vec::new(),
            hashes: IntegrityHashes::default(),
            software_version: default_software_version(),
            build_date: Utc::now().date_naive().to_string(),
        }
    }
}
