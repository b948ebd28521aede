use nrz_alloc::{allocate, validate_subjects, CapOverride};
use nrz_core::{utc_timestamp, AssignmentRecord, NrzError, OsSeedSource, SeedSource};
use nrz_integrity::IntegrityHashes;
use nrz_stats::{compute_statistics, Statistics, StatsOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::audit::AuditLog;
use crate::project::ProjectModel;

/// Output bundle of one run, consumed read-only by exporters and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomizationArtifacts {
    /// One assignment per subject, in allocation order.
    pub assignments: Vec<AssignmentRecord>,
    /// Balance diagnostics.
    pub stats: Statistics,
    /// Balance and constraint warnings.
    pub warnings: Vec<String>,
    /// Seed the run used.
    pub seed: u64,
    /// Reproducibility digests.
    pub hashes: IntegrityHashes,
    /// RFC 3339 UTC time the bundle was produced.
    pub generated_at: String,
}

/// Sequences validation, allocation, statistics and hashing for a project.
///
/// The service owns an audit log that grows across every run it performs.
/// It takes `&mut self`, so concurrent use needs external locking.
pub struct RandomizerService {
    audit: AuditLog,
    seeds: Box<dyn SeedSource + Send + Sync>,
    options: StatsOptions,
}

impl Default for RandomizerService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RandomizerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomizerService")
            .field("audit_events", &self.audit.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn cap_warning(entry: &CapOverride) -> String {
    format!(
        "Cage cap bypassed for subject {} (cage {}) in group {} to keep group sizes balanced.",
        entry.subject_id, entry.cage, entry.group
    )
}

impl RandomizerService {
    /// Service drawing missing seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            audit: AuditLog::new(),
            seeds: Box::new(OsSeedSource),
            options: StatsOptions::default(),
        }
    }

    /// Replaces the seed source used when a config carries no seed.
    pub fn with_seed_source(mut self, seeds: impl SeedSource + Send + Sync + 'static) -> Self {
        self.seeds = Box::new(seeds);
        self
    }

    /// Replaces the statistics options.
    pub fn with_stats_options(mut self, options: StatsOptions) -> Self {
        self.options = options;
        self
    }

    /// The service's cumulative audit log.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Runs the full pipeline against `project`.
    ///
    /// On success the project holds the normalized subjects, the config with
    /// its resolved seed, the new results, and this run's audit events
    /// appended to its log. On failure the project is left as it was.
    pub fn run(&mut self, project: &mut ProjectModel) -> Result<RandomizationArtifacts, NrzError> {
        let first_event = self.audit.len();
        info!(
            study = %project.metadata.study_id,
            subjects = project.subjects.len(),
            method = %project.config.method,
            "starting randomization run"
        );

        let subjects = validate_subjects(&project.subjects)?;
        self.audit
            .record("validation", [("subjects", json!(subjects.len()))]);

        let allocation = allocate(&subjects, &project.config, self.seeds.as_ref())?;
        let mut config = project.config.clone();
        config.seed = Some(allocation.seed);
        self.audit.record(
            "randomization",
            [
                ("method", json!(allocation.method.as_str())),
                ("seed", json!(allocation.seed)),
                ("algorithm_version", json!(config.algorithm_version)),
            ],
        );

        let (stats, mut warnings) = compute_statistics(
            &subjects,
            &allocation.assignments,
            &config.group_names,
            &self.options,
        )?;
        warnings.extend(allocation.cap_overrides.iter().map(cap_warning));
        for message in &warnings {
            warn!(study = %project.metadata.study_id, "{message}");
        }
        self.audit
            .record("statistics", [("warnings", json!(warnings.len()))]);

        let hashes = IntegrityHashes::compute(&subjects, &config, &allocation.assignments)?;
        self.audit.record(
            "hashing",
            [
                ("input_hash", json!(hashes.input_hash)),
                ("config_hash", json!(hashes.config_hash)),
                ("output_hash", json!(hashes.output_hash)),
            ],
        );

        project.subjects = subjects;
        project.config = config;
        project.assignments = allocation.assignments.clone();
        project.stats = stats.clone();
        project.warnings = warnings.clone();
        project.hashes = hashes.clone();
        project
            .audit_log
            .extend(self.audit.since(first_event).iter().cloned());

        info!(
            study = %project.metadata.study_id,
            seed = allocation.seed,
            warnings = warnings.len(),
            "randomization run complete"
        );

        Ok(RandomizationArtifacts {
            assignments: allocation.assignments,
            stats,
            warnings,
            seed: allocation.seed,
            hashes,
            generated_at: utc_timestamp(),
        })
    }
}
