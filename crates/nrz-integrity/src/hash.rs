use nrz_core::{AssignmentRecord, NrzError, RandomizationConfig, SubjectRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Computes a stable SHA256 hash for the provided serializable value.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, NrzError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Reproducibility digests over the three artefacts of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntegrityHashes {
    /// Digest of the (normalized) subject records.
    pub input_hash: String,
    /// Digest of the resolved configuration, seed included.
    pub config_hash: String,
    /// Digest of the assignment list in output order.
    pub output_hash: String,
}

impl IntegrityHashes {
    /// Hashes subjects, config and assignments.
    pub fn compute(
        subjects: &[SubjectRecord],
        config: &RandomizationConfig,
        assignments: &[AssignmentRecord],
    ) -> Result<Self, NrzError> {
        Ok(Self {
            input_hash: stable_hash_string(&subjects)?,
            config_hash: stable_hash_string(config)?,
            output_hash: stable_hash_string(&assignments)?,
        })
    }

    /// True once all three digests are populated.
    pub fn is_complete(&self) -> bool {
        !self.input_hash.is_empty() && !self.config_hash.is_empty() && !self.output_hash.is_empty()
    }
}
