use nrz_core::{
    pick_index, AssignmentRecord, Constraints, Method, NrzError, RandomizationConfig, RngHandle,
    SeedSource, SubjectRecord,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::select::{select_group, AllocationState};
use crate::stratify::partition_strata;

/// A subject placed past the cage cap to keep group sizes within one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapOverride {
    /// Subject that was placed.
    pub subject_id: String,
    /// Its cage label.
    pub cage: String,
    /// Group it landed in.
    pub group: String,
}

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// One assignment per subject, in allocation order.
    pub assignments: Vec<AssignmentRecord>,
    /// Seed the run was driven by (drawn when the config had none).
    pub seed: u64,
    /// Method that produced the assignments.
    pub method: Method,
    /// Cage cap bypasses, in allocation order.
    pub cap_overrides: Vec<CapOverride>,
}

/// Allocates `subjects` to the configured groups.
///
/// When `config.seed` is `None` a seed is drawn from `seeds`; either way the
/// whole run is driven by one generator seeded once, so the same subjects,
/// config and seed always reproduce the same assignments in the same order.
/// Subjects are expected to have passed [`crate::validate_subjects`].
pub fn allocate(
    subjects: &[SubjectRecord],
    config: &RandomizationConfig,
    seeds: &dyn SeedSource,
) -> Result<Allocation, NrzError> {
    let method = config.method()?;
    config.check()?;
    if subjects.is_empty() {
        return Err(NrzError::configuration(
            "no-subjects",
            "at least one subject is required",
        ));
    }
    let seed = match config.seed {
        Some(seed) => seed,
        None => seeds.draw_seed()?,
    };
    let mut rng = RngHandle::from_seed(seed);
    let mut pass = Pass::new(&config.group_names, &config.constraints, subjects.len());

    match method {
        Method::Simple => {
            let mut shuffled: Vec<&SubjectRecord> = subjects.iter().collect();
            shuffled.shuffle(&mut rng);
            let groups = &config.group_names;
            for (idx, subject) in shuffled.into_iter().enumerate() {
                pass.assignments.push(AssignmentRecord::new(
                    subject.id.as_str(),
                    groups[idx % groups.len()].as_str(),
                ));
            }
        }
        Method::Balanced => {
            pass.balanced(subjects.iter().collect(), &mut rng);
        }
        Method::Stratified => {
            let strata = partition_strata(
                subjects,
                &config.stratify_by,
                config.constraints.weight_balance,
            );
            for (key, members) in strata {
                debug!(stratum = %key, subjects = members.len(), "allocating stratum");
                pass.balanced(members, &mut rng);
            }
        }
        Method::Block => {
            let mut shuffled: Vec<&SubjectRecord> = subjects.iter().collect();
            shuffled.shuffle(&mut rng);
            let blocks = build_blocks(shuffled, config, &mut rng);
            for (idx, block) in blocks.into_iter().enumerate() {
                debug!(block = idx, subjects = block.len(), "allocating block");
                pass.balanced(block, &mut rng);
            }
        }
    }

    Ok(Allocation {
        assignments: pass.assignments,
        seed,
        method,
        cap_overrides: pass.cap_overrides,
    })
}

/// Cuts `items` into contiguous blocks.
///
/// Each block length is drawn from `random_block_sizes` when that list is
/// non-empty, else `block_size`, else the number of groups. The final block
/// takes whatever remains.
pub fn build_blocks<T>(
    items: Vec<T>,
    config: &RandomizationConfig,
    rng: &mut RngHandle,
) -> Vec<Vec<T>> {
    let mut blocks = Vec::new();
    let mut remaining = items.into_iter().peekable();
    while remaining.peek().is_some() {
        let size = if config.random_block_sizes.is_empty() {
            config.block_size.unwrap_or(config.group_names.len())
        } else {
            config.random_block_sizes[pick_index(rng, config.random_block_sizes.len())]
        };
        blocks.push(remaining.by_ref().take(size.max(1)).collect());
    }
    blocks
}

struct Pass<'c> {
    groups: &'c [String],
    constraints: &'c Constraints,
    assignments: Vec<AssignmentRecord>,
    cap_overrides: Vec<CapOverride>,
}

impl<'c> Pass<'c> {
    fn new(groups: &'c [String], constraints: &'c Constraints, capacity: usize) -> Self {
        Self {
            groups,
            constraints,
            assignments: Vec::with_capacity(capacity),
            cap_overrides: Vec::new(),
        }
    }

    /// Shuffles `members` and runs the group selector over them with fresh
    /// counters.
    fn balanced(&mut self, mut members: Vec<&SubjectRecord>, rng: &mut RngHandle) {
        members.shuffle(rng);
        let mut state = AllocationState::new(self.groups.len());
        for subject in members {
            let selection = select_group(subject, self.constraints, &mut state, rng);
            let group = &self.groups[selection.group];
            if selection.cap_bypassed {
                warn!(
                    subject_id = %subject.id,
                    cage = subject.cage_label(),
                    group = %group,
                    "cage cap bypassed to keep group sizes balanced"
                );
                self.cap_overrides.push(CapOverride {
                    subject_id: subject.id.clone(),
                    cage: subject.cage_label().to_string(),
                    group: group.clone(),
                });
            }
            self.assignments
                .push(AssignmentRecord::new(subject.id.as_str(), group.as_str()));
        }
    }
}
