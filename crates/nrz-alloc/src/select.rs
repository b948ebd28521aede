use std::collections::HashMap;

use nrz_core::{pick_index, Constraints, RngHandle, SubjectRecord};

/// Running counters for one balanced pass.
///
/// Groups are addressed by their position in the configured group list. A
/// fresh state is created per balanced run, per stratum and per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationState {
    group_counts: Vec<usize>,
    cage_counts: Vec<HashMap<String, usize>>,
}

impl AllocationState {
    /// Zeroed counters for `groups` groups.
    pub fn new(groups: usize) -> Self {
        Self {
            group_counts: vec![0; groups],
            cage_counts: vec![HashMap::new(); groups],
        }
    }

    /// Subjects placed in each group so far.
    pub fn group_counts(&self) -> &[usize] {
        &self.group_counts
    }

    /// Subjects from `cage` placed in `group` so far.
    pub fn cage_count(&self, group: usize, cage: &str) -> usize {
        self.cage_counts[group].get(cage).copied().unwrap_or(0)
    }

    fn record(&mut self, group: usize, cage: &str) {
        self.group_counts[group] += 1;
        *self.cage_counts[group].entry(cage.to_string()).or_insert(0) += 1;
    }
}

/// Outcome of one selector call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Position of the chosen group.
    pub group: usize,
    /// The cage cap could not be honoured without leaving the least-loaded
    /// groups, so it was ignored for this subject.
    pub cap_bypassed: bool,
}

/// Picks a group for `subject` and records it in `state`.
///
/// Candidates are the groups tied at the minimum size. A cage cap narrows
/// them unless that would leave none, in which case size balance wins and the
/// cap is skipped for this subject. Cage-clustering minimization then keeps
/// the candidates holding the fewest cage-mates, and the generator breaks the
/// remaining tie uniformly.
///
/// # Panics
///
/// Panics when `state` was created for zero groups. [`crate::allocate`]
/// rejects such configs before any selection happens.
pub fn select_group(
    subject: &SubjectRecord,
    constraints: &Constraints,
    state: &mut AllocationState,
    rng: &mut RngHandle,
) -> Selection {
    debug_assert!(
        !state.group_counts.is_empty(),
        "select_group needs at least one group"
    );
    let cage = subject.cage_label();
    let min_size = state.group_counts.iter().copied().min().unwrap_or(0);
    let mut candidates: Vec<usize> = (0..state.group_counts.len())
        .filter(|&group| state.group_counts[group] == min_size)
        .collect();

    let mut cap_bypassed = false;
    if let Some(cap) = constraints.max_per_cage_per_group {
        let limited: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&group| state.cage_count(group, cage) < cap as usize)
            .collect();
        if limited.is_empty() {
            cap_bypassed = true;
        } else {
            candidates = limited;
        }
    }

    if constraints.minimize_cage_clustering {
        let min_cage = candidates
            .iter()
            .map(|&group| state.cage_count(group, cage))
            .min()
            .unwrap_or(0);
        candidates.retain(|&group| state.cage_count(group, cage) == min_cage);
    }

    let group = candidates[pick_index(rng, candidates.len())];
    state.record(group, cage);
    Selection {
        group,
        cap_bypassed,
    }
}
