#![deny(missing_docs)]

//! Seeded allocation of subjects to study groups.
//!
//! Subjects pass through [`validate_subjects`] once, then [`allocate`] runs
//! one of four methods over a single [`nrz_core::RngHandle`]. The balanced,
//! stratified and block methods all reduce to repeated calls of
//! [`select_group`] against a fresh [`AllocationState`].

mod allocate;
mod select;
mod stratify;
mod validate;

pub use allocate::{allocate, build_blocks, Allocation, CapOverride};
pub use select::{select_group, AllocationState, Selection};
pub use stratify::{partition_strata, stratum_key, weight_bucket, WHOLE_POPULATION_KEY};
pub use validate::validate_subjects;
