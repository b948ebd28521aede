#![deny(missing_docs)]
#![doc = "Per-group descriptive statistics, weight effect sizes and balance warnings."]

/// Effect size helpers.
pub mod effect;
/// Group summaries and the top-level statistics pass.
pub mod summary;

pub use effect::{cohens_d, mean, population_sd};
pub use summary::{
    compute_statistics, EffectSize, GroupStats, Statistics, StatsOptions,
    DEFAULT_WEIGHT_D_WARNING, SIZE_IMBALANCE_WARNING,
};
