#![deny(missing_docs)]
#![doc = "Data model, error taxonomy and seeded randomness shared by the allocation engine crates."]

pub mod config;
pub mod errors;
pub mod model;
pub mod rng;

pub use config::{
    Constraints, Method, RandomizationConfig, StratifyKey, DEFAULT_ALGORITHM_VERSION,
};
pub use errors::{ErrorInfo, NrzError};
pub use model::{
    utc_timestamp, AssignmentRecord, Sex, StudyMetadata, SubjectRecord, MISSING_LABEL,
};
pub use rng::{
    pick_index, FixedSeedSource, OsSeedSource, RngHandle, SeedSource, MAX_GENERATED_SEED,
};
