#![deny(missing_docs)]
#![doc = "Canonical serialization, integrity hashes and config loading for allocation runs."]

/// Config decoding from JSON and YAML.
pub mod config;
/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON serde helpers.
pub mod serde;

pub use config::{config_from_json_slice, config_from_yaml_slice, load_config};
pub use hash::{stable_hash_string, IntegrityHashes};
pub use self::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_string};
