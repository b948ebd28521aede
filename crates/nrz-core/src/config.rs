//! Run configuration for one allocation invocation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NrzError};

/// Algorithm label stamped on configs that do not carry one.
pub const DEFAULT_ALGORITHM_VERSION: &str = "1.0.0";

/// Allocation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Shuffle then deal round-robin; no balancing.
    Simple,
    /// Shuffle then greedy size/cage balancing.
    Balanced,
    /// Balanced runs inside covariate strata.
    Stratified,
    /// Balanced runs inside contiguous blocks of the shuffled sequence.
    Block,
}

impl Method {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Simple => "simple",
            Method::Balanced => "balanced",
            Method::Stratified => "stratified",
            Method::Block => "block",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = NrzError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "simple" => Ok(Method::Simple),
            "balanced" => Ok(Method::Balanced),
            "stratified" => Ok(Method::Stratified),
            "block" => Ok(Method::Block),
            _ => Err(NrzError::UnsupportedMethod(
                ErrorInfo::new(
                    "unknown-method",
                    format!("unknown randomization method: {raw}"),
                )
                .with_context("method", raw)
                .with_hint("expected one of simple, balanced, stratified, block"),
            )),
        }
    }
}

/// Covariate usable as a stratification component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StratifyKey {
    /// Normalized sex.
    Sex,
    /// Cage identifier.
    Cage,
    /// Age value.
    Age,
    /// Five-unit weight bucket.
    Weight,
}

/// Balancing constraints consulted by the group selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Soft cap on subjects sharing a cage within one group.
    #[serde(default)]
    pub max_per_cage_per_group: Option<u32>,
    /// Prefer the group holding the fewest cage-mates.
    #[serde(default = "default_true")]
    pub minimize_cage_clustering: bool,
    /// Add a weight bucket to strata when weight is not stratified explicitly.
    #[serde(default = "default_true")]
    pub weight_balance: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_per_cage_per_group: None,
            minimize_cage_clustering: true,
            weight_balance: true,
        }
    }
}

/// Complete configuration for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizationConfig {
    /// Method name as supplied; parsed with [`RandomizationConfig::method`].
    pub method: String,
    /// Ordered group names.
    pub group_names: Vec<String>,
    /// Master seed; filled in with the generated value when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ordered stratification components.
    #[serde(default)]
    pub stratify_by: Vec<StratifyKey>,
    /// Fixed block length for the block method.
    #[serde(default)]
    pub block_size: Option<usize>,
    /// Candidate block lengths sampled per block; wins over `block_size`.
    #[serde(default)]
    pub random_block_sizes: Vec<usize>,
    /// Balancing constraints.
    #[serde(default)]
    pub constraints: Constraints,
    /// Algorithm label recorded for reproducibility.
    #[serde(default = "default_algorithm_version")]
    pub algorithm_version: String,
}

fn default_algorithm_version() -> String {
    DEFAULT_ALGORITHM_VERSION.to_string()
}

impl RandomizationConfig {
    /// Creates a config with default constraints and no seed.
    pub fn new<I, S>(method: impl Into<String>, group_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            group_names: group_names.into_iter().map(Into::into).collect(),
            seed: None,
            stratify_by: Vec::new(),
            block_size: None,
            random_block_sizes: Vec::new(),
            constraints: Constraints::default(),
            algorithm_version: default_algorithm_version(),
        }
    }

    /// Sets an explicit seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the stratification components.
    pub fn with_stratify_by(mut self, keys: impl IntoIterator<Item = StratifyKey>) -> Self {
        self.stratify_by = keys.into_iter().collect();
        self
    }

    /// Replaces the balancing constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Parses the configured method name.
    pub fn method(&self) -> Result<Method, NrzError> {
        self.method.parse()
    }

    /// Checks the structural preconditions that do not depend on subjects.
    pub fn check(&self) -> Result<(), NrzError> {
        if self.group_names.is_empty() {
            return Err(NrzError::Configuration(
                ErrorInfo::new("empty-groups", "at least one group name is required")
                    .with_hint("supply group_names, e.g. [\"Control\", \"Treatment\"]"),
            ));
        }
        for (idx, name) in self.group_names.iter().enumerate() {
            if self.group_names[..idx].contains(name) {
                return Err(NrzError::Configuration(
                    ErrorInfo::new("duplicate-group", format!("group '{name}' is listed twice"))
                        .with_context("group", name.as_str()),
                ));
            }
        }
        if self.block_size == Some(0) {
            return Err(NrzError::configuration(
                "zero-block-size",
                "block_size must be at least 1",
            ));
        }
        if self.random_block_sizes.contains(&0) {
            return Err(NrzError::configuration(
                "zero-block-size",
                "random_block_sizes entries must be at least 1",
            ));
        }
        if self.constraints.max_per_cage_per_group == Some(0) {
            return Err(NrzError::Configuration(
                ErrorInfo::new(
                    "zero-cage-cap",
                    "max_per_cage_per_group must be at least 1",
                )
                .with_hint("omit the cap to disable it"),
            ));
        }
        Ok(())
    }
}
