//! Deterministic RNG wrapper and seed sources.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::errors::{ErrorInfo, NrzError};

/// Exclusive upper bound for generated seeds (`2^31 - 1`).
pub const MAX_GENERATED_SEED: u64 = (1 << 31) - 1;

/// Deterministic RNG handle threaded through one allocation run.
///
/// The handle is a thin wrapper around `StdRng`. A run seeds exactly one
/// handle and passes it by `&mut` into every shuffle, block-size draw and
/// tie-break, so the whole assignment is a pure function of the seed.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Capability for drawing a fresh seed when the config does not carry one.
pub trait SeedSource {
    /// Draws a new seed.
    fn draw_seed(&self) -> Result<u64, NrzError>;
}

/// Seed source backed by the operating system's entropy pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn draw_seed(&self) -> Result<u64, NrzError> {
        let mut bytes = [0u8; 8];
        OsRng.try_fill_bytes(&mut bytes).map_err(|err| {
            NrzError::Rng(
                ErrorInfo::new("entropy-unavailable", err.to_string())
                    .with_hint("pass an explicit seed"),
            )
        })?;
        Ok(u64::from_le_bytes(bytes) % MAX_GENERATED_SEED)
    }
}

/// Seed source returning a preset value; used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeedSource(pub u64);

impl SeedSource for FixedSeedSource {
    fn draw_seed(&self) -> Result<u64, NrzError> {
        Ok(self.0)
    }
}

/// Uniform index in `0..len`.
///
/// # Panics
///
/// Panics when `len` is zero.
pub fn pick_index(rng: &mut RngHandle, len: usize) -> usize {
    rng.gen_range(0..len)
}
