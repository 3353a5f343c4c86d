//! Engine configuration.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::rounds::MAX_ROUNDS;

/// Configuration for an [`EncounterEngine`](crate::EncounterEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Longest the engine waits for narration before using fallback text.
    pub narration_timeout: Duration,
    /// RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Rounds before a multi-round encounter is forced to a result.
    pub max_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            narration_timeout: Duration::from_secs(10),
            seed: None,
            max_rounds: MAX_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Set the narration timeout.
    pub fn with_narration_timeout(mut self, timeout: Duration) -> Self {
        self.narration_timeout = timeout;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the round limit (at least 1).
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    /// Build an RNG from the configured seed.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
