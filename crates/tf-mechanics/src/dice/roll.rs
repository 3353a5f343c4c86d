//! Uniform die rolls and their aggregation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The individual results of rolling several dice of the same size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Number of sides on each die.
    pub sides: u32,
    /// Individual die values, in the order they were rolled.
    pub rolls: Vec<u32>,
}

impl DiceRoll {
    /// Sum of all die values, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        let sum: u64 = self.rolls.iter().copied().map(u64::from).sum();
        sum.min(u64::from(u32::MAX)) as u32
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.rolls.len()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

/// Roll a single die, uniform in `[1, sides]`. Zero sides rolls as a d1.
pub fn roll_die(rng: &mut impl Rng, sides: u32) -> u32 {
    rng.random_range(1..=sides.max(1))
}

/// Roll `count` dice with `sides` sides each.
pub fn roll_dice(rng: &mut impl Rng, count: u32, sides: u32) -> DiceRoll {
    let rolls = (0..count).map(|_| roll_die(rng, sides)).collect();
    DiceRoll { sides, rolls }
}
