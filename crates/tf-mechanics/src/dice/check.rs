//! The d20 ability check.
//!
//! Two d20s are always drawn. With exactly one of advantage or disadvantage
//! the check keeps the better or worse draw; with both or neither they cancel
//! and the first draw stands. Criticals depend on the kept face alone.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::roll::roll_die;

/// Which of the two d20 draws a check keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollMode {
    /// Keep the first draw.
    #[default]
    Normal,
    /// Keep the higher draw.
    Advantage,
    /// Keep the lower draw.
    Disadvantage,
}

impl RollMode {
    /// Derive the mode from independent flags. Both flags cancel out.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }
}

/// The result of a d20 ability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRoll {
    /// The kept die face, before the modifier.
    pub natural_roll: u32,
    /// The discarded face when advantage or disadvantage applied.
    pub ignored_roll: Option<u32>,
    /// The ability modifier added to the face.
    pub modifier: i32,
    /// `natural_roll + modifier`.
    pub total: i32,
    /// Whether advantage was requested.
    pub advantage: bool,
    /// Whether disadvantage was requested.
    pub disadvantage: bool,
    /// The kept face was a 20.
    pub is_critical_success: bool,
    /// The kept face was a 1.
    pub is_critical_failure: bool,
}

impl CheckRoll {
    /// Build a check from two already-drawn d20 faces.
    pub fn from_draws(
        first: u32,
        second: u32,
        modifier: i32,
        advantage: bool,
        disadvantage: bool,
    ) -> Self {
        let (natural_roll, ignored_roll) = match RollMode::from_flags(advantage, disadvantage) {
            RollMode::Advantage => (first.max(second), Some(first.min(second))),
            RollMode::Disadvantage => (first.min(second), Some(first.max(second))),
            RollMode::Normal => (first, None),
        };

        Self {
            natural_roll,
            ignored_roll,
            modifier,
            total: natural_roll as i32 + modifier,
            advantage,
            disadvantage,
            is_critical_success: natural_roll == 20,
            is_critical_failure: natural_roll == 1,
        }
    }

    /// The effective mode this check was rolled with.
    pub fn mode(&self) -> RollMode {
        RollMode::from_flags(self.advantage, self.disadvantage)
    }
}

impl std::fmt::Display for CheckRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier >= 0 {
            write!(f, "d20 ({}) +{} = {}", self.natural_roll, self.modifier, self.total)
        } else {
            write!(f, "d20 ({}) {} = {}", self.natural_roll, self.modifier, self.total)
        }
    }
}

/// Roll a d20 ability check with the given modifier.
pub fn roll_check(
    rng: &mut impl Rng,
    modifier: i32,
    advantage: bool,
    disadvantage: bool,
) -> CheckRoll {
    let first = roll_die(rng, 20);
    let second = roll_die(rng, 20);
    let roll = CheckRoll::from_draws(first, second, modifier, advantage, disadvantage);
    tracing::debug!(
        natural = roll.natural_roll,
        ignored = ?roll.ignored_roll,
        modifier,
        total = roll.total,
        "ability check"
    );
    roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn natural_twenty_is_critical_for_any_modifier() {
        for modifier in [-5, 0, 7] {
            let roll = CheckRoll::from_draws(20, 3, modifier, false, false);
            assert!(roll.is_critical_success);
            assert!(!roll.is_critical_failure);
            assert_eq!(roll.total, 20 + modifier);
        }
    }

    #[test]
    fn natural_one_is_critical_failure_for_any_modifier() {
        for modifier in [-2, 0, 12] {
            let roll = CheckRoll::from_draws(1, 15, modifier, false, false);
            assert!(roll.is_critical_failure);
            assert!(!roll.is_critical_success);
        }
    }

    #[test]
    fn high_total_without_natural_twenty_is_not_critical() {
        let roll = CheckRoll::from_draws(19, 2, 10, false, false);
        assert_eq!(roll.total, 29);
        assert!(!roll.is_critical_success);
    }

    #[test]
    fn advantage_keeps_higher() {
        let roll = CheckRoll::from_draws(4, 17, 2, true, false);
        assert_eq!(roll.natural_roll, 17);
        assert_eq!(roll.ignored_roll, Some(4));
        assert_eq!(roll.total, 19);
        assert_eq!(roll.mode(), RollMode::Advantage);
    }

    #[test]
    fn disadvantage_keeps_lower() {
        let roll = CheckRoll::from_draws(4, 17, 2, false, true);
        assert_eq!(roll.natural_roll, 4);
        assert_eq!(roll.ignored_roll, Some(17));
    }

    #[test]
    fn advantage_and_disadvantage_cancel() {
        let roll = CheckRoll::from_draws(4, 17, 0, true, true);
        assert_eq!(roll.natural_roll, 4);
        assert_eq!(roll.ignored_roll, None);
        assert_eq!(roll.mode(), RollMode::Normal);
    }

    #[test]
    fn disadvantage_can_hide_a_twenty() {
        let roll = CheckRoll::from_draws(20, 9, 0, false, true);
        assert_eq!(roll.natural_roll, 9);
        assert!(!roll.is_critical_success);
    }

    #[test]
    fn rolled_checks_respect_invariants() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let roll = roll_check(&mut rng, 3, true, false);
            assert!((1..=20).contains(&roll.natural_roll));
            assert_eq!(roll.total, roll.natural_roll as i32 + 3);
            assert_eq!(roll.is_critical_success, roll.natural_roll == 20);
            assert_eq!(roll.is_critical_failure, roll.natural_roll == 1);
            assert!(roll.natural_roll >= roll.ignored_roll.unwrap_or(0));
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            CheckRoll::from_draws(12, 1, 3, false, false).to_string(),
            "d20 (12) +3 = 15"
        );
        assert_eq!(
            CheckRoll::from_draws(12, 1, -1, false, false).to_string(),
            "d20 (12) -1 = 11"
        );
    }
}
