//! Reward specs and outcome-scaled rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::notation::{roll_item_drop, roll_notation};
use crate::resolution::OutcomeTier;

/// What an encounter pays out on a plain success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardSpec {
    /// Experience points.
    pub xp: u32,
    /// Gold as dice notation, e.g. `"2d6"` or `"3d10+5"`.
    pub gold: String,
    /// Item drops as `"key:NN%"` strings.
    pub items: Vec<String>,
}

/// Concrete rewards granted to a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    /// Experience points.
    pub xp: u32,
    /// Gold pieces.
    pub gold: u32,
    /// Catalog keys of items gained.
    pub items: Vec<String>,
}

impl Rewards {
    /// True if nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.gold == 0 && self.items.is_empty()
    }

    /// Add another set of rewards into this one.
    pub fn absorb(&mut self, other: &Rewards) {
        self.xp = self.xp.saturating_add(other.xp);
        self.gold = self.gold.saturating_add(other.gold);
        self.items.extend(other.items.iter().cloned());
    }
}

/// Scale a value by a whole percentage, flooring.
pub fn scale_percent(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent) / 100).min(u64::from(u32::MAX)) as u32
}

/// Turn a reward spec into concrete rewards for an outcome.
///
/// XP and rolled gold are scaled by the outcome multiplier (150/100/30/0%).
/// Items are only rolled when the multiplier is at least 100%, so failures
/// never yield items whatever their drop chance.
pub fn process_rewards(rng: &mut impl Rng, spec: &RewardSpec, outcome: OutcomeTier) -> Rewards {
    let percent = outcome.reward_percent();
    let gold = roll_notation(rng, &spec.gold);
    let items = if percent >= 100 {
        spec.items
            .iter()
            .filter_map(|entry| roll_item_drop(rng, entry))
            .collect()
    } else {
        Vec::new()
    };

    Rewards {
        xp: scale_percent(spec.xp, percent),
        gold: scale_percent(gold, percent),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spec() -> RewardSpec {
        RewardSpec {
            xp: 100,
            gold: "2d6".to_string(),
            items: vec!["x:100%".to_string()],
        }
    }

    #[test]
    fn critical_failure_pays_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let rewards = process_rewards(&mut rng, &spec(), OutcomeTier::CriticalFailure);
        assert_eq!(
            rewards,
            Rewards {
                xp: 0,
                gold: 0,
                items: vec![]
            }
        );
        assert!(rewards.is_empty());
    }

    #[test]
    fn failure_pays_partial_without_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let rewards = process_rewards(&mut rng, &spec(), OutcomeTier::Failure);
        assert_eq!(rewards.xp, 30);
        assert!(rewards.gold <= 3);
        assert!(rewards.items.is_empty());
    }

    #[test]
    fn success_pays_in_full() {
        let mut rng = StdRng::seed_from_u64(1);
        let rewards = process_rewards(&mut rng, &spec(), OutcomeTier::Success);
        assert_eq!(rewards.xp, 100);
        assert!((2..=12).contains(&rewards.gold));
        assert_eq!(rewards.items, vec!["x".to_string()]);
    }

    #[test]
    fn critical_success_pays_extra() {
        let mut rng = StdRng::seed_from_u64(1);
        let rewards = process_rewards(&mut rng, &spec(), OutcomeTier::CriticalSuccess);
        assert_eq!(rewards.xp, 150);
        assert!((3..=18).contains(&rewards.gold));
    }

    #[test]
    fn flat_gold_spec() {
        let mut rng = StdRng::seed_from_u64(1);
        let spec = RewardSpec {
            xp: 10,
            gold: "40".to_string(),
            items: vec![],
        };
        assert_eq!(process_rewards(&mut rng, &spec, OutcomeTier::Failure).gold, 12);
    }

    #[test]
    fn absorb_sums() {
        let mut total = Rewards::default();
        total.absorb(&Rewards {
            xp: 10,
            gold: 5,
            items: vec!["rope".to_string()],
        });
        total.absorb(&Rewards {
            xp: 3,
            gold: 1,
            items: vec!["torch".to_string()],
        });
        assert_eq!(total.xp, 13);
        assert_eq!(total.gold, 6);
        assert_eq!(total.items, vec!["rope".to_string(), "torch".to_string()]);
    }

    #[test]
    fn scale_floors() {
        assert_eq!(scale_percent(7, 30), 2);
        assert_eq!(scale_percent(7, 150), 10);
        assert_eq!(scale_percent(u32::MAX, 100), u32::MAX);
    }
}
