//! Hit points, damage, and health classification.
//!
//! The flat Constitution-based maximum here is used to seed characters that
//! arrive without HP. Level-ups recompute maximum HP from the class hit die
//! instead (see [`crate::progression`]); the two formulas are independent.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::character::Character;
use crate::resolution::{Difficulty, OutcomeTier};

/// Lowest maximum HP the Constitution formula produces.
pub const MIN_BASE_HP: i32 = 5;
/// Highest maximum HP the Constitution formula produces.
pub const MAX_BASE_HP: i32 = 30;
/// Relative spread applied to rolled damage.
pub const DAMAGE_VARIANCE: f64 = 0.2;

/// Words in an encounter name that mark it as a fight.
pub const HOSTILE_KEYWORDS: &[&str] = &[
    "ambush",
    "assassin",
    "attack",
    "bandit",
    "battle",
    "beast",
    "brigand",
    "combat",
    "creature",
    "cultist",
    "dragon",
    "fight",
    "ghoul",
    "goblin",
    "monster",
    "ogre",
    "orc",
    "raider",
    "skeleton",
    "spider",
    "troll",
    "undead",
    "wolf",
    "zombie",
];

/// `10 + CON modifier * 5`, clamped to `[5, 30]`.
pub fn calculate_max_hp(character: &Character) -> i32 {
    let con = character.stats.modifier(Ability::Constitution);
    (10 + con * 5).clamp(MIN_BASE_HP, MAX_BASE_HP)
}

/// Fill in missing HP fields. Existing values are left alone.
///
/// A stored maximum of zero or less is treated as missing and replaced.
pub fn initialize_hp(character: &Character) -> Character {
    let mut next = character.clone();
    let max = next.max_hp_or_derived();
    if next.stored_max_hp().is_none() {
        next.max_hp = Some(max);
    }
    if next.current_hp.is_none() {
        next.current_hp = Some(max);
    }
    next
}

/// Roll damage for an outcome tier, scaled by difficulty with ±20% variance.
pub fn calculate_damage(
    rng: &mut impl Rng,
    tier: OutcomeTier,
    max_hp: i32,
    difficulty: Difficulty,
) -> i32 {
    let variance = rng.random_range(-DAMAGE_VARIANCE..=DAMAGE_VARIANCE);
    damage_with_variance(tier, max_hp, difficulty, variance)
}

/// Damage for a tier given an already-drawn variance in `[-0.2, 0.2]`.
pub fn damage_with_variance(
    tier: OutcomeTier,
    max_hp: i32,
    difficulty: Difficulty,
    variance: f64,
) -> i32 {
    let scaled = i64::from(max_hp.max(0))
        * i64::from(tier.damage_percent())
        * i64::from(difficulty.damage_percent());
    (scaled as f64 * (1.0 + variance) / 10_000.0)
        .floor()
        .max(0.0) as i32
}

/// Subtract HP, clamping at zero. Reaching zero marks the character defeated.
pub fn apply_damage(character: &Character, amount: i32) -> Character {
    let mut next = initialize_hp(character);
    let max = next.max_hp_or_derived();
    let current = (next.current_hp_or_full() - amount.max(0)).clamp(0, max);
    next.current_hp = Some(current);
    if current == 0 {
        next.is_defeated = true;
    }
    next
}

/// Restore HP, clamping at the maximum.
pub fn apply_healing(character: &Character, amount: i32) -> Character {
    let mut next = initialize_hp(character);
    let max = next.max_hp_or_derived();
    let current = (next.current_hp_or_full() + amount.max(0)).clamp(0, max);
    next.current_hp = Some(current);
    if current > 0 {
        next.is_defeated = false;
    }
    next
}

/// How badly hurt a character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HpStatus {
    /// 0%.
    Defeated,
    /// Up to 25%.
    Critical,
    /// Up to 50%.
    Wounded,
    /// Up to 75%.
    Injured,
    /// Below 100%.
    Healthy,
    /// 100%.
    Full,
}

impl HpStatus {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Defeated => "defeated",
            Self::Critical => "critical",
            Self::Wounded => "wounded",
            Self::Injured => "injured",
            Self::Healthy => "healthy",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for HpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current HP as a percentage of maximum. A non-positive maximum reads as 0%.
pub fn hp_percentage(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    f64::from(current.clamp(0, max)) * 100.0 / f64::from(max)
}

/// Classify HP into a status band.
pub fn hp_status(current: i32, max: i32) -> HpStatus {
    let pct = hp_percentage(current, max);
    if pct <= 0.0 {
        HpStatus::Defeated
    } else if pct <= 25.0 {
        HpStatus::Critical
    } else if pct <= 50.0 {
        HpStatus::Wounded
    } else if pct <= 75.0 {
        HpStatus::Injured
    } else if pct < 100.0 {
        HpStatus::Healthy
    } else {
        HpStatus::Full
    }
}

/// Keyword heuristic: does this encounter name describe a fight?
pub fn is_hostile_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    HOSTILE_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityScores;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn with_con(con: i32) -> Character {
        Character::new("Test", "Fighter").with_stats(AbilityScores::new(10, 10, con, 10, 10, 10))
    }

    #[test]
    fn max_hp_from_constitution() {
        assert_eq!(calculate_max_hp(&with_con(10)), 10);
        assert_eq!(calculate_max_hp(&with_con(14)), 20);
        assert_eq!(calculate_max_hp(&with_con(8)), 5);
        assert_eq!(calculate_max_hp(&with_con(3)), 5);
        assert_eq!(calculate_max_hp(&with_con(20)), 30);
    }

    #[test]
    fn initialize_is_idempotent() {
        let c = initialize_hp(&with_con(14));
        assert_eq!(c.max_hp, Some(20));
        assert_eq!(c.current_hp, Some(20));

        let hurt = c.clone().with_hp(3, 20);
        assert_eq!(initialize_hp(&hurt), hurt);
    }

    #[test]
    fn initialize_keeps_existing_max() {
        let mut c = with_con(14);
        c.max_hp = Some(12);
        let c = initialize_hp(&c);
        assert_eq!(c.max_hp, Some(12));
        assert_eq!(c.current_hp, Some(12));
    }

    #[test]
    fn damage_by_tier() {
        let medium = |tier| damage_with_variance(tier, 20, Difficulty::Medium, 0.0);
        assert_eq!(medium(OutcomeTier::CriticalFailure), 8);
        assert_eq!(medium(OutcomeTier::Failure), 3);
        assert_eq!(medium(OutcomeTier::Success), 1);
        assert_eq!(
            damage_with_variance(OutcomeTier::CriticalSuccess, 20, Difficulty::Deadly, 0.2),
            0
        );
    }

    #[test]
    fn damage_scales_with_difficulty() {
        let fumble = |d| damage_with_variance(OutcomeTier::CriticalFailure, 30, d, 0.0);
        let trivial = fumble(Difficulty::Trivial);
        let deadly = fumble(Difficulty::Deadly);
        assert_eq!(trivial, 6);
        assert_eq!(deadly, 18);
    }

    #[test]
    fn rolled_damage_stays_within_variance() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..300 {
            let d =
                calculate_damage(&mut rng, OutcomeTier::CriticalFailure, 30, Difficulty::Medium);
            // base 12, ±20%
            assert!((9..=14).contains(&d), "damage {d}");
        }
    }

    #[test]
    fn damage_clamps_and_defeats() {
        let c = with_con(10).with_hp(6, 10);
        let hit = apply_damage(&c, 4);
        assert_eq!(hit.current_hp, Some(2));
        assert!(!hit.is_defeated);

        let down = apply_damage(&hit, 50);
        assert_eq!(down.current_hp, Some(0));
        assert!(down.is_defeated);
    }

    #[test]
    fn healing_clamps_and_revives() {
        let c = apply_damage(&with_con(10).with_hp(2, 10), 10);
        assert!(c.is_defeated);
        let healed = apply_healing(&c, 100);
        assert_eq!(healed.current_hp, Some(10));
        assert!(!healed.is_defeated);
    }

    #[test]
    fn non_positive_max_hp_is_rederived() {
        let c: Character =
            serde_json::from_str(r#"{"characterName":"Tam","maxHP":-3,"currentHP":0}"#).unwrap();
        assert_eq!(c.max_hp_or_derived(), 10);
        assert_eq!(c.current_hp_or_full(), 0);

        let hit = apply_damage(&c, 1);
        assert_eq!(hit.max_hp, Some(10));
        assert_eq!(hit.current_hp, Some(0));
        assert!(hit.is_defeated);

        let healed = apply_healing(&c, 4);
        assert_eq!(healed.current_hp, Some(4));
        assert_eq!(hp_status(4, healed.max_hp_or_derived()), HpStatus::Wounded);

        let built = Character::new("Tam", "Bard").with_hp(5, -3);
        assert_eq!(built.current_hp, Some(0));
        assert_eq!(built.max_hp_or_derived(), 10);
    }

    #[test]
    fn damage_initializes_missing_hp() {
        let hit = apply_damage(&with_con(14), 5);
        assert_eq!(hit.max_hp, Some(20));
        assert_eq!(hit.current_hp, Some(15));
    }

    #[test]
    fn status_bands() {
        assert_eq!(hp_status(0, 20), HpStatus::Defeated);
        assert_eq!(hp_status(5, 20), HpStatus::Critical);
        assert_eq!(hp_status(6, 20), HpStatus::Wounded);
        assert_eq!(hp_status(10, 20), HpStatus::Wounded);
        assert_eq!(hp_status(15, 20), HpStatus::Injured);
        assert_eq!(hp_status(19, 20), HpStatus::Healthy);
        assert_eq!(hp_status(20, 20), HpStatus::Full);
        assert_eq!(hp_status(3, 0), HpStatus::Defeated);
    }

    #[test]
    fn hostility_keywords() {
        assert!(is_hostile_name("Goblin Ambush"));
        assert!(is_hostile_name("the WOLF pack"));
        assert!(!is_hostile_name("Haggling at the Market"));
    }
}
