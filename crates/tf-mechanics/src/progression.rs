//! Experience, levels, and level-up effects.
//!
//! Levels follow a fixed 20-step XP table. Gaining a level recomputes
//! maximum HP from the class hit die and restores the character to full
//! health.

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::character::Character;
use crate::dice::Die;
use crate::resolution::{Difficulty, OutcomeTier};

/// Highest attainable level.
pub const MAX_LEVEL: u32 = 20;

/// XP needed to reach each level; index 0 is level 1.
pub const XP_THRESHOLDS: [u32; MAX_LEVEL as usize] = [
    0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000, 120_000,
    140_000, 165_000, 195_000, 225_000, 265_000, 305_000, 355_000,
];

/// Levels that grant an ability score improvement.
pub const ASI_LEVELS: [u32; 5] = [4, 8, 12, 16, 19];

/// Floor on the level-scaling factor for encounter XP, in percent.
const MIN_LEVEL_SCALING: u32 = 25;
/// Encounter XP lost per level above 1, in percent.
const LEVEL_SCALING_STEP: u32 = 5;

/// The highest level whose threshold is at or below `xp`.
pub fn calculate_level(xp: u32) -> u32 {
    XP_THRESHOLDS.iter().take_while(|&&t| t <= xp).count() as u32
}

/// XP threshold for a level, clamped to the table.
pub fn threshold_for(level: u32) -> u32 {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    XP_THRESHOLDS[idx]
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// The level `xp` corresponds to.
    pub level: u32,
    /// XP earned since reaching this level.
    pub current: u32,
    /// XP between this level and the next (0 at max level).
    pub required: u32,
    /// `current / required` as a whole percentage (100 at max level).
    pub percentage: u32,
    /// True at level 20.
    pub is_max_level: bool,
}

/// How far `xp` has progressed into its level.
pub fn level_progress(xp: u32) -> LevelProgress {
    let level = calculate_level(xp);
    let floor = threshold_for(level);
    let current = xp - floor;

    if level >= MAX_LEVEL {
        return LevelProgress {
            level,
            current,
            required: 0,
            percentage: 100,
            is_max_level: true,
        };
    }

    let required = threshold_for(level + 1) - floor;
    LevelProgress {
        level,
        current,
        required,
        percentage: current * 100 / required,
        is_max_level: false,
    }
}

/// True if reaching `level` grants an ability score improvement.
pub fn level_grants_asi(level: u32) -> bool {
    ASI_LEVELS.contains(&level)
}

/// The hit die for a class. Unknown classes use a d8.
pub fn hit_die(class: &str) -> Die {
    match class.trim().to_lowercase().as_str() {
        "barbarian" => Die::D12,
        "fighter" | "paladin" | "ranger" => Die::D10,
        "sorcerer" | "wizard" => Die::D6,
        _ => Die::D8,
    }
}

/// Maximum HP for a class at a level.
///
/// Level 1 grants the full hit die plus the Constitution modifier; each
/// later level grants `hit_die / 2 + 1` plus the modifier. Never below 1.
pub fn progression_max_hp(class: &str, level: u32, con_modifier: i32) -> i32 {
    let die = hit_die(class).sides() as i32;
    let first = die + con_modifier;
    let per_level = die / 2 + 1 + con_modifier;
    let extra_levels = level.clamp(1, MAX_LEVEL) as i32 - 1;
    (first + per_level * extra_levels).max(1)
}

/// The result of awarding experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    /// The updated character.
    pub character: Character,
    /// XP added by this award.
    pub xp_gained: u32,
    /// Level before the award.
    pub previous_level: u32,
    /// Level after the award.
    pub new_level: u32,
    /// Ability score improvement levels crossed by this award.
    pub asi_levels: Vec<u32>,
}

impl XpAward {
    /// True if the award raised the character's level.
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }

    /// Number of levels gained.
    pub fn levels_gained(&self) -> u32 {
        self.new_level.saturating_sub(self.previous_level)
    }
}

/// Add experience, recompute level, and apply level-up effects.
///
/// Whenever the level changes, maximum HP is recomputed from the class
/// hit-die table. A level increase also restores current HP to that maximum;
/// a decrease (a record whose stored level was ahead of its XP) only clamps
/// current HP to the new maximum.
pub fn award_xp(character: &Character, gained: u32) -> XpAward {
    let mut next = character.clone();
    next.xp = character.xp.saturating_add(gained);

    let previous_level = character.level;
    let new_level = calculate_level(next.xp);
    next.level = new_level;

    let mut asi_levels = Vec::new();
    if new_level != previous_level {
        let con = next.stats.modifier(Ability::Constitution);
        let max = progression_max_hp(&next.class, new_level, con);
        next.max_hp = Some(max);
        if new_level > previous_level {
            next.current_hp = Some(max);
            next.is_defeated = false;
            asi_levels = (previous_level + 1..=new_level)
                .filter(|l| level_grants_asi(*l))
                .collect();
            tracing::info!(
                character = %next.name,
                from = previous_level,
                to = new_level,
                max_hp = max,
                "level up"
            );
        } else {
            next.current_hp = Some(next.current_hp_or_full());
            tracing::debug!(
                character = %next.name,
                from = previous_level,
                to = new_level,
                max_hp = max,
                "level corrected from xp"
            );
        }
    }

    XpAward {
        character: next,
        xp_gained: gained,
        previous_level,
        new_level,
        asi_levels,
    }
}

/// Experience for resolving an encounter.
///
/// `base_xp(difficulty) * outcome multiplier * level scaling`, floored. The
/// level scaling drops 5% per level above 1 and bottoms out at 25%, so easy
/// encounters pay little to high-level characters.
pub fn calculate_encounter_xp(
    difficulty: Difficulty,
    outcome: OutcomeTier,
    player_level: u32,
) -> u32 {
    let steps = player_level.saturating_sub(1).saturating_mul(LEVEL_SCALING_STEP);
    let scaling = 100u32.saturating_sub(steps).max(MIN_LEVEL_SCALING);
    difficulty.base_xp() * outcome.xp_percent() * scaling / 10_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityScores;

    #[test]
    fn level_boundaries() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(299), 1);
        assert_eq!(calculate_level(300), 2);
        assert_eq!(calculate_level(899), 2);
        assert_eq!(calculate_level(900), 3);
        assert_eq!(calculate_level(354_999), 19);
        assert_eq!(calculate_level(355_000), 20);
        assert_eq!(calculate_level(u32::MAX), 20);
    }

    #[test]
    fn thresholds_ascend() {
        assert!(XP_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn progress_within_level() {
        let p = level_progress(600);
        assert_eq!(p.level, 2);
        assert_eq!(p.current, 300);
        assert_eq!(p.required, 600);
        assert_eq!(p.percentage, 50);
        assert!(!p.is_max_level);
    }

    #[test]
    fn progress_at_max_level() {
        let p = level_progress(400_000);
        assert_eq!(p.level, 20);
        assert_eq!(p.current, 45_000);
        assert_eq!(p.required, 0);
        assert_eq!(p.percentage, 100);
        assert!(p.is_max_level);
    }

    #[test]
    fn asi_milestones() {
        let asi: Vec<u32> = (1..=20).filter(|l| level_grants_asi(*l)).collect();
        assert_eq!(asi, vec![4, 8, 12, 16, 19]);
    }

    #[test]
    fn hit_dice() {
        assert_eq!(hit_die("Barbarian"), Die::D12);
        assert_eq!(hit_die("fighter"), Die::D10);
        assert_eq!(hit_die("Wizard"), Die::D6);
        assert_eq!(hit_die("Rogue"), Die::D8);
        assert_eq!(hit_die("Chronomancer"), Die::D8);
    }

    #[test]
    fn max_hp_by_level() {
        assert_eq!(progression_max_hp("Fighter", 1, 0), 10);
        assert_eq!(progression_max_hp("Fighter", 2, 0), 16);
        assert_eq!(progression_max_hp("Fighter", 3, 2), 12 + 8 * 2);
        assert_eq!(progression_max_hp("Wizard", 1, -5), 1);
    }

    #[test]
    fn crossing_threshold_levels_up_and_heals() {
        let c = Character::new("Bran", "Fighter")
            .with_hp(3, 10)
            .with_xp(250, 1);
        let award = award_xp(&c, 100);
        assert!(award.leveled_up());
        assert_eq!(award.character.level, 2);
        assert_eq!(award.character.xp, 350);
        assert_eq!(award.character.max_hp, Some(16));
        assert_eq!(award.character.current_hp, award.character.max_hp);
    }

    #[test]
    fn no_level_up_keeps_hp() {
        let c = Character::new("Bran", "Fighter").with_hp(3, 10).with_xp(10, 1);
        let award = award_xp(&c, 50);
        assert!(!award.leveled_up());
        assert_eq!(award.character.xp, 60);
        assert_eq!(award.character.current_hp, Some(3));
        assert_eq!(award.character.max_hp, Some(10));
    }

    #[test]
    fn stale_level_is_corrected_without_healing() {
        let c = Character::new("Bran", "Fighter").with_hp(30, 44).with_xp(0, 5);
        let award = award_xp(&c, 10);
        assert_eq!(award.new_level, 1);
        assert!(!award.leveled_up());
        assert!(award.asi_levels.is_empty());
        assert_eq!(award.character.max_hp, Some(10));
        assert_eq!(award.character.current_hp, Some(10));

        let c = Character::new("Bran", "Fighter").with_hp(4, 44).with_xp(0, 5);
        let award = award_xp(&c, 10);
        assert_eq!(award.character.max_hp, Some(10));
        assert_eq!(award.character.current_hp, Some(4));
    }

    #[test]
    fn multi_level_jump_reports_asi() {
        let c = Character::new("Vex", "Barbarian")
            .with_stats(AbilityScores::new(16, 12, 14, 8, 10, 10))
            .with_xp(0, 1);
        let award = award_xp(&c, 6_500);
        assert_eq!(award.new_level, 5);
        assert_eq!(award.levels_gained(), 4);
        assert_eq!(award.asi_levels, vec![4]);
        // 12 + 2, then 4 levels of 7 + 2
        assert_eq!(award.character.max_hp, Some(14 + 4 * 9));
    }

    #[test]
    fn level_up_revives() {
        let mut c = Character::new("Bran", "Fighter").with_hp(0, 10).with_xp(299, 1);
        c.is_defeated = true;
        let award = award_xp(&c, 1);
        assert!(!award.character.is_defeated);
        assert_eq!(award.character.current_hp, Some(16));
    }

    #[test]
    fn encounter_xp_table() {
        let level_one = |difficulty, outcome| calculate_encounter_xp(difficulty, outcome, 1);
        assert_eq!(level_one(Difficulty::Medium, OutcomeTier::Success), 50);
        assert_eq!(level_one(Difficulty::Deadly, OutcomeTier::CriticalSuccess), 300);
        assert_eq!(level_one(Difficulty::Trivial, OutcomeTier::CriticalFailure), 2);
        assert_eq!(level_one(Difficulty::Hard, OutcomeTier::Failure), 50);
    }

    #[test]
    fn encounter_xp_scales_down_with_level() {
        assert_eq!(calculate_encounter_xp(Difficulty::Hard, OutcomeTier::Success, 2), 95);
        assert_eq!(calculate_encounter_xp(Difficulty::Hard, OutcomeTier::Success, 11), 50);
        // 1 - 15 * 0.05 = 0.25, the floor
        assert_eq!(calculate_encounter_xp(Difficulty::Hard, OutcomeTier::Success, 16), 25);
        assert_eq!(calculate_encounter_xp(Difficulty::Hard, OutcomeTier::Success, 20), 25);
    }
}
