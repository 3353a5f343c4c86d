//! Penalty message tables for failed actions.
//!
//! Failures pick one or two flavour lines from a category table; critical
//! failures draw from a harsher table instead.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::template::{EncounterCategory, EncounterTemplate};

/// Penalty flavour family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PenaltyCategory {
    /// Fights and ambushes.
    Hostile,
    /// Negotiation and trade.
    Social,
    /// Weather, terrain, traps.
    Environmental,
    /// Everything else.
    Default,
}

impl std::fmt::Display for PenaltyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PenaltyCategory::Hostile => "hostile",
            PenaltyCategory::Social => "social",
            PenaltyCategory::Environmental => "environmental",
            PenaltyCategory::Default => "default",
        };
        f.write_str(s)
    }
}

/// Penalties produced by a failed action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalties {
    /// Human-readable penalty lines.
    pub messages: Vec<String>,
    /// Gold the character should lose; clamped when applied.
    #[serde(default)]
    pub gold_lost: u32,
}

impl Penalties {
    /// True if there is nothing to report or deduct.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.gold_lost == 0
    }
}

const HOSTILE_CATEGORY_KEYWORDS: &[&str] = &[
    "goblin", "bandit", "orc", "wolf", "troll", "ambush", "fight", "battle", "attack", "monster",
    "beast", "undead", "skeleton", "dragon",
];

const SOCIAL_KEYWORDS: &[&str] = &[
    "negotiat", "merchant", "noble", "trade", "persuad", "council", "court", "diplomat", "tavern",
    "bargain", "audience",
];

const ENVIRONMENTAL_KEYWORDS: &[&str] = &[
    "storm", "river", "cliff", "trap", "cave", "swamp", "mountain", "ravine", "blizzard", "forest",
    "flood", "rockslide",
];

const HOSTILE_PENALTIES: &[&str] = &[
    "You take a glancing blow.",
    "Your footing slips and you lose ground.",
    "Your weapon arm aches from a poor parry.",
    "The enemy presses the advantage.",
];

const HOSTILE_SEVERE: &[&str] = &[
    "A brutal strike leaves you reeling.",
    "Your weapon is knocked from your grasp.",
    "You are surrounded and cut off from retreat.",
    "Blood loss clouds your vision.",
];

const SOCIAL_PENALTIES: &[&str] = &[
    "Your reputation suffers a small blow.",
    "They regard you with suspicion.",
    "The conversation turns cold.",
    "You overpay for the privilege of being heard.",
];

const SOCIAL_SEVERE: &[&str] = &[
    "You are publicly humiliated.",
    "Word of your blunder spreads quickly.",
    "You have made a lasting enemy.",
    "Doors that were open are now firmly shut.",
];

const ENVIRONMENTAL_PENALTIES: &[&str] = &[
    "You are soaked and shivering.",
    "Scrapes and bruises slow you down.",
    "You lose precious time finding another way.",
    "Some of your supplies are ruined.",
];

const ENVIRONMENTAL_SEVERE: &[&str] = &[
    "You are swept away and badly battered.",
    "A fall leaves you limping.",
    "Your pack is lost to the elements.",
    "You are hopelessly lost for hours.",
];

const DEFAULT_PENALTIES: &[&str] = &[
    "Things do not go as planned.",
    "You lose some time.",
    "Your confidence is shaken.",
];

const DEFAULT_SEVERE: &[&str] = &[
    "Everything that could go wrong does.",
    "The setback will take a long time to recover from.",
    "You are exhausted and demoralised.",
];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Categorise an encounter for penalty flavour.
///
/// An explicit template category wins. Without one, keywords in the name and
/// description decide, checked hostile first, then social, then environmental.
pub fn classify_penalty_category(template: &EncounterTemplate) -> PenaltyCategory {
    if let Some(category) = template.category {
        return match category {
            EncounterCategory::Hostile => PenaltyCategory::Hostile,
            EncounterCategory::Social => PenaltyCategory::Social,
            EncounterCategory::Environmental => PenaltyCategory::Environmental,
            EncounterCategory::Neutral => PenaltyCategory::Default,
        };
    }

    let text = format!("{} {}", template.name, template.description).to_lowercase();
    if contains_any(&text, HOSTILE_CATEGORY_KEYWORDS) {
        PenaltyCategory::Hostile
    } else if contains_any(&text, SOCIAL_KEYWORDS) {
        PenaltyCategory::Social
    } else if contains_any(&text, ENVIRONMENTAL_KEYWORDS) {
        PenaltyCategory::Environmental
    } else {
        PenaltyCategory::Default
    }
}

/// The message table for a category and severity.
pub fn penalty_table(category: PenaltyCategory, severe: bool) -> &'static [&'static str] {
    match (category, severe) {
        (PenaltyCategory::Hostile, false) => HOSTILE_PENALTIES,
        (PenaltyCategory::Hostile, true) => HOSTILE_SEVERE,
        (PenaltyCategory::Social, false) => SOCIAL_PENALTIES,
        (PenaltyCategory::Social, true) => SOCIAL_SEVERE,
        (PenaltyCategory::Environmental, false) => ENVIRONMENTAL_PENALTIES,
        (PenaltyCategory::Environmental, true) => ENVIRONMENTAL_SEVERE,
        (PenaltyCategory::Default, false) => DEFAULT_PENALTIES,
        (PenaltyCategory::Default, true) => DEFAULT_SEVERE,
    }
}

/// Pick one or two distinct penalty lines.
pub fn select_penalties(
    rng: &mut impl Rng,
    category: PenaltyCategory,
    severe: bool,
) -> Vec<String> {
    let table = penalty_table(category, severe);
    let count = rng.random_range(1..=2usize).min(table.len());
    let mut picked: Vec<String> = Vec::with_capacity(count);
    while picked.len() < count {
        let line = table[rng.random_range(0..table.len())];
        if !picked.iter().any(|p| p == line) {
            picked.push(line.to_string());
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tf_mechanics::Difficulty;

    fn template(name: &str, description: &str) -> EncounterTemplate {
        let mut t = EncounterTemplate::new(name, Difficulty::Medium);
        t.description = description.to_string();
        t
    }

    #[test]
    fn keyword_categories() {
        assert_eq!(
            classify_penalty_category(&template("Goblin Ambush", "")),
            PenaltyCategory::Hostile
        );
        assert_eq!(
            classify_penalty_category(&template("The Bazaar", "A merchant eyes your purse.")),
            PenaltyCategory::Social
        );
        assert_eq!(
            classify_penalty_category(&template("Crossing", "The river runs high.")),
            PenaltyCategory::Environmental
        );
        assert_eq!(
            classify_penalty_category(&template("Quiet Road", "")),
            PenaltyCategory::Default
        );
    }

    #[test]
    fn explicit_category_wins() {
        let mut t = template("Goblin Market", "Goblins haggle over trinkets.");
        t.category = Some(EncounterCategory::Social);
        assert_eq!(classify_penalty_category(&t), PenaltyCategory::Social);

        t.category = Some(EncounterCategory::Neutral);
        assert_eq!(classify_penalty_category(&t), PenaltyCategory::Default);
    }

    #[test]
    fn selects_one_or_two_distinct_lines() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let lines = select_penalties(&mut rng, PenaltyCategory::Hostile, false);
            assert!((1..=2).contains(&lines.len()));
            if lines.len() == 2 {
                assert_ne!(lines[0], lines[1]);
            }
            assert!(lines.iter().all(|l| HOSTILE_PENALTIES.contains(&l.as_str())));
        }
    }

    #[test]
    fn severe_lines_come_from_severe_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let lines = select_penalties(&mut rng, PenaltyCategory::Social, true);
            assert!(lines.iter().all(|l| SOCIAL_SEVERE.contains(&l.as_str())));
        }
    }

    #[test]
    fn empty_penalties() {
        assert!(Penalties::default().is_empty());
        let p = Penalties {
            messages: Vec::new(),
            gold_lost: 3,
        };
        assert!(!p.is_empty());
    }
}
