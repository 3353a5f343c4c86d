//! Ability scores, modifiers, and the skill registry.

use serde::{Deserialize, Serialize};

/// Score assumed for any ability a character record leaves out.
pub const DEFAULT_SCORE: i32 = 10;

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    /// Physical power.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Endurance and health.
    Constitution,
    /// Reasoning and memory.
    Intelligence,
    /// Perception and insight.
    Wisdom,
    /// Force of personality.
    Charisma,
}

impl Ability {
    /// All six abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Full display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    /// Three-letter abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Parse a full name or abbreviation, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s) || a.abbreviation().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Skill names and the ability that backs each of them.
pub const SKILLS: &[(&str, Ability)] = &[
    ("Athletics", Ability::Strength),
    ("Acrobatics", Ability::Dexterity),
    ("Sleight of Hand", Ability::Dexterity),
    ("Stealth", Ability::Dexterity),
    ("Endurance", Ability::Constitution),
    ("Arcana", Ability::Intelligence),
    ("History", Ability::Intelligence),
    ("Investigation", Ability::Intelligence),
    ("Nature", Ability::Intelligence),
    ("Religion", Ability::Intelligence),
    ("Animal Handling", Ability::Wisdom),
    ("Insight", Ability::Wisdom),
    ("Medicine", Ability::Wisdom),
    ("Perception", Ability::Wisdom),
    ("Survival", Ability::Wisdom),
    ("Deception", Ability::Charisma),
    ("Intimidation", Ability::Charisma),
    ("Performance", Ability::Charisma),
    ("Persuasion", Ability::Charisma),
];

/// Look up the ability behind a skill.
///
/// Matching ignores case, spaces, and underscores, so `sleight_of_hand` and
/// `Sleight of Hand` are the same skill. A raw ability name also resolves to
/// itself, which lets templates ask for a plain Strength check.
pub fn skill_ability(skill: &str) -> Option<Ability> {
    let wanted = normalize(skill);
    SKILLS
        .iter()
        .find(|(name, _)| normalize(name) == wanted)
        .map(|(_, ability)| *ability)
        .or_else(|| Ability::from_name(skill))
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The ability modifier for a score: `floor((score - 10) / 2)`.
pub fn calculate_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A character's six ability scores. Missing scores read as 10.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AbilityScores {
    /// Strength score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    /// Dexterity score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<i32>,
    /// Constitution score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constitution: Option<i32>,
    /// Intelligence score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<i32>,
    /// Wisdom score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<i32>,
    /// Charisma score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charisma: Option<i32>,
}

impl AbilityScores {
    /// Scores for all six abilities, in sheet order.
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength: Some(strength),
            dexterity: Some(dexterity),
            constitution: Some(constitution),
            intelligence: Some(intelligence),
            wisdom: Some(wisdom),
            charisma: Some(charisma),
        }
    }

    fn slot(&self, ability: Ability) -> Option<i32> {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// The score for an ability, defaulting to 10.
    pub fn score(&self, ability: Ability) -> i32 {
        self.slot(ability).unwrap_or(DEFAULT_SCORE)
    }

    /// Set the score for an ability.
    pub fn set(&mut self, ability: Ability, value: i32) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = Some(value);
    }

    /// The modifier for an ability.
    pub fn modifier(&self, ability: Ability) -> i32 {
        calculate_modifier(self.score(ability))
    }

    /// The modifier applied to a check with the given skill.
    ///
    /// Unknown skills fall back to an average score and so a +0 modifier.
    pub fn skill_modifier(&self, skill: &str) -> i32 {
        skill_ability(skill).map_or(calculate_modifier(DEFAULT_SCORE), |a| self.modifier(a))
    }
}
