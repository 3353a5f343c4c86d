//! The persistent character record.

use serde::{Deserialize, Serialize};

use crate::ability::AbilityScores;
use crate::health;
use crate::inventory::InventoryItem;

fn first_level() -> u32 {
    1
}

/// A playable character as stored between encounters.
///
/// HP fields are optional so freshly created records can be initialised
/// lazily; see [`health::initialize_hp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    #[serde(rename = "characterName")]
    pub name: String,
    /// Class name (e.g. "Fighter"); keys the hit-die table.
    #[serde(rename = "characterClass", default)]
    pub class: String,
    /// The six ability scores.
    #[serde(default)]
    pub stats: AbilityScores,
    /// Current hit points.
    #[serde(rename = "currentHP", default, skip_serializing_if = "Option::is_none")]
    pub current_hp: Option<i32>,
    /// Maximum hit points.
    #[serde(rename = "maxHP", default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i32>,
    /// Accumulated experience.
    #[serde(default)]
    pub xp: u32,
    /// Character level, derived from `xp`.
    #[serde(default = "first_level")]
    pub level: u32,
    /// Gold pieces.
    #[serde(default)]
    pub gold: u32,
    /// Carried items, in acquisition order.
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// Set once HP reaches zero.
    #[serde(rename = "isDefeated", default)]
    pub is_defeated: bool,
}

impl Character {
    /// Create a level 1 character with average scores and no HP yet.
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            stats: AbilityScores::default(),
            current_hp: None,
            max_hp: None,
            xp: 0,
            level: 1,
            gold: 0,
            inventory: Vec::new(),
            is_defeated: false,
        }
    }

    /// Set the ability scores.
    pub fn with_stats(mut self, stats: AbilityScores) -> Self {
        self.stats = stats;
        self
    }

    /// Set current and maximum HP. A negative maximum is stored as 0.
    pub fn with_hp(mut self, current: i32, max: i32) -> Self {
        let max = max.max(0);
        self.max_hp = Some(max);
        self.current_hp = Some(current.clamp(0, max));
        self
    }

    /// Set experience and level together.
    pub fn with_xp(mut self, xp: u32, level: u32) -> Self {
        self.xp = xp;
        self.level = level;
        self
    }

    /// Set the gold purse.
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Maximum HP, derived from Constitution when the record has none.
    ///
    /// A stored maximum of zero or less counts as missing.
    pub fn max_hp_or_derived(&self) -> i32 {
        self.stored_max_hp().unwrap_or_else(|| health::calculate_max_hp(self))
    }

    /// The stored maximum HP, if it is positive.
    pub fn stored_max_hp(&self) -> Option<i32> {
        self.max_hp.filter(|max| *max > 0)
    }

    /// Current HP, treating a missing value as full health.
    pub fn current_hp_or_full(&self) -> i32 {
        let max = self.max_hp_or_derived();
        self.current_hp.unwrap_or(max).clamp(0, max)
    }

    /// Total quantity of an item carried, across all entries.
    pub fn item_count(&self, key: &str) -> u32 {
        self.inventory
            .iter()
            .filter(|i| i.key == key)
            .map(|i| i.quantity)
            .sum()
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, level {}) HP {}/{}",
            self.name,
            self.class,
            self.level,
            self.current_hp_or_full(),
            self.max_hp_or_derived()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Ability;

    #[test]
    fn deserializes_contract_names() {
        let json = r#"{
            "characterName": "Mira",
            "characterClass": "Rogue",
            "stats": {"Dexterity": 16, "Constitution": 12},
            "currentHP": 7,
            "maxHP": 11,
            "xp": 320,
            "level": 2,
            "gold": 15,
            "inventory": []
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.name, "Mira");
        assert_eq!(c.class, "Rogue");
        assert_eq!(c.stats.score(Ability::Dexterity), 16);
        assert_eq!(c.current_hp, Some(7));
        assert_eq!(c.max_hp, Some(11));
        assert_eq!(c.level, 2);
        assert!(!c.is_defeated);
    }

    #[test]
    fn minimal_record_gets_defaults() {
        let c: Character = serde_json::from_str(r#"{"characterName": "Tam"}"#).unwrap();
        assert_eq!(c.level, 1);
        assert_eq!(c.xp, 0);
        assert_eq!(c.max_hp, None);
        assert_eq!(c.max_hp_or_derived(), 10);
        assert_eq!(c.current_hp_or_full(), 10);
    }

    #[test]
    fn serializes_contract_names() {
        let c = Character::new("Tam", "Bard").with_hp(4, 9);
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["characterName"], "Tam");
        assert_eq!(value["currentHP"], 4);
        assert_eq!(value["maxHP"], 9);
    }

    #[test]
    fn with_hp_clamps() {
        let c = Character::new("Tam", "Bard").with_hp(40, 9);
        assert_eq!(c.current_hp, Some(9));
    }

    #[test]
    fn display() {
        let c = Character::new("Tam", "Bard").with_hp(4, 9);
        assert_eq!(c.to_string(), "Tam (Bard, level 1) HP 4/9");
    }
}
