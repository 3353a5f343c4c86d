//! Static item catalog.

use serde::{Deserialize, Serialize};

/// How rare an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    /// Found everywhere.
    #[default]
    Common,
    /// Found in shops of larger towns.
    Uncommon,
    /// Seldom seen.
    Rare,
    /// Treasure-hoard material.
    VeryRare,
    /// One of a kind.
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::VeryRare => write!(f, "very rare"),
            Self::Legendary => write!(f, "legendary"),
        }
    }
}

/// Catalog metadata for an item key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    /// Display name.
    pub name: String,
    /// Rarity band.
    pub rarity: Rarity,
    /// Value of one unit in gold.
    pub value: u32,
    /// Whether repeated units share one inventory entry.
    pub stackable: bool,
}

/// Known items: key, name, rarity, unit value, stackable.
pub const CATALOG: &[(&str, &str, Rarity, u32, bool)] = &[
    ("healing_potion", "Healing Potion", Rarity::Common, 50, true),
    ("greater_healing_potion", "Greater Healing Potion", Rarity::Uncommon, 150, true),
    ("antitoxin", "Antitoxin", Rarity::Common, 50, true),
    ("torch", "Torch", Rarity::Common, 1, true),
    ("rations", "Rations", Rarity::Common, 1, true),
    ("rope", "Hempen Rope", Rarity::Common, 1, true),
    ("arrows", "Arrows", Rarity::Common, 1, true),
    ("lockpicks", "Thieves' Tools", Rarity::Common, 25, false),
    ("dagger", "Dagger", Rarity::Common, 2, false),
    ("shortsword", "Shortsword", Rarity::Common, 10, false),
    ("longsword", "Longsword", Rarity::Common, 15, false),
    ("silver_dagger", "Silvered Dagger", Rarity::Uncommon, 100, false),
    ("chain_shirt", "Chain Shirt", Rarity::Common, 50, false),
    ("goblin_ear", "Goblin Ear", Rarity::Common, 1, true),
    ("wolf_pelt", "Wolf Pelt", Rarity::Common, 5, true),
    ("gemstone", "Gemstone", Rarity::Uncommon, 100, true),
    ("ancient_map", "Ancient Map", Rarity::Uncommon, 75, false),
    ("spell_scroll", "Spell Scroll", Rarity::Uncommon, 120, true),
    ("amulet_of_health", "Amulet of Health", Rarity::Rare, 500, false),
    ("bag_of_holding", "Bag of Holding", Rarity::Uncommon, 400, false),
    ("dragon_scale", "Dragon Scale", Rarity::VeryRare, 1_000, true),
    ("vorpal_blade", "Vorpal Blade", Rarity::Legendary, 25_000, false),
];

/// Look up an item. Unknown keys become a common, worthless item named after the key.
pub fn lookup_item(key: &str) -> ItemInfo {
    CATALOG
        .iter()
        .find(|(k, ..)| *k == key)
        .map(|&(_, name, rarity, value, stackable)| ItemInfo {
            name: name.to_string(),
            rarity,
            value,
            stackable,
        })
        .unwrap_or_else(|| ItemInfo {
            name: humanize_key(key),
            rarity: Rarity::Common,
            value: 0,
            stackable: true,
        })
}

/// `"ancient_map"` → `"Ancient Map"`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
