//! Inventory, gold, and rewards.
//!
//! Ledger operations take a character by reference and return an updated
//! copy. Removing gold is a soft failure: it reports [`InsufficientGold`]
//! and leaves the caller's character untouched.

pub mod catalog;
pub mod notation;
pub mod rewards;

pub use catalog::{ItemInfo, Rarity, lookup_item};
pub use notation::{DiceNotation, ItemDrop, roll_item_drop, roll_item_drop_boosted, roll_notation};
pub use rewards::{RewardSpec, Rewards, process_rewards};

use serde::{Deserialize, Serialize};

use crate::character::Character;

/// One entry in a character's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Catalog key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Rarity band.
    #[serde(default)]
    pub rarity: Rarity,
    /// Value of one unit in gold.
    #[serde(default)]
    pub value: u32,
    /// Units held in this entry.
    pub quantity: u32,
    /// Whether further units merge into this entry.
    #[serde(default)]
    pub stackable: bool,
}

impl InventoryItem {
    /// Build an entry from the catalog.
    pub fn from_catalog(key: &str, quantity: u32) -> Self {
        let info = lookup_item(key);
        Self {
            key: key.to_string(),
            name: info.name,
            rarity: info.rarity,
            value: info.value,
            quantity,
            stackable: info.stackable,
        }
    }
}

/// Returned when a character cannot pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient gold: have {available}, need {requested}")]
pub struct InsufficientGold {
    /// Gold the character holds.
    pub available: u32,
    /// Gold that was asked for.
    pub requested: u32,
}

/// Add units of an item, merging into an existing stack when possible.
pub fn add_item(character: &Character, key: &str, quantity: u32) -> Character {
    let mut next = character.clone();
    if quantity == 0 {
        return next;
    }
    match next
        .inventory
        .iter_mut()
        .find(|i| i.key == key && i.stackable)
    {
        Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
        None => next.inventory.push(InventoryItem::from_catalog(key, quantity)),
    }
    next
}

/// Remove units of an item, deleting entries that reach zero.
///
/// Removing more than is held removes everything; removing an item the
/// character lacks changes nothing.
pub fn remove_item(character: &Character, key: &str, quantity: u32) -> Character {
    let mut next = character.clone();
    let mut remaining = quantity;
    for entry in next.inventory.iter_mut().filter(|i| i.key == key) {
        if remaining == 0 {
            break;
        }
        let taken = remaining.min(entry.quantity);
        entry.quantity -= taken;
        remaining -= taken;
    }
    next.inventory.retain(|i| i.quantity > 0);
    next
}

/// Add gold.
pub fn add_gold(character: &Character, amount: u32) -> Character {
    let mut next = character.clone();
    next.gold = next.gold.saturating_add(amount);
    next
}

/// Remove gold, or report that the character cannot afford it.
pub fn remove_gold(character: &Character, amount: u32) -> Result<Character, InsufficientGold> {
    if character.gold < amount {
        return Err(InsufficientGold {
            available: character.gold,
            requested: amount,
        });
    }
    let mut next = character.clone();
    next.gold -= amount;
    Ok(next)
}
