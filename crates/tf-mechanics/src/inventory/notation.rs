//! Dice notation (`2d6`, `1d20+5`, `d8-1`) and item drop strings (`gem:25%`).

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::roll_dice;
use crate::error::{MechError, MechResult};

/// Largest dice count accepted in a notation string.
const MAX_DICE: u32 = 1_000;

/// A parsed `NdM±B` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceNotation {
    /// Number of dice.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
    /// Flat bonus (may be negative).
    pub bonus: i32,
}

impl DiceNotation {
    /// Roll the expression. Totals clamp to the `u32` range.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        let dice = roll_dice(rng, self.count, self.sides);
        (i64::from(dice.total()) + i64::from(self.bonus)).clamp(0, i64::from(u32::MAX)) as u32
    }
}

impl FromStr for DiceNotation {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let invalid = || MechError::InvalidNotation(s.to_string());
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let (count, rest) = compact.split_once('d').ok_or_else(invalid)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };

        let (sides, bonus) = match rest.find(['+', '-']) {
            Some(pos) => {
                let bonus = rest[pos..].parse::<i32>().map_err(|_| invalid())?;
                (&rest[..pos], bonus)
            }
            None => (rest, 0),
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid())?;

        if sides == 0 || count > MAX_DICE {
            return Err(invalid());
        }
        Ok(Self {
            count,
            sides,
            bonus,
        })
    }
}

impl std::fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// Parse the leading integer of a string, the way a lenient form field would.
///
/// `"15"` and `"15gp"` give 15; negative or non-numeric input gives 0.
pub fn parse_leading_int(s: &str) -> u32 {
    let digits: String = s
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Roll a notation string, falling back to its leading integer (or 0).
pub fn roll_notation(rng: &mut impl Rng, notation: &str) -> u32 {
    match notation.parse::<DiceNotation>() {
        Ok(dice) => dice.roll(rng),
        Err(_) => parse_leading_int(notation),
    }
}

/// A `key:NN%` drop entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    /// Catalog key of the item.
    pub key: String,
    /// Drop chance in percent, 0 to 100.
    pub chance: u32,
}

impl FromStr for ItemDrop {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let invalid = || MechError::InvalidItemDrop(s.to_string());
        let (key, chance) = match s.split_once(':') {
            Some((key, pct)) => {
                let pct = pct.trim();
                let pct = pct.strip_suffix('%').unwrap_or(pct).trim();
                (key.trim(), pct.parse::<u32>().map_err(|_| invalid())?.min(100))
            }
            None => (s.trim(), 100),
        };
        if key.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            key: key.to_string(),
            chance,
        })
    }
}

impl ItemDrop {
    /// One uniform draw against the chance scaled by `boost_percent`, capped at 100%.
    pub fn roll(&self, rng: &mut impl Rng, boost_percent: u32) -> bool {
        let chance = (f64::from(self.chance) * f64::from(boost_percent) / 100.0).min(100.0);
        rng.random_range(0.0..100.0) < chance
    }
}

/// Roll a drop entry once. Returns the item key if it dropped.
pub fn roll_item_drop(rng: &mut impl Rng, entry: &str) -> Option<String> {
    roll_item_drop_boosted(rng, entry, 100)
}

/// Roll a drop entry with its chance scaled by `boost_percent`.
///
/// Malformed entries never drop.
pub fn roll_item_drop_boosted(
    rng: &mut impl Rng,
    entry: &str,
    boost_percent: u32,
) -> Option<String> {
    match entry.parse::<ItemDrop>() {
        Ok(item) => item.roll(rng, boost_percent).then_some(item.key),
        Err(e) => {
            tracing::warn!(error = %e, "skipping item drop");
            None
        }
    }
}
