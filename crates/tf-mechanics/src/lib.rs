//! Rules engine for Taleforge encounters.
//!
//! Provides d20 ability checks, the skill/ability registry, the health and
//! progression models, and reward and inventory bookkeeping. Every operation
//! takes its inputs by reference and returns a new value; randomness is
//! injected through a [`rand::Rng`] so callers decide how it is seeded.

pub mod ability;
pub mod character;
pub mod dice;
pub mod error;
pub mod health;
pub mod inventory;
pub mod progression;
pub mod resolution;

pub use ability::{Ability, AbilityScores, calculate_modifier, skill_ability};
pub use character::Character;
pub use dice::{CheckRoll, DiceRoll, Die, RollMode, roll_check, roll_dice, roll_die};
pub use error::{MechError, MechResult};
pub use health::{HpStatus, apply_damage, apply_healing, calculate_damage, calculate_max_hp};
pub use inventory::{InventoryItem, Rewards, RewardSpec, process_rewards};
pub use progression::{LevelProgress, XpAward, award_xp, calculate_encounter_xp, calculate_level};
pub use resolution::{Difficulty, OutcomeTier};
