//! Encounter resolution for Taleforge.
//!
//! Turns a player's chosen action into an outcome tier, rewards, penalties,
//! and HP damage; runs multi-round fights as a pure state machine; and folds
//! results back into a party member's record. Narration is delegated to a
//! [`Narrator`] and always falls back to authored text.
//!
//! ```no_run
//! use tf_encounter::{EncounterEngine, EncounterTemplate, StorySettings, TemplateNarrator};
//! use tf_mechanics::{Character, Difficulty};
//!
//! # async fn demo() -> tf_encounter::EncounterResult<()> {
//! let engine = EncounterEngine::new(TemplateNarrator);
//! let template = EncounterTemplate::new("Goblin Ambush", Difficulty::Medium);
//! let hero = Character::new("Mira", "Rogue");
//! let mut rng = engine.config().rng();
//! let resolution = engine
//!     .resolve(&template, "Attack", &hero, &StorySettings::default(), &mut rng)
//!     .await?;
//! println!("{}", resolution.narration);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod narrator;
pub mod party;
pub mod penalty;
pub mod resolver;
pub mod rounds;
pub mod template;

pub use config::EngineConfig;
pub use error::{EncounterError, EncounterResult};
pub use narrator::{
    NarrationContext, NarrationError, Narrator, NarratorTone, Perspective, StorySettings,
    TemplateNarrator, narrate_with_fallback,
};
pub use party::{EncounterOutcome, PartyUpdate, apply_encounter_outcome_to_party};
pub use penalty::{Penalties, PenaltyCategory};
pub use resolver::{EncounterEngine, Resolution};
pub use rounds::{
    CombatOutcome, EncounterSummary, RoundRecord, RoundState, apply_round,
    generate_encounter_summary, round_actions,
};
pub use template::{
    Consequences, EncounterAction, EncounterCategory, EncounterTemplate, should_deal_damage,
};
