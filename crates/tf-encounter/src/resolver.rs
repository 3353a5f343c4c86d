//! Single-round encounter resolution.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use tf_mechanics::inventory::rewards::scale_percent;
use tf_mechanics::inventory::{roll_item_drop_boosted, roll_notation};
use tf_mechanics::{
    Character, CheckRoll, OutcomeTier, Rewards, calculate_damage, calculate_encounter_xp,
    roll_check,
};

use crate::config::EngineConfig;
use crate::error::{EncounterError, EncounterResult};
use crate::narrator::{
    NarrationContext, Narrator, Perspective, StorySettings, narrate_with_fallback,
};
use crate::penalty::{Penalties, classify_penalty_category, select_penalties};
use crate::template::{EncounterAction, EncounterTemplate, should_deal_damage};

/// Drop-chance boost applied to every item on a critical success, in percent.
pub const CRITICAL_DROP_BOOST: u32 = 150;

/// Everything that came of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The action label that was resolved.
    pub action: String,
    /// Prose describing what happened.
    pub narration: String,
    /// The check, absent for actions that need no roll.
    pub roll: Option<CheckRoll>,
    /// Outcome tier.
    pub outcome: OutcomeTier,
    /// Rewards on success tiers.
    pub rewards: Option<Rewards>,
    /// Penalties on failure tiers.
    pub penalties: Option<Penalties>,
    /// Faction standing changes for this tier.
    pub affected_factions: Option<BTreeMap<String, i32>>,
    /// HP the character loses.
    pub hp_damage: i32,
    /// One-line damage report for hostile encounters.
    pub damage_description: Option<String>,
}

impl Resolution {
    /// An automatic success for an action with no skill attached.
    fn unrolled(action: &EncounterAction) -> Self {
        Self {
            action: action.label.clone(),
            narration: action.description.clone(),
            roll: None,
            outcome: OutcomeTier::Success,
            rewards: None,
            penalties: None,
            affected_factions: None,
            hp_damage: 0,
            damage_description: None,
        }
    }
}

/// Resolves encounter actions, delegating prose to a [`Narrator`].
pub struct EncounterEngine<N> {
    narrator: N,
    config: EngineConfig,
}

impl<N: Narrator> EncounterEngine<N> {
    /// Create an engine with default configuration.
    pub fn new(narrator: N) -> Self {
        Self::with_config(narrator, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(narrator: N, config: EngineConfig) -> Self {
        Self { narrator, config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one action chosen by `character`.
    ///
    /// Fails only when `action_label` is not offered by the template.
    /// Narration problems fall back to the template's consequence text.
    pub async fn resolve<R>(
        &self,
        template: &EncounterTemplate,
        action_label: &str,
        character: &Character,
        settings: &StorySettings,
        rng: &mut R,
    ) -> EncounterResult<Resolution>
    where
        R: Rng + Send,
    {
        let action = lookup_action(template, action_label)?;
        let Some(skill) = action.skill.as_deref() else {
            return Ok(Resolution::unrolled(action));
        };

        let modifier = character.stats.skill_modifier(skill);
        let roll = roll_check(rng, modifier, action.advantage, action.disadvantage);
        Ok(self.settle(template, action, character, settings, roll, rng).await)
    }

    /// Resolve an action against a check rolled elsewhere, e.g. physical dice.
    pub async fn resolve_with_roll<R>(
        &self,
        template: &EncounterTemplate,
        action_label: &str,
        character: &Character,
        settings: &StorySettings,
        roll: CheckRoll,
        rng: &mut R,
    ) -> EncounterResult<Resolution>
    where
        R: Rng + Send,
    {
        let action = lookup_action(template, action_label)?;
        if action.skill.is_none() {
            return Ok(Resolution::unrolled(action));
        }
        Ok(self.settle(template, action, character, settings, roll, rng).await)
    }

    async fn settle<R>(
        &self,
        template: &EncounterTemplate,
        action: &EncounterAction,
        character: &Character,
        settings: &StorySettings,
        roll: CheckRoll,
        rng: &mut R,
    ) -> Resolution
    where
        R: Rng + Send,
    {
        let dc = template.difficulty.dc();
        let outcome = OutcomeTier::classify(&roll, dc);
        tracing::debug!(total = roll.total, dc, %outcome, "classified check");

        let context = NarrationContext {
            settings: settings.clone(),
            encounter_name: template.name.clone(),
            encounter_description: template.description.clone(),
            action: action.label.clone(),
            character_name: character.name.clone(),
            character_class: character.class.clone(),
            roll_total: roll.total,
            natural_roll: roll.natural_roll,
            modifier: roll.modifier,
            outcome,
            fallback: template.consequences.for_tier(outcome).to_string(),
        };
        let narration =
            narrate_with_fallback(&self.narrator, &context, self.config.narration_timeout).await;

        let (hp_damage, damage_description) = if should_deal_damage(template) {
            let damage = calculate_damage(
                rng,
                outcome,
                character.max_hp_or_derived(),
                template.difficulty,
            );
            (damage, Some(describe_damage(settings, &character.name, damage)))
        } else {
            (0, None)
        };

        let (rewards, penalties) = if outcome.is_success() {
            (Some(roll_rewards(rng, template, outcome, character.level)), None)
        } else {
            (None, Some(roll_penalties(rng, template, outcome)))
        };

        let affected_factions = template.faction_deltas(outcome).cloned();

        tracing::info!(
            encounter = %template.name,
            action = %action.label,
            character = %character.name,
            %outcome,
            hp_damage,
            "resolved encounter action"
        );

        Resolution {
            action: action.label.clone(),
            narration,
            roll: Some(roll),
            outcome,
            rewards,
            penalties,
            affected_factions,
            hp_damage,
            damage_description,
        }
    }
}

fn lookup_action<'a>(
    template: &'a EncounterTemplate,
    label: &str,
) -> EncounterResult<&'a EncounterAction> {
    template.action(label).ok_or_else(|| EncounterError::UnknownAction {
        label: label.to_string(),
        suggestion: template.closest_action(label).map(str::to_string),
    })
}

/// Rewards for a success tier.
///
/// Template XP is scaled by the outcome multiplier; a template without XP
/// falls back to the difficulty-based encounter XP for the character's level.
/// Critical successes boost every item's drop chance.
pub fn roll_rewards(
    rng: &mut impl Rng,
    template: &EncounterTemplate,
    outcome: OutcomeTier,
    level: u32,
) -> Rewards {
    let percent = outcome.reward_percent();
    let xp = if template.rewards.xp > 0 {
        scale_percent(template.rewards.xp, percent)
    } else {
        calculate_encounter_xp(template.difficulty, outcome, level)
    };
    let gold = scale_percent(roll_notation(rng, &template.rewards.gold), percent);

    let items = if percent >= 100 {
        let boost = if outcome == OutcomeTier::CriticalSuccess {
            CRITICAL_DROP_BOOST
        } else {
            100
        };
        template
            .rewards
            .items
            .iter()
            .filter_map(|entry| roll_item_drop_boosted(rng, entry, boost))
            .collect()
    } else {
        Vec::new()
    };

    Rewards { xp, gold, items }
}

/// Penalties for a failure tier. Critical failures also forfeit half the
/// encounter's gold roll.
pub fn roll_penalties(
    rng: &mut impl Rng,
    template: &EncounterTemplate,
    outcome: OutcomeTier,
) -> Penalties {
    let severe = outcome == OutcomeTier::CriticalFailure;
    let category = classify_penalty_category(template);
    let messages = select_penalties(rng, category, severe);
    let gold_lost = if severe {
        roll_notation(rng, &template.rewards.gold) / 2
    } else {
        0
    };
    Penalties {
        messages,
        gold_lost,
    }
}

fn describe_damage(settings: &StorySettings, name: &str, damage: i32) -> String {
    let subject = settings.subject(name);
    let third = settings.perspective == Perspective::ThirdPerson;
    match (damage > 0, third) {
        (true, true) => format!("{subject} takes {damage} damage."),
        (true, false) => format!("{subject} take {damage} damage."),
        (false, true) => format!("{subject} escapes unharmed."),
        (false, false) => format!("{subject} escape unharmed."),
    }
}
