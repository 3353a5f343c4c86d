//! Applying encounter results to a party member's record.

use tf_mechanics::inventory::{add_gold, add_item, lookup_item, remove_gold};
use tf_mechanics::{Character, Rewards, apply_damage, award_xp};

use crate::penalty::Penalties;
use crate::resolver::Resolution;
use crate::rounds::EncounterSummary;

/// The parts of a result that change a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterOutcome {
    /// Rewards to grant.
    pub rewards: Option<Rewards>,
    /// Penalties to apply.
    pub penalties: Option<Penalties>,
    /// HP to subtract.
    pub hp_damage: i32,
}

impl From<&Resolution> for EncounterOutcome {
    fn from(resolution: &Resolution) -> Self {
        Self {
            rewards: resolution.rewards.clone(),
            penalties: resolution.penalties.clone(),
            hp_damage: resolution.hp_damage,
        }
    }
}

impl From<&EncounterSummary> for EncounterOutcome {
    fn from(summary: &EncounterSummary) -> Self {
        let penalties = Penalties {
            messages: summary.penalties.clone(),
            gold_lost: summary.gold_lost,
        };
        Self {
            rewards: (!summary.rewards.is_empty()).then(|| summary.rewards.clone()),
            penalties: (!penalties.is_empty()).then_some(penalties),
            hp_damage: summary.hp_damage,
        }
    }
}

/// The party after an outcome was applied, with log lines for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyUpdate {
    /// Updated party; only the acting member differs.
    pub party: Vec<Character>,
    /// Index of the member that was updated.
    pub hero_index: usize,
    /// What the member gained, in order.
    pub reward_messages: Vec<String>,
    /// What the member lost, in order.
    pub penalty_messages: Vec<String>,
}

/// Apply an encounter outcome to one party member.
///
/// `hero_index` defaults to the first member. An empty party or an index out
/// of range leaves the party unchanged with no messages. Otherwise XP, gold,
/// and items are granted first (a level-up fully heals), then penalties:
/// gold loss is capped at what the member holds and HP damage is clamped.
pub fn apply_encounter_outcome_to_party(
    party: &[Character],
    outcome: impl Into<EncounterOutcome>,
    hero_index: Option<usize>,
) -> PartyUpdate {
    let index = hero_index.unwrap_or(0);
    let mut update = PartyUpdate {
        party: party.to_vec(),
        hero_index: index,
        reward_messages: Vec::new(),
        penalty_messages: Vec::new(),
    };
    let Some(member) = party.get(index) else {
        tracing::debug!(index, party_size = party.len(), "no party member to update");
        return update;
    };

    let outcome = outcome.into();
    let mut hero = member.clone();

    if let Some(rewards) = &outcome.rewards {
        if rewards.xp > 0 {
            let award = award_xp(&hero, rewards.xp);
            update
                .reward_messages
                .push(format!("{} gains {} XP", hero.name, rewards.xp));
            if award.leveled_up() {
                update.reward_messages.push(format!(
                    "{} reached level {}!",
                    hero.name, award.new_level
                ));
            }
            for level in &award.asi_levels {
                update.reward_messages.push(format!(
                    "{} earned an ability score improvement at level {level}",
                    hero.name
                ));
            }
            hero = award.character;
        }
        if rewards.gold > 0 {
            hero = add_gold(&hero, rewards.gold);
            update
                .reward_messages
                .push(format!("{} found {} gold", hero.name, rewards.gold));
        }
        for key in &rewards.items {
            hero = add_item(&hero, key, 1);
            update
                .reward_messages
                .push(format!("{} obtained {}", hero.name, lookup_item(key).name));
        }
    }

    if let Some(penalties) = &outcome.penalties {
        update
            .penalty_messages
            .extend(penalties.messages.iter().cloned());
        let lost = penalties.gold_lost.min(hero.gold);
        if lost > 0 {
            match remove_gold(&hero, lost) {
                Ok(next) => {
                    hero = next;
                    update
                        .penalty_messages
                        .push(format!("{} lost {lost} gold", hero.name));
                }
                Err(e) => tracing::warn!(error = %e, "gold penalty skipped"),
            }
        }
    }

    if outcome.hp_damage > 0 {
        hero = apply_damage(&hero, outcome.hp_damage);
        update.penalty_messages.push(format!(
            "{} took {} damage ({}/{} HP)",
            hero.name,
            outcome.hp_damage,
            hero.current_hp_or_full(),
            hero.max_hp_or_derived()
        ));
        if hero.is_defeated {
            update
                .penalty_messages
                .push(format!("{} has fallen!", hero.name));
        }
    }

    tracing::info!(
        character = %hero.name,
        rewards = update.reward_messages.len(),
        penalties = update.penalty_messages.len(),
        "applied encounter outcome"
    );
    update.party[index] = hero;
    update
}
