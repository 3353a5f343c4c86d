//! Multi-round encounters as a small state machine.
//!
//! Each round resolves one action through the single-round resolver and then
//! folds the result into a new [`RoundState`] with [`apply_round`]. Callers
//! own the current state and replace it with each returned value; two rounds
//! must never be resolved concurrently against the same state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use tf_mechanics::inventory::rewards::scale_percent;
use tf_mechanics::{Character, OutcomeTier, Rewards};

use crate::error::{EncounterError, EncounterResult};
use crate::narrator::{Narrator, StorySettings};
use crate::penalty::Penalties;
use crate::resolver::{EncounterEngine, Resolution};
use crate::template::{EncounterAction, EncounterTemplate};

/// Rounds before a fight is forced to a result.
pub const MAX_ROUNDS: u32 = 3;

/// Morale an enemy starts with.
pub const STARTING_MORALE: i32 = 100;

/// Press the attack once the player has the upper hand.
pub const FINISH_THEM: &str = "Finish Them";
/// Call for surrender once the enemy wavers.
pub const DEMAND_SURRENDER: &str = "Demand Surrender";
/// Always available from round two.
pub const TACTICAL_RETREAT: &str = "Tactical Retreat";

/// Player advantage needed before "Finish Them" is offered.
const FINISH_ADVANTAGE: i32 = 2;
/// Enemy morale below which "Demand Surrender" is offered.
const SURRENDER_MORALE: i32 = 50;
/// Player advantage at or below which the fight is lost.
const DEFEAT_ADVANTAGE: i32 = -3;

/// How a multi-round encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatOutcome {
    /// Enemy broke or the player ended ahead.
    Victory,
    /// The player lost the initiative entirely.
    Defeat,
    /// Time ran out with nobody ahead.
    Stalemate,
    /// The player withdrew.
    Escaped,
}

impl std::fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "Victory"),
            Self::Defeat => write!(f, "Defeat"),
            Self::Stalemate => write!(f, "Stalemate"),
            Self::Escaped => write!(f, "Escaped"),
        }
    }
}

/// One resolved round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Round number, starting at 1.
    pub round: u32,
    /// Chosen action label.
    pub action: String,
    /// Outcome tier of the action.
    pub outcome: OutcomeTier,
    /// Narration for the round.
    pub narration: String,
    /// Rewards earned this round.
    pub rewards: Option<Rewards>,
    /// Penalties suffered this round.
    pub penalties: Option<Penalties>,
    /// HP lost this round.
    pub hp_damage: i32,
}

/// State of a multi-round encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// The round about to be played.
    pub current_round: u32,
    /// Round limit.
    pub max_rounds: u32,
    /// Resolved rounds, oldest first.
    pub history: Vec<RoundRecord>,
    /// Enemy morale; unbounded above, may go negative.
    pub enemy_morale: i32,
    /// Player's tactical edge.
    pub player_advantage: i32,
    /// Set once an outcome is reached.
    pub is_resolved: bool,
    /// Final outcome, once resolved.
    pub outcome: Option<CombatOutcome>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(MAX_ROUNDS)
    }
}

impl RoundState {
    /// A fresh encounter with the given round limit.
    pub fn new(max_rounds: u32) -> Self {
        Self {
            current_round: 1,
            max_rounds: max_rounds.max(1),
            history: Vec::new(),
            enemy_morale: STARTING_MORALE,
            player_advantage: 0,
            is_resolved: false,
            outcome: None,
        }
    }

    /// Morale for display, never below zero.
    pub fn display_morale(&self) -> i32 {
        self.enemy_morale.max(0)
    }
}

/// Morale and advantage deltas for a tier.
pub fn tier_deltas(tier: OutcomeTier) -> (i32, i32) {
    match tier {
        OutcomeTier::CriticalSuccess => (-40, 2),
        OutcomeTier::Success => (-20, 1),
        OutcomeTier::Failure => (10, -1),
        OutcomeTier::CriticalFailure => (20, -2),
    }
}

/// Actions offered in the current round.
///
/// Round one offers the template's actions. Later rounds add the situational
/// actions on top; they never replace the base set.
pub fn round_actions(state: &RoundState, template: &EncounterTemplate) -> Vec<EncounterAction> {
    let mut actions = template.suggested_actions.clone();
    if state.current_round < 2 {
        return actions;
    }

    let mut extra = Vec::new();
    if state.player_advantage >= FINISH_ADVANTAGE {
        extra.push(EncounterAction::new(
            FINISH_THEM,
            Some("Athletics"),
            "You press your advantage for a decisive blow.",
        ));
    }
    if state.enemy_morale < SURRENDER_MORALE {
        extra.push(EncounterAction::new(
            DEMAND_SURRENDER,
            Some("Intimidation"),
            "You order your wavering foe to yield.",
        ));
    }
    extra.push(EncounterAction::new(
        TACTICAL_RETREAT,
        Some("Acrobatics"),
        "You fall back in good order.",
    ));

    for action in extra {
        if !actions.iter().any(|a| a.label == action.label) {
            actions.push(action);
        }
    }
    actions
}

/// Fold a resolved round into the state.
///
/// Applies the tier's morale and advantage deltas, records the round, and
/// checks for an ending in priority order: broken morale, lost advantage,
/// round limit, then a successful retreat.
pub fn apply_round(state: &RoundState, resolution: &Resolution) -> RoundState {
    let mut next = state.clone();
    let (morale, advantage) = tier_deltas(resolution.outcome);
    next.enemy_morale += morale;
    next.player_advantage += advantage;
    next.history.push(RoundRecord {
        round: state.current_round,
        action: resolution.action.clone(),
        outcome: resolution.outcome,
        narration: resolution.narration.clone(),
        rewards: resolution.rewards.clone(),
        penalties: resolution.penalties.clone(),
        hp_damage: resolution.hp_damage,
    });
    next.current_round += 1;

    let outcome = if next.enemy_morale <= 0 {
        Some(CombatOutcome::Victory)
    } else if next.player_advantage <= DEFEAT_ADVANTAGE {
        Some(CombatOutcome::Defeat)
    } else if next.current_round > next.max_rounds {
        if next.player_advantage > 0 {
            Some(CombatOutcome::Victory)
        } else {
            Some(CombatOutcome::Stalemate)
        }
    } else if resolution.action == TACTICAL_RETREAT
        && resolution.outcome != OutcomeTier::CriticalFailure
    {
        Some(CombatOutcome::Escaped)
    } else {
        None
    };

    if let Some(outcome) = outcome {
        next.is_resolved = true;
        next.outcome = Some(outcome);
        tracing::info!(
            %outcome,
            rounds = next.history.len(),
            morale = next.enemy_morale,
            advantage = next.player_advantage,
            "multi-round encounter resolved"
        );
    }
    next
}

impl<N: Narrator> EncounterEngine<N> {
    /// Start a multi-round encounter using the configured round limit.
    pub fn start_rounds(&self) -> RoundState {
        RoundState::new(self.config().max_rounds)
    }

    /// Resolve one round of a multi-round encounter.
    ///
    /// Returns the new state together with the round's resolution.
    pub async fn resolve_round<R>(
        &self,
        state: &RoundState,
        template: &EncounterTemplate,
        action_label: &str,
        character: &Character,
        settings: &StorySettings,
        rng: &mut R,
    ) -> EncounterResult<(RoundState, Resolution)>
    where
        R: Rng + Send,
    {
        if state.is_resolved {
            return Err(EncounterError::AlreadyResolved);
        }

        let mut round = template.clone();
        round.suggested_actions = round_actions(state, template);
        let resolution = self
            .resolve(&round, action_label, character, settings, rng)
            .await?;
        Ok((apply_round(state, &resolution), resolution))
    }
}

/// The totals of a finished (or abandoned) multi-round encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSummary {
    /// Final outcome, if the encounter resolved.
    pub outcome: Option<CombatOutcome>,
    /// Rounds played.
    pub rounds: u32,
    /// All round narrations, in order.
    pub narration: String,
    /// Rewards summed over rounds, then adjusted for the outcome.
    pub rewards: Rewards,
    /// Penalty lines from every round.
    pub penalties: Vec<String>,
    /// Gold forfeited over all rounds.
    pub gold_lost: u32,
    /// HP lost over all rounds.
    pub hp_damage: i32,
}

/// Summarise the rounds played so far.
///
/// Victory pays 120% XP. Defeat pays 50% XP and 30% gold and adds a defeat
/// line. Escaping pays 70% XP and leaves all items behind.
pub fn generate_encounter_summary(state: &RoundState) -> EncounterSummary {
    let mut rewards = Rewards::default();
    let mut penalties = Vec::new();
    let mut gold_lost = 0u32;
    let mut hp_damage = 0;
    for record in &state.history {
        if let Some(r) = &record.rewards {
            rewards.absorb(r);
        }
        if let Some(p) = &record.penalties {
            penalties.extend(p.messages.iter().cloned());
            gold_lost = gold_lost.saturating_add(p.gold_lost);
        }
        hp_damage += record.hp_damage;
    }

    match state.outcome {
        Some(CombatOutcome::Victory) => {
            rewards.xp = scale_percent(rewards.xp, 120);
        }
        Some(CombatOutcome::Defeat) => {
            rewards.xp = scale_percent(rewards.xp, 50);
            rewards.gold = scale_percent(rewards.gold, 30);
            penalties.push("You were defeated and forced to withdraw.".to_string());
        }
        Some(CombatOutcome::Escaped) => {
            rewards.xp = scale_percent(rewards.xp, 70);
            rewards.items.clear();
        }
        Some(CombatOutcome::Stalemate) | None => {}
    }

    let narration = state
        .history
        .iter()
        .map(|r| r.narration.as_str())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    EncounterSummary {
        outcome: state.outcome,
        rounds: state.history.len() as u32,
        narration,
        rewards,
        penalties,
        gold_lost,
        hp_damage,
    }
}
