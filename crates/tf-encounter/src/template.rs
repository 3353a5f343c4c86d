//! Encounter templates: the authored input to the resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use tf_mechanics::inventory::{DiceNotation, ItemDrop};
use tf_mechanics::{Difficulty, MechResult, OutcomeTier, RewardSpec};

/// Minimum similarity for suggesting a near-miss action label.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// What kind of situation an encounter is.
///
/// When a template carries a category it decides hostility and penalty
/// flavour outright; otherwise both fall back to keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncounterCategory {
    /// A fight; failures cost HP.
    Hostile,
    /// Talking, trading, persuading.
    Social,
    /// Terrain, weather, traps.
    Environmental,
    /// Anything else.
    Neutral,
}

/// One action a player may choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterAction {
    /// Button label; also the lookup key.
    pub label: String,
    /// Skill tested by the action. `None` means no roll.
    #[serde(default)]
    pub skill: Option<String>,
    /// What the action looks like in the fiction.
    #[serde(default)]
    pub description: String,
    /// Roll with advantage.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub advantage: bool,
    /// Roll with disadvantage.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disadvantage: bool,
}

impl EncounterAction {
    /// Create an action.
    pub fn new(
        label: impl Into<String>,
        skill: Option<&str>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            skill: skill.map(str::to_string),
            description: description.into(),
            advantage: false,
            disadvantage: false,
        }
    }
}

/// Authored consequence text per outcome tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consequences {
    /// Text for a critical success.
    pub critical_success: String,
    /// Text for a success.
    pub success: String,
    /// Text for a failure.
    pub failure: String,
    /// Text for a critical failure.
    pub critical_failure: String,
}

impl Consequences {
    /// The text for a tier.
    pub fn for_tier(&self, tier: OutcomeTier) -> &str {
        match tier {
            OutcomeTier::CriticalSuccess => &self.critical_success,
            OutcomeTier::Success => &self.success,
            OutcomeTier::Failure => &self.failure,
            OutcomeTier::CriticalFailure => &self.critical_failure,
        }
    }
}

/// Faction standing changes keyed by outcome tier.
pub type FactionDeltas = BTreeMap<OutcomeTier, BTreeMap<String, i32>>;

/// An authored encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterTemplate {
    /// Short title, e.g. "Goblin Ambush".
    pub name: String,
    /// Scene description handed to the narrator.
    #[serde(default)]
    pub description: String,
    /// Sets the DC and scales damage.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Actions offered to the player.
    #[serde(default)]
    pub suggested_actions: Vec<EncounterAction>,
    /// Rewards on success.
    #[serde(default)]
    pub rewards: RewardSpec,
    /// Fallback text per tier.
    #[serde(default)]
    pub consequences: Consequences,
    /// Faction standing changes per tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_factions: Option<FactionDeltas>,
    /// Whether the encounter plays out over several rounds.
    #[serde(default)]
    pub multi_round: bool,
    /// Starting enemy HP for multi-round encounters.
    #[serde(rename = "enemyHP", default, skip_serializing_if = "Option::is_none")]
    pub enemy_hp: Option<u32>,
    /// Explicit category; overrides keyword heuristics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EncounterCategory>,
}

impl EncounterTemplate {
    /// Create an empty template with a name and difficulty.
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            difficulty,
            suggested_actions: Vec::new(),
            rewards: RewardSpec::default(),
            consequences: Consequences::default(),
            affected_factions: None,
            multi_round: false,
            enemy_hp: None,
            category: None,
        }
    }

    /// Find an action by label: exact match first, then case-insensitive.
    pub fn action(&self, label: &str) -> Option<&EncounterAction> {
        self.suggested_actions
            .iter()
            .find(|a| a.label == label)
            .or_else(|| {
                self.suggested_actions
                    .iter()
                    .find(|a| a.label.eq_ignore_ascii_case(label.trim()))
            })
    }

    /// The offered label most similar to `label`, if any is close.
    pub fn closest_action(&self, label: &str) -> Option<&str> {
        let wanted = label.to_lowercase();
        self.suggested_actions
            .iter()
            .map(|a| (a.label.as_str(), jaro_winkler(&wanted, &a.label.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(l, _)| l)
    }

    /// Whether failing here costs HP.
    pub fn is_hostile(&self) -> bool {
        match self.category {
            Some(category) => category == EncounterCategory::Hostile,
            None => tf_mechanics::health::is_hostile_name(&self.name),
        }
    }

    /// Faction changes for a tier, if the template defines any.
    pub fn faction_deltas(&self, tier: OutcomeTier) -> Option<&BTreeMap<String, i32>> {
        self.affected_factions.as_ref()?.get(&tier)
    }

    /// Strictly check the reward strings.
    ///
    /// Resolution itself is lenient (bad gold falls back to a number, bad
    /// drops never drop); this is for authoring tools that want to catch typos.
    pub fn validate(&self) -> MechResult<()> {
        let gold = self.rewards.gold.trim();
        if !gold.is_empty() && gold.parse::<u32>().is_err() {
            self.rewards.gold.parse::<DiceNotation>()?;
        }
        for entry in &self.rewards.items {
            entry.parse::<ItemDrop>()?;
        }
        Ok(())
    }
}

/// Whether resolving this encounter deals HP damage.
pub fn should_deal_damage(template: &EncounterTemplate) -> bool {
    template.is_hostile()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambush() -> EncounterTemplate {
        let mut t = EncounterTemplate::new("Goblin Ambush", Difficulty::Medium);
        t.suggested_actions = vec![
            EncounterAction::new("Attack", Some("Athletics"), "Charge the nearest goblin."),
            EncounterAction::new("Sneak Away", Some("Stealth"), "Slip into the brush."),
            EncounterAction::new("Wait", None, "You hold your ground and watch."),
        ];
        t
    }

    #[test]
    fn action_lookup() {
        let t = ambush();
        assert_eq!(t.action("Attack").map(|a| a.label.as_str()), Some("Attack"));
        assert_eq!(t.action("sneak away").map(|a| a.label.as_str()), Some("Sneak Away"));
        assert!(t.action("Fly").is_none());
    }

    #[test]
    fn closest_action_suggestion() {
        let t = ambush();
        assert_eq!(t.closest_action("Atack"), Some("Attack"));
        assert_eq!(t.closest_action("Negotiate"), None);
    }

    #[test]
    fn hostility_from_keywords() {
        assert!(should_deal_damage(&ambush()));
        let market = EncounterTemplate::new("Busy Market", Difficulty::Easy);
        assert!(!should_deal_damage(&market));
    }

    #[test]
    fn category_overrides_keywords() {
        let mut t = ambush();
        t.category = Some(EncounterCategory::Social);
        assert!(!t.is_hostile());

        let mut market = EncounterTemplate::new("Busy Market", Difficulty::Easy);
        market.category = Some(EncounterCategory::Hostile);
        assert!(market.is_hostile());
    }

    #[test]
    fn deserialize_contract() {
        let json = r#"{
            "name": "Bridge Troll",
            "description": "A troll demands a toll.",
            "difficulty": "hard",
            "suggestedActions": [
                {"label": "Pay", "skill": null, "description": "You hand over coins."},
                {"label": "Fight", "skill": "Athletics", "description": "Steel out."}
            ],
            "rewards": {"xp": 120, "gold": "3d6+2", "items": ["troll_tooth:50%"]},
            "consequences": {
                "criticalSuccess": "The troll flees.",
                "success": "The troll yields.",
                "failure": "The troll swats you.",
                "criticalFailure": "You are thrown into the river."
            },
            "affectedFactions": {"success": {"Bridgewardens": 5}},
            "multiRound": true,
            "enemyHP": 40
        }"#;
        let t: EncounterTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.difficulty, Difficulty::Hard);
        assert_eq!(t.suggested_actions.len(), 2);
        assert_eq!(t.suggested_actions[0].skill, None);
        assert_eq!(t.rewards.gold, "3d6+2");
        assert_eq!(t.consequences.for_tier(OutcomeTier::Failure), "The troll swats you.");
        assert_eq!(
            t.faction_deltas(OutcomeTier::Success).and_then(|f| f.get("Bridgewardens")),
            Some(&5)
        );
        assert!(t.faction_deltas(OutcomeTier::Failure).is_none());
        assert!(t.multi_round);
        assert_eq!(t.enemy_hp, Some(40));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn validate_catches_bad_rewards() {
        let mut t = ambush();
        t.rewards.gold = "2x6".to_string();
        assert!(t.validate().is_err());

        let mut t = ambush();
        t.rewards.gold = "15".to_string();
        t.rewards.items = vec!["gem:often".to_string()];
        assert!(t.validate().is_err());

        let mut t = ambush();
        t.rewards.gold = "15".to_string();
        assert!(t.validate().is_ok());
    }
}
