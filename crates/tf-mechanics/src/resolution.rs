//! Difficulty classes and outcome tiers.
//!
//! A check total is compared against the difficulty's DC, except that the
//! natural face overrides the comparison: a natural 20 is always a critical
//! success and a natural 1 always a critical failure.
//!
//! Multipliers are stored as whole percentages so every derived value can be
//! floored with integer arithmetic.

use serde::{Deserialize, Serialize};

use crate::dice::CheckRoll;

/// How hard an encounter is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    /// DC 5.
    Trivial,
    /// DC 10.
    Easy,
    /// DC 15.
    #[default]
    Medium,
    /// DC 20.
    Hard,
    /// DC 25.
    Deadly,
}

impl Difficulty {
    /// All difficulties from easiest to hardest.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Trivial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Deadly,
    ];

    /// The difficulty class a check must meet.
    pub fn dc(self) -> i32 {
        match self {
            Self::Trivial => 5,
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
            Self::Deadly => 25,
        }
    }

    /// Base experience awarded for an encounter of this difficulty.
    pub fn base_xp(self) -> u32 {
        match self {
            Self::Trivial => 10,
            Self::Easy => 25,
            Self::Medium => 50,
            Self::Hard => 100,
            Self::Deadly => 200,
        }
    }

    /// Damage scaling, in percent.
    pub fn damage_percent(self) -> u32 {
        match self {
            Self::Trivial => 50,
            Self::Easy => 75,
            Self::Medium => 100,
            Self::Hard => 125,
            Self::Deadly => 150,
        }
    }

    /// Lowercase name as used in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Deadly => "deadly",
        }
    }

    /// Parse a difficulty name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The consequence class of a resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeTier {
    /// Natural 20.
    CriticalSuccess,
    /// Met or beat the DC.
    Success,
    /// Fell short of the DC.
    Failure,
    /// Natural 1.
    CriticalFailure,
}

impl OutcomeTier {
    /// Classify a check against a difficulty class.
    pub fn classify(roll: &CheckRoll, dc: i32) -> Self {
        if roll.is_critical_success {
            Self::CriticalSuccess
        } else if roll.is_critical_failure {
            Self::CriticalFailure
        } else if roll.total >= dc {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// True for the two success tiers.
    pub fn is_success(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success)
    }

    /// Experience multiplier for encounter XP, in percent.
    pub fn xp_percent(self) -> u32 {
        match self {
            Self::CriticalSuccess => 150,
            Self::Success => 100,
            Self::Failure => 50,
            Self::CriticalFailure => 25,
        }
    }

    /// Reward multiplier for XP and gold, in percent.
    pub fn reward_percent(self) -> u32 {
        match self {
            Self::CriticalSuccess => 150,
            Self::Success => 100,
            Self::Failure => 30,
            Self::CriticalFailure => 0,
        }
    }

    /// Fraction of max HP lost before difficulty scaling, in percent.
    pub fn damage_percent(self) -> u32 {
        match self {
            Self::CriticalSuccess => 0,
            Self::Success => 5,
            Self::Failure => 15,
            Self::CriticalFailure => 40,
        }
    }

    /// camelCase name as used in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "criticalSuccess",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::CriticalFailure => "criticalFailure",
        }
    }
}

impl std::fmt::Display for OutcomeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(natural: u32, modifier: i32) -> CheckRoll {
        CheckRoll::from_draws(natural, 10, modifier, false, false)
    }

    #[test]
    fn dc_table() {
        let dcs: Vec<i32> = Difficulty::ALL.iter().map(|d| d.dc()).collect();
        assert_eq!(dcs, vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn meeting_dc_succeeds() {
        assert_eq!(OutcomeTier::classify(&roll(12, 3), 15), OutcomeTier::Success);
        assert_eq!(OutcomeTier::classify(&roll(12, 2), 15), OutcomeTier::Failure);
    }

    #[test]
    fn natural_twenty_beats_impossible_dc() {
        assert_eq!(
            OutcomeTier::classify(&roll(20, -5), 25),
            OutcomeTier::CriticalSuccess
        );
    }

    #[test]
    fn natural_one_fails_trivial_dc() {
        assert_eq!(
            OutcomeTier::classify(&roll(1, 10), 5),
            OutcomeTier::CriticalFailure
        );
    }

    #[test]
    fn difficulty_names() {
        assert_eq!(Difficulty::from_name("Deadly"), Some(Difficulty::Deadly));
        assert_eq!(Difficulty::from_name("nope"), None);
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn tier_serde_names() {
        let json = serde_json::to_string(&OutcomeTier::CriticalFailure).unwrap();
        assert_eq!(json, "\"criticalFailure\"");
        let tier: OutcomeTier = serde_json::from_str("\"criticalSuccess\"").unwrap();
        assert_eq!(tier, OutcomeTier::CriticalSuccess);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(OutcomeTier::CriticalSuccess.to_string(), "Critical Success");
        assert_eq!(OutcomeTier::Failure.to_string(), "Failure");
    }
}
