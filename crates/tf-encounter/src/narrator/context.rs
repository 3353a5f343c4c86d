//! The structured request sent to a narrator.

use serde::{Deserialize, Serialize};

use tf_mechanics::OutcomeTier;

use super::config::StorySettings;

/// Everything a narrator needs to describe one resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationContext {
    /// Mood settings.
    pub settings: StorySettings,
    /// Encounter title.
    pub encounter_name: String,
    /// Encounter scene description.
    pub encounter_description: String,
    /// Label of the chosen action.
    pub action: String,
    /// Acting character's name.
    pub character_name: String,
    /// Acting character's class.
    pub character_class: String,
    /// Check total.
    pub roll_total: i32,
    /// Kept d20 face.
    pub natural_roll: u32,
    /// Modifier added to the face.
    pub modifier: i32,
    /// Resolved tier.
    pub outcome: OutcomeTier,
    /// Authored text to use if narration fails.
    pub fallback: String,
}

impl NarrationContext {
    /// Render the context as a plain-text prompt for text-generation backends.
    pub fn prompt(&self) -> String {
        let mut out = String::new();
        if let Some(genre) = &self.settings.genre {
            out.push_str(&format!("Genre: {genre}\n"));
        }
        if let Some(mood) = &self.settings.mood {
            out.push_str(&format!("Mood: {mood}\n"));
        }
        out.push_str(&format!("Tone: {:?}\n", self.settings.tone));
        out.push_str(&format!("Encounter: {}\n", self.encounter_name));
        if !self.encounter_description.is_empty() {
            out.push_str(&format!("Scene: {}\n", self.encounter_description));
        }
        out.push_str(&format!(
            "Actor: {} the {}\n",
            self.character_name, self.character_class
        ));
        out.push_str(&format!("Action: {}\n", self.action));
        out.push_str(&format!(
            "Roll: natural {} {:+} = {}\n",
            self.natural_roll, self.modifier, self.roll_total
        ));
        out.push_str(&format!("Outcome: {}\n", self.outcome));
        out.push_str(&format!("Reference consequence: {}\n", self.fallback));
        out.push_str("Describe what happens in two or three sentences.");
        out
    }
}
