//! Story settings: the mood knobs handed to the narrator.

use serde::{Deserialize, Serialize};

/// Narrator tone - affects the style of descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarratorTone {
    /// Formal, traditional style.
    #[default]
    Formal,
    /// Casual, conversational style.
    Casual,
    /// Dramatic, epic style.
    Dramatic,
    /// Humorous, lighthearted style.
    Humorous,
}

/// Narrative perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Perspective {
    /// Second person ("You swing").
    #[default]
    SecondPerson,
    /// Third person ("Mira swings").
    ThirdPerson,
}

/// Mood settings for a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorySettings {
    /// The tone of narration.
    pub tone: NarratorTone,
    /// The narrative perspective.
    pub perspective: Perspective,
    /// Free-form genre, e.g. "grimdark fantasy".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Free-form mood, e.g. "tense".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl StorySettings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tone.
    pub fn with_tone(mut self, tone: NarratorTone) -> Self {
        self.tone = tone;
        self
    }

    /// Set the perspective.
    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    /// Set the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the mood.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Subject used to refer to the acting character.
    pub fn subject<'a>(&self, character_name: &'a str) -> &'a str {
        match self.perspective {
            Perspective::SecondPerson => "You",
            Perspective::ThirdPerson => character_name,
        }
    }
}
