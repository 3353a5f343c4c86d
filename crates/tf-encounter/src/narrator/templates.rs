//! Offline narration built from fixed sentence templates.

use async_trait::async_trait;

use tf_mechanics::OutcomeTier;

use super::config::{NarratorTone, Perspective};
use super::context::NarrationContext;
use super::{NarrationError, Narrator};

/// A narrator that needs no external service.
///
/// Produces one lead sentence shaped by tone and perspective, one verdict
/// sentence per outcome tier, and then the authored consequence text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    /// Create a template narrator.
    pub fn new() -> Self {
        Self
    }

    /// Compose narration for a context.
    pub fn compose(&self, ctx: &NarrationContext) -> String {
        let mut parts = vec![lead(ctx), verdict(ctx.settings.tone, ctx.outcome).to_string()];
        if !ctx.fallback.trim().is_empty() {
            parts.push(ctx.fallback.trim().to_string());
        }
        parts.join(" ")
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, context: &NarrationContext) -> Result<String, NarrationError> {
        Ok(self.compose(context))
    }
}

fn lead(ctx: &NarrationContext) -> String {
    let subject = ctx.settings.subject(&ctx.character_name);
    let third = ctx.settings.perspective == Perspective::ThirdPerson;
    let verb = |base: &str| {
        if third {
            match base {
                "go" => "goes".to_string(),
                other => format!("{other}s"),
            }
        } else {
            base.to_string()
        }
    };
    let action = ctx.action.to_lowercase();

    match ctx.settings.tone {
        NarratorTone::Formal => format!("{subject} {} to {action}.", verb("attempt")),
        NarratorTone::Casual => format!("{subject} {} for it: {action}.", verb("go")),
        NarratorTone::Dramatic => {
            let subject = if third { subject.to_string() } else { subject.to_lowercase() };
            format!("With everything on the line, {subject} {} to {action}.", verb("commit"))
        }
        NarratorTone::Humorous => {
            format!("{subject} {} that \"{action}\" is a great idea.", verb("decide"))
        }
    }
}

fn verdict(tone: NarratorTone, outcome: OutcomeTier) -> &'static str {
    match (tone, outcome) {
        (NarratorTone::Humorous, OutcomeTier::CriticalSuccess) => "Against all odds, it was.",
        (NarratorTone::Humorous, OutcomeTier::Success) => "Surprisingly, it works.",
        (NarratorTone::Humorous, OutcomeTier::Failure) => "It was not.",
        (NarratorTone::Humorous, OutcomeTier::CriticalFailure) => {
            "It was, in fact, a terrible idea."
        }
        (NarratorTone::Dramatic, OutcomeTier::CriticalSuccess) => "Fate itself bends to the deed.",
        (NarratorTone::Dramatic, OutcomeTier::CriticalFailure) => "Ruin follows swiftly.",
        (_, OutcomeTier::CriticalSuccess) => "It could not have gone better.",
        (_, OutcomeTier::Success) => "It works.",
        (_, OutcomeTier::Failure) => "It does not go to plan.",
        (_, OutcomeTier::CriticalFailure) => "It goes disastrously wrong.",
    }
}
