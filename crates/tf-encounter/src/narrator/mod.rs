//! The narration boundary.
//!
//! Narration is the only suspension point in encounter resolution. The
//! engine awaits a [`Narrator`] under a timeout and swaps in the template's
//! consequence text on rejection, timeout, or cancellation, so outcome
//! computation always completes.

pub mod config;
pub mod context;
pub mod templates;

pub use config::{NarratorTone, Perspective, StorySettings};
pub use context::NarrationContext;
pub use templates::TemplateNarrator;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Why a narrator could not produce text.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The backing service could not be reached.
    #[error("narrator unavailable: {0}")]
    Unavailable(String),

    /// The backing service refused or failed the request.
    #[error("narration rejected: {0}")]
    Rejected(String),
}

/// Something that turns a resolved action into prose.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Describe the outcome in `context`.
    async fn narrate(&self, context: &NarrationContext) -> Result<String, NarrationError>;
}

/// Await narration, substituting `context.fallback` on any failure.
///
/// Success text is returned verbatim. Errors and timeouts are logged and
/// never surface to the caller.
pub async fn narrate_with_fallback<N>(
    narrator: &N,
    context: &NarrationContext,
    timeout: Duration,
) -> String
where
    N: Narrator + ?Sized,
{
    tracing::trace!(prompt = %context.prompt(), "requesting narration");
    match tokio::time::timeout(timeout, narrator.narrate(context)).await {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            tracing::warn!(
                error = %err,
                action = %context.action,
                "narration failed; using fallback"
            );
            context.fallback.clone()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                action = %context.action,
                "narration timed out; using fallback"
            );
            context.fallback.clone()
        }
    }
}
