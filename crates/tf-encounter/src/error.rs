//! Error types for encounter resolution.

use thiserror::Error;

/// Result type for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Errors that can occur while resolving an encounter.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// The chosen action label is not offered by the encounter.
    #[error("unknown action '{label}'{}", hint(.suggestion))]
    UnknownAction {
        /// The label that was requested.
        label: String,
        /// The closest offered label, if any is close enough.
        suggestion: Option<String>,
    },

    /// A multi-round encounter was asked to continue after it ended.
    #[error("encounter is already resolved")]
    AlreadyResolved,

    /// The template failed validation.
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] tf_mechanics::MechError),
}

fn hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_message() {
        let err = EncounterError::UnknownAction {
            label: "Atack".to_string(),
            suggestion: Some("Attack".to_string()),
        };
        assert_eq!(err.to_string(), "unknown action 'Atack' (did you mean 'Attack'?)");

        let err = EncounterError::UnknownAction {
            label: "Dance".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown action 'Dance'");
    }
}
