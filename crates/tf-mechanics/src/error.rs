//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice expression did not match `NdM`, `NdM+B`, or `NdM-B`.
    #[error("invalid dice notation: {0}")]
    InvalidNotation(String),

    /// An item drop entry did not match `key` or `key:NN%`.
    #[error("invalid item drop: {0}")]
    InvalidItemDrop(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
