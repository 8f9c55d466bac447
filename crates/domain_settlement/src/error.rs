//! Settlement domain errors

use thiserror::Error;

/// Errors that can occur while settling a claim
///
/// An unrecognised coverage type is not represented here: it
/// resolves to the fail-safe branch instead of aborting.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The claim payload is malformed or carries forbidden values
    #[error("Validation error: {0}")]
    Validation(String),

    /// The engine was constructed with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An amount left the representable decimal range
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl SettlementError {
    pub fn validation(message: impl Into<String>) -> Self {
        SettlementError::Validation(message.into())
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        SettlementError::InvalidConfiguration(message.into())
    }

    /// Returns true if the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, SettlementError::Validation(_))
    }
}
