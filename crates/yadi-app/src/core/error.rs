//! Dispatch-level errors.

use thiserror::Error;

use crate::errors::AppError;

/// Why a dispatched intent did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntentError {
    /// The intent failed local validation and nothing was sent.
    #[error("{0}")]
    Invalid(String),
    /// The underlying action failed.
    #[error(transparent)]
    Action(#[from] AppError),
}

impl IntentError {
    /// Message suitable for inline display on the originating form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(message) => message.clone(),
            Self::Action(error) => error.user_message(),
        }
    }
}
