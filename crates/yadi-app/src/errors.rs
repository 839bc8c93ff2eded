//! Categorized application errors.
//!
//! Maps the client's wire-level taxonomy onto user-facing messages and
//! toast severities. Server business-rule rejections pass through verbatim;
//! everything else gets a stable, human-written message.

use thiserror::Error;
use yadi_client::{ApiError, RegistrationError};

use crate::views::notifications::ToastLevel;

/// Application-level failures surfaced to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Network or transport failure.
    #[error("network error: {0}")]
    Network(String),
    /// The login endpoint rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Field-classified registration failure.
    #[error("{0}")]
    Registration(RegistrationError),
    /// The session is gone; the user must sign in again.
    #[error("session expired")]
    Unauthenticated,
    /// Server business-rule rejection, shown verbatim.
    #[error("{0}")]
    Rejected(String),
    /// Unexpected condition (malformed response, bad configuration).
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for inline display next to the triggering control.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Please try again.".to_string(),
            Self::InvalidCredentials => "Invalid email or password.".to_string(),
            Self::Registration(RegistrationError::EmailTaken) => {
                "Email already exists.".to_string()
            }
            Self::Registration(RegistrationError::UsernameTaken) => {
                "Username already taken.".to_string()
            }
            Self::Registration(RegistrationError::Other { .. }) => {
                "Registration failed. Please check your details.".to_string()
            }
            Self::Unauthenticated => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::Rejected(message) | Self::Internal(message) => message.clone(),
        }
    }

    /// Toast severity for frontends that route errors into notifications.
    #[must_use]
    pub fn toast_level(&self) -> ToastLevel {
        match self {
            Self::Network(_) => ToastLevel::Warning,
            Self::InvalidCredentials | Self::Registration(_) => ToastLevel::Info,
            Self::Unauthenticated | Self::Rejected(_) | Self::Internal(_) => ToastLevel::Error,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Transport { message } => Self::Network(message),
            ApiError::Unauthenticated => Self::Unauthenticated,
            ApiError::InvalidCredentials => Self::InvalidCredentials,
            ApiError::Registration(inner) => Self::Registration(inner),
            ApiError::Rejected { message } => Self::Rejected(message),
            ApiError::Decode { context } => {
                Self::Internal(format!("unexpected response from {context}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_matches_login_screen() {
        let error = AppError::from(ApiError::InvalidCredentials);
        assert_eq!(error.user_message(), "Invalid email or password.");
        assert_eq!(error.toast_level(), ToastLevel::Info);
    }

    #[test]
    fn registration_messages_are_field_specific() {
        let email = AppError::Registration(RegistrationError::EmailTaken);
        assert_eq!(email.user_message(), "Email already exists.");

        let username = AppError::Registration(RegistrationError::UsernameTaken);
        assert_eq!(username.user_message(), "Username already taken.");
    }

    #[test]
    fn rejections_pass_through_verbatim() {
        let error = AppError::from(ApiError::rejected("Insufficient funds in source wallet"));
        assert_eq!(error.user_message(), "Insufficient funds in source wallet");
        assert_eq!(error.toast_level(), ToastLevel::Error);
    }
}
