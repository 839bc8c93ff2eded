//! Error taxonomy for wallet backend calls.
//!
//! Four failure classes cross the wire: transport, authentication,
//! field-level validation, and opaque business-rule rejections. Rejection
//! messages are server-authored and shown to the user verbatim.

use serde_json::Value;
use thiserror::Error;

/// Field-classified registration failure.
///
/// The backend reports duplicate identities keyed by field; the distinction
/// drives user-facing messaging and must survive decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The email is already registered to another account.
    #[error("email already registered")]
    EmailTaken,
    /// The username is already taken.
    #[error("username already taken")]
    UsernameTaken,
    /// Any other registration rejection.
    #[error("{message}")]
    Other {
        /// Server-provided detail, if any.
        message: String,
    },
}

impl RegistrationError {
    /// Classify a registration error body.
    ///
    /// The backend returns field-keyed validation errors, e.g.
    /// `{"email": ["A user is already registered with this address."]}`.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        if body.get("email").is_some() {
            return Self::EmailTaken;
        }
        if body.get("username").is_some() {
            return Self::UsernameTaken;
        }
        let message = body
            .get("non_field_errors")
            .and_then(|errors| errors.get(0))
            .and_then(Value::as_str)
            .unwrap_or("registration failed")
            .to_string();
        Self::Other { message }
    }
}

/// Errors returned by [`crate::WalletApi`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network or transport failure (connect, timeout, TLS).
    #[error("network error: {message}")]
    Transport {
        /// Transport-level detail.
        message: String,
    },

    /// The session cookie is missing, expired, or invalid (401/403).
    #[error("not authenticated")]
    Unauthenticated,

    /// The login endpoint rejected the supplied credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Field-classified registration failure.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Business-rule rejection; the message is shown to the user verbatim.
    #[error("{message}")]
    Rejected {
        /// Server-authored rejection reason.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {context}")]
    Decode {
        /// Which call produced the malformed payload.
        context: &'static str,
    },
}

impl ApiError {
    /// Build a transport error from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a business-rule rejection carrying the server's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// True when the failure means "no valid session" rather than a broken
    /// call.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
