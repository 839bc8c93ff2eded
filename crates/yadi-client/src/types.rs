//! Wire types for the wallet backend.
//!
//! Money values stay server-formatted strings end to end; the client never
//! computes balances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Theme
// =============================================================================

/// Light/dark theme preference.
///
/// Stored in the server profile and mirrored in local storage by the
/// application core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The opposite theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated user's profile as known to the client.
///
/// Replaced wholesale on every fetch; never mutated field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user id.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Mobile number, once supplied during verification.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Whether identity verification has completed.
    #[serde(default)]
    pub is_kyc_verified: bool,
    /// Server-side theme preference.
    #[serde(default)]
    pub theme_preference: Theme,
}

// =============================================================================
// Auth payloads
// =============================================================================

/// Password login payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration payload. The backend expects the password twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Password.
    pub password1: String,
    /// Password confirmation.
    pub password2: String,
}

/// Proof submitted to the verification-confirm endpoint: either the manual
/// OTP fallback or the token carried by an emailed link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VerificationProof {
    /// Manually entered one-time code.
    Otp {
        /// The 6-digit code.
        otp: String,
    },
    /// Token extracted from a magic-link URL.
    LinkToken {
        /// The single-use token.
        token: String,
    },
}

// =============================================================================
// Wallets & history
// =============================================================================

/// A single wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet id.
    pub id: Uuid,
    /// User-facing label.
    pub label: String,
    /// Server-formatted balance string.
    pub balance: String,
    /// Currency code.
    pub currency: String,
    /// Frozen wallets cannot move money.
    #[serde(default)]
    pub is_frozen: bool,
    /// The account's main wallet.
    #[serde(default)]
    pub is_primary: bool,
    /// Wallet category as reported by the server.
    pub wallet_type: String,
}

/// Wallets grouped the way the dashboard renders them: business and personal
/// per user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletsResponse {
    /// Escrow/settlement wallets.
    #[serde(default)]
    pub business_wallets: Vec<Wallet>,
    /// Spendable wallets.
    #[serde(default)]
    pub personal_wallets: Vec<Wallet>,
}

/// One entry in the transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Transaction id.
    pub id: Uuid,
    /// Transaction kind (deposit, withdrawal, transfer, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Signed amount.
    pub amount: f64,
    /// Server-side processing status.
    pub status: String,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
    /// Label of the wallet involved, when the server includes it.
    #[serde(default)]
    pub wallet_label: Option<String>,
}

/// The history endpoint answers either a plain array or a paginated page.
/// `Paginated` must come first so an object body is not mistaken for an
/// empty array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    /// Paginated shape: `{"results": [...]}`.
    Paginated {
        /// The current page of items.
        results: Vec<HistoryItem>,
    },
    /// Plain array shape.
    Plain(Vec<HistoryItem>),
}

impl HistoryResponse {
    /// Normalize both shapes to a flat item list.
    #[must_use]
    pub fn into_items(self) -> Vec<HistoryItem> {
        match self {
            Self::Paginated { results } => results,
            Self::Plain(items) => items,
        }
    }
}

// =============================================================================
// Money movement payloads
// =============================================================================

/// Withdrawal to a mobile-money recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Amount as entered by the user; validated server-side.
    pub amount: String,
    /// Wallet to draw from.
    pub source_wallet_id: Uuid,
    /// Recipient phone number (the user's own, or a beneficiary's).
    pub recipient_phone: String,
    /// Whether to remember the recipient for next time.
    pub save_beneficiary: bool,
}

/// Transfer between own wallets (`dest_wallet_id`) or to another account
/// (`recipient_identifier`). Exactly one of the two should be set; the
/// server rejects ambiguous requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Wallet to draw from.
    pub source_wallet_id: Uuid,
    /// Destination wallet, for internal moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_wallet_id: Option<Uuid>,
    /// Phone/email of another account, for external moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_identifier: Option<String>,
    /// Amount as entered by the user; validated server-side.
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_decodes_with_missing_optionals() {
        let body = json!({
            "id": "7b2e7bcb-96b1-4f8e-9f63-8f7a3d2e1c10",
            "username": "amina",
            "email": "amina@example.com",
        });
        let profile: UserProfile = serde_json::from_value(body).unwrap();
        assert_eq!(profile.username, "amina");
        assert_eq!(profile.phone_number, None);
        assert!(!profile.is_kyc_verified);
        assert_eq!(profile.theme_preference, Theme::Light);
    }

    #[test]
    fn theme_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn history_decodes_plain_array() {
        let body = json!([{
            "id": "a34cf57e-31ab-4f2a-9d3f-2a1b7d9f41aa",
            "type": "deposit",
            "amount": 1500.0,
            "status": "completed",
            "date": "2026-08-01T09:30:00Z",
        }]);
        let response: HistoryResponse = serde_json::from_value(body).unwrap();
        let items = response.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, "deposit");
    }

    #[test]
    fn history_decodes_paginated_page() {
        let body = json!({
            "count": 1,
            "results": [{
                "id": "a34cf57e-31ab-4f2a-9d3f-2a1b7d9f41aa",
                "type": "withdrawal",
                "amount": -200.0,
                "status": "pending",
                "date": "2026-08-02T12:00:00Z",
                "wallet_label": "Main Wallet",
            }],
        });
        let response: HistoryResponse = serde_json::from_value(body).unwrap();
        let items = response.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].wallet_label.as_deref(), Some("Main Wallet"));
    }

    #[test]
    fn wallets_response_splits_business_and_personal() {
        let body = json!({
            "business_wallets": [{
                "id": "11111111-1111-4111-8111-111111111111",
                "label": "Escrow",
                "balance": "12000.00",
                "currency": "KES",
                "is_frozen": true,
                "wallet_type": "business",
            }],
            "personal_wallets": [{
                "id": "22222222-2222-4222-8222-222222222222",
                "label": "Main Wallet",
                "balance": "350.50",
                "currency": "KES",
                "is_primary": true,
                "wallet_type": "personal",
            }],
        });
        let wallets: WalletsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(wallets.business_wallets.len(), 1);
        assert!(wallets.business_wallets[0].is_frozen);
        assert!(wallets.personal_wallets[0].is_primary);
    }

    #[test]
    fn verification_proof_serializes_field_names() {
        let otp = serde_json::to_value(VerificationProof::Otp {
            otp: "123456".to_string(),
        })
        .unwrap();
        assert_eq!(otp, json!({"otp": "123456"}));

        let token = serde_json::to_value(VerificationProof::LinkToken {
            token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(token, json!({"token": "abc"}));
    }

    #[test]
    fn transfer_request_omits_unset_destination() {
        let request = TransferRequest {
            source_wallet_id: Uuid::nil(),
            dest_wallet_id: None,
            recipient_identifier: Some("0712345678".to_string()),
            amount: "100".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("dest_wallet_id").is_none());
        assert_eq!(body["recipient_identifier"], "0712345678");
    }
}
