//! The [`WalletApi`] seam between the application core and the network.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    HistoryItem, LoginRequest, RegistrationRequest, Theme, TransferRequest, UserProfile,
    VerificationProof, WalletsResponse, WithdrawRequest,
};

/// Remote operations the application core depends on.
///
/// Implemented by [`crate::HttpWalletApi`] for production and by the
/// `testkit` fake in tests. Session establishment is a cookie-jar side
/// effect of the login/registration/exchange calls; no method hands back a
/// token.
#[async_trait]
pub trait WalletApi: Send + Sync {
    /// Fetch the authenticated profile.
    ///
    /// The single source of truth for identity; the application refetches it
    /// after every mutating auth action instead of patching local state.
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;

    /// Password login. Establishes the session cookie.
    async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError>;

    /// Create an account. The backend signs the new user in on success.
    async fn register(&self, registration: &RegistrationRequest) -> Result<(), ApiError>;

    /// Exchange a third-party OAuth access token for a session.
    async fn login_with_google(&self, access_token: &str) -> Result<(), ApiError>;

    /// Invalidate the server session.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Trigger the password-reset email.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Send the verification OTP and magic link for the given phone number.
    async fn send_verification_otp(&self, phone_number: &str) -> Result<(), ApiError>;

    /// Confirm verification with an OTP or a link token.
    async fn confirm_verification(&self, proof: &VerificationProof) -> Result<(), ApiError>;

    /// Exchange a magic-link token for a session.
    async fn exchange_magic_token(&self, token: &str) -> Result<(), ApiError>;

    /// Persist the theme preference on the server profile.
    async fn update_theme(&self, theme: Theme) -> Result<(), ApiError>;

    /// Fetch all wallets, grouped business/personal.
    async fn fetch_wallets(&self) -> Result<WalletsResponse, ApiError>;

    /// Create a new personal wallet with the given label.
    async fn create_wallet(&self, label: &str) -> Result<(), ApiError>;

    /// Fetch the transaction history, newest first.
    async fn fetch_history(&self) -> Result<Vec<HistoryItem>, ApiError>;

    /// Withdraw to a mobile-money recipient.
    async fn withdraw(&self, request: &WithdrawRequest) -> Result<(), ApiError>;

    /// Move money between wallets or to another account.
    async fn transfer(&self, request: &TransferRequest) -> Result<(), ApiError>;
}
