//! User actions, expressed as data.
//!
//! Frontends build an [`Intent`] from a form or button press and hand it to
//! [`crate::AppCore::dispatch`]. Every field carries raw user input; all
//! validation beyond local form checks happens server-side.

use uuid::Uuid;

use crate::routing::Route;

/// Everything a frontend can ask the core to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Sign in with email and password.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Create an account.
    Register {
        /// Desired username.
        username: String,
        /// Account email.
        email: String,
        /// Password.
        password: String,
        /// Password confirmation; must match before anything is sent.
        confirm_password: String,
    },
    /// Sign in with a Google OAuth access token.
    LoginWithGoogle {
        /// Access token obtained by the frontend's OAuth flow.
        access_token: String,
    },
    /// Sign out and return to the login screen.
    Logout,
    /// Request a password-reset email.
    RequestPasswordReset {
        /// Account email.
        email: String,
    },
    /// Push a route onto the navigation stack.
    Navigate {
        /// Where to go.
        route: Route,
    },
    /// Pop the navigation stack.
    GoBack,
    /// Send the verification OTP to a phone number.
    SendVerificationCode {
        /// Phone number to verify.
        contact: String,
    },
    /// Confirm verification with a manually entered code.
    ConfirmVerificationCode {
        /// The 6-digit code.
        otp: String,
    },
    /// Confirm verification with the token from an emailed link.
    ConfirmVerificationLink {
        /// Token extracted from the link URL.
        token: String,
    },
    /// Complete a magic-link landing.
    ExchangeMagicToken {
        /// Token extracted from the link URL.
        token: String,
    },
    /// Flip the light/dark theme.
    ToggleTheme,
    /// Reload wallets and history.
    RefreshDashboard,
    /// Create a new personal wallet.
    CreateWallet {
        /// User-facing label.
        label: String,
    },
    /// Withdraw to a mobile-money recipient.
    Withdraw {
        /// Amount as entered.
        amount: String,
        /// Wallet to draw from.
        source_wallet_id: Uuid,
        /// Recipient phone number.
        recipient_phone: String,
        /// Remember the recipient for next time.
        save_beneficiary: bool,
    },
    /// Move money between wallets or to another account.
    Transfer {
        /// Wallet to draw from.
        source_wallet_id: Uuid,
        /// Destination wallet, for internal moves.
        dest_wallet_id: Option<Uuid>,
        /// Phone/email of another account, for external moves.
        recipient_identifier: Option<String>,
        /// Amount as entered.
        amount: String,
    },
}
