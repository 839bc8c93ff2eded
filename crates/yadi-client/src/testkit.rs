//! In-memory [`WalletApi`] fake for exercising the application core.
//!
//! Failures are scripted per operation as a queue; an empty queue means
//! success. The fake models the cookie session with a single
//! `authenticated` flag and records every call so tests can assert ordering
//! and counts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::WalletApi;
use crate::error::ApiError;
use crate::types::{
    HistoryItem, LoginRequest, RegistrationRequest, Theme, TransferRequest, UserProfile,
    VerificationProof, WalletsResponse, WithdrawRequest,
};

/// Operations whose next call can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOp {
    /// `fetch_profile`
    Profile,
    /// `login`
    Login,
    /// `register`
    Register,
    /// `login_with_google`
    Google,
    /// `logout`
    Logout,
    /// `request_password_reset`
    PasswordReset,
    /// `send_verification_otp`
    SendOtp,
    /// `confirm_verification`
    Confirm,
    /// `exchange_magic_token`
    Exchange,
    /// `update_theme`
    ThemeSync,
    /// `fetch_wallets`
    Wallets,
    /// `fetch_history`
    History,
    /// `create_wallet`
    CreateWallet,
    /// `withdraw`
    Withdraw,
    /// `transfer`
    Transfer,
}

#[derive(Default)]
struct FakeState {
    profile: Option<UserProfile>,
    authenticated: bool,
    wallets: WalletsResponse,
    history: Vec<HistoryItem>,
    failures: Vec<(FakeOp, VecDeque<ApiError>)>,
    calls: Vec<&'static str>,
}

impl FakeState {
    fn next_failure(&mut self, op: FakeOp) -> Option<ApiError> {
        self.failures
            .iter_mut()
            .find(|(queued, _)| *queued == op)
            .and_then(|(_, queue)| queue.pop_front())
    }
}

/// Scriptable fake backend.
#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<FakeState>,
}

impl FakeApi {
    /// A backend that knows the sample user but has no live session, as if
    /// the session cookie expired.
    #[must_use]
    pub fn anonymous() -> Self {
        let api = Self::default();
        api.lock().profile = Some(sample_profile());
        api
    }

    /// A backend with a live session for the given profile.
    #[must_use]
    pub fn signed_in(profile: UserProfile) -> Self {
        let api = Self::default();
        {
            let mut state = api.lock();
            state.profile = Some(profile);
            state.authenticated = true;
        }
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue a failure for the next call to `op`. Later calls succeed again
    /// unless more failures are queued.
    pub fn fail_next(&self, op: FakeOp, error: ApiError) {
        let mut state = self.lock();
        if let Some((_, queue)) = state.failures.iter_mut().find(|(queued, _)| *queued == op) {
            queue.push_back(error);
            return;
        }
        state.failures.push((op, VecDeque::from([error])));
    }

    /// Replace the server-side profile.
    pub fn set_profile(&self, profile: UserProfile) {
        self.lock().profile = Some(profile);
    }

    /// Mutate the server-side profile in place.
    pub fn update_profile(&self, f: impl FnOnce(&mut UserProfile)) {
        if let Some(profile) = self.lock().profile.as_mut() {
            f(profile);
        }
    }

    /// Seed the wallets response.
    pub fn set_wallets(&self, wallets: WalletsResponse) {
        self.lock().wallets = wallets;
    }

    /// Seed the history response.
    pub fn set_history(&self, history: Vec<HistoryItem>) {
        self.lock().history = history;
    }

    /// Names of every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    /// How many times the named operation was called.
    #[must_use]
    pub fn call_count(&self, name: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str, op: FakeOp) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(name);
        match state.next_failure(op) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// A plausible unverified profile for tests.
#[must_use]
pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: Uuid::from_u128(0x7b2e_7bcb_96b1_4f8e),
        username: "amina".to_string(),
        email: "amina@example.com".to_string(),
        phone_number: None,
        is_kyc_verified: false,
        theme_preference: Theme::Light,
    }
}

#[async_trait]
impl WalletApi for FakeApi {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.record("fetch_profile", FakeOp::Profile)?;
        let state = self.lock();
        if !state.authenticated {
            return Err(ApiError::Unauthenticated);
        }
        state.profile.clone().ok_or(ApiError::Unauthenticated)
    }

    async fn login(&self, _credentials: &LoginRequest) -> Result<(), ApiError> {
        self.record("login", FakeOp::Login)?;
        self.lock().authenticated = true;
        Ok(())
    }

    async fn register(&self, registration: &RegistrationRequest) -> Result<(), ApiError> {
        self.record("register", FakeOp::Register)?;
        let mut state = self.lock();
        state.authenticated = true;
        if let Some(profile) = state.profile.as_mut() {
            profile.username = registration.username.clone();
            profile.email = registration.email.clone();
        }
        Ok(())
    }

    async fn login_with_google(&self, _access_token: &str) -> Result<(), ApiError> {
        self.record("login_with_google", FakeOp::Google)?;
        self.lock().authenticated = true;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout", FakeOp::Logout)?;
        self.lock().authenticated = false;
        Ok(())
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        self.record("request_password_reset", FakeOp::PasswordReset)
    }

    async fn send_verification_otp(&self, _phone_number: &str) -> Result<(), ApiError> {
        self.record("send_verification_otp", FakeOp::SendOtp)
    }

    async fn confirm_verification(&self, _proof: &VerificationProof) -> Result<(), ApiError> {
        self.record("confirm_verification", FakeOp::Confirm)?;
        if let Some(profile) = self.lock().profile.as_mut() {
            profile.is_kyc_verified = true;
        }
        Ok(())
    }

    async fn exchange_magic_token(&self, _token: &str) -> Result<(), ApiError> {
        self.record("exchange_magic_token", FakeOp::Exchange)?;
        let mut state = self.lock();
        state.authenticated = true;
        if let Some(profile) = state.profile.as_mut() {
            profile.is_kyc_verified = true;
        }
        Ok(())
    }

    async fn update_theme(&self, theme: Theme) -> Result<(), ApiError> {
        self.record("update_theme", FakeOp::ThemeSync)?;
        if let Some(profile) = self.lock().profile.as_mut() {
            profile.theme_preference = theme;
        }
        Ok(())
    }

    async fn fetch_wallets(&self) -> Result<WalletsResponse, ApiError> {
        self.record("fetch_wallets", FakeOp::Wallets)?;
        Ok(self.lock().wallets.clone())
    }

    async fn create_wallet(&self, label: &str) -> Result<(), ApiError> {
        self.record("create_wallet", FakeOp::CreateWallet)?;
        let mut state = self.lock();
        state.wallets.personal_wallets.push(crate::types::Wallet {
            id: Uuid::new_v4(),
            label: label.to_string(),
            balance: "0.00".to_string(),
            currency: "KES".to_string(),
            is_frozen: false,
            is_primary: false,
            wallet_type: "personal".to_string(),
        });
        Ok(())
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryItem>, ApiError> {
        self.record("fetch_history", FakeOp::History)?;
        Ok(self.lock().history.clone())
    }

    async fn withdraw(&self, _request: &WithdrawRequest) -> Result<(), ApiError> {
        self.record("withdraw", FakeOp::Withdraw)
    }

    async fn transfer(&self, _request: &TransferRequest) -> Result<(), ApiError> {
        self.record("transfer", FakeOp::Transfer)
    }
}
