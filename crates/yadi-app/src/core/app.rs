//! The assembled application core.

use std::sync::Arc;

use futures_signals::signal::{Mutable, Signal};
use tracing::info;
use yadi_client::{
    HttpWalletApi, LoginRequest, RegistrationRequest, Theme, Url, WalletApi,
};

use crate::config::AppConfig;
use crate::core::error::IntentError;
use crate::core::intent::Intent;
use crate::errors::AppError;
use crate::preference::{PreferenceStorage, PreferenceStore};
use crate::routing::Route;
use crate::session::SessionStore;
use crate::verification::VerificationFlow;
use crate::views::dashboard::DashboardStore;
use crate::views::notifications::Notifications;
use crate::workflows;

/// Owns every store and the navigation stack.
///
/// One instance per running frontend. Cloning is cheap and shares all
/// underlying state, so shells can hand clones to event handlers freely.
#[derive(Clone)]
pub struct AppCore {
    config: AppConfig,
    api: Arc<dyn WalletApi>,
    session: SessionStore,
    preferences: PreferenceStore,
    verification: VerificationFlow,
    dashboard: DashboardStore,
    notifications: Notifications,
    nav: Mutable<Vec<Route>>,
}

impl AppCore {
    /// Assemble the core around an existing API implementation.
    pub fn new(
        config: AppConfig,
        api: Arc<dyn WalletApi>,
        storage: Arc<dyn PreferenceStorage>,
    ) -> Self {
        let session = SessionStore::new(api.clone());
        let preferences = PreferenceStore::new(api.clone(), storage);
        let verification = VerificationFlow::new(api.clone(), session.clone());
        Self {
            config,
            api,
            session,
            preferences,
            verification,
            dashboard: DashboardStore::default(),
            notifications: Notifications::default(),
            nav: Mutable::new(vec![Route::Home]),
        }
    }

    /// Assemble the core against the configured backend over HTTP.
    pub fn connect(
        config: AppConfig,
        storage: Arc<dyn PreferenceStorage>,
    ) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|error| AppError::Internal(format!("invalid base url: {error}")))?;
        let api = HttpWalletApi::new(base_url, config.request_timeout)
            .map_err(AppError::from)?;
        Ok(Self::new(config, Arc::new(api), storage))
    }

    /// Resolve the session and reconcile preferences. Call once at startup,
    /// before the first screen renders real data.
    pub async fn bootstrap(&self) {
        info!(backend = %self.config.base_url, "starting application core");
        self.session.check_auth().await;
        if let Some(profile) = self.session.profile() {
            self.preferences.reconcile(&profile);
        }
    }

    /// Handle a user action.
    ///
    /// `Err` means the originating form should show an inline message;
    /// actions whose feedback goes through toasts or store state return
    /// `Ok` regardless of the backend outcome.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), IntentError> {
        match intent {
            Intent::Login { email, password } => {
                self.session
                    .login(&LoginRequest { email, password })
                    .await?;
            }
            Intent::Register {
                username,
                email,
                password,
                confirm_password,
            } => {
                if password != confirm_password {
                    return Err(IntentError::Invalid("Passwords don't match".to_string()));
                }
                self.session
                    .register(&RegistrationRequest {
                        username,
                        email,
                        password1: password,
                        password2: confirm_password,
                    })
                    .await?;
            }
            Intent::LoginWithGoogle { access_token } => {
                self.session.login_with_google(&access_token).await?;
            }
            Intent::Logout => {
                self.session.logout().await;
                self.notifications.clear();
                self.nav.set(vec![Route::Login]);
            }
            Intent::RequestPasswordReset { email } => {
                workflows::auth::request_password_reset(
                    self.api.as_ref(),
                    &self.notifications,
                    &email,
                )
                .await?;
            }
            Intent::Navigate { route } => self.navigate(route),
            Intent::GoBack => self.go_back(),
            Intent::SendVerificationCode { contact } => {
                self.verification.send_code(&contact).await;
            }
            Intent::ConfirmVerificationCode { otp } => {
                self.verification.confirm_code(&otp).await;
            }
            Intent::ConfirmVerificationLink { token } => {
                self.verification.confirm_link_token(&token).await;
            }
            Intent::ExchangeMagicToken { token } => {
                self.verification.exchange_magic_link(&token).await;
            }
            Intent::ToggleTheme => {
                self.preferences.toggle_theme().await;
            }
            Intent::RefreshDashboard => {
                workflows::finance::refresh_dashboard(self.api.as_ref(), &self.dashboard).await;
            }
            Intent::CreateWallet { label } => {
                workflows::finance::create_wallet(
                    self.api.as_ref(),
                    &self.dashboard,
                    &self.notifications,
                    &label,
                )
                .await;
            }
            Intent::Withdraw {
                amount,
                source_wallet_id,
                recipient_phone,
                save_beneficiary,
            } => {
                let request = yadi_client::WithdrawRequest {
                    amount,
                    source_wallet_id,
                    recipient_phone,
                    save_beneficiary,
                };
                workflows::finance::withdraw(
                    self.api.as_ref(),
                    &self.dashboard,
                    &self.notifications,
                    &request,
                )
                .await;
            }
            Intent::Transfer {
                source_wallet_id,
                dest_wallet_id,
                recipient_identifier,
                amount,
            } => {
                let request = yadi_client::TransferRequest {
                    source_wallet_id,
                    dest_wallet_id,
                    recipient_identifier,
                    amount,
                };
                workflows::finance::transfer(
                    self.api.as_ref(),
                    &self.dashboard,
                    &self.notifications,
                    &request,
                )
                .await;
            }
        }
        Ok(())
    }

    /// Push a route onto the stack. Entering the verification screen
    /// (re)starts the flow so state never leaks between visits.
    pub fn navigate(&self, route: Route) {
        if route == Route::Kyc {
            self.verification.start();
        }
        let mut nav = self.nav.lock_mut();
        if nav.last() != Some(&route) {
            nav.push(route);
        }
    }

    /// Pop the stack; the bottom entry never pops.
    pub fn go_back(&self) {
        let mut nav = self.nav.lock_mut();
        if nav.len() > 1 {
            nav.pop();
        }
    }

    /// The route on top of the stack.
    #[must_use]
    pub fn current_route(&self) -> Route {
        self.nav.lock_ref().last().copied().unwrap_or(Route::Home)
    }

    /// Reactive subscription surface for the navigation stack.
    pub fn nav_signal(&self) -> impl Signal<Item = Vec<Route>> {
        self.nav.signal_cloned()
    }

    /// The current theme, for shells that style outside the signal graph.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    /// Startup configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The API seam, for workflows driven by the shell directly.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn WalletApi> {
        &self.api
    }

    /// Session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Theme preference store.
    #[must_use]
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Verification flow.
    #[must_use]
    pub fn verification(&self) -> &VerificationFlow {
        &self.verification
    }

    /// Dashboard store.
    #[must_use]
    pub fn dashboard(&self) -> &DashboardStore {
        &self.dashboard
    }

    /// Toast queue.
    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::MemoryPreferenceStorage;
    use crate::session::SessionState;
    use yadi_client::testkit::{sample_profile, FakeApi};

    fn core_with(api: FakeApi) -> (AppCore, Arc<FakeApi>) {
        let api = Arc::new(api);
        let core = AppCore::new(
            AppConfig::default(),
            api.clone(),
            Arc::new(MemoryPreferenceStorage::default()),
        );
        (core, api)
    }

    #[tokio::test]
    async fn bootstrap_resolves_session_and_reconciles_theme() {
        let mut profile = sample_profile();
        profile.theme_preference = Theme::Dark;
        let (core, _) = core_with(FakeApi::signed_in(profile));

        core.bootstrap().await;
        assert!(core.session().state().is_authenticated());
        assert_eq!(core.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn register_with_mismatched_passwords_sends_nothing() {
        let (core, api) = core_with(FakeApi::anonymous());
        core.bootstrap().await;

        let error = core
            .dispatch(Intent::Register {
                username: "amina".to_string(),
                email: "amina@example.com".to_string(),
                password: "one".to_string(),
                confirm_password: "two".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "Passwords don't match");
        assert_eq!(api.call_count("register"), 0);
    }

    #[tokio::test]
    async fn logout_resets_navigation_and_toasts() {
        let (core, _) = core_with(FakeApi::signed_in(sample_profile()));
        core.bootstrap().await;
        core.navigate(Route::Dashboard);
        core.navigate(Route::Settings);
        core.notifications().success("Transfer completed successfully!");

        core.dispatch(Intent::Logout).await.unwrap();
        assert_eq!(core.session().state(), SessionState::Anonymous);
        assert_eq!(core.current_route(), Route::Login);
        assert!(core.notifications().current().is_empty());
    }

    #[tokio::test]
    async fn navigation_deduplicates_and_keeps_bottom_entry() {
        let (core, _) = core_with(FakeApi::anonymous());
        core.navigate(Route::Login);
        core.navigate(Route::Login);
        assert_eq!(core.current_route(), Route::Login);

        core.go_back();
        assert_eq!(core.current_route(), Route::Home);
        core.go_back();
        assert_eq!(core.current_route(), Route::Home);
    }

    #[tokio::test]
    async fn entering_kyc_restarts_the_flow() {
        use crate::verification::VerificationState;

        let (core, _) = core_with(FakeApi::signed_in(sample_profile()));
        core.bootstrap().await;

        core.navigate(Route::Kyc);
        assert!(matches!(
            core.verification().state(),
            VerificationState::AwaitingContact { .. }
        ));
    }
}
