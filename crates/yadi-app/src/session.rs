//! Session store: the authoritative client-side view of "who is signed in".

use std::sync::Arc;

use futures_signals::signal::{Mutable, Signal};
use tracing::{debug, warn};
use yadi_client::{LoginRequest, RegistrationRequest, UserProfile, WalletApi};

use crate::errors::AppError;

/// Authentication state.
///
/// `Unknown` exists only before the first identity check completes and is
/// indistinguishable from `Loading` to consumers: both report
/// [`SessionState::is_resolving`], and the route gate renders a placeholder
/// for either.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No identity check has started yet.
    #[default]
    Unknown,
    /// The initial identity check is in flight.
    Loading,
    /// A server-confirmed identity.
    Authenticated(UserProfile),
    /// No valid session.
    Anonymous,
}

impl SessionState {
    /// True before the first identity check has resolved.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Unknown | Self::Loading)
    }

    /// True when a server-confirmed identity is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The identity, when authenticated.
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Owns the current [`SessionState`] and every auth action that mutates it.
///
/// Identity is replaced wholesale: every mutating action resynchronizes by
/// refetching the profile, never by patching local state. Cloning the store
/// shares the underlying state cell.
#[derive(Clone)]
pub struct SessionStore {
    state: Mutable<SessionState>,
    api: Arc<dyn WalletApi>,
}

impl SessionStore {
    /// A store that has not yet checked the session.
    pub fn new(api: Arc<dyn WalletApi>) -> Self {
        Self {
            state: Mutable::new(SessionState::Unknown),
            api,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.get_cloned()
    }

    /// Reactive subscription surface for frontends.
    pub fn signal(&self) -> impl Signal<Item = SessionState> {
        self.state.signal_cloned()
    }

    /// The identity, when authenticated.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.lock_ref().profile().cloned()
    }

    /// Refresh identity from the profile endpoint.
    ///
    /// Always terminates in `Authenticated` or `Anonymous`; any failure,
    /// including an expired session, resolves to `Anonymous`. The store-level
    /// loading flag is only raised during the initial check — mutating
    /// actions rely on caller-local pending flags instead.
    pub async fn check_auth(&self) {
        if self.state.lock_ref().is_resolving() {
            self.state.set(SessionState::Loading);
        }
        match self.api.fetch_profile().await {
            Ok(profile) => {
                debug!(user = %profile.username, "session resolved");
                self.state.set(SessionState::Authenticated(profile));
            }
            Err(error) => {
                debug!(%error, "session check resolved anonymous");
                self.state.set(SessionState::Anonymous);
            }
        }
    }

    /// Password login.
    ///
    /// The session cookie is a transport side effect; success is reported
    /// only after the identity refresh completes, so callers may navigate
    /// into protected views as soon as this returns. On failure the state is
    /// left untouched — there is no optimistic transition.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), AppError> {
        self.api.login(credentials).await?;
        self.check_auth().await;
        Ok(())
    }

    /// Create an account; the backend signs the new user in on success.
    /// Failures keep their field-level classification for messaging.
    pub async fn register(&self, registration: &RegistrationRequest) -> Result<(), AppError> {
        self.api.register(registration).await?;
        self.check_auth().await;
        Ok(())
    }

    /// Exchange a third-party OAuth access token for a session.
    pub async fn login_with_google(&self, access_token: &str) -> Result<(), AppError> {
        self.api.login_with_google(access_token).await?;
        self.check_auth().await;
        Ok(())
    }

    /// Best-effort logout.
    ///
    /// Remote invalidation failures are logged and swallowed; local state is
    /// cleared unconditionally so no stale identity survives. The shell is
    /// expected to hard-navigate to the login screen afterwards.
    pub async fn logout(&self) {
        if let Err(error) = self.api.logout().await {
            warn!(%error, "remote logout failed; clearing local session anyway");
        }
        self.state.set(SessionState::Anonymous);
    }
}
