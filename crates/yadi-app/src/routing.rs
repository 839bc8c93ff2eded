//! Routes and the access gate.
//!
//! Every navigation target is gated centrally: a route declares its access
//! class, and [`RouteGate::decide`] turns that plus the current session
//! state into exactly one disposition. Screens never check auth themselves.

use crate::session::SessionState;

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public landing page.
    Home,
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// Password-reset request form.
    ForgotPassword,
    /// Magic-link landing page; carries its token in the query string.
    MagicLogin,
    /// Wallets and history.
    Dashboard,
    /// Identity verification flow.
    Kyc,
    /// Profile and preferences.
    Settings,
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone, any session state.
    Open,
    /// Anonymous users only; signed-in users are bounced to the dashboard.
    PublicOnly,
    /// Signed-in users only; anonymous users are bounced to login.
    Protected,
}

impl Route {
    /// All routes, for table-driven tests and sitemap generation.
    pub const fn all() -> [Route; 8] {
        [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::ForgotPassword,
            Route::MagicLogin,
            Route::Dashboard,
            Route::Kyc,
            Route::Settings,
        ]
    }

    /// Canonical URL path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::MagicLogin => "/auth/magic-login",
            Route::Dashboard => "/dashboard",
            Route::Kyc => "/kyc",
            Route::Settings => "/settings",
        }
    }

    /// Parse a URL path, ignoring any query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split('?').next().unwrap_or(path);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::all().into_iter().find(|route| route.path() == path)
    }

    /// Access class, the single source of truth for gating.
    #[must_use]
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Home | Route::MagicLogin => RouteAccess::Open,
            Route::Login | Route::Register | Route::ForgotPassword => RouteAccess::PublicOnly,
            Route::Dashboard | Route::Kyc | Route::Settings => RouteAccess::Protected,
        }
    }
}

/// What the shell should do for a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Show the screen.
    Render,
    /// Session still resolving; show a neutral placeholder, never a flash
    /// of the wrong screen or a premature redirect.
    Placeholder,
    /// Bounce to login, remembering where the user wanted to go.
    RedirectToLogin {
        /// The protected route to return to after sign-in.
        return_to: Route,
    },
    /// Signed-in user on a public-only screen; send them home.
    RedirectToDashboard,
}

/// Stateless gate: route access class × session state → disposition.
pub struct RouteGate;

impl RouteGate {
    /// Decide what to do for `route` under `session`.
    #[must_use]
    pub fn decide(route: Route, session: &SessionState) -> Disposition {
        match route.access() {
            RouteAccess::Open => Disposition::Render,
            RouteAccess::PublicOnly => {
                if session.is_resolving() {
                    Disposition::Placeholder
                } else if session.is_authenticated() {
                    Disposition::RedirectToDashboard
                } else {
                    Disposition::Render
                }
            }
            RouteAccess::Protected => {
                if session.is_resolving() {
                    Disposition::Placeholder
                } else if session.is_authenticated() {
                    Disposition::Render
                } else {
                    Disposition::RedirectToLogin { return_to: route }
                }
            }
        }
    }
}
