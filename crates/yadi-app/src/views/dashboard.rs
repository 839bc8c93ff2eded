//! Dashboard view state: wallets (business + personal) and history.

use futures_signals::signal::{Mutable, Signal};
use serde::Serialize;
use uuid::Uuid;
use yadi_client::{HistoryItem, Wallet, WalletsResponse};

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    /// Escrow/settlement wallets.
    pub business_wallets: Vec<Wallet>,
    /// Spendable wallets.
    pub personal_wallets: Vec<Wallet>,
    /// Transaction history, newest first.
    pub history: Vec<HistoryItem>,
    /// Whether a refresh is in flight.
    pub loading: bool,
}

impl DashboardState {
    /// Look up a wallet in either group.
    #[must_use]
    pub fn wallet(&self, id: Uuid) -> Option<&Wallet> {
        self.business_wallets
            .iter()
            .chain(self.personal_wallets.iter())
            .find(|wallet| wallet.id == id)
    }

    /// The account's main wallet, if the server flagged one.
    #[must_use]
    pub fn primary_wallet(&self) -> Option<&Wallet> {
        self.personal_wallets.iter().find(|wallet| wallet.is_primary)
    }

    /// Total wallet count across both groups.
    #[must_use]
    pub fn wallet_count(&self) -> usize {
        self.business_wallets.len() + self.personal_wallets.len()
    }
}

/// Holds [`DashboardState`] behind a signal. Data is replaced wholesale on
/// refresh; a failed refresh leaves the previous data visible.
#[derive(Clone, Default)]
pub struct DashboardStore {
    state: Mutable<DashboardState>,
}

impl DashboardStore {
    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.state.get_cloned()
    }

    /// Reactive subscription surface.
    pub fn signal(&self) -> impl Signal<Item = DashboardState> {
        self.state.signal_cloned()
    }

    pub(crate) fn begin_refresh(&self) {
        self.state.lock_mut().loading = true;
    }

    pub(crate) fn finish_refresh(&self) {
        self.state.lock_mut().loading = false;
    }

    pub(crate) fn apply(&self, wallets: WalletsResponse, history: Vec<HistoryItem>) {
        self.state.set(DashboardState {
            business_wallets: wallets.business_wallets,
            personal_wallets: wallets.personal_wallets,
            history,
            loading: false,
        });
    }
}
