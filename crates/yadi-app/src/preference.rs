//! Theme preference store.
//!
//! Two sources of truth: local persistent storage (instant, wins until the
//! server responds) and the server profile (reconciled at most once per
//! bootstrap). Toggling is optimistic; a failed server sync never rolls the
//! local value back — that is product behavior, not a bug.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures_signals::signal::{Mutable, Signal};
use tracing::warn;
use yadi_client::{Theme, UserProfile, WalletApi};

/// Frontend-provided persistent storage plus the system light/dark signal.
///
/// `load_theme`/`store_theme` must be synchronous: the initial theme has to
/// resolve before first paint to avoid a flash of the wrong theme.
pub trait PreferenceStorage: Send + Sync {
    /// Read the persisted theme, if any.
    fn load_theme(&self) -> Option<Theme>;
    /// Persist the theme.
    fn store_theme(&self, theme: Theme);
    /// System-level light/dark preference, used when nothing is persisted.
    fn system_theme(&self) -> Theme {
        Theme::Light
    }
}

/// Owns the current [`Theme`] and its two-way sync with storage and server.
#[derive(Clone)]
pub struct PreferenceStore {
    theme: Mutable<Theme>,
    storage: Arc<dyn PreferenceStorage>,
    api: Arc<dyn WalletApi>,
    reconciled: Arc<AtomicBool>,
}

impl PreferenceStore {
    /// Resolve the initial theme synchronously from storage, falling back to
    /// the system preference.
    pub fn new(api: Arc<dyn WalletApi>, storage: Arc<dyn PreferenceStorage>) -> Self {
        let initial = storage
            .load_theme()
            .unwrap_or_else(|| storage.system_theme());
        Self {
            theme: Mutable::new(initial),
            storage,
            api,
            reconciled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Reactive subscription surface.
    pub fn signal(&self) -> impl Signal<Item = Theme> {
        self.theme.signal()
    }

    /// Reconcile with the server profile; runs at most once per bootstrap.
    /// The server value wins when the two disagree.
    pub fn reconcile(&self, profile: &UserProfile) {
        if self.reconciled.swap(true, Ordering::SeqCst) {
            return;
        }
        let server = profile.theme_preference;
        if server != self.theme.get() {
            self.theme.set(server);
            self.storage.store_theme(server);
        }
    }

    /// Optimistic toggle.
    ///
    /// Local state and persisted storage flip immediately and
    /// unconditionally; the server sync then runs best-effort. Sync failure
    /// is logged, never surfaced, and never reverts the toggle.
    pub async fn toggle_theme(&self) -> Theme {
        let next = self.theme.get().toggled();
        self.theme.set(next);
        self.storage.store_theme(next);
        if let Err(error) = self.api.update_theme(next).await {
            warn!(%error, "theme sync failed; keeping local preference");
        }
        next
    }
}

/// In-memory storage for tests and native shells without a browser.
#[derive(Default)]
pub struct MemoryPreferenceStorage {
    saved: Mutex<Option<Theme>>,
    system: Theme,
}

impl MemoryPreferenceStorage {
    /// Empty storage with the given system preference.
    #[must_use]
    pub fn with_system(system: Theme) -> Self {
        Self {
            saved: Mutex::new(None),
            system,
        }
    }

    /// Storage that already holds a persisted theme.
    #[must_use]
    pub fn persisted(theme: Theme) -> Self {
        Self {
            saved: Mutex::new(Some(theme)),
            system: Theme::Light,
        }
    }
}

impl PreferenceStorage for MemoryPreferenceStorage {
    fn load_theme(&self) -> Option<Theme> {
        *self
            .saved
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn store_theme(&self, theme: Theme) {
        *self
            .saved
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(theme);
    }

    fn system_theme(&self) -> Theme {
        self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yadi_client::testkit::{sample_profile, FakeApi, FakeOp};
    use yadi_client::ApiError;

    fn store_with(
        api: FakeApi,
        storage: MemoryPreferenceStorage,
    ) -> (PreferenceStore, Arc<FakeApi>, Arc<MemoryPreferenceStorage>) {
        let api = Arc::new(api);
        let storage = Arc::new(storage);
        (
            PreferenceStore::new(api.clone(), storage.clone()),
            api,
            storage,
        )
    }

    #[test]
    fn init_prefers_persisted_over_system() {
        let (store, _, _) = store_with(
            FakeApi::anonymous(),
            MemoryPreferenceStorage::persisted(Theme::Dark),
        );
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn init_falls_back_to_system() {
        let (store, _, _) = store_with(
            FakeApi::anonymous(),
            MemoryPreferenceStorage::with_system(Theme::Dark),
        );
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn reconcile_applies_server_value_once() {
        let (store, _, storage) = store_with(
            FakeApi::anonymous(),
            MemoryPreferenceStorage::persisted(Theme::Light),
        );

        let mut profile = sample_profile();
        profile.theme_preference = Theme::Dark;
        store.reconcile(&profile);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(storage.load_theme(), Some(Theme::Dark));

        // A second reconcile is a no-op, even with a different value.
        profile.theme_preference = Theme::Light;
        store.reconcile(&profile);
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn toggle_is_optimistic_and_syncs() {
        let (store, api, storage) = store_with(
            FakeApi::signed_in(sample_profile()),
            MemoryPreferenceStorage::persisted(Theme::Light),
        );

        let next = store.toggle_theme().await;
        assert_eq!(next, Theme::Dark);
        assert_eq!(storage.load_theme(), Some(Theme::Dark));
        assert_eq!(api.call_count("update_theme"), 1);
    }

    #[tokio::test]
    async fn sync_failure_never_reverts_the_toggle() {
        let (store, api, storage) = store_with(
            FakeApi::signed_in(sample_profile()),
            MemoryPreferenceStorage::persisted(Theme::Light),
        );
        api.fail_next(FakeOp::ThemeSync, ApiError::transport("connection refused"));

        let next = store.toggle_theme().await;
        assert_eq!(next, Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(storage.load_theme(), Some(Theme::Dark));
    }

    #[tokio::test]
    async fn double_toggle_in_one_tick_round_trips_and_syncs_twice() {
        let (store, api, _) = store_with(
            FakeApi::signed_in(sample_profile()),
            MemoryPreferenceStorage::persisted(Theme::Light),
        );

        futures::join!(store.toggle_theme(), store.toggle_theme());
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(api.call_count("update_theme"), 2);
    }
}
