//! Dashboard refresh and money-movement orchestrations.
//!
//! Money movement is strictly request/confirm: the client submits the
//! user's input, the server decides, and the dashboard is refreshed from
//! the server afterwards. No balance is ever adjusted locally.

use tracing::warn;
use yadi_client::{ApiError, TransferRequest, WalletApi, WithdrawRequest};

use crate::views::dashboard::DashboardStore;
use crate::views::notifications::Notifications;

/// Prefer the server's rejection message; fall back to screen copy.
fn toast_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Rejected { message } => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Reload wallets and history, replacing the view state wholesale.
///
/// A failed refresh leaves the previous data on screen; staleness beats a
/// blank dashboard.
pub async fn refresh_dashboard(api: &dyn WalletApi, dashboard: &DashboardStore) {
    dashboard.begin_refresh();
    let wallets = api.fetch_wallets().await;
    let history = api.fetch_history().await;
    match (wallets, history) {
        (Ok(wallets), Ok(history)) => dashboard.apply(wallets, history),
        (wallets, history) => {
            if let Err(error) = &wallets {
                warn!(%error, "wallet refresh failed; keeping previous data");
            }
            if let Err(error) = &history {
                warn!(%error, "history refresh failed; keeping previous data");
            }
            dashboard.finish_refresh();
        }
    }
}

/// Create a personal wallet, then refresh.
pub async fn create_wallet(
    api: &dyn WalletApi,
    dashboard: &DashboardStore,
    notifications: &Notifications,
    label: &str,
) {
    match api.create_wallet(label).await {
        Ok(()) => {
            notifications.success("New wallet created successfully!");
            refresh_dashboard(api, dashboard).await;
        }
        Err(error) => notifications.error(toast_message(&error, "Failed to create wallet")),
    }
}

/// Submit a withdrawal, then refresh.
///
/// Rejections (insufficient funds, frozen wallet, limits) arrive as toast
/// text verbatim from the server.
pub async fn withdraw(
    api: &dyn WalletApi,
    dashboard: &DashboardStore,
    notifications: &Notifications,
    request: &WithdrawRequest,
) {
    match api.withdraw(request).await {
        Ok(()) => {
            notifications.success(format!("Success! Funds sent to {}", request.recipient_phone));
            refresh_dashboard(api, dashboard).await;
        }
        Err(error) => notifications.error(toast_message(&error, "Transaction Failed")),
    }
}

/// Submit a transfer, then refresh.
pub async fn transfer(
    api: &dyn WalletApi,
    dashboard: &DashboardStore,
    notifications: &Notifications,
    request: &TransferRequest,
) {
    match api.transfer(request).await {
        Ok(()) => {
            notifications.success("Transfer completed successfully!");
            refresh_dashboard(api, dashboard).await;
        }
        Err(error) => notifications.error(toast_message(&error, "Transfer failed")),
    }
}
