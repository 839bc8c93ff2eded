//! Auth orchestrations that sit outside the session store proper.

use yadi_client::WalletApi;

use crate::errors::AppError;
use crate::views::notifications::Notifications;

/// Trigger the password-reset email.
///
/// Whether the address exists is deliberately not disclosed: any accepted
/// request gets the same confirmation toast. Only transport-level failures
/// surface as errors.
pub async fn request_password_reset(
    api: &dyn WalletApi,
    notifications: &Notifications,
    email: &str,
) -> Result<(), AppError> {
    api.request_password_reset(email).await?;
    notifications.success("If an account exists for that email, a reset link is on its way.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::notifications::ToastLevel;
    use yadi_client::testkit::{FakeApi, FakeOp};
    use yadi_client::ApiError;

    #[tokio::test]
    async fn accepted_request_confirms_via_toast() {
        let api = FakeApi::anonymous();
        let notifications = Notifications::default();

        request_password_reset(&api, &notifications, "amina@example.com")
            .await
            .unwrap();
        let toasts = notifications.current();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Success);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_without_toast() {
        let api = FakeApi::anonymous();
        api.fail_next(FakeOp::PasswordReset, ApiError::transport("timed out"));
        let notifications = Notifications::default();

        let error = request_password_reset(&api, &notifications, "amina@example.com")
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "Network error. Please try again.");
        assert!(notifications.current().is_empty());
    }
}
