//! End-to-end flows through the assembled core: intents in, state out.

use std::sync::Arc;

use yadi_app::verification::VerificationState;
use yadi_app::{
    AppConfig, AppCore, Disposition, Intent, MemoryPreferenceStorage, Route, RouteGate,
    SessionState, Theme,
};
use yadi_client::testkit::{sample_profile, FakeApi, FakeOp};
use yadi_client::{ApiError, UserProfile};

fn core_with(api: FakeApi) -> (AppCore, Arc<FakeApi>) {
    let api = Arc::new(api);
    let core = AppCore::new(
        AppConfig::default(),
        api.clone(),
        Arc::new(MemoryPreferenceStorage::default()),
    );
    (core, api)
}

fn unverified_profile() -> UserProfile {
    let mut profile = sample_profile();
    profile.phone_number = Some("0712345678".to_string());
    profile
}

#[tokio::test]
async fn wrong_password_keeps_user_out() {
    let (core, api) = core_with(FakeApi::anonymous());
    core.bootstrap().await;
    api.fail_next(FakeOp::Login, ApiError::InvalidCredentials);

    let error = core
        .dispatch(Intent::Login {
            email: "amina@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "Invalid email or password.");
    assert_eq!(core.session().state(), SessionState::Anonymous);
    assert_eq!(
        RouteGate::decide(Route::Dashboard, &core.session().state()),
        Disposition::RedirectToLogin {
            return_to: Route::Dashboard
        }
    );
}

#[tokio::test]
async fn login_then_dashboard_renders() {
    let (core, _) = core_with(FakeApi::anonymous());
    core.bootstrap().await;

    core.dispatch(Intent::Login {
        email: "amina@example.com".to_string(),
        password: "s3cret!pass".to_string(),
    })
    .await
    .unwrap();

    let session = core.session().state();
    assert!(session.is_authenticated());
    assert_eq!(
        RouteGate::decide(Route::Dashboard, &session),
        Disposition::Render
    );
    assert_eq!(
        RouteGate::decide(Route::Login, &session),
        Disposition::RedirectToDashboard
    );
}

#[tokio::test]
async fn otp_verification_happy_path() {
    let (core, _) = core_with(FakeApi::signed_in(unverified_profile()));
    core.bootstrap().await;

    core.dispatch(Intent::Navigate { route: Route::Kyc })
        .await
        .unwrap();
    assert_eq!(
        core.verification().state(),
        VerificationState::AwaitingContact {
            contact: "0712345678".to_string(),
            error: None,
        }
    );

    core.dispatch(Intent::SendVerificationCode {
        contact: "0712345678".to_string(),
    })
    .await
    .unwrap();
    core.dispatch(Intent::ConfirmVerificationCode {
        otp: "123456".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(core.verification().state(), VerificationState::Verified);
    assert!(core
        .session()
        .profile()
        .is_some_and(|profile| profile.is_kyc_verified));
}

#[tokio::test]
async fn invalid_magic_link_leaves_user_anonymous() {
    let (core, api) = core_with(FakeApi::anonymous());
    core.bootstrap().await;
    api.fail_next(FakeOp::Exchange, ApiError::rejected("Token expired"));

    core.dispatch(Intent::ExchangeMagicToken {
        token: "stale".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(
        core.verification().state(),
        VerificationState::Failed {
            reason: "This link has expired or is invalid.".to_string(),
        }
    );
    // No session resulted, so protected routes still bounce to login.
    assert_eq!(
        RouteGate::decide(Route::Dashboard, &core.session().state()),
        Disposition::RedirectToLogin {
            return_to: Route::Dashboard
        }
    );
}

#[tokio::test]
async fn logout_returns_to_login_screen() {
    let (core, _) = core_with(FakeApi::signed_in(sample_profile()));
    core.bootstrap().await;
    core.dispatch(Intent::Navigate {
        route: Route::Dashboard,
    })
    .await
    .unwrap();

    core.dispatch(Intent::Logout).await.unwrap();
    assert_eq!(core.current_route(), Route::Login);
    assert_eq!(core.session().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn theme_toggles_through_dispatch() {
    let (core, api) = core_with(FakeApi::signed_in(sample_profile()));
    core.bootstrap().await;
    assert_eq!(core.theme(), Theme::Light);

    core.dispatch(Intent::ToggleTheme).await.unwrap();
    assert_eq!(core.theme(), Theme::Dark);
    assert_eq!(api.call_count("update_theme"), 1);
}

#[tokio::test]
async fn dashboard_refresh_and_withdrawal_feedback() {
    use uuid::Uuid;
    use yadi_client::{Wallet, WalletsResponse};

    let (core, api) = core_with(FakeApi::signed_in(sample_profile()));
    core.bootstrap().await;
    let wallet_id = Uuid::new_v4();
    api.set_wallets(WalletsResponse {
        business_wallets: Vec::new(),
        personal_wallets: vec![Wallet {
            id: wallet_id,
            label: "Main Wallet".to_string(),
            balance: "350.50".to_string(),
            currency: "KES".to_string(),
            is_frozen: false,
            is_primary: true,
            wallet_type: "personal".to_string(),
        }],
    });

    core.dispatch(Intent::RefreshDashboard).await.unwrap();
    assert_eq!(core.dashboard().state().wallet_count(), 1);

    api.fail_next(
        FakeOp::Withdraw,
        ApiError::rejected("Insufficient funds in source wallet"),
    );
    core.dispatch(Intent::Withdraw {
        amount: "10000".to_string(),
        source_wallet_id: wallet_id,
        recipient_phone: "0712345678".to_string(),
        save_beneficiary: false,
    })
    .await
    .unwrap();

    let toasts = core.notifications().current();
    assert_eq!(
        toasts.last().map(|toast| toast.message.as_str()),
        Some("Insufficient funds in source wallet")
    );
    // The failed withdrawal did not touch the cached dashboard.
    assert_eq!(core.dashboard().state().wallet_count(), 1);
}
