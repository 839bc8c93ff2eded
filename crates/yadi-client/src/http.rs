//! Cookie-session HTTP implementation of [`WalletApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::WalletApi;
use crate::error::{ApiError, RegistrationError};
use crate::types::{
    HistoryItem, HistoryResponse, LoginRequest, RegistrationRequest, Theme, TransferRequest,
    UserProfile, VerificationProof, WalletsResponse, WithdrawRequest,
};

mod paths {
    pub const PROFILE: &str = "/api/users/profile/";
    pub const LOGIN: &str = "/api/auth/login/";
    pub const REGISTRATION: &str = "/api/auth/registration/";
    pub const GOOGLE: &str = "/api/auth/google/";
    pub const LOGOUT: &str = "/api/auth/logout/";
    pub const PASSWORD_RESET: &str = "/api/auth/password/reset/";
    pub const SEND_OTP: &str = "/api/users/verify/send-otp/";
    pub const VERIFY_CONFIRM: &str = "/api/users/verify/confirm/";
    pub const AUTH_EXCHANGE: &str = "/api/users/auth/exchange/";
    pub const WALLETS: &str = "/api/finance/wallets/";
    pub const HISTORY: &str = "/api/finance/history/";
    pub const WITHDRAW: &str = "/api/finance/withdraw/";
    pub const TRANSFER: &str = "/api/finance/transfer/";
}

/// [`WalletApi`] over HTTP with an in-process cookie jar.
///
/// The jar carries the session cookie set by the auth endpoints, so every
/// subsequent call is implicitly credentialed.
pub struct HttpWalletApi {
    http: Client,
    base_url: Url,
}

impl HttpWalletApi {
    /// Build a client against the given backend.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::transport(error.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest` client (must have a cookie store enabled).
    #[must_use]
    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &'static str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::transport(format!("invalid url {path}: {error}")))
    }

    async fn get(&self, path: &'static str) -> Result<Response, ApiError> {
        self.http
            .get(self.url(path)?)
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))
    }

    async fn post<B>(&self, path: &'static str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.http
            .post(self.url(path)?)
            .json(body)
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))
    }

    async fn patch<B>(&self, path: &'static str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.http
            .patch(self.url(path)?)
            .json(body)
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))
    }
}

/// Map a non-success response to the error taxonomy.
///
/// 401/403 always mean "no valid session". Everything else is read as a
/// business-rule rejection, preferring the server's `error`/`detail` body
/// field so the message can be shown verbatim.
async fn expect_success(response: Response, context: &'static str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!(%status, context, "wallet api call failed");
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthenticated);
    }
    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("error")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{context} failed with status {status}"));
    Err(ApiError::rejected(message))
}

#[async_trait]
impl WalletApi for HttpWalletApi {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self.get(paths::PROFILE).await?;
        let response = expect_success(response, "profile").await?;
        response
            .json()
            .await
            .map_err(|_| ApiError::Decode { context: "profile" })
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        let response = self.post(paths::LOGIN, credentials).await?;
        // The login endpoint reports bad credentials as a plain 400.
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(ApiError::InvalidCredentials);
        }
        expect_success(response, "login").await?;
        Ok(())
    }

    async fn register(&self, registration: &RegistrationRequest) -> Result<(), ApiError> {
        let response = self.post(paths::REGISTRATION, registration).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthenticated);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Err(RegistrationError::from_body(&body).into())
    }

    async fn login_with_google(&self, access_token: &str) -> Result<(), ApiError> {
        let body = json!({ "access_token": access_token });
        let response = self.post(paths::GOOGLE, &body).await?;
        expect_success(response, "google login").await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self.post(paths::LOGOUT, &json!({})).await?;
        expect_success(response, "logout").await?;
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let body = json!({ "email": email });
        let response = self.post(paths::PASSWORD_RESET, &body).await?;
        expect_success(response, "password reset").await?;
        Ok(())
    }

    async fn send_verification_otp(&self, phone_number: &str) -> Result<(), ApiError> {
        let body = json!({ "phone_number": phone_number });
        let response = self.post(paths::SEND_OTP, &body).await?;
        expect_success(response, "send otp").await?;
        Ok(())
    }

    async fn confirm_verification(&self, proof: &VerificationProof) -> Result<(), ApiError> {
        let response = self.post(paths::VERIFY_CONFIRM, proof).await?;
        expect_success(response, "verify confirm").await?;
        Ok(())
    }

    async fn exchange_magic_token(&self, token: &str) -> Result<(), ApiError> {
        let body = json!({ "token": token });
        let response = self.post(paths::AUTH_EXCHANGE, &body).await?;
        expect_success(response, "token exchange").await?;
        Ok(())
    }

    async fn update_theme(&self, theme: Theme) -> Result<(), ApiError> {
        let body = json!({ "theme_preference": theme });
        let response = self.patch(paths::PROFILE, &body).await?;
        expect_success(response, "theme update").await?;
        Ok(())
    }

    async fn fetch_wallets(&self) -> Result<WalletsResponse, ApiError> {
        let response = self.get(paths::WALLETS).await?;
        let response = expect_success(response, "wallets").await?;
        response
            .json()
            .await
            .map_err(|_| ApiError::Decode { context: "wallets" })
    }

    async fn create_wallet(&self, label: &str) -> Result<(), ApiError> {
        let body = json!({ "label": label });
        let response = self.post(paths::WALLETS, &body).await?;
        expect_success(response, "create wallet").await?;
        Ok(())
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryItem>, ApiError> {
        let response = self.get(paths::HISTORY).await?;
        let response = expect_success(response, "history").await?;
        let page: HistoryResponse = response
            .json()
            .await
            .map_err(|_| ApiError::Decode { context: "history" })?;
        Ok(page.into_items())
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<(), ApiError> {
        let response = self.post(paths::WITHDRAW, request).await?;
        expect_success(response, "withdraw").await?;
        Ok(())
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), ApiError> {
        let response = self.post(paths::TRANSFER, request).await?;
        expect_success(response, "transfer").await?;
        Ok(())
    }
}
