//! # Yadi Wallet API Client
//!
//! Typed client for the wallet backend REST API. The [`WalletApi`] trait is
//! the seam between the application core and the network: production code
//! uses [`HttpWalletApi`], tests drive the core through the `testkit` fake.
//!
//! All requests ride on a cookie-based session established by the login,
//! registration, and token-exchange endpoints; no method returns a token.
//! A 401/403 from any endpoint maps to [`ApiError::Unauthenticated`] and is
//! never fatal: the application treats it as "not signed in".

pub mod api;
pub mod error;
pub mod http;
pub mod types;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use api::WalletApi;
pub use reqwest::Url;
pub use error::{ApiError, RegistrationError};
pub use http::HttpWalletApi;
pub use types::{
    HistoryItem, HistoryResponse, LoginRequest, RegistrationRequest, Theme, TransferRequest,
    UserProfile, VerificationProof, Wallet, WalletsResponse, WithdrawRequest,
};
