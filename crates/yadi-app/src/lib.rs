//! # Yadi App Core
//!
//! Portable headless application core for the Yadi wallet client. Owns the
//! session, preference, verification, and dashboard state, and orchestrates
//! calls against the backend through [`yadi_client::WalletApi`]. All
//! business rules (balances, transfer limits, withdrawal approval, KYC
//! adjudication) live server-side; this crate is state orchestration only.
//!
//! Frontends render from reactive state and feed user actions back in as
//! [`Intent`]s:
//!
//! ```text
//! View → Intent → Store → backend call → store mutation → re-render
//! ```
//!
//! State is exposed as `futures-signals` mutables; a frontend subscribes
//! with the stores' `signal()` methods and re-renders on change. The core is
//! single-writer by construction of the UI event loop, so stores need no
//! interior locking beyond the signal cells themselves.

pub mod config;
pub mod core;
pub mod errors;
pub mod preference;
pub mod routing;
pub mod session;
pub mod verification;
pub mod views;
pub mod workflows;

pub use config::AppConfig;
pub use core::{AppCore, Intent, IntentError};
pub use errors::AppError;
pub use preference::{MemoryPreferenceStorage, PreferenceStorage, PreferenceStore};
pub use routing::{Disposition, Route, RouteAccess, RouteGate};
pub use session::{SessionState, SessionStore};
pub use verification::{VerificationFlow, VerificationState};

pub use yadi_client::{Theme, UserProfile};
