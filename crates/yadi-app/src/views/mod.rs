//! # View State
//!
//! Read models frontends render from. View state is replaced wholesale by
//! workflows; selection, focus, and other ephemeral UI concerns belong to
//! the frontend, not here.

pub mod dashboard;
pub mod notifications;

pub use dashboard::{DashboardState, DashboardStore};
pub use notifications::{Notifications, Toast, ToastLevel};
