//! Multi-store orchestrations.
//!
//! Anything that touches more than one store, or that pairs a backend call
//! with toast feedback, lives here rather than inside a store.

pub mod auth;
pub mod finance;
