//! The application core: intents in, state signals out.

mod app;
mod error;
mod intent;

pub use app::AppCore;
pub use error::IntentError;
pub use intent::Intent;
