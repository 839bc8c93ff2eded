//! Application configuration.

use std::time::Duration;

/// Configuration for [`crate::AppCore`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the wallet backend.
    pub base_url: String,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
    /// Key under which the theme is persisted in local storage.
    pub theme_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            theme_storage_key: "yadi-theme".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.theme_storage_key, "yadi-theme");
    }
}
