//! # Admin Console Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOREFRONT_API_URL=https://shop.example.com/                        │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/storefront-admin/admin.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.admin/admin.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:5000/, /admin/allproductslist, top-right, 2000 ms  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # admin.toml
//! [api]
//! base_url = "http://localhost:5000/"
//! request_timeout_secs = 30
//!
//! [editor]
//! listing_route = "/admin/allproductslist"
//!
//! [toast]
//! position = "top-right"
//! auto_close_ms = 2000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;
use crate::notify::{ToastOptions, ToastPosition};
use storefront_core::PRODUCT_LIST_ROUTE;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

// =============================================================================
// Sections
// =============================================================================

/// Where the API server lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the API server; `/api/...` paths are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Product editor behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Route navigated to after a successful update or delete.
    #[serde(default = "default_listing_route")]
    pub listing_route: String,
}

fn default_listing_route() -> String {
    PRODUCT_LIST_ROUTE.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            listing_route: default_listing_route(),
        }
    }
}

/// Toast presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastSettings {
    #[serde(default)]
    pub position: ToastPosition,

    /// Milliseconds before a toast closes itself.
    #[serde(default = "default_auto_close")]
    pub auto_close_ms: u64,
}

fn default_auto_close() -> u64 {
    2000
}

impl Default for ToastSettings {
    fn default() -> Self {
        ToastSettings {
            position: ToastPosition::default(),
            auto_close_ms: default_auto_close(),
        }
    }
}

// =============================================================================
// Admin Config
// =============================================================================

/// Complete admin console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub toast: ToastSettings,
}

impl AdminConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (admin.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading admin config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`load`](Self::load)).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "api.request_timeout_secs",
                "must be greater than 0",
            ));
        }

        if !self.editor.listing_route.starts_with('/') {
            return Err(ConfigError::invalid(
                "editor.listing_route",
                "must start with '/'",
            ));
        }

        Ok(())
    }

    /// Returns the parsed base URL, with a trailing slash so relative paths
    /// resolve beneath it.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::invalid("api.base_url", e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("must start with http:// or https://, got: {}", self.api.base_url),
            ));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Returns the options every toast is shown with.
    pub fn toast_options(&self) -> ToastOptions {
        ToastOptions {
            position: self.toast.position,
            auto_close: Duration::from_millis(self.toast.auto_close_ms),
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "admin")
            .map(|dirs| dirs.config_dir().join("admin.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/");
        assert_eq!(config.editor.listing_route, "/admin/allproductslist");
        assert_eq!(config.toast.position, ToastPosition::TopRight);
        assert_eq!(config.toast_options().auto_close, Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AdminConfig::from_toml(
            r#"
            [toast]
            position = "bottom-left"
            "#,
        )
        .unwrap();
        assert_eq!(config.toast.position, ToastPosition::BottomLeft);
        assert_eq!(config.toast.auto_close_ms, 2000);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn test_env_override() {
        let mut config = AdminConfig::default();
        config.apply_overrides(|key| {
            (key == API_URL_ENV).then(|| "https://shop.example.com/admin-api".to_string())
        });
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://shop.example.com/admin-api/"
        );
    }

    #[test]
    fn test_validation() {
        let mut config = AdminConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AdminConfig::default();
        config.api.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AdminConfig::default();
        config.editor.listing_route = "admin/list".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[editor]\nlisting_route = \"/admin/products\"").unwrap();

        let config = AdminConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.editor.listing_route, "/admin/products");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[toast]\nauto_close_ms = \"soon\"").unwrap();

        let err = AdminConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
