//! # Admin Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Admin Client Error Categories                        │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │  Configuration  │  │   Transport     │  │     Boundary            │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │  ConfigError    │  │  Transport      │  │  Decode (bad record)    │  │
//! │  │  InvalidUrl     │  │  Timeout        │  │  Status (non-2xx)       │  │
//! │  │                 │  │                 │  │  Payload (bad draft)    │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  Every ClientError reaching the editor is reported with a generic       │
//! │  toast. A server {"error": msg} on update is NOT a ClientError: it is   │
//! │  UpdateOutcome::Rejected and its message is shown verbatim.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for admin client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures talking to the API server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection dropped.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a status the operation does not accept.
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body does not match the expected record.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The draft could not be turned into a request payload.
    #[error("Invalid payload: {0}")]
    Payload(#[from] ValidationError),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AdminConfig`](crate::AdminConfig).
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
