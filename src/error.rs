//! Error handling for the dealership client

use std::fmt;
use thiserror::Error;

/// Unified error type for the dealership client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT decoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Local file errors (preferences, image files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The gateway answered with a non-2xx status
    #[error("Gateway error ({status}): {message}")]
    Gateway { status: u16, message: String },

    /// A local precondition failed before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Admin session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Image upload errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new gateway error
    pub fn gateway<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Gateway {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// The request never got a usable answer from the gateway
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Json(_) | Error::Url(_))
    }

    /// The gateway answered and reported a failure
    pub fn is_gateway(&self) -> bool {
        matches!(self, Error::Gateway { .. })
    }

    /// Nothing was sent because the input was rejected locally
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// A short description suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(_) | Error::Url(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            Error::Json(_) => "The server sent an unexpected response.".to_string(),
            Error::Gateway { message, .. } => message.clone(),
            Error::Validation(msg) => msg.clone(),
            Error::Auth(msg) => msg.clone(),
            Error::Jwt(_) => "Your admin session is not valid.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
