//! Error handling for the estate admin client

use std::fmt;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the estate admin client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Client-side validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    /// Image upload errors
    #[error("Upload error: {0}")]
    Upload(String),

    /// The operation is not offered by this resource
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Local file errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new upload error
    pub fn upload<T: fmt::Display>(msg: T) -> Self {
        Error::Upload(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new unsupported-operation error
    pub fn unsupported<T: fmt::Display>(msg: T) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Status code of a server-side failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text suitable for an error dialog.
    ///
    /// Server failures show the message extracted from the response body,
    /// everything else falls back to the display form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::Auth(msg) | Error::Upload(msg) | Error::General(msg) => msg.clone(),
            Error::Validation(failure) => failure.to_string(),
            other => other.to_string(),
        }
    }

    /// Text for pages and dialogs that carry their own wording.
    ///
    /// Only a non-empty server message or a validation failure is shown;
    /// transport and decoding failures read as `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Error::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Error::Validation(failure) => failure.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Fields rejected by client-side validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Labels of required fields left empty
    pub missing: Vec<String>,
    /// Messages for fields that are present but malformed
    pub invalid: Vec<String>,
}

impl ValidationFailure {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    pub fn missing(&mut self, label: impl Into<String>) {
        self.missing.push(label.into());
    }

    pub fn invalid(&mut self, message: impl Into<String>) {
        self.invalid.push(message.into());
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!(
                "Please complete all required fields: {}",
                self.missing.join(", ")
            ));
        }
        parts.extend(self.invalid.iter().cloned());
        write!(f, "{}", parts.join(". "))
    }
}
