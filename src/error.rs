//! Error types for the image search core

use thiserror::Error;

/// Main error type for image search sessions
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Search API returned no usable result list or the call itself failed
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// An image payload could not be decoded
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// A URL could not be fetched within its budget
    #[error("Fetch failed for {url}: {message}")]
    FetchFailed {
        /// URL that failed to resolve
        url: String,
        /// Error message
        message: String,
    },

    /// Reply text does not map to a displayed tile
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Reply from a user other than the session owner
    #[error("Unauthorized reply from user {0}")]
    Unauthorized(String),

    /// No session bound to the replied-to message
    #[error("No session bound to message {0}")]
    SessionNotFound(String),

    /// Outbound message could not be delivered
    #[error("Send failed: {0}")]
    Send(String),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decode error when parsing API responses
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// Image encode/decode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for image search operations
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Create a search unavailable error
    pub fn search_unavailable(msg: impl Into<String>) -> Self {
        Self::SearchUnavailable(msg.into())
    }

    /// Create a decode failed error
    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Self::DecodeFailed(msg.into())
    }

    /// Create a fetch failed error
    pub fn fetch_failed(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid selection error
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(user: impl Into<String>) -> Self {
        Self::Unauthorized(user.into())
    }

    /// Create a session not found error
    pub fn session_not_found(message_id: impl Into<String>) -> Self {
        Self::SessionNotFound(message_id.into())
    }

    /// Create a send error
    pub fn send(msg: impl Into<String>) -> Self {
        Self::Send(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
