//! Error types for the sewa libraries.
//!
//! This module provides a unified error type with explicit variants for
//! transport, HTTP, authentication, API-level and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for sewa operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP responses from the API.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Authentication errors (terminated or unrecoverable sessions).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API-level rejections carried inside a well-formed envelope.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid URL or request body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Check if this error is an HTTP 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Http(http) if http.is_unauthorized())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Non-success HTTP responses.
///
/// Carries the status code and whatever message the server put in the
/// error envelope, when the body was parseable.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an unauthorized (401) response.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server declared the session terminated; re-login is required.
    #[error("session terminated by server")]
    SessionOut,
}

/// An API-level rejection: the envelope arrived intact but `success`
/// was false, or the payload was missing.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Message from the server, or a local description of the defect.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL format.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Request body could not be serialized.
    #[error("invalid request body: {reason}")]
    Body { reason: String },
}
