//! The `{success, data, message}` response envelope.
//!
//! Every API endpoint wraps its payload in this envelope. Callers almost
//! always want the unwrapped payload; the guard is the exception and
//! inspects the envelope itself.

use serde::Deserialize;

use crate::Result;
use crate::error::ApiError;

/// Standard response wrapper returned by the back-office API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,

    /// The payload, present on success.
    #[serde(default)]
    pub data: Option<T>,

    /// Human-readable message, usually present on failure.
    #[serde(default)]
    pub message: Option<String>,

    /// Set by the server when the session itself is invalid, as opposed
    /// to a merely expired access token.
    #[serde(default)]
    pub session_out: Option<bool>,
}

impl<T> Envelope<T> {
    /// Check if the server flagged the session as terminated.
    pub fn is_session_out(&self) -> bool {
        self.session_out == Some(true)
    }

    /// Unwrap the payload, turning a rejection or a missing payload into
    /// an [`ApiError`].
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(rejection(self.message));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::new("response envelope carried no data").into()),
        }
    }

    /// Check the success flag, discarding any payload.
    ///
    /// For endpoints whose envelope carries nothing of interest.
    pub fn into_unit(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(rejection(self.message))
        }
    }
}

fn rejection(message: Option<String>) -> crate::Error {
    ApiError::new(message.unwrap_or_else(|| "request rejected by server".to_string())).into()
}
