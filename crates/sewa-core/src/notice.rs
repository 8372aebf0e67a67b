//! One-time user-facing notices.
//!
//! When the server ends a session, the client queues a notice for the
//! sign-in screen to show after the forced navigation. The notice rides
//! in a cookie so it survives the page transition.

use serde::{Deserialize, Serialize};

/// Name of the cookie that carries a pending notice.
pub const TOAST_COOKIE: &str = "toastMessage";

/// Seconds a pending notice stays readable (one day).
pub const TOAST_MAX_AGE_SECS: u64 = 86_400;

/// Title shown when a session ends server-side.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired.";

/// Companion description for the session-expired notice.
pub const SESSION_EXPIRED_DESCRIPTION: &str = "Please sign in again to continue.";

/// A one-time notice: a short title plus a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub description: String,
}

impl Notice {
    /// Create a new notice.
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
        }
    }

    /// The standard notice queued when the server terminates a session.
    pub fn session_expired() -> Self {
        Self::new(SESSION_EXPIRED_MESSAGE, SESSION_EXPIRED_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_uses_standard_text() {
        let notice = Notice::session_expired();
        assert_eq!(notice.message, SESSION_EXPIRED_MESSAGE);
        assert_eq!(notice.description, SESSION_EXPIRED_DESCRIPTION);
    }

    #[test]
    fn notice_round_trips_through_json() {
        let notice = Notice::new("Saved", "Your changes were stored.");
        let json = serde_json::to_string(&notice).unwrap();
        let back: Notice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notice);
    }
}
