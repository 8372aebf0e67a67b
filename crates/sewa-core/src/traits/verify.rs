//! Session verification trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::envelope::Envelope;

/// The signed-in account as reported by the verification endpoint.
///
/// Fields default to empty rather than fail: the guard only needs the
/// envelope's success flag, and servers vary in how much they return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A transport able to confirm that the ambient session is still live.
#[async_trait]
pub trait VerifySession: Send + Sync {
    /// Call the check-session endpoint and return the raw envelope.
    ///
    /// The envelope is handed back whole so callers can inspect
    /// `success` and the session-out flag. Transport and HTTP failures
    /// surface as errors.
    async fn verify_session(&self) -> Result<Envelope<SessionUser>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_user_tolerates_missing_fields() {
        let user: SessionUser = serde_json::from_value(json!({"name": "Alice"})).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.id, "");
        assert_eq!(user.email, "");
    }
}
