//! sewa-core - Core types and contracts for the rental back-office client.

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod notice;
pub mod routes;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use envelope::Envelope;
pub use error::Error;
pub use guard::{Gate, RouteGuard, Verification};
pub use notice::Notice;
pub use routes::{AUTH_PATH, RouteContext, auth_redirect, is_auth_path};
pub use traits::{Location, Navigator, Notices, SessionUser, VerifySession};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
