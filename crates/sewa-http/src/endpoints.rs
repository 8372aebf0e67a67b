//! API endpoint paths and request types.

use serde::Serialize;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST /auth/login
pub const LOGIN: &str = "/auth/login";

/// POST /auth/check-auth
pub const CHECK_AUTH: &str = "/auth/check-auth";

/// POST /auth/refresh
pub const REFRESH_SESSION: &str = "/auth/refresh";

/// POST /auth/logout
pub const LOGOUT: &str = "/auth/logout";

/// Inventory collection root.
pub const INVENTORY: &str = "/inventory";

/// Supplier collection root.
pub const SUPPLIERS: &str = "/suppliers";

/// Order collection root.
pub const ORDERS: &str = "/orders";

/// Pre-booking collection root.
pub const PRE_BOOKINGS: &str = "/pre-bookings";

// ============================================================================
// Request Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
