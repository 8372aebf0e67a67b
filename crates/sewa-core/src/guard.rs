//! Session gate for protected screens.
//!
//! Every protected screen runs one session check when it mounts. The
//! check is expressed as a state value rather than a wrapper component:
//! shells hold a [`Verification`], drive it with [`RouteGuard::verify`],
//! and render from whichever state they end up in. Nothing is cached
//! across mounts; re-mounting re-verifies.

use crate::notice::Notice;
use crate::routes::{RouteContext, auth_redirect};
use crate::traits::{Notices, VerifySession};

/// Verification state for one mounted screen.
///
/// Starts at `Pending` and settles exactly once; a settled state never
/// moves again for that mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The check is still in flight; render a loading state only.
    Pending,
    /// The session is confirmed; protected content may render.
    Authenticated,
    /// No live session. Navigate to `redirect` and render nothing.
    Unauthenticated { redirect: String },
}

impl Verification {
    /// Check whether this state is settled.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verification::Pending)
    }

    /// Apply the result of a finished check.
    ///
    /// Only `Pending` moves; a settled state is kept as-is.
    #[must_use]
    pub fn settle(self, outcome: Verification) -> Verification {
        match self {
            Verification::Pending => outcome,
            settled => settled,
        }
    }
}

/// What a gated screen should do once verification resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<T> {
    /// Session confirmed: here is the rendered content.
    Content(T),
    /// No session: navigate to this URL instead of rendering.
    Redirect(String),
}

/// The per-mount session check.
///
/// Verification itself never fails: any error from the underlying
/// check, transport trouble included, resolves to `Unauthenticated`.
pub struct RouteGuard<'a> {
    verifier: &'a dyn VerifySession,
    notices: &'a dyn Notices,
}

impl<'a> RouteGuard<'a> {
    /// Create a guard over a session verifier and a notice store.
    pub fn new(verifier: &'a dyn VerifySession, notices: &'a dyn Notices) -> Self {
        Self { verifier, notices }
    }

    /// Run the session check for `route` and return the settled state.
    ///
    /// No timeout is applied; a stalled check simply keeps the caller's
    /// own state at `Pending` until this future resolves.
    pub async fn verify(&self, route: &RouteContext) -> Verification {
        match self.verifier.verify_session().await {
            Ok(envelope) if envelope.success => Verification::Authenticated,
            Ok(envelope) => {
                if envelope.is_session_out() {
                    self.notices.put(&Notice::session_expired());
                }
                Verification::Unauthenticated {
                    redirect: auth_redirect(route),
                }
            }
            Err(_) => Verification::Unauthenticated {
                redirect: auth_redirect(route),
            },
        }
    }

    /// Verify `route`, rendering `render` only on success.
    ///
    /// The closure runs at most once, and only after the session is
    /// confirmed; its output passes through untouched.
    pub async fn gate<T>(&self, route: &RouteContext, render: impl FnOnce() -> T) -> Gate<T> {
        if let Verification::Unauthenticated { redirect } = self.verify(route).await {
            Gate::Redirect(redirect)
        } else {
            Gate::Content(render())
        }
    }
}
