//! Notice persistence trait.

use crate::notice::Notice;

/// Store for one-time user-facing notices.
///
/// Implementations hold at most one pending notice; a new `put`
/// replaces whatever was there.
pub trait Notices: Send + Sync {
    /// Persist a notice, replacing any pending one.
    fn put(&self, notice: &Notice);

    /// Remove and return the pending notice, if any.
    fn take(&self) -> Option<Notice>;
}
