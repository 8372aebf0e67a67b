//! Navigation trait standing in for the hosting shell's location.

use std::sync::{Arc, RwLock};

/// Where the application currently is, and how to move it.
///
/// The client needs two things from its host: the path of the screen a
/// request was issued from, and a way to force a full navigation when a
/// session ends.
pub trait Navigator: Send + Sync {
    /// Path of the screen the application is currently on.
    fn current_path(&self) -> String;

    /// Schedule a full navigation to `url`.
    fn force(&self, url: &str);
}

/// Shared in-memory location, usable by shells and tests alike.
///
/// Clones share state, so a navigation forced through the client is
/// visible to every holder.
#[derive(Debug, Clone, Default)]
pub struct Location {
    inner: Arc<RwLock<LocationState>>,
}

#[derive(Debug, Default)]
struct LocationState {
    path: String,
    forced: Vec<String>,
}

impl Location {
    /// Create a location at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LocationState {
                path: path.into(),
                forced: Vec::new(),
            })),
        }
    }

    /// Move to a new path without recording a forced navigation.
    pub fn set_path(&self, path: impl Into<String>) {
        self.inner.write().unwrap().path = path.into();
    }

    /// The most recent forced navigation target, if any.
    pub fn last_forced(&self) -> Option<String> {
        self.inner.read().unwrap().forced.last().cloned()
    }
}

impl Navigator for Location {
    fn current_path(&self) -> String {
        self.inner.read().unwrap().path.clone()
    }

    fn force(&self, url: &str) {
        let mut state = self.inner.write().unwrap();
        state.path = url.to_string();
        state.forced.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_tracks_path() {
        let location = Location::new("/inventory");
        assert_eq!(location.current_path(), "/inventory");

        location.set_path("/orders");
        assert_eq!(location.current_path(), "/orders");
        assert_eq!(location.last_forced(), None);
    }

    #[test]
    fn forced_navigation_is_recorded_and_moves() {
        let location = Location::new("/inventory");
        location.force("/auth");

        assert_eq!(location.current_path(), "/auth");
        assert_eq!(location.last_forced().as_deref(), Some("/auth"));
    }

    #[test]
    fn clones_share_state() {
        let location = Location::new("/a");
        let observer = location.clone();
        location.force("/auth");

        assert_eq!(observer.last_forced().as_deref(), Some("/auth"));
    }
}
