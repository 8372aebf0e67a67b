//! Persisted client state.
//!
//! The CLI stands in for a browser, so the cookie session has to live
//! somewhere between invocations. A snapshot of the jar is written to
//! the platform data directory alongside the API URL it belongs to.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use sewa_core::notice::TOAST_COOKIE;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored client state: where the API lives plus the cookie snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredState {
    pub api_url: String,
    /// `name=value` pairs captured from the ambient jar.
    pub cookies: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl StoredState {
    /// Capture a fresh state from a cookie header snapshot.
    pub fn new(api_url: impl Into<String>, snapshot: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            cookies: split_snapshot(snapshot),
            saved_at: Utc::now(),
        }
    }

    /// Re-capture the cookie snapshot, keeping the API URL.
    pub fn refreshed(&self, snapshot: Option<String>) -> Self {
        Self::new(self.api_url.clone(), snapshot)
    }

    /// Drop a pending toast once its cookie lifetime (one day) has
    /// passed. A browser would have expired it; the snapshot cannot.
    fn pruned(mut self) -> Self {
        if Utc::now() - self.saved_at > Duration::days(1) {
            let prefix = format!("{TOAST_COOKIE}=");
            self.cookies.retain(|pair| !pair.starts_with(&prefix));
        }
        self
    }
}

fn split_snapshot(snapshot: Option<String>) -> Vec<String> {
    snapshot
        .map(|header| header.split("; ").map(str::to_string).collect())
        .unwrap_or_default()
}

/// Get the state file path.
fn state_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "backoffice").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("state.json"))
}

/// Save state to disk.
pub fn save(state: &StoredState) -> Result<()> {
    save_to(&state_path()?, state)
}

/// Load state from disk, if present.
pub fn load() -> Result<Option<StoredState>> {
    load_from(&state_path()?)
}

/// Remove any stored state.
pub fn clear() -> Result<()> {
    let path = state_path()?;
    if path.exists() {
        fs::remove_file(&path).context("Failed to remove state file")?;
    }
    Ok(())
}

fn save_to(path: &Path, state: &StoredState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;

    fs::write(path, &json).context("Failed to write state file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

fn load_from(path: &Path) -> Result<Option<StoredState>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read state file")?;
    let state: StoredState = serde_json::from_str(&json).context("Invalid state file")?;

    Ok(Some(state.pruned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_splits_into_pairs() {
        let state = StoredState::new(
            "https://api.example.com",
            Some("sid=abc; toastMessage=xyz".to_string()),
        );
        assert_eq!(state.cookies, vec!["sid=abc", "toastMessage=xyz"]);
    }

    #[test]
    fn empty_snapshot_means_no_cookies() {
        let state = StoredState::new("https://api.example.com", None);
        assert!(state.cookies.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = StoredState::new("https://api.example.com", Some("sid=abc".to_string()));
        save_to(&path, &state).unwrap();

        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.api_url, "https://api.example.com");
        assert_eq!(loaded.cookies, vec!["sid=abc"]);
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        assert!(load_from(&path).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn state_file_is_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = StoredState::new("https://api.example.com", None);
        save_to(&path, &state).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn stale_toast_is_pruned_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = StoredState::new(
            "https://api.example.com",
            Some("sid=abc; toastMessage=xyz".to_string()),
        );
        state.saved_at = Utc::now() - Duration::days(2);
        save_to(&path, &state).unwrap();

        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.cookies, vec!["sid=abc"]);
    }

    #[test]
    fn fresh_toast_survives_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = StoredState::new(
            "https://api.example.com",
            Some("sid=abc; toastMessage=xyz".to_string()),
        );
        save_to(&path, &state).unwrap();

        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.cookies, vec!["sid=abc", "toastMessage=xyz"]);
    }
}
