//! Command implementations.

pub mod auth;
pub mod inventory;
pub mod orders;
pub mod prebookings;
pub mod suppliers;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a JSON document from a file argument.
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}
