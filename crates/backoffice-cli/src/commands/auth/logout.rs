//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sewa_core::AUTH_PATH;

use crate::output;
use crate::session;
use crate::store;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let state = store::load()
        .context("Failed to load saved state")?
        .context("Not signed in.")?;
    let client = session::client_for(&state, AUTH_PATH)?;

    // Local state goes away even when the server call fails.
    if let Err(err) = client.logout().await {
        output::error(&format!("Server logout failed: {err}"));
    }
    store::clear().context("Failed to clear local state")?;

    output::success("Signed out");
    Ok(())
}
