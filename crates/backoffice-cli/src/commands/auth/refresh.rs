//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs) -> Result<()> {
    let (client, state) = session::require("/account").await?;

    output::note("Refreshing session...");

    client
        .refresh_session()
        .await
        .context("Failed to refresh session")?;

    // Save the rotated cookies
    session::persist(&client, &state).context("Failed to save refreshed session")?;

    output::success("Session refreshed");
    Ok(())
}
