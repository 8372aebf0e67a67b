//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use sewa_core::Notices;

use crate::output;
use crate::session;
use crate::store;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let state = store::load()
        .context("Failed to load saved state")?
        .context("Not signed in. Run 'backoffice auth login' first.")?;
    let client = session::client_for(&state, "/account")?;

    // The account lookup doubles as the session check, so whoami costs
    // a single check-auth round trip.
    let envelope = client
        .check_auth()
        .await
        .context("Failed to fetch account")?;
    if !envelope.success {
        if let Some(notice) = client.toasts().take() {
            output::error(&notice.message);
            output::note(&notice.description);
        }
        bail!("Session is not valid. Sign in again")
    }
    let user = envelope.into_data().context("Account lookup failed")?;

    output::field("User", &user.name);
    output::field("Email", &user.email);
    output::field("Id", &user.id);
    output::field("API", client.base().as_str());

    session::persist(&client, &state)?;
    Ok(())
}
