//! Shared session bootstrap for protected commands.
//!
//! Every protected command rebuilds the client from the stored cookie
//! snapshot, then runs the route guard the way a mounting screen would:
//! the command body only runs on an authenticated session. An invalid
//! session surfaces the pending toast notice and the sign-in redirect
//! instead of running the command.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::debug;

use sewa_core::{ApiUrl, Gate, Location, Notices, RouteContext};
use sewa_http::ApiClient;

use crate::output;
use crate::store::{self, StoredState};

/// Build a client from stored state, with its navigator on `screen`.
pub fn client_for(state: &StoredState, screen: &str) -> Result<ApiClient> {
    let base = ApiUrl::new(&state.api_url).context("Invalid stored API URL")?;
    let client = ApiClient::new(base, Arc::new(Location::new(screen)));
    for cookie in &state.cookies {
        client.add_cookie(cookie);
    }
    Ok(client)
}

/// Load the stored session and verify it for `screen`.
pub async fn require(screen: &str) -> Result<(ApiClient, StoredState)> {
    let state = store::load()
        .context("Failed to load saved state")?
        .context("Not signed in. Run 'backoffice auth login' first.")?;
    let client = client_for(&state, screen)?;

    output::note("Checking session...");
    match client.guard().gate(&RouteContext::new(screen), || ()).await {
        Gate::Content(()) => {
            debug!(screen, "session verified");
            Ok((client, state))
        }
        Gate::Redirect(redirect) => {
            if let Some(notice) = client.toasts().take() {
                output::error(&notice.message);
                output::note(&notice.description);
            }
            bail!("Session is not valid. Sign in again (redirect: {redirect})")
        }
    }
}

/// Save the client's (possibly rotated) cookies back to disk.
pub fn persist(client: &ApiClient, state: &StoredState) -> Result<()> {
    let refreshed = state.refreshed(client.cookie_snapshot());
    store::save(&refreshed).context("Failed to save state")
}
