//! Login command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use sewa_core::{AUTH_PATH, ApiUrl, Credentials, Location};
use sewa_http::ApiClient;

use crate::output;
use crate::store::{self, StoredState};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// API base URL
    #[arg(long)]
    pub api_url: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let base = ApiUrl::new(&args.api_url).context("Invalid API URL")?;
    // Login happens "from" the auth page, exactly like the web shell.
    let client = ApiClient::new(base, Arc::new(Location::new(AUTH_PATH)));
    let credentials = Credentials::new(&args.email, &args.password);

    output::note("Signing in...");

    let user = client
        .login(&credentials)
        .await
        .context("Failed to sign in")?;

    // Save the cookie snapshot
    let state = StoredState::new(&args.api_url, client.cookie_snapshot());
    store::save(&state).context("Failed to save session state")?;

    // Print success
    output::success("Signed in");
    println!();
    output::field("User", &user.name);
    output::field("Email", &user.email);
    output::field("API", client.base().as_str());

    Ok(())
}
