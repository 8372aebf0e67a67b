//! Auth subcommand implementations.

mod login;
mod logout;
mod refresh;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in and persist the session cookies
    Login(login::LoginArgs),

    /// Display the signed-in account
    Whoami(whoami::WhoamiArgs),

    /// Renew the session cookies
    Refresh(refresh::RefreshArgs),

    /// Sign out and clear local state
    Logout(logout::LogoutArgs),
}

pub async fn handle(cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args).await,
        AuthSubcommand::Whoami(args) => whoami::run(args).await,
        AuthSubcommand::Refresh(args) => refresh::run(args).await,
        AuthSubcommand::Logout(args) => logout::run(args).await,
    }
}
