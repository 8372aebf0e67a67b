//! Pre-booking subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use sewa_http::{Backoffice, PageQuery};

use crate::output;
use crate::session;

const SCREEN: &str = "/pre-bookings";

#[derive(Args, Debug)]
pub struct PrebookingsCommand {
    #[command(subcommand)]
    pub command: PrebookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrebookingsSubcommand {
    /// List pre-bookings
    List(ListArgs),

    /// Fetch a single pre-booking
    Show(ShowArgs),

    /// Confirm a pre-booking
    Confirm(ConfirmArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page
    #[arg(long, default_value_t = 20)]
    pub per_page: u32,

    /// Free-text filter
    #[arg(long)]
    pub search: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Pre-booking id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Pre-booking id
    pub id: String,
}

pub async fn handle(cmd: PrebookingsCommand) -> Result<()> {
    match cmd.command {
        PrebookingsSubcommand::List(args) => list(args).await,
        PrebookingsSubcommand::Show(args) => show(args).await,
        PrebookingsSubcommand::Confirm(args) => confirm(args).await,
    }
}

async fn list(args: ListArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let query = PageQuery {
        page: args.page,
        per_page: args.per_page,
        search: args.search,
    };
    let page = office
        .pre_bookings()
        .list(&query)
        .await
        .context("Failed to list pre-bookings")?;

    if page.items.is_empty() {
        output::note("No pre-bookings found.");
    }
    for booking in &page.items {
        output::record(booking, args.pretty)?;
    }
    output::page_summary(page.total, query.page);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn show(args: ShowArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let booking = office
        .pre_bookings()
        .get(&args.id)
        .await
        .context("Failed to fetch pre-booking")?;
    output::record(&booking, true)?;

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn confirm(args: ConfirmArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let booking = office
        .pre_bookings()
        .modify(&args.id, &json!({"status": "confirmed"}))
        .await
        .context("Failed to confirm pre-booking")?;

    output::success("Pre-booking confirmed");
    output::field("Id", &booking.id);
    output::field("Status", &booking.status);

    session::persist(office.client(), &state)?;
    Ok(())
}
