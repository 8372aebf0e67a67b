//! Supplier subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sewa_http::{Backoffice, PageQuery};

use crate::output;
use crate::session;

const SCREEN: &str = "/suppliers";

#[derive(Args, Debug)]
pub struct SuppliersCommand {
    #[command(subcommand)]
    pub command: SuppliersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SuppliersSubcommand {
    /// List suppliers
    List(ListArgs),

    /// Fetch a single supplier
    Show(ShowArgs),
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
    /// Supplier id
    pub id: String,
}

pub async fn handle(cmd: SuppliersCommand) -> Result<()> {
    match cmd.command {
        SuppliersSubcommand::List(args) => list(args).await,
        SuppliersSubcommand::Show(args) => show(args).await,
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
        .suppliers()
        .list(&query)
        .await
        .context("Failed to list suppliers")?;

    if page.items.is_empty() {
        output::note("No suppliers found.");
    }
    for supplier in &page.items {
        output::record(supplier, args.pretty)?;
    }
    output::page_summary(page.total, query.page);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn show(args: ShowArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let supplier = office
        .suppliers()
        .get(&args.id)
        .await
        .context("Failed to fetch supplier")?;
    output::record(&supplier, true)?;

    session::persist(office.client(), &state)?;
    Ok(())
}
