//! Order subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sewa_http::{Backoffice, PageQuery};

use crate::output;
use crate::session;

const SCREEN: &str = "/orders";

#[derive(Args, Debug)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrdersSubcommand {
    /// List orders
    List(ListArgs),

    /// Fetch a single order
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
    /// Order id
    pub id: String,
}

pub async fn handle(cmd: OrdersCommand) -> Result<()> {
    match cmd.command {
        OrdersSubcommand::List(args) => list(args).await,
        OrdersSubcommand::Show(args) => show(args).await,
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
        .orders()
        .list(&query)
        .await
        .context("Failed to list orders")?;

    if page.items.is_empty() {
        output::note("No orders found.");
    }
    for order in &page.items {
        output::record(order, args.pretty)?;
    }
    output::page_summary(page.total, query.page);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn show(args: ShowArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let order = office
        .orders()
        .get(&args.id)
        .await
        .context("Failed to fetch order")?;
    output::record(&order, true)?;

    session::persist(office.client(), &state)?;
    Ok(())
}
