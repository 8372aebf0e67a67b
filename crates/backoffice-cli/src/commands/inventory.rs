//! Inventory subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sewa_http::{Backoffice, PageQuery};

use crate::commands::read_json;
use crate::output;
use crate::session;

const SCREEN: &str = "/inventory";

#[derive(Args, Debug)]
pub struct InventoryCommand {
    #[command(subcommand)]
    pub command: InventorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum InventorySubcommand {
    /// List inventory items
    List(ListArgs),

    /// Fetch a single item
    Show(ShowArgs),

    /// Create an item from a JSON file
    Create(CreateArgs),

    /// Replace an item from a JSON file
    Update(UpdateArgs),

    /// Delete an item
    Remove(RemoveArgs),
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
    /// Item id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Path to a JSON file with the item body
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item id
    pub id: String,

    /// Path to a JSON file with the replacement body
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Item id
    pub id: String,
}

pub async fn handle(cmd: InventoryCommand) -> Result<()> {
    match cmd.command {
        InventorySubcommand::List(args) => list(args).await,
        InventorySubcommand::Show(args) => show(args).await,
        InventorySubcommand::Create(args) => create(args).await,
        InventorySubcommand::Update(args) => update(args).await,
        InventorySubcommand::Remove(args) => remove(args).await,
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
        .inventory()
        .list(&query)
        .await
        .context("Failed to list inventory")?;

    if page.items.is_empty() {
        output::note("No items found.");
    }
    for item in &page.items {
        output::record(item, args.pretty)?;
    }
    output::page_summary(page.total, query.page);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn show(args: ShowArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let item = office
        .inventory()
        .get(&args.id)
        .await
        .context("Failed to fetch item")?;
    output::record(&item, true)?;

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn create(args: CreateArgs) -> Result<()> {
    let body = read_json(&args.file)?;
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let item = office
        .inventory()
        .create(&body)
        .await
        .context("Failed to create item")?;

    output::success("Item created");
    output::field("Id", &item.id);
    output::field("Name", &item.name);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn update(args: UpdateArgs) -> Result<()> {
    let body = read_json(&args.file)?;
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    let item = office
        .inventory()
        .update(&args.id, &body)
        .await
        .context("Failed to update item")?;

    output::success("Item updated");
    output::field("Id", &item.id);
    output::field("Name", &item.name);

    session::persist(office.client(), &state)?;
    Ok(())
}

async fn remove(args: RemoveArgs) -> Result<()> {
    let (client, state) = session::require(SCREEN).await?;
    let office = Backoffice::new(client);

    office
        .inventory()
        .remove(&args.id)
        .await
        .context("Failed to delete item")?;

    output::success("Item deleted");

    session::persist(office.client(), &state)?;
    Ok(())
}
