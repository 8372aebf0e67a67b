//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::inventory::InventoryCommand;
use crate::commands::orders::OrdersCommand;
use crate::commands::prebookings::PrebookingsCommand;
use crate::commands::suppliers::SuppliersCommand;

/// Terminal back-office for the sewa rental API.
#[derive(Parser, Debug)]
#[command(name = "backoffice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthCommand),

    /// Inventory management
    Inventory(InventoryCommand),

    /// Supplier management
    Suppliers(SuppliersCommand),

    /// Order management
    Orders(OrdersCommand),

    /// Pre-booking management
    Prebookings(PrebookingsCommand),
}
