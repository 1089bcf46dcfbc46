//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod trade;
pub mod vrm;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a catalogued part by part number.
    Add {
        /// Part number (e.g. P659).
        part_number: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Part number of the line.
        part_number: String,
    },
    /// Set a line's quantity. Below 1 removes the line.
    Update {
        /// Part number of the line.
        part_number: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show totals including or excluding VAT.
    Vat {
        #[arg(value_enum)]
        mode: VatMode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VatMode {
    /// Prices include VAT.
    Inc,
    /// Prices exclude VAT.
    Exc,
}

/// Arguments for the vrm command.
#[derive(Args)]
pub struct VrmArgs {
    /// Vehicle registration (e.g. "AB12 CDE").
    pub registration: String,

    /// Only show parts in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: relevance, price-low, price-high, name.
    #[arg(short, long, default_value = "relevance")]
    pub sort: String,

    /// Add this part number to the cart if it fits the vehicle.
    #[arg(long)]
    pub add: Option<String>,
}

/// Arguments for the trade command.
#[derive(Args)]
pub struct TradeArgs {
    #[command(subcommand)]
    pub command: TradeCommand,
}

#[derive(Subcommand)]
pub enum TradeCommand {
    /// Sign in to a trade account.
    Login {
        /// Account email. Prompted for when omitted.
        #[arg(short, long)]
        email: Option<String>,

        /// Account password. Prompted for when omitted.
        #[arg(long, hide = true)]
        password: Option<String>,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in account.
    Status,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Delivery method: standard, express, collection.
    #[arg(short, long, default_value = "standard")]
    pub delivery: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Set a config value.
    Set {
        /// Config key (dot-separated, e.g. latency.login_ms).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
