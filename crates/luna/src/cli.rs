//! Clap derive structures for the `luna` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use luna_config::Settings;
use luna_core::{CustomerStatus, OrderStatus, StockStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// luna -- browse Luna Store orders, customers, and products
#[derive(Debug, Parser)]
#[command(
    name = "luna",
    version,
    about = "Browse Luna Store data from the command line",
    long_about = "Query the Luna Store backend for orders, customers, and products.\n\n\
        When no backend is configured or the backend cannot be reached,\n\
        a built-in sample dataset is shown instead.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Skip the backend and serve the sample dataset
    #[arg(long, env = "LUNA_OFFLINE", global = true)]
    pub offline: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Delay before sample data is served, in milliseconds [default: 600]
    #[arg(long, global = true)]
    pub fallback_delay_ms: Option<u64>,
}

impl GlobalOpts {
    /// Fill flags left unset on the command line from the settings file.
    pub fn apply_settings(&mut self, settings: &Settings) {
        if self.output.is_none() {
            self.output = OutputFormat::from_str(&settings.output, true).ok();
        }
        if self.color.is_none() {
            self.color = ColorMode::from_str(&settings.color, true).ok();
        }
        self.timeout.get_or_insert(settings.timeout);
        self.fallback_delay_ms.get_or_insert(settings.fallback_delay_ms);
    }

    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(30))
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms.unwrap_or(600))
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse customer orders
    #[command(alias = "o")]
    Orders(OrdersArgs),

    /// Browse the customer directory
    #[command(alias = "c")]
    Customers(CustomersArgs),

    /// Browse the product catalogue
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// Headline numbers across all three tables
    Dashboard(DashboardArgs),

    /// Manage the backend connection override
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on customer name or order id
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Pending, Shipped, Delivered, or Cancelled
        #[arg(long)]
        status: Option<OrderStatus>,
    },

    /// Show one order
    Get {
        /// Order id (e.g. "#ORD-7001")
        id: String,
    },
}

// ── Customers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on name or email
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Active or Inactive
        #[arg(long)]
        status: Option<CustomerStatus>,
    },

    /// Show one customer
    Get {
        /// Customer id (e.g. "CUST-001")
        id: String,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on name or category
        #[arg(long, short = 's')]
        search: Option<String>,

        /// "In Stock", "Low Stock", or "Out of Stock"
        #[arg(long)]
        status: Option<StockStatus>,
    },

    /// Show one product
    Get {
        /// Product SKU (e.g. "PRD-001")
        id: String,
    },
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Number of recent orders to include
    #[arg(long, short = 'r', default_value = "5")]
    pub recent: usize,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved connection and where each value came from
    Show,

    /// Save an endpoint/key override
    Set {
        /// Backend project URL
        #[arg(long)]
        url: String,

        /// Access key (prompted for when omitted)
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove the saved override
    Clear,

    /// Print config file locations
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
