//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// affroi - Affiliate marketing ROI dashboard
#[derive(Parser)]
#[command(name = "affroi")]
#[command(about = "Commission, spend and ROI analytics for affiliate order exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (store and mapping.toml)
    ///
    /// Defaults to AFFROI_DATA_DIR, then ~/.local/share/affroi.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter options shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exact order status to keep ("all" keeps every status)
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Channels to keep: facebook, line, shopee, others (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub channel: Vec<String>,

    /// Status categories to keep: cancelled, unpaid, pending, completed (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Count every row with an empty order id as its own order
    #[arg(long)]
    pub empty_orders_unique: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an order export (CSV, XLS or XLSX), replacing the current data
    Import {
        /// File to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show KPIs, profitability and summary figures
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the per-SubID rollup with spend, profit and ROI
    Subids {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the top products and top SubIDs
    Products {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the daily commission series and its trend
    Trend {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show recommendations
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Manage advertising and other spend
    Spend {
        #[command(subcommand)]
        action: SpendAction,
    },

    /// Manage income from outside the imported report
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },

    /// Manage purchase-value milestones
    Goals {
        #[command(subcommand)]
        action: GoalsAction,
    },

    /// Show order lines with a seller-paid commission
    Extracom {
        /// Case-insensitive product name search
        #[arg(short, long)]
        search: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this month's shopping campaigns
    Calendar {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the column mapping in effect
    Mapping {
        /// Write the current mapping to mapping.toml for editing
        #[arg(long)]
        init: bool,

        /// Overwrite an existing mapping.toml
        #[arg(long)]
        force: bool,
    },

    /// Clear imported rows, spend and incomes (milestones are kept)
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SpendAction {
    /// Set the spend for a SubID
    Set {
        /// SubID
        subid: String,

        /// Advertising spend
        #[arg(long, default_value = "0")]
        ad: String,

        /// Other costs
        #[arg(long, default_value = "0")]
        other: String,
    },

    /// Set the total ad spend override (omit the value to clear it)
    Total {
        /// Amount; replaces the per-SubID sum in the totals
        value: Option<String>,
    },

    /// Remove every spend entry and the override
    Clear,

    /// List spend entries
    List {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Add an income source: lazada, tiktok, shopee_video, campaign_bonus, other
    Add {
        /// Income source id
        source: String,
    },

    /// Set the amount for an added source
    Set {
        /// Income source id
        source: String,

        /// Amount
        amount: String,
    },

    /// Remove an income source
    Remove {
        /// Income source id
        source: String,
    },

    /// List income sources
    List {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Add a milestone amount
    Add {
        /// Amount (thousands separators allowed)
        amount: String,
    },

    /// Remove a milestone by its position in `goals list`
    Remove {
        /// Position, starting at 1
        position: usize,
    },

    /// List milestones
    List,

    /// Show progress toward the active milestone
    Progress {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
