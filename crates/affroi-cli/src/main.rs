//! affroi CLI - Affiliate marketing ROI dashboard
//!
//! Usage:
//!   affroi import --file orders.csv   Import an order export
//!   affroi dashboard                  Show KPIs and profitability
//!   affroi spend set fb_01 --ad 500   Enter spend for a SubID
//!   affroi insights                   Show recommendations

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let data_dir = commands::resolve_data_dir(cli.data_dir.as_deref())?;
    let session = || commands::open_session(&data_dir);

    match cli.command {
        Commands::Import { file } => commands::cmd_import(&mut session()?, &file),
        Commands::Dashboard { filter } => commands::cmd_dashboard(&mut session()?, &filter),
        Commands::Subids { filter } => commands::cmd_subids(&mut session()?, &filter),
        Commands::Products { filter } => commands::cmd_products(&mut session()?, &filter),
        Commands::Trend { filter } => commands::cmd_trend(&mut session()?, &filter),
        Commands::Insights { filter } => commands::cmd_insights(&mut session()?, &filter),
        Commands::Spend { action } => match action {
            SpendAction::Set { subid, ad, other } => {
                commands::cmd_spend_set(&mut session()?, &subid, &ad, &other)
            }
            SpendAction::Total { value } => {
                commands::cmd_spend_total(&mut session()?, value.as_deref())
            }
            SpendAction::Clear => commands::cmd_spend_clear(&mut session()?),
            SpendAction::List { json } => commands::cmd_spend_list(&session()?, json),
        },
        Commands::Income { action } => match action {
            IncomeAction::Add { source } => commands::cmd_income_add(&mut session()?, &source),
            IncomeAction::Set { source, amount } => {
                commands::cmd_income_set(&mut session()?, &source, &amount)
            }
            IncomeAction::Remove { source } => {
                commands::cmd_income_remove(&mut session()?, &source)
            }
            IncomeAction::List { json } => commands::cmd_income_list(&session()?, json),
        },
        Commands::Goals { action } => match action {
            GoalsAction::Add { amount } => commands::cmd_goals_add(&mut session()?, &amount),
            GoalsAction::Remove { position } => {
                commands::cmd_goals_remove(&mut session()?, position)
            }
            GoalsAction::List => commands::cmd_goals_list(&session()?),
            GoalsAction::Progress { json } => commands::cmd_goals_progress(&session()?, json),
        },
        Commands::Extracom { search, json } => {
            commands::cmd_extracom(&session()?, search.as_deref(), json)
        }
        Commands::Calendar { date, json } => commands::cmd_calendar(date.as_deref(), json),
        Commands::Mapping { init, force } => commands::cmd_mapping(&data_dir, init, force),
        Commands::Reset { yes } => commands::cmd_reset(&mut session()?, yes),
    }
}
