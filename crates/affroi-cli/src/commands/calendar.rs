//! Campaign calendar command

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use affroi_core::{campaigns_for, CampaignStatus};

use super::print_json;

pub fn cmd_calendar(date: Option<&str>, json: bool) -> Result<()> {
    let today = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Local::now().date_naive(),
    };
    let campaigns = campaigns_for(today);

    if json {
        return print_json(&campaigns);
    }

    println!("📅 Campaigns for {}", today.format("%B %Y"));
    for c in &campaigns {
        let status = match c.status {
            CampaignStatus::Today => "🔥 today".to_string(),
            CampaignStatus::Ended => "ended".to_string(),
            CampaignStatus::Upcoming => format!("in {} days", c.days_left),
        };
        println!("  {}  {:<18} {}", c.date.format("%d %b"), c.title, status);
    }
    Ok(())
}
