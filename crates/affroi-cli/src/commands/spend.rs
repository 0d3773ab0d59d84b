//! Spend and other-income command implementations

use anyhow::{anyhow, Context, Result};
use affroi_core::coerce::format_currency;
use affroi_core::IncomeSource;

use super::{print_json, truncate, AppSession};

fn parse_source(source: &str) -> Result<IncomeSource> {
    source.parse().map_err(|e: String| {
        let ids: Vec<&str> = IncomeSource::all().iter().map(|s| s.as_str()).collect();
        anyhow!("{} (expected one of: {})", e, ids.join(", "))
    })
}

pub fn cmd_spend_set(session: &mut AppSession, subid: &str, ad: &str, other: &str) -> Result<()> {
    session
        .set_spend(subid, ad, other)
        .context("Failed to save spend")?;
    let entry = session
        .costs()
        .spend_by_subid
        .get(subid)
        .copied()
        .unwrap_or_default();
    println!(
        "✅ {}: ad {}, other {}",
        subid,
        format_currency(entry.ad),
        format_currency(entry.other)
    );
    if session.costs().has_override() {
        println!("   Note: the total ad spend override is set; totals ignore per-SubID spend.");
    }
    Ok(())
}

pub fn cmd_spend_total(session: &mut AppSession, value: Option<&str>) -> Result<()> {
    session
        .set_total_ad_spend(value)
        .context("Failed to save ad spend override")?;
    if session.costs().has_override() {
        println!(
            "✅ Total ad spend override set to {}",
            format_currency(session.costs().total_spend())
        );
    } else {
        println!("✅ Total ad spend override cleared; totals use per-SubID spend.");
    }
    Ok(())
}

pub fn cmd_spend_clear(session: &mut AppSession) -> Result<()> {
    session.clear_spend().context("Failed to clear spend")?;
    println!("✅ Cleared all spend entries and the override.");
    Ok(())
}

pub fn cmd_spend_list(session: &AppSession, json: bool) -> Result<()> {
    let costs = session.costs();
    if json {
        return print_json(&serde_json::json!({
            "spend_by_subid": costs.spend_by_subid,
            "total_ad_spend": costs.total_ad_spend,
            "total_spend": costs.total_spend(),
        }));
    }

    if costs.spend_by_subid.is_empty() {
        println!("No spend entered.");
        println!("Run: affroi spend set <subid> --ad <amount> --other <amount>");
    } else {
        println!("{:<24} {:>12} {:>12} {:>12}", "SubID", "Ad", "Other", "Total");
        println!("{}", "-".repeat(63));
        for (subid, entry) in &costs.spend_by_subid {
            println!(
                "{:<24} {:>12} {:>12} {:>12}",
                truncate(subid, 24),
                format_currency(entry.ad),
                format_currency(entry.other),
                format_currency(entry.total())
            );
        }
    }

    println!();
    if let Some(raw) = costs.total_ad_spend.as_deref().filter(|_| costs.has_override()) {
        println!(
            "Total spend: {} (override \"{}\")",
            format_currency(costs.total_spend()),
            raw
        );
    } else {
        println!("Total spend: {}", format_currency(costs.total_spend()));
    }
    Ok(())
}

pub fn cmd_income_add(session: &mut AppSession, source: &str) -> Result<()> {
    let id = parse_source(source)?;
    if session.add_income(id).context("Failed to save incomes")? {
        println!("✅ Added {} ({})", id.label(), id.as_str());
        println!("   Set the amount: affroi income set {} <amount>", id.as_str());
    } else {
        println!("{} is already in the list.", id.label());
    }
    Ok(())
}

pub fn cmd_income_set(session: &mut AppSession, source: &str, amount: &str) -> Result<()> {
    let id = parse_source(source)?;
    if !session
        .set_income_amount(id, amount)
        .context("Failed to save incomes")?
    {
        anyhow::bail!(
            "{} has not been added (run: affroi income add {})",
            id.as_str(),
            id.as_str()
        );
    }
    let total = session.costs().other_income_total();
    println!("✅ {} updated. Other income total: {}", id.label(), format_currency(total));
    Ok(())
}

pub fn cmd_income_remove(session: &mut AppSession, source: &str) -> Result<()> {
    let id = parse_source(source)?;
    if session.remove_income(id).context("Failed to save incomes")? {
        println!("✅ Removed {}", id.label());
    } else {
        println!("{} is not in the list.", id.label());
    }
    Ok(())
}

pub fn cmd_income_list(session: &AppSession, json: bool) -> Result<()> {
    let costs = session.costs();
    if json {
        return print_json(&costs.other_incomes);
    }

    if costs.other_incomes.is_empty() {
        println!("No other income entered.");
    }
    for entry in &costs.other_incomes {
        println!(
            "  {:<16} {:<24} {:>12}",
            entry.id.as_str(),
            entry.source,
            format_currency(entry.amount)
        );
    }
    println!();
    println!("Total: {}", format_currency(costs.other_income_total()));

    let available = costs.available_incomes();
    if !available.is_empty() {
        let ids: Vec<&str> = available.iter().map(|s| s.as_str()).collect();
        println!("Available: {}", ids.join(", "));
    }
    Ok(())
}
