//! Milestone and extracom command implementations

use anyhow::{Context, Result};
use affroi_core::coerce::{format_currency, format_number, format_percent_value};
use affroi_core::extracom::search_products;

use super::{print_json, truncate, AppSession};

pub fn cmd_goals_add(session: &mut AppSession, amount: &str) -> Result<()> {
    let goal = session.add_goal(amount)?;
    println!("✅ Added milestone {}", format_currency(goal));
    Ok(())
}

/// `position` is 1-based, matching `goals list`
pub fn cmd_goals_remove(session: &mut AppSession, position: usize) -> Result<()> {
    let removed = match position.checked_sub(1) {
        Some(index) => session
            .remove_goal(index)
            .context("Failed to save milestones")?,
        None => None,
    };
    match removed {
        Some(goal) => println!("✅ Removed milestone {}", format_currency(goal)),
        None => anyhow::bail!(
            "No milestone at position {} (there are {})",
            position,
            session.goals().len()
        ),
    }
    Ok(())
}

pub fn cmd_goals_list(session: &AppSession) -> Result<()> {
    let goals = session.goals();
    if goals.is_empty() {
        println!("No milestones set.");
        println!("Run: affroi goals add <amount>");
        return Ok(());
    }

    let current = session.extracom_stats().total_value;
    println!("🎯 Milestones (current value {})", format_currency(current));
    for (i, goal) in goals.as_slice().iter().enumerate() {
        let mark = if current >= *goal { "✓" } else { " " };
        println!("  {}. [{}] {}", i + 1, mark, format_currency(*goal));
    }
    Ok(())
}

pub fn cmd_goals_progress(session: &AppSession, json: bool) -> Result<()> {
    let progress = session.goal_progress();
    if json {
        return print_json(&progress);
    }

    let Some(p) = progress else {
        println!("No milestones set.");
        println!("Run: affroi goals add <amount>");
        return Ok(());
    };

    println!(
        "🎯 Milestone {} of {}: {}",
        p.active_goal_index + 1,
        p.total_goals,
        format_currency(p.active_goal)
    );
    let filled = (p.percentage / 100.0 * 30.0).round() as usize;
    println!(
        "   [{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(30 - filled.min(30)),
        format_number(p.percentage, 1)
    );
    println!("   Current:   {}", format_currency(p.current));
    println!("   Previous:  {}", format_currency(p.previous_goal));
    println!("   Remaining: {}", format_currency(p.remaining));

    if p.all_goals_achieved {
        println!("🎉 All milestones achieved!");
    } else if p.is_complete {
        println!("✅ Milestone reached");
    }
    Ok(())
}

pub fn cmd_extracom(session: &AppSession, search: Option<&str>, json: bool) -> Result<()> {
    let rows = session.extracom_rows();
    let stats = session.extracom_stats();
    let matches = search_products(&rows, search.unwrap_or(""));

    if json {
        return print_json(&serde_json::json!({
            "stats": stats,
            "rows": matches,
            "progress": session.goal_progress(),
        }));
    }

    println!("🛍️  Extracom (seller commission)");
    println!("   Items:            {}", stats.total_items);
    println!("   Commission:       {}", format_currency(stats.total_commission));
    println!("   Purchase value:   {}", format_currency(stats.total_value));
    println!(
        "   Avg rate:         {}",
        format_percent_value(stats.avg_commission_rate)
    );
    println!();

    if rows.is_empty() {
        println!("No order lines with a seller commission.");
        return Ok(());
    }

    if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
        println!("Search \"{}\": {} of {} items", q, matches.len(), rows.len());
        println!();
    }

    println!(
        "{:<40} {:>12} {:>8} {:>8} {:>12}",
        "Product", "Commission", "Shop", "Total", "Value"
    );
    println!("{}", "-".repeat(84));
    for r in &matches {
        println!(
            "{:<40} {:>12} {:>8} {:>8} {:>12}",
            truncate(&r.product_name, 40),
            format_currency(r.overall_product_commission),
            format_percent_value(r.shop_commission_rate),
            format_percent_value(r.total_commission_rate),
            format_currency(r.purchase_value)
        );
    }
    Ok(())
}
