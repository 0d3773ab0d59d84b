//! Report command implementations

use anyhow::{anyhow, Result};
use affroi_core::coerce::{format_currency, format_fraction, format_number, format_roi};
use affroi_core::{
    Channel, DashboardReport, FilterState, OrderCounting, Severity, StatusCategory, StatusFilter,
};

use super::{print_json, truncate, AppSession};
use crate::cli::FilterArgs;

/// Turn the filter flags into a filter state
pub fn filter_state(args: &FilterArgs) -> Result<FilterState> {
    let status: StatusFilter = args.status.parse().map_err(|e: String| anyhow!(e))?;
    let channels = args
        .channel
        .iter()
        .map(|c| c.parse::<Channel>().map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;
    let categories = args
        .category
        .iter()
        .map(|c| c.parse::<StatusCategory>().map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;
    Ok(FilterState::new()
        .status(status)
        .channels(channels)
        .categories(categories))
}

/// Apply the filter flags and build the report
pub fn build(session: &mut AppSession, args: &FilterArgs) -> Result<DashboardReport> {
    session.set_filters(filter_state(args)?);
    session.set_order_counting(if args.empty_orders_unique {
        OrderCounting::EmptyIsUnique
    } else {
        OrderCounting::CollapseEmpty
    });
    Ok(session.dashboard())
}

fn print_empty_hint(report: &DashboardReport) -> bool {
    if report.total_rows == 0 {
        println!("No orders imported yet.");
        println!("Run: affroi import --file <export.csv>");
        return true;
    }
    false
}

pub fn cmd_dashboard(session: &mut AppSession, args: &FilterArgs) -> Result<()> {
    let report = build(session, args)?;
    if args.json {
        return print_json(&report);
    }
    if print_empty_hint(&report) {
        return Ok(());
    }

    let k = &report.kpis;
    let p = &report.profitability;

    println!("📊 Affiliate Dashboard");
    if let Some(record) = session.last_import() {
        println!(
            "   Source: {} ({} rows, imported {})",
            record.file_name,
            record.row_count,
            record.imported_at.format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(range) = &report.date_range {
        println!("   Period: {}", range);
    }
    if !session.filters().is_empty() {
        println!(
            "   Filter: {} of {} rows",
            report.active_rows, report.total_rows
        );
    }
    println!();

    println!("Commission");
    println!("  Total commission:   {}", format_currency(k.total_commission));
    println!("  Orders:             {}", k.total_orders);
    println!("  GMV:                {}", format_currency(k.total_gmv));
    println!("  Avg commission:     {}", format_fraction(k.avg_commission_rate));
    println!("  Per order:          {}", format_currency(k.avg_per_order));
    println!(
        "  Status (lines):     {} completed, {} pending, {} rejected",
        k.approved, k.pending, k.rejected
    );
    println!();

    println!("Profitability");
    println!("  Other income:       {}", format_currency(p.other_income));
    let spend_note = if session.costs().has_override() {
        " (override)"
    } else {
        ""
    };
    println!(
        "  Total spend:        {}{}",
        format_currency(p.total_spend),
        spend_note
    );
    println!("  Profit:             {}", format_currency(p.total_profit));
    println!("  ROI:                {}", format_roi(p.total_roi));
    if let Some(tier) = report.roi_tier {
        println!("  Tier:               {}", tier.as_str());
    }
    println!();

    println!("Summary");
    println!("  Days:               {}", report.summary.days);
    println!(
        "  Avg per day:        {}",
        format_currency(report.summary.avg_daily_commission)
    );
    println!(
        "  Trend:              {} ({})",
        report.trend.class.description(),
        format_number(report.trend.slope, 2)
    );

    Ok(())
}

pub fn cmd_subids(session: &mut AppSession, args: &FilterArgs) -> Result<()> {
    let report = build(session, args)?;
    if args.json {
        return print_json(&report.by_subid);
    }
    if print_empty_hint(&report) {
        return Ok(());
    }

    println!("🏷️  SubIDs ({})", report.by_subid.len());
    println!();
    println!(
        "{:<24} {:>7} {:>14} {:>12} {:>14} {:>9}",
        "SubID", "Lines", "Commission", "Spend", "Profit", "ROI"
    );
    println!("{}", "-".repeat(85));
    for r in &report.by_subid {
        println!(
            "{:<24} {:>7} {:>14} {:>12} {:>14} {:>9}",
            truncate(&r.subid, 24),
            r.orders,
            format_currency(r.commission),
            format_currency(r.spend),
            format_currency(r.profit),
            format_roi(r.roi)
        );
    }
    Ok(())
}

pub fn cmd_products(session: &mut AppSession, args: &FilterArgs) -> Result<()> {
    let report = build(session, args)?;
    if args.json {
        return print_json(&serde_json::json!({
            "top_products": report.top_products,
            "top_subids": report.top_subids,
        }));
    }
    if print_empty_hint(&report) {
        return Ok(());
    }

    println!("🏆 Top products (excluding cancelled)");
    if report.top_products.is_empty() {
        println!("   None");
    }
    for (i, p) in report.top_products.iter().enumerate() {
        println!(
            "  {}. {} [{}] - {} units, {}",
            i + 1,
            truncate(&p.name, 40),
            p.model_id,
            format_number(p.units, 2),
            format_currency(p.commission)
        );
    }
    println!();

    println!("🏆 Top SubIDs (excluding cancelled)");
    if report.top_subids.is_empty() {
        println!("   None");
    }
    for (i, s) in report.top_subids.iter().enumerate() {
        println!(
            "  {}. {} - {} lines, {}",
            i + 1,
            s.subid,
            s.orders,
            format_currency(s.commission)
        );
    }
    Ok(())
}

pub fn cmd_trend(session: &mut AppSession, args: &FilterArgs) -> Result<()> {
    let report = build(session, args)?;
    if args.json {
        return print_json(&serde_json::json!({
            "by_date": report.by_date,
            "trend": report.trend,
        }));
    }
    if print_empty_hint(&report) {
        return Ok(());
    }

    println!("📈 Daily commission");
    let max = report
        .by_date
        .iter()
        .map(|d| d.value)
        .fold(0.0_f64, f64::max);
    for day in &report.by_date {
        let width = if max > 0.0 {
            ((day.value.max(0.0) / max) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "  {}  {:>12}  {}",
            day.date,
            format_currency(day.value),
            "█".repeat(width)
        );
    }
    println!();

    if report.trend.established {
        println!(
            "Trend: {} (slope {})",
            report.trend.class.description(),
            format_number(report.trend.slope, 2)
        );
    } else {
        println!("Trend: not enough days to establish a trend");
    }
    Ok(())
}

pub fn cmd_insights(session: &mut AppSession, args: &FilterArgs) -> Result<()> {
    let report = build(session, args)?;
    if args.json {
        return print_json(&report.insights);
    }
    if print_empty_hint(&report) {
        return Ok(());
    }

    println!("💡 Recommendations");
    println!();
    for finding in &report.insights {
        let icon = match finding.severity {
            Severity::Info => "•",
            Severity::Attention => "👉",
            Severity::Warning => "⚠️ ",
            Severity::Alert => "🚨",
        };
        println!("  {} {}", icon, finding.summary);
    }
    Ok(())
}
