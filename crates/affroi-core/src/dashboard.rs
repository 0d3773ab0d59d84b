//! Dashboard report: every derived figure for one filter selection
//!
//! [`build_report`] is a pure function of the normalized rows, the filter
//! state and the cost inputs. Callers rebuild the whole report after any
//! change instead of patching figures in place.

use serde::Serialize;

use crate::aggregate::{
    by_date, by_subid, compute_kpis, date_range, linear_trend, top_products, top_subids,
    DailyCommission, DateRange, Kpis, OrderCounting, ProductRank, SubIdRank, SubIdRollup, Trend,
};
use crate::filter::{FilterOptions, FilterState};
use crate::insights::{AnalysisContext, Finding, InsightEngine};
use crate::models::NormalizedRow;
use crate::profit::{profitability, roi_tier, CostInputs, Profitability, RoiTier};

/// Figures shown next to the KPIs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of distinct order dates among the active rows
    pub days: usize,
    /// total commission / days, 0 without days
    pub avg_daily_commission: f64,
    pub other_income: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// Rows before filtering
    pub total_rows: usize,
    /// Rows passing the filter
    pub active_rows: usize,
    pub kpis: Kpis,
    pub date_range: Option<DateRange>,
    pub by_date: Vec<DailyCommission>,
    pub by_subid: Vec<SubIdRollup>,
    pub top_products: Vec<ProductRank>,
    pub top_subids: Vec<SubIdRank>,
    pub trend: Trend,
    pub profitability: Profitability,
    pub roi_tier: Option<RoiTier>,
    pub summary: Summary,
    pub insights: Vec<Finding>,
    /// Counted over all rows, not just the active ones
    pub filter_options: FilterOptions,
}

pub fn build_report(
    rows: &[NormalizedRow],
    filters: &FilterState,
    costs: &CostInputs,
    counting: OrderCounting,
) -> DashboardReport {
    build_report_with(&InsightEngine::new(), rows, filters, costs, counting)
}

/// Same as [`build_report`] with a caller-supplied insight engine
pub fn build_report_with(
    engine: &InsightEngine,
    rows: &[NormalizedRow],
    filters: &FilterState,
    costs: &CostInputs,
    counting: OrderCounting,
) -> DashboardReport {
    let active = filters.apply(rows);

    let kpis = compute_kpis(&active, counting);
    let series = by_date(&active);
    let rollup = by_subid(&active, &costs.spend_by_subid);
    let trend = linear_trend(&series);
    let profit = profitability(kpis.total_commission, costs);

    let days = series.len();
    let summary = Summary {
        days,
        avg_daily_commission: if days > 0 {
            kpis.total_commission / days as f64
        } else {
            0.0
        },
        other_income: profit.other_income,
    };

    let insights = engine.analyze_all(&AnalysisContext::new(&trend, &profit, &rollup));

    tracing::debug!(
        total_rows = rows.len(),
        active_rows = active.len(),
        findings = insights.len(),
        "Built dashboard report"
    );

    DashboardReport {
        total_rows: rows.len(),
        active_rows: active.len(),
        date_range: date_range(&active),
        top_products: top_products(&active),
        top_subids: top_subids(&active),
        roi_tier: roi_tier(&profit),
        filter_options: FilterOptions::from_rows(rows),
        kpis,
        by_date: series,
        by_subid: rollup,
        trend,
        profitability: profit,
        summary,
        insights,
    }
}
