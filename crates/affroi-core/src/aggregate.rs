//! Aggregation over the active (filtered) row set
//!
//! Every function here is a pure function of its inputs. Groupings keep
//! first-seen order and use stable sorts, so ties resolve the same way on
//! every recomputation.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::classify::{is_approved, is_cancelled, is_pending, is_rejected};
use crate::models::{NormalizedRow, SpendBook};

/// Length of the top-N rankings
pub const TOP_N: usize = 5;

/// Length of the most-profitable SubID list used by insights
pub const TOP_PROFITABLE: usize = 3;

/// How rows with an empty order id count toward `total_orders`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderCounting {
    /// All empty ids share one key and count as a single order
    #[default]
    CollapseEmpty,
    /// Each row with an empty id counts as its own order
    EmptyIsUnique,
}

/// Headline figures for the active rows
///
/// `total_orders` counts distinct order ids while the status counts are row
/// counts. Multi-line orders therefore count once in the first and several
/// times in the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_commission: f64,
    pub total_orders: usize,
    pub total_gmv: f64,
    /// total_commission / total_gmv, 0 without GMV
    pub avg_commission_rate: f64,
    /// total_commission / total_orders, 0 without orders
    pub avg_per_order: f64,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn compute_kpis(rows: &[NormalizedRow], counting: OrderCounting) -> Kpis {
    let total_commission: f64 = rows.iter().map(|r| r.net_commission).sum();
    let total_gmv: f64 = rows.iter().map(|r| r.overall_order_commission).sum();

    let total_orders = match counting {
        OrderCounting::CollapseEmpty => rows
            .iter()
            .map(|r| r.order_id.as_str())
            .collect::<HashSet<_>>()
            .len(),
        OrderCounting::EmptyIsUnique => {
            let empty = rows.iter().filter(|r| r.order_id.is_empty()).count();
            let distinct = rows
                .iter()
                .filter(|r| !r.order_id.is_empty())
                .map(|r| r.order_id.as_str())
                .collect::<HashSet<_>>()
                .len();
            empty + distinct
        }
    };

    Kpis {
        total_commission,
        total_orders,
        total_gmv,
        avg_commission_rate: if total_gmv > 0.0 {
            total_commission / total_gmv
        } else {
            0.0
        },
        avg_per_order: if total_orders > 0 {
            total_commission / total_orders as f64
        } else {
            0.0
        },
        pending: rows.iter().filter(|r| is_pending(&r.order_status)).count(),
        approved: rows.iter().filter(|r| is_approved(&r.order_status)).count(),
        rejected: rows.iter().filter(|r| is_rejected(&r.order_status)).count(),
    }
}

/// Earliest and latest order date among the active rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}

/// `None` when there are no rows
pub fn date_range(rows: &[NormalizedRow]) -> Option<DateRange> {
    let start = rows.iter().map(|r| r.order_date.as_str()).min()?;
    let end = rows.iter().map(|r| r.order_date.as_str()).max()?;
    Some(DateRange {
        start: start.to_string(),
        end: end.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCommission {
    pub date: String,
    pub value: f64,
}

/// Commission per order date, ascending by date string
pub fn by_date(rows: &[NormalizedRow]) -> Vec<DailyCommission> {
    let mut series: Vec<DailyCommission> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let i = *index.entry(row.order_date.as_str()).or_insert_with(|| {
            series.push(DailyCommission {
                date: row.order_date.clone(),
                value: 0.0,
            });
            series.len() - 1
        });
        series[i].value += row.net_commission;
    }
    series.sort_by(|a, b| a.date.cmp(&b.date));
    series
}

/// Per-SubID totals joined with the entered spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIdRollup {
    pub subid: String,
    /// Row count, not distinct orders
    pub orders: usize,
    pub commission: f64,
    pub spend: f64,
    pub profit: f64,
    /// `None` when no spend was entered; never reported as 0%
    pub roi: Option<f64>,
}

/// Roll the active rows up by SubID, sorted by commission descending
pub fn by_subid(rows: &[NormalizedRow], spend: &SpendBook) -> Vec<SubIdRollup> {
    let mut rollups: Vec<SubIdRollup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let i = *index.entry(row.subid.as_str()).or_insert_with(|| {
            rollups.push(SubIdRollup {
                subid: row.subid.clone(),
                orders: 0,
                commission: 0.0,
                spend: 0.0,
                profit: 0.0,
                roi: None,
            });
            rollups.len() - 1
        });
        rollups[i].orders += 1;
        rollups[i].commission += row.net_commission;
    }

    for rollup in &mut rollups {
        rollup.spend = spend.get(&rollup.subid).map(|e| e.total()).unwrap_or(0.0);
        rollup.profit = rollup.commission - rollup.spend;
        rollup.roi = if rollup.spend > 0.0 {
            Some(rollup.profit / rollup.spend)
        } else {
            None
        };
    }

    rollups.sort_by(|a, b| b.commission.total_cmp(&a.commission));
    rollups
}

/// SubIDs with positive profit, most profitable first, at most [`TOP_PROFITABLE`]
pub fn top_profitable(rollups: &[SubIdRollup]) -> Vec<SubIdRollup> {
    let mut profitable: Vec<SubIdRollup> =
        rollups.iter().filter(|r| r.profit > 0.0).cloned().collect();
    profitable.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    profitable.truncate(TOP_PROFITABLE);
    profitable
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRank {
    pub model_id: String,
    /// Name of the first row seen for this model
    pub name: String,
    /// Units sold; a quantity of 0 or less counts as one unit
    pub units: f64,
    pub commission: f64,
}

fn is_placeholder_model(model_id: &str) -> bool {
    matches!(model_id, "" | "-" | "0")
}

/// Best-earning products, excluding cancelled rows and placeholder model ids
pub fn top_products(rows: &[NormalizedRow]) -> Vec<ProductRank> {
    let mut products: Vec<ProductRank> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in rows
        .iter()
        .filter(|r| !is_cancelled(&r.order_status) && !is_placeholder_model(&r.model_id))
    {
        let i = *index.entry(row.model_id.as_str()).or_insert_with(|| {
            products.push(ProductRank {
                model_id: row.model_id.clone(),
                name: row.product_name.clone(),
                units: 0.0,
                commission: 0.0,
            });
            products.len() - 1
        });
        products[i].units += if row.quantity > 0.0 { row.quantity } else { 1.0 };
        products[i].commission += row.net_commission;
    }
    products.sort_by(|a, b| b.commission.total_cmp(&a.commission));
    products.truncate(TOP_N);
    products
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIdRank {
    pub subid: String,
    pub orders: usize,
    pub commission: f64,
}

/// Best-earning SubIDs among non-cancelled rows; the no-SubID bucket competes too
pub fn top_subids(rows: &[NormalizedRow]) -> Vec<SubIdRank> {
    let mut ranks: Vec<SubIdRank> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in rows.iter().filter(|r| !is_cancelled(&r.order_status)) {
        let i = *index.entry(row.subid.as_str()).or_insert_with(|| {
            ranks.push(SubIdRank {
                subid: row.subid.clone(),
                orders: 0,
                commission: 0.0,
            });
            ranks.len() - 1
        });
        ranks[i].orders += 1;
        ranks[i].commission += row.net_commission;
    }
    ranks.sort_by(|a, b| b.commission.total_cmp(&a.commission));
    ranks.truncate(TOP_N);
    ranks
}

/// Slope bucket of the daily commission series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClass {
    StrongUp,
    MildUp,
    Flat,
    MildDown,
    StrongDown,
}

impl TrendClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongUp => "strong_up",
            Self::MildUp => "mild_up",
            Self::Flat => "flat",
            Self::MildDown => "mild_down",
            Self::StrongDown => "strong_down",
        }
    }

    /// "up", "down" or "flat"
    pub fn direction(&self) -> &'static str {
        match self {
            Self::StrongUp | Self::MildUp => "up",
            Self::Flat => "flat",
            Self::MildDown | Self::StrongDown => "down",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::StrongUp => "rising steadily",
            Self::MildUp => "rising slightly",
            Self::Flat => "holding steady",
            Self::MildDown => "falling slightly",
            Self::StrongDown => "falling steadily",
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a slope onto its bucket; thresholds are strict inequalities
pub fn classify_slope(slope: f64) -> TrendClass {
    if slope > 0.5 {
        TrendClass::StrongUp
    } else if slope > 0.05 {
        TrendClass::MildUp
    } else if slope < -0.5 {
        TrendClass::StrongDown
    } else if slope < -0.05 {
        TrendClass::MildDown
    } else {
        TrendClass::Flat
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub slope: f64,
    pub class: TrendClass,
    /// False when fewer than two points were available
    pub established: bool,
}

/// Least-squares slope of the series against x = 1..n
pub fn linear_trend(series: &[DailyCommission]) -> Trend {
    let n = series.len();
    if n < 2 {
        return Trend {
            slope: 0.0,
            class: TrendClass::Flat,
            established: false,
        };
    }

    let nf = n as f64;
    let x_mean = (nf + 1.0) / 2.0;
    let y_mean = series.iter().map(|d| d.value).sum::<f64>() / nf;

    let (num, den) = series
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, d)| {
            let dx = (i + 1) as f64 - x_mean;
            (num + dx * (d.value - y_mean), den + dx * dx)
        });
    let slope = if den == 0.0 { 0.0 } else { num / den };

    Trend {
        slope,
        class: classify_slope(slope),
        established: true,
    }
}
