//! Trend Insight
//!
//! Always produces exactly one finding describing the commission trend.

use serde_json::json;

use crate::aggregate::TrendClass;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity};

pub struct TrendInsight;

impl TrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for TrendInsight {
    fn id(&self) -> InsightType {
        InsightType::Trend
    }

    fn name(&self) -> &'static str {
        "Commission Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let trend = ctx.trend;
        let text = if trend.established {
            trend.class.description()
        } else {
            "showing no clear trend yet"
        };
        let severity = match trend.class {
            TrendClass::StrongDown => Severity::Warning,
            TrendClass::MildDown => Severity::Attention,
            _ => Severity::Info,
        };

        vec![Finding::new(
            InsightType::Trend,
            format!("trend:{}", trend.class),
            severity,
            format!(
                "Total commission is {}. Keep an eye on how recent activity affects it.",
                text
            ),
        )
        .with_data(json!({
            "slope": trend.slope,
            "direction": trend.class.direction(),
            "established": trend.established,
        }))]
    }
}
