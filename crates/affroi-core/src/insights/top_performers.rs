//! Top Performers Insight
//!
//! Names up to three SubIDs with positive profit, most profitable first.

use serde_json::json;

use crate::aggregate::top_profitable;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity};

pub struct TopPerformersInsight;

impl TopPerformersInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopPerformersInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for TopPerformersInsight {
    fn id(&self) -> InsightType {
        InsightType::TopPerformers
    }

    fn name(&self) -> &'static str {
        "Top Performers"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let top = top_profitable(ctx.by_subid);
        if top.is_empty() {
            return vec![];
        }

        let names: Vec<&str> = top.iter().map(|r| r.subid.as_str()).collect();
        let data = json!({
            "subids": top
                .iter()
                .map(|r| json!({ "subid": r.subid, "profit": r.profit }))
                .collect::<Vec<_>>(),
        });

        vec![Finding::new(
            InsightType::TopPerformers,
            "subids:top_profit",
            Severity::Info,
            format!(
                "Most profitable SubIDs: {}. Consider raising the budget for these to grow further.",
                names.join(", ")
            ),
        )
        .with_data(data)]
    }
}
