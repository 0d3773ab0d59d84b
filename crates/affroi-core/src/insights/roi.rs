//! ROI Tier Insight
//!
//! Two findings (assessment, then advice) for the overall ROI band. Silent
//! until some spend has been entered.

use serde_json::json;

use crate::profit::{roi_tier, RoiTier};

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity};

pub struct RoiTierInsight;

impl RoiTierInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RoiTierInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for RoiTierInsight {
    fn id(&self) -> InsightType {
        InsightType::RoiTier
    }

    fn name(&self) -> &'static str {
        "ROI Tier"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let p = ctx.profitability;
        let (Some(tier), Some(roi)) = (roi_tier(p), p.total_roi) else {
            return vec![];
        };

        let severity = match tier {
            RoiTier::High | RoiTier::Mid => Severity::Info,
            RoiTier::Low => Severity::Warning,
            RoiTier::Loss => Severity::Alert,
        };
        let [assessment, advice] = tier.messages(roi);
        let data = json!({ "tier": tier.as_str(), "roi": roi });

        vec![
            Finding::new(
                InsightType::RoiTier,
                format!("roi:{}", tier.as_str()),
                severity,
                assessment,
            )
            .with_data(data.clone()),
            Finding::new(
                InsightType::RoiTier,
                format!("roi:{}:advice", tier.as_str()),
                severity,
                advice,
            )
            .with_data(data),
        ]
    }
}
