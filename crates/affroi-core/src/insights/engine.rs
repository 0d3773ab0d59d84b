//! Insight engine - runs the registered analyzers in order

use crate::aggregate::{SubIdRollup, Trend};
use crate::profit::Profitability;

use super::types::{Finding, InsightType, Severity};
use super::{RoiTierInsight, TopPerformersInsight, TrendInsight};

/// Aggregates the analyzers read from
pub struct AnalysisContext<'a> {
    pub trend: &'a Trend,
    pub profitability: &'a Profitability,
    pub by_subid: &'a [SubIdRollup],
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        trend: &'a Trend,
        profitability: &'a Profitability,
        by_subid: &'a [SubIdRollup],
    ) -> Self {
        Self {
            trend,
            profitability,
            by_subid,
        }
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze aggregates and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding>;
}

/// Runs analyzers in registration order
///
/// Output order is part of the contract: the trend line always comes first,
/// so findings are not re-sorted by severity.
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in analyzers
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(TrendInsight::new()));
        engine.register(Box::new(RoiTierInsight::new()));
        engine.register(Box::new(TopPerformersInsight::new()));

        engine
    }

    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all analyzers; falls back to a cost prompt when only the trend spoke
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            let findings = insight.analyze(ctx);
            tracing::debug!(
                insight = insight.id().as_str(),
                name = insight.name(),
                count = findings.len(),
                "Insight analysis complete"
            );
            all_findings.extend(findings);
        }

        let only_trend = all_findings.len() == 1
            && all_findings[0].insight_type == InsightType::Trend;
        if only_trend {
            all_findings.push(Finding::new(
                InsightType::CostPrompt,
                "costs:missing",
                Severity::Info,
                "Enter your costs to get more detailed recommendations.",
            ));
        }

        all_findings
    }

    /// Registered insight types, in run order
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
