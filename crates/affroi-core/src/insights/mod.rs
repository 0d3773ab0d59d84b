//! Insight Engine - plain-language recommendations
//!
//! Rule-based analyzers over the dashboard aggregates. Each analyzer is
//! registered with the [`InsightEngine`] and contributes zero or more
//! [`Finding`]s; the engine keeps registration order.
//!
//! ## Built-in analyzers
//!
//! - **Trend** - direction of the daily commission series (always present)
//! - **ROI Tier** - assessment and advice for the overall ROI
//! - **Top Performers** - the most profitable SubIDs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use affroi_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&trend, &profitability, &by_subid);
//! let findings = InsightEngine::new().analyze_all(&ctx);
//! ```

pub mod engine;
pub mod roi;
pub mod top_performers;
pub mod trend;
pub mod types;

pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use roi::RoiTierInsight;
pub use top_performers::TopPerformersInsight;
pub use trend::TrendInsight;
pub use types::{Finding, InsightType, Severity};
