//! affroi Core Library
//!
//! Shared functionality for the affroi affiliate ROI dashboard:
//! - Import of order export files (CSV, XLS, XLSX)
//! - Column mapping and row normalization
//! - Filtering, KPIs and per-SubID rollups
//! - Cost inputs, profitability and ROI tiers
//! - Rule-based insights
//! - Extracom (seller commission) tool with milestone goals
//! - Monthly campaign calendar
//! - Durable key-value storage (SQLite or in-memory)

pub mod aggregate;
pub mod calendar;
pub mod classify;
pub mod coerce;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extracom;
pub mod filter;
pub mod goals;
pub mod import;
pub mod insights;
pub mod mapping;
pub mod models;
pub mod normalize;
pub mod profit;
pub mod session;
pub mod store;

pub use aggregate::{OrderCounting, Trend, TrendClass};
pub use calendar::{campaigns_for, Campaign, CampaignKind, CampaignStatus};
pub use dashboard::{build_report, DashboardReport, Summary};
pub use db::Database;
pub use error::{Error, Result};
pub use filter::{FilterOptions, FilterState, StatusFilter};
pub use goals::{goal_progress, GoalProgress, Milestones};
pub use import::{import_file, FileFormat, ImportRecord, ImportedFile};
pub use insights::{Finding, InsightEngine, InsightType, Severity};
pub use mapping::{default_data_dir, ExtracomMapping, FieldMapping, MappingConfig};
pub use models::{
    CellValue, Channel, IncomeSource, NormalizedRow, OtherIncomeEntry, RawRow, SpendEntry,
    StatusCategory, NO_SUBID,
};
pub use profit::{CostInputs, Profitability, RoiTier};
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore, StoredKey};
