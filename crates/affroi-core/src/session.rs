//! One user's working session over a durable store
//!
//! The session loads the persisted state once at open, keeps it in memory,
//! and writes each piece back through its [`Repository`](crate::store::Repository)
//! as soon as it changes. Everything the dashboard shows is derived on demand
//! from this state; nothing derived is cached.

use std::path::Path;

use tracing::info;

use crate::aggregate::OrderCounting;
use crate::dashboard::{build_report, DashboardReport};
use crate::error::Result;
use crate::extracom::{extracom_rows, extracom_stats, ExtracomRow, ExtracomStats};
use crate::filter::FilterState;
use crate::goals::{goal_progress, GoalProgress, Milestones};
use crate::import::{import_file, ImportRecord, ImportedFile};
use crate::mapping::MappingConfig;
use crate::models::{IncomeSource, NormalizedRow, RawRow};
use crate::normalize::normalize_rows;
use crate::profit::CostInputs;
use crate::store::{self, KeyValueStore};

pub struct Session<S: KeyValueStore> {
    store: S,
    mapping: MappingConfig,
    raw_rows: Vec<RawRow>,
    costs: CostInputs,
    goals: Milestones,
    last_import: Option<ImportRecord>,
    filters: FilterState,
    counting: OrderCounting,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the persisted state from `store`
    pub fn open(store: S, mapping: MappingConfig) -> Result<Self> {
        let raw_rows = store::raw_rows(&store).load()?;
        let costs = CostInputs {
            spend_by_subid: store::spend_by_subid(&store).load()?,
            total_ad_spend: store::total_ad_spend(&store).load()?,
            other_incomes: store::other_incomes(&store).load()?,
        };
        let goals = store::goals(&store).load()?;
        let last_import = store::last_import(&store).load()?;

        tracing::debug!(
            rows = raw_rows.len(),
            goals = goals.len(),
            incomes = costs.other_incomes.len(),
            "Session loaded"
        );

        Ok(Self {
            store,
            mapping,
            raw_rows,
            costs,
            goals,
            last_import,
            filters: FilterState::default(),
            counting: OrderCounting::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn mapping(&self) -> &MappingConfig {
        &self.mapping
    }

    /// Replace the column mapping; derived rows follow on the next read
    pub fn set_mapping(&mut self, mapping: MappingConfig) {
        self.mapping = mapping;
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn order_counting(&self) -> OrderCounting {
        self.counting
    }

    pub fn set_order_counting(&mut self, counting: OrderCounting) {
        self.counting = counting;
    }

    // ---- rows ----

    pub fn raw_rows(&self) -> &[RawRow] {
        &self.raw_rows
    }

    pub fn last_import(&self) -> Option<&ImportRecord> {
        self.last_import.as_ref()
    }

    pub fn normalized_rows(&self) -> Vec<NormalizedRow> {
        normalize_rows(&self.raw_rows, &self.mapping.dashboard)
    }

    /// Replace the whole dataset with a parsed file
    ///
    /// Rows from earlier imports are discarded, never merged.
    pub fn replace_rows(&mut self, imported: ImportedFile) -> Result<()> {
        store::raw_rows(&self.store).save(&imported.rows)?;
        store::last_import(&self.store).save(&Some(imported.record.clone()))?;

        info!(
            file = %imported.record.file_name,
            rows = imported.rows.len(),
            "Replaced dataset"
        );
        self.raw_rows = imported.rows;
        self.last_import = Some(imported.record);
        Ok(())
    }

    /// Import a file from disk
    ///
    /// Returns `Ok(None)` and leaves the dataset untouched when the file type
    /// is not supported.
    pub fn import_path(&mut self, path: &Path) -> Result<Option<ImportRecord>> {
        let Some(imported) = import_file(path)? else {
            return Ok(None);
        };
        let record = imported.record.clone();
        self.replace_rows(imported)?;
        Ok(Some(record))
    }

    // ---- costs ----

    pub fn costs(&self) -> &CostInputs {
        &self.costs
    }

    pub fn set_spend(&mut self, subid: &str, ad: &str, other: &str) -> Result<()> {
        self.costs.set_spend(subid, ad, other);
        store::spend_by_subid(&self.store).save(&self.costs.spend_by_subid)
    }

    /// Set or clear the global ad-spend override
    ///
    /// A blank value clears it so the per-SubID sum applies again.
    pub fn set_total_ad_spend(&mut self, value: Option<&str>) -> Result<()> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let repo = store::total_ad_spend(&self.store);
        match value {
            Some(v) => {
                self.costs.total_ad_spend = Some(v.to_string());
                repo.save(&self.costs.total_ad_spend)
            }
            None => {
                self.costs.total_ad_spend = None;
                repo.clear()
            }
        }
    }

    /// Drop every per-SubID spend entry and the override
    pub fn clear_spend(&mut self) -> Result<()> {
        self.costs.spend_by_subid.clear();
        self.costs.total_ad_spend = None;
        store::spend_by_subid(&self.store).clear()?;
        store::total_ad_spend(&self.store).clear()
    }

    pub fn add_income(&mut self, id: IncomeSource) -> Result<bool> {
        let added = self.costs.add_income(id);
        if added {
            self.save_incomes()?;
        }
        Ok(added)
    }

    pub fn set_income_amount(&mut self, id: IncomeSource, amount: &str) -> Result<bool> {
        let updated = self.costs.set_income_amount(id, amount);
        if updated {
            self.save_incomes()?;
        }
        Ok(updated)
    }

    pub fn remove_income(&mut self, id: IncomeSource) -> Result<bool> {
        let removed = self.costs.remove_income(id);
        if removed {
            self.save_incomes()?;
        }
        Ok(removed)
    }

    fn save_incomes(&self) -> Result<()> {
        store::other_incomes(&self.store).save(&self.costs.other_incomes)
    }

    // ---- goals ----

    pub fn goals(&self) -> &Milestones {
        &self.goals
    }

    pub fn add_goal(&mut self, input: &str) -> Result<f64> {
        let goal = self.goals.add(input)?;
        store::goals(&self.store).save(&self.goals)?;
        Ok(goal)
    }

    pub fn remove_goal(&mut self, index: usize) -> Result<Option<f64>> {
        let removed = self.goals.remove(index);
        if removed.is_some() {
            store::goals(&self.store).save(&self.goals)?;
        }
        Ok(removed)
    }

    // ---- derived views ----

    pub fn dashboard(&self) -> DashboardReport {
        build_report(
            &self.normalized_rows(),
            &self.filters,
            &self.costs,
            self.counting,
        )
    }

    pub fn extracom_rows(&self) -> Vec<ExtracomRow> {
        extracom_rows(&self.raw_rows, &self.mapping.extracom)
    }

    pub fn extracom_stats(&self) -> ExtracomStats {
        extracom_stats(&self.extracom_rows())
    }

    /// Milestone progress against the extracom purchase-value total
    pub fn goal_progress(&self) -> Option<GoalProgress> {
        goal_progress(&self.goals, self.extracom_stats().total_value)
    }

    /// Start over: drop the dataset and every cost input
    ///
    /// Milestones survive a reset. The filters and the in-memory mapping go
    /// back to their defaults; an on-disk mapping override is left alone.
    pub fn reset(&mut self) -> Result<()> {
        store::raw_rows(&self.store).clear()?;
        store::last_import(&self.store).clear()?;
        store::spend_by_subid(&self.store).clear()?;
        store::total_ad_spend(&self.store).clear()?;
        store::other_incomes(&self.store).clear()?;

        self.raw_rows.clear();
        self.last_import = None;
        self.costs = CostInputs::default();
        self.filters.clear();
        self.mapping = MappingConfig::default();

        info!("Session reset");
        Ok(())
    }
}
