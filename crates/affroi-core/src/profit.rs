//! Cost inputs and overall profitability
//!
//! Spend comes from one of two sources, never both: the global ad-spend
//! override when it is non-blank, otherwise the sum of every per-SubID entry.
//! Per-SubID rollups always use their own entries.

use serde::{Deserialize, Serialize};

use crate::coerce::{float_prefix, format_fraction, parse_lenient_str};
use crate::models::{IncomeSource, OtherIncomeEntry, SpendBook, SpendEntry};

/// User-entered costs and incomes outside the imported report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub spend_by_subid: SpendBook,
    /// Raw text of the global ad-spend override
    pub total_ad_spend: Option<String>,
    pub other_incomes: Vec<OtherIncomeEntry>,
}

impl CostInputs {
    /// Record spend for a SubID; both inputs are read leniently
    pub fn set_spend(&mut self, subid: &str, ad: &str, other: &str) {
        self.spend_by_subid.insert(
            subid.to_string(),
            SpendEntry {
                ad: parse_lenient_str(ad),
                other: parse_lenient_str(other),
            },
        );
    }

    /// True when a non-blank override is set
    pub fn has_override(&self) -> bool {
        self.total_ad_spend
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Total spend used for profit and ROI
    ///
    /// The override is read with commas stripped and anything after the
    /// leading number ignored; an unreadable override counts as 0.
    pub fn total_spend(&self) -> f64 {
        match self.total_ad_spend.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                float_prefix(&raw.replace(',', "")).unwrap_or(0.0)
            }
            _ => self.spend_by_subid.values().map(SpendEntry::total).sum(),
        }
    }

    pub fn other_income_total(&self) -> f64 {
        self.other_incomes
            .iter()
            .map(|i| i.amount)
            .filter(|a| a.is_finite())
            .sum()
    }

    /// Add a catalog source with amount 0; a source already present is left alone
    ///
    /// Returns whether an entry was added.
    pub fn add_income(&mut self, id: IncomeSource) -> bool {
        if self.other_incomes.iter().any(|i| i.id == id) {
            return false;
        }
        self.other_incomes.push(OtherIncomeEntry::new(id));
        true
    }

    /// Returns false when the source has not been added
    pub fn set_income_amount(&mut self, id: IncomeSource, amount: &str) -> bool {
        match self.other_incomes.iter_mut().find(|i| i.id == id) {
            Some(entry) => {
                entry.amount = parse_lenient_str(amount);
                true
            }
            None => false,
        }
    }

    pub fn remove_income(&mut self, id: IncomeSource) -> bool {
        let before = self.other_incomes.len();
        self.other_incomes.retain(|i| i.id != id);
        self.other_incomes.len() != before
    }

    /// Catalog sources not yet added
    pub fn available_incomes(&self) -> Vec<IncomeSource> {
        IncomeSource::all()
            .iter()
            .copied()
            .filter(|id| !self.other_incomes.iter().any(|i| i.id == *id))
            .collect()
    }
}

/// Bottom line across commission, other incomes and spend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Profitability {
    pub total_commission: f64,
    pub other_income: f64,
    pub total_spend: f64,
    pub total_profit: f64,
    /// `None` when total spend is 0
    pub total_roi: Option<f64>,
}

pub fn profitability(total_commission: f64, costs: &CostInputs) -> Profitability {
    let other_income = costs.other_income_total();
    let total_spend = costs.total_spend();
    let total_profit = total_commission + other_income - total_spend;
    let total_roi = if total_spend != 0.0 {
        Some(total_profit / total_spend)
    } else {
        None
    };
    Profitability {
        total_commission,
        other_income,
        total_spend,
        total_profit,
        total_roi,
    }
}

/// Overall ROI band driving the recommendation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiTier {
    High,
    Mid,
    Low,
    Loss,
}

impl RoiTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
            Self::Loss => "loss",
        }
    }

    /// Assessment and advice for this tier
    pub fn messages(&self, roi: f64) -> [String; 2] {
        let pct = format_fraction(roi);
        match self {
            Self::High => [
                format!("Excellent! Overall ROI is high ({}); the strategy is working.", pct),
                "Consider raising the budget and scaling the most profitable campaigns."
                    .to_string(),
            ],
            Self::Mid => [
                format!("Overall ROI is moderate ({}). Profitable, with room to improve.", pct),
                "Shift budget toward the most profitable campaigns or test new ad formats."
                    .to_string(),
            ],
            Self::Low => [
                format!("Overall ROI is low ({}). Review the overall strategy.", pct),
                "Check the target audience, improve content quality, or promote different products."
                    .to_string(),
            ],
            Self::Loss => [
                format!("You are losing money! Overall ROI is negative ({}).", pct),
                "Pause the losing campaigns, find the cause, and fix it urgently.".to_string(),
            ],
        }
    }
}

/// Tier for the overall ROI; `None` unless some spend was entered
pub fn roi_tier(p: &Profitability) -> Option<RoiTier> {
    if p.total_spend <= 0.0 {
        return None;
    }
    let roi = p.total_roi?;
    Some(if roi >= 0.6 {
        RoiTier::High
    } else if roi >= 0.4 {
        RoiTier::Mid
    } else if roi >= 0.0 {
        RoiTier::Low
    } else {
        RoiTier::Loss
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_spend() -> CostInputs {
        let mut costs = CostInputs::default();
        costs.set_spend("fb_01", "1,000", "250");
        costs.set_spend("line_01", "abc", "50");
        costs
    }

    #[test]
    fn test_total_spend_sums_entries() {
        let costs = with_spend();
        assert_eq!(costs.spend_by_subid["line_01"].ad, 0.0);
        assert_eq!(costs.total_spend(), 1300.0);
        assert!(!costs.has_override());
    }

    #[test]
    fn test_override_supersedes_entries() {
        let mut costs = with_spend();
        costs.total_ad_spend = Some("2,500".to_string());
        assert_eq!(costs.total_spend(), 2500.0);

        costs.total_ad_spend = Some("   ".to_string());
        assert_eq!(costs.total_spend(), 1300.0);

        costs.total_ad_spend = Some("lots".to_string());
        assert_eq!(costs.total_spend(), 0.0);

        costs.total_ad_spend = Some("300baht".to_string());
        assert_eq!(costs.total_spend(), 300.0);
    }

    #[test]
    fn test_profit_and_roi() {
        let mut costs = CostInputs::default();
        costs.add_income(IncomeSource::Lazada);
        costs.set_income_amount(IncomeSource::Lazada, "200");
        costs.total_ad_spend = Some("1000".to_string());

        let p = profitability(1400.0, &costs);
        assert_eq!(p.total_profit, 600.0);
        assert_eq!(p.total_roi, Some(0.6));
        assert_eq!(roi_tier(&p), Some(RoiTier::High));
    }

    #[test]
    fn test_roi_null_without_spend() {
        for commission in [-50.0, 0.0, 50.0] {
            let p = profitability(commission, &CostInputs::default());
            assert_eq!(p.total_roi, None);
            assert_eq!(roi_tier(&p), None);
        }
    }

    #[test]
    fn test_roi_tier_boundaries() {
        let tier = |roi: f64| {
            roi_tier(&Profitability {
                total_commission: 0.0,
                other_income: 0.0,
                total_spend: 100.0,
                total_profit: roi * 100.0,
                total_roi: Some(roi),
            })
        };
        assert_eq!(tier(0.6), Some(RoiTier::High));
        assert_eq!(tier(0.59), Some(RoiTier::Mid));
        assert_eq!(tier(0.4), Some(RoiTier::Mid));
        assert_eq!(tier(0.0), Some(RoiTier::Low));
        assert_eq!(tier(-0.01), Some(RoiTier::Loss));
        assert!(RoiTier::Loss.messages(-0.25)[0].contains("-25.00%"));
    }

    #[test]
    fn test_income_catalog() {
        let mut costs = CostInputs::default();
        assert!(costs.add_income(IncomeSource::Tiktok));
        assert!(!costs.add_income(IncomeSource::Tiktok));
        assert_eq!(costs.other_incomes.len(), 1);
        assert_eq!(costs.available_incomes().len(), IncomeSource::all().len() - 1);

        assert!(costs.set_income_amount(IncomeSource::Tiktok, "1,500.5"));
        assert!(!costs.set_income_amount(IncomeSource::Lazada, "10"));
        assert_eq!(costs.other_income_total(), 1500.5);

        assert!(costs.remove_income(IncomeSource::Tiktok));
        assert!(!costs.remove_income(IncomeSource::Tiktok));
        assert_eq!(costs.other_income_total(), 0.0);
    }
}
