//! Layered row filter for the dashboard
//!
//! Three independent axes combined with AND:
//! - an exact-match single status (or all statuses)
//! - a channel multi-select
//! - a status-category multi-select (substring based, see [`crate::classify`])
//!
//! An empty multi-select places no restriction on its axis.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Channel, NormalizedRow, StatusCategory};

/// Label of the "no status restriction" choice in the export's language
pub const ALL_STATUSES: &str = "ทั้งหมด";

/// Single-select status filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Keep rows whose trimmed status equals this value exactly
    Exact(String),
}

impl StatusFilter {
    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => status == wanted,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s == ALL_STATUSES {
            Ok(Self::All)
        } else {
            Ok(Self::Exact(s.to_string()))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_STATUSES),
            Self::Exact(s) => write!(f, "{}", s),
        }
    }
}

/// Filter state with a builder API
///
/// ```ignore
/// let active = FilterState::new()
///     .channels(vec![Channel::Facebook])
///     .categories(vec![StatusCategory::Completed])
///     .apply(&rows);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub status: StatusFilter,
    pub channels: Vec<Channel>,
    pub categories: Vec<StatusCategory>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = channels;
        self
    }

    pub fn categories(mut self, categories: Vec<StatusCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Add the channel if absent, remove it if present
    pub fn toggle_channel(&mut self, channel: Channel) {
        if let Some(pos) = self.channels.iter().position(|c| *c == channel) {
            self.channels.remove(pos);
        } else {
            self.channels.push(channel);
        }
    }

    pub fn toggle_category(&mut self, category: StatusCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Reset all three axes
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All && self.channels.is_empty() && self.categories.is_empty()
    }

    pub fn matches(&self, row: &NormalizedRow) -> bool {
        self.status.matches(&row.order_status)
            && (self.channels.is_empty() || self.channels.contains(&row.channel))
            && (self.categories.is_empty()
                || self.categories.iter().any(|c| c.matches(&row.order_status)))
    }

    /// The active row set: every row passing all three axes, in input order
    pub fn apply(&self, rows: &[NormalizedRow]) -> Vec<NormalizedRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Free-function form of [`FilterState::apply`]
pub fn filter_rows(
    rows: &[NormalizedRow],
    status: &StatusFilter,
    channels: &[Channel],
    categories: &[StatusCategory],
) -> Vec<NormalizedRow> {
    FilterState {
        status: status.clone(),
        channels: channels.to_vec(),
        categories: categories.to_vec(),
    }
    .apply(rows)
}

/// One selectable option and the number of rows it would match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCount<T> {
    pub option: T,
    pub count: usize,
}

/// Choices offered by the filter controls, counted over the unfiltered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub channels: Vec<OptionCount<Channel>>,
    pub categories: Vec<OptionCount<StatusCategory>>,
    /// Distinct non-empty raw statuses in first-seen order
    pub statuses: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[NormalizedRow]) -> Self {
        let channels = Channel::all()
            .iter()
            .map(|&channel| OptionCount {
                option: channel,
                count: rows.iter().filter(|r| r.channel == channel).count(),
            })
            .collect();

        let categories = StatusCategory::all()
            .iter()
            .map(|&category| OptionCount {
                option: category,
                count: rows.iter().filter(|r| category.matches(&r.order_status)).count(),
            })
            .collect();

        let mut seen = HashSet::new();
        let statuses = rows
            .iter()
            .map(|r| r.order_status.as_str())
            .filter(|s| !s.is_empty() && seen.insert(*s))
            .map(String::from)
            .collect();

        Self {
            channels,
            categories,
            statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_channel;

    fn row(subid: &str, status: &str) -> NormalizedRow {
        NormalizedRow {
            net_commission: 10.0,
            order_status: status.to_string(),
            order_date: "2025-01-01".to_string(),
            product_name: String::new(),
            model_id: String::new(),
            order_id: String::new(),
            overall_order_commission: 0.0,
            quantity: 1.0,
            subid: subid.to_string(),
            channel: classify_channel(subid),
        }
    }

    fn fixture() -> Vec<NormalizedRow> {
        vec![
            row("fb_01", "สำเร็จ"),
            row("line_01", "รอดำเนินการ"),
            row("fb_02", "ยกเลิก"),
            row("video_01", "สำเร็จแล้ว"),
            row("ig", "ยังไม่ชำระเงิน"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let rows = fixture();
        assert!(FilterState::new().is_empty());
        assert_eq!(FilterState::new().apply(&rows), rows);
    }

    #[test]
    fn test_exact_status() {
        let rows = fixture();
        let status: StatusFilter = "สำเร็จ".parse().unwrap();
        let out = filter_rows(&rows, &status, &[], &[]);
        // Exact match only: "สำเร็จแล้ว" is not included
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].subid, "fb_01");
    }

    #[test]
    fn test_all_sentinel_parses() {
        assert_eq!("ทั้งหมด".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::All.to_string(), ALL_STATUSES);
    }

    #[test]
    fn test_axes_are_anded() {
        let rows = fixture();
        let out = FilterState::new()
            .channels(vec![Channel::Facebook, Channel::ShopeeVideo])
            .categories(vec![StatusCategory::Completed])
            .apply(&rows);
        let subids: Vec<&str> = out.iter().map(|r| r.subid.as_str()).collect();
        assert_eq!(subids, vec!["fb_01", "video_01"]);
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let rows = fixture();
        let filter = FilterState::new()
            .status(StatusFilter::Exact("ยกเลิก".to_string()))
            .channels(vec![Channel::Facebook]);
        let once = filter.apply(&rows);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| rows.contains(r)));
    }

    #[test]
    fn test_toggle() {
        let mut filter = FilterState::new();
        filter.toggle_channel(Channel::Line);
        filter.toggle_category(StatusCategory::Pending);
        assert_eq!(filter.channels, vec![Channel::Line]);
        filter.toggle_channel(Channel::Line);
        assert!(filter.channels.is_empty());
        filter.clear();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter_options_counts() {
        let options = FilterOptions::from_rows(&fixture());
        let count = |c: Channel| options.channels.iter().find(|o| o.option == c).unwrap().count;
        assert_eq!(count(Channel::Facebook), 2);
        assert_eq!(count(Channel::Others), 1);
        let completed = options
            .categories
            .iter()
            .find(|o| o.option == StatusCategory::Completed)
            .unwrap();
        assert_eq!(completed.count, 2);
        assert_eq!(options.statuses.len(), 5);
    }
}
