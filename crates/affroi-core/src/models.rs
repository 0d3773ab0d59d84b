//! Domain models for affroi

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// SubID assigned to rows whose candidate columns are all blank
pub const NO_SUBID: &str = "(no-subid)";

/// A single spreadsheet cell as handed over by the import step
///
/// Serialized untagged so the stored row cache reads as plain JSON objects
/// (`{"Sub_id1": "fb_01", "จำนวน": 2}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// String form of the cell, matching how a spreadsheet would print it
    ///
    /// Integral numbers print without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }

    /// True for empty cells and text cells containing only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::Empty => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One imported spreadsheet line, keyed by column header
pub type RawRow = BTreeMap<String, CellValue>;

/// Marketing channel derived from a SubID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    Facebook,
    Line,
    #[serde(rename = "Shopeevideo-Shopee")]
    ShopeeVideo,
    Others,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Line => "Line",
            Self::ShopeeVideo => "Shopeevideo-Shopee",
            Self::Others => "Others",
        }
    }

    /// Filter options in display order
    pub fn all() -> &'static [Channel] {
        &[Self::Facebook, Self::Line, Self::Others, Self::ShopeeVideo]
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" | "fb" => Ok(Self::Facebook),
            "line" => Ok(Self::Line),
            "shopeevideo-shopee" | "shopee" | "shopee-video" | "video" => Ok(Self::ShopeeVideo),
            "others" | "other" => Ok(Self::Others),
            _ => Err(format!("Unknown channel: {}", s)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loose order status buckets used by the multi-select status filter
///
/// A raw status may fall into several categories at once; matching is by
/// substring (see [`crate::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Cancelled,
    Unpaid,
    Pending,
    Completed,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Unpaid => "unpaid",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Label as it appears in the export files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cancelled => "ยกเลิก",
            Self::Unpaid => "ยังไม่ชำระเงิน",
            Self::Pending => "รอดำเนินการ",
            Self::Completed => "สำเร็จ",
        }
    }

    pub fn all() -> &'static [StatusCategory] {
        &[Self::Cancelled, Self::Unpaid, Self::Pending, Self::Completed]
    }
}

impl FromStr for StatusCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed) || c.label() == trimmed)
            .ok_or_else(|| format!("Unknown status category: {}", s))
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical, strongly-typed view of one raw row
///
/// Recomputed whenever the raw rows or the column mapping change; never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub net_commission: f64,
    pub order_status: String,
    /// `YYYY-MM-DD` when the timestamp could be read, else a best-effort prefix
    pub order_date: String,
    pub product_name: String,
    pub model_id: String,
    pub order_id: String,
    /// Purchase value of the line, used as the GMV proxy
    pub overall_order_commission: f64,
    pub quantity: f64,
    pub subid: String,
    pub channel: Channel,
}

/// Advertising and other costs entered for one SubID
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendEntry {
    #[serde(default)]
    pub ad: f64,
    #[serde(default)]
    pub other: f64,
}

impl SpendEntry {
    pub fn total(&self) -> f64 {
        self.ad + self.other
    }
}

/// Spend entries keyed by SubID
pub type SpendBook = BTreeMap<String, SpendEntry>;

/// Fixed catalog of income sources outside the imported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Lazada,
    Tiktok,
    ShopeeVideo,
    CampaignBonus,
    Other,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lazada => "lazada",
            Self::Tiktok => "tiktok",
            Self::ShopeeVideo => "shopee_video",
            Self::CampaignBonus => "campaign_bonus",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lazada => "ค่าคอม Lazada",
            Self::Tiktok => "ค่าคอม TikTok",
            Self::ShopeeVideo => "Shopee Video/Live",
            Self::CampaignBonus => "โบนัสจากแคมเปญ",
            Self::Other => "อื่นๆ",
        }
    }

    pub fn all() -> &'static [IncomeSource] {
        &[
            Self::Lazada,
            Self::Tiktok,
            Self::ShopeeVideo,
            Self::CampaignBonus,
            Self::Other,
        ]
    }
}

impl FromStr for IncomeSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lazada" => Ok(Self::Lazada),
            "tiktok" => Ok(Self::Tiktok),
            "shopee_video" => Ok(Self::ShopeeVideo),
            "campaign_bonus" => Ok(Self::CampaignBonus),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown income source: {}", s)),
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income from outside the imported report, counted toward total profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherIncomeEntry {
    pub id: IncomeSource,
    pub source: String,
    #[serde(default)]
    pub amount: f64,
}

impl OtherIncomeEntry {
    pub fn new(id: IncomeSource) -> Self {
        Self {
            id,
            source: id.label().to_string(),
            amount: 0.0,
        }
    }
}
