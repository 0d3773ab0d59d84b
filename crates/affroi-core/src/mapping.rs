//! Column mapping: which raw column feeds which logical field
//!
//! Defaults match the Shopee Affiliate (TH) order report. Users can point any
//! field at a different header; a blank column name means "not mapped" and
//! every row reads that field as its type default.
//!
//! ## Configuration Resolution
//!
//! 1. `mapping.toml` in the data directory, when present
//! 2. Built-in defaults otherwise
//!
//! The override file may set any subset of keys; the rest keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{CellValue, RawRow, NO_SUBID};

/// File name of the mapping override inside the data directory
pub const MAPPING_FILE: &str = "mapping.toml";

/// Column names for the main dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldMapping {
    pub net_commission: String,
    pub order_status: String,
    pub order_time: String,
    pub product_name: String,
    pub overall_order_commission: String,
    pub order_id: String,
    pub model_id: String,
    pub quantity: String,
    /// Candidate SubID columns, checked in order
    pub sub_ids: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            net_commission: "ค่าคอมมิชชั่นสุทธิ(฿)".to_string(),
            order_status: "สถานะการสั่งซื้อ".to_string(),
            order_time: "เวลาที่สั่งซื้อ".to_string(),
            product_name: "ชื่อรายการสินค้า".to_string(),
            overall_order_commission: "มูลค่าซื้อ(฿)".to_string(),
            order_id: "รหัสการสั่งซื้อ".to_string(),
            model_id: "เลขที่ โมเดล".to_string(),
            quantity: "จำนวน".to_string(),
            sub_ids: (1..=5).map(|i| format!("Sub_id{}", i)).collect(),
        }
    }
}

/// Column names for the extracom (seller commission) sub-tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtracomMapping {
    pub product_name: String,
    pub seller_commission: String,
    pub overall_product_commission: String,
    pub shop_commission_rate: String,
    pub platform_commission_rate: String,
    pub purchase_value: String,
    pub model_id: String,
    pub order_id: String,
}

impl Default for ExtracomMapping {
    fn default() -> Self {
        Self {
            product_name: "ชื่อรายการสินค้า".to_string(),
            seller_commission: "คอมมิชชั่นคำสั่งซื้อจากผู้ขาย(฿)".to_string(),
            overall_product_commission: "คอมมิชชั่นสินค้าโดยรวม(฿)".to_string(),
            shop_commission_rate: "อัตราคอมมิชชั่นร้านค้าของสินค้า".to_string(),
            platform_commission_rate: "อัตราคอมมิชชั่นช้อปปี้ของสินค้า".to_string(),
            purchase_value: "มูลค่าซื้อ(฿)".to_string(),
            model_id: "เลขที่ โมเดล".to_string(),
            order_id: "รหัสการสั่งซื้อ".to_string(),
        }
    }
}

/// Default data directory (`~/.local/share/affroi` on Linux)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("affroi"))
}

/// Both mappings as stored in `mapping.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub dashboard: FieldMapping,
    pub extracom: ExtracomMapping,
}

impl MappingConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path of the override file for a data directory
    pub fn override_path(data_dir: &Path) -> PathBuf {
        data_dir.join(MAPPING_FILE)
    }

    /// Load the override from `data_dir`, falling back to defaults when absent
    ///
    /// A present but malformed file is an error: unlike cached data, the
    /// mapping is written by hand and silently ignoring it would hide typos.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::override_path(data_dir);
        if !path.exists() {
            debug!("No mapping override at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded column mapping from {}", path.display());
        Ok(config)
    }

    /// Write the current mapping as an editable override file
    pub fn save(&self, data_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(data_dir)?;
        let path = Self::override_path(data_dir);
        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }
}

/// Look up a mapped column; blank column names are unmapped
pub fn mapped_cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a CellValue> {
    if column.trim().is_empty() {
        return None;
    }
    row.get(column)
}

/// First non-blank value among the candidate columns, trimmed
///
/// Falls back to [`NO_SUBID`] when every candidate is blank or missing.
pub fn extract_sub_id(row: &RawRow, candidates: &[String]) -> String {
    candidates
        .iter()
        .filter_map(|column| mapped_cell(row, column))
        .map(|cell| cell.as_text().trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| NO_SUBID.to_string())
}
