//! Extracom sub-tool: order lines carrying a seller-paid commission
//!
//! Works on the same raw rows as the dashboard but with its own mapping and
//! its own filter (seller commission > 0). Rate columns are already on the
//! 0..100 scale; format them with [`crate::coerce::format_percent_value`].

use serde::Serialize;

use crate::coerce::parse_lenient_number;
use crate::mapping::{mapped_cell, ExtracomMapping};
use crate::models::{CellValue, RawRow};

static EMPTY: CellValue = CellValue::Empty;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtracomRow {
    pub product_name: String,
    pub seller_commission: f64,
    pub overall_product_commission: f64,
    pub shop_commission_rate: f64,
    pub platform_commission_rate: f64,
    /// shop rate + platform rate
    pub total_commission_rate: f64,
    pub purchase_value: f64,
    pub model_id: String,
    pub order_id: String,
}

fn cell<'a>(row: &'a RawRow, column: &str) -> &'a CellValue {
    mapped_cell(row, column).unwrap_or(&EMPTY)
}

fn extracom_row(row: &RawRow, mapping: &ExtracomMapping) -> ExtracomRow {
    let shop = parse_lenient_number(cell(row, &mapping.shop_commission_rate));
    let platform = parse_lenient_number(cell(row, &mapping.platform_commission_rate));
    ExtracomRow {
        product_name: cell(row, &mapping.product_name).as_text(),
        seller_commission: parse_lenient_number(cell(row, &mapping.seller_commission)),
        overall_product_commission: parse_lenient_number(cell(
            row,
            &mapping.overall_product_commission,
        )),
        shop_commission_rate: shop,
        platform_commission_rate: platform,
        total_commission_rate: shop + platform,
        purchase_value: parse_lenient_number(cell(row, &mapping.purchase_value)),
        model_id: cell(row, &mapping.model_id).as_text().trim().to_string(),
        order_id: cell(row, &mapping.order_id).as_text().trim().to_string(),
    }
}

/// Rows with a positive seller commission, in input order
pub fn extracom_rows(rows: &[RawRow], mapping: &ExtracomMapping) -> Vec<ExtracomRow> {
    rows.iter()
        .map(|r| extracom_row(r, mapping))
        .filter(|r| r.seller_commission > 0.0)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtracomStats {
    pub total_items: usize,
    pub total_commission: f64,
    /// Feeds the milestone tracker
    pub total_value: f64,
    pub avg_commission_rate: f64,
}

/// Totals over every extracom row; search never narrows these
pub fn extracom_stats(rows: &[ExtracomRow]) -> ExtracomStats {
    let total_items = rows.len();
    let avg_commission_rate = if total_items > 0 {
        rows.iter().map(|r| r.total_commission_rate).sum::<f64>() / total_items as f64
    } else {
        0.0
    };
    ExtracomStats {
        total_items,
        total_commission: rows.iter().map(|r| r.overall_product_commission).sum(),
        total_value: rows.iter().map(|r| r.purchase_value).sum(),
        avg_commission_rate,
    }
}

/// Case-insensitive product-name search; a blank query matches everything
pub fn search_products<'a>(rows: &'a [ExtracomRow], query: &str) -> Vec<&'a ExtracomRow> {
    if query.trim().is_empty() {
        return rows.iter().collect();
    }
    let query = query.to_lowercase();
    rows.iter()
        .filter(|r| r.product_name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, seller: &str, shop: &str, platform: &str, value: f64) -> RawRow {
        let m = ExtracomMapping::default();
        let mut row = RawRow::new();
        row.insert(m.product_name, CellValue::from(name));
        row.insert(m.seller_commission, CellValue::from(seller));
        row.insert(m.overall_product_commission, CellValue::Number(value / 10.0));
        row.insert(m.shop_commission_rate, CellValue::from(shop));
        row.insert(m.platform_commission_rate, CellValue::from(platform));
        row.insert(m.purchase_value, CellValue::Number(value));
        row
    }

    fn fixture() -> Vec<ExtracomRow> {
        let rows = vec![
            raw("Red Shirt", "12.5", "5%", "3%", 1000.0),
            raw("Blue Hat", "0", "5%", "3%", 500.0),
            raw("red mug", "4", "2%", "1%", 200.0),
            raw("Socks", "-1", "2%", "1%", 50.0),
        ];
        extracom_rows(&rows, &ExtracomMapping::default())
    }

    #[test]
    fn test_only_positive_seller_commission() {
        let rows = fixture();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_commission_rate, 8.0);
        assert_eq!(rows[1].product_name, "red mug");
    }

    #[test]
    fn test_stats() {
        let stats = extracom_stats(&fixture());
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_value, 1200.0);
        assert_eq!(stats.total_commission, 120.0);
        assert_eq!(stats.avg_commission_rate, 5.5);
        assert_eq!(extracom_stats(&[]), ExtracomStats::default());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = fixture();
        assert_eq!(search_products(&rows, "RED").len(), 2);
        assert_eq!(search_products(&rows, "mug").len(), 1);
        assert_eq!(search_products(&rows, "  ").len(), 2);
        assert!(search_products(&rows, "hat").is_empty());
    }
}
