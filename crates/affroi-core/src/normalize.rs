//! Row normalization: raw spreadsheet rows to [`NormalizedRow`]
//!
//! Never fails and never drops a row. Missing or unmapped columns read as an
//! empty cell, so numbers become 0 and strings become empty.

use crate::classify::classify_channel;
use crate::coerce::{canonical_date, parse_lenient_number};
use crate::mapping::{extract_sub_id, mapped_cell, FieldMapping};
use crate::models::{CellValue, NormalizedRow, RawRow};

static EMPTY: CellValue = CellValue::Empty;

fn cell<'a>(row: &'a RawRow, column: &str) -> &'a CellValue {
    mapped_cell(row, column).unwrap_or(&EMPTY)
}

/// Normalize one raw row with the given mapping
///
/// Status, order id and model id are trimmed; the product name is kept as-is.
pub fn normalize_row(row: &RawRow, mapping: &FieldMapping) -> NormalizedRow {
    let subid = extract_sub_id(row, &mapping.sub_ids);
    let channel = classify_channel(&subid);

    NormalizedRow {
        net_commission: parse_lenient_number(cell(row, &mapping.net_commission)),
        order_status: cell(row, &mapping.order_status).as_text().trim().to_string(),
        order_date: canonical_date(cell(row, &mapping.order_time)),
        product_name: cell(row, &mapping.product_name).as_text(),
        model_id: cell(row, &mapping.model_id).as_text().trim().to_string(),
        order_id: cell(row, &mapping.order_id).as_text().trim().to_string(),
        overall_order_commission: parse_lenient_number(cell(
            row,
            &mapping.overall_order_commission,
        )),
        quantity: parse_lenient_number(cell(row, &mapping.quantity)),
        subid,
        channel,
    }
}

/// Normalize a whole dataset, preserving order and length
pub fn normalize_rows(rows: &[RawRow], mapping: &FieldMapping) -> Vec<NormalizedRow> {
    rows.iter().map(|row| normalize_row(row, mapping)).collect()
}
