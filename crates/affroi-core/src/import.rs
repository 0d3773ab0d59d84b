//! Import boundary: order export files to raw rows
//!
//! CSV files are read with headers as keys and every cell as text. Excel
//! workbooks contribute their first sheet only, with the first row as the
//! header. Unknown file types are not an error: [`import_file`] returns
//! `Ok(None)` and the caller skips the import.

use std::fs;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{CellValue, RawRow};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xls => "xls",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

/// Detect the format from the file extension (case-insensitive)
///
/// Returns None if the extension is not recognized.
pub fn detect_file_format(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "csv" => Some(FileFormat::Csv),
        "xls" => Some(FileFormat::Xls),
        "xlsx" => Some(FileFormat::Xlsx),
        _ => None,
    }
}

/// Provenance of the current raw-row dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub file_name: String,
    pub format: FileFormat,
    /// SHA-256 of the file bytes, hex encoded
    pub sha256: String,
    pub row_count: usize,
    pub imported_at: DateTime<Utc>,
}

/// Parsed rows plus their provenance
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub rows: Vec<RawRow>,
    pub record: ImportRecord,
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Parse delimited text with headers as keys
///
/// Empty lines are skipped. A line made only of delimiters is kept as a row of
/// blank cells. Cells beyond the header width are dropped; short records
/// simply lack the trailing keys.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), CellValue::from(value)))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "Parsed CSV");
    Ok(rows)
}

/// Convert a spreadsheet cell into the row cell model
///
/// Numbers stay numbers, empty cells become empty text, dates become
/// `YYYY-MM-DD HH:MM:SS` text so the date extractor reads them like CSV input.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Text(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Text(String::new()),
    }
}

/// Read the first worksheet of an Excel workbook
pub fn parse_spreadsheet(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Import(format!("No worksheets in {}", path.display())))??;

    let rows = rows_from_range(&range);
    debug!(rows = rows.len(), path = %path.display(), "Parsed worksheet");
    Ok(rows)
}

/// Turn a worksheet range into raw rows
///
/// The first row is the header. Columns with a blank header and rows with no
/// non-blank cell are skipped.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_from_data(cell).as_text().trim().to_string())
        .collect();

    sheet_rows
        .filter(|cells| !cells.iter().all(|c| cell_from_data(c).is_blank()))
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), cell_from_data(cell)))
                .collect()
        })
        .collect()
}

/// Parse an export file into raw rows
///
/// Returns `Ok(None)` for unsupported file types.
pub fn import_file(path: &Path) -> Result<Option<ImportedFile>> {
    let Some(format) = detect_file_format(path) else {
        info!(path = %path.display(), "Unsupported file type, skipping import");
        return Ok(None);
    };

    let bytes = fs::read(path)?;
    let rows = match format {
        FileFormat::Csv => parse_csv(bytes.as_slice())?,
        FileFormat::Xls | FileFormat::Xlsx => parse_spreadsheet(path)?,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let record = ImportRecord {
        file_name,
        format,
        sha256: hash_bytes(&bytes),
        row_count: rows.len(),
        imported_at: Utc::now(),
    };

    info!(
        file = %record.file_name,
        format = format.as_str(),
        rows = record.row_count,
        "Imported order export"
    );
    Ok(Some(ImportedFile { rows, record }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::canonical_date;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;

    #[test]
    fn test_detect_file_format() {
        assert_eq!(
            detect_file_format(Path::new("report.CSV")),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            detect_file_format(Path::new("/tmp/a.b.xlsx")),
            Some(FileFormat::Xlsx)
        );
        assert_eq!(detect_file_format(Path::new("old.xls")), Some(FileFormat::Xls));
        assert_eq!(detect_file_format(Path::new("notes.txt")), None);
        assert_eq!(detect_file_format(Path::new("no_extension")), None);
    }

    #[test]
    fn test_parse_csv() {
        let csv = "\u{feff}Sub_id1,ค่าคอมมิชชั่นสุทธิ(฿),จำนวน\nfb_01,\"1,200.50\",2\n\nline_01,30\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Sub_id1"], CellValue::from("fb_01"));
        assert_eq!(rows[0]["ค่าคอมมิชชั่นสุทธิ(฿)"], CellValue::from("1,200.50"));
        assert!(rows[1].get("จำนวน").is_none());
    }

    #[test]
    fn test_parse_csv_keeps_delimiter_only_lines() {
        let rows = parse_csv("a,b\n1,2\n,\n3,4\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["a"], CellValue::from(""));
        assert_eq!(rows[1]["b"], CellValue::from(""));
        assert_eq!(rows[2]["a"], CellValue::from("3"));
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(cell_from_data(&Data::Empty), CellValue::from(""));
        assert_eq!(cell_from_data(&Data::Bool(true)), CellValue::from("TRUE"));
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2025-01-05T10:00:00".to_string())),
            CellValue::from("2025-01-05T10:00:00")
        );
    }

    #[test]
    fn test_cell_from_excel_datetime() {
        let serial = Data::DateTime(ExcelDateTime::new(
            45662.5,
            ExcelDateTimeType::DateTime,
            false,
        ));
        let cell = cell_from_data(&serial);
        assert_eq!(cell, CellValue::from("2025-01-05 12:00:00"));
        assert_eq!(canonical_date(&cell), "2025-01-05");
    }

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (cells.len() as u32 - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    #[test]
    fn test_rows_from_range() {
        let s = |v: &str| Data::String(v.to_string());
        let range = sheet(&[
            &[s("Sub_id1"), Data::Empty, s("จำนวน"), s("เวลาที่สั่งซื้อ")],
            &[
                s("fb_01"),
                s("ignored"),
                Data::Float(2.0),
                Data::DateTime(ExcelDateTime::new(
                    45662.5,
                    ExcelDateTimeType::DateTime,
                    false,
                )),
            ],
            &[Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            &[s("line_01"), Data::Empty, Data::Int(1), Data::Empty],
        ]);

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0]["Sub_id1"], CellValue::from("fb_01"));
        assert_eq!(rows[0]["จำนวน"], CellValue::Number(2.0));
        assert_eq!(
            rows[0]["เวลาที่สั่งซื้อ"],
            CellValue::from("2025-01-05 12:00:00")
        );
        assert!(rows[0].values().all(|v| *v != CellValue::from("ignored")));
        assert_eq!(rows[1]["จำนวน"], CellValue::Number(1.0));
        assert_eq!(rows[1]["เวลาที่สั่งซื้อ"], CellValue::from(""));
    }

    #[test]
    fn test_rows_from_empty_range() {
        assert!(rows_from_range(&Range::<Data>::empty()).is_empty());
    }

    #[test]
    fn test_parse_spreadsheet_rejects_non_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        fs::write(&path, "not a workbook").unwrap();
        assert!(parse_spreadsheet(&path).is_err());
    }

    #[test]
    fn test_import_unsupported_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"%PDF").unwrap();
        assert!(import_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_import_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "Sub_id1,จำนวน").unwrap();
        writeln!(file, "fb_01,1").unwrap();
        drop(file);

        let imported = import_file(&path).unwrap().unwrap();
        assert_eq!(imported.rows.len(), 1);
        assert_eq!(imported.record.file_name, "orders.csv");
        assert_eq!(imported.record.format, FileFormat::Csv);
        assert_eq!(imported.record.row_count, 1);
        assert_eq!(imported.record.sha256.len(), 64);
        assert_eq!(
            imported.record.sha256,
            hash_bytes(&fs::read(&path).unwrap())
        );
    }

    #[test]
    fn test_import_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import_file(&dir.path().join("gone.csv")).is_err());
    }
}
