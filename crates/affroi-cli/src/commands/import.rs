//! Import command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::AppSession;

pub fn cmd_import(session: &mut AppSession, file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    println!("📥 Importing {}...", file.display());

    let record = session
        .import_path(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    let Some(record) = record else {
        println!("   Unsupported file type (expected .csv, .xls or .xlsx); nothing imported.");
        return Ok(());
    };

    println!("   Format: {}", record.format.as_str());
    println!("   Rows: {}", record.row_count);
    println!("   SHA-256: {}", &record.sha256[..12.min(record.sha256.len())]);

    let report = session.dashboard();
    if let Some(range) = &report.date_range {
        println!("   Dates: {}", range);
    }
    println!("✅ Import complete! Previous data was replaced.");
    println!();
    println!("Next steps:");
    println!("  affroi dashboard");
    println!("  affroi spend set <subid> --ad <amount>");

    Ok(())
}
