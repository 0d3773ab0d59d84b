//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `calendar` - Monthly campaign calendar
//! - `core` - Shared utilities (data dir, open_session), mapping and reset
//! - `goals` - Milestones and the extracom report
//! - `import` - Order export import
//! - `reports` - Dashboard, SubID, product, trend and insight reports
//! - `spend` - Spend entries and other incomes

pub mod calendar;
pub mod core;
pub mod goals;
pub mod import;
pub mod reports;
pub mod spend;

// Re-export command functions for main.rs
pub use calendar::*;
pub use core::*;
pub use goals::*;
pub use import::*;
pub use reports::*;
pub use spend::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pretty-print a report as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
