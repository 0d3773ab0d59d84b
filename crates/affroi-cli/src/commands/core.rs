//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `resolve_data_dir` / `open_session` - Shared utilities to locate and open the store
//! - `cmd_mapping` - Show or write the column mapping
//! - `cmd_reset` - Clear the session data

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use affroi_core::{default_data_dir, Database, MappingConfig, Session};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "AFFROI_DATA_DIR";

pub type AppSession = Session<Database>;

/// Data directory priority: --data-dir > AFFROI_DATA_DIR > platform default
pub fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    default_data_dir().context("Could not determine a data directory; pass --data-dir")
}

/// Open the store in `data_dir` with the mapping in effect there
pub fn open_session(data_dir: &Path) -> Result<AppSession> {
    let mapping = MappingConfig::load(data_dir).with_context(|| {
        format!(
            "Failed to load {}",
            MappingConfig::override_path(data_dir).display()
        )
    })?;
    let db = Database::in_dir(data_dir)
        .with_context(|| format!("Failed to open store in {}", data_dir.display()))?;
    Session::open(db, mapping).context("Failed to load session")
}

pub fn cmd_mapping(data_dir: &Path, init: bool, force: bool) -> Result<()> {
    let path = MappingConfig::override_path(data_dir);

    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        let written = MappingConfig::default().save(data_dir)?;
        println!("✅ Wrote default mapping to {}", written.display());
        println!("   Edit the column names to match your export, then re-run a report.");
        return Ok(());
    }

    let mapping = MappingConfig::load(data_dir)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    if path.exists() {
        println!("# Mapping from {}", path.display());
    } else {
        println!("# Built-in default mapping (run `affroi mapping --init` to customize)");
    }
    println!();
    print!("{}", mapping.to_toml()?);
    Ok(())
}

pub fn cmd_reset(session: &mut AppSession, yes: bool) -> Result<()> {
    if !yes {
        print!("⚠️  This will delete the imported orders, spend entries and other incomes.\n");
        print!("   Milestone goals will be preserved.\n\n");
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session.reset().context("Failed to reset session")?;

    println!("✅ Reset complete.");
    println!("   Cleared: imported orders, spend, ad spend override, other incomes");
    println!("   Preserved: milestone goals, mapping.toml");
    Ok(())
}
