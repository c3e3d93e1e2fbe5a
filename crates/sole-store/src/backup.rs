//! # Backup & Restore
//!
//! The whole [`StoreState`] as a pretty-printed JSON document.
//!
//! ## Restore Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  file bytes                                                             │
//! │     │  serde_json::from_str::<Value>                                    │
//! │     ▼                                                                   │
//! │  top-level object with products / sales / settings?   ── no ──► Err   │
//! │     │  serde_json::from_value::<StoreState>                             │
//! │     ▼                                                                   │
//! │  every entity fully typed (stockLogs / suppliers default to [])         │
//! │     │  validate_snapshot                                                │
//! │     ▼                                                                   │
//! │  unique ids, settings in range, sale totals add up    ── no ──► Err   │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  StoreState, ready for Operation::RestoreState                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde_json::Value;
use sole_core::validation::validate_snapshot;
use sole_core::StoreState;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Top-level keys a backup must carry.
pub const REQUIRED_SECTIONS: [&str; 3] = ["products", "sales", "settings"];

// =============================================================================
// Export
// =============================================================================

/// Serializes the state as pretty-printed JSON (2-space indent).
pub fn to_json(state: &StoreState) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Writes the backup to `path`, creating parent directories.
pub fn export_to_file(state: &StoreState, path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let json = to_json(state)?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))?;

    info!(
        path = %path.display(),
        products = state.products.len(),
        sales = state.sales.len(),
        "backup written"
    );
    Ok(())
}

/// Writes a timestamped backup into `dir` and returns its path.
pub fn export_to_dir(state: &StoreState, dir: &Path, now: DateTime<Utc>) -> StoreResult<PathBuf> {
    let path = dir.join(backup_file_name(&state.settings.store_name, now));
    export_to_file(state, &path)?;
    Ok(path)
}

/// `{store}_backup_{timestamp}.json`, e.g.
/// `kubilay_shoes_backup_20240517T103000Z.json`.
pub fn backup_file_name(store_name: &str, now: DateTime<Utc>) -> String {
    let mut slug = String::new();
    for c in store_name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    let slug = if slug.is_empty() { "store" } else { slug };

    format!("{}_backup_{}.json", slug, now.format("%Y%m%dT%H%M%SZ"))
}

/// Platform data directory for backups
/// (e.g. `~/.local/share/sole-pos/backups`).
pub fn default_backup_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("com", "sole", "sole-pos")
        .map(|dirs| dirs.data_dir().join("backups"))
        .ok_or(StoreError::NoBackupDir)
}

// =============================================================================
// Restore
// =============================================================================

/// Parses and validates a backup document.
///
/// Nothing is applied here; the caller dispatches
/// `Operation::RestoreState` with the result.
pub fn parse_backup(json: &str) -> StoreResult<StoreState> {
    let value: Value = serde_json::from_str(json)?;
    let object = value.as_object().ok_or(StoreError::NotAnObject)?;

    for section in REQUIRED_SECTIONS {
        if !object.contains_key(section) {
            return Err(StoreError::MissingSection(section));
        }
    }

    let state: StoreState = serde_json::from_value(value)?;
    validate_snapshot(&state)?;

    debug!(
        products = state.products.len(),
        sales = state.sales.len(),
        stock_logs = state.stock_logs.len(),
        suppliers = state.suppliers.len(),
        "backup parsed"
    );
    Ok(state)
}

/// Reads and validates a backup file.
pub fn read_backup(path: &Path) -> StoreResult<StoreState> {
    let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    parse_backup(&json)
}

// =============================================================================
// Unit Tests
// =============================================================================
