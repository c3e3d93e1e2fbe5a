//! # Backup Commands
//!
//! JSON export and restore of the whole store. Administrators only.
//!
//! ## Restore Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Restore                                              │
//! │                                                                         │
//! │  confirmed == false ──────────────────────────► BUSINESS_LOGIC         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  sole_store::parse_backup                                               │
//! │     • JSON object with products / sales / settings                      │
//! │     • every entity fully typed                                          │
//! │     • unique ids, consistent sale totals                                │
//! │         │                                                               │
//! │         ├── any failure ──► BACKUP_ERROR (store untouched)              │
//! │         ▼                                                               │
//! │  dispatch(RestoreState) ──► cart cleared                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use sole_core::{Operation, StoreState};
use sole_store::backup::{export_to_dir, export_to_file, to_json};
use sole_store::{parse_backup, read_backup};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::{AppConfig, CartState, LedgerState, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResponse {
    /// File written or read; `None` for in-memory JSON
    pub path: Option<String>,
    pub products: usize,
    pub sales: usize,
    pub stock_logs: usize,
    pub suppliers: usize,
}

impl BackupResponse {
    fn of(state: &StoreState, path: Option<&PathBuf>) -> Self {
        BackupResponse {
            path: path.map(|p| p.display().to_string()),
            products: state.products.len(),
            sales: state.sales.len(),
            stock_logs: state.stock_logs.len(),
            suppliers: state.suppliers.len(),
        }
    }
}

/// Writes a backup to `path`, or a timestamped file in the backup directory.
pub fn export_backup(
    ledger: &LedgerState,
    session: &SessionState,
    config: &AppConfig,
    path: Option<PathBuf>,
) -> ApiResult<BackupResponse> {
    let user = session.require_admin("export backups")?;
    debug!(?path, "export_backup command");

    let state = ledger.snapshot();
    let path = match path {
        Some(path) => {
            export_to_file(&state, &path)?;
            path
        }
        None => export_to_dir(&state, &config.backup_dir()?, Utc::now())?,
    };

    info!(path = %path.display(), by = %user.username, "Backup exported");
    Ok(BackupResponse::of(&state, Some(&path)))
}

/// The backup document as a string, for a UI download.
pub fn export_backup_json(ledger: &LedgerState, session: &SessionState) -> ApiResult<String> {
    session.require_admin("export backups")?;
    debug!("export_backup_json command");
    Ok(to_json(&ledger.snapshot())?)
}

fn require_confirmation(confirmed: bool) -> ApiResult<()> {
    if !confirmed {
        warn!("Restore attempted without confirmation");
        return Err(ApiError::new(
            ErrorCode::BusinessLogic,
            "Restoring replaces all current data; confirm to continue",
        ));
    }
    Ok(())
}

fn replace_store(ledger: &LedgerState, cart: &CartState, restored: StoreState) -> ApiResult<StoreState> {
    let transition = ledger.dispatch(Operation::RestoreState(Box::new(restored)))?;
    cart.with_cart_mut(|c| c.clear());
    Ok(transition.state)
}

/// Replaces the whole store with the backup at `path`.
pub fn restore_backup(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    path: PathBuf,
    confirmed: bool,
) -> ApiResult<BackupResponse> {
    let user = session.require_admin("restore backups")?;
    debug!(path = %path.display(), confirmed, "restore_backup command");
    require_confirmation(confirmed)?;

    let restored = read_backup(&path)?;
    let state = replace_store(ledger, cart, restored)?;

    info!(path = %path.display(), by = %user.username, "Backup restored");
    Ok(BackupResponse::of(&state, Some(&path)))
}

/// Replaces the whole store with a backup document given as text.
pub fn restore_backup_json(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    json: String,
    confirmed: bool,
) -> ApiResult<BackupResponse> {
    let user = session.require_admin("restore backups")?;
    debug!(bytes = json.len(), confirmed, "restore_backup_json command");
    require_confirmation(confirmed)?;

    let restored = parse_backup(&json)?;
    let state = replace_store(ledger, cart, restored)?;

    info!(by = %user.username, "Backup restored");
    Ok(BackupResponse::of(&state, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, product, testing};
    use tempfile::TempDir;

    #[test]
    fn test_export_into_configured_dir_then_restore() {
        let mut f = testing::admin();
        let dir = TempDir::new().unwrap();
        f.config.backup.dir = Some(dir.path().to_path_buf());

        let exported = export_backup(&f.ledger, &f.session, &f.config, None).unwrap();
        let path = PathBuf::from(exported.path.unwrap());
        assert!(path.starts_with(dir.path()));
        assert_eq!(exported.products, 6);

        product::delete_product(&f.ledger, &f.session, "1".to_string()).unwrap();
        cart::add_to_cart(&f.ledger, &f.cart, &f.session, "2".to_string()).unwrap();

        let restored = restore_backup(&f.ledger, &f.cart, &f.session, path, true).unwrap();
        assert_eq!(restored.products, 6);
        assert!(f.ledger.with_state(|s| s.product("1").is_some()));
        assert!(f.cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_restore_requires_confirmation() {
        let f = testing::admin();
        let json = export_backup_json(&f.ledger, &f.session).unwrap();
        let err = restore_backup_json(&f.ledger, &f.cart, &f.session, json, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_bad_backup_leaves_store_untouched() {
        let f = testing::admin();
        let before = f.ledger.snapshot();

        for json in [
            "not json",
            "[]",
            r#"{"products": [], "sales": []}"#,
            r#"{"products": [{"id": "1"}], "sales": [], "settings": {}}"#,
        ] {
            let err = restore_backup_json(&f.ledger, &f.cart, &f.session, json.to_string(), true)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::BackupError, "accepted: {}", json);
        }
        assert_eq!(f.ledger.snapshot(), before);
    }

    #[test]
    fn test_staff_cannot_back_up() {
        let f = testing::staff();
        let err = export_backup_json(&f.ledger, &f.session).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        let err = restore_backup_json(&f.ledger, &f.cart, &f.session, "{}".to_string(), true)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_missing_file() {
        let f = testing::admin();
        let dir = TempDir::new().unwrap();
        let err = restore_backup(&f.ledger, &f.cart, &f.session, dir.path().join("none.json"), true)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupError);
    }
}
