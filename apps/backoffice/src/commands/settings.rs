//! # Settings Commands
//!
//! Store settings (name, receipt header, VAT, low-stock threshold, staff
//! discount cap) and the read-only app configuration.
//!
//! Everyone signed in may read the settings; only administrators change
//! them.

use sole_core::types::{Section, SettingsPatch, StoreSettings};
use sole_core::Operation;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::{AppConfig, LedgerState, SessionState};

pub fn get_settings(ledger: &LedgerState, session: &SessionState) -> ApiResult<StoreSettings> {
    session.require_section(Section::Settings)?;
    debug!("get_settings command");
    Ok(ledger.with_state(|s| s.settings.clone()))
}

/// Merges `patch` into the store settings.
///
/// ## Errors
/// - `FORBIDDEN` for staff
/// - `VALIDATION_ERROR` for a blank store name or a rate outside 0-100%
pub fn update_settings(
    ledger: &LedgerState,
    session: &SessionState,
    patch: SettingsPatch,
) -> ApiResult<StoreSettings> {
    let user = session.require_admin("change store settings")?;
    debug!(?patch, "update_settings command");

    let transition = ledger.dispatch(Operation::UpdateSettings(patch))?;
    info!(by = %user.username, "Store settings updated");
    Ok(transition.state.settings)
}

/// Gets the application configuration (currency, backup location).
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}
