//! # Report Commands
//!
//! Dashboard figures for everyone; period reports for administrators.
//!
//! Report windows follow the machine's local calendar. The `_at`
//! variants take an explicit "now" and are what the tests call.

use chrono::{DateTime, FixedOffset, Local};
use sole_core::reports::{dashboard, period_report, DashboardSummary, PeriodReport, ReportPeriod};
use sole_core::types::Section;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{LedgerState, SessionState};

fn local_now() -> DateTime<FixedOffset> {
    Local::now().into()
}

/// Revenue, profit and breakdowns since the start of the day, month or year.
pub fn get_report(
    ledger: &LedgerState,
    session: &SessionState,
    period: ReportPeriod,
) -> ApiResult<PeriodReport> {
    get_report_at(ledger, session, period, local_now())
}

pub fn get_report_at(
    ledger: &LedgerState,
    session: &SessionState,
    period: ReportPeriod,
    now: DateTime<FixedOffset>,
) -> ApiResult<PeriodReport> {
    session.require_section(Section::Reports)?;
    debug!(?period, now = %now, "get_report command");
    Ok(ledger.with_state(|s| period_report(s, period, now)))
}

/// Today's figures, stock counts and the last seven days of revenue.
pub fn get_dashboard(ledger: &LedgerState, session: &SessionState) -> ApiResult<DashboardSummary> {
    get_dashboard_at(ledger, session, local_now())
}

pub fn get_dashboard_at(
    ledger: &LedgerState,
    session: &SessionState,
    now: DateTime<FixedOffset>,
) -> ApiResult<DashboardSummary> {
    session.require_section(Section::Dashboard)?;
    debug!(now = %now, "get_dashboard command");
    Ok(ledger.with_state(|s| dashboard(s, now)))
}
