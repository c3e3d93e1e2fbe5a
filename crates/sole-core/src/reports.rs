//! # Reports
//!
//! Revenue and profit summaries over the sales history.
//!
//! ## Report Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Daily    local midnight today ──────────────► now   cash / card split  │
//! │  Monthly  1st of this month 00:00 ───────────► now   revenue per day    │
//! │  Yearly   Jan 1st 00:00 ─────────────────────► now   revenue per month  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Windows are computed in the caller's local offset. Sale timestamps are
//! stored in UTC and converted before bucketing.
//!
//! ## Profit
//! `profit = (subtotal − discount) − Σ purchase price × quantity`, using the
//! CURRENT purchase price of products that still exist. Lines of deleted
//! products contribute revenue but no cost.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ledger::StoreState;
use crate::money::Money;
use crate::types::{PaymentMethod, Product, Sale};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportPeriod {
    Daily,
    Monthly,
    Yearly,
}

/// One bar of a revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RevenueBucket {
    pub label: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    /// VAT-inclusive takings.
    pub revenue: Money,
    pub profit: Money,
    pub sale_count: usize,
    pub cash_revenue: Money,
    pub card_revenue: Money,
    /// Per-day (monthly) or per-month (yearly) revenue; empty for daily.
    pub buckets: Vec<RevenueBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
}

/// Numbers on the dashboard cards plus the 7-day chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    pub today_revenue: Money,
    pub today_units_sold: i64,
    pub product_count: usize,
    pub low_stock_count: usize,
    /// Oldest first, ending today.
    pub last_seven_days: Vec<DailyRevenue>,
}

fn local(ts: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDateTime {
    ts.with_timezone(offset).naive_local()
}

fn period_start(period: ReportPeriod, today: NaiveDate) -> NaiveDateTime {
    let day = match period {
        ReportPeriod::Daily => today,
        ReportPeriod::Monthly => today - Days::new(today.day0() as u64),
        ReportPeriod::Yearly => today - Days::new(today.ordinal0() as u64),
    };
    day.and_time(NaiveTime::MIN)
}

/// Net revenue of a sale minus the cost of the goods it moved.
pub fn sale_profit(sale: &Sale, products: &[Product]) -> Money {
    let cost: Money = sale
        .items
        .iter()
        .filter_map(|item| {
            products
                .iter()
                .find(|p| p.id == item.product_id)
                .map(|p| p.purchase_price().multiply_quantity(item.quantity))
        })
        .sum();
    sale.net_revenue() - cost
}

/// Builds the report for `period` as of `now`.
pub fn period_report(
    state: &StoreState,
    period: ReportPeriod,
    now: DateTime<FixedOffset>,
) -> PeriodReport {
    let offset = now.offset();
    let start = period_start(period, now.date_naive());
    let sales: Vec<&Sale> = state
        .sales
        .iter()
        .filter(|s| local(&s.timestamp, offset) >= start)
        .collect();

    let revenue_where = |method: PaymentMethod| -> Money {
        sales
            .iter()
            .filter(|s| s.payment_method == method)
            .map(|s| s.total())
            .sum()
    };

    let buckets = match period {
        ReportPeriod::Daily => Vec::new(),
        ReportPeriod::Monthly => {
            let mut by_day: BTreeMap<u32, Money> = BTreeMap::new();
            for sale in &sales {
                *by_day.entry(local(&sale.timestamp, offset).day()).or_default() += sale.total();
            }
            by_day
                .into_iter()
                .map(|(day, revenue)| RevenueBucket {
                    label: day.to_string(),
                    revenue,
                })
                .collect()
        }
        ReportPeriod::Yearly => {
            let mut by_month: BTreeMap<u32, Money> = BTreeMap::new();
            for sale in &sales {
                *by_month.entry(local(&sale.timestamp, offset).month0()).or_default() +=
                    sale.total();
            }
            by_month
                .into_iter()
                .map(|(month0, revenue)| RevenueBucket {
                    label: MONTH_LABELS[month0 as usize].to_string(),
                    revenue,
                })
                .collect()
        }
    };

    PeriodReport {
        period,
        revenue: sales.iter().map(|s| s.total()).sum(),
        profit: sales
            .iter()
            .map(|s| sale_profit(s, &state.products))
            .sum(),
        sale_count: sales.len(),
        cash_revenue: revenue_where(PaymentMethod::Cash),
        card_revenue: revenue_where(PaymentMethod::CreditCard),
        buckets,
    }
}

/// Dashboard cards and the revenue of the last seven local days.
pub fn dashboard(state: &StoreState, now: DateTime<FixedOffset>) -> DashboardSummary {
    let offset = now.offset();
    let today = now.date_naive();
    let today_start = today.and_time(NaiveTime::MIN);

    let todays: Vec<&Sale> = state
        .sales
        .iter()
        .filter(|s| local(&s.timestamp, offset) >= today_start)
        .collect();

    let last_seven_days = (0..7u64)
        .rev()
        .map(|back| {
            let date = today - Days::new(back);
            let revenue = state
                .sales
                .iter()
                .filter(|s| local(&s.timestamp, offset).date() == date)
                .map(|s| s.total())
                .sum();
            DailyRevenue { date, revenue }
        })
        .collect();

    DashboardSummary {
        today_revenue: todays.iter().map(|s| s.total()).sum(),
        today_units_sold: todays.iter().map(|s| s.units()).sum(),
        product_count: state.products.len(),
        low_stock_count: state.low_stock_products().len(),
        last_seven_days,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
