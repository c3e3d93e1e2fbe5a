//! # Sale Commands
//!
//! Checkout, receipts and the sales list.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  cart lines + discount + payment method + cashier role                  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  dispatch(RecordSale) ──► EmptyCart? ──► CART_ERROR, nothing changes    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  sale prepended, stock decremented, sale logs written                   │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  cart cleared ──► ReceiptResponse                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sole_core::types::{DiscountType, PaymentMethod, Sale, Section};
use sole_core::{Operation, SaleRequest, StoreState};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppConfig, CartState, LedgerState, SessionState};

/// Length of the sale id prefix printed on receipts.
const RECEIPT_ID_LEN: usize = 8;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub sale_id: String,
    /// First characters of the sale id, as printed
    pub receipt_number: String,
    pub store_name: String,
    pub store_phone: String,
    pub store_address: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub items: Vec<ReceiptItem>,
    pub subtotal_cents: i64,
    /// Percentage or fixed amount, shown next to the discount line
    pub discount_type: DiscountType,
    pub discount_cents: i64,
    pub vat_cents: i64,
    pub total_cents: i64,
    /// Total formatted with the configured currency
    pub total_display: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub product_id: String,
    /// Current product name, or a fallback when it was deleted
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// One row of the sales list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub sale_id: String,
    pub receipt_number: String,
    pub timestamp: String,
    pub units: i64,
    pub discount_type: DiscountType,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
}

fn receipt_number(sale_id: &str) -> String {
    sale_id.chars().take(RECEIPT_ID_LEN).collect()
}

fn build_receipt(sale: &Sale, state: &StoreState, config: &AppConfig) -> ReceiptResponse {
    ReceiptResponse {
        receipt_number: receipt_number(&sale.id),
        sale_id: sale.id.clone(),
        store_name: state.settings.store_name.clone(),
        store_phone: state.settings.phone.clone(),
        store_address: state.settings.address.clone(),
        timestamp: sale.timestamp.to_rfc3339(),
        items: sale
            .items
            .iter()
            .map(|i| ReceiptItem {
                product_id: i.product_id.clone(),
                name: state.product_name_or_fallback(&i.product_id).to_string(),
                quantity: i.quantity,
                unit_price_cents: i.unit_price_cents,
                line_total_cents: i.total_price_cents,
            })
            .collect(),
        subtotal_cents: sale.subtotal_cents,
        discount_type: sale.discount.kind(),
        discount_cents: sale.discount_cents,
        vat_cents: sale.vat_cents,
        total_cents: sale.total_cents,
        total_display: config.format_currency(sale.total_cents),
        payment_method: sale.payment_method,
    }
}

/// Records the cart as a sale and clears it.
///
/// The discount is priced for the cashier's role, so a staff member's
/// percentage above the cap is recorded at the cap.
pub fn checkout(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    config: &AppConfig,
    payment_method: PaymentMethod,
) -> ApiResult<ReceiptResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!(?payment_method, "checkout command");

    let (items, discount) = cart.with_cart(|c| (c.sale_items(), c.discount));
    let request = SaleRequest {
        items,
        payment_method,
        discount,
        acting_role: user.role,
    };

    let transition = ledger.dispatch(Operation::RecordSale(request))?;
    if !transition.skipped.is_empty() {
        warn!(skipped = ?transition.skipped, "Sale lines for deleted products did not change stock");
    }

    let sale_id = transition
        .sale_id
        .ok_or_else(|| ApiError::internal("Sale was not recorded"))?;
    let sale = transition
        .state
        .sale(&sale_id)
        .ok_or_else(|| ApiError::not_found("Sale", &sale_id))?;
    let receipt = build_receipt(sale, &transition.state, config);

    cart.with_cart_mut(|c| c.clear());

    info!(
        sale_id = %sale_id,
        cashier = %user.username,
        total = %receipt.total_display,
        "Checkout completed"
    );
    Ok(receipt)
}

/// Recorded sales, newest first.
pub fn list_sales(ledger: &LedgerState, session: &SessionState) -> ApiResult<Vec<SaleSummary>> {
    session.require_section(Section::Reports)?;
    debug!("list_sales command");

    Ok(ledger.with_state(|s| {
        s.sales
            .iter()
            .map(|sale| SaleSummary {
                sale_id: sale.id.clone(),
                receipt_number: receipt_number(&sale.id),
                timestamp: sale.timestamp.to_rfc3339(),
                units: sale.units(),
                discount_type: sale.discount.kind(),
                total_cents: sale.total_cents,
                payment_method: sale.payment_method,
            })
            .collect()
    }))
}

/// Receipt of a past sale, for reprinting.
pub fn get_receipt(
    ledger: &LedgerState,
    session: &SessionState,
    config: &AppConfig,
    sale_id: String,
) -> ApiResult<ReceiptResponse> {
    session.require_section(Section::Pos)?;
    debug!(sale_id = %sale_id, "get_receipt command");

    ledger.with_state(|s| {
        s.sale(&sale_id)
            .map(|sale| build_receipt(sale, s, config))
            .ok_or_else(|| ApiError::not_found("Sale", &sale_id))
    })
}
