//! # Cart Commands
//!
//! POS screen: product lookup and cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Discount │────►│ Recorded │       │
//! │  │  Cart    │     │          │     │ + Payment│     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout                            │
//! │                   change_quantity   (sale.rs)                           │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries a breakdown priced with the same rule the
//! ledger uses at checkout, for the signed-in role.

use serde::Serialize;
use sole_core::pricing::{compute_breakdown, SaleBreakdown};
use sole_core::search::search_checkout;
use sole_core::types::{Discount, Product, Role, Section};
use sole_core::validation::{validate_percent_bps, validate_price_cents};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{Cart, CartLine, CartState, LedgerState, SessionState};

/// Cart response including lines and the priced breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub item_count: i64,
    /// What the cashier asked for; `breakdown.discount` is what applies
    pub requested_discount: Discount,
    pub breakdown: SaleBreakdown,
}

impl CartResponse {
    fn price(cart: &Cart, role: Role, ledger: &LedgerState) -> Self {
        let items = cart.sale_items();
        let breakdown =
            ledger.with_state(|s| compute_breakdown(&items, cart.discount, role, &s.settings));
        CartResponse {
            lines: cart.lines.clone(),
            item_count: cart.total_quantity(),
            requested_discount: cart.discount,
            breakdown,
        }
    }
}

/// A checkout search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHit {
    pub id: String,
    pub label: String,
    pub barcode: Option<String>,
    pub selling_price_cents: i64,
    pub stock: i64,
}

impl From<&Product> for CheckoutHit {
    fn from(p: &Product) -> Self {
        CheckoutHit {
            id: p.id.clone(),
            label: p.display_label(),
            barcode: p.barcode.clone(),
            selling_price_cents: p.selling_price_cents,
            stock: p.stock,
        }
    }
}

fn current_product(ledger: &LedgerState, product_id: &str) -> ApiResult<Product> {
    ledger
        .with_state(|s| s.product(product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

/// Gets the current cart contents.
pub fn get_cart(ledger: &LedgerState, cart: &CartState, session: &SessionState) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!("get_cart command");
    Ok(cart.with_cart(|c| CartResponse::price(c, user.role, ledger)))
}

/// In-stock products matching name, brand or barcode, at most five.
pub fn search_checkout_products(
    ledger: &LedgerState,
    session: &SessionState,
    query: String,
) -> ApiResult<Vec<CheckoutHit>> {
    session.require_section(Section::Pos)?;
    debug!(query = %query, "search_checkout_products command");

    Ok(ledger.with_state(|s| {
        search_checkout(&s.products, &query)
            .into_iter()
            .map(CheckoutHit::from)
            .collect()
    }))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity + 1, refused at the stock level
/// - Not in cart: new line at the current selling price
pub fn add_to_cart(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    product_id: String,
) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!(product_id = %product_id, "add_to_cart command");

    let product = current_product(ledger, &product_id)?;
    cart.with_cart_mut(|c| {
        c.add_product(&product)?;
        Ok::<CartResponse, String>(CartResponse::price(c, user.role, ledger))
    })
    .map_err(ApiError::cart)
}

/// Moves a line's quantity by `delta` (usually ±1).
///
/// Changes that would leave `1..=stock` are ignored, not refused.
pub fn change_quantity(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    product_id: String,
    delta: i64,
) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!(product_id = %product_id, delta, "change_quantity command");

    let stock = current_product(ledger, &product_id)?.stock;
    cart.with_cart_mut(|c| {
        c.change_quantity(&product_id, delta, stock)?;
        Ok::<CartResponse, String>(CartResponse::price(c, user.role, ledger))
    })
    .map_err(ApiError::cart)
}

pub fn remove_from_cart(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    product_id: String,
) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove(&product_id)?;
        Ok::<CartResponse, String>(CartResponse::price(c, user.role, ledger))
    })
    .map_err(ApiError::cart)
}

/// Empties the cart and resets the discount.
pub fn clear_cart(ledger: &LedgerState, cart: &CartState, session: &SessionState) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!("clear_cart command");

    Ok(cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::price(c, user.role, ledger)
    }))
}

/// Sets the requested discount.
///
/// A staff percentage above the cap is accepted here; the breakdown shows
/// the capped value and `cappedByRole`.
pub fn set_discount(
    ledger: &LedgerState,
    cart: &CartState,
    session: &SessionState,
    discount: Discount,
) -> ApiResult<CartResponse> {
    let user = session.require_section(Section::Pos)?;
    debug!(?discount, "set_discount command");

    match discount {
        Discount::None => {}
        Discount::Percentage(bps) => validate_percent_bps("discount", bps)?,
        Discount::Amount(cents) => validate_price_cents(cents)?,
    }

    Ok(cart.with_cart_mut(|c| {
        c.set_discount(discount);
        CartResponse::price(c, user.role, ledger)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_prices_with_vat() {
        let f = testing::staff();
        add_to_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();
        let response = add_to_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();

        assert_eq!(response.item_count, 2);
        assert_eq!(response.breakdown.subtotal.cents(), 300_000);
        assert_eq!(response.breakdown.vat.cents(), 60_000);
        assert_eq!(response.breakdown.total.cents(), 360_000);
    }

    #[test]
    fn test_staff_discount_is_capped_in_preview() {
        let f = testing::staff();
        add_to_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();
        let response =
            set_discount(&f.ledger, &f.cart, &f.session, Discount::Percentage(5000)).unwrap();

        assert_eq!(response.requested_discount, Discount::Percentage(5000));
        assert_eq!(response.breakdown.discount, Discount::Percentage(2000));
        assert!(response.breakdown.capped_by_role);
        assert_eq!(response.breakdown.discount_amount.cents(), 30_000);
    }

    #[test]
    fn test_admin_discount_is_not_capped() {
        let f = testing::admin();
        add_to_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();
        let response =
            set_discount(&f.ledger, &f.cart, &f.session, Discount::Percentage(5000)).unwrap();
        assert!(!response.breakdown.capped_by_role);
        assert_eq!(response.breakdown.discount_amount.cents(), 75_000);
    }

    #[test]
    fn test_invalid_discount_is_refused() {
        let f = testing::admin();
        let err = set_discount(&f.ledger, &f.cart, &f.session, Discount::Percentage(12_000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = set_discount(&f.ledger, &f.cart, &f.session, Discount::Amount(-1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_quantity_never_exceeds_stock() {
        let f = testing::admin();
        // product 4 has 3 in stock
        add_to_cart(&f.ledger, &f.cart, &f.session, "4".to_string()).unwrap();
        change_quantity(&f.ledger, &f.cart, &f.session, "4".to_string(), 2).unwrap();
        let response = change_quantity(&f.ledger, &f.cart, &f.session, "4".to_string(), 1).unwrap();
        assert_eq!(response.item_count, 3);

        let err = add_to_cart(&f.ledger, &f.cart, &f.session, "4".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_unknown_product() {
        let f = testing::admin();
        let err = add_to_cart(&f.ledger, &f.cart, &f.session, "99".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_and_clear() {
        let f = testing::admin();
        add_to_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();
        add_to_cart(&f.ledger, &f.cart, &f.session, "2".to_string()).unwrap();

        let response = remove_from_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap();
        assert_eq!(response.lines.len(), 1);
        let err = remove_from_cart(&f.ledger, &f.cart, &f.session, "1".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let response = clear_cart(&f.ledger, &f.cart, &f.session).unwrap();
        assert!(response.lines.is_empty());
        assert_eq!(response.breakdown.total.cents(), 0);
    }

    #[test]
    fn test_checkout_search_by_barcode() {
        let f = testing::staff();
        let hits = search_checkout_products(&f.ledger, &f.session, "8691234567892".to_string()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
        assert_eq!(hits[0].label, "Caterpillar Bot - 43");

        assert!(search_checkout_products(&f.ledger, &f.session, "  ".to_string())
            .unwrap()
            .is_empty());
    }
}
