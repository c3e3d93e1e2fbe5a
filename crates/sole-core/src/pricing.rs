//! # Pricing
//!
//! The sale breakdown: subtotal → discount → VAT → total.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Breakdown                                     │
//! │                                                                         │
//! │  items ──► subtotal = Σ qty × unit price                                │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  discount policy (staff cap, 0..=100%, 0..=subtotal)                    │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  discounted = subtotal − discount                                       │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  vat = discounted × vat rate      total = discounted + vat              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same function backs the POS preview and the ledger's `RecordSale`,
//! so what the cashier sees is what gets recorded.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};
use crate::types::{Discount, Role, SaleItem, StoreSettings};

/// Financial breakdown of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleBreakdown {
    pub subtotal: Money,
    /// The discount after policy clamping.
    pub discount: Discount,
    pub discount_amount: Money,
    pub discounted_subtotal: Money,
    pub vat: Money,
    pub total: Money,
    /// True when the requested discount was reduced by the staff cap.
    pub capped_by_role: bool,
}

/// Applies the discount policy to a requested discount.
///
/// ## Rules
/// - Staff percentage discounts are capped at `max_staff_discount`.
/// - Percentages never exceed 100%.
/// - Negative fixed amounts count as no discount.
///
/// Returns the effective discount and whether the role cap kicked in.
pub fn effective_discount(
    requested: Discount,
    role: Role,
    settings: &StoreSettings,
) -> (Discount, bool) {
    match requested {
        Discount::None => (Discount::None, false),
        Discount::Percentage(bps) => {
            let requested = Percent::from_bps(bps).min(Percent::FULL);
            let cap = settings.max_staff_discount();
            if role == Role::Staff && requested > cap {
                return (Discount::Percentage(cap.bps()), true);
            }
            (Discount::Percentage(requested.bps()), false)
        }
        Discount::Amount(cents) => (Discount::Amount(cents.max(0)), false),
    }
}

/// Amount taken off `subtotal` by `discount`, never more than the
/// subtotal and never negative.
pub fn discount_amount(subtotal: Money, discount: Discount) -> Money {
    let raw = match discount {
        Discount::None => Money::zero(),
        Discount::Percentage(bps) => subtotal.percentage_of(Percent::from_bps(bps)),
        Discount::Amount(cents) => Money::from_cents(cents),
    };
    if subtotal.is_negative() {
        return Money::zero();
    }
    raw.clamp(Money::zero(), subtotal)
}

/// Sum of `quantity × unit price` over the lines.
pub fn subtotal(items: &[SaleItem]) -> Money {
    items
        .iter()
        .map(|i| i.unit_price().multiply_quantity(i.quantity))
        .sum()
}

/// Computes the breakdown for a cart as `role` would be charged.
///
/// ## Example
/// ```rust
/// use sole_core::pricing::compute_breakdown;
/// use sole_core::types::{Discount, Role, SaleItem, StoreSettings};
///
/// let items = vec![SaleItem::new("a", 2, 10_000)];
/// let settings = StoreSettings::default(); // 20% VAT
/// let b = compute_breakdown(&items, Discount::Percentage(1000), Role::Admin, &settings);
///
/// assert_eq!(b.subtotal.cents(), 20_000);
/// assert_eq!(b.discount_amount.cents(), 2_000);
/// assert_eq!(b.vat.cents(), 3_600);
/// assert_eq!(b.total.cents(), 21_600);
/// ```
pub fn compute_breakdown(
    items: &[SaleItem],
    requested: Discount,
    role: Role,
    settings: &StoreSettings,
) -> SaleBreakdown {
    let subtotal = subtotal(items);
    let (discount, capped_by_role) = effective_discount(requested, role, settings);
    let discount_amount = discount_amount(subtotal, discount);
    let discounted_subtotal = subtotal - discount_amount;
    let vat = discounted_subtotal.percentage_of(settings.vat_rate());

    SaleBreakdown {
        subtotal,
        discount,
        discount_amount,
        discounted_subtotal,
        vat,
        total: discounted_subtotal + vat,
        capped_by_role,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
