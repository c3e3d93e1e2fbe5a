//! # Domain Types
//!
//! Core domain types used throughout Sole POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    StockLog     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  brand / model  │   │  items[]        │   │  product_id     │       │
//! │  │  size / color   │   │  discount       │   │  product_name   │       │
//! │  │  stock          │   │  total_cents    │   │  change (±)     │       │
//! │  │  supplier_id ───┼─┐ └─────────────────┘   │  reason         │       │
//! │  └─────────────────┘ │                       └─────────────────┘       │
//! │                      │ ┌─────────────────┐   ┌─────────────────┐       │
//! │                      └►│    Supplier     │   │  StoreSettings  │       │
//! │                        │  company_name   │   │  vat_rate_bps   │       │
//! │                        │  contact_person │   │  low_stock_...  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Rules
//! - `SaleItem.unit_price_cents` is frozen when the sale is recorded.
//! - `StockLog.product_name` is frozen when the log entry is written, so
//!   history stays readable after a product is deleted.
//! - `SaleItem` does NOT carry a name; receipt lookups fall back to
//!   [`UNKNOWN_PRODUCT_NAME`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};

/// Label shown for sale lines whose product has since been deleted.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown product";

// =============================================================================
// Product
// =============================================================================

/// A shoe model in a specific size and color.
///
/// Prices are VAT-exclusive, in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    /// EU shoe size (half sizes allowed).
    pub size: f32,
    pub purchase_price_cents: i64,
    pub selling_price_cents: i64,
    /// Units on hand. Not clamped at zero.
    pub stock: i64,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

impl Product {
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Stock at or below the threshold is flagged on the dashboard.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock <= threshold
    }

    /// Whether the product may show up in checkout search results.
    #[inline]
    pub fn is_sellable(&self) -> bool {
        self.stock > 0
    }

    /// "Nike Koşu Ayakkabısı - 42" style label used by the POS.
    pub fn display_label(&self) -> String {
        format!("{} {} - {}", self.brand, self.name, self.size)
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
///
/// Serialized adjacently tagged so the backup keeps the original
/// `type` / `value` pair:
/// ```json
/// { "type": "percentage", "value": 1000 }
/// { "type": "amount", "value": 5000 }
/// { "type": "none" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum Discount {
    #[default]
    None,
    /// Percentage of the subtotal, in basis points.
    Percentage(u32),
    /// Fixed amount off the subtotal, in minor units.
    Amount(i64),
}

impl Discount {
    /// The selector shown on receipts and in the sales list.
    pub fn kind(&self) -> DiscountType {
        match self {
            Discount::None => DiscountType::None,
            Discount::Percentage(_) => DiscountType::Percentage,
            Discount::Amount(_) => DiscountType::Amount,
        }
    }

    /// True when the discount cannot change the subtotal.
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Discount::None | Discount::Percentage(0) | Discount::Amount(0)
        )
    }
}

/// The discount selector without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountType {
    None,
    Percentage,
    Amount,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::CreditCard => write!(f, "Credit card"),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line item of a recorded sale. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    pub product_id: String,
    pub quantity: i64,
    /// Selling price at time of sale (frozen, VAT-exclusive).
    pub unit_price_cents: i64,
    /// `quantity × unit_price_cents`.
    pub total_price_cents: i64,
}

impl SaleItem {
    /// Builds a line with its total derived from quantity and price.
    pub fn new(product_id: impl Into<String>, quantity: i64, unit_price_cents: i64) -> Self {
        SaleItem {
            product_id: product_id.into(),
            quantity,
            unit_price_cents,
            total_price_cents: unit_price_cents * quantity,
        }
    }

    /// Line for one unit of `product` at its current selling price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SaleItem::new(product.id.clone(), quantity, product.selling_price_cents)
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// A recorded sale. Sales are append-only and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub items: Vec<SaleItem>,
    /// Sum of line totals, before discount, VAT-exclusive.
    pub subtotal_cents: i64,
    /// The discount as requested after policy clamping.
    pub discount: Discount,
    /// Discount actually taken off the subtotal.
    pub discount_cents: i64,
    pub vat_cents: i64,
    /// Payable amount: discounted subtotal plus VAT.
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn vat(&self) -> Money {
        Money::from_cents(self.vat_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Revenue excluding VAT (subtotal minus discount).
    #[inline]
    pub fn net_revenue(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    /// Total units across all lines.
    pub fn units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Stock Log
// =============================================================================

/// Why a stock level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockLogReason {
    Sale,
    StockIn,
    Correction,
}

/// Append-only audit entry of a signed stock delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockLog {
    pub id: String,
    pub product_id: String,
    /// Product name when the entry was written (frozen).
    pub product_name: String,
    pub change: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub reason: StockLogReason,
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store-wide settings. Singleton, replaced by merging a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreSettings {
    pub store_name: String,
    pub phone: String,
    pub address: String,
    /// VAT in basis points (2000 = 20%).
    pub vat_rate_bps: u32,
    pub low_stock_threshold: i64,
    /// Cap on percentage discounts given by staff, in basis points.
    pub max_staff_discount_bps: u32,
}

impl StoreSettings {
    #[inline]
    pub fn vat_rate(&self) -> Percent {
        Percent::from_bps(self.vat_rate_bps)
    }

    #[inline]
    pub fn max_staff_discount(&self) -> Percent {
        Percent::from_bps(self.max_staff_discount_bps)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "Sole Store".to_string(),
            phone: String::new(),
            address: String::new(),
            vat_rate_bps: 2000,
            low_stock_threshold: 5,
            max_staff_discount_bps: 2000,
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SettingsPatch {
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub vat_rate_bps: Option<u32>,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    #[serde(default)]
    pub max_staff_discount_bps: Option<u32>,
}

impl SettingsPatch {
    /// Shallow merge onto `settings`.
    pub fn merge_into(self, settings: &StoreSettings) -> StoreSettings {
        StoreSettings {
            store_name: self.store_name.unwrap_or_else(|| settings.store_name.clone()),
            phone: self.phone.unwrap_or_else(|| settings.phone.clone()),
            address: self.address.unwrap_or_else(|| settings.address.clone()),
            vat_rate_bps: self.vat_rate_bps.unwrap_or(settings.vat_rate_bps),
            low_stock_threshold: self
                .low_stock_threshold
                .unwrap_or(settings.low_stock_threshold),
            max_staff_discount_bps: self
                .max_staff_discount_bps
                .unwrap_or(settings.max_staff_discount_bps),
        }
    }
}

// =============================================================================
// Users & Roles
// =============================================================================

/// Who is operating the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Admin,
    Staff,
}

/// Back office screens, gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    Dashboard,
    Pos,
    Stock,
    Suppliers,
    Reports,
    Settings,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Pos,
        Section::Stock,
        Section::Suppliers,
        Section::Reports,
        Section::Settings,
    ];
}

impl Role {
    /// Suppliers and reports are admin-only; everything else is shared.
    pub fn can_access(&self, section: Section) -> bool {
        match self {
            Role::Admin => true,
            Role::Staff => !matches!(section, Section::Suppliers | Section::Reports),
        }
    }

    /// Sections shown in this role's navigation, in menu order.
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.can_access(*s))
            .collect()
    }
}

/// A signed-in user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(stock: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Sneaker".to_string(),
            brand: "Adidas".to_string(),
            model: "Superstar".to_string(),
            color: "White".to_string(),
            size: 41.0,
            purchase_price_cents: 60_000,
            selling_price_cents: 120_000,
            stock,
            barcode: None,
            supplier_id: None,
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(sample_product(5).is_low_stock(5));
        assert!(!sample_product(6).is_low_stock(5));
    }

    #[test]
    fn test_sale_item_total_is_derived() {
        let item = SaleItem::from_product(&sample_product(3), 2);
        assert_eq!(item.total_price_cents, 240_000);
        assert_eq!(item.unit_price().cents(), 120_000);
    }

    #[test]
    fn test_discount_serialization() {
        let json = serde_json::to_value(Discount::Percentage(1000)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "percentage", "value": 1000 }));

        let none: Discount = serde_json::from_value(serde_json::json!({ "type": "none" })).unwrap();
        assert_eq!(none, Discount::None);
        assert!(Discount::Amount(0).is_empty());
        assert_eq!(Discount::Amount(5).kind(), DiscountType::Amount);
    }

    #[test]
    fn test_settings_patch_merges_shallowly() {
        let settings = StoreSettings::default();
        let patch = SettingsPatch {
            vat_rate_bps: Some(1000),
            ..Default::default()
        };
        let merged = patch.merge_into(&settings);
        assert_eq!(merged.vat_rate_bps, 1000);
        assert_eq!(merged.store_name, settings.store_name);
        assert_eq!(merged.low_stock_threshold, settings.low_stock_threshold);
    }

    #[test]
    fn test_role_sections() {
        assert_eq!(Role::Admin.sections().len(), 6);
        assert!(!Role::Staff.can_access(Section::Reports));
        assert!(!Role::Staff.can_access(Section::Suppliers));
        assert!(Role::Staff.can_access(Section::Pos));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(sample_product(1)).unwrap();
        assert!(json.get("sellingPriceCents").is_some());
        assert!(json.get("supplierId").is_some());
    }
}
