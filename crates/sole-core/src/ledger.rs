//! # Store Ledger
//!
//! The in-memory store state and its transition function.
//!
//! ## Transition Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      apply(state, operation)                            │
//! │                                                                         │
//! │   &StoreState ──┐                                                       │
//! │                 ├──► validate ──► build new snapshot ──► Transition     │
//! │   Operation  ───┘        │                                 │            │
//! │                          │ Err                             ├ state      │
//! │                          ▼                                 └ skipped    │
//! │                   CoreError (nothing changed)                           │
//! │                                                                         │
//! │   LedgerEnv supplies fresh ids and "now": the only side inputs.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants Maintained By Construction
//! - Every stock change writes exactly one [`StockLog`] with the matching
//!   signed delta, so per-product log sums track net stock movement.
//! - A recorded sale decrements stock by its item quantities in the same
//!   snapshot that contains the sale. Sales are prepended (newest first).
//! - The input snapshot is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::pricing::{self, SaleBreakdown};
use crate::types::{
    Discount, PaymentMethod, Product, Role, Sale, SaleItem, SettingsPatch, StockLog,
    StockLogReason, StoreSettings, Supplier, UNKNOWN_PRODUCT_NAME,
};
use crate::validation;

// =============================================================================
// Store State
// =============================================================================

/// The whole store: the unit of backup and restore.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreState {
    pub products: Vec<Product>,
    /// Most recent first.
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub stock_logs: Vec<StockLog>,
    pub settings: StoreSettings,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
}

impl StoreState {
    /// Empty store with the given settings.
    pub fn with_settings(settings: StoreSettings) -> Self {
        StoreState {
            settings,
            ..Default::default()
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Product name, or the fallback label for deleted products.
    pub fn product_name_or_fallback(&self, id: &str) -> &str {
        self.product(id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PRODUCT_NAME)
    }

    /// Number of products that reference the supplier.
    pub fn supplier_usage(&self, supplier_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.supplier_id.as_deref() == Some(supplier_id))
            .count()
    }

    pub fn supplier_in_use(&self, supplier_id: &str) -> bool {
        self.supplier_usage(supplier_id) > 0
    }

    /// Products with stock at or below the configured threshold.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        let threshold = self.settings.low_stock_threshold;
        self.products
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    /// Sum of logged stock changes for a product.
    pub fn logged_stock_change(&self, product_id: &str) -> i64 {
        self.stock_logs
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.change)
            .sum()
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Side inputs of a transition: fresh identifiers and the current time.
pub trait LedgerEnv {
    fn next_id(&mut self) -> String;
    fn now(&self) -> DateTime<Utc>;
}

/// Production environment: UUID v4 ids and the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl LedgerEnv for SystemEnv {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Everything that can change the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Operation {
    /// Append a product; logs its opening stock as stock-in.
    AddProduct(Product),
    /// Replace the product with the same id; logs a correction when the
    /// stock level changed.
    UpdateProduct(Product),
    /// Remove a product. History keeps referring to it.
    DeleteProduct(String),
    /// Checkout.
    RecordSale(SaleRequest),
    UpdateSettings(SettingsPatch),
    /// Replace everything. The payload is trusted; validate it first.
    RestoreState(Box<StoreState>),
    AddSupplier(Supplier),
    UpdateSupplier(Supplier),
    /// Remove a supplier without a reference check.
    DeleteSupplier(String),
}

impl Operation {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddProduct(_) => "add_product",
            Operation::UpdateProduct(_) => "update_product",
            Operation::DeleteProduct(_) => "delete_product",
            Operation::RecordSale(_) => "record_sale",
            Operation::UpdateSettings(_) => "update_settings",
            Operation::RestoreState(_) => "restore_state",
            Operation::AddSupplier(_) => "add_supplier",
            Operation::UpdateSupplier(_) => "update_supplier",
            Operation::DeleteSupplier(_) => "delete_supplier",
        }
    }
}

/// Payload of [`Operation::RecordSale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRequest {
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
    pub discount: Discount,
    /// Role of the cashier; staff percentage discounts are capped.
    pub acting_role: Role,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: StoreState,
    /// Product ids that a sale line could not decrement (deleted products).
    pub skipped: Vec<String>,
    /// Id of the sale created by `RecordSale`.
    pub sale_id: Option<String>,
}

impl Transition {
    fn of(state: StoreState) -> Self {
        Transition {
            state,
            skipped: Vec::new(),
            sale_id: None,
        }
    }
}

// =============================================================================
// Transition Function
// =============================================================================

/// Applies `op` to `state`, returning the next snapshot.
///
/// On error nothing is returned but the error; `state` is untouched.
pub fn apply(
    state: &StoreState,
    op: Operation,
    env: &mut impl LedgerEnv,
) -> CoreResult<Transition> {
    debug!(op = op.name(), "applying ledger operation");

    match op {
        Operation::AddProduct(product) => add_product(state, product, env),
        Operation::UpdateProduct(product) => update_product(state, product, env),
        Operation::DeleteProduct(id) => delete_product(state, &id),
        Operation::RecordSale(request) => record_sale(state, request, env),
        Operation::UpdateSettings(patch) => update_settings(state, patch),
        Operation::RestoreState(snapshot) => {
            info!(
                products = snapshot.products.len(),
                sales = snapshot.sales.len(),
                "store state restored"
            );
            Ok(Transition::of(*snapshot))
        }
        Operation::AddSupplier(supplier) => {
            let mut next = state.clone();
            info!(supplier_id = %supplier.id, "supplier added");
            next.suppliers.push(supplier);
            Ok(Transition::of(next))
        }
        Operation::UpdateSupplier(supplier) => {
            let idx = state
                .suppliers
                .iter()
                .position(|s| s.id == supplier.id)
                .ok_or_else(|| CoreError::SupplierNotFound(supplier.id.clone()))?;
            let mut next = state.clone();
            next.suppliers[idx] = supplier;
            Ok(Transition::of(next))
        }
        Operation::DeleteSupplier(id) => {
            if state.supplier(&id).is_none() {
                return Err(CoreError::SupplierNotFound(id));
            }
            let mut next = state.clone();
            next.suppliers.retain(|s| s.id != id);
            info!(supplier_id = %id, "supplier deleted");
            Ok(Transition::of(next))
        }
    }
}

fn stock_log(
    env: &mut impl LedgerEnv,
    product: &Product,
    change: i64,
    reason: StockLogReason,
    timestamp: DateTime<Utc>,
) -> StockLog {
    StockLog {
        id: env.next_id(),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        change,
        timestamp,
        reason,
    }
}

fn add_product(
    state: &StoreState,
    product: Product,
    env: &mut impl LedgerEnv,
) -> CoreResult<Transition> {
    let mut next = state.clone();
    let now = env.now();
    let log = stock_log(env, &product, product.stock, StockLogReason::StockIn, now);

    info!(product_id = %product.id, stock = product.stock, "product added");
    next.stock_logs.push(log);
    next.products.push(product);
    Ok(Transition::of(next))
}

fn update_product(
    state: &StoreState,
    product: Product,
    env: &mut impl LedgerEnv,
) -> CoreResult<Transition> {
    let idx = state
        .products
        .iter()
        .position(|p| p.id == product.id)
        .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

    let mut next = state.clone();
    let change = product.stock - state.products[idx].stock;
    if change != 0 {
        let now = env.now();
        let log = stock_log(env, &product, change, StockLogReason::Correction, now);
        next.stock_logs.push(log);
        info!(product_id = %product.id, change, "stock corrected");
    }
    next.products[idx] = product;
    Ok(Transition::of(next))
}

fn delete_product(state: &StoreState, id: &str) -> CoreResult<Transition> {
    if state.product(id).is_none() {
        return Err(CoreError::ProductNotFound(id.to_string()));
    }
    let mut next = state.clone();
    next.products.retain(|p| p.id != id);
    info!(product_id = %id, "product deleted");
    Ok(Transition::of(next))
}

fn record_sale(
    state: &StoreState,
    request: SaleRequest,
    env: &mut impl LedgerEnv,
) -> CoreResult<Transition> {
    if request.items.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    for item in &request.items {
        validation::validate_quantity(item.quantity)?;
        validation::validate_price_cents(item.unit_price_cents)?;
    }

    // Line totals are always quantity × frozen unit price.
    let items: Vec<SaleItem> = request
        .items
        .iter()
        .map(|i| SaleItem::new(i.product_id.clone(), i.quantity, i.unit_price_cents))
        .collect();

    let breakdown: SaleBreakdown = pricing::compute_breakdown(
        &items,
        request.discount,
        request.acting_role,
        &state.settings,
    );

    let now = env.now();
    let sale = Sale {
        id: env.next_id(),
        items,
        subtotal_cents: breakdown.subtotal.cents(),
        discount: breakdown.discount,
        discount_cents: breakdown.discount_amount.cents(),
        vat_cents: breakdown.vat.cents(),
        total_cents: breakdown.total.cents(),
        payment_method: request.payment_method,
        timestamp: now,
    };

    let mut next = state.clone();
    let mut skipped = Vec::new();
    for item in &sale.items {
        match next.products.iter_mut().find(|p| p.id == item.product_id) {
            Some(product) => {
                product.stock -= item.quantity;
                let log = stock_log(env, product, -item.quantity, StockLogReason::Sale, now);
                next.stock_logs.push(log);
            }
            None => skipped.push(item.product_id.clone()),
        }
    }

    info!(
        sale_id = %sale.id,
        total = %breakdown.total,
        items = sale.items.len(),
        skipped = skipped.len(),
        capped = breakdown.capped_by_role,
        "sale recorded"
    );

    let sale_id = sale.id.clone();
    next.sales.insert(0, sale);
    Ok(Transition {
        state: next,
        skipped,
        sale_id: Some(sale_id),
    })
}

fn update_settings(state: &StoreState, patch: SettingsPatch) -> CoreResult<Transition> {
    validation::validate_settings_patch(&patch)?;
    let mut next = state.clone();
    next.settings = patch.merge_into(&state.settings);
    info!(store = %next.settings.store_name, "settings updated");
    Ok(Transition::of(next))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Deterministic ids ("id-1", "id-2", ...) and a fixed clock.
    pub(crate) struct FixedEnv {
        counter: u32,
        now: DateTime<Utc>,
    }

    impl FixedEnv {
        pub(crate) fn new() -> Self {
            FixedEnv {
                counter: 0,
                now: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap(),
            }
        }
    }

    impl LedgerEnv for FixedEnv {
        fn next_id(&mut self) -> String {
            self.counter += 1;
            format!("id-{}", self.counter)
        }

        fn now(&self) -> DateTime<Utc> {
            self.now
        }
    }

    pub(crate) fn product(id: &str, stock: i64, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Shoe {}", id),
            brand: "Nike".to_string(),
            model: "Air Max".to_string(),
            color: "Black".to_string(),
            size: 42.0,
            purchase_price_cents: price_cents / 2,
            selling_price_cents: price_cents,
            stock,
            barcode: None,
            supplier_id: Some("sup1".to_string()),
        }
    }

    fn supplier(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            company_name: format!("Supplier {}", id),
            contact_person: "Ahmet".to_string(),
            phone: "0212 555 1122".to_string(),
            email: "ahmet@example.com".to_string(),
            address: "Istanbul".to_string(),
        }
    }

    fn sale_request(items: Vec<SaleItem>, discount: Discount, role: Role) -> Operation {
        Operation::RecordSale(SaleRequest {
            items,
            payment_method: PaymentMethod::Cash,
            discount,
            acting_role: role,
        })
    }

    fn store_with(products: Vec<Product>) -> StoreState {
        StoreState {
            products,
            ..StoreState::default()
        }
    }

    #[test]
    fn test_add_product_logs_stock_in() {
        let mut env = FixedEnv::new();
        let state = StoreState::default();
        let t = apply(&state, Operation::AddProduct(product("A", 7, 1000)), &mut env).unwrap();

        assert_eq!(t.state.products.len(), 1);
        assert_eq!(t.state.stock_logs.len(), 1);
        let log = &t.state.stock_logs[0];
        assert_eq!(log.change, 7);
        assert_eq!(log.reason, StockLogReason::StockIn);
        assert_eq!(log.product_name, "Shoe A");
        // Input snapshot untouched
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_update_product_logs_correction_only_when_stock_changes() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 10, 1000)]);

        let mut renamed = product("A", 10, 1200);
        renamed.name = "Renamed".to_string();
        let t = apply(&state, Operation::UpdateProduct(renamed), &mut env).unwrap();
        assert!(t.state.stock_logs.is_empty());
        assert_eq!(t.state.products[0].selling_price_cents, 1200);

        let t = apply(&t.state, Operation::UpdateProduct(product("A", 4, 1200)), &mut env).unwrap();
        assert_eq!(t.state.stock_logs.len(), 1);
        assert_eq!(t.state.stock_logs[0].change, -6);
        assert_eq!(t.state.stock_logs[0].reason, StockLogReason::Correction);
    }

    #[test]
    fn test_update_unknown_product_is_rejected() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 1, 1000)]);
        let err = apply(&state, Operation::UpdateProduct(product("B", 3, 1000)), &mut env)
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "B"));
    }

    #[test]
    fn test_delete_product_keeps_history() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let t = apply(
            &state,
            sale_request(vec![SaleItem::new("A", 1, 1000)], Discount::None, Role::Admin),
            &mut env,
        )
        .unwrap();
        let t = apply(&t.state, Operation::DeleteProduct("A".to_string()), &mut env).unwrap();

        assert!(t.state.products.is_empty());
        assert_eq!(t.state.sales.len(), 1);
        assert_eq!(t.state.stock_logs[0].product_name, "Shoe A");
        assert_eq!(t.state.product_name_or_fallback("A"), UNKNOWN_PRODUCT_NAME);
    }

    #[test]
    fn test_record_sale_reference_scenario() {
        let mut env = FixedEnv::new();
        let mut state = store_with(vec![product("A", 5, 10_000)]);
        state.settings.vat_rate_bps = 2000;

        let t = apply(
            &state,
            sale_request(vec![SaleItem::new("A", 2, 10_000)], Discount::Percentage(1000), Role::Admin),
            &mut env,
        )
        .unwrap();

        let sale = &t.state.sales[0];
        assert_eq!(sale.subtotal_cents, 20_000);
        assert_eq!(sale.discount_cents, 2_000);
        assert_eq!(sale.vat_cents, 3_600);
        assert_eq!(sale.total_cents, 21_600);
        assert_eq!(t.sale_id.as_deref(), Some(sale.id.as_str()));

        assert_eq!(t.state.products[0].stock, 3);
        assert_eq!(t.state.stock_logs.len(), 1);
        assert_eq!(t.state.stock_logs[0].change, -2);
        assert_eq!(t.state.stock_logs[0].reason, StockLogReason::Sale);
        assert_eq!(t.state.stock_logs[0].timestamp, sale.timestamp);
    }

    #[test]
    fn test_sales_are_prepended() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let first = apply(
            &state,
            sale_request(vec![SaleItem::new("A", 1, 1000)], Discount::None, Role::Admin),
            &mut env,
        )
        .unwrap();
        let second = apply(
            &first.state,
            sale_request(vec![SaleItem::new("A", 2, 1000)], Discount::None, Role::Admin),
            &mut env,
        )
        .unwrap();

        assert_eq!(second.state.sales.len(), 2);
        assert_eq!(second.state.sales[0].id, second.sale_id.unwrap());
        assert_eq!(second.state.products[0].stock, 2);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let err = apply(&state, sale_request(vec![], Discount::None, Role::Admin), &mut env)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let err = apply(
            &state,
            sale_request(vec![SaleItem::new("A", 0, 1000)], Discount::None, Role::Admin),
            &mut env,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_sale_of_missing_product_is_reported() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let t = apply(
            &state,
            sale_request(
                vec![SaleItem::new("A", 1, 1000), SaleItem::new("gone", 2, 500)],
                Discount::None,
                Role::Admin,
            ),
            &mut env,
        )
        .unwrap();

        assert_eq!(t.skipped, vec!["gone".to_string()]);
        assert_eq!(t.state.stock_logs.len(), 1);
        assert_eq!(t.state.sales[0].subtotal_cents, 2000);
    }

    #[test]
    fn test_staff_discount_is_capped_in_ledger() {
        let mut env = FixedEnv::new();
        let mut state = store_with(vec![product("A", 5, 10_000)]);
        state.settings.max_staff_discount_bps = 1500;

        let t = apply(
            &state,
            sale_request(vec![SaleItem::new("A", 1, 10_000)], Discount::Percentage(4000), Role::Staff),
            &mut env,
        )
        .unwrap();
        assert_eq!(t.state.sales[0].discount, Discount::Percentage(1500));
        assert_eq!(t.state.sales[0].discount_cents, 1_500);
    }

    #[test]
    fn test_line_totals_are_recomputed() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 5, 1000)]);
        let mut item = SaleItem::new("A", 2, 1000);
        item.total_price_cents = 1;
        let t = apply(&state, sale_request(vec![item], Discount::None, Role::Admin), &mut env)
            .unwrap();
        assert_eq!(t.state.sales[0].items[0].total_price_cents, 2000);
    }

    #[test]
    fn test_stock_logs_track_net_change() {
        let mut env = FixedEnv::new();
        let state = StoreState::default();
        let t = apply(&state, Operation::AddProduct(product("A", 10, 1000)), &mut env).unwrap();
        let t = apply(&t.state, Operation::UpdateProduct(product("A", 12, 1000)), &mut env).unwrap();
        let t = apply(
            &t.state,
            sale_request(vec![SaleItem::new("A", 3, 1000)], Discount::None, Role::Admin),
            &mut env,
        )
        .unwrap();

        assert_eq!(t.state.products[0].stock, 9);
        assert_eq!(t.state.logged_stock_change("A"), 9);
    }

    #[test]
    fn test_update_settings_merges() {
        let mut env = FixedEnv::new();
        let state = StoreState::default();
        let patch = SettingsPatch {
            store_name: Some("Kubilay Shoes".to_string()),
            ..Default::default()
        };
        let t = apply(&state, Operation::UpdateSettings(patch), &mut env).unwrap();
        assert_eq!(t.state.settings.store_name, "Kubilay Shoes");
        assert_eq!(t.state.settings.vat_rate_bps, state.settings.vat_rate_bps);
    }

    #[test]
    fn test_invalid_settings_patch_is_rejected() {
        let mut env = FixedEnv::new();
        let patch = SettingsPatch {
            vat_rate_bps: Some(20_000),
            ..Default::default()
        };
        assert!(apply(&StoreState::default(), Operation::UpdateSettings(patch), &mut env).is_err());
    }

    #[test]
    fn test_supplier_lifecycle() {
        let mut env = FixedEnv::new();
        let state = StoreState::default();
        let t = apply(&state, Operation::AddSupplier(supplier("sup1")), &mut env).unwrap();

        let mut updated = supplier("sup1");
        updated.phone = "0216 444 3344".to_string();
        let t = apply(&t.state, Operation::UpdateSupplier(updated), &mut env).unwrap();
        assert_eq!(t.state.suppliers[0].phone, "0216 444 3344");

        let t = apply(&t.state, Operation::DeleteSupplier("sup1".to_string()), &mut env).unwrap();
        assert!(t.state.suppliers.is_empty());

        let err = apply(&t.state, Operation::DeleteSupplier("sup1".to_string()), &mut env)
            .unwrap_err();
        assert!(matches!(err, CoreError::SupplierNotFound(_)));
    }

    #[test]
    fn test_ledger_does_not_check_supplier_references() {
        let mut env = FixedEnv::new();
        let mut state = store_with(vec![product("A", 1, 1000)]);
        state.suppliers.push(supplier("sup1"));
        assert!(state.supplier_in_use("sup1"));

        let t = apply(&state, Operation::DeleteSupplier("sup1".to_string()), &mut env).unwrap();
        assert!(t.state.suppliers.is_empty());
        assert_eq!(t.state.products[0].supplier_id.as_deref(), Some("sup1"));
    }

    #[test]
    fn test_restore_replaces_everything() {
        let mut env = FixedEnv::new();
        let state = store_with(vec![product("A", 1, 1000)]);
        let snapshot = store_with(vec![product("B", 2, 2000), product("C", 3, 3000)]);
        let t = apply(&state, Operation::RestoreState(Box::new(snapshot.clone())), &mut env)
            .unwrap();
        assert_eq!(t.state, snapshot);
    }

    #[test]
    fn test_low_stock_products() {
        let mut state = store_with(vec![product("A", 5, 1000), product("B", 6, 1000)]);
        state.settings.low_stock_threshold = 5;
        let low: Vec<&str> = state.low_stock_products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["A"]);
    }
}
