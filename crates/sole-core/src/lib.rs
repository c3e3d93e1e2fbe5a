//! # sole-core: Pure Business Logic for Sole POS
//!
//! This crate is the **heart** of Sole POS, the back office of a small shoe
//! shop. It holds the store ledger and everything computed from it, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sole POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Back Office (apps/backoffice)                │   │
//! │  │    login, stock, checkout, suppliers, reports, backup          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Operation                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sole-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │  pricing  │  │  reports  │  │ validation│  │   │
//! │  │   │ StoreState│  │ discount  │  │  revenue  │  │   rules   │  │   │
//! │  │   │  apply()  │  │   VAT     │  │  profit   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK (LedgerEnv) • PURE FUNCTIONS    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sole-store (Backup Layer)                    │   │
//! │  │              JSON export / import of StoreState                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, StockLog, Supplier, ...)
//! - [`money`] - Money and Percent with integer arithmetic
//! - [`error`] - Domain error types
//! - [`ledger`] - StoreState and the `apply` transition function
//! - [`pricing`] - Discount policy and the sale breakdown
//! - [`reports`] - Revenue, profit and dashboard figures
//! - [`search`] - Stock, checkout and supplier lookups
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use sole_core::{apply, Operation, SaleRequest, StoreState, SystemEnv};
//! use sole_core::types::{Discount, PaymentMethod, Product, Role, SaleItem};
//!
//! let mut env = SystemEnv;
//! let product = Product {
//!     id: "p1".into(),
//!     name: "Koşu Ayakkabısı".into(),
//!     brand: "Nike".into(),
//!     model: "Air Zoom".into(),
//!     color: "Siyah".into(),
//!     size: 42.0,
//!     purchase_price_cents: 5_000,
//!     selling_price_cents: 10_000,
//!     stock: 5,
//!     barcode: None,
//!     supplier_id: None,
//! };
//!
//! let state = apply(&StoreState::default(), Operation::AddProduct(product), &mut env)
//!     .unwrap()
//!     .state;
//! let sale = SaleRequest {
//!     items: vec![SaleItem::new("p1", 2, 10_000)],
//!     payment_method: PaymentMethod::Cash,
//!     discount: Discount::Percentage(1000),
//!     acting_role: Role::Admin,
//! };
//! let state = apply(&state, Operation::RecordSale(sale), &mut env).unwrap().state;
//!
//! // 200.00 − 10% = 180.00, plus 20% VAT = 216.00
//! assert_eq!(state.sales[0].total_cents, 21_600);
//! assert_eq!(state.products[0].stock, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod reports;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{apply, LedgerEnv, Operation, SaleRequest, StoreState, SystemEnv, Transition};
pub use money::{Money, Percent};
pub use pricing::SaleBreakdown;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single sale line.
///
/// Catches typos like 100 instead of 10 at the till.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest purchase or selling price, in minor units (10,000,000.00).
///
/// Keeps every line total and sale total well inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Highest amount any recorded sale can carry.
pub const MAX_SALE_CENTS: i64 = 2 * MAX_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS as i64;
