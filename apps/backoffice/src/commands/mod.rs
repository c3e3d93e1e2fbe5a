//! # Back Office Commands
//!
//! One function per user action. A UI shell (webview, TUI, or the
//! bundled CLI) calls these and renders the JSON-serializable result.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── auth.rs      ◄─── Login, logout, navigation
//! ├── product.rs   ◄─── Stock screen: product CRUD, low stock, history
//! ├── supplier.rs  ◄─── Supplier CRUD (admin)
//! ├── cart.rs      ◄─── POS search and cart manipulation
//! ├── sale.rs      ◄─── Checkout, receipts, sales list
//! ├── report.rs    ◄─── Dashboard and period reports
//! ├── settings.rs  ◄─── Store settings and app config
//! └── backup.rs    ◄─── JSON export / restore (admin)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  call('add_to_cart', { productId: '3' })                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Back Office                                                       │
//! │  ───────────────                                                        │
//! │  fn add_to_cart(                                                        │
//! │      ledger: &LedgerState,     ◄── Managed state, passed in            │
//! │      cart: &CartState,                                                  │
//! │      session: &SessionState,   ◄── Role checks happen first            │
//! │      product_id: String,       ◄── From call params                    │
//! │  ) -> ApiResult<CartResponse>                                           │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  UI receives: CartResponse or { code, message }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the ledger and session
//! fn list_products(ledger: &LedgerState, session: &SessionState, ...)
//!
//! // Needs cart, ledger and session to price the preview
//! fn get_cart(ledger: &LedgerState, cart: &CartState, session: &SessionState)
//! ```

pub mod auth;
pub mod backup;
pub mod cart;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;
pub mod supplier;
