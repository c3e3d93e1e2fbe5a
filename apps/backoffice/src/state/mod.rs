//! # State Module
//!
//! Managed state for the back office.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │ LedgerState  │  │  CartState   │  │ SessionState │  │ AppConfig  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  currency  │  │
//! │  │  StoreState  │  │    Cart      │  │ Option<User> │  │  backups   │  │
//! │  │  >>          │  │  >>          │  │  >>          │  │  seeding   │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: one transition at a time, snapshots swapped whole      │
//! │  • CartState / SessionState: exclusive access through the Mutex        │
//! │  • AppConfig: read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the states it needs.

mod cart;
mod config;
mod ledger;
mod session;

pub use cart::{Cart, CartLine, CartState};
pub use config::{AppConfig, BackupConfig, CurrencyConfig, StoreBootConfig, CONFIG_PATH_VAR};
pub use ledger::LedgerState;
pub use session::{authenticate, SessionState};
