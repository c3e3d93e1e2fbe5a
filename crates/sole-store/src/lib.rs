//! # sole-store: Backup Layer for Sole POS
//!
//! File I/O for the store: JSON backups of the whole [`sole_core::StoreState`]
//! and the demo data used on first start.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sole POS Data Flow                               │
//! │                                                                         │
//! │  Back office command (export_backup / restore_backup)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sole-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    backup     │    │     demo      │    │    error     │  │   │
//! │  │   │ export / read │    │  seed store   │    │  StoreError  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/sole-pos/backups/kubilay_shoes_backup_....json         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sole_store::{backup, default_backup_dir};
//!
//! let dir = default_backup_dir()?;
//! let path = backup::export_to_dir(&state, &dir, chrono::Utc::now())?;
//! let restored = backup::read_backup(&path)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod demo;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::{default_backup_dir, parse_backup, read_backup};
pub use demo::demo_state;
pub use error::{StoreError, StoreResult};
