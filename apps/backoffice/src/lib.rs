//! # Sole Back Office Library
//!
//! The application layer of Sole POS: managed state, one command per user
//! action, and the startup sequence. A UI shell calls the commands; the
//! bundled `sole-backoffice` binary drives them from the terminal.
//!
//! ## Module Organization
//! ```text
//! sole_backoffice/
//! ├── lib.rs          ◄─── You are here (startup & CLI)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── The store snapshot and dispatch
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── session.rs  ◄─── Signed-in user and role checks
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── Login / logout
//! │   ├── product.rs  ◄─── Stock screen
//! │   ├── supplier.rs ◄─── Supplier directory
//! │   ├── cart.rs     ◄─── POS cart
//! │   ├── sale.rs     ◄─── Checkout and receipts
//! │   ├── report.rs   ◄─── Dashboard and reports
//! │   ├── settings.rs ◄─── Store settings
//! │   └── backup.rs   ◄─── Export / restore
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Managed State                                        │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ LedgerState  │ │  CartState   │ │ SessionState │ │  AppConfig   │  │
//! │  │              │ │              │ │              │ │              │  │
//! │  │ • StoreState │ │ • Cart lines │ │ • User, role │ │ • Currency   │  │
//! │  │ • dispatch() │ │ • Discount   │ │              │ │ • Backup dir │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  Each command takes only the state it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::env;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sole_core::reports::ReportPeriod;
use sole_core::StoreState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ApiResult};
use state::{AppConfig, CartState, LedgerState, SessionState};

/// All managed state of a running back office.
#[derive(Debug)]
pub struct BackOffice {
    pub ledger: LedgerState,
    pub cart: CartState,
    pub session: SessionState,
    pub config: AppConfig,
}

impl BackOffice {
    /// Builds the managed state from `config`, seeding the store as
    /// configured.
    pub fn new(config: AppConfig) -> Self {
        let store = initial_state(&config, Utc::now());
        Self::with_store(config, store)
    }

    /// Builds the managed state around an existing store.
    pub fn with_store(config: AppConfig, store: StoreState) -> Self {
        BackOffice {
            ledger: LedgerState::new(store),
            cart: CartState::new(),
            session: SessionState::new(),
            config,
        }
    }
}

/// The store to start with: the demo shop, or an empty store with
/// default settings.
pub fn initial_state(config: &AppConfig, now: DateTime<Utc>) -> StoreState {
    if config.store.seed_demo_data {
        sole_store::demo_state(now)
    } else {
        StoreState::default()
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sole=trace` - Show trace for sole crates only
/// - Default: INFO, DEBUG for sole crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sole=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Command Line
// =============================================================================

const USAGE: &str = "\
Sole POS Back Office

Usage: sole-backoffice [OPTIONS] <COMMAND> [ARGS]

Options:
  -c, --config <PATH>     Config file (default: platform config dir)
  -s, --store <PATH>      Start from this backup instead of the seeded store
  -u, --user <NAME>       Username to sign in with
  -p, --password <PASS>   Password
  -h, --help              Show this help message

Commands:
  dashboard               Today's figures and the last seven days
  report <PERIOD>         daily, monthly or yearly report (admin)
  products [QUERY]        Products matching name, brand or barcode
  low-stock               Products at or below the threshold
  sales                   Recorded sales, newest first (admin)
  settings                Store settings
  export [PATH]           Write a backup (admin)
  restore <PATH> --yes    Replace the store with a backup (admin)";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    username: Option<String>,
    password: Option<String>,
    confirmed: bool,
    help: bool,
    command: Vec<String>,
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--config" | "-c" => {
                cli.config = value.map(PathBuf::from);
                i += 1;
            }
            "--store" | "-s" => {
                cli.store = value.map(PathBuf::from);
                i += 1;
            }
            "--user" | "-u" => {
                cli.username = value;
                i += 1;
            }
            "--password" | "-p" => {
                cli.password = value;
                i += 1;
            }
            "--yes" | "-y" => cli.confirmed = true,
            "--help" | "-h" => cli.help = true,
            other => cli.command.push(other.to_string()),
        }
        i += 1;
    }
    cli
}

fn parse_period(value: Option<&str>) -> ApiResult<ReportPeriod> {
    match value {
        Some("daily") => Ok(ReportPeriod::Daily),
        Some("monthly") => Ok(ReportPeriod::Monthly),
        Some("yearly") => Ok(ReportPeriod::Yearly),
        _ => Err(ApiError::validation("Period must be daily, monthly or yearly")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one back office command from the process arguments.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Back Office Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → backoffice.toml → SOLE_* environment                   │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • LedgerState: demo store, empty store, or --store backup           │
/// │     • CartState, SessionState                                           │
/// │                                                                         │
/// │  4. Sign In & Run Command ────────────────────────────────────────────► │
/// │     • role checks happen inside each command                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args);

    if cli.help || cli.command.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();
    info!("Starting Sole POS back office");

    let config = AppConfig::load(cli.config.clone())?;
    let app = match &cli.store {
        Some(path) => BackOffice::with_store(config, sole_store::read_backup(path)?),
        None => BackOffice::new(config),
    };

    if let (Some(username), Some(password)) = (cli.username.clone(), cli.password.clone()) {
        commands::auth::login(&app.session, username, password)?;
    }

    let command = cli.command[0].as_str();
    let arg = cli.command.get(1).map(String::as_str);
    match command {
        "dashboard" => print_json(&commands::report::get_dashboard(&app.ledger, &app.session)?),
        "report" => {
            let period = parse_period(arg)?;
            print_json(&commands::report::get_report(&app.ledger, &app.session, period)?)
        }
        "products" => print_json(&commands::product::list_products(
            &app.ledger,
            &app.session,
            arg.map(str::to_string),
        )?),
        "low-stock" => print_json(&commands::product::low_stock_products(&app.ledger, &app.session)?),
        "sales" => print_json(&commands::sale::list_sales(&app.ledger, &app.session)?),
        "settings" => print_json(&commands::settings::get_settings(&app.ledger, &app.session)?),
        "export" => print_json(&commands::backup::export_backup(
            &app.ledger,
            &app.session,
            &app.config,
            arg.map(PathBuf::from),
        )?),
        "restore" => {
            let path = arg.ok_or_else(|| ApiError::validation("restore needs a backup path"))?;
            print_json(&commands::backup::restore_backup(
                &app.ledger,
                &app.cart,
                &app.session,
                PathBuf::from(path),
                cli.confirmed,
            )?)
        }
        other => {
            println!("{}", USAGE);
            Err(ApiError::validation(format!("Unknown command: {}", other)).into())
        }
    }
}
