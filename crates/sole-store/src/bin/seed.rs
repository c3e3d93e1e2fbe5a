//! # Demo Backup Generator
//!
//! Writes the demo store as a backup file that can be restored from the
//! settings screen.
//!
//! ## Usage
//! ```bash
//! # Write into the platform backup directory
//! cargo run -p sole-store --bin seed
//!
//! # Write to a specific file
//! cargo run -p sole-store --bin seed -- --out ./demo.json
//! ```

use std::env;
use std::path::PathBuf;

use chrono::Utc;
use sole_store::{backup, default_backup_dir, demo_state};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut out: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sole POS Demo Backup Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Backup file to write (default: platform backup dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let now = Utc::now();
    let state = demo_state(now);

    println!("🌱 Sole POS Demo Backup Generator");
    println!("=================================");
    println!("Store:     {}", state.settings.store_name);
    println!("Products:  {}", state.products.len());
    println!("Suppliers: {}", state.suppliers.len());
    println!("Sales:     {}", state.sales.len());
    println!();

    let path = match out {
        Some(path) => {
            backup::export_to_file(&state, &path)?;
            path
        }
        None => backup::export_to_dir(&state, &default_backup_dir()?, now)?,
    };

    // Read it back through the same checks a restore uses
    let restored = backup::read_backup(&path)?;
    println!("✓ Wrote {}", path.display());
    println!("✓ Verified {} products on re-read", restored.products.len());

    Ok(())
}
