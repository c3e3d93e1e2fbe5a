//! # Sole Back Office Entry Point
//!
//! Runs a single back office command against a freshly started store.
//! All setup lives in `lib.rs` so the command layer can be tested
//! without a process.

fn main() {
    if let Err(e) = sole_backoffice::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
