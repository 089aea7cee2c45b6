//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pinnote_core` linkage and the
//!   storage bootstrap, independently from any UI host.
//! - Keep output deterministic for quick local sanity checks.

use pinnote_core::db::open_db_in_memory;

fn main() {
    println!("pinnote_core ping={}", pinnote_core::ping());
    println!("pinnote_core version={}", pinnote_core::core_version());

    match open_db_in_memory() {
        Ok(_) => println!("pinnote_core storage_probe=ok"),
        Err(err) => {
            eprintln!("pinnote_core storage_probe=error {err}");
            std::process::exit(1);
        }
    }
}
