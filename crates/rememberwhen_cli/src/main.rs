//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rememberwhen_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("rememberwhen_core ping={}", rememberwhen_core::ping());
    println!(
        "rememberwhen_core version={}",
        rememberwhen_core::core_version()
    );
}
