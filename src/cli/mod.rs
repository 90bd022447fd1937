//! CLI command handlers.
//!
//! Testable command handlers invoked by `main.rs`. Each returns the
//! process exit code instead of exiting.

mod compliance;

pub use compliance::run_compliance;
