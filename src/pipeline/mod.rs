//! Pipeline orchestration for compliance runs.
//!
//! Shared parse → score → report plumbing used by the CLI command handlers.

mod output;
mod parse;

pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_sbom_with_context, ParsedDocument};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every scored document met the minimum score (or none was set)
    pub const SUCCESS: i32 = 0;
    /// At least one document scored below `--min-score`
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
