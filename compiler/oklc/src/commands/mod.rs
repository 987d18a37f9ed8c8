//! Command handlers for the `oklc` CLI.
//!
//! Handlers return the process exit status instead of exiting, so the binary
//! stays a thin argument dispatcher and tests can drive the handlers
//! directly.

mod check;
mod explain;

pub use check::{check_file, parse_check_options, run_check, CheckOptions, OutputFormat};
pub use explain::{explain_error, explain_text};

/// Every kernel passed.
pub const EXIT_OK: i32 = 0;
/// At least one kernel was rejected.
pub const EXIT_REJECTED: i32 = 1;
/// Bad arguments, unreadable input, or an unknown error code.
pub const EXIT_USAGE: i32 = 2;
