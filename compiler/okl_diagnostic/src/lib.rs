//! Diagnostic system for kernel validation errors.
//!
//! Every rejected kernel is reported as a [`Diagnostic`] carrying:
//! - An error code for searchability (`oklc explain E3003`)
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//! - Context labels (the enclosing loop or kernel involved)
//! - Suggestions (how to fix)

mod diagnostic;
pub mod emitter;
mod error_code;
mod errors;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
