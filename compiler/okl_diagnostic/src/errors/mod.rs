//! `oklc explain` pages.
//!
//! One markdown file per error code, compiled into the binary. The match in
//! [`ErrorCode::docs`] is exhaustive, so a new code does not build until its
//! page exists.

use crate::ErrorCode;

impl ErrorCode {
    /// Markdown page explaining the rule, with a rejected and a fixed kernel.
    pub fn docs(self) -> &'static str {
        match self {
            ErrorCode::E1001 => include_str!("E1001.md"),
            ErrorCode::E1002 => include_str!("E1002.md"),
            ErrorCode::E2001 => include_str!("E2001.md"),
            ErrorCode::E2002 => include_str!("E2002.md"),
            ErrorCode::E2003 => include_str!("E2003.md"),
            ErrorCode::E3001 => include_str!("E3001.md"),
            ErrorCode::E3002 => include_str!("E3002.md"),
            ErrorCode::E3003 => include_str!("E3003.md"),
            ErrorCode::E3004 => include_str!("E3004.md"),
            ErrorCode::E4001 => include_str!("E4001.md"),
            ErrorCode::E4002 => include_str!("E4002.md"),
            ErrorCode::E4003 => include_str!("E4003.md"),
            ErrorCode::E4004 => include_str!("E4004.md"),
            ErrorCode::E4005 => include_str!("E4005.md"),
            ErrorCode::E5001 => include_str!("E5001.md"),
            ErrorCode::E5002 => include_str!("E5002.md"),
            ErrorCode::E9001 => include_str!("E9001.md"),
        }
    }
}

#[cfg(test)]
mod tests;
