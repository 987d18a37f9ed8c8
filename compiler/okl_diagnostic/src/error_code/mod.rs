//! Error codes for all validator diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E3001`) with the first digit
//! indicating the validation stage. Used for `explain` lookups and
//! documentation.

use std::fmt;

/// Error codes for all validator diagnostics.
///
/// Format: E#### where first digit indicates stage:
/// - E1xxx: Attribute classification
/// - E2xxx: Loop shape
/// - E3xxx: Outer/inner nesting
/// - E4xxx: Shared/exclusive placement
/// - E5xxx: Control flow
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Attribute Errors (E1xxx)
    /// Attribute not accepted on this kind of node
    E1001,
    /// More than one role attribute on one node
    E1002,

    // Loop Shape Errors (E2xxx)
    /// Loop does not declare exactly one integral induction variable
    E2001,
    /// Loop test is not `iv <op> bound` with a relational operator
    E2002,
    /// Loop update is not an additive step of the induction variable
    E2003,

    // Nesting Errors (E3xxx)
    /// `@outer` loop below an `@inner` loop
    E3001,
    /// Kernel without an `@outer` or without an `@inner` loop
    E3002,
    /// Sibling `@inner` loops with different nesting depth
    E3003,
    /// `@inner` loop outside any `@outer` loop
    E3004,

    // Placement Errors (E4xxx)
    /// `@shared` declaration outside any `@outer` loop
    E4001,
    /// `@shared` declaration inside an `@inner` loop
    E4002,
    /// `@exclusive` declaration outside any `@outer` loop
    E4003,
    /// `@exclusive` declaration inside an `@inner` loop
    E4004,
    /// `@shared` array dimension depends on a loop variable
    E4005,

    // Control Flow Errors (E5xxx)
    /// `break` directly inside an `@outer`/`@inner` loop
    E5001,
    /// `continue` directly inside an `@outer`/`@inner` loop
    E5002,

    // Internal Errors (E9xxx)
    /// Internal validator error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    /// The `test_all_variants_classified` test catches any omission.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is an attribute classification error (E1xxx range).
    pub fn is_attribute_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }

    /// Check if this is a loop shape error (E2xxx range).
    pub fn is_loop_shape_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this is a nesting error (E3xxx range).
    pub fn is_nesting_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003 | ErrorCode::E3004
        )
    }

    /// Check if this is a declaration placement error (E4xxx range).
    pub fn is_placement_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E4001
                | ErrorCode::E4002
                | ErrorCode::E4003
                | ErrorCode::E4004
                | ErrorCode::E4005
        )
    }

    /// Check if this is a control flow error (E5xxx range).
    pub fn is_control_flow_error(&self) -> bool {
        matches!(self, ErrorCode::E5001 | ErrorCode::E5002)
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E3001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`],
/// so it is automatically exhaustive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
