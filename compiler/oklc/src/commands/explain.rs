//! The `explain` command: display documentation for an error code.

use okl_diagnostic::ErrorCode;

use super::{EXIT_OK, EXIT_USAGE};

/// Documentation for `code_str`, or why there is none.
pub fn explain_text(code_str: &str) -> Result<&'static str, String> {
    code_str.parse::<ErrorCode>().map(ErrorCode::docs).map_err(|_| {
        format!("unknown error code: {code_str}\n\nCodes have the format EXXXX, for example E3003.")
    })
}

/// Print the documentation for `code_str`.
pub fn explain_error(code_str: &str) -> i32 {
    match explain_text(code_str) {
        Ok(doc) => {
            println!("{doc}");
            EXIT_OK
        }
        Err(message) => {
            eprintln!("error: {message}");
            EXIT_USAGE
        }
    }
}
