//! OKL kernel validator driver.
//!
//! ```text
//! ast.json ──load──▶ okl_ir::Module ──okl_check──▶ CheckReport ──emitter──▶ diagnostics
//! ```
//!
//! The parser front-end serializes its AST as JSON ([`load::dto`]); this
//! crate lowers it, runs every kernel through the validator and prints the
//! result as terminal diagnostics or JSON.

pub mod commands;
pub mod load;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=okl_check=debug` or
/// `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .with(filter)
                .init();
        }
    });
}
