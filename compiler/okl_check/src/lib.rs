//! OKL kernel validation.
//!
//! Decides whether each `@kernel` function of a module is well formed
//! against the loop shape, nesting, declaration placement and control-flow
//! rules of the kernel language, and identifies the violated rule when it
//! is not.
//!
//! ```text
//! Module ─▶ attrs ─▶ loop_shape ─▶ nesting ─▶ placement ─▶ control_flow ─▶ KernelVerdict
//! ```

mod api;
mod attrs;
mod context;
mod control_flow;
mod loop_shape;
mod nesting;
mod placement;
mod problem;
mod registry;

pub use api::{
    check_kernel, check_kernels, kernels_pass, CheckConfig, CheckMode, CheckReport, KernelVerdict,
};
pub use attrs::{classify_declaration, classify_function, classify_loop, DeclRole, LoopRole};
pub use loop_shape::check_loop_shape;
pub use problem::{IncrementIssue, InductionIssue, KernelProblem, MissingRole, TestIssue};
pub use registry::{builtin_targets, AttrTarget, AttrTargets, AttributeRegistry};
