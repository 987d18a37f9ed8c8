//! OKL IR - AST model for kernel validation
//!
//! This crate contains the data structures the validator consumes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - AST nodes (Module, Function, Stmt, Expr, Declaration, ForLoop)
//! - Attribute markers as attached by the external parser
//! - A read-only `Visitor` for traversal
//! - `AstBuilder` for constructing trees without a parser
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: Strings → Name(u32), O(1) equality
//! - **Closed node sets**: every statement and expression kind is an enum
//!   variant, so traversals match exhaustively
//! - **Parent-to-child ownership**: no back pointers; ancestor queries are
//!   answered by the traversal context instead
//!
//! The tree is immutable once built. Nothing in the validator mutates it.

pub mod ast;
pub mod builder;
mod interner;
mod name;
mod span;
mod traits;
pub mod visitor;

pub use ast::{
    AssignOp, AttrKind, Attribute, BaseType, BinaryOp, Block, CType, Declaration, Declarator, Expr,
    ExprKind, ForInit, ForLoop, Function, Module, Param, Stmt, StmtKind, UnaryOp,
};
pub use builder::AstBuilder;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
pub use traits::Spanned;
