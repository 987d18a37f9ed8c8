//! AST node types.
//!
//! The node set is closed: every statement and expression form the
//! validator can meet is a variant here, so each pass matches exhaustively
//! and a new node kind is a compile error in every pass that forgot it.
//!
//! Ownership is strictly parent-to-child. Ancestor information (which loops
//! enclose a node) is carried by the traversal, never stored on nodes.

mod attrs;
mod expr;
mod items;
mod operators;
mod stmt;
mod types;

pub use attrs::{AttrKind, Attribute};
pub use expr::{Expr, ExprKind};
pub use items::{Function, Module, Param};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Block, Declaration, Declarator, ForInit, ForLoop, Stmt, StmtKind};
pub use types::{BaseType, CType, INTEGER_TYPEDEFS};
