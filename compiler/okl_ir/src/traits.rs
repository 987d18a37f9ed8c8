//! Accessor traits shared by AST nodes.

use super::Span;

/// A node with a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}
