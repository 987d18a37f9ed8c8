//! Attribute markers attached by the parser.
//!
//! Markers arrive exactly as written (`@outer`, `@dim(...)`, ...). Turning a
//! marker list into a role is the classifier's job; this module only names
//! the marker kinds.

use crate::{Name, Span, Spanned, StringInterner};

/// Kind of an attribute marker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AttrKind {
    Kernel,
    Outer,
    Inner,
    Shared,
    Exclusive,
    /// Any other marker, resolved against the attribute registry.
    Custom(Name),
}

impl AttrKind {
    /// Map a marker name (without the `@`) to its kind.
    pub fn from_name(name: &str, interner: &StringInterner) -> Self {
        match name {
            "kernel" => AttrKind::Kernel,
            "outer" => AttrKind::Outer,
            "inner" => AttrKind::Inner,
            "shared" => AttrKind::Shared,
            "exclusive" => AttrKind::Exclusive,
            other => AttrKind::Custom(interner.intern(other)),
        }
    }

    /// Marker name without the `@`.
    pub fn name<'a>(&self, interner: &'a StringInterner) -> &'a str {
        match self {
            AttrKind::Kernel => "kernel",
            AttrKind::Outer => "outer",
            AttrKind::Inner => "inner",
            AttrKind::Shared => "shared",
            AttrKind::Exclusive => "exclusive",
            AttrKind::Custom(name) => interner.lookup(*name),
        }
    }
}

/// An attribute marker with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Attribute {
    pub kind: AttrKind,
    pub span: Span,
}

impl Attribute {
    pub fn new(kind: AttrKind, span: Span) -> Self {
        Attribute { kind, span }
    }
}

impl Spanned for Attribute {
    fn span(&self) -> Span {
        self.span
    }
}
