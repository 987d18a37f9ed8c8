//! Top-level items.

use crate::{AttrKind, Attribute, Block, CType, Name, Span, Spanned};

/// A function definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    pub return_ty: CType,
    pub body: Block,
    pub attrs: Vec<Attribute>,
    pub span: Span,
}

impl Function {
    pub fn has_attr(&self, kind: AttrKind) -> bool {
        self.attrs.iter().any(|a| a.kind == kind)
    }

    /// Tagged `@kernel`.
    pub fn is_kernel(&self) -> bool {
        self.has_attr(AttrKind::Kernel)
    }
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span
    }
}

/// A function parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: CType,
    pub span: Span,
}

impl Spanned for Param {
    fn span(&self) -> Span {
        self.span
    }
}

/// A translation unit: the functions handed over by the parser, in source
/// order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(functions: Vec<Function>) -> Self {
        Module { functions }
    }

    /// Functions tagged `@kernel`, in source order.
    pub fn kernels(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| f.is_kernel())
    }
}
