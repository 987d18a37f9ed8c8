//! Statements, declarations, and loops.

use crate::{Attribute, AttrKind, CType, Expr, Name, Span, Spanned};

/// A statement node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Expr(Expr),
    Decl(Declaration),
    Block(Block),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    For(ForLoop),
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    Switch {
        scrutinee: Expr,
        body: Box<Stmt>,
    },
    /// `case value:` or, with `None`, `default:`.
    CaseLabel(Option<Expr>),
    Break,
    Continue,
    Return(Option<Expr>),
    Empty,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// The loop if this is a `for` statement.
    pub fn as_for(&self) -> Option<&ForLoop> {
        match &self.kind {
            StmtKind::For(l) => Some(l),
            _ => None,
        }
    }

    /// Statements directly governed by this statement when it is used as a
    /// body: the contents of a block, or the statement itself.
    pub fn body_stmts(&self) -> &[Stmt] {
        match &self.kind {
            StmtKind::Block(block) => &block.stmts,
            _ => std::slice::from_ref(self),
        }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// `{ ... }`
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }
}

impl Spanned for Block {
    fn span(&self) -> Span {
        self.span
    }
}

/// Initializer clause of a `for` header.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ForInit {
    Decl(Declaration),
    Expr(Expr),
}

impl Spanned for ForInit {
    fn span(&self) -> Span {
        match self {
            ForInit::Decl(decl) => decl.span,
            ForInit::Expr(expr) => expr.span,
        }
    }
}

/// `for (init; test; update) body`
///
/// Every header clause is optional, as in C.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ForLoop {
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
    pub attrs: Vec<Attribute>,
    pub span: Span,
}

impl ForLoop {
    pub fn has_attr(&self, kind: AttrKind) -> bool {
        self.attrs.iter().any(|a| a.kind == kind)
    }

    /// Name of the single declared induction variable, if the init clause is
    /// a declaration with exactly one declarator.
    pub fn induction_var(&self) -> Option<Name> {
        match &self.init {
            Some(ForInit::Decl(decl)) => match decl.declarators.as_slice() {
                [only] => Some(only.name),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Spanned for ForLoop {
    fn span(&self) -> Span {
        self.span
    }
}

/// `type a, b[4] = ..., c;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Declaration {
    pub ty: CType,
    pub declarators: Vec<Declarator>,
    pub attrs: Vec<Attribute>,
    pub span: Span,
}

impl Declaration {
    pub fn has_attr(&self, kind: AttrKind) -> bool {
        self.attrs.iter().any(|a| a.kind == kind)
    }
}

impl Spanned for Declaration {
    fn span(&self) -> Span {
        self.span
    }
}

/// One declared name with its array dimensions and optional initializer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Declarator {
    pub name: Name,
    /// Array dimension expressions, outermost first.
    pub dims: Vec<Expr>,
    pub init: Option<Expr>,
    pub span: Span,
}

impl Spanned for Declarator {
    fn span(&self) -> Span {
        self.span
    }
}

