//! Expressions.

use crate::visitor::{walk_expr, Visitor};
use crate::{AssignOp, BinaryOp, CType, Name, Span, Spanned, UnaryOp};

/// An expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Variable reference.
    Ident(Name),
    /// Integer literal.
    Int(i64),
    /// Floating literal, stored as raw bits so the tree stays `Eq`.
    Float(u64),
    /// Character literal.
    Char(char),
    /// String literal.
    Str(Name),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    /// `base.field` or `base->field`.
    Member {
        base: Box<Expr>,
        field: Name,
        arrow: bool,
    },
    Cast {
        ty: CType,
        expr: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// `a, b, c`
    Comma(Vec<Expr>),
    /// `sizeof(type)`
    SizeofType(CType),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The variable name if this is a bare identifier.
    pub fn as_ident(&self) -> Option<Name> {
        match self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Whether `name` is read or written anywhere in this expression.
    pub fn references(&self, name: Name) -> bool {
        self.first_reference(|n| n == name).is_some()
    }

    /// First identifier (in evaluation-agnostic, left-to-right order) for
    /// which `pred` holds, with its span.
    ///
    /// Member field names are not variable references and never match.
    pub fn first_reference(&self, pred: impl Fn(Name) -> bool) -> Option<(Name, Span)> {
        let mut finder = IdentFinder { pred, found: None };
        finder.visit_expr(self);
        finder.found
    }

    /// Whether the expression can be evaluated without knowing any of
    /// `excluded`.
    pub fn is_evaluable_without(&self, excluded: &[Name]) -> bool {
        self.first_reference(|n| excluded.contains(&n)).is_none()
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

struct IdentFinder<F> {
    pred: F,
    found: Option<(Name, Span)>,
}

impl<'ast, F: Fn(Name) -> bool> Visitor<'ast> for IdentFinder<F> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.found.is_none() {
            walk_expr(self, expr);
        }
    }

    fn visit_ident(&mut self, name: Name, span: Span) {
        if self.found.is_none() && (self.pred)(name) {
            self.found = Some((name, span));
        }
    }
}
