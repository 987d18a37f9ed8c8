//! Programmatic AST construction.
//!
//! The validator never parses source; trees come from an external front-end.
//! `AstBuilder` builds the same trees directly, for tests and for callers
//! that synthesize kernels. Every node gets a fresh, distinct span so that
//! diagnostics can be matched back to the node that caused them.

use std::cell::Cell;

use crate::{
    AssignOp, AttrKind, Attribute, BaseType, BinaryOp, Block, CType, Declaration, Declarator, Expr,
    ExprKind, ForInit, ForLoop, Function, Module, Name, Param, Span, Stmt, StmtKind,
    StringInterner, UnaryOp,
};

/// Builder for AST nodes with synthetic, unique spans.
pub struct AstBuilder<'a> {
    interner: &'a StringInterner,
    next_offset: Cell<u32>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder {
            interner,
            next_offset: Cell::new(0),
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// A span that no other node built by this builder shares.
    pub fn fresh_span(&self) -> Span {
        let start = self.next_offset.get();
        self.next_offset.set(start + 2);
        Span::new(start, start + 1)
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    // Attributes

    pub fn attr(&self, kind: AttrKind) -> Attribute {
        Attribute::new(kind, self.fresh_span())
    }

    /// A marker looked up by name (`"dim"`, `"outer"`, ...).
    pub fn attr_named(&self, name: &str) -> Attribute {
        self.attr(AttrKind::from_name(name, self.interner))
    }

    // Expressions

    pub fn expr(&self, kind: ExprKind) -> Expr {
        Expr::new(kind, self.fresh_span())
    }

    pub fn ident(&self, name: &str) -> Expr {
        self.expr(ExprKind::Ident(self.name(name)))
    }

    pub fn int(&self, value: i64) -> Expr {
        self.expr(ExprKind::Int(value))
    }

    pub fn float(&self, value: f64) -> Expr {
        self.expr(ExprKind::Float(value.to_bits()))
    }

    pub fn binary(&self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        self.expr(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        self.expr(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn assign(&self, op: AssignOp, target: Expr, value: Expr) -> Expr {
        self.expr(ExprKind::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn index(&self, base: Expr, index: Expr) -> Expr {
        self.expr(ExprKind::Index {
            base: Box::new(base),
            index: Box::new(index),
        })
    }

    pub fn call(&self, callee: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call {
            callee: Box::new(self.ident(callee)),
            args,
        })
    }

    /// `var < bound`
    pub fn lt(&self, var: &str, bound: Expr) -> Expr {
        self.binary(BinaryOp::Lt, self.ident(var), bound)
    }

    /// `++var`
    pub fn pre_inc(&self, var: &str) -> Expr {
        self.unary(UnaryOp::PreInc, self.ident(var))
    }

    // Types and declarations

    pub fn declarator(&self, name: &str, dims: Vec<Expr>, init: Option<Expr>) -> Declarator {
        Declarator {
            name: self.name(name),
            dims,
            init,
            span: self.fresh_span(),
        }
    }

    pub fn declaration(
        &self,
        ty: CType,
        declarators: Vec<Declarator>,
        attrs: Vec<Attribute>,
    ) -> Declaration {
        Declaration {
            ty,
            declarators,
            attrs,
            span: self.fresh_span(),
        }
    }

    /// `ty name = init;`
    pub fn var(&self, ty: CType, name: &str, init: Option<Expr>) -> Stmt {
        let decl = self.declaration(ty, vec![self.declarator(name, Vec::new(), init)], Vec::new());
        self.stmt(StmtKind::Decl(decl))
    }

    /// `@shared float name[dims...];`
    pub fn shared(&self, name: &str, dims: Vec<Expr>) -> Stmt {
        let attrs = vec![self.attr(AttrKind::Shared)];
        let decl = self.declaration(
            CType::new(BaseType::Float),
            vec![self.declarator(name, dims, None)],
            attrs,
        );
        self.stmt(StmtKind::Decl(decl))
    }

    /// `@exclusive float name;`
    pub fn exclusive(&self, name: &str) -> Stmt {
        let attrs = vec![self.attr(AttrKind::Exclusive)];
        let decl = self.declaration(
            CType::new(BaseType::Float),
            vec![self.declarator(name, Vec::new(), None)],
            attrs,
        );
        self.stmt(StmtKind::Decl(decl))
    }

    // Statements

    pub fn stmt(&self, kind: StmtKind) -> Stmt {
        Stmt::new(kind, self.fresh_span())
    }

    pub fn expr_stmt(&self, expr: Expr) -> Stmt {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn block(&self, stmts: Vec<Stmt>) -> Stmt {
        self.stmt(StmtKind::Block(Block::new(stmts, self.fresh_span())))
    }

    pub fn break_stmt(&self) -> Stmt {
        self.stmt(StmtKind::Break)
    }

    pub fn continue_stmt(&self) -> Stmt {
        self.stmt(StmtKind::Continue)
    }

    pub fn return_stmt(&self, value: Option<Expr>) -> Stmt {
        self.stmt(StmtKind::Return(value))
    }

    pub fn if_stmt(&self, cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
        let then_branch = Box::new(self.block(then_branch));
        let else_branch = else_branch.map(|stmts| Box::new(self.block(stmts)));
        self.stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn while_loop(&self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        let body = Box::new(self.block(body));
        self.stmt(StmtKind::While { cond, body })
    }

    pub fn do_while(&self, body: Vec<Stmt>, cond: Expr) -> Stmt {
        let body = Box::new(self.block(body));
        self.stmt(StmtKind::DoWhile { body, cond })
    }

    pub fn switch_stmt(&self, scrutinee: Expr, body: Vec<Stmt>) -> Stmt {
        let body = Box::new(self.block(body));
        self.stmt(StmtKind::Switch { scrutinee, body })
    }

    pub fn case(&self, value: Option<Expr>) -> Stmt {
        self.stmt(StmtKind::CaseLabel(value))
    }

    /// A `for` loop with arbitrary header clauses.
    pub fn for_loop(
        &self,
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        attrs: Vec<Attribute>,
        body: Vec<Stmt>,
    ) -> Stmt {
        let for_loop = ForLoop {
            init,
            test,
            update,
            body: Box::new(self.block(body)),
            attrs,
            span: self.fresh_span(),
        };
        self.stmt(StmtKind::For(for_loop))
    }

    /// `int var = 0` as a `for` init clause.
    pub fn induction(&self, var: &str) -> ForInit {
        ForInit::Decl(self.declaration(
            CType::int(),
            vec![self.declarator(var, Vec::new(), Some(self.int(0)))],
            Vec::new(),
        ))
    }

    /// `for (int var = 0; var < bound; ++var) { body }` with the given markers.
    pub fn canonical_for(
        &self,
        var: &str,
        bound: Expr,
        attrs: Vec<Attribute>,
        body: Vec<Stmt>,
    ) -> Stmt {
        self.for_loop(
            Some(self.induction(var)),
            Some(self.lt(var, bound)),
            Some(self.pre_inc(var)),
            attrs,
            body,
        )
    }

    /// Canonical `@outer` loop with an integer bound.
    pub fn outer(&self, var: &str, bound: i64, body: Vec<Stmt>) -> Stmt {
        self.canonical_for(var, self.int(bound), vec![self.attr(AttrKind::Outer)], body)
    }

    /// Canonical `@inner` loop with an integer bound.
    pub fn inner(&self, var: &str, bound: i64, body: Vec<Stmt>) -> Stmt {
        self.canonical_for(var, self.int(bound), vec![self.attr(AttrKind::Inner)], body)
    }

    /// Canonical loop without markers.
    pub fn plain_for(&self, var: &str, bound: i64, body: Vec<Stmt>) -> Stmt {
        self.canonical_for(var, self.int(bound), Vec::new(), body)
    }

    // Items

    pub fn function(&self, name: &str, attrs: Vec<Attribute>, body: Vec<Stmt>) -> Function {
        Function {
            name: self.name(name),
            params: Vec::new(),
            return_ty: CType::new(BaseType::Void),
            body: Block::new(body, self.fresh_span()),
            attrs,
            span: self.fresh_span(),
        }
    }

    /// `@kernel void name() { body }`
    pub fn kernel(&self, name: &str, body: Vec<Stmt>) -> Function {
        self.function(name, vec![self.attr(AttrKind::Kernel)], body)
    }

    pub fn param(&self, ty: CType, name: &str) -> Param {
        Param {
            name: self.name(name),
            ty,
            span: self.fresh_span(),
        }
    }

    pub fn module(&self, functions: Vec<Function>) -> Module {
        Module::new(functions)
    }
}
