//! AST Visitor Pattern
//!
//! Read-only traversal of the owned AST.
//!
//! # Design
//!
//! A single `Visitor` trait is provided. The visitor can mutate its own state
//! during traversal, but the AST remains immutable.
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add custom behavior at specific nodes, and
//! call the matching `walk_*` to continue into children.
//!
//! # Example
//!
//! ```text
//! struct CountLoops {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountLoops {
//!     fn visit_for(&mut self, for_loop: &'ast ForLoop) {
//!         self.count += 1;
//!         walk_for(self, for_loop);
//!     }
//! }
//! ```

use crate::{
    Attribute, Block, Declaration, Declarator, Expr, ExprKind, ForInit, ForLoop, Function, Module,
    Name, Span, Stmt, StmtKind,
};

// Visitor Trait

/// AST Visitor trait.
///
/// Note: The visitor can mutate its own state during traversal.
/// The AST itself remains immutable.
pub trait Visitor<'ast> {
    fn visit_module(&mut self, module: &'ast Module) {
        walk_module(self, module);
    }

    fn visit_function(&mut self, function: &'ast Function) {
        walk_function(self, function);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    /// Visit a `for` loop. Called from `walk_stmt` for `StmtKind::For`.
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        walk_for(self, for_loop);
    }

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_declarator(&mut self, declarator: &'ast Declarator) {
        walk_declarator(self, declarator);
    }

    /// Attribute markers are leaves.
    fn visit_attribute(&mut self, attr: &'ast Attribute) {
        let _ = attr;
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Visit a variable reference. Member field names are not reported.
    fn visit_ident(&mut self, name: Name, span: Span) {
        let _ = (name, span);
    }
}

// Walk Functions

pub fn walk_module<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, module: &'ast Module) {
    for function in &module.functions {
        visitor.visit_function(function);
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, function: &'ast Function) {
    for attr in &function.attrs {
        visitor.visit_attribute(attr);
    }
    visitor.visit_block(&function.body);
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Decl(decl) => visitor.visit_declaration(decl),
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        StmtKind::For(for_loop) => visitor.visit_for(for_loop),
        StmtKind::While { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(body);
        }
        StmtKind::DoWhile { body, cond } => {
            visitor.visit_stmt(body);
            visitor.visit_expr(cond);
        }
        StmtKind::Switch { scrutinee, body } => {
            visitor.visit_expr(scrutinee);
            visitor.visit_stmt(body);
        }
        StmtKind::CaseLabel(value) | StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Break | StmtKind::Continue | StmtKind::Empty => {}
    }
}

pub fn walk_for<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, for_loop: &'ast ForLoop) {
    for attr in &for_loop.attrs {
        visitor.visit_attribute(attr);
    }
    match &for_loop.init {
        Some(ForInit::Decl(decl)) => visitor.visit_declaration(decl),
        Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
        None => {}
    }
    if let Some(test) = &for_loop.test {
        visitor.visit_expr(test);
    }
    if let Some(update) = &for_loop.update {
        visitor.visit_expr(update);
    }
    visitor.visit_stmt(&for_loop.body);
}

pub fn walk_declaration<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast Declaration) {
    for attr in &decl.attrs {
        visitor.visit_attribute(attr);
    }
    for declarator in &decl.declarators {
        visitor.visit_declarator(declarator);
    }
}

pub fn walk_declarator<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    declarator: &'ast Declarator,
) {
    for dim in &declarator.dims {
        visitor.visit_expr(dim);
    }
    if let Some(init) = &declarator.init {
        visitor.visit_expr(init);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Ident(name) => visitor.visit_ident(*name, expr.span),
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Char(_)
        | ExprKind::Str(_)
        | ExprKind::SizeofType(_) => {}
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::Assign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Index { base, index } => {
            visitor.visit_expr(base);
            visitor.visit_expr(index);
        }
        ExprKind::Member { base, .. } => visitor.visit_expr(base),
        ExprKind::Cast { expr: inner, .. } => visitor.visit_expr(inner),
        ExprKind::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then_expr);
            visitor.visit_expr(else_expr);
        }
        ExprKind::Comma(exprs) => {
            for e in exprs {
                visitor.visit_expr(e);
            }
        }
    }
}

#[cfg(test)]
mod tests;
