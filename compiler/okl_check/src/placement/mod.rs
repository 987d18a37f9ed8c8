//! `@shared` / `@exclusive` placement and `@shared` array bounds.
//!
//! A role declaration is valid only with an `@outer` ancestor and no `@inner`
//! ancestor. `@shared` dimensions must not read a loop-variant name: an
//! induction variable of any enclosing loop, or a local whose initializer or
//! a later assignment reads a loop-variant name. A local that shadows a
//! variant name hides it for the rest of its scope.

use okl_ir::{Block, Declaration, Expr, ExprKind, ForInit, ForLoop, Name, Span, Stmt, StmtKind};

use crate::attrs::{DeclRole, LoopRole};
use crate::context::{KernelContext, ProblemSink};
use crate::problem::KernelProblem;

#[tracing::instrument(level = "debug", skip_all, fields(kernel = cx.kernel_name()))]
pub(crate) fn check_placement(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    let mut checker = PlacementChecker {
        sink,
        scope: ScopePath::default(),
    };
    for param in &cx.kernel.params {
        checker.scope.bind(param.name, false);
    }
    checker.check_block(&cx.kernel.body);
}

/// One enclosing loop.
#[derive(Copy, Clone, Debug)]
struct LoopFrame {
    role: LoopRole,
    span: Span,
}

/// Enclosing loops and the variable bindings in scope at a point of the
/// traversal.
///
/// Both stacks are truncated back on scope exit, so a binding is visible
/// only where C would see it.
#[derive(Default, Debug)]
struct ScopePath {
    frames: Vec<LoopFrame>,
    /// `(name, loop-variant)`; the last entry for a name is the live one.
    bindings: Vec<(Name, bool)>,
}

impl ScopePath {
    fn has_outer(&self) -> bool {
        self.frames.iter().any(|f| f.role == LoopRole::Outer)
    }

    /// Nearest enclosing `@inner` loop.
    fn nearest_inner(&self) -> Option<Span> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.role == LoopRole::Inner)
            .map(|f| f.span)
    }

    fn bind(&mut self, name: Name, variant: bool) {
        self.bindings.push((name, variant));
    }

    /// Mark the live binding of `name` loop-variant. The mark outlives the
    /// current block when the binding was made further out.
    fn mark_variant(&mut self, name: Name) {
        match self.bindings.iter_mut().rev().find(|(n, _)| *n == name) {
            Some((_, variant)) => *variant = true,
            None => self.bind(name, true),
        }
    }

    fn is_variant(&self, name: Name) -> bool {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .is_some_and(|&(_, variant)| variant)
    }

    /// Names whose live binding is loop-variant.
    fn variant_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = Vec::new();
        for &(name, _) in self.bindings.iter().rev() {
            if !names.contains(&name) && self.is_variant(name) {
                names.push(name);
            }
        }
        names
    }

    /// First loop-variant identifier read by `expr`.
    fn first_variant_reference(&self, expr: &Expr) -> Option<(Name, Span)> {
        expr.first_reference(|n| self.is_variant(n))
    }

    fn mark(&self) -> (usize, usize) {
        (self.frames.len(), self.bindings.len())
    }

    fn reset(&mut self, (frames, bindings): (usize, usize)) {
        self.frames.truncate(frames);
        self.bindings.truncate(bindings);
    }
}

struct PlacementChecker<'a> {
    sink: &'a mut ProblemSink,
    scope: ScopePath,
}

impl PlacementChecker<'_> {
    fn check_block(&mut self, block: &Block) {
        let mark = self.scope.mark();
        for stmt in &block.stmts {
            if self.sink.is_done() {
                break;
            }
            self.check_stmt(stmt);
        }
        self.scope.reset(mark);
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Decl(decl) => self.check_declaration(decl),
            StmtKind::Block(block) => self.check_block(block),
            StmtKind::For(for_loop) => self.check_for(for_loop),
            StmtKind::While { body, .. } | StmtKind::DoWhile { body, .. } => {
                self.check_loop_body(LoopRole::None, stmt.span, &[], body);
            }
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.check_scoped(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_scoped(else_branch);
                }
            }
            StmtKind::Switch { body, .. } => self.check_scoped(body),
            StmtKind::Expr(expr) => self.track_assignment(expr),
            StmtKind::CaseLabel(_)
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Return(_)
            | StmtKind::Empty => {}
        }
    }

    /// A sub-statement that opens its own scope even when it is not a block.
    fn check_scoped(&mut self, stmt: &Stmt) {
        let mark = self.scope.mark();
        self.check_stmt(stmt);
        self.scope.reset(mark);
    }

    fn check_for(&mut self, for_loop: &ForLoop) {
        let mark = self.scope.mark();
        let mut induction = Vec::new();
        match &for_loop.init {
            Some(ForInit::Decl(decl)) => {
                self.check_declaration(decl);
                induction.extend(decl.declarators.iter().map(|d| d.name));
            }
            // `for (k = 0; ...)` iterates a pre-existing variable
            Some(ForInit::Expr(expr)) => {
                if let ExprKind::Assign { target, .. } = &expr.kind {
                    induction.extend(target.as_ident());
                }
            }
            None => {}
        }
        self.check_loop_body(
            LoopRole::of(for_loop),
            for_loop.span,
            &induction,
            &for_loop.body,
        );
        self.scope.reset(mark);
    }

    fn check_loop_body(&mut self, role: LoopRole, span: Span, induction: &[Name], body: &Stmt) {
        let mark = self.scope.mark();
        self.scope.frames.push(LoopFrame { role, span });
        for &name in induction {
            self.scope.bind(name, true);
        }
        self.check_stmt(body);
        self.scope.reset(mark);
    }

    fn check_declaration(&mut self, decl: &Declaration) {
        let role = DeclRole::of(decl);
        if role != DeclRole::None {
            self.check_role_placement(decl, role);
        }
        if role == DeclRole::Shared {
            self.check_shared_bounds(decl);
        }

        // Locals computed from loop-variant values are loop-variant too.
        for declarator in &decl.declarators {
            let derived = declarator
                .init
                .as_ref()
                .is_some_and(|init| self.scope.first_variant_reference(init).is_some());
            self.scope.bind(declarator.name, derived);
        }
    }

    /// `x = v`, `x += v` and comma chains of them make `x` loop-variant
    /// when `v` reads a loop-variant name.
    fn track_assignment(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Assign { target, value, .. } => {
                self.track_assignment(value);
                if let Some(name) = target.as_ident() {
                    if self.scope.first_variant_reference(value).is_some() {
                        self.scope.mark_variant(name);
                    }
                }
            }
            ExprKind::Comma(exprs) => {
                for expr in exprs {
                    self.track_assignment(expr);
                }
            }
            _ => {}
        }
    }

    fn check_role_placement(&mut self, decl: &Declaration, role: DeclRole) {
        let Some(name) = decl.declarators.first().map(|d| d.name) else {
            return;
        };
        let span = decl.span;
        let problem = match (self.scope.has_outer(), self.scope.nearest_inner(), role) {
            (false, _, DeclRole::Shared) => KernelProblem::SharedOutsideOuter { span, name },
            (false, _, DeclRole::Exclusive) => KernelProblem::ExclusiveOutsideOuter { span, name },
            (true, Some(inner_span), DeclRole::Shared) => KernelProblem::SharedInsideInner {
                span,
                name,
                inner_span,
            },
            (true, Some(inner_span), DeclRole::Exclusive) => KernelProblem::ExclusiveInsideInner {
                span,
                name,
                inner_span,
            },
            (true, None, _) | (_, _, DeclRole::None) => return,
        };
        self.sink.push(problem);
    }

    fn check_shared_bounds(&mut self, decl: &Declaration) {
        let variant = self.scope.variant_names();
        for declarator in &decl.declarators {
            for dim in &declarator.dims {
                if self.sink.is_done() {
                    return;
                }
                if dim.is_evaluable_without(&variant) {
                    continue;
                }
                if let Some((var, var_span)) = self.scope.first_variant_reference(dim) {
                    self.sink.push(KernelProblem::NonEvaluableSharedBound {
                        span: dim.span,
                        array: declarator.name,
                        var,
                        var_span,
                    });
                }
            }
        }
    }
}
