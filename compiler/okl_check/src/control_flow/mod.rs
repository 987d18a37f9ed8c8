//! `break` / `continue` legality.
//!
//! Outer and inner loops are unrolled into the launch grid, so jumping out of
//! one (or skipping to its next iteration) has no meaning. Jumps that target a
//! plain loop or a `switch` are left alone.

use okl_ir::{Block, Span, Stmt, StmtKind};

use crate::attrs::LoopRole;
use crate::context::{KernelContext, ProblemSink};
use crate::problem::KernelProblem;

#[tracing::instrument(level = "debug", skip_all, fields(kernel = cx.kernel_name()))]
pub(crate) fn check_control_flow(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    let mut checker = JumpChecker {
        sink,
        targets: Vec::new(),
    };
    checker.check_block(&cx.kernel.body);
}

/// Statements a jump can bind to.
#[derive(Copy, Clone, Debug)]
enum JumpTarget {
    Loop { role: LoopRole, span: Span },
    Switch,
}

struct JumpChecker<'a> {
    sink: &'a mut ProblemSink,
    targets: Vec<JumpTarget>,
}

impl JumpChecker<'_> {
    fn check_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            if self.sink.is_done() {
                return;
            }
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Break => self.check_break(stmt.span),
            StmtKind::Continue => self.check_continue(stmt.span),
            StmtKind::Block(block) => self.check_block(block),
            StmtKind::For(for_loop) => {
                let target = JumpTarget::Loop {
                    role: LoopRole::of(for_loop),
                    span: for_loop.span,
                };
                self.check_within(target, &for_loop.body);
            }
            StmtKind::While { body, .. } | StmtKind::DoWhile { body, .. } => {
                let target = JumpTarget::Loop {
                    role: LoopRole::None,
                    span: stmt.span,
                };
                self.check_within(target, body);
            }
            StmtKind::Switch { body, .. } => self.check_within(JumpTarget::Switch, body),
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.check_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    if !self.sink.is_done() {
                        self.check_stmt(else_branch);
                    }
                }
            }
            StmtKind::Expr(_)
            | StmtKind::Decl(_)
            | StmtKind::CaseLabel(_)
            | StmtKind::Return(_)
            | StmtKind::Empty => {}
        }
    }

    fn check_within(&mut self, target: JumpTarget, body: &Stmt) {
        self.targets.push(target);
        self.check_stmt(body);
        self.targets.pop();
    }

    fn check_break(&mut self, span: Span) {
        // break binds to the innermost loop or switch
        if let Some(&JumpTarget::Loop { role, span: loop_span }) = self.targets.last() {
            if role.is_attributed() {
                self.sink.push(KernelProblem::IllegalBreak {
                    span,
                    loop_span,
                    role,
                });
            }
        }
    }

    fn check_continue(&mut self, span: Span) {
        // continue passes through switches to the innermost loop
        let target = self.targets.iter().rev().find_map(|t| match *t {
            JumpTarget::Loop { role, span } => Some((role, span)),
            JumpTarget::Switch => None,
        });
        if let Some((role, loop_span)) = target {
            if role.is_attributed() {
                self.sink.push(KernelProblem::IllegalContinue {
                    span,
                    loop_span,
                    role,
                });
            }
        }
    }
}
