//! Outer/inner nesting.
//!
//! Three passes over the kernel body:
//!
//! 1. Presence: at least one `@outer` and one `@inner` loop
//!    (`MissingOuterOrInner`).
//! 2. Hierarchy: no `@outer` below an `@inner`, no `@inner` without an
//!    `@outer` above it.
//! 3. Depth: the *inner frontier* of a container loop is the set of `@inner`
//!    loops reachable from its body without entering another attributed
//!    loop. All loops of one frontier must have the same inner depth, where
//!    an `@inner` loop's depth is one more than the deepest loop of its own
//!    frontier. Every `@outer` and `@inner` loop is a container. `@outer`
//!    loops nested directly in a container are siblings too: their own
//!    frontier depths must agree with each other.

use okl_ir::visitor::{walk_for, Visitor};
use okl_ir::{ForLoop, Span, Stmt, StmtKind};

use crate::attrs::LoopRole;
use crate::context::{KernelContext, ProblemSink};
use crate::problem::{KernelProblem, MissingRole};

#[tracing::instrument(level = "debug", skip_all, fields(kernel = cx.kernel_name()))]
pub(crate) fn check_nesting(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    check_presence(cx, sink);
    if sink.is_done() {
        return;
    }

    let mut hierarchy = HierarchyChecker {
        sink: &mut *sink,
        outer_depth: 0,
        inner_ancestor: None,
    };
    hierarchy.visit_block(&cx.kernel.body);
    if sink.is_done() {
        return;
    }

    // Top-level nests are independent of each other.
    let mut depths = DepthChecker { sink };
    let mut top_level = Frontier::default();
    for stmt in &cx.kernel.body.stmts {
        depths.collect_frontier(stmt, &mut top_level);
    }
}

// Presence

#[derive(Default)]
struct RoleCounter {
    outer: usize,
    inner: usize,
}

impl<'ast> Visitor<'ast> for RoleCounter {
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        match LoopRole::of(for_loop) {
            LoopRole::Outer => self.outer += 1,
            LoopRole::Inner => self.inner += 1,
            LoopRole::None => {}
        }
        walk_for(self, for_loop);
    }
}

fn check_presence(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    let mut counter = RoleCounter::default();
    counter.visit_block(&cx.kernel.body);
    tracing::trace!(outer = counter.outer, inner = counter.inner, "attributed loops");

    let missing = match (counter.outer, counter.inner) {
        (0, 0) => MissingRole::Both,
        (0, _) => MissingRole::Outer,
        (_, 0) => MissingRole::Inner,
        _ => return,
    };
    sink.push(KernelProblem::MissingOuterOrInner {
        span: cx.kernel.span,
        kernel: cx.kernel.name,
        missing,
    });
}

// Hierarchy

struct HierarchyChecker<'a> {
    sink: &'a mut ProblemSink,
    outer_depth: usize,
    /// Outermost enclosing `@inner` loop.
    inner_ancestor: Option<Span>,
}

impl<'ast> Visitor<'ast> for HierarchyChecker<'_> {
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        if self.sink.is_done() {
            return;
        }
        match LoopRole::of(for_loop) {
            LoopRole::Outer => {
                if let Some(inner_span) = self.inner_ancestor {
                    self.sink.push(KernelProblem::OuterBelowInner {
                        span: for_loop.span,
                        inner_span,
                    });
                }
                self.outer_depth += 1;
                walk_for(self, for_loop);
                self.outer_depth -= 1;
            }
            LoopRole::Inner => {
                let top_level_inner = self.inner_ancestor.is_none();
                if self.outer_depth == 0 && top_level_inner {
                    self.sink
                        .push(KernelProblem::InnerOutsideOuter { span: for_loop.span });
                }
                if top_level_inner {
                    self.inner_ancestor = Some(for_loop.span);
                }
                walk_for(self, for_loop);
                if top_level_inner {
                    self.inner_ancestor = None;
                }
            }
            LoopRole::None => walk_for(self, for_loop),
        }
    }
}

// Depth

struct DepthChecker<'a> {
    sink: &'a mut ProblemSink,
}

/// An attributed loop on some frontier, with its inner depth.
struct FrontierLoop {
    span: Span,
    depth: u32,
}

/// Attributed loops reachable from one container body.
#[derive(Default)]
struct Frontier {
    inner: Vec<FrontierLoop>,
    /// Nested `@outer` loops, compared only with each other.
    outer: Vec<FrontierLoop>,
}

impl DepthChecker<'_> {
    /// Collect the `@inner` loops on the frontier below `stmt`, checking
    /// every container met along the way.
    fn collect_frontier(&mut self, stmt: &Stmt, out: &mut Frontier) {
        if self.sink.is_done() {
            return;
        }
        match &stmt.kind {
            StmtKind::For(for_loop) => match LoopRole::of(for_loop) {
                LoopRole::Inner => {
                    let depth = 1 + self.check_container(for_loop);
                    out.inner.push(FrontierLoop {
                        span: for_loop.span,
                        depth,
                    });
                }
                LoopRole::Outer => {
                    let depth = self.check_container(for_loop);
                    out.outer.push(FrontierLoop {
                        span: for_loop.span,
                        depth,
                    });
                }
                LoopRole::None => self.collect_frontier(&for_loop.body, out),
            },
            StmtKind::Block(block) => {
                for stmt in &block.stmts {
                    self.collect_frontier(stmt, out);
                }
            }
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.collect_frontier(then_branch, out);
                if let Some(else_branch) = else_branch {
                    self.collect_frontier(else_branch, out);
                }
            }
            StmtKind::While { body, .. }
            | StmtKind::DoWhile { body, .. }
            | StmtKind::Switch { body, .. } => self.collect_frontier(body, out),
            StmtKind::Expr(_)
            | StmtKind::Decl(_)
            | StmtKind::CaseLabel(_)
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Return(_)
            | StmtKind::Empty => {}
        }
    }

    /// Check that the frontier of `container` has a single depth and return
    /// the deepest `@inner` frontier depth (0 when there is none).
    fn check_container(&mut self, container: &ForLoop) -> u32 {
        let mut frontier = Frontier::default();
        self.collect_frontier(&container.body, &mut frontier);

        self.check_siblings(&frontier.inner);
        self.check_siblings(&frontier.outer);
        frontier.inner.iter().map(|l| l.depth).max().unwrap_or(0)
    }

    /// The first sibling fixes the expected depth.
    fn check_siblings(&mut self, siblings: &[FrontierLoop]) {
        let Some((first, rest)) = siblings.split_first() else {
            return;
        };
        for sibling in rest {
            if sibling.depth != first.depth {
                self.sink.push(KernelProblem::InconsistentInnerDepth {
                    span: sibling.span,
                    depth: sibling.depth,
                    expected: first.depth,
                    first_span: first.span,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests;
