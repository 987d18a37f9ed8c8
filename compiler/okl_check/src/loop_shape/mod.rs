//! Canonical loop shape.
//!
//! Every `@outer`/`@inner` loop must have the form
//!
//! ```text
//! for (T i = start; i <op> bound; step) { ... }
//! ```
//!
//! where `T` is integral, `<op>` is relational and `step` is one of `++i`,
//! `i++`, `--i`, `i--`, `i += k`, `i -= k`, `i = i + k`, `i = k + i` or
//! `i = i - k` with `k` independent of `i`. The check is purely syntactic.

use okl_ir::visitor::{walk_for, Visitor};
use okl_ir::{AssignOp, BinaryOp, Expr, ExprKind, ForInit, ForLoop, Name, Span, StringInterner};

use crate::attrs::LoopRole;
use crate::context::{KernelContext, ProblemSink};
use crate::problem::{IncrementIssue, InductionIssue, KernelProblem, TestIssue};

/// Check the header of every attributed loop in the kernel.
#[tracing::instrument(level = "debug", skip_all, fields(kernel = cx.kernel_name()))]
pub(crate) fn check_loop_shapes(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    let mut checker = ShapeChecker {
        interner: cx.interner,
        sink,
    };
    checker.visit_block(&cx.kernel.body);
}

struct ShapeChecker<'a> {
    interner: &'a StringInterner,
    sink: &'a mut ProblemSink,
}

impl<'ast> Visitor<'ast> for ShapeChecker<'_> {
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        if self.sink.is_done() {
            return;
        }
        if LoopRole::of(for_loop).is_attributed() {
            if let Err(problems) = check_loop_shape(for_loop, self.interner) {
                for problem in problems {
                    self.sink.push(problem);
                }
            }
        }
        walk_for(self, for_loop);
    }
}

/// Validate one loop header.
///
/// Returns the induction variable when the header is canonical. Otherwise
/// returns the problems found, at most one per header clause. Test and
/// update are still checked when the declaration is malformed but names a
/// single variable.
pub fn check_loop_shape(
    for_loop: &ForLoop,
    interner: &StringInterner,
) -> Result<Name, Vec<KernelProblem>> {
    let mut problems = Vec::new();

    let var = match induction_var(for_loop, interner) {
        Ok(var) => Some(var),
        Err((issue, span, var)) => {
            problems.push(KernelProblem::BadInductionDecl {
                span,
                loop_span: for_loop.span,
                issue,
            });
            var
        }
    };

    let Some(var) = var else {
        return Err(problems);
    };

    if let Err((issue, span)) = check_test(for_loop, var) {
        problems.push(KernelProblem::BadLoopTest { span, var, issue });
    }
    if let Err((issue, span)) = check_update(for_loop, var) {
        problems.push(KernelProblem::BadLoopIncrement { span, var, issue });
    }

    if problems.is_empty() {
        Ok(var)
    } else {
        Err(problems)
    }
}

type InductionError = (InductionIssue, Span, Option<Name>);

/// The single declared induction variable.
///
/// On error, also returns the declared name when there is exactly one, so
/// the rest of the header can still be checked against it.
fn induction_var(for_loop: &ForLoop, interner: &StringInterner) -> Result<Name, InductionError> {
    let decl = match &for_loop.init {
        None => return Err((InductionIssue::MissingInit, for_loop.span, None)),
        Some(ForInit::Expr(expr)) => {
            return Err((InductionIssue::NotADeclaration, expr.span, None));
        }
        Some(ForInit::Decl(decl)) => decl,
    };

    let declarator = match decl.declarators.as_slice() {
        [only] => only,
        many => {
            return Err((InductionIssue::DeclaratorCount(many.len()), decl.span, None));
        }
    };
    let name = declarator.name;

    if !declarator.dims.is_empty() {
        return Err((InductionIssue::ArrayInduction, declarator.span, Some(name)));
    }
    if declarator.init.is_none() {
        return Err((InductionIssue::MissingInitializer, declarator.span, Some(name)));
    }
    if !decl.ty.is_integral(interner) {
        return Err((InductionIssue::NonIntegralType, decl.span, Some(name)));
    }
    Ok(name)
}

fn check_test(for_loop: &ForLoop, var: Name) -> Result<(), (TestIssue, Span)> {
    let Some(test) = &for_loop.test else {
        return Err((TestIssue::Missing, for_loop.span));
    };
    match &test.kind {
        ExprKind::Binary { op, lhs, .. } if op.is_relational() => {
            if lhs.as_ident() == Some(var) {
                Ok(())
            } else {
                Err((TestIssue::WrongOperand, lhs.span))
            }
        }
        _ => Err((TestIssue::NotRelational, test.span)),
    }
}

fn check_update(for_loop: &ForLoop, var: Name) -> Result<(), (IncrementIssue, Span)> {
    let Some(update) = &for_loop.update else {
        return Err((IncrementIssue::Missing, for_loop.span));
    };
    classify_step(update, var).map_err(|issue| (issue, update.span))
}

/// Accept exactly the additive step forms.
fn classify_step(update: &Expr, var: Name) -> Result<(), IncrementIssue> {
    let is_var = |e: &Expr| e.as_ident() == Some(var);

    match &update.kind {
        ExprKind::Unary { op, operand } if op.is_step() => {
            if is_var(operand) {
                Ok(())
            } else {
                Err(IncrementIssue::WrongVariable)
            }
        }
        ExprKind::Assign { target, .. } if !is_var(target) => Err(IncrementIssue::WrongVariable),
        ExprKind::Assign {
            op: AssignOp::Add | AssignOp::Sub,
            value,
            ..
        } => step_is_invariant(value, var),
        ExprKind::Assign {
            op: AssignOp::Assign,
            value,
            ..
        } => match &value.kind {
            // i = i + k | i = i - k
            ExprKind::Binary { op, lhs, rhs } if op.is_additive() && is_var(lhs) => {
                step_is_invariant(rhs, var)
            }
            // i = k + i
            ExprKind::Binary {
                op: BinaryOp::Add,
                lhs,
                rhs,
            } if is_var(rhs) => step_is_invariant(lhs, var),
            _ => Err(IncrementIssue::NotAdditive),
        },
        _ => Err(IncrementIssue::NotAdditive),
    }
}

fn step_is_invariant(step: &Expr, var: Name) -> Result<(), IncrementIssue> {
    if step.references(var) {
        Err(IncrementIssue::StepReferencesVar)
    } else {
        Ok(())
    }
}
