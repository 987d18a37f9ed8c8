//! Kernel rule violations.
//!
//! Every validator reports violations as [`KernelProblem`] values. They
//! carry interned names and spans only; rendering to a [`Diagnostic`] is
//! deferred until a caller asks for it.

use okl_diagnostic::{Diagnostic, ErrorCode};
use okl_ir::{AttrKind, Name, Span, Spanned, StringInterner};

use crate::attrs::LoopRole;
use crate::registry::AttrTarget;

/// Why an induction declaration was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InductionIssue {
    /// `for (; ...)`
    MissingInit,
    /// `for (o = 0; ...)`
    NotADeclaration,
    /// `for (int o = 0, j = 0; ...)`
    DeclaratorCount(usize),
    /// `for (int o[2] = ...; ...)`
    ArrayInduction,
    /// `for (int o; ...)`
    MissingInitializer,
    /// `for (float o = 0; ...)`
    NonIntegralType,
}

/// Why a loop test was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TestIssue {
    Missing,
    /// Not one of `<`, `<=`, `>`, `>=`.
    NotRelational,
    /// Left operand is not the induction variable.
    WrongOperand,
}

/// Why a loop update was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IncrementIssue {
    Missing,
    /// Updates something other than the induction variable.
    WrongVariable,
    /// Not an additive step (`*=`, `i = i * 2`, ...).
    NotAdditive,
    /// The step itself depends on the induction variable.
    StepReferencesVar,
}

/// Which loop level a kernel lacks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MissingRole {
    Outer,
    Inner,
    Both,
}

/// A rule violation found in one kernel.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum KernelProblem {
    /// Marker not accepted on this node kind.
    UnknownAttribute {
        span: Span,
        attr: AttrKind,
        target: AttrTarget,
    },

    /// Second role marker on one node.
    DuplicateAttribute {
        span: Span,
        attr: AttrKind,
        first_span: Span,
    },

    BadInductionDecl {
        span: Span,
        loop_span: Span,
        issue: InductionIssue,
    },

    BadLoopTest {
        span: Span,
        var: Name,
        issue: TestIssue,
    },

    BadLoopIncrement {
        span: Span,
        var: Name,
        issue: IncrementIssue,
    },

    /// `@outer` loop somewhere below an `@inner` loop.
    OuterBelowInner { span: Span, inner_span: Span },

    /// Reported at the kernel.
    MissingOuterOrInner {
        span: Span,
        kernel: Name,
        missing: MissingRole,
    },

    /// Sibling `@inner` loops disagree on inner depth.
    InconsistentInnerDepth {
        span: Span,
        depth: u32,
        expected: u32,
        first_span: Span,
    },

    /// `@inner` loop with no `@outer` ancestor.
    InnerOutsideOuter { span: Span },

    SharedOutsideOuter { span: Span, name: Name },

    SharedInsideInner {
        span: Span,
        name: Name,
        inner_span: Span,
    },

    ExclusiveOutsideOuter { span: Span, name: Name },

    ExclusiveInsideInner {
        span: Span,
        name: Name,
        inner_span: Span,
    },

    /// A `@shared` dimension expression reads a loop-variant name.
    NonEvaluableSharedBound {
        span: Span,
        array: Name,
        var: Name,
        var_span: Span,
    },

    IllegalBreak {
        span: Span,
        loop_span: Span,
        role: LoopRole,
    },

    IllegalContinue {
        span: Span,
        loop_span: Span,
        role: LoopRole,
    },
}

impl KernelProblem {
    /// Get the primary span of this problem.
    pub fn span(&self) -> Span {
        match self {
            KernelProblem::UnknownAttribute { span, .. }
            | KernelProblem::DuplicateAttribute { span, .. }
            | KernelProblem::BadInductionDecl { span, .. }
            | KernelProblem::BadLoopTest { span, .. }
            | KernelProblem::BadLoopIncrement { span, .. }
            | KernelProblem::OuterBelowInner { span, .. }
            | KernelProblem::MissingOuterOrInner { span, .. }
            | KernelProblem::InconsistentInnerDepth { span, .. }
            | KernelProblem::InnerOutsideOuter { span }
            | KernelProblem::SharedOutsideOuter { span, .. }
            | KernelProblem::SharedInsideInner { span, .. }
            | KernelProblem::ExclusiveOutsideOuter { span, .. }
            | KernelProblem::ExclusiveInsideInner { span, .. }
            | KernelProblem::NonEvaluableSharedBound { span, .. }
            | KernelProblem::IllegalBreak { span, .. }
            | KernelProblem::IllegalContinue { span, .. } => *span,
        }
    }

    /// The error code of the violated rule.
    pub fn code(&self) -> ErrorCode {
        match self {
            KernelProblem::UnknownAttribute { .. } => ErrorCode::E1001,
            KernelProblem::DuplicateAttribute { .. } => ErrorCode::E1002,
            KernelProblem::BadInductionDecl { .. } => ErrorCode::E2001,
            KernelProblem::BadLoopTest { .. } => ErrorCode::E2002,
            KernelProblem::BadLoopIncrement { .. } => ErrorCode::E2003,
            KernelProblem::OuterBelowInner { .. } => ErrorCode::E3001,
            KernelProblem::MissingOuterOrInner { .. } => ErrorCode::E3002,
            KernelProblem::InconsistentInnerDepth { .. } => ErrorCode::E3003,
            KernelProblem::InnerOutsideOuter { .. } => ErrorCode::E3004,
            KernelProblem::SharedOutsideOuter { .. } => ErrorCode::E4001,
            KernelProblem::SharedInsideInner { .. } => ErrorCode::E4002,
            KernelProblem::ExclusiveOutsideOuter { .. } => ErrorCode::E4003,
            KernelProblem::ExclusiveInsideInner { .. } => ErrorCode::E4004,
            KernelProblem::NonEvaluableSharedBound { .. } => ErrorCode::E4005,
            KernelProblem::IllegalBreak { .. } => ErrorCode::E5001,
            KernelProblem::IllegalContinue { .. } => ErrorCode::E5002,
        }
    }

    /// Name of the violated rule, stable for tooling.
    pub fn rule_name(&self) -> &'static str {
        match self {
            KernelProblem::UnknownAttribute { .. } => "UnknownAttribute",
            KernelProblem::DuplicateAttribute { .. } => "DuplicateAttribute",
            KernelProblem::BadInductionDecl { .. } => "BadInductionDecl",
            KernelProblem::BadLoopTest { .. } => "BadLoopTest",
            KernelProblem::BadLoopIncrement { .. } => "BadLoopIncrement",
            KernelProblem::OuterBelowInner { .. } => "OuterBelowInner",
            KernelProblem::MissingOuterOrInner { .. } => "MissingOuterOrInner",
            KernelProblem::InconsistentInnerDepth { .. } => "InconsistentInnerDepth",
            KernelProblem::InnerOutsideOuter { .. } => "InnerOutsideOuter",
            KernelProblem::SharedOutsideOuter { .. } => "SharedOutsideOuter",
            KernelProblem::SharedInsideInner { .. } => "SharedInsideInner",
            KernelProblem::ExclusiveOutsideOuter { .. } => "ExclusiveOutsideOuter",
            KernelProblem::ExclusiveInsideInner { .. } => "ExclusiveInsideInner",
            KernelProblem::NonEvaluableSharedBound { .. } => "NonEvaluableSharedBound",
            KernelProblem::IllegalBreak { .. } => "IllegalBreak",
            KernelProblem::IllegalContinue { .. } => "IllegalContinue",
        }
    }

    /// Convert this problem into a diagnostic.
    ///
    /// Uses the interner to resolve interned `Name` fields to display strings.
    #[cold]
    pub fn into_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match self {
            KernelProblem::UnknownAttribute { span, attr, target } => {
                let attr = attr.name(interner);
                diag.with_message(format!(
                    "attribute `@{attr}` is not accepted on {}",
                    target.describe()
                ))
                .with_label(*span, "unknown attribute here")
            }

            KernelProblem::DuplicateAttribute {
                span,
                attr,
                first_span,
            } => {
                let attr = attr.name(interner);
                diag.with_message(format!("conflicting attribute `@{attr}`"))
                    .with_label(*span, "second role attribute")
                    .with_secondary_label(*first_span, "role already set here")
                    .with_note("a node carries at most one of @outer/@inner or @shared/@exclusive")
            }

            KernelProblem::BadInductionDecl {
                span,
                loop_span,
                issue,
            } => {
                let (message, label) = match issue {
                    InductionIssue::MissingInit => (
                        "attributed loop has no induction variable".to_string(),
                        "loop header declares nothing",
                    ),
                    InductionIssue::NotADeclaration => (
                        "attributed loop assigns an existing variable".to_string(),
                        "expected a declaration",
                    ),
                    InductionIssue::DeclaratorCount(n) => (
                        format!("attributed loop declares {n} variables"),
                        "expected exactly one variable",
                    ),
                    InductionIssue::ArrayInduction => (
                        "induction variable is an array".to_string(),
                        "expected a scalar",
                    ),
                    InductionIssue::MissingInitializer => (
                        "induction variable has no initial value".to_string(),
                        "initializer required",
                    ),
                    InductionIssue::NonIntegralType => (
                        "induction variable is not an integer".to_string(),
                        "expected an integral type",
                    ),
                };
                diag.with_message(message)
                    .with_label(*span, label)
                    .with_secondary_label(*loop_span, "in this loop")
                    .with_suggestion("declare one integer in the header: `for (int i = 0; ...)`")
            }

            KernelProblem::BadLoopTest { span, var, issue } => {
                let var = interner.lookup(*var);
                let (message, label) = match issue {
                    TestIssue::Missing => ("attributed loop has no test", "test required"),
                    TestIssue::NotRelational => (
                        "loop test is not a relational comparison",
                        "expected `<`, `<=`, `>` or `>=`",
                    ),
                    TestIssue::WrongOperand => (
                        "loop test does not compare the induction variable",
                        "left operand must be the induction variable",
                    ),
                };
                diag.with_message(message)
                    .with_label(*span, label)
                    .with_suggestion(format!("write the test as `{var} < bound`"))
            }

            KernelProblem::BadLoopIncrement { span, var, issue } => {
                let var = interner.lookup(*var);
                let (message, label) = match issue {
                    IncrementIssue::Missing => ("attributed loop has no update", "update required"),
                    IncrementIssue::WrongVariable => (
                        "loop update does not step the induction variable",
                        "updates another variable",
                    ),
                    IncrementIssue::NotAdditive => {
                        ("loop update is not an additive step", "not additive")
                    }
                    IncrementIssue::StepReferencesVar => (
                        "loop step depends on the induction variable",
                        "step is not constant across iterations",
                    ),
                };
                diag.with_message(message)
                    .with_label(*span, label)
                    .with_suggestion(format!(
                        "use `++{var}`, `{var}++`, `{var} += k` or `{var} = {var} + k`"
                    ))
            }

            KernelProblem::OuterBelowInner { span, inner_span } => diag
                .with_message("`@outer` loop nested inside an `@inner` loop")
                .with_label(*span, "this @outer loop")
                .with_secondary_label(*inner_span, "is inside this @inner loop")
                .with_note("@inner loops must always be nested within @outer loops"),

            KernelProblem::MissingOuterOrInner {
                span,
                kernel,
                missing,
            } => {
                let kernel = interner.lookup(*kernel);
                let what = match missing {
                    MissingRole::Outer => "`@outer` loop",
                    MissingRole::Inner => "`@inner` loop",
                    MissingRole::Both => "`@outer` or `@inner` loop",
                };
                diag.with_message(format!("kernel `{kernel}` has no {what}"))
                    .with_label(*span, "kernel declared here")
                    .with_note("a kernel needs at least one @outer and one @inner loop")
            }

            KernelProblem::InconsistentInnerDepth {
                span,
                depth,
                expected,
                first_span,
            } => diag
                .with_message(format!(
                    "`@inner` loop nests {depth} level(s) deep, its sibling nests {expected}"
                ))
                .with_label(*span, format!("{depth} level(s) of @inner loops"))
                .with_secondary_label(*first_span, format!("{expected} level(s) here"))
                .with_note("sibling @inner loops must have the same number of nested @inner loops"),

            KernelProblem::InnerOutsideOuter { span } => diag
                .with_message("`@inner` loop is not inside an `@outer` loop")
                .with_label(*span, "no enclosing @outer loop"),

            KernelProblem::SharedOutsideOuter { span, name } => {
                let name = interner.lookup(*name);
                diag.with_message(format!("`@shared` variable `{name}` is declared outside an `@outer` loop"))
                    .with_label(*span, "no enclosing @outer loop")
                    .with_suggestion("declare it inside the @outer loop, before any @inner loop")
            }

            KernelProblem::SharedInsideInner {
                span,
                name,
                inner_span,
            } => {
                let name = interner.lookup(*name);
                diag.with_message(format!("`@shared` variable `{name}` is declared inside an `@inner` loop"))
                    .with_label(*span, "declared here")
                    .with_secondary_label(*inner_span, "inside this @inner loop")
                    .with_suggestion("declare it inside the @outer loop, before any @inner loop")
            }

            KernelProblem::ExclusiveOutsideOuter { span, name } => {
                let name = interner.lookup(*name);
                diag.with_message(format!(
                    "`@exclusive` variable `{name}` is declared outside an `@outer` loop"
                ))
                .with_label(*span, "no enclosing @outer loop")
                .with_suggestion("declare it inside the @outer loop, before any @inner loop")
            }

            KernelProblem::ExclusiveInsideInner {
                span,
                name,
                inner_span,
            } => {
                let name = interner.lookup(*name);
                diag.with_message(format!(
                    "`@exclusive` variable `{name}` is declared inside an `@inner` loop"
                ))
                .with_label(*span, "declared here")
                .with_secondary_label(*inner_span, "inside this @inner loop")
                .with_suggestion("declare it inside the @outer loop, before any @inner loop")
            }

            KernelProblem::NonEvaluableSharedBound {
                span,
                array,
                var,
                var_span,
            } => {
                let array = interner.lookup(*array);
                let var = interner.lookup(*var);
                diag.with_message(format!(
                    "dimension of `@shared` array `{array}` depends on loop variable `{var}`"
                ))
                .with_label(*span, "not known before the group starts")
                .with_secondary_label(*var_span, format!("`{var}` changes per iteration"))
                .with_note("shared memory is sized once per group")
            }

            KernelProblem::IllegalBreak {
                span,
                loop_span,
                role,
            } => diag
                .with_message(format!("`break` directly inside an `@{}` loop", role.as_str()))
                .with_label(*span, "exits the loop early")
                .with_secondary_label(*loop_span, format!("this @{} loop", role.as_str()))
                .with_note("every group and thread must run every iteration"),

            KernelProblem::IllegalContinue {
                span,
                loop_span,
                role,
            } => diag
                .with_message(format!("`continue` directly inside an `@{}` loop", role.as_str()))
                .with_label(*span, "skips the rest of the iteration")
                .with_secondary_label(*loop_span, format!("this @{} loop", role.as_str()))
                .with_note("every group and thread must run every iteration"),
        }
    }
}

impl Spanned for KernelProblem {
    fn span(&self) -> Span {
        KernelProblem::span(self)
    }
}

#[cfg(test)]
mod tests;
