use super::*;
use okl_diagnostic::Severity;
use okl_ir::{AstBuilder, StringInterner};
use pretty_assertions::assert_eq;

fn sample_problems(b: &AstBuilder<'_>) -> Vec<KernelProblem> {
    let s = || b.fresh_span();
    let name = b.name("tile");
    vec![
        KernelProblem::UnknownAttribute {
            span: s(),
            attr: AttrKind::Outer,
            target: AttrTarget::Declaration,
        },
        KernelProblem::DuplicateAttribute {
            span: s(),
            attr: AttrKind::Inner,
            first_span: s(),
        },
        KernelProblem::BadInductionDecl {
            span: s(),
            loop_span: s(),
            issue: InductionIssue::DeclaratorCount(2),
        },
        KernelProblem::BadLoopTest {
            span: s(),
            var: name,
            issue: TestIssue::NotRelational,
        },
        KernelProblem::BadLoopIncrement {
            span: s(),
            var: name,
            issue: IncrementIssue::NotAdditive,
        },
        KernelProblem::OuterBelowInner {
            span: s(),
            inner_span: s(),
        },
        KernelProblem::MissingOuterOrInner {
            span: s(),
            kernel: name,
            missing: MissingRole::Inner,
        },
        KernelProblem::InconsistentInnerDepth {
            span: s(),
            depth: 2,
            expected: 1,
            first_span: s(),
        },
        KernelProblem::InnerOutsideOuter { span: s() },
        KernelProblem::SharedOutsideOuter { span: s(), name },
        KernelProblem::SharedInsideInner {
            span: s(),
            name,
            inner_span: s(),
        },
        KernelProblem::ExclusiveOutsideOuter { span: s(), name },
        KernelProblem::ExclusiveInsideInner {
            span: s(),
            name,
            inner_span: s(),
        },
        KernelProblem::NonEvaluableSharedBound {
            span: s(),
            array: name,
            var: b.name("o"),
            var_span: s(),
        },
        KernelProblem::IllegalBreak {
            span: s(),
            loop_span: s(),
            role: LoopRole::Outer,
        },
        KernelProblem::IllegalContinue {
            span: s(),
            loop_span: s(),
            role: LoopRole::Inner,
        },
    ]
}

#[test]
fn test_every_rule_has_a_distinct_code() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let codes: Vec<ErrorCode> = sample_problems(&b).iter().map(KernelProblem::code).collect();
    let expected: Vec<ErrorCode> = ErrorCode::ALL
        .iter()
        .copied()
        .filter(|code| !code.is_internal_error())
        .collect();
    assert_eq!(codes, expected);
}

#[test]
fn test_diagnostic_primary_span_matches_problem_span() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    for problem in sample_problems(&b) {
        let diag = problem.into_diagnostic(&interner);
        assert_eq!(diag.code, problem.code());
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.primary_span(), Some(problem.span()), "{}", problem.rule_name());
        assert!(!diag.message.is_empty());
    }
}

#[test]
fn test_rule_names() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let problems = sample_problems(&b);
    assert_eq!(problems[0].rule_name(), "UnknownAttribute");
    assert_eq!(problems[8].rule_name(), "InnerOutsideOuter");
    assert_eq!(problems[15].rule_name(), "IllegalContinue");
}

#[test]
fn test_messages_resolve_names() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let problems = sample_problems(&b);

    let unknown = problems[0].into_diagnostic(&interner);
    assert_eq!(unknown.message, "attribute `@outer` is not accepted on a declaration");

    let missing = problems[6].into_diagnostic(&interner);
    assert_eq!(missing.message, "kernel `tile` has no `@inner` loop");

    let bound = problems[13].into_diagnostic(&interner);
    assert_eq!(
        bound.message,
        "dimension of `@shared` array `tile` depends on loop variable `o`"
    );
    assert_eq!(bound.labels.len(), 2);

    let brk = problems[14].into_diagnostic(&interner);
    assert_eq!(brk.message, "`break` directly inside an `@outer` loop");
}

#[test]
fn test_spanned_trait_agrees() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    for problem in sample_problems(&b) {
        assert_eq!(Spanned::span(&problem), problem.span());
    }
}
