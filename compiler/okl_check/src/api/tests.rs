use super::*;
use okl_diagnostic::ErrorCode;
use okl_ir::{AstBuilder, AttrKind};
use pretty_assertions::assert_eq;

/// A kernel that breaks several rules at once:
/// a bad loop update, a top-level `@shared` and a `break` in `@outer`.
fn broken_kernel(b: &AstBuilder<'_>, name: &str) -> Function {
    b.kernel(
        name,
        vec![
            b.shared("s", vec![b.int(4)]),
            b.outer(
                "o",
                2,
                vec![
                    b.for_loop(
                        Some(b.induction("i")),
                        Some(b.lt("i", b.int(2))),
                        Some(b.pre_inc("j")),
                        vec![b.attr(AttrKind::Inner)],
                        vec![],
                    ),
                    b.break_stmt(),
                ],
            ),
        ],
    )
}

fn valid_kernel(b: &AstBuilder<'_>, name: &str) -> Function {
    b.kernel(
        name,
        vec![b.outer(
            "o",
            2,
            vec![b.shared("s", vec![b.int(16)]), b.inner("i", 2, vec![])],
        )],
    )
}

fn codes(verdict: &KernelVerdict) -> Vec<ErrorCode> {
    verdict.problems.iter().map(KernelProblem::code).collect()
}

#[test]
fn test_fast_mode_stops_at_first_problem() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let kernel = broken_kernel(&b, "broken");
    let verdict = check_kernel(&kernel, &interner, &registry, CheckMode::Fast);
    assert_eq!(codes(&verdict), vec![ErrorCode::E2003]);
    assert!(!verdict.passed());
}

#[test]
fn test_collect_all_runs_every_stage() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let kernel = broken_kernel(&b, "broken");
    let verdict = check_kernel(&kernel, &interner, &registry, CheckMode::CollectAll);
    assert_eq!(
        codes(&verdict),
        vec![ErrorCode::E2003, ErrorCode::E4001, ErrorCode::E5001]
    );
}

#[test]
fn test_attribute_problems_come_first() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let kernel = b.kernel(
        "k",
        vec![b.canonical_for(
            "o",
            b.int(2),
            vec![b.attr(AttrKind::Outer), b.attr(AttrKind::Inner)],
            vec![],
        )],
    );
    let verdict = check_kernel(&kernel, &interner, &registry, CheckMode::Fast);
    assert_eq!(codes(&verdict), vec![ErrorCode::E1002]);
}

#[test]
fn test_report_keeps_source_order_and_skips_plain_functions() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let module = b.module(vec![
        valid_kernel(&b, "first"),
        b.function("helper", vec![], vec![b.break_stmt()]),
        broken_kernel(&b, "second"),
        valid_kernel(&b, "third"),
    ]);

    let report = check_kernels(&module, &interner, &registry, CheckConfig::collect_all());
    let names: Vec<&str> = report
        .verdicts
        .iter()
        .map(|v| interner.lookup(v.name))
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert!(!report.passed());
    assert_eq!(report.problem_count(), 3);
    assert_eq!(report.rejected().count(), 1);
    assert!(!kernels_pass(&module, &interner, &registry));
}

#[test]
fn test_parallel_matches_sequential() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let module = b.module(
        (0..16)
            .map(|n| {
                let name = format!("k{n}");
                if n % 3 == 0 {
                    broken_kernel(&b, &name)
                } else {
                    valid_kernel(&b, &name)
                }
            })
            .collect(),
    );

    for config in [CheckConfig::fast(), CheckConfig::collect_all()] {
        let parallel = check_kernels(&module, &interner, &registry, config);
        let sequential = check_kernels(&module, &interner, &registry, config.with_parallel(false));
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn test_repeated_checks_agree() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();
    let module = b.module(vec![broken_kernel(&b, "a"), valid_kernel(&b, "b")]);

    let first = check_kernels(&module, &interner, &registry, CheckConfig::default());
    for _ in 0..4 {
        assert_eq!(
            check_kernels(&module, &interner, &registry, CheckConfig::default()),
            first
        );
    }
}

#[test]
fn test_empty_module_passes() {
    let interner = StringInterner::new();
    let registry = AttributeRegistry::new();
    let module = Module::default();
    assert!(kernels_pass(&module, &interner, &registry));
    assert_eq!(
        check_kernels(&module, &interner, &registry, CheckConfig::default()),
        CheckReport::default()
    );
}

#[test]
fn test_diagnostics_name_the_kernel() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();
    let module = b.module(vec![valid_kernel(&b, "ok"), broken_kernel(&b, "bad")]);

    let report = check_kernels(&module, &interner, &registry, CheckConfig::collect_all());
    let diagnostics = report.diagnostics(&interner);
    assert_eq!(diagnostics.len(), 3);
    for diag in &diagnostics {
        assert_eq!(diag.notes.last().map(String::as_str), Some("in kernel `bad`"));
    }
}

#[test]
fn test_config_defaults() {
    assert_eq!(CheckConfig::default().mode, CheckMode::Fast);
    assert!(CheckConfig::default().parallel);
    assert_eq!(CheckConfig::collect_all().mode, CheckMode::CollectAll);
    assert!(!CheckConfig::fast().with_parallel(false).parallel);
}
