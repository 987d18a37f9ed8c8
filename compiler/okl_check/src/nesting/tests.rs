use super::*;
use crate::api::CheckMode;
use crate::context::run_stage;
use okl_ir::{AstBuilder, Function, StringInterner};
use pretty_assertions::assert_eq;

fn for_span(stmt: &Stmt) -> Span {
    match stmt.as_for() {
        Some(for_loop) => for_loop.span,
        None => panic!("expected a for loop"),
    }
}

fn rules(kernel: &Function, interner: &StringInterner) -> Vec<&'static str> {
    run_stage(check_nesting, kernel, interner, CheckMode::CollectAll)
        .iter()
        .map(KernelProblem::rule_name)
        .collect()
}

#[test]
fn test_outer_containing_inner_passes() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let kernel = b.kernel("k", vec![b.outer("o", 2, vec![b.inner("i", 2, vec![])])]);
    assert_eq!(rules(&kernel, &interner), Vec::<&str>::new());
}

#[test]
fn test_missing_roles() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let cases = [
        (b.kernel("none", vec![]), MissingRole::Both),
        (b.kernel("plain", vec![b.plain_for("k", 2, vec![])]), MissingRole::Both),
        (b.kernel("outer", vec![b.outer("o", 2, vec![])]), MissingRole::Inner),
        (b.kernel("inner", vec![b.inner("i", 2, vec![])]), MissingRole::Outer),
    ];
    for (kernel, missing) in cases {
        let problems = run_stage(check_nesting, &kernel, &interner, CheckMode::Fast);
        assert_eq!(
            problems,
            vec![KernelProblem::MissingOuterOrInner {
                span: kernel.span,
                kernel: kernel.name,
                missing,
            }]
        );
    }
}

#[test]
fn test_outer_below_inner_through_plain_loops() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let nested_outer = b.outer("p", 2, vec![b.inner("j", 2, vec![])]);
    let nested_span = for_span(&nested_outer);
    let inner = b.inner("i", 2, vec![b.plain_for("k", 2, vec![b.block(vec![nested_outer])])]);
    let inner_span = for_span(&inner);
    let kernel = b.kernel("k", vec![b.outer("o", 2, vec![inner])]);

    let problems = run_stage(check_nesting, &kernel, &interner, CheckMode::Fast);
    assert_eq!(
        problems,
        vec![KernelProblem::OuterBelowInner {
            span: nested_span,
            inner_span,
        }]
    );
}

#[test]
fn test_inner_outside_outer() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let stray = b.inner("s", 2, vec![b.inner("t", 2, vec![])]);
    let stray_span = for_span(&stray);
    let kernel = b.kernel(
        "k",
        vec![stray, b.outer("o", 2, vec![b.inner("i", 2, vec![])])],
    );

    // only the top-level stray loop is reported
    let problems = run_stage(check_nesting, &kernel, &interner, CheckMode::CollectAll);
    assert_eq!(problems, vec![KernelProblem::InnerOutsideOuter { span: stray_span }]);
}

#[test]
fn test_sibling_inner_depths() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    // depth 1 next to depth 2
    let shallow = b.inner("i", 2, vec![]);
    let shallow_span = for_span(&shallow);
    let deep = b.inner("j", 2, vec![b.inner("jj", 2, vec![])]);
    let deep_span = for_span(&deep);
    let kernel = b.kernel("mixed", vec![b.outer("o", 2, vec![shallow, deep])]);
    let problems = run_stage(check_nesting, &kernel, &interner, CheckMode::CollectAll);
    assert_eq!(
        problems,
        vec![KernelProblem::InconsistentInnerDepth {
            span: deep_span,
            depth: 2,
            expected: 1,
            first_span: shallow_span,
        }]
    );

    let both_one = b.kernel(
        "ones",
        vec![b.outer("o", 2, vec![b.inner("i", 2, vec![]), b.inner("j", 2, vec![])])],
    );
    assert_eq!(rules(&both_one, &interner), Vec::<&str>::new());

    let both_two = b.kernel(
        "twos",
        vec![b.outer(
            "o",
            2,
            vec![
                b.inner("i", 2, vec![b.inner("ii", 2, vec![])]),
                b.inner("j", 2, vec![b.inner("jj", 2, vec![])]),
            ],
        )],
    );
    assert_eq!(rules(&both_two, &interner), Vec::<&str>::new());
}

#[test]
fn test_frontier_crosses_plain_statements() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    // the second inner is reached through an if and a plain loop
    let kernel = b.kernel(
        "k",
        vec![b.outer(
            "o",
            2,
            vec![
                b.inner("i", 2, vec![]),
                b.if_stmt(
                    b.ident("flag"),
                    vec![b.plain_for(
                        "k",
                        2,
                        vec![b.inner("j", 2, vec![b.inner("jj", 2, vec![])])],
                    )],
                    None,
                ),
            ],
        )],
    );
    assert_eq!(rules(&kernel, &interner), vec!["InconsistentInnerDepth"]);
}

#[test]
fn test_nested_frontiers_are_checked() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    // the outer frontier is a single loop; its own frontier disagrees
    let kernel = b.kernel(
        "k",
        vec![b.outer(
            "o",
            2,
            vec![b.inner(
                "i",
                2,
                vec![
                    b.inner("a", 2, vec![]),
                    b.inner("c", 2, vec![b.inner("d", 2, vec![])]),
                ],
            )],
        )],
    );
    assert_eq!(rules(&kernel, &interner), vec!["InconsistentInnerDepth"]);
}

#[test]
fn test_separate_outer_loops_may_differ() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let kernel = b.kernel(
        "k",
        vec![
            b.outer("o", 2, vec![b.inner("i", 2, vec![])]),
            b.outer("p", 2, vec![b.inner("j", 2, vec![b.inner("jj", 2, vec![])])]),
        ],
    );
    assert_eq!(rules(&kernel, &interner), Vec::<&str>::new());
}

#[test]
fn test_nested_outer_siblings_are_compared() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let shallow = b.outer("p", 2, vec![b.inner("i", 2, vec![])]);
    let shallow_span = for_span(&shallow);
    let deep = b.outer("q", 2, vec![b.inner("i", 2, vec![b.inner("j", 2, vec![])])]);
    let deep_span = for_span(&deep);
    let kernel = b.kernel("k", vec![b.outer("o", 2, vec![shallow, deep])]);
    let problems = run_stage(check_nesting, &kernel, &interner, CheckMode::CollectAll);
    assert_eq!(
        problems,
        vec![KernelProblem::InconsistentInnerDepth {
            span: deep_span,
            depth: 2,
            expected: 1,
            first_span: shallow_span,
        }]
    );

    // a plain loop between the containers does not hide the sibling
    let hidden = b.kernel(
        "hidden",
        vec![b.outer(
            "o",
            2,
            vec![
                b.outer("p", 2, vec![b.inner("i", 2, vec![])]),
                b.plain_for(
                    "t",
                    2,
                    vec![b.outer("q", 2, vec![b.inner("i", 2, vec![b.inner("j", 2, vec![])])])],
                ),
            ],
        )],
    );
    assert_eq!(rules(&hidden, &interner), vec!["InconsistentInnerDepth"]);

    let same = b.kernel(
        "same",
        vec![b.outer(
            "o",
            2,
            vec![
                b.outer("p", 2, vec![b.inner("i", 2, vec![])]),
                b.outer("q", 2, vec![b.inner("j", 2, vec![])]),
            ],
        )],
    );
    assert_eq!(rules(&same, &interner), Vec::<&str>::new());
}

#[test]
fn test_collect_all_reports_every_nesting_problem() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let kernel = b.kernel(
        "k",
        vec![
            b.inner("s", 2, vec![]),
            b.outer(
                "o",
                2,
                vec![
                    b.inner("i", 2, vec![b.outer("p", 2, vec![])]),
                    b.inner("j", 2, vec![b.inner("jj", 2, vec![])]),
                ],
            ),
        ],
    );
    assert_eq!(
        rules(&kernel, &interner),
        vec!["InnerOutsideOuter", "OuterBelowInner", "InconsistentInnerDepth"]
    );
    let fast = run_stage(check_nesting, &kernel, &interner, CheckMode::Fast);
    assert_eq!(fast.len(), 1);
}
