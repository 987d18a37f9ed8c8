use super::*;
use crate::api::CheckMode;
use crate::context::run_stage;
use crate::registry::AttrTargets;
use okl_ir::{AstBuilder, CType, ForInit, Stmt, StmtKind, StringInterner};
use pretty_assertions::assert_eq;

fn as_for(stmt: &Stmt) -> &ForLoop {
    match stmt.as_for() {
        Some(for_loop) => for_loop,
        None => panic!("expected a for loop"),
    }
}

fn as_decl(stmt: &Stmt) -> &Declaration {
    match &stmt.kind {
        StmtKind::Decl(decl) => decl,
        _ => panic!("expected a declaration"),
    }
}

#[test]
fn test_loop_roles() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let outer = b.outer("o", 2, vec![]);
    let inner = b.inner("i", 2, vec![]);
    let plain = b.plain_for("k", 2, vec![]);

    assert_eq!(classify_loop(as_for(&outer), &registry), Ok(LoopRole::Outer));
    assert_eq!(classify_loop(as_for(&inner), &registry), Ok(LoopRole::Inner));
    assert_eq!(classify_loop(as_for(&plain), &registry), Ok(LoopRole::None));
    assert!(!LoopRole::None.is_attributed());
    assert_eq!(LoopRole::Inner.as_str(), "inner");
}

#[test]
fn test_declaration_roles() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let shared = b.shared("s", vec![b.int(16)]);
    let exclusive = b.exclusive("e");
    let local = b.var(CType::int(), "n", Some(b.int(1)));

    assert_eq!(classify_declaration(as_decl(&shared), &registry), Ok(DeclRole::Shared));
    assert_eq!(classify_declaration(as_decl(&exclusive), &registry), Ok(DeclRole::Exclusive));
    assert_eq!(classify_declaration(as_decl(&local), &registry), Ok(DeclRole::None));
}

#[test]
fn test_kernel_marker() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    assert_eq!(classify_function(&b.kernel("k", vec![]), &registry), Ok(true));
    assert_eq!(classify_function(&b.function("f", vec![], vec![]), &registry), Ok(false));
}

#[test]
fn test_builtin_on_wrong_node_is_unknown() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    let attr = b.attr(AttrKind::Outer);
    let decl = b.declaration(
        CType::int(),
        vec![b.declarator("x", vec![], None)],
        vec![attr],
    );
    assert_eq!(
        classify_declaration(&decl, &registry),
        Err(vec![KernelProblem::UnknownAttribute {
            span: attr.span,
            attr: AttrKind::Outer,
            target: AttrTarget::Declaration,
        }])
    );
}

#[test]
fn test_two_role_markers_are_duplicate() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let registry = AttributeRegistry::new();

    for second in [AttrKind::Outer, AttrKind::Inner] {
        let first = b.attr(AttrKind::Outer);
        let second = b.attr(second);
        let stmt = b.canonical_for("o", b.int(2), vec![first, second], vec![]);
        assert_eq!(
            classify_loop(as_for(&stmt), &registry),
            Err(vec![KernelProblem::DuplicateAttribute {
                span: second.span,
                attr: second.kind,
                first_span: first.span,
            }])
        );
    }

    let shared = b.attr(AttrKind::Shared);
    let exclusive = b.attr(AttrKind::Exclusive);
    let decl = b.declaration(
        CType::int(),
        vec![b.declarator("x", vec![], None)],
        vec![shared, exclusive],
    );
    assert_eq!(
        classify_declaration(&decl, &registry),
        Err(vec![KernelProblem::DuplicateAttribute {
            span: exclusive.span,
            attr: AttrKind::Exclusive,
            first_span: shared.span,
        }])
    );
}

#[test]
fn test_custom_markers() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let mut registry = AttributeRegistry::new();
    registry.register_str(&interner, "tile", AttrTargets::LOOP);

    let tile = b.attr_named("tile");
    let stmt = b.canonical_for("o", b.int(2), vec![tile, b.attr(AttrKind::Outer)], vec![]);
    assert_eq!(classify_loop(as_for(&stmt), &registry), Ok(LoopRole::Outer));

    let unregistered = b.attr_named("unroll");
    let stmt = b.canonical_for("o", b.int(2), vec![unregistered], vec![]);
    assert_eq!(
        classify_loop(as_for(&stmt), &registry),
        Err(vec![KernelProblem::UnknownAttribute {
            span: unregistered.span,
            attr: unregistered.kind,
            target: AttrTarget::Loop,
        }])
    );

    // registered, but for loops only
    let decl = b.declaration(
        CType::int(),
        vec![b.declarator("x", vec![], None)],
        vec![tile],
    );
    assert!(classify_declaration(&decl, &registry).is_err());
}

#[test]
fn test_stage_walks_nested_nodes() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let bad_init = b.declaration(
        CType::int(),
        vec![b.declarator("i", vec![], Some(b.int(0)))],
        vec![b.attr(AttrKind::Inner)],
    );
    let header_decl = b.for_loop(
        Some(ForInit::Decl(bad_init)),
        Some(b.lt("i", b.int(2))),
        Some(b.pre_inc("i")),
        vec![b.attr(AttrKind::Inner)],
        vec![],
    );
    let bad_loop = b.canonical_for("k", b.int(2), vec![b.attr(AttrKind::Shared)], vec![]);
    let kernel = b.kernel(
        "k",
        vec![b.outer("o", 2, vec![b.if_stmt(b.int(1), vec![header_decl], None), bad_loop])],
    );

    let problems = run_stage(check_attributes, &kernel, &interner, CheckMode::CollectAll);
    let targets: Vec<_> = problems
        .iter()
        .map(|p| match p {
            KernelProblem::UnknownAttribute { attr, target, .. } => (*attr, *target),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        targets,
        vec![
            (AttrKind::Inner, AttrTarget::Declaration),
            (AttrKind::Shared, AttrTarget::Loop),
        ]
    );

    let fast = run_stage(check_attributes, &kernel, &interner, CheckMode::Fast);
    assert_eq!(fast.len(), 1);
}

#[test]
fn test_kernel_markers_checked() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);

    let kernel = b.function(
        "k",
        vec![b.attr(AttrKind::Kernel), b.attr(AttrKind::Kernel)],
        vec![],
    );
    let problems = run_stage(check_attributes, &kernel, &interner, CheckMode::CollectAll);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].rule_name(), "DuplicateAttribute");
}
