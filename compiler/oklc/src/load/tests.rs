use super::*;
use okl_ir::{AttrKind, BaseType, ExprKind, ForInit, StmtKind, UnaryOp};
use pretty_assertions::assert_eq;

const KERNEL: &str = r#"{
  "functions": [{
    "name": "scale",
    "attrs": [{ "name": "kernel", "span": [0, 7] }],
    "params": [
      { "name": "n", "type": { "base": "int", "const": true } },
      { "name": "data", "type": { "base": "float", "pointer": 1 } }
    ],
    "body": { "stmts": [
      { "kind": "for", "span": [40, 200],
        "attrs": [{ "name": "@outer", "span": [40, 46] }],
        "init": { "kind": "decl", "type": { "base": "size_t" }, "span": [52, 62],
                  "declarators": [{ "name": "o", "init": { "kind": "int", "value": 0 } }] },
        "test": { "kind": "binary", "op": "<",
                  "lhs": { "kind": "ident", "name": "o" },
                  "rhs": { "kind": "ident", "name": "n" } },
        "update": { "kind": "unary", "op": "x++", "operand": { "kind": "ident", "name": "o" } },
        "body": { "kind": "block", "stmts": [
          { "kind": "decl", "span": [80, 100], "type": { "base": "float" },
            "attrs": [{ "name": "shared" }],
            "declarators": [{ "name": "tile", "dims": [{ "kind": "int", "value": 16 }] }] },
          { "kind": "break", "span": [110, 116] }
        ] } }
    ] }
  }]
}"#;

#[test]
fn test_parse_kernel() {
    let interner = StringInterner::new();
    let module = match parse_module(KERNEL, Path::new("scale.json"), &interner) {
        Ok(module) => module,
        Err(err) => panic!("load failed: {err}"),
    };
    assert_eq!(module.functions.len(), 1);

    let kernel = &module.functions[0];
    assert_eq!(interner.lookup(kernel.name), "scale");
    assert!(kernel.is_kernel());
    assert_eq!(kernel.params.len(), 2);
    assert!(kernel.params[0].ty.is_const);
    assert_eq!(kernel.params[1].ty.pointer_depth, 1);

    let Some(for_loop) = kernel.body.stmts[0].as_for() else {
        panic!("expected a for loop");
    };
    assert_eq!(for_loop.span, Span::new(40, 200));
    assert_eq!(for_loop.attrs[0].kind, AttrKind::Outer);
    assert_eq!(for_loop.induction_var(), Some(interner.intern("o")));

    let Some(ForInit::Decl(init)) = &for_loop.init else {
        panic!("expected a declaration init");
    };
    assert_eq!(init.span, Span::new(52, 62));
    assert_eq!(init.ty.base, BaseType::Named(interner.intern("size_t")));
    assert!(init.ty.is_integral(&interner));

    let Some(ExprKind::Unary { op, .. }) = for_loop.update.as_ref().map(|e| &e.kind) else {
        panic!("expected an increment");
    };
    assert_eq!(*op, UnaryOp::PostInc);

    let body = for_loop.body.body_stmts();
    let StmtKind::Decl(shared) = &body[0].kind else {
        panic!("expected a declaration");
    };
    assert_eq!(shared.span, Span::new(80, 100));
    assert_eq!(shared.attrs[0].kind, AttrKind::Shared);
    assert_eq!(shared.declarators[0].dims[0].kind, ExprKind::Int(16));
    assert_eq!(body[1].kind, StmtKind::Break);
    assert_eq!(body[1].span, Span::new(110, 116));
}

#[test]
fn test_custom_attribute_names() {
    let interner = StringInterner::new();
    let text = r#"{ "functions": [{ "name": "f", "attrs": [{ "name": "@dim" }], "body": {} }] }"#;
    let module = match parse_module(text, Path::new("f.json"), &interner) {
        Ok(module) => module,
        Err(err) => panic!("load failed: {err}"),
    };
    assert_eq!(
        module.functions[0].attrs[0].kind,
        AttrKind::Custom(interner.intern("dim"))
    );
}

#[test]
fn test_inverted_span_is_rejected() {
    let interner = StringInterner::new();
    let text = r#"{ "functions": [{ "name": "f", "body": {}, "span": [9, 3] }] }"#;
    let err = parse_module(text, Path::new("f.json"), &interner).err();
    assert!(
        matches!(err, Some(LoadError::Span(SpanError::Inverted { start: 9, end: 3 }))),
        "{err:?}"
    );
}

#[test]
fn test_empty_names_are_rejected() {
    let interner = StringInterner::new();
    let text = r#"{ "functions": [{ "name": "", "body": {} }] }"#;
    let err = parse_module(text, Path::new("f.json"), &interner).err();
    assert!(
        matches!(err, Some(LoadError::EmptyName { what: "function", .. })),
        "{err:?}"
    );
}

#[test]
fn test_malformed_json_names_the_file() {
    let interner = StringInterner::new();
    let err = parse_module("{ not json", Path::new("broken.json"), &interner).err();
    let Some(err @ LoadError::Json { .. }) = err else {
        panic!("expected a JSON error, got {err:?}");
    };
    assert!(err.to_string().starts_with("`broken.json` is not a valid AST"));
}

#[test]
fn test_unknown_operator_is_rejected() {
    let interner = StringInterner::new();
    let text = r#"{ "functions": [{ "name": "f", "body": { "stmts": [
        { "kind": "expr", "expr": { "kind": "binary", "op": "<=>",
          "lhs": { "kind": "int", "value": 1 }, "rhs": { "kind": "int", "value": 2 } } }
    ] } }] }"#;
    let err = parse_module(text, Path::new("f.json"), &interner).err();
    assert!(matches!(err, Some(LoadError::Json { .. })), "{err:?}");
}

#[test]
fn test_missing_file() {
    let interner = StringInterner::new();
    let err = load_module(Path::new("/nonexistent/kernel.json"), &interner).err();
    assert!(matches!(err, Some(LoadError::Io { .. })), "{err:?}");
}
