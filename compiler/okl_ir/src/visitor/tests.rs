use super::*;
use crate::{AstBuilder, StringInterner};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Counts {
    loops: usize,
    decls: usize,
    idents: Vec<Name>,
}

impl<'ast> Visitor<'ast> for Counts {
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        self.loops += 1;
        walk_for(self, for_loop);
    }

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        self.decls += 1;
        walk_declaration(self, decl);
    }

    fn visit_ident(&mut self, name: Name, _span: Span) {
        self.idents.push(name);
    }
}

#[test]
fn test_walks_nested_loops() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let kernel = b.kernel(
        "k",
        vec![b.outer(
            "o",
            4,
            vec![
                b.shared("s", vec![b.int(8)]),
                b.inner("i", 8, vec![b.expr_stmt(b.ident("x"))]),
            ],
        )],
    );
    let module = b.module(vec![kernel]);

    let mut counts = Counts::default();
    counts.visit_module(&module);

    assert_eq!(counts.loops, 2);
    // two induction declarations plus the shared array
    assert_eq!(counts.decls, 3);
    let names: Vec<_> = counts.idents.iter().map(|n| interner.lookup(*n)).collect();
    assert_eq!(names, vec!["o", "o", "i", "i", "x"]);
}

#[test]
fn test_walks_all_statement_forms() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let body = vec![
        b.while_loop(b.ident("a"), vec![b.break_stmt()]),
        b.do_while(vec![b.continue_stmt()], b.ident("b")),
        b.if_stmt(b.ident("c"), vec![b.return_stmt(Some(b.ident("d")))], Some(vec![])),
        b.switch_stmt(b.ident("e"), vec![b.case(Some(b.ident("f"))), b.case(None)]),
    ];
    let module = b.module(vec![b.function("f", Vec::new(), body)]);

    let mut counts = Counts::default();
    counts.visit_module(&module);

    let names: Vec<_> = counts.idents.iter().map(|n| interner.lookup(*n)).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e", "f"]);
}
