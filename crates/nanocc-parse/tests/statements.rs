use nanocc_ast::ast::{BinOp, Expr, Stmt};
use nanocc_parse::parse_str;

#[test]
fn statements_chain_in_source_order() {
    let program = parse_str("a=3; b=5; a+b;").expect("parse ok");
    assert_eq!(program.stmts.len(), 3);

    let Stmt::Expr { expr, .. } = &program.stmts[2];
    if let Expr::Binary {
        op: BinOp::Add,
        lhs,
        rhs,
        ..
    } = expr
    {
        assert!(matches!(**lhs, Expr::Var { name: 'a', .. }));
        assert!(matches!(**rhs, Expr::Var { name: 'b', .. }));
    } else {
        panic!("last statement should be a+b");
    }
}

#[test]
fn empty_program_has_no_statements() {
    let program = parse_str("").expect("parse ok");
    assert!(program.stmts.is_empty());
    assert!(parse_str("   ").expect("whitespace only").stmts.is_empty());
}

#[test]
fn statement_span_includes_the_semicolon() {
    let program = parse_str("1+2 ;").expect("parse ok");
    let span = program.stmts[0].span();
    assert_eq!((span.start, span.end), (0, 5));
}

#[test]
fn program_span_covers_the_source() {
    let program = parse_str("a=1; a;").expect("parse ok");
    assert_eq!((program.span.start, program.span.end), (0, 7));
}
