use nanocc_ast::ast::{BinOp, Expr, Stmt};
use nanocc_parse::parse_str;

fn expr_of(src: &str) -> Expr {
    let program = parse_str(&format!("{src};")).expect("parse ok");
    let Stmt::Expr { expr, .. } = program.stmts.into_iter().next().expect("one statement");
    expr
}

#[test]
fn binary_span_covers_both_operands() {
    let e = expr_of("12 + 3");
    assert_eq!((e.span().start, e.span().end), (0, 6));
}

#[test]
fn desugared_comparison_keeps_the_source_span() {
    // operands swap, the span does not
    let e = expr_of("1>2");
    assert_eq!((e.span().start, e.span().end), (0, 3));
    if let Expr::Binary {
        op: BinOp::Lt,
        lhs,
        rhs,
        ..
    } = e
    {
        assert_eq!((lhs.span().start, lhs.span().end), (2, 3));
        assert_eq!((rhs.span().start, rhs.span().end), (0, 1));
    } else {
        panic!("`>` should become Lt");
    }
}

#[test]
fn unary_span_starts_at_the_operator() {
    let e = expr_of("-5");
    assert_eq!((e.span().start, e.span().end), (0, 2));
}

#[test]
fn assignment_span_runs_target_to_value() {
    let e = expr_of("a = 4+1");
    assert_eq!((e.span().start, e.span().end), (0, 7));
}
