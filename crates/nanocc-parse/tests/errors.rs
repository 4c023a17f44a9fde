use nanocc_ast::diag::DiagKind;
use nanocc_parse::parse_str;

#[test]
fn dangling_operator_wants_an_expression() {
    let err = parse_str("1+").unwrap_err();
    assert_eq!(err.kind(), DiagKind::ExpectedExpression);
    assert_eq!(err.loc(), Some(2));
    assert_eq!(err.to_string(), "1+\n  ^ expected an expression");
}

#[test]
fn unclosed_paren_wants_the_closer() {
    let err = parse_str("(1+2").unwrap_err();
    assert_eq!(err.kind(), DiagKind::ExpectedToken);
    assert_eq!(err.to_string(), "(1+2\n    ^ expected ')'");
}

#[test]
fn missing_semicolon_is_an_error() {
    let err = parse_str("1+2").unwrap_err();
    assert_eq!(err.kind(), DiagKind::ExpectedToken);
    assert_eq!(err.to_string(), "1+2\n   ^ expected ';'");
}

#[test]
fn invalid_token_surfaces_through_parse() {
    let err = parse_str("1 $ 2;").unwrap_err();
    assert_eq!(err.kind(), DiagKind::InvalidToken);
    assert_eq!(err.loc(), Some(2));
}

#[test]
fn literal_is_not_an_assignment_target() {
    let err = parse_str("1=2;").unwrap_err();
    assert_eq!(err.kind(), DiagKind::NotAnLvalue);
    assert_eq!(err.loc(), Some(0));
    assert_eq!(err.to_string(), "1=2;\n^ not an lvalue");
}

#[test]
fn compound_expression_is_not_an_assignment_target() {
    let err = parse_str("a+b=1;").unwrap_err();
    assert_eq!(err.kind(), DiagKind::NotAnLvalue);
    assert_eq!(err.loc(), Some(0));
}

#[test]
fn junk_after_a_statement_is_rejected() {
    // the second statement is parsed and then misses its semicolon
    let err = parse_str("1+2; 3").unwrap_err();
    assert_eq!(err.kind(), DiagKind::ExpectedToken);
    assert_eq!(err.loc(), Some(6));
}
