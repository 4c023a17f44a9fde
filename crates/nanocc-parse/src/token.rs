use nanocc_ast::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    Eof,
    // punctuation
    LParen,
    RParen,
    Semicolon,
    // assignment
    Eq,
    // arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    // equality
    EqEq,
    BangEq,
    // relational
    Lt,
    Le,
    Gt,
    Ge,
    // single-letter variable a..z
    Ident(char),
    // literal
    Num(i64),
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokKind::Eof => "end of input",
            TokKind::LParen => "(",
            TokKind::RParen => ")",
            TokKind::Semicolon => ";",
            TokKind::Eq => "=",
            TokKind::Plus => "+",
            TokKind::Minus => "-",
            TokKind::Star => "*",
            TokKind::Slash => "/",
            TokKind::EqEq => "==",
            TokKind::BangEq => "!=",
            TokKind::Lt => "<",
            TokKind::Le => "<=",
            TokKind::Gt => ">",
            TokKind::Ge => ">=",
            TokKind::Ident(_) => "identifier",
            TokKind::Num(_) => "number",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
}
