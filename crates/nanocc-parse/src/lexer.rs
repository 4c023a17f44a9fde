use crate::token::{Tok, TokKind};
use nanocc_ast::diag::{DiagKind, DiagResult, Diagnostic};
use nanocc_ast::span::Span;

/// Lex the whole source into a flat token vector terminated by exactly one
/// `Eof` token sitting at `src.len()` with an empty span.
pub fn tokenize(src: &str) -> DiagResult<Vec<Tok>> {
    let mut lex = Lexer::new(src);
    let mut toks = Vec::new();
    loop {
        let tok = lex.next_tok()?;
        let done = tok.kind == TokKind::Eof;
        toks.push(tok);
        if done {
            return Ok(toks);
        }
    }
}

pub struct Lexer<'a> {
    text: &'a str,
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            text: src,
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        if self.pos >= self.src.len() {
            None
        } else {
            let b = self.src[self.pos];
            self.pos += 1;
            Some(b)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    pub fn next_tok(&mut self) -> DiagResult<Tok> {
        self.skip_ws();
        let start = self.pos;
        let Some(b) = self.bump() else {
            return Ok(Tok {
                kind: TokKind::Eof,
                span: Span::new(self.pos, self.pos),
            });
        };
        let c = b as char;

        // 2-char operators before their 1-char prefixes, otherwise `<=`
        // would scan as `<` `=`.
        if c == '=' && self.peek() == Some(b'=') {
            self.bump();
            return Ok(Tok {
                kind: TokKind::EqEq,
                span: self.span(start),
            });
        }
        if c == '!' && self.peek() == Some(b'=') {
            self.bump();
            return Ok(Tok {
                kind: TokKind::BangEq,
                span: self.span(start),
            });
        }
        if c == '<' && self.peek() == Some(b'=') {
            self.bump();
            return Ok(Tok {
                kind: TokKind::Le,
                span: self.span(start),
            });
        }
        if c == '>' && self.peek() == Some(b'=') {
            self.bump();
            return Ok(Tok {
                kind: TokKind::Ge,
                span: self.span(start),
            });
        }

        let single = match c {
            '(' => Some(TokKind::LParen),
            ')' => Some(TokKind::RParen),
            ';' => Some(TokKind::Semicolon),
            '+' => Some(TokKind::Plus),
            '-' => Some(TokKind::Minus),
            '*' => Some(TokKind::Star),
            '/' => Some(TokKind::Slash),
            '=' => Some(TokKind::Eq),
            '<' => Some(TokKind::Lt),
            '>' => Some(TokKind::Gt),
            _ => None,
        };
        if let Some(kind) = single {
            return Ok(Tok {
                kind,
                span: self.span(start),
            });
        }

        // number: maximal digit run
        if c.is_ascii_digit() {
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.bump();
            }
            let digits = &self.text[start..self.pos];
            // Overflowing i64 is a hard error rather than a silent wrap.
            let value = digits.parse::<i64>().map_err(|_| {
                Diagnostic::at(
                    DiagKind::InvalidToken,
                    self.text,
                    start,
                    "number literal out of range",
                )
            })?;
            return Ok(Tok {
                kind: TokKind::Num(value),
                span: self.span(start),
            });
        }

        // variables are exactly one lowercase letter
        if c.is_ascii_lowercase() {
            return Ok(Tok {
                kind: TokKind::Ident(c),
                span: self.span(start),
            });
        }

        Err(Diagnostic::at(
            DiagKind::InvalidToken,
            self.text,
            start,
            "invalid token",
        ))
    }
}
