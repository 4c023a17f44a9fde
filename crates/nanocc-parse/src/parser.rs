use crate::lexer::tokenize;
use crate::token::{Tok, TokKind};
use nanocc_ast::ast::{BinOp, Expr, Program, Stmt, UnOp};
use nanocc_ast::diag::{DiagKind, DiagResult, Diagnostic};
use nanocc_ast::span::Span;

/// Parse a whole program. The grammar, loosest to tightest binding:
///
/// ```text
/// program    = statement*
/// statement  = expr ";"
/// expr       = assign
/// assign     = equality ("=" assign)?
/// equality   = relational (("==" | "!=") relational)*
/// relational = add (("<" | "<=" | ">" | ">=") add)*
/// add        = mul (("+" | "-") mul)*
/// mul        = unary (("*" | "/") unary)*
/// unary      = ("+" | "-") unary | primary
/// primary    = "(" expr ")" | identifier | number
/// ```
pub fn parse_str(src: &str) -> DiagResult<Program> {
    let toks = tokenize(src)?;
    let mut p = Parser { toks, pos: 0, src };
    p.parse_program()
}

struct Parser<'a> {
    toks: Vec<Tok>,
    pos: usize,
    src: &'a str,
}

impl<'a> Parser<'a> {
    /// The cursor never moves past the terminating `Eof`, so the current
    /// token always exists.
    fn cur(&self) -> &Tok {
        &self.toks[self.pos]
    }

    fn bump(&mut self) {
        if self.cur().kind != TokKind::Eof {
            self.pos += 1;
        }
    }

    fn at(&self, k: &TokKind) -> bool {
        std::mem::discriminant(&self.cur().kind) == std::mem::discriminant(k)
    }

    fn eat(&mut self, k: &TokKind) -> bool {
        if self.at(k) {
            self.bump();
            return true;
        }
        false
    }

    fn expect(&mut self, k: TokKind) -> DiagResult<Tok> {
        if self.at(&k) {
            let t = self.cur().clone();
            self.bump();
            Ok(t)
        } else {
            Err(self.error_at_cur(DiagKind::ExpectedToken, format!("expected '{k}'")))
        }
    }

    fn error_at_cur(&self, kind: DiagKind, message: impl Into<String>) -> Diagnostic {
        Diagnostic::at(kind, self.src, self.cur().span.start as usize, message)
    }

    // ======= statements =======

    fn parse_program(&mut self) -> DiagResult<Program> {
        let start = self.cur().span.start;
        let mut stmts = Vec::new();
        while !self.at(&TokKind::Eof) {
            stmts.push(self.stmt()?);
        }
        Ok(Program {
            stmts,
            span: Span {
                start,
                end: self.cur().span.end,
            },
        })
    }

    fn stmt(&mut self) -> DiagResult<Stmt> {
        self.expr_stmt()
    }

    // The only statement form is an expression followed by a semicolon.
    fn expr_stmt(&mut self) -> DiagResult<Stmt> {
        let expr = self.expr()?;
        let semi = self.expect(TokKind::Semicolon)?;
        let span = Span {
            start: expr.span().start,
            end: semi.span.end,
        };
        Ok(Stmt::Expr { expr, span })
    }

    // ======= expressions, one method per precedence level =======

    fn expr(&mut self) -> DiagResult<Expr> {
        self.assign()
    }

    fn assign(&mut self) -> DiagResult<Expr> {
        let node = self.equality()?;

        if self.eat(&TokKind::Eq) {
            // The target is checked here, not in codegen, so a bad store
            // never reaches lowering.
            if !matches!(node, Expr::Var { .. }) {
                return Err(Diagnostic::at(
                    DiagKind::NotAnLvalue,
                    self.src,
                    node.span().start as usize,
                    "not an lvalue",
                ));
            }
            // right-associative: a = b = 1 is a = (b = 1)
            let value = self.assign()?;
            let span = Span {
                start: node.span().start,
                end: value.span().end,
            };
            return Ok(Expr::Assign {
                target: Box::new(node),
                value: Box::new(value),
                span,
            });
        }

        Ok(node)
    }

    fn equality(&mut self) -> DiagResult<Expr> {
        let mut node = self.relational()?;

        loop {
            let op = match self.cur().kind {
                TokKind::EqEq => BinOp::Eq,
                TokKind::BangEq => BinOp::Ne,
                _ => break,
            };
            self.bump();
            let rhs = self.relational()?;
            let span = Span {
                start: node.span().start,
                end: rhs.span().end,
            };
            node = Expr::Binary {
                lhs: Box::new(node),
                op,
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(node)
    }

    fn relational(&mut self) -> DiagResult<Expr> {
        let mut node = self.add()?;

        loop {
            // `>` and `>=` lower through `<` / `<=` with the operands
            // swapped; the span still covers the source-order operands.
            let (op, swap) = match self.cur().kind {
                TokKind::Lt => (BinOp::Lt, false),
                TokKind::Le => (BinOp::Le, false),
                TokKind::Gt => (BinOp::Lt, true),
                TokKind::Ge => (BinOp::Le, true),
                _ => break,
            };
            self.bump();
            let rhs = self.add()?;
            let span = Span {
                start: node.span().start,
                end: rhs.span().end,
            };
            let (lhs, rhs) = if swap { (rhs, node) } else { (node, rhs) };
            node = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(node)
    }

    fn add(&mut self) -> DiagResult<Expr> {
        let mut node = self.mul()?;

        loop {
            let op = match self.cur().kind {
                TokKind::Plus => BinOp::Add,
                TokKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.mul()?;
            let span = Span {
                start: node.span().start,
                end: rhs.span().end,
            };
            node = Expr::Binary {
                lhs: Box::new(node),
                op,
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(node)
    }

    fn mul(&mut self) -> DiagResult<Expr> {
        let mut node = self.unary()?;

        loop {
            let op = match self.cur().kind {
                TokKind::Star => BinOp::Mul,
                TokKind::Slash => BinOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.unary()?;
            let span = Span {
                start: node.span().start,
                end: rhs.span().end,
            };
            node = Expr::Binary {
                lhs: Box::new(node),
                op,
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(node)
    }

    fn unary(&mut self) -> DiagResult<Expr> {
        // unary plus is the identity and leaves no node behind
        if self.eat(&TokKind::Plus) {
            return self.unary();
        }

        if self.at(&TokKind::Minus) {
            let start = self.cur().span.start;
            self.bump();
            let operand = self.unary()?;
            let span = Span {
                start,
                end: operand.span().end,
            };
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                expr: Box::new(operand),
                span,
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> DiagResult<Expr> {
        match self.cur().kind {
            TokKind::LParen => {
                self.bump();
                let node = self.expr()?;
                self.expect(TokKind::RParen)?;
                Ok(node)
            }
            TokKind::Ident(name) => {
                let span = self.cur().span;
                self.bump();
                Ok(Expr::Var { name, span })
            }
            TokKind::Num(_) => self.number(),
            _ => Err(self.error_at_cur(DiagKind::ExpectedExpression, "expected an expression")),
        }
    }

    /// Take the current token as a numeric literal.
    fn number(&mut self) -> DiagResult<Expr> {
        if let TokKind::Num(value) = self.cur().kind {
            let span = self.cur().span;
            self.bump();
            return Ok(Expr::Num(value, span));
        }
        Err(self.error_at_cur(DiagKind::ExpectedNumber, "expected a number"))
    }
}
