pub mod span {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }

    impl Span {
        pub fn new(start: usize, end: usize) -> Self {
            Self {
                start: start as u32,
                end: end as u32,
            }
        }

        pub fn len(&self) -> u32 {
            self.end - self.start
        }

        pub fn is_empty(&self) -> bool {
            self.start == self.end
        }
    }
}

pub mod ast {
    use super::span::Span;
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    pub struct Program {
        pub stmts: Vec<Stmt>,
        pub span: Span,
    }

    /// Statements chain flat at the top level; there are no nested blocks.
    #[derive(Debug, Clone, Serialize)]
    pub enum Stmt {
        Expr { expr: Expr, span: Span },
    }

    impl Stmt {
        pub fn span(&self) -> Span {
            match self {
                Stmt::Expr { span, .. } => *span,
            }
        }
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Expr {
        Num(i64, Span),
        Var {
            name: char,
            span: Span,
        },
        Unary {
            op: UnOp,
            expr: Box<Expr>,
            span: Span,
        },
        Binary {
            lhs: Box<Expr>,
            op: BinOp,
            rhs: Box<Expr>,
            span: Span,
        },
        /// `target` must be a `Var`; the parser enforces this before the
        /// tree ever reaches the code generator.
        Assign {
            target: Box<Expr>,
            value: Box<Expr>,
            span: Span,
        },
    }

    impl Expr {
        pub fn span(&self) -> Span {
            match self {
                Expr::Num(_, sp) => *sp,
                Expr::Var { span, .. } => *span,
                Expr::Unary { span, .. } => *span,
                Expr::Binary { span, .. } => *span,
                Expr::Assign { span, .. } => *span,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum UnOp {
        Neg,
    }

    /// `>` and `>=` never appear here: the parser rewrites them into `Lt`
    /// and `Le` with swapped operands, which halves the comparison cases
    /// the code generator has to lower.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum BinOp {
        // equality
        Eq,
        Ne,
        // relational
        Lt,
        Le,
        // arithmetic
        Add,
        Sub,
        Mul,
        Div,
    }
}

pub mod diag {
    use thiserror::Error;

    pub type DiagResult<T> = Result<T, Diagnostic>;

    /// Classification of everything that can go wrong between source text
    /// and assembly. Compilation stops at the first one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DiagKind {
        /// Unrecognized character (or unparsable number) while scanning.
        InvalidToken,
        /// A specific punctuator was required and absent.
        ExpectedToken,
        /// A primary expression was required and absent.
        ExpectedExpression,
        /// A numeric literal token was required and absent.
        ExpectedNumber,
        /// Assignment target is not a variable.
        NotAnLvalue,
        /// The code generator met a construct it has no lowering for.
        InvalidConstruct,
    }

    /// A fatal, position-anchored compile error.
    ///
    /// `At` renders the two-line report the driver prints verbatim: the
    /// source line, then a caret under the offending offset followed by
    /// the message. `Plain` is for stages that never see the source text.
    #[derive(Debug, Clone, Error)]
    pub enum Diagnostic {
        #[error("{source_line}\n{marker} {message}")]
        At {
            kind: DiagKind,
            source_line: String,
            marker: String,
            message: String,
            loc: usize,
        },
        #[error("{message}")]
        Plain { kind: DiagKind, message: String },
    }

    impl Diagnostic {
        /// Anchor an error at a byte offset of the source. The offset is
        /// clamped to the source length; the caret column is counted in
        /// characters so it stays aligned past multi-byte input.
        pub fn at(kind: DiagKind, src: &str, loc: usize, message: impl Into<String>) -> Self {
            let loc = loc.min(src.len());
            let col = src[..loc].chars().count();
            let marker = format!("{}^", " ".repeat(col));
            Diagnostic::At {
                kind,
                source_line: src.to_string(),
                marker,
                message: message.into(),
                loc,
            }
        }

        pub fn plain(kind: DiagKind, message: impl Into<String>) -> Self {
            Diagnostic::Plain {
                kind,
                message: message.into(),
            }
        }

        pub fn kind(&self) -> DiagKind {
            match self {
                Diagnostic::At { kind, .. } | Diagnostic::Plain { kind, .. } => *kind,
            }
        }

        /// Byte offset the error is anchored at, when it has one.
        pub fn loc(&self) -> Option<usize> {
            match self {
                Diagnostic::At { loc, .. } => Some(*loc),
                Diagnostic::Plain { .. } => None,
            }
        }
    }
}
