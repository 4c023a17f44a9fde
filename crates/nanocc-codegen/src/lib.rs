//! Lowers the parsed AST into AT&T-style x86-64 assembly.
//!
//! The emitter is a stack machine over a single accumulator: `%rax` holds
//! the value being computed, binary operators park their right operand on
//! the hardware stack and pop it into `%rdi`. Locals live in a fixed frame
//! below `%rbp`, one eight-byte slot per letter `a..z`.

#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

use nanocc_ast::ast::{BinOp, Expr, Program, Stmt, UnOp};
use nanocc_ast::diag::{DiagKind, DiagResult, Diagnostic};

/// Room for all 26 single-letter variables, kept 16-byte aligned for the
/// System V ABI. 26 * 8 = 208 is already a multiple of 16.
const FRAME_SIZE: usize = align_to(26 * 8, 16);

const fn align_to(n: usize, align: usize) -> usize {
    (n + align - 1) / align * align
}

/// Frame offset of a variable slot, counted down from `%rbp`.
fn var_offset(name: char) -> usize {
    (name as usize - 'a' as usize + 1) * 8
}

/// Emit a complete `main` routine for the program. The return value of the
/// last statement is the routine's return value in `%rax`.
pub fn generate(program: &Program) -> DiagResult<String> {
    let mut cg = Codegen::new();

    cg.line("  .globl main");
    cg.line("main:");
    // prologue
    cg.line("  push %rbp");
    cg.line("  mov %rsp, %rbp");
    cg.line(&format!("  sub ${FRAME_SIZE}, %rsp"));

    for stmt in &program.stmts {
        cg.stmt(stmt)?;
    }

    // epilogue
    cg.line("  mov %rbp, %rsp");
    cg.line("  pop %rbp");
    cg.line("  ret");

    Ok(cg.asm)
}

struct Codegen {
    asm: String,
    /// Count of values parked on the hardware stack. Every statement must
    /// bring this back to zero; an imbalance is a bug in the emitter, not
    /// in the user's program.
    depth: i64,
}

impl Codegen {
    fn new() -> Self {
        Self {
            asm: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, s: &str) {
        self.asm.push_str(s);
        self.asm.push('\n');
    }

    fn push(&mut self) {
        self.line("  push %rax");
        self.depth += 1;
    }

    fn pop(&mut self, reg: &str) {
        self.line(&format!("  pop {reg}"));
        self.depth -= 1;
    }

    fn stmt(&mut self, stmt: &Stmt) -> DiagResult<()> {
        let Stmt::Expr { expr, .. } = stmt;
        self.expr(expr)?;
        // statements are stack-neutral; the result stays in %rax and is
        // simply abandoned there
        assert_eq!(self.depth, 0, "operand stack unbalanced after statement");
        Ok(())
    }

    /// Post-order walk leaving the expression's value in `%rax`.
    fn expr(&mut self, node: &Expr) -> DiagResult<()> {
        match node {
            Expr::Num(value, _) => {
                self.line(&format!("  mov ${value}, %rax"));
            }
            Expr::Unary {
                op: UnOp::Neg,
                expr,
                ..
            } => {
                self.expr(expr)?;
                self.line("  neg %rax");
            }
            Expr::Var { .. } => {
                self.addr(node)?;
                self.line("  mov (%rax), %rax");
            }
            Expr::Assign { target, value, .. } => {
                self.addr(target)?;
                self.push();
                self.expr(value)?;
                self.pop("%rdi");
                // the assigned value stays in %rax as the expression result
                self.line("  mov %rax, (%rdi)");
            }
            Expr::Binary { lhs, op, rhs, .. } => {
                self.expr(rhs)?;
                self.push();
                self.expr(lhs)?;
                self.pop("%rdi");

                match op {
                    BinOp::Add => self.line("  add %rdi, %rax"),
                    BinOp::Sub => self.line("  sub %rdi, %rax"),
                    BinOp::Mul => self.line("  imul %rdi, %rax"),
                    BinOp::Div => {
                        // idiv truncates toward zero
                        self.line("  cqo");
                        self.line("  idiv %rdi");
                    }
                    BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le => {
                        self.line("  cmp %rdi, %rax");
                        let set = cond_code(*op)?;
                        self.line(&format!("  {set} %al"));
                        self.line("  movzb %al, %rax");
                    }
                }
            }
        }
        Ok(())
    }

    /// Leave the address of an lvalue in `%rax`.
    fn addr(&mut self, node: &Expr) -> DiagResult<()> {
        match node {
            Expr::Var { name, .. } => {
                let offset = var_offset(*name);
                self.line(&format!("  lea -{offset}(%rbp), %rax"));
                Ok(())
            }
            _ => Err(Diagnostic::plain(DiagKind::NotAnLvalue, "not an lvalue")),
        }
    }
}

/// Condition code that materializes a comparison as 0/1 in `%al`.
fn cond_code(op: BinOp) -> DiagResult<&'static str> {
    match op {
        BinOp::Eq => Ok("sete"),
        BinOp::Ne => Ok("setne"),
        BinOp::Lt => Ok("setl"),
        BinOp::Le => Ok("setle"),
        other => Err(Diagnostic::plain(
            DiagKind::InvalidConstruct,
            format!("operator {other:?} has no condition code"),
        )),
    }
}
