//! Three-address code generation
//!
//! Lowers a semantically validated AST into a linear instruction list. Each
//! line is one of:
//!
//! ```text
//! <name> = <operand>
//! <temp> = <operand> <op> <operand>
//! print <operand>
//! ```
//!
//! where an operand is a literal, an identifier, or a temporary `t<N>`.
//! Constants and variables are propagated verbatim without allocating a
//! temporary; unary minus lowers to the canonical `t = 0 - r` form; unary
//! plus forwards its operand untouched. Emission order is evaluation order:
//! the left operand is lowered before the right.
//!
//! The generator assumes the analyzer already accepted the program and
//! performs no re-validation; the exhaustive matches over the closed
//! `Expr`/`Stmt` sets leave no room for an unknown node to slip through.

use crate::parser::ast::{Expr, Program, Stmt, UnOp};

/// TAC generator. One instance per compilation; temporaries are numbered
/// `t1, t2, …` from a counter that starts fresh with the generator and is
/// never reused within one run.
#[derive(Debug, Default)]
pub struct TacGenerator {
    code: Vec<String>,
    temp_counter: usize,
}

impl TacGenerator {
    pub fn new() -> Self {
        TacGenerator::default()
    }

    /// Lower the whole program, consuming the generator.
    pub fn generate(mut self, program: &Program) -> Vec<String> {
        for stmt in &program.stmts {
            match stmt {
                // declarations reserve a name but compute nothing
                Stmt::Declaration { .. } => {}
                Stmt::Assignment { name, rhs, .. } => {
                    let result = self.lower_expr(rhs);
                    self.code.push(format!("{} = {}", name, result));
                }
                Stmt::Print { expr, .. } => {
                    let result = self.lower_expr(expr);
                    self.code.push(format!("print {}", result));
                }
            }
        }

        self.code
    }

    /// Lower one expression, returning the operand that names its value
    fn lower_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Number { text, .. } => text.clone(),
            Expr::Variable { name, .. } => name.clone(),
            Expr::UnaryOp { op, operand, .. } => {
                let result = self.lower_expr(operand);
                match op {
                    // unary plus is a no-op: no temporary, no instruction
                    UnOp::Plus => result,
                    UnOp::Neg => {
                        let temp = self.new_temp();
                        self.code.push(format!("{} = 0 - {}", temp, result));
                        temp
                    }
                }
            }
            Expr::BinaryOp {
                op, left, right, ..
            } => {
                let l = self.lower_expr(left);
                let r = self.lower_expr(right);
                let temp = self.new_temp();
                self.code.push(format!("{} = {} {} {}", temp, l, op, r));
                temp
            }
        }
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }
}
