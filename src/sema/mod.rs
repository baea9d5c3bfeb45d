//! Semantic analysis: declare-before-use checking over one flat scope
//!
//! A single forward pass over the statement sequence, in source order,
//! builds the [`SymbolTable`] and rejects the three ways a name can be
//! misused: declaring it twice, assigning to it before declaration, and
//! reading it before declaration. The first violation aborts the pass.
//!
//! With only one type in the language no type mismatch is possible, so the
//! pass carries no type environment beyond the table itself. The AST is
//! read, never mutated; on success every name the TAC generator will meet
//! is guaranteed declared.

pub mod symbols;

use crate::parser::ast::{Expr, Program, SourceLocation, Stmt};
use std::fmt;

pub use symbols::{Symbol, SymbolTable, SymbolType};

/// Semantic errors. All are fatal; analysis halts at the first one.
#[derive(Debug, Clone)]
pub enum SemanticError {
    /// Same name declared twice, anywhere in the program
    DuplicateDeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Assignment target was never declared
    AssignmentToUndeclared {
        name: String,
        location: SourceLocation,
    },

    /// Variable read in an expression before its declaration
    UseBeforeDeclaration {
        name: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            SemanticError::DuplicateDeclaration { location, .. } => location,
            SemanticError::AssignmentToUndeclared { location, .. } => location,
            SemanticError::UseBeforeDeclaration { location, .. } => location,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::DuplicateDeclaration { name, location } => {
                write!(
                    f,
                    "Semantic error at {}:{} near '{}': Duplicate declaration of '{}'.",
                    location.line, location.column, name, name
                )
            }
            SemanticError::AssignmentToUndeclared { name, location } => {
                write!(
                    f,
                    "Semantic error at {}:{} near '{}': Assignment to undeclared variable '{}'.",
                    location.line, location.column, name, name
                )
            }
            SemanticError::UseBeforeDeclaration { name, location } => {
                write!(
                    f,
                    "Semantic error at {}:{} near '{}': Variable '{}' used before declaration.",
                    location.line, location.column, name, name
                )
            }
        }
    }
}

impl std::error::Error for SemanticError {}

/// Single-pass semantic analyzer. One instance per compilation.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    table: SymbolTable,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer::default()
    }

    /// Validate the program and return the populated symbol table.
    ///
    /// Consumes the analyzer: the table's lifetime is exactly one
    /// compilation.
    pub fn analyze(mut self, program: &Program) -> Result<SymbolTable, SemanticError> {
        for stmt in &program.stmts {
            match stmt {
                Stmt::Declaration { name, location } => {
                    if self.table.contains(name) {
                        return Err(SemanticError::DuplicateDeclaration {
                            name: name.clone(),
                            location: *location,
                        });
                    }
                    self.table.insert(name, SymbolType::Int);
                }
                Stmt::Assignment {
                    name,
                    rhs,
                    location,
                } => {
                    if !self.table.contains(name) {
                        return Err(SemanticError::AssignmentToUndeclared {
                            name: name.clone(),
                            location: *location,
                        });
                    }
                    self.check_expr(rhs)?;
                }
                Stmt::Print { expr, .. } => {
                    self.check_expr(expr)?;
                }
            }
        }

        Ok(self.table)
    }

    fn check_expr(&self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::Number { .. } => Ok(()),
            Expr::Variable { name, location } => {
                if self.table.contains(name) {
                    Ok(())
                } else {
                    Err(SemanticError::UseBeforeDeclaration {
                        name: name.clone(),
                        location: *location,
                    })
                }
            }
            Expr::UnaryOp { operand, .. } => self.check_expr(operand),
            Expr::BinaryOp { left, right, .. } => {
                self.check_expr(left)?;
                self.check_expr(right)
            }
        }
    }
}
