// AST definitions for the mini-language front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        };
        write!(f, "{}", text)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus, // +x
    Neg,  // -x
}

/// Expression nodes.
///
/// Every composite node exclusively owns its operand subtree(s) through
/// `Box`, so the tree has no sharing and no cycles. Later passes match
/// exhaustively on this set; adding a variant is a compile error in every
/// pass until it is handled.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Integer literal, kept as its source text (the TAC phase propagates
    /// the lexeme verbatim, so nothing ever parses the value)
    Number {
        text: String,
        location: SourceLocation,
    },
    /// Reference to a declared variable
    Variable {
        name: String,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::Number { location, .. } => location,
            Expr::Variable { location, .. } => location,
            Expr::UnaryOp { location, .. } => location,
            Expr::BinaryOp { location, .. } => location,
        }
    }
}

/// Statement nodes
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `int name;`
    Declaration {
        name: String,
        location: SourceLocation,
    },
    /// `name = rhs;`
    Assignment {
        name: String,
        rhs: Expr,
        location: SourceLocation,
    },
    /// `print expr;`
    Print {
        expr: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Declaration { location, .. } => location,
            Stmt::Assignment { location, .. } => location,
            Stmt::Print { location, .. } => location,
        }
    }
}

/// Top-level program structure: an ordered statement sequence
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
