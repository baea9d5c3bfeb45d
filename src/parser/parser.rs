//! Recursive descent parser for the mini-language
//!
//! Consumes the token stream produced by the lexer and builds the AST
//! directly, with no intermediate parse tree. Binary operators use a
//! two-level precedence ladder (`*` `/` bind tighter than `+` `-`, both
//! left-associative); unary `+`/`-` bind tighter still.
//!
//! # Grammar
//!
//! ```text
//! program     ::= (declaration | statement)* EOF
//! declaration ::= 'int' IDENT ';'
//! statement   ::= assignment ';' | print ';'
//! assignment  ::= IDENT '=' expression
//! print       ::= 'print' expression
//! expression  ::= term (('+' | '-') term)*
//! term        ::= unary (('*' | '/') unary)*
//! unary       ::= ('+' | '-') unary | primary
//! primary     ::= NUMBER | IDENT | '(' expression ')'
//! ```
//!
//! The first token mismatch aborts the parse; there is no resynchronization,
//! so at most one diagnostic is produced per run. Nesting depth is bounded
//! only by the call stack.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at {}:{} near '{}': {}",
            self.location.line, self.location.column, self.lexeme, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a lexed token stream.
///
/// Borrows the tokens; the caller keeps the sequence for the token report.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program (declarations and statements, freely
    /// interleaved at top level)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            if self.check(TokenKind::KwInt) {
                program.stmts.push(self.parse_declaration()?);
            } else if self.check(TokenKind::Ident) || self.check(TokenKind::KwPrint) {
                program.stmts.push(self.parse_statement()?);
            } else {
                return Err(self.error_here(
                    "Expected 'int' declaration or a statement (assignment/print).",
                ));
            }
        }

        Ok(program)
    }

    /// Parse declaration: `int IDENT ;`
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::KwInt, "Expected 'int'.")?;
        let (name, location) = self.expect_identifier("Expected identifier after 'int'.")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after declaration.")?;

        Ok(Stmt::Declaration { name, location })
    }

    /// Parse a statement: assignment or print, each terminated by `;`
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.check(TokenKind::Ident) {
            let stmt = self.parse_assignment()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after assignment.")?;
            return Ok(stmt);
        }

        let stmt = self.parse_print()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after print.")?;
        Ok(stmt)
    }

    /// Parse assignment: `IDENT = expression`
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let (name, location) = self.expect_identifier("Expected identifier.")?;
        self.expect(TokenKind::Assign, "Expected '=' in assignment.")?;
        let rhs = self.parse_expression()?;

        Ok(Stmt::Assignment {
            name,
            rhs,
            location,
        })
    }

    /// Parse print statement: `print expression`
    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::KwPrint, "Expected 'print'.")?;
        let expr = self.parse_expression()?;

        Ok(Stmt::Print { expr, location })
    }

    /// Parse additive expression (+ -), left-associative
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let location = self.current_location();
            let op = if self.match_kind(TokenKind::Plus) {
                BinOp::Add
            } else if self.match_kind(TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative term (* /), left-associative
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let location = self.current_location();
            let op = if self.match_kind(TokenKind::Star) {
                BinOp::Mul
            } else if self.match_kind(TokenKind::Slash) {
                BinOp::Div
            } else {
                break;
            };

            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse unary (+ -), right-recursive so `--x` nests
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();

        if self.match_kind(TokenKind::Plus) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::UnaryOp {
                op: UnOp::Plus,
                operand,
                location,
            });
        }

        if self.match_kind(TokenKind::Minus) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::UnaryOp {
                op: UnOp::Neg,
                operand,
                location,
            });
        }

        self.parse_primary()
    }

    /// Parse primary: number, variable, or parenthesized expression
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();

        if self.check(TokenKind::Number) {
            let text = self.advance().lexeme.clone();
            return Ok(Expr::Number { text, location });
        }

        if self.check(TokenKind::Ident) {
            let name = self.advance().lexeme.clone();
            return Ok(Expr::Variable { name, location });
        }

        if self.match_kind(TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RParen, "Expected ')' to close '('.")?;
            return Ok(expr);
        }

        Err(self.error_here("Expected NUMBER, IDENTIFIER, or '(' expression ')'."))
    }

    // ===== Helper methods =====

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        &self.tokens[self.position - 1]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<(), ParseError> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<(String, SourceLocation), ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok((token.lexeme.clone(), token.location))
        } else {
            Err(self.error_here(message))
        }
    }

    /// Build a syntax error anchored at the current token
    fn error_here(&self, message: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            message: message.to_string(),
            lexeme: token.lexeme.clone(),
            location: token.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(&tokens).parse_program()
    }

    #[test]
    fn test_parse_declaration_and_statements() {
        let program = parse("int a; a = 5; print a;").unwrap();

        assert_eq!(program.stmts.len(), 3);
        assert!(matches!(&program.stmts[0], Stmt::Declaration { name, .. } if name == "a"));
        assert!(matches!(&program.stmts[1], Stmt::Assignment { name, .. } if name == "a"));
        assert!(matches!(&program.stmts[2], Stmt::Print { .. }));
    }

    #[test]
    fn test_declarations_interleave_with_statements() {
        let program = parse("int a; a = 1; int b; b = a;").unwrap();

        assert_eq!(program.stmts.len(), 4);
        assert!(matches!(&program.stmts[2], Stmt::Declaration { name, .. } if name == "b"));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let program = parse("x = 2 + 3 * 4;").unwrap();

        let Stmt::Assignment { rhs, .. } = &program.stmts[0] else {
            panic!("Expected assignment");
        };
        // the addition is the root; its right operand is the multiplication
        let Expr::BinaryOp {
            op: BinOp::Add,
            right,
            ..
        } = rhs
        else {
            panic!("Expected addition at the root");
        };
        assert!(matches!(**right, Expr::BinaryOp { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let program = parse("x = 2 - 3 - 4;").unwrap();

        let Stmt::Assignment { rhs, .. } = &program.stmts[0] else {
            panic!("Expected assignment");
        };
        // (2 - 3) - 4: the left operand of the root is itself a subtraction
        let Expr::BinaryOp {
            op: BinOp::Sub,
            left,
            ..
        } = rhs
        else {
            panic!("Expected subtraction at the root");
        };
        assert!(matches!(**left, Expr::BinaryOp { op: BinOp::Sub, .. }));
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let program = parse("x = (2 + 3) * 4;").unwrap();

        let Stmt::Assignment { rhs, .. } = &program.stmts[0] else {
            panic!("Expected assignment");
        };
        let Expr::BinaryOp {
            op: BinOp::Mul,
            left,
            ..
        } = rhs
        else {
            panic!("Expected multiplication at the root");
        };
        assert!(matches!(**left, Expr::BinaryOp { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_unary_nests() {
        let program = parse("x = --1;").unwrap();

        let Stmt::Assignment { rhs, .. } = &program.stmts[0] else {
            panic!("Expected assignment");
        };
        let Expr::UnaryOp {
            op: UnOp::Neg,
            operand,
            ..
        } = rhs
        else {
            panic!("Expected unary negation");
        };
        assert!(matches!(**operand, Expr::UnaryOp { op: UnOp::Neg, .. }));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int a").unwrap_err();

        assert_eq!(err.message, "Expected ';' after declaration.");
        assert_eq!(err.lexeme, "EOF");
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse("x = (1 + 2;").unwrap_err();

        assert_eq!(err.message, "Expected ')' to close '('.");
        assert_eq!(err.lexeme, ";");
    }

    #[test]
    fn test_stray_token_at_top_level() {
        let err = parse("int a; ; a = 1;").unwrap_err();

        assert_eq!(
            err.message,
            "Expected 'int' declaration or a statement (assignment/print)."
        );
        assert_eq!(err.lexeme, ";");
        assert_eq!(err.location, SourceLocation::new(1, 8));
    }

    #[test]
    fn test_error_display_format() {
        let err = parse("a = ;").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Syntax error at 1:5 near ';': Expected NUMBER, IDENTIFIER, or '(' expression ')'."
        );
    }
}
