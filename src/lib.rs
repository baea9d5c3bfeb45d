//! # Introduction
//!
//! minicc is a four-phase compiler front end for a minimal imperative
//! language: `int` declarations, assignments, `print`, and arithmetic
//! expressions with unary/binary operators and parentheses. It produces a
//! token report, a validated symbol table, and a linear three-address-code
//! (TAC) listing.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Analysis → TAC → Report
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source text.
//! 2. [`parser::parser`] — builds the AST by recursive descent.
//! 3. [`sema`] — validates declare-before-use over one flat scope and
//!    builds the [`sema::SymbolTable`].
//! 4. [`tac`] — lowers the validated AST to three-address instructions.
//! 5. [`report`] — renders the three fixed-header output sections consumed
//!    by the hosting process.
//!
//! Each phase runs to completion or to the first error; there is no
//! recovery and at most one diagnostic per compilation. Every call to
//! [`compile`] constructs fresh phase state, so independent compilations
//! share nothing and may run concurrently without locking.

pub mod parser;
pub mod report;
pub mod sema;
pub mod tac;

use std::fmt;

use parser::lexer::{LexError, Lexer, Token};
use parser::parser::{ParseError, Parser};
use sema::{SemanticAnalyzer, SemanticError, SymbolTable};
use tac::TacGenerator;

/// Any fatal compiler error: exactly one of the three phase errors.
///
/// Each variant Displays as a single diagnostic line in the form
/// `<ErrorKind> at <line>:<col> near '<lexeme>': <message>`.
#[derive(Debug)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Semantic(SemanticError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(err) => err.fmt(f),
            CompileError::Parse(err) => err.fmt(f),
            CompileError::Semantic(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(err) => Some(err),
            CompileError::Parse(err) => Some(err),
            CompileError::Semantic(err) => Some(err),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> Self {
        CompileError::Semantic(err)
    }
}

/// Everything a successful compilation produces.
#[derive(Debug)]
pub struct CompileOutput {
    /// The full token sequence, end-of-input token included
    pub tokens: Vec<Token>,
    /// Declared variables, in first-declaration order
    pub symbols: SymbolTable,
    /// Three-address instructions in emission order
    pub tac: Vec<String>,
}

impl CompileOutput {
    /// Render the three report sections in their fixed order.
    pub fn render(&self) -> String {
        let mut out = report::render_tokens(&self.tokens);
        out.push_str(&report::render_symbol_table(&self.symbols));
        out.push_str(&report::render_tac(&self.tac));
        out
    }
}

/// Compile one source program.
///
/// Runs all four phases against freshly constructed state and returns the
/// token listing, symbol table, and TAC, or the first error any phase
/// raised.
pub fn compile(source: &str) -> Result<CompileOutput, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(&tokens).parse_program()?;
    let symbols = SemanticAnalyzer::new().analyze(&program)?;
    let tac = TacGenerator::new().generate(&program);

    Ok(CompileOutput {
        tokens,
        symbols,
        tac,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "int a;\nint b;\na = 5;\nb = a + 10 * (2 - 1);\nprint b;\n";

    #[test]
    fn test_reference_program_end_to_end() {
        let output = compile(REFERENCE).unwrap();

        let names: Vec<&str> = output
            .symbols
            .iter_in_order()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        assert_eq!(
            output.tac,
            vec![
                "a = 5",
                "t1 = 2 - 1",
                "t2 = 10 * t1",
                "t3 = a + t2",
                "b = t3",
                "print b",
            ]
        );
    }

    #[test]
    fn test_render_contains_all_three_headers_in_order() {
        let rendered = compile(REFERENCE).unwrap().render();

        let tokens_at = rendered.find(report::TOKENS_HEADER).unwrap();
        let symbols_at = rendered.find(report::SYMBOL_TABLE_HEADER).unwrap();
        let tac_at = rendered.find(report::TAC_HEADER).unwrap();
        assert!(tokens_at < symbols_at);
        assert!(symbols_at < tac_at);
    }

    #[test]
    fn test_lexical_error_kind() {
        let err = compile("1 $ 2").unwrap_err();

        assert!(matches!(err, CompileError::Lex(_)));
        assert_eq!(
            err.to_string(),
            "Lexical error at 1:3 near '$': Unexpected character '$'"
        );
    }

    #[test]
    fn test_syntax_error_kind() {
        let err = compile("int ;").unwrap_err();

        assert!(matches!(err, CompileError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "Syntax error at 1:5 near ';': Expected identifier after 'int'."
        );
    }

    #[test]
    fn test_semantic_error_kind() {
        let err = compile("b = 1;").unwrap_err();

        assert!(matches!(err, CompileError::Semantic(_)));
        assert_eq!(
            err.to_string(),
            "Semantic error at 1:1 near 'b': Assignment to undeclared variable 'b'."
        );
    }

    #[test]
    fn test_undeclared_use_is_semantic_not_earlier_phase() {
        // name resolution is sema's job; lexing and parsing both accept this
        let err = compile("int a; a = zzz;").unwrap_err();

        assert!(matches!(err, CompileError::Semantic(_)));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let first = compile(REFERENCE).unwrap().render();
        let second = compile(REFERENCE).unwrap().render();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_program_compiles() {
        let output = compile("").unwrap();

        assert!(output.symbols.is_empty());
        assert!(output.tac.is_empty());
    }
}
