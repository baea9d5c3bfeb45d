//! Report formatting: the three labeled output sections
//!
//! The hosting process locates the header strings below verbatim in the raw
//! output and slices between them, so the headers, their order, and the
//! blank line terminating each section are a compatibility contract and
//! must not be reworded.

use crate::parser::lexer::{Token, TokenKind};
use crate::sema::SymbolTable;

pub const TOKENS_HEADER: &str = "TOKENS:";
pub const SYMBOL_TABLE_HEADER: &str = "SYMBOL TABLE:";
pub const TAC_HEADER: &str = "INTERMEDIATE CODE (TAC):";

/// Render the token listing: one `lexeme category` line per token, the
/// lexeme left-justified to a minimum field width. The end-of-input token
/// is not listed.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    out.push_str(TOKENS_HEADER);
    out.push('\n');

    for token in tokens {
        if token.kind == TokenKind::Eof {
            break;
        }
        out.push_str(&format!(
            "{:<10} {}\n",
            token.lexeme,
            token.kind.category()
        ));
    }

    out.push('\n');
    out
}

/// Render the symbol table: a `Name`/`Type` header row, then one row per
/// declared variable in first-declaration order.
pub fn render_symbol_table(table: &SymbolTable) -> String {
    let mut out = String::new();
    out.push_str(SYMBOL_TABLE_HEADER);
    out.push('\n');
    out.push_str(&format!("{:<10}Type\n", "Name"));

    for symbol in table.iter_in_order() {
        out.push_str(&format!("{:<10}{}\n", symbol.name, symbol.ty));
    }

    out.push('\n');
    out
}

/// Render the TAC listing, one instruction per line in emission order.
pub fn render_tac(code: &[String]) -> String {
    let mut out = String::new();
    out.push_str(TAC_HEADER);
    out.push('\n');

    for line in code {
        out.push_str(line);
        out.push('\n');
    }

    out.push('\n');
    out
}
