//! Agar source code parser
//!
//! This module transforms Agar source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`trace`]: Parse event observation
//!
//! # Supported Language
//!
//! The parser supports the Agar language:
//! - Declarations: `int` variables
//! - Statements: assignments, conditionals (`Agar`/`else`), `return` of a string literal
//! - Expressions: a single identifier or number, optionally compared with `==` or `!=`
//! - Comments: `//` line comments and `/* */` block comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead and no
//! backtracking. Declared variables are tracked in a [`SymbolTable`] during the
//! parse, so references to undeclared names are rejected as they are read.
//! No external parser generator dependencies.
//!
//! [`SymbolTable`]: crate::semantics::symbols::SymbolTable

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod trace;

use thiserror::Error;

/// Any error the front end can produce, from either phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] lexer::LexError),
    #[error(transparent)]
    Parse(#[from] parser::ParseError),
}

/// Runs the full pipeline on `source`: tokenize, then parse.
///
/// Convenience entry point for callers that do not need token inspection
/// or parse tracing.
pub fn parse_source(source: &str) -> Result<ast::Program, FrontendError> {
    let tokens = lexer::Lexer::new(source).tokenize()?;
    let program = parser::Parser::new(tokens).parse_program()?;
    Ok(program)
}
