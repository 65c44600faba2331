//! # Introduction
//!
//! Agar is the front end for a small imperative language, named for its
//! conditional keyword.  It lexes source text into tokens, parses the tokens
//! into an AST with a recursive descent parser, and checks variable
//! declarations against a scoped symbol table during the parse.  The first
//! error of either phase is reported as a value; nothing panics or exits.
//!
//! ## Front-end pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser ⇄ SymbolTable
//!                             │
//!                             ├→ Program (AST)
//!                             └→ ParseObserver (optional trace)
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source with maximal munch, tagging
//!    each token with its byte offset.
//! 2. [`parser::parser`] — builds a [`parser::ast::Program`], consulting the
//!    symbol table at every declaration and variable use.
//! 3. [`semantics`] — the scoped [`semantics::symbols::SymbolTable`] and the
//!    semantic errors it produces.
//! 4. [`parser::trace`] — the [`parser::trace::ParseObserver`] seam; the
//!    bundled [`parser::trace::ParseTrace`] records one line per parse event.
//!
//! ## Supported language
//!
//! Declarations: `int` variables.
//! Statements: assignment, `Agar (...) { ... }` with optional `else`,
//! `return` of a string literal.
//! Expressions: one identifier or number, optionally compared with
//! `==` or `!=`.

pub mod parser;
pub mod semantics;

pub use parser::{parse_source, FrontendError};
