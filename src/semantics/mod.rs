//! Semantic layer for the Agar front end
//!
//! Declaration tracking that runs alongside parsing:
//! - [`symbols`]: scope-aware symbol table (name → declared type)
//! - [`errors`]: semantic error definitions
//!
//! The parser owns a [`symbols::SymbolTable`] per parse and consults it at
//! every declaration and identifier reference, so declare-before-use and
//! declare-once-per-scope violations surface during the parse itself.

pub mod errors;
pub mod symbols;
