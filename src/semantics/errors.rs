// Semantic error definitions for the Agar front end

use thiserror::Error;

/// Semantic analysis error type
///
/// Raised by the symbol table when a declaration or lookup violates the
/// declare-before-use rules. The two variants stay distinguishable so
/// callers can react to each separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// The name is already bound in the current scope.
    #[error("Variable '{name}' is already declared.")]
    AlreadyDeclared { name: String },
    /// The name is not bound in this or any enclosing scope.
    #[error("Variable '{name}' is not declared.")]
    NotDeclared { name: String },
}

impl SemanticError {
    /// The variable name the error is about.
    pub fn name(&self) -> &str {
        match self {
            SemanticError::AlreadyDeclared { name } => name,
            SemanticError::NotDeclared { name } => name,
        }
    }
}
