//! Symbol table with scope management
//!
//! Tracks variable declarations (name → declared type) and resolves
//! identifier references during parsing:
//! - [`SymbolTable::declare`]: bind a name in the innermost scope
//! - [`SymbolTable::type_of`]: look a name up through all enclosing scopes
//! - [`SymbolTable::push_scope`] / [`SymbolTable::pop_scope`]: block scoping
//!
//! Names are unique per scope, never per table: an inner scope may shadow
//! an outer binding, and the shadowed binding reappears when the inner
//! scope is popped.

use rustc_hash::FxHashMap;

use super::errors::SemanticError;

/// One lexical scope: names bound to their declared types.
type Scope = FxHashMap<String, String>;

/// Symbol table backed by a stack of scopes.
///
/// The table starts with a single global scope that is never popped.
/// `declare` is the only operation that inserts; lookups never create
/// entries.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a symbol table containing only the global scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
        }
    }

    /// Declare a variable in the current scope.
    ///
    /// Fails with [`SemanticError::AlreadyDeclared`] if the current scope
    /// already binds `name`. On failure nothing is inserted and the stored
    /// type of the existing binding is left untouched.
    pub fn declare(&mut self, name: &str, ty: &str) -> Result<(), SemanticError> {
        let current = self.scopes.len() - 1;
        let scope = &mut self.scopes[current];

        if scope.contains_key(name) {
            return Err(SemanticError::AlreadyDeclared {
                name: name.to_string(),
            });
        }

        scope.insert(name.to_string(), ty.to_string());
        Ok(())
    }

    /// Get the declared type of a variable.
    ///
    /// Walks the scopes from innermost to outermost and returns the first
    /// binding, so shadowing declarations win. Fails with
    /// [`SemanticError::NotDeclared`] if no scope binds `name`; the table
    /// is never modified by a lookup.
    pub fn type_of(&self, name: &str) -> Result<&str, SemanticError> {
        for scope in self.scopes.iter().rev() {
            if let Some(ty) = scope.get(name) {
                return Ok(ty);
            }
        }

        Err(SemanticError::NotDeclared {
            name: name.to_string(),
        })
    }

    /// Check whether a variable is declared in any enclosing scope.
    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// Enter a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Exit the innermost scope, dropping its bindings.
    ///
    /// The global scope is never popped; extra pops are ignored.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Current scope depth; 1 when only the global scope is open.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = SymbolTable::new();
        assert_eq!(table.depth(), 1);
        assert!(!table.is_declared("x"));
    }

    #[test]
    fn test_declare_and_type_of() {
        let mut table = SymbolTable::new();
        table.declare("x", "int").unwrap();

        assert_eq!(table.type_of("x").unwrap(), "int");
        assert!(table.is_declared("x"));
    }

    #[test]
    fn test_redeclaration_keeps_original_type() {
        let mut table = SymbolTable::new();

        assert!(table.declare("x", "int").is_ok());
        let err = table.declare("x", "double").unwrap_err();
        assert_eq!(
            err,
            SemanticError::AlreadyDeclared {
                name: "x".to_string()
            }
        );

        // The failed declaration must not overwrite the stored type.
        assert_eq!(table.type_of("x").unwrap(), "int");
    }

    #[test]
    fn test_type_of_undeclared() {
        let table = SymbolTable::new();
        let err = table.type_of("z").unwrap_err();

        assert_eq!(
            err,
            SemanticError::NotDeclared {
                name: "z".to_string()
            }
        );
    }

    #[test]
    fn test_lookup_does_not_insert() {
        let table = SymbolTable::new();
        assert!(table.type_of("ghost").is_err());
        assert!(!table.is_declared("ghost"));
    }

    #[test]
    fn test_inner_scope_resolves_outer_names() {
        let mut table = SymbolTable::new();
        table.declare("x", "int").unwrap();

        table.push_scope();
        assert_eq!(table.type_of("x").unwrap(), "int");
        assert!(table.is_declared("x"));
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", "int").unwrap();

        table.push_scope();
        // Same name, different scope: allowed.
        table.declare("x", "double").unwrap();
        assert_eq!(table.type_of("x").unwrap(), "double");

        table.pop_scope();
        assert_eq!(table.type_of("x").unwrap(), "int");
    }

    #[test]
    fn test_pop_drops_inner_bindings() {
        let mut table = SymbolTable::new();

        table.push_scope();
        table.declare("tmp", "int").unwrap();
        assert!(table.is_declared("tmp"));

        table.pop_scope();
        assert!(!table.is_declared("tmp"));
    }

    #[test]
    fn test_global_scope_survives_extra_pops() {
        let mut table = SymbolTable::new();
        table.declare("x", "int").unwrap();

        table.pop_scope();
        table.pop_scope();

        assert_eq!(table.depth(), 1);
        assert_eq!(table.type_of("x").unwrap(), "int");
    }
}
