// Parse tree definitions for the Agar front end

use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq, // ==
    Ne, // !=
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Ne => write!(f, "!="),
        }
    }
}

/// A single operand: a variable reference or a numeric literal.
///
/// Numbers are kept as their source text; the front end validates programs,
/// it does not evaluate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Ident(String),
    Number(String),
}

/// An expression: one operand, optionally compared against another.
///
/// There is no chaining; `a == b == c` is rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Operand(Operand),
    Comparison {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
}

/// A braced statement list. Each block opens its own variable scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// Statements of the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `int x;`
    Declaration { name: String, ty: String },
    /// `x = expr;`
    Assignment { target: String, value: Expr },
    /// `Agar (expr) { ... } else { ... }`, the else block optional
    Conditional {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `return "text";` (only string literals can be returned)
    Return { value: String },
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
