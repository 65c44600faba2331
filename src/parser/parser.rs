//! Recursive descent parser for Agar
//!
//! One method per grammar production, one token of lookahead, no
//! backtracking. The cursor only moves forward, and the first malformed
//! construct aborts the parse; there is no error recovery and never more
//! than one diagnostic per run.
//!
//! The parser owns a [`SymbolTable`] and consults it while parsing:
//! declarations bind their name in the current scope, assignment targets
//! and identifier operands must resolve, and each block pushes and pops a
//! scope. Violations surface as [`ParseError::Semantic`], positioned at the
//! identifier token that triggered the check.

use std::fmt;

use thiserror::Error;

use crate::parser::ast::{Block, CompareOp, Expr, Operand, Program, Stmt};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::trace::{ParseEvent, ParseObserver};
use crate::semantics::errors::SemanticError;
use crate::semantics::symbols::SymbolTable;

/// What the parser required when it hit an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token kind, from an `expect` call.
    Kind(TokenKind),
    /// Any token that can begin a statement.
    Statement,
    /// An identifier or number operand.
    Operand,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Statement => write!(f, "a statement"),
            Expected::Operand => write!(f, "an identifier or number"),
        }
    }
}

/// Syntax error: the token at `position` did not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub expected: Expected,
    pub found: Token,
    /// Index of `found` in the token stream.
    pub position: usize,
}

/// Parser error type
///
/// Syntax and semantic failures stay distinguishable by variant; both are
/// fatal to the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("Semantic error: {error}")]
    Semantic {
        error: SemanticError,
        /// Index of the offending identifier token.
        position: usize,
        /// Byte offset of the offending identifier token.
        offset: usize,
    },
}

/// Recursive descent parser for the Agar grammar
///
/// Consumes a token stream produced by [`Lexer::tokenize`], so the stream
/// is always terminated by an [`TokenKind::Eof`] token.
///
/// [`Lexer::tokenize`]: crate::parser::lexer::Lexer::tokenize
pub struct Parser<'obs> {
    tokens: Vec<Token>,
    position: usize,
    symbols: SymbolTable,
    observer: Option<&'obs mut dyn ParseObserver>,
}

impl<'obs> Parser<'obs> {
    /// Create a parser over a token stream.
    ///
    /// Each parser owns a fresh [`SymbolTable`]; parses of independent
    /// inputs cannot see each other's declarations.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            symbols: SymbolTable::new(),
            observer: None,
        }
    }

    /// Create a parser that reports each recognized construct to `observer`.
    pub fn with_observer(
        tokens: Vec<Token>,
        observer: &'obs mut dyn ParseObserver,
    ) -> Self {
        Self {
            tokens,
            position: 0,
            symbols: SymbolTable::new(),
            observer: Some(observer),
        }
    }

    /// Parse the entire program: `statement* EOF`.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.statements.push(self.parse_statement()?);
        }

        Ok(program)
    }

    /// Parse a statement, dispatching on the first token only.
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::KwInt => self.parse_declaration(),
            TokenKind::Ident => self.parse_assignment(),
            TokenKind::KwAgar => self.parse_conditional(),
            TokenKind::KwReturn => self.parse_return(),
            _ => Err(self.syntax_error(Expected::Statement).into()),
        }
    }

    /// Parse a declaration: `"int" IDENT ";"`.
    ///
    /// The name is bound only once the whole statement is recognized, so a
    /// malformed declaration declares nothing.
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::KwInt)?;

        let ident_position = self.position;
        let name = self.expect(TokenKind::Ident)?.lexeme.clone();

        self.expect(TokenKind::Semicolon)?;

        self.symbols
            .declare(&name, "int")
            .map_err(|error| self.semantic_error(error, ident_position))?;
        self.emit(ParseEvent::Declaration { name: name.clone() });

        Ok(Stmt::Declaration {
            name,
            ty: "int".to_string(),
        })
    }

    /// Parse an assignment: `IDENT "=" expression ";"`.
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let target_position = self.position;
        let target = self.expect(TokenKind::Ident)?.lexeme.clone();

        // The target must already be declared in some enclosing scope.
        self.symbols
            .type_of(&target)
            .map_err(|error| self.semantic_error(error, target_position))?;
        self.emit(ParseEvent::Assignment {
            target: target.clone(),
        });

        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Assignment { target, value })
    }

    /// Parse a conditional: `"Agar" "(" expression ")" block ("else" block)?`.
    fn parse_conditional(&mut self) -> Result<Stmt, ParseError> {
        self.emit(ParseEvent::ConditionalEnter);
        self.expect(TokenKind::KwAgar)?;

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let then_block = self.parse_block()?;

        let else_block = if self.match_token(TokenKind::KwElse) {
            self.emit(ParseEvent::ElseEnter);
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::Conditional {
            condition,
            then_block,
            else_block,
        })
    }

    /// Parse a return statement: `"return" STRING ";"`.
    ///
    /// Only a string literal is accepted here; returning an identifier or
    /// number is a syntax error.
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::KwReturn)?;
        let value = self.expect(TokenKind::StringLit)?.string_value().to_string();
        self.expect(TokenKind::Semicolon)?;

        self.emit(ParseEvent::Return {
            value: value.clone(),
        });

        Ok(Stmt::Return { value })
    }

    /// Parse a block: `"{" statement* "}"`.
    ///
    /// The block's scope is pushed after the opening brace and popped after
    /// the closing brace, so declarations inside it vanish on exit.
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace)?;
        self.symbols.push_scope();

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;
        self.symbols.pop_scope();

        Ok(Block { statements })
    }

    /// Parse an expression: one operand, optionally compared with a second.
    ///
    /// At most one comparison: a further `==`/`!=` after the right operand
    /// fails at the surrounding `expect` for `)` or `;`.
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;

        let op = if self.match_token(TokenKind::EqEq) {
            Some(CompareOp::Eq)
        } else if self.match_token(TokenKind::NotEq) {
            Some(CompareOp::Ne)
        } else {
            None
        };

        if let Some(op) = op {
            self.emit(ParseEvent::Comparison { op });
            let right = self.parse_operand()?;
            return Ok(Expr::Comparison { left, op, right });
        }

        Ok(Expr::Operand(left))
    }

    /// Parse a single operand: an identifier or a number.
    ///
    /// Identifier operands must resolve through the symbol table.
    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        if self.check(TokenKind::Ident) {
            let position = self.position;
            let name = self.advance().lexeme.clone();

            self.symbols
                .type_of(&name)
                .map_err(|error| self.semantic_error(error, position))?;
            self.emit(ParseEvent::Operand { text: name.clone() });

            return Ok(Operand::Ident(name));
        }

        if self.check(TokenKind::Number) {
            let text = self.advance().lexeme.clone();
            self.emit(ParseEvent::Operand { text: text.clone() });

            return Ok(Operand::Number(text));
        }

        Err(self.syntax_error(Expected::Operand).into())
    }

    // ===== Helper methods =====

    /// Report an event to the observer, if one is attached.
    fn emit(&mut self, event: ParseEvent) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_event(event);
        }
    }

    /// Consume the current token if it has the given kind.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume and return the current token. At end of input the cursor
    /// stays on the end-of-file token.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    /// Consume a token of the given kind or fail with a syntax error
    /// naming the kind, what was found, and where.
    fn expect(&mut self, kind: TokenKind) -> Result<&Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.syntax_error(Expected::Kind(kind)))
        }
    }

    fn syntax_error(&self, expected: Expected) -> SyntaxError {
        SyntaxError {
            expected,
            found: self.peek().clone(),
            position: self.position,
        }
    }

    fn semantic_error(&self, error: SemanticError, position: usize) -> ParseError {
        ParseError::Semantic {
            error,
            position,
            offset: self.tokens[position].offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize().expect("lexing failed");
        Parser::new(tokens).parse_program()
    }

    #[test]
    fn test_parse_declaration() {
        let program = parse("int a ;").unwrap();

        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            program.statements[0],
            Stmt::Declaration {
                name: "a".to_string(),
                ty: "int".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_assignment() {
        let program = parse("int a ; a = 5 ;").unwrap();

        assert_eq!(
            program.statements[1],
            Stmt::Assignment {
                target: "a".to_string(),
                value: Expr::Operand(Operand::Number("5".to_string())),
            }
        );
    }

    #[test]
    fn test_parse_conditional_with_else() {
        let source = r#"
            int a ;
            a = 5 ;
            Agar ( a == 5 ) {
                return "Hello World" ;
            } else {
                return "Goodbye" ;
            }
        "#;
        let program = parse(source).unwrap();

        assert_eq!(program.statements.len(), 3);
        match &program.statements[2] {
            Stmt::Conditional {
                condition,
                then_block,
                else_block,
            } => {
                assert_eq!(
                    *condition,
                    Expr::Comparison {
                        left: Operand::Ident("a".to_string()),
                        op: CompareOp::Eq,
                        right: Operand::Number("5".to_string()),
                    }
                );
                assert_eq!(then_block.statements.len(), 1);
                assert!(else_block.is_some());
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_conditional_without_else() {
        let program = parse(r#"int a ; Agar ( a != 1 ) { a = 2 ; }"#).unwrap();

        match &program.statements[1] {
            Stmt::Conditional { else_block, .. } => assert!(else_block.is_none()),
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int a ; a = 5 int b ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::Semicolon));
                assert_eq!(err.found.kind, TokenKind::KwInt);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_dispatch_error() {
        let err = parse("= 5 ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Statement);
                assert_eq!(err.position, 0);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_return_requires_string_literal() {
        let err = parse("int a ; return a ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::StringLit));
                assert_eq!(err.found.kind, TokenKind::Ident);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_comparison_chaining() {
        let err = parse("int a ; a = 1 == 2 == 3 ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::Semicolon));
                assert_eq!(err.found.kind, TokenKind::EqEq);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_arithmetic_is_rejected() {
        // `+` lexes fine but no production accepts it.
        let err = parse("int a ; a = 1 + 2 ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::Semicolon));
                assert_eq!(err.found.kind, TokenKind::Plus);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_redeclaration_is_semantic_error() {
        let err = parse("int a ; int a ;").unwrap_err();

        match err {
            ParseError::Semantic {
                error, position, ..
            } => {
                assert_eq!(
                    error,
                    SemanticError::AlreadyDeclared {
                        name: "a".to_string()
                    }
                );
                // The second `a`, not the statement start.
                assert_eq!(position, 4);
            }
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_to_undeclared() {
        let err = parse("a = 5 ;").unwrap_err();

        match err {
            ParseError::Semantic { error, offset, .. } => {
                assert_eq!(
                    error,
                    SemanticError::NotDeclared {
                        name: "a".to_string()
                    }
                );
                assert_eq!(offset, 0);
            }
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }

    #[test]
    fn test_undeclared_operand() {
        let err = parse("int a ; a = b ;").unwrap_err();

        assert!(matches!(
            err,
            ParseError::Semantic {
                error: SemanticError::NotDeclared { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_declaration_declares_nothing() {
        // The declaration fails at the missing semicolon, so `a` must not
        // have been bound by it.
        let err = parse("int a int b ;").unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::Semicolon));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_block_scope_ends_at_brace() {
        let err = parse(
            r#"
            int a ;
            Agar ( a == 1 ) {
                int b ;
                b = 2 ;
            }
            b = 3 ;
        "#,
        )
        .unwrap_err();

        match err {
            ParseError::Semantic { error, .. } => {
                assert_eq!(
                    error,
                    SemanticError::NotDeclared {
                        name: "b".to_string()
                    }
                );
            }
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }

    #[test]
    fn test_inner_scope_may_shadow() {
        let source = r#"
            int a ;
            Agar ( a == 1 ) {
                int a ;
                a = 2 ;
            }
        "#;
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_fail_fast_reports_first_error_only() {
        // Both statements are bad; only the first is reported.
        let err = parse("b = 1 ; c = 2 ;").unwrap_err();

        match err {
            ParseError::Semantic { error, .. } => {
                assert_eq!(error.name(), "b");
            }
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse(r#"int a ; Agar ( a == 1 ) { a = 2 ;"#).unwrap_err();

        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, Expected::Kind(TokenKind::RBrace));
                assert_eq!(err.found.kind, TokenKind::Eof);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = parse("int a ; a = 5 int b ;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error: expected ';', found 'int'"
        );

        let err = parse("int a ; int a ;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Semantic error: Variable 'a' is already declared."
        );
    }
}
