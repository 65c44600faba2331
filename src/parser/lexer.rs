//! Lexer (tokenizer) for Agar source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Tokens are matched greedily: `interest` is one identifier rather
//! than the keyword `int` plus a suffix, and `==` is one operator rather
//! than two `=`. Comments (`// ...` and `/* ... */`) are skipped like
//! whitespace.

use std::fmt;

use thiserror::Error;

/// All token kinds produced by the lexer.
///
/// Kinds are fieldless; the matched text and its byte offset live on
/// [`Token`] so that any token can be reported back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwAgar,
    KwElse,
    KwReturn,

    // Literals and names
    Ident,
    Number,
    StringLit,

    // Operators
    Assign, // =
    EqEq,   // ==
    NotEq,  // !=
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::KwInt => write!(f, "'int'"),
            TokenKind::KwAgar => write!(f, "'Agar'"),
            TokenKind::KwElse => write!(f, "'else'"),
            TokenKind::KwReturn => write!(f, "'return'"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::StringLit => write!(f, "string literal"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A single token: classification, exact source text, and byte offset.
///
/// The lexeme is the exact slice of the input that produced the token, so
/// concatenating the lexemes of a token stream reproduces the input minus
/// whitespace and comments. A string literal's lexeme includes both quotes;
/// the end-of-input token's lexeme is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    /// Contents of a string literal without the enclosing quotes.
    ///
    /// String literal lexemes always include both quote characters.
    /// For any other kind this is just the lexeme.
    pub fn string_value(&self) -> &str {
        match self.kind {
            TokenKind::StringLit => {
                debug_assert!(self.lexeme.len() >= 2);
                &self.lexeme[1..self.lexeme.len() - 1]
            }
            _ => &self.lexeme,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::StringLit => write!(f, "string literal {}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at offset {offset}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character: '{0}'")]
    UnexpectedChar(char),
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated block comment")]
    UnterminatedComment,
}

/// Lexer for Agar source code
///
/// Scans the input left to right in a single pass. The cursor is a byte
/// offset into the source and only ever moves forward.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Tokenize the entire input.
    ///
    /// On success the stream ends with exactly one [`TokenKind::Eof`] token.
    /// The first unrecognized character or unterminated literal aborts the
    /// scan.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let start = self.pos;
            match self.bump() {
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        lexeme: String::new(),
                        offset: start,
                    });
                    break;
                }
                Some(ch) => tokens.push(self.next_token(ch, start)?),
            }
        }

        Ok(tokens)
    }

    /// Produce the token starting with `ch`, already consumed at `start`.
    fn next_token(&mut self, ch: char, start: usize) -> Result<Token, LexError> {
        match ch {
            // String literals
            '"' => self.string_literal(start),

            // Numeric literals
            '0'..='9' => Ok(self.number(start)),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' => Ok(self.word(start)),

            // Operators and punctuation
            '=' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Ok(self.make(TokenKind::EqEq, start))
                } else {
                    Ok(self.make(TokenKind::Assign, start))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Ok(self.make(TokenKind::NotEq, start))
                } else {
                    Err(LexError {
                        kind: LexErrorKind::UnexpectedChar('!'),
                        offset: start,
                    })
                }
            }
            '+' => Ok(self.make(TokenKind::Plus, start)),
            '-' => Ok(self.make(TokenKind::Minus, start)),
            '*' => Ok(self.make(TokenKind::Star, start)),
            // Comment openers were already consumed as whitespace, so a
            // surviving '/' is the division operator.
            '/' => Ok(self.make(TokenKind::Slash, start)),
            '(' => Ok(self.make(TokenKind::LParen, start)),
            ')' => Ok(self.make(TokenKind::RParen, start)),
            '{' => Ok(self.make(TokenKind::LBrace, start)),
            '}' => Ok(self.make(TokenKind::RBrace, start)),
            ';' => Ok(self.make(TokenKind::Semicolon, start)),

            _ => Err(LexError {
                kind: LexErrorKind::UnexpectedChar(ch),
                offset: start,
            }),
        }
    }

    /// Scan a string literal; the opening quote is already consumed.
    ///
    /// Characters are taken verbatim until the closing quote. There is no
    /// escape processing; a backslash is an ordinary character.
    fn string_literal(&mut self, start: usize) -> Result<Token, LexError> {
        while let Some(ch) = self.bump() {
            if ch == '"' {
                return Ok(self.make(TokenKind::StringLit, start));
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            offset: start,
        })
    }

    /// Scan the maximal run of digits; the first digit is already consumed.
    fn number(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }

        self.make(TokenKind::Number, start)
    }

    /// Scan a word and classify it; the first letter is already consumed.
    ///
    /// A word is an ASCII letter followed by letters and digits. Keyword
    /// classification happens only after the whole word is consumed, so a
    /// keyword prefix never splits an identifier. Underscore is not a word
    /// character.
    fn word(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }

        let kind = match &self.src[start..self.pos] {
            "int" => TokenKind::KwInt,
            "Agar" => TokenKind::KwAgar,
            "else" => TokenKind::KwElse,
            "return" => TokenKind::KwReturn,
            _ => TokenKind::Ident,
        };

        self.make(kind, start)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.bump();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.bump(); // skip '/'
        self.bump(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.bump(); // skip '*'
                self.bump(); // skip '/'
                return Ok(());
            }
            self.bump();
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedComment,
            offset: start,
        })
    }

    /// Build a token from the slice scanned since `start`.
    fn make(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            lexeme: self.src[start..self.pos].to_string(),
            offset: start,
        }
    }

    /// Peek at the current character without consuming.
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Peek ahead n characters.
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    /// Consume and return the current character.
    fn bump(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Check if at end of input.
    fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }
}
