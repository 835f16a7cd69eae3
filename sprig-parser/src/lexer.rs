// sprig-parser - Lexer for sprig
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Lexer (tokeniser) for sprig source code.
//!
//! Converts a source string into a stream of tokens.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use num_bigint::BigInt;
use num_traits::Num;
use thiserror::Error;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    Quasiquote,    // `
    Unquote,       // ,
    UnquoteSplice, // ,@
    Meta,          // ^
    Deref,         // ->

    // Literals
    Nil,
    True,
    False,
    Integer(BigInt),
    Float(f64),
    String(String),
    Symbol(String),
    Keyword(String),

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, ","),
            Token::UnquoteSplice => write!(f, ",@"),
            Token::Meta => write!(f, "^"),
            Token::Deref => write!(f, "->"),
            Token::Nil => write!(f, "null"),
            Token::True => write!(f, "#t"),
            Token::False => write!(f, "#f"),
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, Error)]
#[error("Lexer error at {line}:{column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// Input ended inside a string literal.
    pub incomplete: bool,
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();

        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        match c {
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),

            '\'' => self.single(Token::Quote),
            '`' => self.single(Token::Quasiquote),
            '^' => self.single(Token::Meta),
            ',' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::UnquoteSplice)
                } else {
                    Ok(Token::Unquote)
                }
            }

            '"' => self.read_string(),
            ':' => self.read_keyword(),
            '#' => self.read_dispatch(),
            '-' => self.read_minus(),
            '0'..='9' => {
                let word = self.read_word(String::new());
                self.parse_number(&word)
            }

            _ if is_symbol_start(c) => self.read_symbol(),

            _ => Err(self.error(format!("Unexpected character: '{}'", c))),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn single(&mut self, token: Token) -> Result<Token, LexerError> {
        self.advance();
        Ok(token)
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
            incomplete: false,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Consume symbol characters onto `prefix`.
    fn read_word(&mut self, mut prefix: String) -> String {
        while let Some(c) = self.peek() {
            if !is_symbol_char(c) {
                break;
            }
            prefix.push(c);
            self.advance();
        }
        prefix
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance(); // opening quote
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    // Unknown escapes are kept as written
                    Some(c) => {
                        s.push('\\');
                        s.push(c);
                    }
                    None => return Err(self.unterminated()),
                },
                Some(c) => s.push(c),
                None => return Err(self.unterminated()),
            }
        }

        Ok(Token::String(s))
    }

    fn unterminated(&self) -> LexerError {
        LexerError {
            incomplete: true,
            ..self.error("Unterminated string".to_string())
        }
    }

    fn read_keyword(&mut self) -> Result<Token, LexerError> {
        self.advance(); // colon
        let name = self.read_word(String::new());
        if name.is_empty() {
            return Err(self.error("Keyword must have a name".to_string()));
        }
        Ok(Token::Keyword(name))
    }

    /// `#t`, `#f`, `#x1F` and `#b101`.
    fn read_dispatch(&mut self) -> Result<Token, LexerError> {
        self.advance(); // #
        let word = self.read_word(String::new());
        match word.as_str() {
            "t" => Ok(Token::True),
            "f" => Ok(Token::False),
            _ => {
                if let Some(digits) = word.strip_prefix('x') {
                    self.parse_radix(digits, 16, &word)
                } else if let Some(digits) = word.strip_prefix('b') {
                    self.parse_radix(digits, 2, &word)
                } else {
                    Err(self.error(format!("Unknown dispatch: #{}", word)))
                }
            }
        }
    }

    /// A leading `-` starts a negative number, the `->` deref macro, or a
    /// symbol.
    fn read_minus(&mut self) -> Result<Token, LexerError> {
        self.advance();
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let word = self.read_word("-".to_string());
                self.parse_number(&word)
            }
            Some('>') => {
                self.advance();
                Ok(Token::Deref)
            }
            _ => Ok(Token::Symbol(self.read_word("-".to_string()))),
        }
    }

    fn read_symbol(&mut self) -> Result<Token, LexerError> {
        let name = self.read_word(String::new());
        match name.as_str() {
            "null" => Ok(Token::Nil),
            _ => Ok(Token::Symbol(name)),
        }
    }

    fn parse_number(&self, s: &str) -> Result<Token, LexerError> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let token = if let Some(digits) = body.strip_prefix("0x") {
            self.parse_radix(digits, 16, s)?
        } else if let Some(digits) = body.strip_prefix("0b") {
            self.parse_radix(digits, 2, s)?
        } else if body.contains('.') {
            let n: f64 = s
                .parse()
                .map_err(|_| self.error(format!("Invalid float: {}", s)))?;
            return Ok(Token::Float(n));
        } else {
            self.parse_radix(body, 10, s)?
        };

        match token {
            Token::Integer(n) if negative => Ok(Token::Integer(-n)),
            other => Ok(other),
        }
    }

    fn parse_radix(&self, digits: &str, radix: u32, original: &str) -> Result<Token, LexerError> {
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(self.error(format!("Invalid integer: {}", original)));
        }
        BigInt::from_str_radix(digits, radix)
            .map(Token::Integer)
            .map_err(|_| self.error(format!("Invalid integer: {}", original)))
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' | '`' | ',' | ';')
}

/// Check if a character can start a symbol.
fn is_symbol_start(c: char) -> bool {
    is_symbol_char(c) && !c.is_ascii_digit() && !matches!(c, ':' | '#' | '^')
}

/// Check if a character can appear in a symbol.
fn is_symbol_char(c: char) -> bool {
    !is_delimiter(c) && !matches!(c, '~' | '@')
}

// ============================================================================
// Tests
// ============================================================================
