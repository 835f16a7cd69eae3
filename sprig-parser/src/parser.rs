// sprig-parser - Parser for sprig
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Recursive descent parser for sprig source code.
//!
//! Converts tokens into [`Form`] values. Running out of input between
//! forms is not an error: [`Parser::parse`] returns `Ok(None)`. Running
//! out of input inside a form is a [`ParseError`] flagged as incomplete,
//! so an interactive caller can ask for another line instead of
//! reporting a failure.

use im::{OrdMap, Vector};
use thiserror::Error;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::value::{Form, MapKey};

/// Parser error with position information.
#[derive(Debug, Clone, Error)]
#[error("Parse error at {line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    incomplete: bool,
}

impl ParseError {
    /// True when the input ended before the current form was closed.
    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
            incomplete: e.incomplete,
        }
    }
}

/// The parser converts tokens into `Form` values.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<Form>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let form = self.parse_form()?;
        Ok(Some(form))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<Form>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<Form>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<Form>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
            incomplete: false,
        }
    }

    fn unexpected_eof(&self, context: &str) -> ParseError {
        ParseError {
            incomplete: true,
            ..self.error(format!("Unexpected end of input in {}", context))
        }
    }

    fn parse_form(&mut self) -> Result<Form, ParseError> {
        match self.advance()? {
            Token::Nil => Ok(Form::Nil),
            Token::True => Ok(Form::True),
            Token::False => Ok(Form::False),
            Token::Integer(n) => Ok(Form::Integer(n)),
            Token::Float(n) => Ok(Form::Float(n)),
            Token::String(s) => Ok(Form::text(s)),
            Token::Symbol(s) => Ok(Form::Symbol(Symbol::new(&s))),
            Token::Keyword(s) => Ok(Form::Keyword(Keyword::new(&s))),

            Token::LParen => Ok(Form::List(self.parse_seq(&Token::RParen, "list")?, None)),
            Token::LBracket => Ok(Form::Vector(
                self.parse_seq(&Token::RBracket, "vector")?,
                None,
            )),
            Token::LBrace => self.parse_map(),

            Token::Quote => self.wrap("quote"),
            Token::Quasiquote => self.wrap("quasiquote"),
            Token::Unquote => self.wrap("unquote"),
            Token::UnquoteSplice => self.wrap("unquote-splice"),
            Token::Meta => self.wrap("with-meta"),
            Token::Deref => self.wrap("deref"),

            Token::Eof => Err(self.unexpected_eof("form")),
            token @ (Token::RParen | Token::RBracket | Token::RBrace) => {
                Err(self.error(format!("Unexpected '{}'", token)))
            }
        }
    }

    /// Read the next form and wrap it as `(name form)`.
    fn wrap(&mut self, name: &str) -> Result<Form, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Err(self.unexpected_eof(name));
        }
        let inner = self.parse_form()?;
        Ok(Form::list([Form::symbol(name), inner]))
    }

    fn parse_seq(&mut self, close: &Token, context: &str) -> Result<Vector<Form>, ParseError> {
        let mut items = Vector::new();
        loop {
            if &self.current == close {
                self.advance()?;
                return Ok(items);
            }
            if matches!(self.current, Token::Eof) {
                return Err(self.unexpected_eof(context));
            }
            items.push_back(self.parse_form()?);
        }
    }

    fn parse_map(&mut self) -> Result<Form, ParseError> {
        let items = self.parse_seq(&Token::RBrace, "map")?;
        if items.len() % 2 != 0 {
            return Err(self.error("Map literal must have an even number of forms".to_string()));
        }
        let mut entries = OrdMap::new();
        let mut iter = items.into_iter();
        while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
            let key = MapKey::from_form(&k).ok_or_else(|| {
                self.error(format!(
                    "Map keys must be strings or keywords, got {}",
                    k.type_name()
                ))
            })?;
            entries.insert(key, v);
        }
        Ok(Form::map(entries))
    }
}
