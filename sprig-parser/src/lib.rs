// sprig-parser - Reader, printer and value model for the sprig Lisp
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! # sprig-parser
//!
//! Lexer, parser and printer for the sprig Lisp, plus the [`Form`]
//! value type they read and write.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use im::{OrdMap, Vector};
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token};
pub use num_bigint::BigInt;
pub use num_traits::ToPrimitive;
pub use parser::{ParseError, Parser};
pub use printer::pr_str;
pub use symbol::Symbol;
pub use value::{Cell, Closure, Form, Function, MapKey, Meta, Primitive};
