//! Lexer and parser for the arith language.
//!
//! The surface syntax keeps keywords out of the identifier space by
//! prefixing them with `_`: `_let x = 3 _in x + 1`, `_if`, `_fun`,
//! `_true`. [`parse`] turns one complete expression into an
//! [`arith_ir::Expr`] tree or fails with a [`ParseError`]; it never
//! partially succeeds.

mod error;
mod parser;
mod token;

pub use error::ParseError;
pub use parser::parse;
pub use token::Token;
