//! Parse error type.

use thiserror::Error;

/// Failure to turn source text into an expression tree.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A character the lexer has no token for.
    #[error("unexpected character at byte {0}")]
    UnexpectedCharacter(usize),

    /// An `_`-word that matches no keyword.
    #[error("unknown keyword beginning with '_'")]
    UnknownKeyword,

    #[error("expected a digit, variable, keyword, or open parenthesis")]
    ExpectedExpression,

    #[error("expected a close parenthesis")]
    ExpectedCloseParen,

    #[error("expected a variable name after _let")]
    ExpectedVariable,

    #[error("expected '=' after the variable in _let")]
    ExpectedEqualsSign,

    #[error("expected _in after the bound expression in _let")]
    ExpectedIn,

    #[error("expected _then after the test in _if")]
    ExpectedThen,

    #[error("expected _else after the then-branch in _if")]
    ExpectedElse,

    #[error("expected a parenthesized parameter name after _fun")]
    ExpectedParameter,

    /// The expression ended but input kept going.
    #[error("expected end of input, found {0}")]
    TrailingInput(String),
}
