//! Token definitions for the logos-derived lexer.

use std::fmt;

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
pub enum Token {
    #[token("_let")]
    Let,
    #[token("_in")]
    In,
    #[token("_if")]
    If,
    #[token("_then")]
    Then,
    #[token("_else")]
    Else,
    #[token("_fun")]
    Fun,
    #[token("_true")]
    True,
    #[token("_false")]
    False,

    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("==")]
    EqualsEquals,
    #[token("=")]
    Equals,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    /// Signed integer literal. The grammar has no subtraction, so a
    /// leading `-` always belongs to the literal.
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    /// Variable name: letters only.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Ident(String),

    /// An `_`-word that is no keyword (`_bogus`, or a keyword glued to
    /// trailing letters like `_letx`). Low priority so real keywords
    /// win the tie at equal length; the longer match wins otherwise,
    /// which is exactly what rejects the glued forms.
    #[regex(r"_[a-zA-Z]*", priority = 1)]
    UnknownKeyword,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Let => write!(f, "_let"),
            Token::In => write!(f, "_in"),
            Token::If => write!(f, "_if"),
            Token::Then => write!(f, "_then"),
            Token::Else => write!(f, "_else"),
            Token::Fun => write!(f, "_fun"),
            Token::True => write!(f, "_true"),
            Token::False => write!(f, "_false"),
            Token::Plus => write!(f, "+"),
            Token::Star => write!(f, "*"),
            Token::EqualsEquals => write!(f, "=="),
            Token::Equals => write!(f, "="),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Number(value) => write!(f, "{value}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::UnknownKeyword => write!(f, "_"),
        }
    }
}
