//! Recursive-descent parser over the token stream.
//!
//! Grammar, maximal-munch at every level:
//!
//! ```text
//! expr      := addend (('+' | '==') expr)?
//! addend    := multicand ('*' addend)?
//! multicand := inner ('(' expr ')')*
//! inner     := number | variable | '(' expr ')'
//!            | '_true' | '_false'
//!            | '_if' expr '_then' expr '_else' expr
//!            | '_let' variable '=' expr '_in' expr
//!            | '_fun' '(' variable ')' expr
//! ```
//!
//! `+` and `==` are right-leaning and share a precedence level, so
//! `a + b == c` parses as `a + (b == c)`.

use std::rc::Rc;

use arith_ir::Expr;
use logos::Logos;

use crate::error::ParseError;
use crate::token::Token;

/// Parse one complete expression; trailing input is an error.
pub fn parse(source: &str) -> Result<Rc<Expr>, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::TrailingInput(token.to_string())),
    }
}

fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(Token::UnknownKeyword) => return Err(ParseError::UnknownKeyword),
            Ok(token) => tokens.push(token),
            Err(()) => return Err(ParseError::UnexpectedCharacter(span.start)),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume `expected` if it is next.
    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<Rc<Expr>, ParseError> {
        let expr = self.parse_addend()?;
        if self.eat(&Token::Plus) {
            Ok(Expr::add(expr, self.parse_expr()?))
        } else if self.eat(&Token::EqualsEquals) {
            Ok(Expr::equals(expr, self.parse_expr()?))
        } else {
            Ok(expr)
        }
    }

    fn parse_addend(&mut self) -> Result<Rc<Expr>, ParseError> {
        let expr = self.parse_multicand()?;
        if self.eat(&Token::Star) {
            Ok(Expr::multiply(expr, self.parse_addend()?))
        } else {
            Ok(expr)
        }
    }

    /// An inner expression followed by any number of call arguments, so
    /// `f(a)(b)` is `Call(Call(f, a), b)`.
    fn parse_multicand(&mut self) -> Result<Rc<Expr>, ParseError> {
        let mut expr = self.parse_inner()?;
        while self.eat(&Token::OpenParen) {
            let arg = self.parse_expr()?;
            if !self.eat(&Token::CloseParen) {
                return Err(ParseError::ExpectedCloseParen);
            }
            expr = Expr::call(expr, arg);
        }
        Ok(expr)
    }

    fn parse_inner(&mut self) -> Result<Rc<Expr>, ParseError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::number(value)),
            Some(Token::Ident(name)) => Ok(Expr::variable(name)),
            Some(Token::True) => Ok(Expr::boolean(true)),
            Some(Token::False) => Ok(Expr::boolean(false)),
            Some(Token::OpenParen) => {
                let expr = self.parse_expr()?;
                if self.eat(&Token::CloseParen) {
                    Ok(expr)
                } else {
                    Err(ParseError::ExpectedCloseParen)
                }
            }
            Some(Token::If) => {
                let test = self.parse_expr()?;
                if !self.eat(&Token::Then) {
                    return Err(ParseError::ExpectedThen);
                }
                let then_part = self.parse_expr()?;
                if !self.eat(&Token::Else) {
                    return Err(ParseError::ExpectedElse);
                }
                Ok(Expr::if_then_else(test, then_part, self.parse_expr()?))
            }
            Some(Token::Let) => {
                let Some(Token::Ident(name)) = self.advance() else {
                    return Err(ParseError::ExpectedVariable);
                };
                if !self.eat(&Token::Equals) {
                    return Err(ParseError::ExpectedEqualsSign);
                }
                let rhs = self.parse_expr()?;
                if !self.eat(&Token::In) {
                    return Err(ParseError::ExpectedIn);
                }
                Ok(Expr::let_in(name, rhs, self.parse_expr()?))
            }
            Some(Token::Fun) => {
                if !self.eat(&Token::OpenParen) {
                    return Err(ParseError::ExpectedParameter);
                }
                let Some(Token::Ident(param)) = self.advance() else {
                    return Err(ParseError::ExpectedParameter);
                };
                if !self.eat(&Token::CloseParen) {
                    return Err(ParseError::ExpectedCloseParen);
                }
                Ok(Expr::function(param, self.parse_expr()?))
            }
            _ => Err(ParseError::ExpectedExpression),
        }
    }
}
