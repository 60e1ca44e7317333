//! Partial evaluation by constant folding.
//!
//! Any subtree with no variables is reduced by interpreting it under
//! the empty environment and converting the value back to a literal.
//! Variable-bearing subtrees are rebuilt with optimized children. Two
//! structural collapses go further: an `_if` whose optimized test is
//! closed keeps only the selected branch, and an `==` whose optimized
//! sides are structurally equal becomes `_true`.
//!
//! Folding a closed but ill-typed subtree (say `(1 + _false)`)
//! propagates the evaluation error instead of producing a tree.

use std::rc::Rc;

use arith_ir::Expr;

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp::interpret;
use crate::value::Value;

/// Optimize `expr` into an equivalent, usually smaller, expression.
pub fn optimize(expr: &Rc<Expr>) -> Result<Rc<Expr>, EvalError> {
    match &**expr {
        Expr::Number(_) | Expr::Boolean(_) | Expr::Variable(_) => Ok(Rc::clone(expr)),
        Expr::Add(left, right) => {
            if expr.has_variable() {
                Ok(Expr::add(optimize(left)?, optimize(right)?))
            } else {
                Ok(interpret(expr, &Environment::Empty)?.to_expr())
            }
        }
        Expr::Multiply(left, right) => {
            if expr.has_variable() {
                Ok(Expr::multiply(optimize(left)?, optimize(right)?))
            } else {
                Ok(interpret(expr, &Environment::Empty)?.to_expr())
            }
        }
        // Collapses only on structural equality of the optimized sides;
        // a closed-but-unequal comparison is left intact.
        Expr::Equals(left, right) => {
            let left = optimize(left)?;
            let right = optimize(right)?;
            if left == right {
                Ok(Expr::boolean(true))
            } else {
                Ok(Expr::equals(left, right))
            }
        }
        // A closed test selects its branch by comparing the test's value
        // against boolean true. Note the asymmetry with evaluation: a
        // numeric test is not equal to `_true`, so it selects the else
        // branch here even though `_if 1` takes the then branch when
        // interpreted.
        Expr::If {
            test,
            then_part,
            else_part,
        } => {
            let test = optimize(test)?;
            let then_part = optimize(then_part)?;
            let else_part = optimize(else_part)?;
            if test.has_variable() {
                Ok(Expr::if_then_else(test, then_part, else_part))
            } else if interpret(&test, &Environment::Empty)? == Value::Boolean(true) {
                Ok(then_part)
            } else {
                Ok(else_part)
            }
        }
        // A closed rhs is evaluated once and substituted into the
        // optimized body, then the result is optimized again — a single
        // pass, not a fixed point.
        Expr::Let { name, rhs, body } => {
            if rhs.has_variable() {
                Ok(Expr::let_in(Rc::clone(name), optimize(rhs)?, optimize(body)?))
            } else {
                let bound = interpret(rhs, &Environment::Empty)?;
                let body = optimize(body)?;
                optimize(&body.substitute(name, &bound.to_expr()))
            }
        }
        Expr::Function { param, body } => Ok(Expr::function(Rc::clone(param), optimize(body)?)),
        Expr::Call { callee, arg } => Ok(Expr::call(optimize(callee)?, optimize(arg)?)),
    }
}
