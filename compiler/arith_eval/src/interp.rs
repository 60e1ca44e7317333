//! Direct structurally-recursive evaluator.
//!
//! The simpler sibling of the step machine: each composite node
//! evaluates its children with native recursion. Result-identical to
//! [`crate::interpret_by_steps`], but deep recursion in the evaluated
//! program consumes native stack.

use std::rc::Rc;

use arith_ir::Expr;

use crate::env::Environment;
use crate::value::{EvalResult, Value};

/// Evaluate `expr` under `env`.
pub fn interpret(expr: &Expr, env: &Environment) -> EvalResult {
    match expr {
        Expr::Number(value) => Ok(Value::Number(*value)),
        Expr::Boolean(value) => Ok(Value::Boolean(*value)),
        Expr::Variable(name) => env.lookup(name),
        Expr::Add(left, right) => interpret(left, env)?.added_to(&interpret(right, env)?),
        Expr::Multiply(left, right) => {
            interpret(left, env)?.multiplied_by(&interpret(right, env)?)
        }
        Expr::Equals(left, right) => {
            Ok(Value::Boolean(interpret(left, env)? == interpret(right, env)?))
        }
        Expr::If {
            test,
            then_part,
            else_part,
        } => {
            if interpret(test, env)?.is_true()? {
                interpret(then_part, env)
            } else {
                interpret(else_part, env)
            }
        }
        Expr::Let { name, rhs, body } => {
            let bound = interpret(rhs, env)?;
            interpret(body, &env.extend(Rc::clone(name), bound))
        }
        Expr::Function { param, body } => Ok(Value::function(
            Rc::clone(param),
            Rc::clone(body),
            env.clone(),
        )),
        Expr::Call { callee, arg } => {
            let callee = interpret(callee, env)?;
            let arg = interpret(arg, env)?;
            callee.call(arg)
        }
    }
}
