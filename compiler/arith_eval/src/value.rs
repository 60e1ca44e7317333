//! Runtime values for the arith interpreter.

use std::fmt;
use std::rc::Rc;

use arith_ir::{Expr, Name};

use crate::env::Environment;
use crate::error::EvalError;
use crate::interp;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Runtime value. Immutable once constructed.
#[derive(Clone, Debug)]
pub enum Value {
    /// Integer value.
    Number(i64),
    /// Boolean value.
    Boolean(bool),
    /// Function value (closure).
    Function(Rc<Closure>),
}

/// A function value: the formal parameter, the body, and the
/// environment that was current at the definition site.
///
/// The body is shared with the expression tree it came from (it may be
/// interpreted once per call), and the captured environment is shared
/// with the defining scope.
#[derive(Clone, Debug)]
pub struct Closure {
    pub param: Name,
    pub body: Rc<Expr>,
    pub env: Environment,
}

impl Value {
    pub fn function(param: Name, body: Rc<Expr>, env: Environment) -> Value {
        Value::Function(Rc::new(Closure { param, body, env }))
    }

    /// Add `other` to this value. Defined only between two numbers.
    pub fn added_to(&self, other: &Value) -> EvalResult {
        match self {
            Value::Number(lhs) => match other {
                Value::Number(rhs) => Ok(Value::Number(lhs + rhs)),
                _ => Err(EvalError::NotANumber),
            },
            Value::Boolean(_) => Err(EvalError::AddBooleans),
            Value::Function(_) => Err(EvalError::AddFunctions),
        }
    }

    /// Multiply this value by `other`. Defined only between two numbers.
    pub fn multiplied_by(&self, other: &Value) -> EvalResult {
        match self {
            Value::Number(lhs) => match other {
                Value::Number(rhs) => Ok(Value::Number(lhs * rhs)),
                _ => Err(EvalError::NotANumber),
            },
            Value::Boolean(_) => Err(EvalError::MultiplyBooleans),
            Value::Function(_) => Err(EvalError::MultiplyFunctions),
        }
    }

    /// Truthiness for conditionals. Numbers must be exactly 0 or 1;
    /// functions have no truth value.
    pub fn is_true(&self) -> Result<bool, EvalError> {
        match self {
            Value::Number(1) => Ok(true),
            Value::Number(0) => Ok(false),
            Value::Number(_) => Err(EvalError::NumberTruth),
            Value::Boolean(value) => Ok(*value),
            Value::Function(_) => Err(EvalError::FunctionTruth),
        }
    }

    /// Apply this value to `arg` by direct interpretation.
    ///
    /// The body runs in the *captured* environment extended with the
    /// parameter binding, never in the caller's environment. The step
    /// machine performs the same extension itself instead of calling
    /// this, keeping the recursion out of the native stack.
    pub fn call(&self, arg: Value) -> EvalResult {
        match self {
            Value::Function(closure) => {
                let env = closure.env.extend(Rc::clone(&closure.param), arg);
                interp::interpret(&closure.body, &env)
            }
            Value::Number(_) => Err(EvalError::CallNumber),
            Value::Boolean(_) => Err(EvalError::CallBoolean),
        }
    }

    /// Convert back to a literal expression. A closure forgets its
    /// captured environment.
    pub fn to_expr(&self) -> Rc<Expr> {
        match self {
            Value::Number(value) => Expr::number(*value),
            Value::Boolean(value) => Expr::boolean(*value),
            Value::Function(closure) => {
                Expr::function(Rc::clone(&closure.param), Rc::clone(&closure.body))
            }
        }
    }
}

/// Structural, variant-aware equality: comparing across variants is
/// `false`, never an error. Two functions are equal when their
/// parameter and body match; the captured environment does not
/// participate.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
            (Value::Function(lhs), Value::Function(rhs)) => {
                lhs.param == rhs.param && lhs.body == rhs.body
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{value}"),
            Value::Boolean(true) => write!(f, "_true"),
            Value::Boolean(false) => write!(f, "_false"),
            Value::Function(closure) => write!(f, "_fun ({}) {}", closure.param, closure.body),
        }
    }
}
