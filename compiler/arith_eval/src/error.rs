//! Runtime failures raised during evaluation.

use arith_ir::Name;
use thiserror::Error;

/// Evaluation failure.
///
/// Raised synchronously and propagated with `?` to the caller of the
/// evaluation entry point; nothing inside the evaluator recovers from
/// one. The receiver of an operation decides the message: adding a
/// boolean to anything is "no adding booleans", while adding a
/// non-number *to* a number is "not a number".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// Variable lookup walked off the end of the environment chain.
    #[error("free variable: {0}")]
    UnboundVariable(Name),

    /// A number was combined with a non-number operand.
    #[error("not a number")]
    NotANumber,

    #[error("no adding booleans")]
    AddBooleans,

    #[error("no multiplying booleans")]
    MultiplyBooleans,

    #[error("no adding functions")]
    AddFunctions,

    #[error("no multiplying functions")]
    MultiplyFunctions,

    /// A number appeared in call position.
    #[error("no composing numbers")]
    CallNumber,

    /// A boolean appeared in call position.
    #[error("no composing booleans")]
    CallBoolean,

    /// A number other than 0 or 1 was used as a test.
    #[error("number asked to be true")]
    NumberTruth,

    /// A function was used as a test.
    #[error("function was asked if true")]
    FunctionTruth,
}
