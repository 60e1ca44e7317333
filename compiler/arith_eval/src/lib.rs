//! Evaluator for the arith language.
//!
//! Two evaluation strategies over the same data model:
//!
//! - [`interpret`] — direct structural recursion, one native stack frame
//!   per nested expression.
//! - [`interpret_by_steps`] — a trampoline driving an explicit
//!   continuation machine, so recursion depth in the evaluated program
//!   never grows the native stack.
//!
//! Both strategies produce identical results and fail under identical
//! conditions. [`optimize`] is a third, non-evaluating consumer of the
//! data model: it partially evaluates an expression by constant-folding
//! every closed subtree.

mod env;
mod error;
mod interp;
pub mod machine;
mod optimize;
mod value;

pub use env::Environment;
pub use error::EvalError;
pub use interp::interpret;
pub use machine::interpret_by_steps;
pub use optimize::optimize;
pub use value::{Closure, EvalResult, Value};
