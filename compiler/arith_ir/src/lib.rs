//! Expression AST for the arith language.
//!
//! The tree is immutable after construction. Composite nodes hold their
//! children behind `Rc` so that closures and continuations can keep a
//! subtree alive without copying it; no node is ever mutated, so the
//! sharing is safe.

mod expr;

pub use expr::{Expr, Name};
