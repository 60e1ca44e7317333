//! Persistent environment chain for variable scoping.
//!
//! Extending an environment never mutates it: the new frame points at
//! the old chain through an `Rc`, so every closure created under the old
//! environment keeps seeing exactly the bindings it captured. Lookup
//! walks outward from the most recent frame, which gives lexical
//! shadowing for free.

use std::rc::Rc;

use arith_ir::Name;

use crate::error::EvalError;
use crate::value::Value;

/// An immutable association list of bindings.
#[derive(Clone, Debug, Default)]
pub enum Environment {
    /// No bindings; lookup always fails.
    #[default]
    Empty,
    /// One binding plus the rest of the chain.
    Extended(Rc<Frame>),
}

/// A single binding in the chain.
#[derive(Debug)]
pub struct Frame {
    name: Name,
    value: Value,
    rest: Environment,
}

impl Environment {
    /// A new environment with `name` bound to `value` in front of
    /// everything bound in `self`. `self` is shared, not copied.
    #[must_use]
    pub fn extend(&self, name: Name, value: Value) -> Environment {
        Environment::Extended(Rc::new(Frame {
            name,
            value,
            rest: self.clone(),
        }))
    }

    /// The value bound to `name`, innermost binding first.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let mut current = self;
        loop {
            match current {
                Environment::Empty => return Err(EvalError::UnboundVariable(name.into())),
                Environment::Extended(frame) => {
                    if frame.name.as_ref() == name {
                        return Ok(frame.value.clone());
                    }
                    current = &frame.rest;
                }
            }
        }
    }
}
