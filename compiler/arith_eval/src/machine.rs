//! Step-based evaluation: a continuation machine driven by a trampoline.
//!
//! Every "evaluate a sub-expression and come back" of the direct
//! interpreter is reified here as a [`Continuation`] value that records
//! exactly the state needed to resume. The machine then runs as a flat
//! loop over four registers — no native recursion, so the evaluated
//! program's recursion depth is limited by the heap, not the stack.
//!
//! The continuation chain is the call stack, as data: each continuation
//! points at the rest of the computation through `rest`, terminating in
//! [`Continuation::Done`].

use std::mem;
use std::rc::Rc;

use arith_ir::{Expr, Name};

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{EvalResult, Value};

/// What the machine does on the next iteration.
///
/// `Continue` carries the value just produced; it only exists while a
/// continuation is waiting to consume it, so "the value register is
/// unspecified in interp mode" holds by construction.
#[derive(Debug)]
enum Mode {
    /// Dispatch on the current expression.
    Interp,
    /// Feed the produced value to the current continuation.
    Continue(Value),
}

/// The rest of the computation, reified.
///
/// Each variant captures exactly what a resumed computation needs:
/// pending sibling expressions keep the environment they must be
/// evaluated under, already-computed operands are stored as values.
/// `rest` chains toward `Done` and is owned by the machine; nothing is
/// shared or mutated after construction.
#[derive(Debug, Default)]
pub enum Continuation {
    /// Terminal: the incoming value is the final result.
    #[default]
    Done,

    /// Left operand of `+` done; evaluate the right operand next.
    RightThenAdd {
        rhs: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },
    /// Both `+` operands done; combine.
    Add { lhs: Value, rest: Box<Continuation> },

    /// Left operand of `*` done; evaluate the right operand next.
    RightThenMultiply {
        rhs: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },
    /// Both `*` operands done; combine.
    Multiply { lhs: Value, rest: Box<Continuation> },

    /// Left operand of `==` done; evaluate the right operand next.
    RightThenCompare {
        rhs: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },
    /// Both `==` operands done; compare structurally.
    Compare { lhs: Value, rest: Box<Continuation> },

    /// Test of an `_if` done; pick a branch by its truthiness.
    IfBranch {
        then_part: Rc<Expr>,
        else_part: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },

    /// Rhs of a `_let` done; bind it and evaluate the body.
    LetBody {
        name: Name,
        body: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },

    /// Callee of a call done; evaluate the argument next.
    ArgThenCall {
        arg: Rc<Expr>,
        env: Environment,
        rest: Box<Continuation>,
    },
    /// Callee and argument done; enter the function body.
    Call {
        callee: Value,
        rest: Box<Continuation>,
    },
}

/// The machine registers.
///
/// One explicit state struct threaded through the loop — the register
/// machine semantics without global mutable state.
pub struct Machine {
    mode: Mode,
    expr: Rc<Expr>,
    env: Environment,
    cont: Continuation,
}

/// Evaluate `expr` by steps, starting from the empty environment.
///
/// Result-identical to [`crate::interpret`] (same values, same
/// failures), but iterative: deeply recursive programs cannot overflow
/// the native call stack.
pub fn interpret_by_steps(expr: Rc<Expr>) -> EvalResult {
    let mut machine = Machine {
        mode: Mode::Interp,
        expr,
        env: Environment::Empty,
        cont: Continuation::Done,
    };

    let mut steps: u64 = 0;
    loop {
        steps += 1;
        match mem::replace(&mut machine.mode, Mode::Interp) {
            Mode::Interp => machine.interp_step()?,
            Mode::Continue(value) => {
                let cont = mem::take(&mut machine.cont);
                if let Some(result) = machine.continue_step(cont, value)? {
                    tracing::debug!(steps, "step evaluation finished");
                    return Ok(result);
                }
            }
        }
    }
}

impl Machine {
    /// Take one step in interp mode: dispatch on the current expression.
    ///
    /// Leaves (and function literals, which build their closure without
    /// touching their body) produce a value immediately. Composites push
    /// a continuation recording the pending operation and descend into
    /// their first sub-expression: left operand first, test before
    /// branches, rhs before body, callee before argument.
    fn interp_step(&mut self) -> Result<(), EvalError> {
        let expr = Rc::clone(&self.expr);
        match &*expr {
            Expr::Number(value) => self.mode = Mode::Continue(Value::Number(*value)),
            Expr::Boolean(value) => self.mode = Mode::Continue(Value::Boolean(*value)),
            Expr::Variable(name) => self.mode = Mode::Continue(self.env.lookup(name)?),
            Expr::Function { param, body } => {
                self.mode = Mode::Continue(Value::function(
                    Rc::clone(param),
                    Rc::clone(body),
                    self.env.clone(),
                ));
            }
            Expr::Add(left, right) => {
                self.mode = Mode::Interp;
                self.cont = Continuation::RightThenAdd {
                    rhs: Rc::clone(right),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(left);
            }
            Expr::Multiply(left, right) => {
                self.mode = Mode::Interp;
                self.cont = Continuation::RightThenMultiply {
                    rhs: Rc::clone(right),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(left);
            }
            Expr::Equals(left, right) => {
                self.mode = Mode::Interp;
                self.cont = Continuation::RightThenCompare {
                    rhs: Rc::clone(right),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(left);
            }
            Expr::If {
                test,
                then_part,
                else_part,
            } => {
                self.mode = Mode::Interp;
                self.cont = Continuation::IfBranch {
                    then_part: Rc::clone(then_part),
                    else_part: Rc::clone(else_part),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(test);
            }
            Expr::Let { name, rhs, body } => {
                self.mode = Mode::Interp;
                self.cont = Continuation::LetBody {
                    name: Rc::clone(name),
                    body: Rc::clone(body),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(rhs);
            }
            Expr::Call { callee, arg } => {
                self.mode = Mode::Interp;
                self.cont = Continuation::ArgThenCall {
                    arg: Rc::clone(arg),
                    env: self.env.clone(),
                    rest: Box::new(mem::take(&mut self.cont)),
                };
                self.expr = Rc::clone(callee);
            }
        }
        Ok(())
    }

    /// Take one step in continue mode: the continuation consumes the
    /// produced value and rewrites the registers.
    ///
    /// Returns `Some(value)` only for [`Continuation::Done`] — the
    /// machine's single exit point.
    fn continue_step(
        &mut self,
        cont: Continuation,
        value: Value,
    ) -> Result<Option<Value>, EvalError> {
        match cont {
            Continuation::Done => return Ok(Some(value)),

            Continuation::RightThenAdd { rhs, env, rest } => {
                self.mode = Mode::Interp;
                self.expr = rhs;
                self.env = env;
                self.cont = Continuation::Add { lhs: value, rest };
            }
            Continuation::Add { lhs, rest } => {
                self.mode = Mode::Continue(lhs.added_to(&value)?);
                self.cont = *rest;
            }

            Continuation::RightThenMultiply { rhs, env, rest } => {
                self.mode = Mode::Interp;
                self.expr = rhs;
                self.env = env;
                self.cont = Continuation::Multiply { lhs: value, rest };
            }
            Continuation::Multiply { lhs, rest } => {
                self.mode = Mode::Continue(lhs.multiplied_by(&value)?);
                self.cont = *rest;
            }

            Continuation::RightThenCompare { rhs, env, rest } => {
                self.mode = Mode::Interp;
                self.expr = rhs;
                self.env = env;
                self.cont = Continuation::Compare { lhs: value, rest };
            }
            Continuation::Compare { lhs, rest } => {
                self.mode = Mode::Continue(Value::Boolean(lhs == value));
                self.cont = *rest;
            }

            Continuation::IfBranch {
                then_part,
                else_part,
                env,
                rest,
            } => {
                self.mode = Mode::Interp;
                self.expr = if value.is_true()? { then_part } else { else_part };
                self.env = env;
                self.cont = *rest;
            }

            Continuation::LetBody {
                name,
                body,
                env,
                rest,
            } => {
                self.mode = Mode::Interp;
                self.expr = body;
                self.env = env.extend(name, value);
                self.cont = *rest;
            }

            Continuation::ArgThenCall { arg, env, rest } => {
                self.mode = Mode::Interp;
                self.expr = arg;
                self.env = env;
                self.cont = Continuation::Call {
                    callee: value,
                    rest,
                };
            }
            // The argument was evaluated in the caller's environment;
            // the body runs in the callee's captured environment
            // extended with the parameter binding, exactly as in the
            // direct interpreter.
            Continuation::Call { callee, rest } => match callee {
                Value::Function(closure) => {
                    self.mode = Mode::Interp;
                    self.expr = Rc::clone(&closure.body);
                    self.env = closure.env.extend(Rc::clone(&closure.param), value);
                    self.cont = *rest;
                }
                Value::Number(_) => return Err(EvalError::CallNumber),
                Value::Boolean(_) => return Err(EvalError::CallBoolean),
            },
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literals_finish_in_two_steps_worth_of_loop() {
        assert_eq!(interpret_by_steps(Expr::number(5)), Ok(Value::Number(5)));
        assert_eq!(
            interpret_by_steps(Expr::boolean(false)),
            Ok(Value::Boolean(false)),
        );
    }

    #[test]
    fn operands_reduce_left_to_right() {
        // (2 * 3) + 5: the multiply must be fully reduced before the add
        // continuation sees a value.
        let expr = Expr::add(
            Expr::multiply(Expr::number(2), Expr::number(3)),
            Expr::number(5),
        );
        assert_eq!(interpret_by_steps(expr), Ok(Value::Number(11)));
    }

    #[test]
    fn let_extends_the_environment_for_the_body() {
        let expr = Expr::let_in(
            "x",
            Expr::number(3),
            Expr::add(Expr::variable("x"), Expr::number(1)),
        );
        assert_eq!(interpret_by_steps(expr), Ok(Value::Number(4)));
    }

    #[test]
    fn calls_enter_the_captured_environment() {
        // _let x = 1 _in _let f = _fun (y) x _in _let x = 99 _in f(0)
        let expr = Expr::let_in(
            "x",
            Expr::number(1),
            Expr::let_in(
                "f",
                Expr::function("y", Expr::variable("x")),
                Expr::let_in(
                    "x",
                    Expr::number(99),
                    Expr::call(Expr::variable("f"), Expr::number(0)),
                ),
            ),
        );
        assert_eq!(interpret_by_steps(expr), Ok(Value::Number(1)));
    }

    #[test]
    fn failures_match_the_direct_interpreter() {
        let cases = [
            Expr::add(Expr::number(1), Expr::boolean(false)),
            Expr::variable("nope"),
            Expr::call(Expr::number(3), Expr::number(4)),
            Expr::call(Expr::boolean(true), Expr::number(4)),
            Expr::if_then_else(Expr::number(5), Expr::number(1), Expr::number(2)),
            Expr::if_then_else(
                Expr::function("x", Expr::variable("x")),
                Expr::number(1),
                Expr::number(2),
            ),
        ];
        for expr in cases {
            let direct = crate::interpret(&expr, &Environment::Empty);
            let stepped = interpret_by_steps(Rc::clone(&expr));
            assert!(direct.is_err());
            assert_eq!(direct, stepped);
        }
    }

    #[test]
    fn tail_calls_do_not_grow_the_continuation_chain() {
        // A self-applied countdown: each recursive call happens in tail
        // position, so the machine reuses its continuation instead of
        // stacking a new one. Large enough to overflow a native stack if
        // it ever recursed.
        let countdown = arith_parse::parse(
            "_let down = _fun (down) _fun (x) \
                 _if x == 0 _then 0 _else down(down)(x + -1) \
             _in down(down)(100000)",
        )
        .unwrap();
        assert_eq!(interpret_by_steps(countdown), Ok(Value::Number(0)));
    }
}
