//! Cross-strategy properties: the direct interpreter, the step machine,
//! and the optimizer must agree with each other.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::rc::Rc;

use arith_eval::{interpret, interpret_by_steps, optimize, Environment, EvalResult, Value};
use arith_ir::Expr;
use arith_parse::parse;
use proptest::prelude::*;

fn direct(expr: &Rc<Expr>) -> EvalResult {
    interpret(expr, &Environment::Empty)
}

// Strategies

/// Closed expressions (no free variables). Values and failures are both
/// fair game: an `_if` over a generated number, or arithmetic over a
/// generated boolean, should fail identically under both strategies.
fn arb_closed_expr() -> impl Strategy<Value = Rc<Expr>> {
    let leaf = prop_oneof![
        (-8i64..8).prop_map(Expr::number),
        any::<bool>().prop_map(Expr::boolean),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::add(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::multiply(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::equals(l, r)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(t, a, b)| Expr::if_then_else(t, a, b)),
            // _let x = rhs _in x + more: exercises binding and lookup
            (inner.clone(), inner.clone()).prop_map(|(rhs, more)| Expr::let_in(
                "x",
                rhs,
                Expr::add(Expr::variable("x"), more),
            )),
            // (_fun (x) x)(arg): exercises closure creation and entry
            inner
                .clone()
                .prop_map(|arg| Expr::call(Expr::function("x", Expr::variable("x")), arg)),
        ]
    })
}

/// Closed, number-valued expressions that the optimizer folds all the
/// way down: arithmetic, `_if` over boolean literals, and `_let` with a
/// number-valued rhs. (`==` is excluded — an unequal comparison is
/// deliberately left unfolded.)
fn arb_foldable_expr() -> impl Strategy<Value = Rc<Expr>> {
    let leaf = (-8i64..8).prop_map(Expr::number);
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::add(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::multiply(l, r)),
            (any::<bool>(), inner.clone(), inner.clone())
                .prop_map(|(t, a, b)| Expr::if_then_else(Expr::boolean(t), a, b)),
            (inner.clone(), inner.clone()).prop_map(|(rhs, more)| Expr::let_in(
                "x",
                rhs,
                Expr::add(Expr::variable("x"), more),
            )),
        ]
    })
}

proptest! {
    #[test]
    fn direct_and_step_agree(expr in arb_closed_expr()) {
        let direct_result = direct(&expr);
        let step_result = interpret_by_steps(Rc::clone(&expr));
        prop_assert_eq!(direct_result, step_result);
    }

    #[test]
    fn evaluation_is_deterministic(expr in arb_closed_expr()) {
        prop_assert_eq!(direct(&expr), direct(&expr));
        prop_assert_eq!(
            interpret_by_steps(Rc::clone(&expr)),
            interpret_by_steps(Rc::clone(&expr)),
        );
    }

    #[test]
    fn optimize_folds_closed_expressions_to_their_value(expr in arb_foldable_expr()) {
        let value = direct(&expr).unwrap();
        prop_assert_eq!(optimize(&expr), Ok(value.to_expr()));
    }

    #[test]
    fn substitution_agrees_with_binding(value in -8i64..8) {
        // x * (x + 1), with x either substituted in or bound in the env.
        let expr = Expr::multiply(
            Expr::variable("x"),
            Expr::add(Expr::variable("x"), Expr::number(1)),
        );
        let bound = Value::Number(value);

        let substituted = expr.substitute("x", &bound.to_expr());
        let env = Environment::Empty.extend("x".into(), bound);

        prop_assert_eq!(direct(&substituted), interpret(&expr, &env));
    }
}

// Literal scenarios

#[test]
fn arithmetic_scenario() {
    let expr = parse("2* 3 + 5").unwrap();
    assert_eq!(interpret_by_steps(expr), Ok(Value::Number(11)));
}

#[test]
fn let_scenario() {
    let expr = parse("_let x = 3 _in x + 1").unwrap();
    assert_eq!(interpret_by_steps(expr), Ok(Value::Number(4)));
}

#[test]
fn type_error_scenario() {
    let expr = parse("1 + _false").unwrap();
    assert!(direct(&expr).is_err());
    assert_eq!(direct(&expr), interpret_by_steps(expr));
}

#[test]
fn optimize_scenario() {
    let expr = parse("_if _true _then 3 _else 4").unwrap();
    assert_eq!(optimize(&expr).unwrap().to_string(), "3");
}

#[test]
fn let_substitution_shadowing() {
    // The body's x is bound by the _let, not free: only the rhs is
    // substituted.
    let expr = Expr::let_in(
        "x",
        Expr::add(Expr::variable("x"), Expr::number(1)),
        Expr::variable("x"),
    );
    let substituted = expr.substitute("x", &Value::Number(5).to_expr());
    assert_eq!(
        substituted,
        Expr::let_in(
            "x",
            Expr::add(Expr::number(5), Expr::number(1)),
            Expr::variable("x"),
        ),
    );
}

/// Recursion by self-application: the function receives itself as its
/// first argument.
const FIB: &str = "_let fib = _fun (fib) _fun (x) \
                       _if x == 0 _then 1 _else \
                       _if x == 1 _then 1 _else \
                       fib(fib)(x + -1) + fib(fib)(x + -2) \
                   _in fib(fib)(10)";

#[test]
fn fibonacci_agrees_under_both_strategies() {
    let expr = parse(FIB).unwrap();
    assert_eq!(direct(&expr), Ok(Value::Number(89)));
    assert_eq!(interpret_by_steps(expr), Ok(Value::Number(89)));
}

#[test]
fn deep_tail_recursion_does_not_overflow_the_stack() {
    // One million self-applied tail calls; far beyond any native stack,
    // trivial for the trampoline.
    let countdown = parse(
        "_let down = _fun (down) _fun (x) \
             _if x == 0 _then 0 _else down(down)(x + -1) \
         _in down(down)(1000000)",
    )
    .unwrap();
    assert_eq!(interpret_by_steps(countdown), Ok(Value::Number(0)));
}
