//! Expression nodes and the tree transformations defined on them.

use std::fmt;
use std::rc::Rc;

/// A variable or parameter name.
///
/// `Rc<str>` keeps binding a name during evaluation allocation-free.
pub type Name = Rc<str>;

/// Expression node.
///
/// A closed sum type: every operation over expressions is an exhaustive
/// match, so adding a variant is a compile-time event, not a runtime one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal: `42`, `-7`
    Number(i64),

    /// Boolean literal: `_true`, `_false`
    Boolean(bool),

    /// Variable reference
    Variable(Name),

    /// Addition: `(left + right)`
    Add(Rc<Expr>, Rc<Expr>),

    /// Multiplication: `(left * right)`
    Multiply(Rc<Expr>, Rc<Expr>),

    /// Structural comparison: `left == right`
    Equals(Rc<Expr>, Rc<Expr>),

    /// Conditional: `_if test _then then_part _else else_part`
    If {
        test: Rc<Expr>,
        then_part: Rc<Expr>,
        else_part: Rc<Expr>,
    },

    /// Binding: `_let name = rhs _in body`
    Let {
        name: Name,
        rhs: Rc<Expr>,
        body: Rc<Expr>,
    },

    /// Single-argument function literal: `_fun (param) body`
    Function { param: Name, body: Rc<Expr> },

    /// Application: `callee(arg)`
    Call { callee: Rc<Expr>, arg: Rc<Expr> },
}

impl Expr {
    pub fn number(value: i64) -> Rc<Expr> {
        Rc::new(Expr::Number(value))
    }

    pub fn boolean(value: bool) -> Rc<Expr> {
        Rc::new(Expr::Boolean(value))
    }

    pub fn variable(name: impl Into<Name>) -> Rc<Expr> {
        Rc::new(Expr::Variable(name.into()))
    }

    pub fn add(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Add(left, right))
    }

    pub fn multiply(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Multiply(left, right))
    }

    pub fn equals(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Equals(left, right))
    }

    pub fn if_then_else(test: Rc<Expr>, then_part: Rc<Expr>, else_part: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::If {
            test,
            then_part,
            else_part,
        })
    }

    pub fn let_in(name: impl Into<Name>, rhs: Rc<Expr>, body: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Let {
            name: name.into(),
            rhs,
            body,
        })
    }

    pub fn function(param: impl Into<Name>, body: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Function {
            param: param.into(),
            body,
        })
    }

    pub fn call(callee: Rc<Expr>, arg: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Call { callee, arg })
    }

    /// Whether this subtree mentions any variable.
    ///
    /// Drives the optimizer's "is this subtree closed?" decision. A
    /// `Function` literal always counts as variable-bearing: its body is
    /// not evaluated until the function is applied, so it is never
    /// folded away even when the body happens to be closed.
    pub fn has_variable(&self) -> bool {
        match self {
            Expr::Number(_) | Expr::Boolean(_) => false,
            Expr::Variable(_) | Expr::Function { .. } => true,
            Expr::Add(left, right) | Expr::Multiply(left, right) | Expr::Equals(left, right) => {
                left.has_variable() || right.has_variable()
            }
            Expr::If {
                test,
                then_part,
                else_part,
            } => test.has_variable() || then_part.has_variable() || else_part.has_variable(),
            Expr::Let { rhs, body, .. } => rhs.has_variable() || body.has_variable(),
            Expr::Call { callee, arg } => callee.has_variable() || arg.has_variable(),
        }
    }

    /// Replace every free occurrence of `name` with `replacement`.
    ///
    /// Pure rebuild; the receiver is untouched and untouched subtrees are
    /// shared with the result. Binding forms shadow: a `Function` whose
    /// parameter is `name` keeps its body as-is, and a `Let` that binds
    /// `name` substitutes into its `rhs` (which is outside the binding's
    /// scope) but not into its `body`.
    pub fn substitute(self: &Rc<Self>, name: &str, replacement: &Rc<Expr>) -> Rc<Expr> {
        match &**self {
            Expr::Number(_) | Expr::Boolean(_) => Rc::clone(self),
            Expr::Variable(var) => {
                if var.as_ref() == name {
                    Rc::clone(replacement)
                } else {
                    Rc::clone(self)
                }
            }
            Expr::Add(left, right) => Expr::add(
                left.substitute(name, replacement),
                right.substitute(name, replacement),
            ),
            Expr::Multiply(left, right) => Expr::multiply(
                left.substitute(name, replacement),
                right.substitute(name, replacement),
            ),
            Expr::Equals(left, right) => Expr::equals(
                left.substitute(name, replacement),
                right.substitute(name, replacement),
            ),
            Expr::If {
                test,
                then_part,
                else_part,
            } => Expr::if_then_else(
                test.substitute(name, replacement),
                then_part.substitute(name, replacement),
                else_part.substitute(name, replacement),
            ),
            Expr::Let {
                name: bound,
                rhs,
                body,
            } => {
                let body = if bound.as_ref() == name {
                    Rc::clone(body)
                } else {
                    body.substitute(name, replacement)
                };
                Expr::let_in(Rc::clone(bound), rhs.substitute(name, replacement), body)
            }
            Expr::Function { param, body } => {
                let body = if param.as_ref() == name {
                    Rc::clone(body)
                } else {
                    body.substitute(name, replacement)
                };
                Expr::function(Rc::clone(param), body)
            }
            Expr::Call { callee, arg } => Expr::call(
                callee.substitute(name, replacement),
                arg.substitute(name, replacement),
            ),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{value}"),
            Expr::Boolean(true) => write!(f, "_true"),
            Expr::Boolean(false) => write!(f, "_false"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Multiply(left, right) => write!(f, "({left} * {right})"),
            Expr::Equals(left, right) => write!(f, "{left} == {right}"),
            Expr::If {
                test,
                then_part,
                else_part,
            } => write!(f, "_if {test} _then {then_part} _else {else_part}"),
            Expr::Let { name, rhs, body } => write!(f, "_let {name} = {rhs} _in ({body})"),
            Expr::Function { param, body } => write!(f, "(_fun ({param}) {body})"),
            Expr::Call { callee, arg } => write!(f, "{callee}({arg})"),
        }
    }
}
