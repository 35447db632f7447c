use std::collections::HashMap;

use log::debug;

use crate::{
    ast::{
        ast::{BinaryOp, Expr, Integer, UnaryOp},
        statements::Statement,
    },
    errors::errors::{Error, ErrorImpl},
    SourceSpan,
};

/// Name resolution and the extension points for functional terms.
///
/// Only `lookup` is required. An environment that cannot apply lambdas or
/// calls reports `UnsupportedExpression` for them.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<Integer>;

    fn apply_lambda(&self, _parameter: &str, _body: &Expr) -> Result<Integer, ErrorImpl> {
        Err(ErrorImpl::UnsupportedExpression {
            kind: String::from("lambda"),
        })
    }

    /// Receives the call's operands unevaluated.
    fn apply_call(&self, _callee: &Expr, _args: &[Expr]) -> Result<Integer, ErrorImpl> {
        Err(ErrorImpl::UnsupportedExpression {
            kind: String::from("call"),
        })
    }
}

impl Environment for HashMap<String, Integer> {
    fn lookup(&self, name: &str) -> Option<Integer> {
        self.get(name).copied()
    }
}

/// The empty environment: every identifier is unbound.
impl Environment for () {
    fn lookup(&self, _name: &str) -> Option<Integer> {
        None
    }
}

// Nodes carry no positions, so evaluation errors point at the start of input.
fn eval_error(kind: ErrorImpl) -> Error {
    Error::new(kind, SourceSpan::default())
}

/// Evaluates `expr` with checked 64-bit integer arithmetic.
///
/// Operands are evaluated left before right. The tree is never modified,
/// so a failed evaluation can be retried under another environment.
pub fn evaluate(expr: &Expr, env: &dyn Environment) -> Result<Integer, Error> {
    match expr {
        Expr::Literal(value) => Ok(*value),
        Expr::Identifier(name) => env.lookup(name).ok_or_else(|| {
            eval_error(ErrorImpl::UnboundIdentifier { name: name.clone() })
        }),
        Expr::UnaryOp { op, operand } => {
            let value = evaluate(operand, env)?;
            match op {
                UnaryOp::Neg => value
                    .checked_neg()
                    .ok_or_else(|| eval_error(ErrorImpl::ArithmeticOverflow)),
                UnaryOp::Plus => Ok(value),
            }
        }
        Expr::BinaryOp { op, left, right } => {
            let left = evaluate(left, env)?;
            let right = evaluate(right, env)?;
            apply_binary(*op, left, right).map_err(eval_error)
        }
        Expr::Lambda { parameter, body } => {
            env.apply_lambda(parameter, body).map_err(eval_error)
        }
        Expr::Call { callee, args } => env.apply_call(callee, args).map_err(eval_error),
    }
}

fn apply_binary(op: BinaryOp, left: Integer, right: Integer) -> Result<Integer, ErrorImpl> {
    let result = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div | BinaryOp::Mod if right == 0 => return Err(ErrorImpl::DivisionByZero),
        BinaryOp::Div => left.checked_div(right),
        BinaryOp::Mod => left.checked_rem(right),
        BinaryOp::Pow => return power(left, right),
    };
    result.ok_or(ErrorImpl::ArithmeticOverflow)
}

fn power(base: Integer, exponent: Integer) -> Result<Integer, ErrorImpl> {
    if exponent < 0 {
        return Err(ErrorImpl::InvalidExponent { exponent });
    }

    match (base, u32::try_from(exponent)) {
        (_, Ok(exponent)) => base
            .checked_pow(exponent)
            .ok_or(ErrorImpl::ArithmeticOverflow),
        // Only these bases survive an exponent beyond u32.
        (0 | 1, Err(_)) => Ok(base),
        (-1, Err(_)) => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        (_, Err(_)) => Err(ErrorImpl::ArithmeticOverflow),
    }
}

/// Evaluates every expression root of `statement`, in order.
///
/// A `let` yields the value bound to its name; the binding itself is left
/// to the caller.
pub fn evaluate_statement(
    statement: &Statement,
    env: &dyn Environment,
) -> Result<Vec<Integer>, Error> {
    let values = statement
        .iter()
        .map(|expr| evaluate(expr, env))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("evaluated {} expression(s)", values.len());
    Ok(values)
}
