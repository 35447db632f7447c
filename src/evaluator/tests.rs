//! Unit tests for expression evaluation.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, Integer},
        statements::Statement,
    },
    errors::errors::ErrorImpl,
    grammar::builtin::{calculator_grammar, lambda_grammar},
    parser::parser::parse,
};

use super::evaluator::{evaluate, evaluate_statement, Environment};

fn calc(source: &str) -> Result<Vec<Integer>, ErrorImpl> {
    let statement = parse(source, &calculator_grammar()).unwrap();
    evaluate_statement(&statement, &()).map_err(|err| err.into_kind())
}

fn calc_one(source: &str) -> Integer {
    calc(source).unwrap()[0]
}

/// Applies a single native function, `double`, to evaluated arguments.
struct Natives;

impl Environment for Natives {
    fn lookup(&self, _name: &str) -> Option<Integer> {
        None
    }

    fn apply_call(&self, callee: &Expr, args: &[Expr]) -> Result<Integer, ErrorImpl> {
        match (callee, args) {
            (Expr::Identifier(name), [arg]) if name == "double" => {
                let value = evaluate(arg, self).map_err(|err| err.into_kind())?;
                Ok(value * 2)
            }
            _ => Err(ErrorImpl::UnsupportedExpression {
                kind: callee.kind_name().to_string(),
            }),
        }
    }
}

#[test]
fn test_evaluate_arithmetic() {
    assert_eq!(calc_one("2+3*4"), 14);
    assert_eq!(calc_one("2^3^2"), 512);
    assert_eq!(calc_one("(2+3)*4"), 20);
    assert_eq!(calc_one("10/3"), 3);
    assert_eq!(calc_one("10 - 4 - 3"), 3);
    assert_eq!(calc_one("7 % 4"), 3);
    assert_eq!(calc_one("0x1F + 1"), 32);
}

#[test]
fn test_evaluate_unary() {
    assert_eq!(calc_one("-3 + 5"), 2);
    assert_eq!(calc_one("+4"), 4);
    assert_eq!(calc_one("-2^2"), 4);
    assert_eq!(calc_one("--7"), 7);
}

#[test]
fn test_evaluate_statement_list() {
    assert_eq!(calc("1; 2*2; 3^3").unwrap(), vec![1, 4, 27]);
    assert_eq!(calc("").unwrap(), Vec::<Integer>::new());
}

#[test]
fn test_evaluate_division_by_zero() {
    assert_eq!(calc("1/0"), Err(ErrorImpl::DivisionByZero));
    assert_eq!(calc("1%0"), Err(ErrorImpl::DivisionByZero));
}

#[test]
fn test_evaluate_invalid_exponent() {
    assert_eq!(
        calc("2^(0-1)"),
        Err(ErrorImpl::InvalidExponent { exponent: -1 })
    );
}

#[test]
fn test_evaluate_overflow() {
    assert_eq!(calc("2^63"), Err(ErrorImpl::ArithmeticOverflow));
    assert_eq!(
        calc("9223372036854775807 + 1"),
        Err(ErrorImpl::ArithmeticOverflow)
    );
    assert_eq!(calc_one("2^62"), 1 << 62);
}

#[test]
fn test_evaluate_huge_exponent() {
    assert_eq!(calc_one("1^9999999999"), 1);
    assert_eq!(calc_one("(0-1)^9999999999"), -1);
    assert_eq!(calc("2^9999999999"), Err(ErrorImpl::ArithmeticOverflow));
}

#[test]
fn test_evaluate_identifiers() {
    let statement = parse("x * y + 1", &calculator_grammar()).unwrap();

    let mut env: HashMap<String, Integer> = HashMap::new();
    env.insert(String::from("x"), 6);
    env.insert(String::from("y"), 7);
    assert_eq!(evaluate_statement(&statement, &env).unwrap(), vec![43]);

    env.remove("y");
    let err = evaluate_statement(&statement, &env).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnboundIdentifier {
            name: String::from("y")
        }
    );
    assert!(!err.is_parse_error());
}

#[test]
fn test_evaluate_does_not_consume_tree() {
    let statement = parse("a + 1", &calculator_grammar()).unwrap();
    assert!(evaluate_statement(&statement, &()).is_err());

    let env: HashMap<String, Integer> = HashMap::from([(String::from("a"), 41)]);
    assert_eq!(evaluate_statement(&statement, &env).unwrap(), vec![42]);
}

#[test]
fn test_evaluate_lambda_unsupported() {
    let statement = parse("let id = fn x => x", &lambda_grammar()).unwrap();
    let err = evaluate_statement(&statement, &()).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnsupportedExpression {
            kind: String::from("lambda")
        }
    );
}

#[test]
fn test_evaluate_native_call() {
    let statement = parse("let four = double (double one)", &lambda_grammar()).unwrap();
    let err = evaluate_statement(&statement, &Natives).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnboundIdentifier {
            name: String::from("one")
        }
    );

    let statement = parse("let x = triple one", &lambda_grammar()).unwrap();
    let err = evaluate_statement(&statement, &Natives).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnsupportedExpression {
            kind: String::from("identifier")
        }
    );

    let call = Expr::call(Expr::identifier("double"), vec![Expr::Literal(21)]);
    assert_eq!(evaluate(&call, &Natives).unwrap(), 42);

    let statement = Statement::Let {
        name: String::from("n"),
        value: call,
    };
    assert_eq!(evaluate_statement(&statement, &Natives).unwrap(), vec![42]);
}
