//! Unit tests for the parser module.
//!
//! This module contains tests for parsing with the stock grammars:
//! - Operator precedence and associativity
//! - Integer literals
//! - Application and lambdas
//! - Error kinds and positions

use crate::{
    ast::{
        ast::{BinaryOp, Expr, UnaryOp},
        statements::Statement,
    },
    errors::errors::ErrorImpl,
    grammar::{
        builtin::{calculator_grammar, lambda_grammar},
        grammar::Grammar,
        operators::OperatorTable,
        rules::Rule,
    },
    MK_LEVEL,
};

use super::parser::{parse, parse_expression};

fn lit(value: i64) -> Expr {
    Expr::Literal(value)
}

fn single(source: &str) -> Expr {
    match parse(source, &calculator_grammar()) {
        Ok(Statement::Expressions(mut exprs)) if exprs.len() == 1 => exprs.remove(0),
        other => panic!("expected one expression, got {:?}", other),
    }
}

fn let_value(source: &str) -> Expr {
    match parse(source, &lambda_grammar()) {
        Ok(Statement::Let { value, .. }) => value,
        other => panic!("expected a let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        single("2+3*4"),
        Expr::binary(BinaryOp::Add, lit(2), Expr::binary(BinaryOp::Mul, lit(3), lit(4)))
    );
}

#[test]
fn test_parse_left_associative() {
    assert_eq!(
        single("8 - 3 - 2"),
        Expr::binary(BinaryOp::Sub, Expr::binary(BinaryOp::Sub, lit(8), lit(3)), lit(2))
    );
}

#[test]
fn test_parse_right_associative() {
    assert_eq!(
        single("2^3^2"),
        Expr::binary(BinaryOp::Pow, lit(2), Expr::binary(BinaryOp::Pow, lit(3), lit(2)))
    );
}

#[test]
fn test_parse_parenthesized() {
    assert_eq!(
        single("(2+3)*4"),
        Expr::binary(BinaryOp::Mul, Expr::binary(BinaryOp::Add, lit(2), lit(3)), lit(4))
    );
}

#[test]
fn test_parse_newline_inside_parentheses() {
    assert_eq!(
        single("(1 +\n 2\n)"),
        Expr::binary(BinaryOp::Add, lit(1), lit(2))
    );
}

#[test]
fn test_parse_symbols_map_to_matching_tags() {
    assert_eq!(single("1+2"), Expr::binary(BinaryOp::Add, lit(1), lit(2)));
    assert_eq!(single("1-2"), Expr::binary(BinaryOp::Sub, lit(1), lit(2)));
    assert_eq!(single("7%2"), Expr::binary(BinaryOp::Mod, lit(7), lit(2)));
}

#[test]
fn test_parse_unary_binds_tighter_than_power() {
    assert_eq!(
        single("-2^2"),
        Expr::binary(BinaryOp::Pow, Expr::unary(UnaryOp::Neg, lit(2)), lit(2))
    );
    assert_eq!(
        single("1 - -2"),
        Expr::binary(BinaryOp::Sub, lit(1), Expr::unary(UnaryOp::Neg, lit(2)))
    );
}

#[test]
fn test_parse_hex_literal() {
    assert_eq!(single("0x1F"), lit(31));
    assert_eq!(single("0"), lit(0));
    assert_eq!(single("0x10 + 10"), Expr::binary(BinaryOp::Add, lit(16), lit(10)));
}

#[test]
fn test_parse_hex_prefix_without_digits() {
    let err = parse("0x", &calculator_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::ExpectedDigit { radix: 16 });
    assert_eq!(err.get_span().offset, 2);
}

#[test]
fn test_parse_integer_overflow() {
    let err = parse("99999999999999999999", &calculator_grammar()).unwrap_err();
    assert!(matches!(err.get_kind(), ErrorImpl::IntegerOverflow { .. }));
    assert_eq!(err.get_span().offset, 0);
    assert_eq!(err.get_span().length, 20);
}

#[test]
fn test_parse_missing_operand() {
    let err = parse("2+", &calculator_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::ExpectedOperand);
    assert_eq!(err.get_span().offset, 2);
}

#[test]
fn test_parse_missing_closing_paren() {
    let err = parse("(1+2", &calculator_grammar()).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::ExpectedClosingDelimiter {
            delimiter: String::from(")")
        }
    );
    assert_eq!(err.get_span().offset, 4);
}

#[test]
fn test_parse_trailing_garbage() {
    let err = parse("1 2", &calculator_grammar()).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnexpectedCharacter {
            found: String::from("2")
        }
    );
    assert_eq!(err.get_span().offset, 2);

    let err = parse("1\n2", &calculator_grammar()).unwrap_err();
    assert_eq!(err.get_span().offset, 2);
}

#[test]
fn test_parse_statement_list() {
    let statement = parse("1; 2;3\n", &calculator_grammar()).unwrap();
    assert_eq!(statement, Statement::Expressions(vec![lit(1), lit(2), lit(3)]));
    assert_eq!(statement.to_string(), "1; 2; 3");
}

#[test]
fn test_parse_empty_input() {
    let statement = parse("", &calculator_grammar()).unwrap();
    assert!(statement.is_empty());

    let statement = parse("   \n", &calculator_grammar()).unwrap();
    assert!(statement.is_empty());
}

#[test]
fn test_parse_identifier_operand() {
    assert_eq!(
        single("x * 2"),
        Expr::binary(BinaryOp::Mul, Expr::identifier("x"), lit(2))
    );
}

#[test]
fn test_parse_nesting_too_deep() {
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    let err = parse(&source, &calculator_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::NestingTooDeep { limit: 64 });

    let source = format!("{}1", "-".repeat(100));
    let err = parse(&source, &calculator_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::NestingTooDeep { limit: 64 });
}

#[test]
fn test_parse_nesting_within_limit() {
    let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(single(&source), lit(1));
}

#[test]
fn test_parse_custom_depth_limit() {
    let mut grammar = calculator_grammar();
    grammar.set_max_depth(4);

    // The outermost expression and each parenthesized one cost a level.
    assert_eq!(parse("(((1)))", &grammar).unwrap().to_string(), "1");

    let err = parse("((((1))))", &grammar).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::NestingTooDeep { limit: 4 });
}

#[test]
fn test_parse_expression_embedded_in_atom_is_bounded() {
    let operators = OperatorTable::new(vec![MK_LEVEL!(Left; "+" => Add)], vec![]).unwrap();
    let mut grammar = Grammar::new("expression", "atom", operators);
    grammar.rule(
        "atom",
        Rule::alt(vec![
            Rule::parenthesized(Rule::Expression),
            Rule::integer(10),
        ]),
    );

    assert_eq!(
        parse_expression("((1) + 2)", &grammar).unwrap(),
        Expr::binary(BinaryOp::Add, lit(1), lit(2))
    );

    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_expression(&source, &grammar).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::NestingTooDeep { limit: 64 });
}

#[test]
fn test_parse_lambda_nesting_costs_one_level_each() {
    let nested = |depth: usize| format!("let f = {}x", "fn x => ".repeat(depth));

    let statement = parse(&nested(40), &lambda_grammar()).unwrap();
    assert_eq!(statement.to_string(), nested(40));

    let err = parse(&nested(70), &lambda_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::NestingTooDeep { limit: 64 });
}

#[test]
fn test_parse_non_associative_chain() {
    let operators = OperatorTable::new(
        vec![
            MK_LEVEL!(None; "==" => Sub),
            MK_LEVEL!(Left; "+" => Add),
        ],
        vec![],
    )
    .unwrap();
    let mut grammar = Grammar::new("expression", "atom", operators);
    grammar.rule("expression", Rule::Expression);
    grammar.rule("atom", Rule::integer(10));

    assert_eq!(
        parse_expression("1 == 2 + 3", &grammar).unwrap(),
        Expr::binary(BinaryOp::Sub, lit(1), Expr::binary(BinaryOp::Add, lit(2), lit(3)))
    );

    let err = parse_expression("1 == 2 == 3", &grammar).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::NonAssociativeChain {
            symbol: String::from("==")
        }
    );
    assert_eq!(err.get_span().offset, 7);
}

#[test]
fn test_parse_longest_operator_wins() {
    let operators = OperatorTable::new(
        vec![
            MK_LEVEL!(Left; "*" => Mul),
            MK_LEVEL!(Right; "**" => Pow),
        ],
        vec![],
    )
    .unwrap();
    let mut grammar = Grammar::new("expression", "atom", operators);
    grammar.rule("atom", Rule::integer(10));

    assert_eq!(
        parse_expression("2 ** 3 * 4", &grammar).unwrap(),
        Expr::binary(BinaryOp::Mul, Expr::binary(BinaryOp::Pow, lit(2), lit(3)), lit(4))
    );
}

#[test]
fn test_parse_expression_requires_whole_input() {
    let grammar = calculator_grammar();
    assert_eq!(parse_expression(" 1 + 1 ", &grammar).unwrap().to_string(), "1 + 1");

    let err = parse_expression("1;2", &grammar).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnexpectedCharacter {
            found: String::from(";")
        }
    );
}

#[test]
fn test_parse_single_term_is_not_a_call() {
    assert_eq!(let_value("let g = f"), Expr::identifier("f"));
}

#[test]
fn test_parse_application() {
    assert_eq!(
        let_value("let g = f x y"),
        Expr::call(
            Expr::identifier("f"),
            vec![Expr::identifier("x"), Expr::identifier("y")]
        )
    );
}

#[test]
fn test_parse_lambda_round_trip() {
    let statement = parse("let id = fn x => x", &lambda_grammar()).unwrap();
    assert_eq!(
        statement,
        Statement::Let {
            name: String::from("id"),
            value: Expr::lambda("x", Expr::identifier("x")),
        }
    );
    assert_eq!(statement.to_string(), "let id = fn x => x");
}

#[test]
fn test_parse_nested_lambda_rendering() {
    let statement = parse("let k = fn x => fn y => x", &lambda_grammar()).unwrap();
    assert_eq!(statement.to_string(), "let k = fn x => fn y => x");

    let statement = parse("let a = (fn x => x) (f y)", &lambda_grammar()).unwrap();
    assert_eq!(statement.to_string(), "let a = (fn x => x) (f y)");
}

#[test]
fn test_parse_keyword_is_not_an_identifier() {
    let err = parse("let fn = x", &lambda_grammar()).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnterminatedSequence {
            expected: String::from("identifier")
        }
    );

    // Keywords end at a word boundary.
    assert_eq!(let_value("let x = fnord"), Expr::identifier("fnord"));
}

#[test]
fn test_parse_lambda_commits_after_keyword() {
    let err = parse("let f = fn => x", &lambda_grammar()).unwrap_err();
    assert_eq!(
        err.get_kind(),
        &ErrorImpl::UnterminatedSequence {
            expected: String::from("identifier")
        }
    );
    assert_eq!(err.get_span().offset, 10);
}

#[test]
fn test_parse_let_requires_expression() {
    let err = parse("let f =", &lambda_grammar()).unwrap_err();
    assert_eq!(err.get_kind(), &ErrorImpl::ExpectedOperand);
    assert_eq!(err.get_span().offset, 7);
}
