//! Stock grammars: an integer calculator and a tiny functional language.

use crate::{
    ast::{
        ast::{Expr, UnaryOp},
        statements::Statement,
    },
    errors::errors::ErrorImpl,
    lexer::cursor::{blank, space},
    SourceSpan, MK_LEVEL,
};

use super::{
    grammar::Grammar,
    operators::{OperatorTable, PrefixOperator},
    rules::{Rule, Value},
};

/// `+ -` (left), then `* / %` (left), then `^` (right), with prefix `-` and
/// `+` binding tighter than all of them.
pub fn calculator_operators() -> OperatorTable {
    OperatorTable::new(
        vec![
            MK_LEVEL!(Left; "+" => Add, "-" => Sub),
            MK_LEVEL!(Left; "*" => Mul, "/" => Div, "%" => Mod),
            MK_LEVEL!(Right; "^" => Pow),
        ],
        vec![
            PrefixOperator {
                symbol: "-",
                op: UnaryOp::Neg,
            },
            PrefixOperator {
                symbol: "+",
                op: UnaryOp::Plus,
            },
        ],
    )
    .expect("calculator operator table has unique symbols")
}

/// Integer literal: `0x`-prefixed hexadecimal, tried before plain decimal.
pub fn integer_literal() -> Rule {
    Rule::alt(vec![
        Rule::seq(vec![Rule::literal("0x"), Rule::integer(16)]),
        Rule::integer(10),
    ])
}

/// Calculator statements: expressions separated by `;` up to the end of the
/// line.
///
/// ```text
/// statement = [ expression { ";" expression } ] EOL ;
/// atom      = "(" expression ")" | "0x" INTEGER_16 | INTEGER | IDENTIFIER
///           | !{expected operand} ;
/// ```
///
/// Blanks are insignificant at statement level; inside parentheses newlines
/// are too.
pub fn calculator_grammar() -> Grammar {
    let mut grammar = Grammar::new("statement", "atom", calculator_operators());
    grammar.set_skip(blank);

    grammar.rule(
        "statement",
        Rule::terminated(Rule::Expression, Some(Rule::literal(";")), Rule::EndOfLine)
            .map(make_expressions),
    );
    grammar.rule(
        "atom",
        Rule::alt(vec![
            Rule::parenthesized(Rule::skipping(space, Rule::recurse("expression"))),
            integer_literal(),
            Rule::Identifier,
            Rule::Fail(ErrorImpl::ExpectedOperand),
        ]),
    );
    grammar.rule("expression", Rule::Expression);

    grammar
}

/// `let` bindings of lambda terms.
///
/// ```text
/// statement   = "let" IDENTIFIER "=" expression EOF ;
/// expression  = application ;
/// application = term { term } ;
/// term        = &("fn") "fn" IDENTIFIER "=>" expression
///             | IDENTIFIER
///             | "(" expression ")" ;
/// ```
///
/// Terms and lambdas are inlined into `application`, so each nested lambda
/// or parenthesized term costs one level of the depth limit.
pub fn lambda_grammar() -> Grammar {
    let mut grammar = Grammar::new("statement", "application", OperatorTable::empty());
    grammar.set_skip(blank);
    grammar.keyword("let");
    grammar.keyword("fn");

    let lambda = Rule::seq(vec![
        Rule::keyword("fn"),
        Rule::Identifier,
        Rule::literal("=>"),
        Rule::recurse("expression"),
    ])
    .map(make_lambda);
    let term = Rule::alt(vec![
        Rule::branch(Rule::keyword("fn"), lambda),
        Rule::Identifier,
        Rule::parenthesized(Rule::recurse("expression")),
    ]);

    grammar.rule(
        "statement",
        Rule::seq(vec![
            Rule::keyword("let"),
            Rule::Identifier,
            Rule::literal("="),
            Rule::recurse("expression"),
            Rule::EndOfInput,
        ])
        .map(make_let),
    );
    grammar.rule("expression", Rule::Expression);
    grammar.rule("application", Rule::application(term));

    grammar
}

fn pair(value: Value) -> Result<(Value, Value), ErrorImpl> {
    let values = value.into_list()?;
    let count = values.len();
    let mut values = values.into_iter();
    match (values.next(), values.next(), values.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(ErrorImpl::MalformedGrammar {
            detail: format!("expected two values, found {}", count),
        }),
    }
}

fn make_expressions(value: Value, _span: SourceSpan) -> Result<Value, ErrorImpl> {
    let exprs = value
        .into_list()?
        .into_iter()
        .map(Value::into_expr)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Statement(Statement::Expressions(exprs)))
}

fn make_lambda(value: Value, _span: SourceSpan) -> Result<Value, ErrorImpl> {
    let (parameter, body) = pair(value)?;
    Ok(Value::Expr(Expr::lambda(
        parameter.into_text()?,
        body.into_expr()?,
    )))
}

fn make_let(value: Value, _span: SourceSpan) -> Result<Value, ErrorImpl> {
    let (name, value) = pair(value)?;
    Ok(Value::Statement(Statement::Let {
        name: name.into_text()?,
        value: value.into_expr()?,
    }))
}
