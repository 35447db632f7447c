//! Rule combinators.
//!
//! A `Rule` only describes syntax; `parser::parser::Parser` interprets it.
//! Applying a rule yields one of three outcomes:
//!
//! - a `Value`, when the rule matched
//! - no match, with the cursor untouched, so an enclosing alternative may
//!   try its next branch
//! - a hard `Error`, once a rule has committed and then failed
//!
//! Literals, keywords and line terminators produce `Value::Unit`, which a
//! `Sequence` drops, so transforms only see the values that carry data.

use std::fmt::{Display, Formatter};

use crate::{
    ast::{
        ast::{Expr, Integer},
        statements::Statement,
    },
    errors::errors::ErrorImpl,
    lexer::cursor::Insignificant,
    SourceSpan,
};

/// Builds a value from what a rule matched and the span it covered.
pub type Transform = fn(Value, SourceSpan) -> Result<Value, ErrorImpl>;

/// Semantic value produced by applying a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Unit,
    Integer(Integer),
    Text(String),
    Expr(Expr),
    List(Vec<Value>),
    Statement(Statement),
}

fn malformed(expected: &str, found: &Value) -> ErrorImpl {
    ErrorImpl::MalformedGrammar {
        detail: format!("expected {}, found {:?}", expected, found),
    }
}

impl Value {
    pub fn into_integer(self) -> Result<Integer, ErrorImpl> {
        match self {
            Value::Integer(value) => Ok(value),
            Value::Expr(Expr::Literal(value)) => Ok(value),
            other => Err(malformed("integer", &other)),
        }
    }

    pub fn into_text(self) -> Result<String, ErrorImpl> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(malformed("text", &other)),
        }
    }

    /// Integers become literals and text becomes an identifier, so atoms can
    /// be forwarded without a dedicated transform.
    pub fn into_expr(self) -> Result<Expr, ErrorImpl> {
        match self {
            Value::Expr(expr) => Ok(expr),
            Value::Integer(value) => Ok(Expr::Literal(value)),
            Value::Text(name) => Ok(Expr::Identifier(name)),
            other => Err(malformed("expression", &other)),
        }
    }

    /// A single value is treated as a one-element list, and `Unit` as an
    /// empty one.
    pub fn into_list(self) -> Result<Vec<Value>, ErrorImpl> {
        match self {
            Value::List(values) => Ok(values),
            Value::Unit => Ok(vec![]),
            other => Ok(vec![other]),
        }
    }

    pub fn into_statement(self) -> Result<Statement, ErrorImpl> {
        match self {
            Value::Statement(statement) => Ok(statement),
            other => Err(malformed("statement", &other)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// Exact text, such as punctuation.
    Literal(&'static str),
    /// A word that must end at a word boundary.
    Keyword(&'static str),
    /// A non-reserved word; yields `Value::Text`.
    Identifier,
    /// Digits in the given radix; yields `Value::Integer`.
    Integer(u32),
    /// First branch that matches wins, in declaration order.
    Alternative(Vec<Rule>),
    /// Every element in order. Once the first element matched, a missing
    /// later element is an error.
    Sequence(Vec<Rule>),
    /// Zero or more repetitions; after a separator an element is required.
    /// With a terminator, the list runs until the terminator matches and
    /// anything else in its place is an error.
    Repeated {
        rule: Box<Rule>,
        separator: Option<Box<Rule>>,
        terminator: Option<Box<Rule>>,
    },
    /// Yields the inner value, or `Value::Unit` when absent.
    Optional(Box<Rule>),
    /// Matches without consuming input.
    Peek(Box<Rule>),
    /// Peeks `condition`, then commits to `then`.
    Branch {
        condition: Box<Rule>,
        then: Box<Rule>,
    },
    /// `open inner close`, committed once `open` matched.
    Delimited {
        open: &'static str,
        close: &'static str,
        inner: Box<Rule>,
    },
    /// Runs `rule` with a different insignificant-character predicate.
    Skipping {
        skip: Insignificant,
        rule: Box<Rule>,
    },
    /// One or more juxtaposed terms, folded into a call when more than one.
    Application(Box<Rule>),
    /// A named rule of the enclosing grammar.
    Recurse(&'static str),
    /// An operand sequence resolved against the grammar's operator table.
    Expression,
    Map(Box<Rule>, Transform),
    /// Matches the empty string and yields a fixed value.
    Constant(Value),
    /// Raises the error without consuming; useful as a last alternative.
    Fail(ErrorImpl),
    /// A line terminator or the end of input.
    EndOfLine,
    EndOfInput,
}

impl Rule {
    pub fn literal(text: &'static str) -> Self {
        Rule::Literal(text)
    }

    pub fn keyword(word: &'static str) -> Self {
        Rule::Keyword(word)
    }

    pub fn integer(radix: u32) -> Self {
        Rule::Integer(radix)
    }

    pub fn alt(branches: Vec<Rule>) -> Self {
        Rule::Alternative(branches)
    }

    pub fn seq(elements: Vec<Rule>) -> Self {
        Rule::Sequence(elements)
    }

    pub fn repeated(rule: Rule, separator: Option<Rule>) -> Self {
        Rule::Repeated {
            rule: Box::new(rule),
            separator: separator.map(Box::new),
            terminator: None,
        }
    }

    pub fn terminated(rule: Rule, separator: Option<Rule>, terminator: Rule) -> Self {
        Rule::Repeated {
            rule: Box::new(rule),
            separator: separator.map(Box::new),
            terminator: Some(Box::new(terminator)),
        }
    }

    pub fn optional(rule: Rule) -> Self {
        Rule::Optional(Box::new(rule))
    }

    pub fn peek(rule: Rule) -> Self {
        Rule::Peek(Box::new(rule))
    }

    pub fn branch(condition: Rule, then: Rule) -> Self {
        Rule::Branch {
            condition: Box::new(condition),
            then: Box::new(then),
        }
    }

    pub fn parenthesized(inner: Rule) -> Self {
        Rule::Delimited {
            open: "(",
            close: ")",
            inner: Box::new(inner),
        }
    }

    pub fn skipping(skip: Insignificant, rule: Rule) -> Self {
        Rule::Skipping {
            skip,
            rule: Box::new(rule),
        }
    }

    pub fn application(term: Rule) -> Self {
        Rule::Application(Box::new(term))
    }

    pub fn recurse(name: &'static str) -> Self {
        Rule::Recurse(name)
    }

    pub fn map(self, transform: Transform) -> Self {
        Rule::Map(Box::new(self), transform)
    }

    /// Human-readable name of what this rule expects to see next.
    pub fn describe(&self) -> String {
        match self {
            Rule::Literal(text) => format!("'{}'", text),
            Rule::Keyword(word) => format!("keyword '{}'", word),
            Rule::Identifier => String::from("identifier"),
            Rule::Integer(radix) => format!("base-{} digit", radix),
            Rule::Alternative(branches) => branches
                .iter()
                .map(Rule::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Rule::Sequence(elements) => elements
                .first()
                .map(Rule::describe)
                .unwrap_or_else(|| String::from("nothing")),
            Rule::Repeated { rule, .. } => rule.describe(),
            Rule::Optional(rule) | Rule::Peek(rule) | Rule::Map(rule, _) => rule.describe(),
            Rule::Skipping { rule, .. } => rule.describe(),
            Rule::Branch { condition, .. } => condition.describe(),
            Rule::Delimited { open, .. } => format!("'{}'", open),
            Rule::Application(term) => term.describe(),
            Rule::Recurse(name) => String::from(*name),
            Rule::Expression => String::from("expression"),
            Rule::Constant(_) => String::from("nothing"),
            Rule::Fail(error) => error.to_string(),
            Rule::EndOfLine => String::from("end of line"),
            Rule::EndOfInput => String::from("end of input"),
        }
    }
}

// EBNF-like rendering, so a grammar can be inspected at runtime.
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Literal(text) => write!(f, "\"{}\"", text),
            Rule::Keyword(word) => write!(f, "\"{}\"", word),
            Rule::Identifier => write!(f, "IDENTIFIER"),
            Rule::Integer(10) => write!(f, "INTEGER"),
            Rule::Integer(radix) => write!(f, "INTEGER_{}", radix),
            Rule::Alternative(branches) => {
                write!(f, "(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", branch)?;
                }
                write!(f, ")")
            }
            Rule::Sequence(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", element)?;
                }
                Ok(())
            }
            Rule::Repeated {
                rule,
                separator,
                terminator,
            } => {
                match separator {
                    None => write!(f, "{{ {} }}", rule)?,
                    Some(separator) => write!(f, "[ {} {{ {} {} }} ]", rule, separator, rule)?,
                }
                match terminator {
                    Some(terminator) => write!(f, " {}", terminator),
                    None => Ok(()),
                }
            }
            Rule::Optional(rule) => write!(f, "[ {} ]", rule),
            Rule::Peek(rule) => write!(f, "&({})", rule),
            Rule::Branch { condition, then } => write!(f, "&({}) {}", condition, then),
            Rule::Delimited { open, close, inner } => {
                write!(f, "\"{}\" {} \"{}\"", open, inner, close)
            }
            Rule::Skipping { rule, .. } => write!(f, "{}", rule),
            Rule::Application(term) => write!(f, "{} {{ {} }}", term, term),
            Rule::Recurse(name) => write!(f, "{}", name),
            Rule::Expression => write!(f, "EXPRESSION"),
            Rule::Map(rule, _) => write!(f, "{}", rule),
            Rule::Constant(_) => write!(f, "()"),
            Rule::Fail(error) => write!(f, "!{{{}}}", error),
            Rule::EndOfLine => write!(f, "EOL"),
            Rule::EndOfInput => write!(f, "EOF"),
        }
    }
}
