//! Parser implementation.
//!
//! This module contains the Parser struct, which interprets grammar rules
//! over a Lexical Cursor, and the parsing entry points.
//!
//! Rule application follows the branch-commit discipline:
//! - `Ok(None)` means the rule did not match and consumed nothing
//! - `Err(..)` means a rule committed and then failed; the whole parse stops

use log::{debug, trace};

use crate::{
    ast::{ast::Expr, statements::Statement},
    errors::errors::{Error, ErrorImpl},
    grammar::{
        grammar::Grammar,
        rules::{Rule, Value},
    },
    lexer::cursor::Cursor,
    SourceSpan, MK_SPAN,
};

/// Either the parsed statement, or the first failure with its location.
pub type ParseOutcome = Result<Statement, Error>;

/// Parsing state for one input.
///
/// A parser borrows the grammar read-only; all mutable state (cursor position
/// and nesting depth) belongs to this one parse.
pub struct Parser<'a> {
    /// Position in the source buffer
    cursor: Cursor<'a>,
    /// Rules, operator table and limits
    grammar: &'a Grammar,
    /// Current nesting depth, bounded by the grammar's `max_depth`
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, grammar: &'a Grammar) -> Self {
        Parser {
            cursor: Cursor::new(source, grammar.get_skip()),
            grammar,
            depth: 0,
        }
    }

    pub fn get_cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub fn get_grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn get_position(&self) -> usize {
        self.cursor.pos()
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }

    /// An empty-or-one-character span at the current position.
    pub(crate) fn here(&self) -> SourceSpan {
        let len = self.cursor.peek_char().map(char::len_utf8).unwrap_or(0);
        SourceSpan::new(self.cursor.pos(), len)
    }

    /// Runs `f` one nesting level deeper, failing instead of recursing past
    /// the configured limit.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let limit = self.grammar.get_max_depth();
        if self.depth >= limit {
            return Err(Error::new(ErrorImpl::NestingTooDeep { limit }, self.here()));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn reset(&mut self, pos: usize) {
        self.cursor.reset(pos);
    }

    pub(crate) fn consume_operator(&mut self, symbol: &str) -> Option<SourceSpan> {
        self.cursor.consume_operator(symbol).map(|token| token.span)
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<&'a Rule, Error> {
        let grammar = self.grammar;
        grammar.get_rule(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::MalformedGrammar {
                    detail: format!("no rule named `{}`", name),
                },
                self.here(),
            )
        })
    }

    /// Applies `rule` at the current position.
    pub fn apply(&mut self, rule: &Rule) -> Result<Option<Value>, Error> {
        match rule {
            Rule::Literal(text) => Ok(self.cursor.consume_literal(text).map(|_| Value::Unit)),
            Rule::Keyword(word) => Ok(self.cursor.consume_keyword(word).map(|_| Value::Unit)),
            Rule::Identifier => Ok(self
                .cursor
                .consume_identifier(self.grammar.get_keywords())
                .map(|token| Value::Text(token.text.to_string()))),
            Rule::Integer(radix) => Ok(self
                .cursor
                .consume_integer(*radix)?
                .map(|(value, _)| Value::Integer(value))),
            Rule::Alternative(branches) => {
                for branch in branches {
                    if let Some(value) = self.apply(branch)? {
                        return Ok(Some(value));
                    }
                }
                Ok(None)
            }
            Rule::Sequence(elements) => self.apply_sequence(elements),
            Rule::Repeated {
                rule,
                separator,
                terminator,
            } => self.apply_repeated(rule, separator.as_deref(), terminator.as_deref()),
            Rule::Optional(rule) => Ok(Some(self.apply(rule)?.unwrap_or(Value::Unit))),
            Rule::Peek(rule) => Ok(self.lookahead(rule).then_some(Value::Unit)),
            Rule::Branch { condition, then } => {
                if !self.lookahead(condition) {
                    return Ok(None);
                }
                match self.apply(then)? {
                    Some(value) => Ok(Some(value)),
                    None => Err(self.expected_error(then)),
                }
            }
            Rule::Delimited { open, close, inner } => {
                if self.cursor.consume_literal(open).is_none() {
                    return Ok(None);
                }
                let value = match self.apply(inner)? {
                    Some(value) => value,
                    None => return Err(self.expected_error(inner)),
                };
                if self.cursor.consume_literal(close).is_none() {
                    return Err(Error::new(
                        ErrorImpl::ExpectedClosingDelimiter {
                            delimiter: close.to_string(),
                        },
                        self.here(),
                    ));
                }
                Ok(Some(value))
            }
            Rule::Skipping { skip, rule } => {
                let previous = self.cursor.set_skip_predicate(*skip);
                let result = self.apply(rule);
                if let Ok(Some(_)) = &result {
                    self.cursor.skip_insignificant();
                }
                self.cursor.set_skip_predicate(previous);
                result
            }
            Rule::Application(term) => self.parse_application(term),
            Rule::Recurse(name) => {
                let rule = self.lookup(name)?;
                trace!("enter {} at {} (depth {})", name, self.cursor.pos(), self.depth);
                match rule {
                    // Counted once, by the expression itself.
                    Rule::Expression => self.apply(rule),
                    _ => self.nested(|parser| parser.apply(rule)),
                }
            }
            Rule::Expression => Ok(self
                .nested(|parser| parser.parse_expr(0))?
                .map(Value::Expr)),
            Rule::Map(rule, transform) => {
                let start = self.cursor.significant_pos();
                match self.apply(rule)? {
                    Some(value) => {
                        let span = MK_SPAN!(start, self.cursor.pos());
                        transform(value, span)
                            .map(Some)
                            .map_err(|kind| Error::new(kind, span))
                    }
                    None => Ok(None),
                }
            }
            Rule::Constant(value) => Ok(Some(value.clone())),
            Rule::Fail(kind) => Err(Error::new(kind.clone(), self.here())),
            Rule::EndOfLine => {
                if self.cursor.consume_line_end().is_some() || self.at_end() {
                    self.cursor.skip_insignificant();
                    Ok(Some(Value::Unit))
                } else {
                    Ok(None)
                }
            }
            Rule::EndOfInput => {
                if self.at_end() {
                    self.cursor.skip_insignificant();
                    Ok(Some(Value::Unit))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn at_end(&self) -> bool {
        self.cursor.significant_pos() >= self.cursor.source().len()
    }

    /// Tries `rule` and rewinds. Errors inside a lookahead only mean "no".
    fn lookahead(&mut self, rule: &Rule) -> bool {
        let start = self.cursor.pos();
        let matched = matches!(self.apply(rule), Ok(Some(_)));
        self.cursor.reset(start);
        matched
    }

    fn apply_sequence(&mut self, elements: &[Rule]) -> Result<Option<Value>, Error> {
        let start = self.cursor.pos();
        let mut values = vec![];

        for element in elements {
            match self.apply(element)? {
                Some(Value::Unit) => {}
                Some(value) => values.push(value),
                // Nothing consumed yet, so nothing is committed.
                None if self.cursor.pos() == start => return Ok(None),
                None => return Err(self.expected_error(element)),
            }
        }

        Ok(Some(match values.len() {
            0 => Value::Unit,
            1 => values.remove(0),
            _ => Value::List(values),
        }))
    }

    fn apply_repeated(
        &mut self,
        rule: &Rule,
        separator: Option<&Rule>,
        terminator: Option<&Rule>,
    ) -> Result<Option<Value>, Error> {
        let mut values = vec![];

        if let Some(terminator) = terminator {
            if self.apply(terminator)?.is_some() {
                return Ok(Some(Value::List(values)));
            }
            loop {
                let start = self.cursor.pos();
                match self.apply(rule)? {
                    Some(value) => values.push(value),
                    None => return Err(self.expected_error(rule)),
                }
                if self.apply(terminator)?.is_some() {
                    break;
                }
                if let Some(separator) = separator {
                    if self.apply(separator)?.is_none() {
                        return Err(self.expected_error(terminator));
                    }
                }
                self.ensure_progress(start)?;
            }
            return Ok(Some(Value::List(values)));
        }

        match separator {
            Some(separator) => {
                match self.apply(rule)? {
                    Some(value) => values.push(value),
                    None => return Ok(Some(Value::List(values))),
                }
                loop {
                    let start = self.cursor.pos();
                    if self.apply(separator)?.is_none() {
                        break;
                    }
                    match self.apply(rule)? {
                        Some(value) => values.push(value),
                        None => return Err(self.expected_error(rule)),
                    }
                    self.ensure_progress(start)?;
                }
            }
            None => loop {
                let start = self.cursor.pos();
                match self.apply(rule)? {
                    Some(value) => values.push(value),
                    None => break,
                }
                self.ensure_progress(start)?;
            },
        }
        Ok(Some(Value::List(values)))
    }

    /// Fails when a repetition step matched without consuming anything,
    /// which would otherwise repeat forever.
    pub(crate) fn ensure_progress(&self, start: usize) -> Result<(), Error> {
        if self.cursor.pos() > start {
            return Ok(());
        }
        Err(Error::new(
            ErrorImpl::MalformedGrammar {
                detail: String::from("repeated rule matched empty input"),
            },
            self.here(),
        ))
    }

    /// The error reported when `rule` was required here but did not match.
    pub(crate) fn expected_error(&self, rule: &Rule) -> Error {
        let kind = match rule {
            Rule::Integer(radix) => ErrorImpl::ExpectedDigit { radix: *radix },
            Rule::Expression | Rule::Application(_) => ErrorImpl::ExpectedOperand,
            Rule::Recurse(name) => match self.grammar.get_rule(name) {
                Some(Rule::Expression) | Some(Rule::Application(_)) => ErrorImpl::ExpectedOperand,
                Some(other) => ErrorImpl::UnterminatedSequence {
                    expected: other.describe(),
                },
                None => ErrorImpl::MalformedGrammar {
                    detail: format!("no rule named `{}`", name),
                },
            },
            Rule::Map(inner, _) | Rule::Skipping { rule: inner, .. } => {
                return self.expected_error(inner)
            }
            Rule::EndOfLine | Rule::EndOfInput => return self.unexpected_character(),
            Rule::Fail(kind) => kind.clone(),
            other => ErrorImpl::UnterminatedSequence {
                expected: other.describe(),
            },
        };
        Error::new(kind, self.here())
    }

    /// Points at the next significant character.
    pub(crate) fn unexpected_character(&self) -> Error {
        let pos = self.cursor.significant_pos();
        match self.cursor.source()[pos..].chars().next() {
            Some(c) => Error::new(
                ErrorImpl::UnexpectedCharacter {
                    found: c.to_string(),
                },
                SourceSpan::new(pos, c.len_utf8()),
            ),
            None => Error::new(
                ErrorImpl::UnterminatedSequence {
                    expected: String::from("more input"),
                },
                SourceSpan::at(pos),
            ),
        }
    }

    /// Fails unless only insignificant characters remain.
    pub(crate) fn expect_end(&mut self) -> Result<(), Error> {
        if self.at_end() {
            self.cursor.skip_insignificant();
            Ok(())
        } else {
            Err(self.unexpected_character())
        }
    }
}

/// Parses `source` from the grammar's start rule into a statement.
///
/// The whole input must be consumed; the first failure aborts the parse and
/// is returned with its location.
pub fn parse(source: &str, grammar: &Grammar) -> ParseOutcome {
    let value = parse_rule(source, grammar, grammar.get_start())?;
    value
        .into_statement()
        .map_err(|kind| Error::new(kind, SourceSpan::between(0, source.len())))
}

/// Parses `source` from any named rule and returns the raw value.
pub fn parse_rule(source: &str, grammar: &Grammar, name: &str) -> Result<Value, Error> {
    let mut parser = Parser::new(source, grammar);
    let rule = parser.lookup(name)?;

    let value = match parser.apply(rule)? {
        Some(value) => value,
        None => return Err(parser.expected_error(rule)),
    };
    parser.expect_end()?;

    debug!("parsed {} bytes from rule {}", source.len(), name);
    Ok(value)
}

/// Parses `source` as exactly one expression under the grammar's operator
/// table and atom rule.
pub fn parse_expression(source: &str, grammar: &Grammar) -> Result<Expr, Error> {
    let mut parser = Parser::new(source, grammar);

    let expr = match parser.nested(|parser| parser.parse_expr(0))? {
        Some(expr) => expr,
        None => return Err(Error::new(ErrorImpl::ExpectedOperand, parser.here())),
    };
    parser.expect_end()?;

    debug!("parsed expression of depth {}", expr.depth());
    Ok(expr)
}
