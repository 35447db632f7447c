use log::trace;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    grammar::{
        operators::{Associativity, LeveledOperator},
        rules::{Rule, Value},
    },
    SourceSpan,
};

use super::parser::Parser;

impl<'a> Parser<'a> {
    /// Precedence climbing over the grammar's operator table.
    ///
    /// Parses one operand, then folds in every following binary operator
    /// whose level is at least `min_level`. The right operand of a
    /// left-associative (or non-associative) operator is parsed at
    /// `level + 1`, that of a right-associative operator at `level`, which is
    /// what makes `a - b - c` group left and `a ^ b ^ c` group right.
    ///
    /// Returns `Ok(None)` without consuming anything when no operand starts
    /// here.
    pub fn parse_expr(&mut self, min_level: usize) -> Result<Option<Expr>, Error> {
        let mut left = match self.parse_unary()? {
            Some(left) => left,
            None => return Ok(None),
        };

        // Level of the last non-associative operator folded at this depth.
        let mut chained: Option<usize> = None;

        loop {
            let mark = self.get_position();
            let (candidate, span) = match self.match_binary() {
                Some(found) => found,
                None => break,
            };
            if candidate.level < min_level {
                self.reset(mark);
                break;
            }
            if chained == Some(candidate.level) {
                return Err(Error::new(
                    ErrorImpl::NonAssociativeChain {
                        symbol: candidate.operator.symbol.to_string(),
                    },
                    span,
                ));
            }

            let next_level = match candidate.operator.associativity {
                Associativity::Right => candidate.level,
                Associativity::Left | Associativity::None => candidate.level + 1,
            };
            let right = match self.nested(|parser| parser.parse_expr(next_level))? {
                Some(right) => right,
                None => return Err(Error::new(ErrorImpl::ExpectedOperand, self.here())),
            };

            trace!(
                "fold {:?} at level {}",
                candidate.operator.op,
                candidate.level
            );
            left = Expr::binary(candidate.operator.op, left, right);
            chained = match candidate.operator.associativity {
                Associativity::None => Some(candidate.level),
                _ => None,
            };
        }

        Ok(Some(left))
    }

    /// Prefix operators, then an operand from the grammar's atom rule.
    fn parse_unary(&mut self) -> Result<Option<Expr>, Error> {
        let grammar = self.get_grammar();

        for prefix in grammar.get_operators().prefix_candidates() {
            if self.consume_operator(prefix.symbol).is_none() {
                continue;
            }
            return match self.nested(|parser| parser.parse_unary())? {
                Some(operand) => Ok(Some(Expr::unary(prefix.op, operand))),
                None => Err(Error::new(ErrorImpl::ExpectedOperand, self.here())),
            };
        }

        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Option<Expr>, Error> {
        let rule = self.lookup(self.get_grammar().get_atom())?;

        match self.apply(rule)? {
            Some(value) => value
                .into_expr()
                .map(Some)
                .map_err(|kind| Error::new(kind, self.here())),
            None => Ok(None),
        }
    }

    /// Consumes the longest binary operator symbol at the cursor.
    fn match_binary(&mut self) -> Option<(&'a LeveledOperator, SourceSpan)> {
        let grammar = self.get_grammar();

        grammar
            .get_operators()
            .binary_candidates()
            .iter()
            .find_map(|candidate| {
                self.consume_operator(candidate.operator.symbol)
                    .map(|span| (candidate, span))
            })
    }

    /// One or more juxtaposed terms.
    ///
    /// A single term is returned as is; two or more become a `Call` whose
    /// callee is the first term.
    pub fn parse_application(&mut self, term: &Rule) -> Result<Option<Value>, Error> {
        let callee = match self.apply(term)? {
            Some(value) => self.to_expr(value)?,
            None => return Ok(None),
        };

        let mut args = vec![];
        loop {
            let start = self.get_position();
            match self.apply(term)? {
                Some(value) => args.push(self.to_expr(value)?),
                None => break,
            }
            self.ensure_progress(start)?;
        }

        Ok(Some(Value::Expr(Expr::call(callee, args))))
    }

    fn to_expr(&self, value: Value) -> Result<Expr, Error> {
        value
            .into_expr()
            .map_err(|kind| Error::new(kind, self.here()))
    }
}
