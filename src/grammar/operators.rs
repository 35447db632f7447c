use std::collections::HashSet;

use crate::{
    ast::ast::{BinaryOp, UnaryOp},
    errors::errors::TableError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`
    Right,
    /// `a < b < c` is rejected
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub symbol: &'static str,
    pub associativity: Associativity,
    pub op: BinaryOp,
}

/// One precedence level. Operators in the same level bind equally tightly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    pub operators: Vec<Operator>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixOperator {
    pub symbol: &'static str,
    pub op: UnaryOp,
}

/// A binary operator resolved against the table, with the index of the level
/// it belongs to (0 binds loosest).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeveledOperator {
    pub level: usize,
    pub operator: Operator,
}

/// Binary operators grouped into precedence levels, lowest first, plus the
/// prefix operators checked before every operand.
///
/// The table is validated once on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatorTable {
    levels: Vec<Level>,
    prefix: Vec<PrefixOperator>,
    // Candidates ordered longest symbol first so `**` wins over `*`.
    binary_candidates: Vec<LeveledOperator>,
}

impl OperatorTable {
    /// A table without operators: every expression is a single operand.
    pub fn empty() -> Self {
        OperatorTable::default()
    }

    /// Builds a table from `levels` (loosest first) and `prefix` operators.
    ///
    /// Binary symbols must be unique across all levels, and prefix symbols
    /// unique among themselves. A symbol may appear once in each set, which
    /// is how `-` serves as both subtraction and negation.
    pub fn new(levels: Vec<Level>, prefix: Vec<PrefixOperator>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        let mut binary_candidates = vec![];

        for (index, level) in levels.iter().enumerate() {
            if level.operators.is_empty() {
                return Err(TableError::EmptyLevel { level: index });
            }
            for operator in &level.operators {
                if operator.symbol.is_empty() {
                    return Err(TableError::EmptySymbol);
                }
                if !seen.insert(operator.symbol) {
                    return Err(TableError::DuplicateOperator {
                        symbol: operator.symbol.to_string(),
                    });
                }
                binary_candidates.push(LeveledOperator {
                    level: index,
                    operator: operator.clone(),
                });
            }
        }

        let mut seen_prefix = HashSet::new();
        for operator in &prefix {
            if operator.symbol.is_empty() {
                return Err(TableError::EmptySymbol);
            }
            if !seen_prefix.insert(operator.symbol) {
                return Err(TableError::DuplicateOperator {
                    symbol: operator.symbol.to_string(),
                });
            }
        }

        let mut prefix = prefix;
        binary_candidates.sort_by(|a, b| b.operator.symbol.len().cmp(&a.operator.symbol.len()));
        prefix.sort_by(|a, b| b.symbol.len().cmp(&a.symbol.len()));

        Ok(OperatorTable {
            levels,
            prefix,
            binary_candidates,
        })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.prefix.is_empty()
    }

    /// Binary operators, longest symbol first.
    pub fn binary_candidates(&self) -> &[LeveledOperator] {
        &self.binary_candidates
    }

    /// Prefix operators, longest symbol first.
    pub fn prefix_candidates(&self) -> &[PrefixOperator] {
        &self.prefix
    }

    pub fn find_binary(&self, symbol: &str) -> Option<&LeveledOperator> {
        self.binary_candidates
            .iter()
            .find(|candidate| candidate.operator.symbol == symbol)
    }
}
