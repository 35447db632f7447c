use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use crate::lexer::{
    cursor::{blank, Insignificant},
    tokens::KeywordTable,
};

use super::{operators::OperatorTable, rules::Rule};

/// Nesting allowed when the caller does not pick a limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Complete parser configuration.
///
/// Built once before any parsing starts and only read afterwards, so a
/// single grammar can serve parses running on several threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Named rules, reachable from `Rule::Recurse`
    rules: HashMap<&'static str, Rule>,
    /// Rule a parse starts from
    start: &'static str,
    /// Rule producing one operand of `Rule::Expression`
    atom: &'static str,
    operators: OperatorTable,
    keywords: KeywordTable,
    skip: Insignificant,
    max_depth: usize,
}

impl Grammar {
    /// Creates a grammar with no rules, blank-skipping and the default depth.
    pub fn new(start: &'static str, atom: &'static str, operators: OperatorTable) -> Self {
        Grammar {
            rules: HashMap::new(),
            start,
            atom,
            operators,
            keywords: KeywordTable::new(),
            skip: blank,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Registers (or replaces) a named rule.
    pub fn rule(&mut self, name: &'static str, rule: Rule) {
        self.rules.insert(name, rule);
    }

    /// Reserves a word so `Rule::Identifier` never matches it.
    pub fn keyword(&mut self, word: &'static str) {
        self.keywords.insert(word);
    }

    pub fn set_skip(&mut self, skip: Insignificant) {
        self.skip = skip;
    }

    /// Limits how deeply expressions may nest.
    ///
    /// One level is spent on every expression entered (the outermost one,
    /// each parenthesized or otherwise embedded expression, each prefix
    /// operand and each right-hand operand) and on every `Recurse` into a
    /// rule that is not itself `Rule::Expression`. With a limit of 4 the
    /// calculator accepts `(((1)))` and rejects `((((1))))`.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Returns the same grammar starting from another named rule.
    pub fn with_start(mut self, start: &'static str) -> Self {
        self.start = start;
        self
    }

    pub fn get_rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn get_start(&self) -> &'static str {
        self.start
    }

    pub fn get_atom(&self) -> &'static str {
        self.atom
    }

    pub fn get_operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn get_keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn get_skip(&self) -> Insignificant {
        self.skip
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names = self.rules.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();

        for name in names {
            writeln!(f, "{} = {} ;", name, self.rules[name])?;
        }
        Ok(())
    }
}
