use std::{collections::HashSet, fmt::Display};

use crate::SourceSpan;

/// Classification of a transient token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Integer,
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    LineEnd,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A token handed out by the cursor.
///
/// Tokens borrow their text from the source buffer and are consumed
/// immediately by the parser; nothing keeps them around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: SourceSpan,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.text)
    }
}

/// Reserved words a grammar refuses to accept as identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    words: HashSet<&'static str>,
}

impl KeywordTable {
    pub fn new() -> Self {
        KeywordTable {
            words: HashSet::new(),
        }
    }

    pub fn insert(&mut self, word: &'static str) {
        self.words.insert(word);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<&'static str> for KeywordTable {
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        KeywordTable {
            words: iter.into_iter().collect(),
        }
    }
}
