use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::ast::Integer,
    errors::errors::{Error, ErrorImpl},
    MK_SPAN,
};

use super::tokens::{KeywordTable, Token, TokenKind};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
}

/// Predicate deciding which characters are skipped between tokens.
pub type Insignificant = fn(char) -> bool;

/// Spaces and tabs. Newlines stay significant.
pub fn blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Any ASCII whitespace, newlines included.
pub fn space(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Nothing is skipped.
pub fn nothing(_: char) -> bool {
    false
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A position in an immutable source buffer.
///
/// Every `consume_*` method skips insignificant characters first and, on
/// failure, leaves the cursor exactly where it was. Callers can therefore
/// try a construct, `reset` to a saved position and try another.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    skip: Insignificant,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, skip: Insignificant) -> Self {
        Cursor {
            source,
            pos: 0,
            skip,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewinds (or advances) to a position previously read from `pos`.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn skip_predicate(&self) -> Insignificant {
        self.skip
    }

    /// Replaces the insignificant-character predicate, returning the old one.
    pub fn set_skip_predicate(&mut self, skip: Insignificant) -> Insignificant {
        std::mem::replace(&mut self.skip, skip)
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Returns up to `k` upcoming characters without advancing.
    pub fn peek(&self, k: usize) -> &'a str {
        let remainder = self.remainder();
        let end = remainder
            .char_indices()
            .nth(k)
            .map(|(i, _)| i)
            .unwrap_or(remainder.len());
        &remainder[..end]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// The position the next token would start at.
    pub fn significant_pos(&self) -> usize {
        let skipped: usize = self
            .remainder()
            .chars()
            .take_while(|c| (self.skip)(*c))
            .map(char::len_utf8)
            .sum();
        self.pos + skipped
    }

    pub fn skip_insignificant(&mut self) {
        self.pos = self.significant_pos();
    }

    fn token(&mut self, kind: TokenKind, start: usize, len: usize) -> Token<'a> {
        self.pos = start + len;
        Token {
            kind,
            text: &self.source[start..start + len],
            span: MK_SPAN!(start, start + len),
        }
    }

    fn consume_text(&mut self, text: &str, kind: TokenKind) -> Option<Token<'a>> {
        let start = self.significant_pos();
        if text.is_empty() || !self.source[start..].starts_with(text) {
            return None;
        }
        Some(self.token(kind, start, text.len()))
    }

    /// Consumes `text` exactly.
    pub fn consume_literal(&mut self, text: &str) -> Option<Token<'a>> {
        self.consume_text(text, TokenKind::Punctuation)
    }

    /// Consumes an operator symbol.
    pub fn consume_operator(&mut self, symbol: &str) -> Option<Token<'a>> {
        self.consume_text(symbol, TokenKind::Operator)
    }

    /// Consumes `word` when it is not immediately followed by another word
    /// character, so `fn` matches in `fn x` but not in `fnord`.
    pub fn consume_keyword(&mut self, word: &str) -> Option<Token<'a>> {
        let start = self.significant_pos();
        let rest = &self.source[start..];
        if word.is_empty() || !rest.starts_with(word) {
            return None;
        }
        if rest[word.len()..].chars().next().is_some_and(is_word_char) {
            return None;
        }
        Some(self.token(TokenKind::Keyword, start, word.len()))
    }

    /// Consumes a run of word characters that is not a reserved keyword.
    pub fn consume_identifier(&mut self, keywords: &KeywordTable) -> Option<Token<'a>> {
        let start = self.significant_pos();
        let matched = IDENTIFIER.find(&self.source[start..])?;
        if keywords.contains(matched.as_str()) {
            return None;
        }
        Some(self.token(TokenKind::Identifier, start, matched.end()))
    }

    /// Consumes the digits of an integer literal in `radix` (2 to 36).
    ///
    /// Returns `Ok(None)` without moving when no digit is present. A digit
    /// run whose value does not fit in an `Integer` is an `IntegerOverflow`
    /// error rather than a truncated value, and a radix outside 2 to 36 is a
    /// `MalformedGrammar` error.
    pub fn consume_integer(&mut self, radix: u32) -> Result<Option<(Integer, Token<'a>)>, Error> {
        let start = self.significant_pos();
        if !(2..=36).contains(&radix) {
            return Err(Error::new(
                ErrorImpl::MalformedGrammar {
                    detail: format!("unsupported radix {}", radix),
                },
                MK_SPAN!(start, start),
            ));
        }

        let len: usize = self.source[start..]
            .chars()
            .take_while(|c| c.is_digit(radix))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return Ok(None);
        }

        let digits = &self.source[start..start + len];
        match Integer::from_str_radix(digits, radix) {
            Ok(value) => Ok(Some((value, self.token(TokenKind::Integer, start, len)))),
            Err(_) => Err(Error::new(
                ErrorImpl::IntegerOverflow {
                    literal: digits.to_string(),
                },
                MK_SPAN!(start, start + len),
            )),
        }
    }

    /// Consumes a line terminator (`\n` or `\r\n`).
    pub fn consume_line_end(&mut self) -> Option<Token<'a>> {
        let start = self.significant_pos();
        let rest = &self.source[start..];
        let len = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            return None;
        };
        Some(self.token(TokenKind::LineEnd, start, len))
    }
}
