#![allow(clippy::module_inception)]

pub mod ast;
pub mod errors;
pub mod evaluator;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A region of the source buffer, as a byte offset and a byte length.
///
/// Spans never own the buffer they point into; a reporter pairs them with
/// the original text to render diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SourceSpan {
    pub offset: usize,
    pub length: usize,
}

impl SourceSpan {
    pub fn new(offset: usize, length: usize) -> Self {
        SourceSpan { offset, length }
    }

    /// An empty span sitting at `offset`.
    pub fn at(offset: usize) -> Self {
        SourceSpan { offset, length: 0 }
    }

    /// The span covering everything from `start` up to (not including) `end`.
    pub fn between(start: usize, end: usize) -> Self {
        SourceSpan {
            offset: start,
            length: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Returns the covered text, or `None` when the span lies outside `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.offset..self.end())
    }
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line's text (including its line
/// terminator, if any) and the byte offset of `position` within that line.
/// Offsets at or past the end of the input map onto the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        start = end;
        line_number += 1;
    }

    // Past the end: point just after the final line.
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => {
            (line_number - 1, last.to_string(), position - (start - last.len()))
        }
        _ => (line_number, String::new(), position.saturating_sub(start)),
    }
}
