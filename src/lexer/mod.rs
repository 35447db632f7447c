//! Lexical cursor over the source buffer.
//!
//! This module contains the only code that touches raw characters:
//!
//! - Peeking a bounded lookahead without advancing
//! - Consuming literals, keywords, identifiers and integer literals
//! - Skipping insignificant characters between tokens
//! - The keyword table a grammar reserves

pub mod cursor;
pub mod tokens;
