//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that interprets a grammar's rules over a
//! lexical cursor and produces a `Statement`. It handles:
//!
//! - Rule combinators (sequences, alternatives, repetition, lookahead)
//! - Expression parsing against the grammar's operator table
//! - Juxtaposed application of terms
//! - Bounded nesting depth
//!
//! Binary operators are resolved by precedence climbing: each operator sits
//! in a numbered level, and associativity decides the minimum level of its
//! right operand.

pub mod expr;
pub mod parser;

#[cfg(test)]
mod tests;
