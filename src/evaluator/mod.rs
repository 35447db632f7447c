//! Tree-walking evaluation of parsed expressions.
//!
//! Identifiers are resolved through an `Environment` supplied by the caller.
//! Lambdas and calls are handed to the environment as well, so the core
//! carries no notion of scope or closure.

pub mod evaluator;

#[cfg(test)]
mod tests;
