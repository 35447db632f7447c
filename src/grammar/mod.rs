//! Grammar description.
//!
//! Submodules:
//! - operators: precedence levels, associativity and prefix operators
//! - rules: the rule combinators and the values they produce
//! - grammar: named rules plus parser configuration
//! - builtin: the calculator and lambda grammars

pub mod builtin;
pub mod grammar;
pub mod operators;
pub mod rules;
