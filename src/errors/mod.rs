//! Error types shared by the parser and the evaluator.
//!
//! Every failure carries a `SourceSpan` so a caller-side reporter can point
//! at the offending input. The core never renders or prints diagnostics.

pub mod errors;
