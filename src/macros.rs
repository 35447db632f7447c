//! Utility macros for building grammars.
//!
//! - `MK_SPAN!` - Creates a SourceSpan from a start and end offset
//! - `MK_LEVEL!` - Creates one precedence level of an operator table
//!
//! These macros keep grammar definitions readable.

/// Creates a SourceSpan covering `$start..$end`.
///
/// # Example
///
/// ```ignore
/// let span = MK_SPAN!(mark, cursor.pos());
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr) => {
        $crate::SourceSpan::between($start, $end)
    };
}

/// Creates a precedence level where every operator shares one associativity.
///
/// # Arguments
///
/// * `$assoc` - `Left`, `Right` or `None`
/// * `$symbol => $op` - operator text and the BinaryOp it stands for
///
/// # Example
///
/// ```ignore
/// let additive = MK_LEVEL!(Left; "+" => Add, "-" => Sub);
/// ```
#[macro_export]
macro_rules! MK_LEVEL {
    ($assoc:ident; $($symbol:literal => $op:ident),+ $(,)?) => {
        $crate::grammar::operators::Level {
            operators: vec![
                $($crate::grammar::operators::Operator {
                    symbol: $symbol,
                    associativity: $crate::grammar::operators::Associativity::$assoc,
                    op: $crate::ast::ast::BinaryOp::$op,
                }),+
            ],
        }
    };
}
