use std::fmt::Display;

use thiserror::Error;

use crate::SourceSpan;

/// A parse or evaluation failure, pinned to the region of input that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: SourceSpan,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: SourceSpan) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &SourceSpan {
        &self.span
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn into_kind(self) -> ErrorImpl {
        self.internal_error
    }

    /// True for failures raised while parsing, false for evaluation failures.
    pub fn is_parse_error(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::DivisionByZero
                | ErrorImpl::InvalidExponent { .. }
                | ErrorImpl::UnboundIdentifier { .. }
                | ErrorImpl::ArithmeticOverflow
                | ErrorImpl::UnsupportedExpression { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::ExpectedOperand => "ExpectedOperand",
            ErrorImpl::ExpectedDigit { .. } => "ExpectedDigit",
            ErrorImpl::ExpectedClosingDelimiter { .. } => "ExpectedClosingDelimiter",
            ErrorImpl::UnterminatedSequence { .. } => "UnterminatedSequence",
            ErrorImpl::IntegerOverflow { .. } => "IntegerOverflow",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::NonAssociativeChain { .. } => "NonAssociativeChain",
            ErrorImpl::MalformedGrammar { .. } => "MalformedGrammar",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::InvalidExponent { .. } => "InvalidExponent",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifier",
            ErrorImpl::ArithmeticOverflow => "ArithmeticOverflow",
            ErrorImpl::UnsupportedExpression { .. } => "UnsupportedExpression",
        }
    }

    /// The construct the parser was looking for when it gave up.
    ///
    /// Evaluation failures have no expected construct and return `None`.
    pub fn get_expected(&self) -> Option<String> {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => Some(String::from("end of input")),
            ErrorImpl::ExpectedOperand => Some(String::from("operand")),
            ErrorImpl::ExpectedDigit { radix } => Some(format!("base-{} digit", radix)),
            ErrorImpl::ExpectedClosingDelimiter { delimiter } => Some(format!("'{}'", delimiter)),
            ErrorImpl::UnterminatedSequence { expected } => Some(expected.clone()),
            ErrorImpl::IntegerOverflow { .. } => Some(String::from("integer in range")),
            ErrorImpl::NestingTooDeep { .. } => Some(String::from("shallower nesting")),
            ErrorImpl::NonAssociativeChain { .. } => Some(String::from("parenthesized operand")),
            _ => None,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { found } => ErrorTip::Suggestion(format!(
                "Unexpected character: `{}`, did you miss an operator?",
                found
            )),
            ErrorImpl::ExpectedOperand => ErrorTip::Suggestion(String::from(
                "Expected an operand after this point",
            )),
            ErrorImpl::ExpectedDigit { radix } => ErrorTip::Suggestion(format!(
                "Expected at least one base-{} digit",
                radix
            )),
            ErrorImpl::ExpectedClosingDelimiter { delimiter } => {
                ErrorTip::Suggestion(format!("Expected `{}` to close this group", delimiter))
            }
            ErrorImpl::UnterminatedSequence { expected } => {
                ErrorTip::Suggestion(format!("Expected {}", expected))
            }
            ErrorImpl::IntegerOverflow { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expression nests deeper than the limit of {}",
                limit
            )),
            ErrorImpl::NonAssociativeChain { symbol } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be chained, add parentheses",
                symbol
            )),
            ErrorImpl::MalformedGrammar { .. } => ErrorTip::None,
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::InvalidExponent { exponent } => ErrorTip::Suggestion(format!(
                "Exponent `{}` is negative",
                exponent
            )),
            ErrorImpl::UnboundIdentifier { name } => {
                ErrorTip::Suggestion(format!("Identifier `{}` is not bound", name))
            }
            ErrorImpl::ArithmeticOverflow => ErrorTip::Suggestion(String::from(
                "Result does not fit in a 64-bit integer",
            )),
            ErrorImpl::UnsupportedExpression { kind } => ErrorTip::Suggestion(format!(
                "This environment cannot evaluate a {}",
                kind
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.span.offset)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unexpected character: {found:?}")]
    UnexpectedCharacter { found: String },
    #[error("expected operand")]
    ExpectedOperand,
    #[error("expected base-{radix} digit")]
    ExpectedDigit { radix: u32 },
    #[error("expected closing {delimiter:?}")]
    ExpectedClosingDelimiter { delimiter: String },
    #[error("unterminated sequence: expected {expected}")]
    UnterminatedSequence { expected: String },
    #[error("integer literal {literal:?} does not fit in 64 bits")]
    IntegerOverflow { literal: String },
    #[error("nesting deeper than {limit}")]
    NestingTooDeep { limit: usize },
    #[error("operator {symbol:?} is not associative")]
    NonAssociativeChain { symbol: String },
    #[error("malformed grammar: {detail}")]
    MalformedGrammar { detail: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid exponent {exponent}")]
    InvalidExponent { exponent: i64 },
    #[error("unbound identifier {name:?}")]
    UnboundIdentifier { name: String },
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("unsupported expression: {kind}")]
    UnsupportedExpression { kind: String },
}

/// Errors raised while assembling an operator table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("operator {symbol:?} declared more than once")]
    DuplicateOperator { symbol: String },
    #[error("operator symbols cannot be empty")]
    EmptySymbol,
    #[error("precedence level {level} has no operators")]
    EmptyLevel { level: usize },
}
