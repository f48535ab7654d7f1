use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The front-end phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lexical,
    Parse,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorPhase::Lexical,
            _ => ErrorPhase::Parse,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::EvenTermCount { .. } => "EvenTermCount",
            ErrorImpl::UnreducibleExpression { .. } => "UnreducibleExpression",
            ErrorImpl::NoRuleMatched { .. } => "NoRuleMatched",
            ErrorImpl::TrailingTokens { .. } => "TrailingTokens",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended early, expected {}", expected))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it too large for a 64-bit float?",
                token
            )),
            ErrorImpl::EvenTermCount { terms } => ErrorTip::Suggestion(format!(
                "Expression has {} terms, operators need an operand on both sides",
                terms
            )),
            ErrorImpl::UnreducibleExpression { remaining } => ErrorTip::Suggestion(format!(
                "Expression reduced to {} values instead of one",
                remaining
            )),
            ErrorImpl::NoRuleMatched { rule } => {
                ErrorTip::Suggestion(format!("No alternative of `{}` matched", rule))
            }
            ErrorImpl::TrailingTokens { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}` after the last complete statement",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
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

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expression must have odd number of terms, found {terms}")]
    EvenTermCount { terms: usize },
    #[error("expression did not reduce to a single value ({remaining} left)")]
    UnreducibleExpression { remaining: usize },
    #[error("no rule was matched: {rule}")]
    NoRuleMatched { rule: &'static str },
    #[error("trailing tokens after program: {token:?}")]
    TrailingTokens { token: String },
}
