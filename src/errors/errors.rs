use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
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

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::PrematureEnd { .. } => "PrematureEnd",
            ErrorImpl::MalformedLiteral { .. } => "MalformedLiteral",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, lexeme, .. }
                if expected.contains(&TokenKind::Semicolon) =>
            {
                ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    lexeme
                ))
            }
            ErrorImpl::UnexpectedToken { expected, lexeme, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                lexeme,
                describe_expected(expected)
            )),
            ErrorImpl::PrematureEnd { expected } => ErrorTip::Suggestion(format!(
                "Input ended early, expected {}; is a block terminator missing?",
                describe_expected(expected)
            )),
            ErrorImpl::MalformedLiteral { literal, reason } => {
                ErrorTip::Suggestion(format!("Invalid literal `{}`: {}", literal, reason))
            }
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Blocks and expressions may nest at most {} levels; split this into smaller parts",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
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
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token {lexeme:?}, expected {}", describe_expected(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        lexeme: String,
    },
    #[error("unexpected end of input, expected {}", describe_expected(.expected))]
    PrematureEnd { expected: Vec<TokenKind> },
    #[error("malformed literal {literal:?}: {reason}")]
    MalformedLiteral { literal: String, reason: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Joins an expected-kind set into prose, e.g. "`;` or `,`".
pub fn describe_expected(expected: &[TokenKind]) -> String {
    let names: Vec<&str> = expected.iter().map(TokenKind::describe).collect();
    match names.as_slice() {
        [] => String::from("nothing"),
        [single] => single.to_string(),
        [first, second] => format!("{} or {}", first, second),
        _ => format!("one of {}", names.join(", ")),
    }
}
