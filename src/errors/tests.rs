//! Unit tests for error handling.
//!
//! This module contains tests for error types, tips and error reporting.

use crate::{
    errors::errors::{describe_expected, Error, ErrorImpl, ErrorTip},
    lexer::tokens::TokenKind,
    Position,
};

fn at(line: u32, column: u32) -> Position {
    Position { line, column }
}

#[test]
fn test_error_names() {
    let cases = vec![
        (
            ErrorImpl::UnrecognisedToken {
                token: "@".to_string(),
            },
            "UnrecognisedToken",
        ),
        (
            ErrorImpl::UnexpectedToken {
                expected: vec![TokenKind::Semicolon],
                found: TokenKind::Identifier,
                lexeme: "x".to_string(),
            },
            "UnexpectedToken",
        ),
        (
            ErrorImpl::PrematureEnd {
                expected: vec![TokenKind::EndIf],
            },
            "PrematureEnd",
        ),
        (
            ErrorImpl::MalformedLiteral {
                literal: "99999999999999999999".to_string(),
                reason: "too large".to_string(),
            },
            "MalformedLiteral",
        ),
        (ErrorImpl::NestingTooDeep { limit: 256 }, "NestingTooDeep"),
    ];

    for (error_impl, name) in cases {
        assert_eq!(Error::new(error_impl, at(1, 1)).get_error_name(), name);
    }
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        at(42, 7),
    );

    assert_eq!(error.get_position(), &at(42, 7));
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Comma, TokenKind::CloseParen],
            found: TokenKind::Semicolon,
            lexeme: ";".to_string(),
        },
        at(3, 12),
    );

    assert_eq!(
        error.to_string(),
        "unexpected token \";\", expected `,` or `)` at 3:12"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_tip_missing_semicolon() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Semicolon],
            found: TokenKind::EndFunc,
            lexeme: "endfunc".to_string(),
        },
        at(4, 1),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `endfunc`, did you miss a semicolon?"
    );
}

#[test]
fn test_error_tip_lists_expected() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Identifier, TokenKind::CloseParen],
            found: TokenKind::IntVal,
            lexeme: "1".to_string(),
        },
        at(1, 8),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `1`, expected identifier or `)`"
    );
}

#[test]
fn test_error_tip_premature_end() {
    let error = Error::new(
        ErrorImpl::PrematureEnd {
            expected: vec![TokenKind::EndWhile],
        },
        at(9, 1),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Input ended early, expected `endwhile`; is a block terminator missing?"
    );
}

#[test]
fn test_describe_expected() {
    assert_eq!(describe_expected(&[]), "nothing");
    assert_eq!(describe_expected(&[TokenKind::Func]), "`func`");
    assert_eq!(
        describe_expected(&[TokenKind::Int, TokenKind::Float, TokenKind::EOF]),
        "one of `int`, `float`, end of input"
    );
}

#[test]
fn test_nesting_error_message() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 256 }, at(2, 9));

    assert_eq!(error.to_string(), "nesting deeper than 256 levels at 2:9");
    assert!(error.get_tip().to_string().contains("at most 256 levels"));
}
