//! Type parsing implementation.
//!
//! A type is chosen by its first token:
//!
//! - `int`, `float`, `bool`, `char`
//! - `array [ <INTVAL> ] of <basic type>` (with [`Features::ARRAYS`])
//!
//! Arrays have a literal size and a basic element type; there are no arrays
//! of arrays. The size is not checked for positivity here.

use std::collections::HashMap;

use crate::{
    ast::types::{BasicType, Type},
    errors::errors::{Error, ErrorImpl},
    features::Features,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Int, parse_basic_type);
    parser.type_nud(TokenKind::Float, parse_basic_type);
    parser.type_nud(TokenKind::Bool, parse_basic_type);
    parser.type_nud(TokenKind::Char, parse_basic_type);

    if parser.features().contains(Features::ARRAYS) {
        parser.type_nud(TokenKind::Array, parse_array_type);
    }
}

fn basic_type_of(kind: TokenKind) -> Option<BasicType> {
    match kind {
        TokenKind::Int => Some(BasicType::Int),
        TokenKind::Float => Some(BasicType::Float),
        TokenKind::Bool => Some(BasicType::Bool),
        TokenKind::Char => Some(BasicType::Char),
        _ => None,
    }
}

fn parse_basic(parser: &mut Parser) -> Result<BasicType, Error> {
    match basic_type_of(parser.current_token_kind()) {
        Some(basic) => {
            parser.advance();
            Ok(basic)
        }
        None => Err(parser.unexpected(vec![
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Bool,
            TokenKind::Char,
        ])),
    }
}

pub fn parse_basic_type(parser: &mut Parser) -> Result<Type, Error> {
    parse_basic(parser).map(Type::Basic)
}

pub fn parse_array_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.expect(TokenKind::Array)?;
    parser.expect(TokenKind::OpenBracket)?;

    let size_token = parser.expect(TokenKind::IntVal)?;
    let size = size_token.value.parse::<u32>().map_err(|_| {
        Error::new(
            ErrorImpl::MalformedLiteral {
                literal: size_token.value.clone(),
                reason: String::from("array size does not fit in 32 bits"),
            },
            size_token.span.start,
        )
    })?;

    parser.expect(TokenKind::CloseBracket)?;
    parser.expect(TokenKind::Of)?;

    let element = parse_basic(parser)?;

    Ok(Type::Array { size, element })
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let handler = match parser.get_type_nud_lookup().get(&parser.current_token_kind()) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected(parser.type_starters())),
    };

    handler(parser)
}
