//! Function, parameter and variable declaration parsers.

use crate::{
    ast::ast::{Function, Parameter, VariableDeclaration},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_ident, parser::Parser, stmt::parse_statements, types::parse_type};

/// `func <ID> ( <parameters> ) [ : <type> ] <declarations> <statements> endfunc`
pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    parser.expect(TokenKind::Func)?;
    let name = parse_ident(parser)?;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    let declarations = parse_declarations(parser);
    let statements = parse_statements(parser);

    parser.expect_block_end(&[TokenKind::EndFunc])?;

    Ok(Function {
        name,
        parameters,
        return_type,
        declarations,
        statements,
    })
}

/// Zero or more `<ID> : <type>` separated by commas, up to but not including `)`.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    let mut parameters = vec![];

    match parser.current_token_kind() {
        TokenKind::CloseParen => return Ok(parameters),
        TokenKind::Identifier => {}
        _ => return Err(parser.unexpected(vec![TokenKind::Identifier, TokenKind::CloseParen])),
    }

    loop {
        let name = parse_ident(parser)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;
        parameters.push(Parameter { name, ty });

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => break,
            _ => return Err(parser.unexpected(vec![TokenKind::Comma, TokenKind::CloseParen])),
        }
    }

    Ok(parameters)
}

/// Parses `var` declarations while they last, recovering from bad ones.
pub fn parse_declarations(parser: &mut Parser) -> Vec<VariableDeclaration> {
    let mut declarations = vec![];

    while parser.current_token_kind() == TokenKind::Var {
        let start = parser.cursor();
        match parse_variable_decl(parser) {
            Ok(declared) => declarations.extend(declared),
            Err(error) => {
                parser.report(error);
                parser.synchronize(start);
            }
        }
    }

    declarations
}

/// `var <ID> (, <ID>)* : <type> ;`
///
/// Every name gets its own declaration holding a copy of the type.
pub fn parse_variable_decl(parser: &mut Parser) -> Result<Vec<VariableDeclaration>, Error> {
    parser.expect(TokenKind::Var)?;

    let mut names = vec![parse_ident(parser)?];
    loop {
        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                names.push(parse_ident(parser)?);
            }
            TokenKind::Colon => break,
            _ => return Err(parser.unexpected(vec![TokenKind::Comma, TokenKind::Colon])),
        }
    }
    parser.advance();

    let ty = parse_type(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(names
        .into_iter()
        .map(|name| VariableDeclaration { name, ty })
        .collect())
}
