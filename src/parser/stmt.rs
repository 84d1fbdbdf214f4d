use crate::{
    ast::{
        expressions::Expr,
        statements::{LeftExpr, Statement},
    },
    errors::errors::Error,
    features::Features,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_call_args, parse_expr, parse_ident},
    lookups::BindingPower,
    parser::Parser,
};

/// Parses statements for as long as the current token can start one.
///
/// A failed statement is recorded and the parser resynchronizes, so the
/// returned block only holds the statements that parsed.
pub fn parse_statements(parser: &mut Parser) -> Vec<Statement> {
    let mut statements = vec![];

    while parser.starts_statement() {
        let start = parser.cursor();
        match parse_stmt(parser) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                parser.report(error);
                parser.synchronize(start);
            }
        }
    }

    statements
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.enter_nested()?;
    let statement = parse_nested_stmt(parser);
    parser.leave_nested();

    statement
}

fn parse_nested_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let handler = match parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected(parser.statement_starters())),
    };

    handler(parser)
}

fn parse_index(parser: &mut Parser) -> Result<Option<Expr>, Error> {
    if parser.current_token_kind() != TokenKind::OpenBracket
        || !parser.features().contains(Features::ARRAYS)
    {
        return Ok(None);
    }

    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Some(index))
}

/// `name` or `name[index]`.
pub fn parse_left_expr(parser: &mut Parser) -> Result<LeftExpr, Error> {
    let ident = parse_ident(parser)?;
    let index = parse_index(parser)?;

    Ok(LeftExpr { ident, index })
}

/// Statements that start with a name.
///
/// `(` after the name makes a procedure call; anything else continues as
/// the target of an assignment.
pub fn parse_ident_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let ident = parse_ident(parser)?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        let args = parse_call_args(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Statement::ProcCall {
            callee: ident,
            args,
        });
    }

    let index = parse_index(parser)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        let mut expected = vec![TokenKind::Assignment];
        if index.is_none() {
            expected.push(TokenKind::OpenParen);
            if parser.features().contains(Features::ARRAYS) {
                expected.push(TokenKind::OpenBracket);
            }
        }
        return Err(parser.unexpected(expected));
    }
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Assign {
        target: LeftExpr { ident, index },
        value,
    })
}

/// Condition of an `if` or `while` up to and including `then`/`do`.
///
/// When the header is broken the whole block is skipped through its
/// terminator, so its body and closing keyword are not reparsed as loose
/// statements.
fn parse_block_header(parser: &mut Parser, body_start: TokenKind) -> Result<Expr, Error> {
    let header = parse_expr(parser, BindingPower::Default)
        .and_then(|cond| parser.expect(body_start).map(|_| cond));

    if header.is_err() {
        parser.skip_block();
    }

    header
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::If)?;
    let cond = parse_block_header(parser, TokenKind::Then)?;

    let then_block = parse_statements(parser);

    // Every if carries its own endif, so an else always belongs to this if
    let terminator = parser.expect_block_end(&[TokenKind::Else, TokenKind::EndIf])?;
    let else_block = if terminator.kind == TokenKind::Else {
        let block = parse_statements(parser);
        parser.expect_block_end(&[TokenKind::EndIf])?;
        Some(block)
    } else {
        None
    };

    Ok(Statement::If {
        cond,
        then_block,
        else_block,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::While)?;
    let cond = parse_block_header(parser, TokenKind::Do)?;

    let body = parse_statements(parser);
    parser.expect_block_end(&[TokenKind::EndWhile])?;

    Ok(Statement::While { cond, body })
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::Read)?;
    let target = parse_left_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Read { target })
}

/// `write "text";` or `write expr;`, told apart by the token after `write`.
pub fn parse_write_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::Write)?;

    let statement = if parser.current_token_kind() == TokenKind::String {
        let literal = parser.advance().value.clone();
        Statement::WriteString { literal }
    } else if parser.starts_expression() {
        let value = parse_expr(parser, BindingPower::Default)?;
        Statement::WriteExpr { value }
    } else {
        let mut expected = parser.expression_starters();
        expected.push(TokenKind::String);
        return Err(parser.unexpected(expected));
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(statement)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::Return)?;

    let value = if parser.starts_expression() {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    if parser.current_token_kind() != TokenKind::Semicolon {
        let mut expected = vec![TokenKind::Semicolon];
        if value.is_none() {
            expected.extend(parser.expression_starters());
        }
        return Err(parser.unexpected(expected));
    }
    parser.advance();

    Ok(Statement::Return { value })
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::Try)?;

    let body = parse_statements(parser);
    parser.expect_block_end(&[TokenKind::Catch])?;

    let handler = parse_statements(parser);
    parser.expect_block_end(&[TokenKind::EndTry])?;

    Ok(Statement::Try { body, handler })
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(TokenKind::Throw)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Throw { value })
}
