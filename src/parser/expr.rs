use crate::{
    ast::{
        ast::Ident,
        expressions::{ArithmeticOp, Expr, LogicalOp, RelationalOp, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    features::Features,
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

/// Precedence climbing over the NUD/LED tables.
///
/// Parses one prefix form, then keeps folding binary operators into `left`
/// while the next operator binds tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nested()?;
    let expr = parse_nested_expr(parser, bp);
    parser.leave_nested();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected(parser.expression_starters())),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(&operator_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()) {
        if operator_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

/// Identifier parser: every rule that names something goes through here.
pub fn parse_ident(parser: &mut Parser) -> Result<Ident, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Ident::new(token.value, token.span.start))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::IntVal => token
            .value
            .parse()
            .map(Expr::IntLiteral)
            .map_err(|_| malformed(&token, "integer literal does not fit in 64 bits")),
        TokenKind::FloatVal => match token.value.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Expr::FloatLiteral(value)),
            Ok(_) => Err(malformed(&token, "float literal is out of range")),
            Err(_) => Err(malformed(&token, "not a valid float literal")),
        },
        TokenKind::CharVal => {
            let mut chars = token.value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Expr::CharLiteral(ch)),
                _ => Err(malformed(&token, "character literal must hold exactly one character")),
            }
        }
        TokenKind::BoolVal => Ok(Expr::BoolLiteral(token.value == "true")),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: vec![
                    TokenKind::IntVal,
                    TokenKind::FloatVal,
                    TokenKind::CharVal,
                    TokenKind::BoolVal,
                ],
                found: token.kind,
                lexeme: token.value.clone(),
            },
            token.span.start,
        )),
    }
}

/// `name`, `name(args)` or `name[index]`.
///
/// The token after the identifier decides between the three atoms.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let ident = parse_ident(parser)?;

    match parser.current_token_kind() {
        TokenKind::OpenParen => {
            let args = parse_call_args(parser)?;
            Ok(Expr::Call { ident, args })
        }
        TokenKind::OpenBracket if parser.features().contains(Features::ARRAYS) => {
            parser.advance();
            let index = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseBracket)?;
            Ok(Expr::ArrayAccess {
                ident,
                index: Box::new(index),
            })
        }
        _ => Ok(Expr::Ident(ident)),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    let left = Box::new(left);
    let right = Box::new(right);

    let expr = match operator_token.kind {
        TokenKind::Star => Expr::Arithmetic { op: ArithmeticOp::Mul, left, right },
        TokenKind::Slash => Expr::Arithmetic { op: ArithmeticOp::Div, left, right },
        TokenKind::Percent => Expr::Arithmetic { op: ArithmeticOp::Mod, left, right },
        TokenKind::Plus => Expr::Arithmetic { op: ArithmeticOp::Add, left, right },
        TokenKind::Dash => Expr::Arithmetic { op: ArithmeticOp::Sub, left, right },
        TokenKind::Equals => Expr::Relational { op: RelationalOp::Equal, left, right },
        TokenKind::NotEquals => Expr::Relational { op: RelationalOp::NotEqual, left, right },
        TokenKind::Less => Expr::Relational { op: RelationalOp::Less, left, right },
        TokenKind::Greater => Expr::Relational { op: RelationalOp::Greater, left, right },
        TokenKind::LessEquals => Expr::Relational { op: RelationalOp::LessEqual, left, right },
        TokenKind::GreaterEquals => Expr::Relational { op: RelationalOp::GreaterEqual, left, right },
        TokenKind::And => Expr::Logical { op: LogicalOp::And, left, right },
        TokenKind::Or => Expr::Logical { op: LogicalOp::Or, left, right },
        other => {
            let mut expected: Vec<TokenKind> = parser.get_led_lookup().keys().copied().collect();
            expected.sort();
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected,
                    found: other,
                    lexeme: operator_token.value.clone(),
                },
                operator_token.span.start,
            ))
        }
    };

    Ok(expr)
}

/// `not`, `+` and `-` bind tighter than every binary operator.
///
/// The operand is parsed at unary strength, so it is an atom or another
/// prefix expression: `-a * b` is `(-a) * b` and `- - a` nests.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Dash => UnaryOp::Minus,
        other => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: vec![TokenKind::Not, TokenKind::Plus, TokenKind::Dash],
                    found: other,
                    lexeme: operator_token.value.clone(),
                },
                operator_token.span.start,
            ))
        }
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Parenthesized(Box::new(expr)))
}

/// `( [expr (, expr)*] )`; a comma must be followed by another argument.
pub fn parse_call_args(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            match parser.current_token_kind() {
                TokenKind::Comma => {
                    parser.advance();
                }
                TokenKind::CloseParen => break,
                _ => return Err(parser.unexpected(vec![TokenKind::Comma, TokenKind::CloseParen])),
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(args)
}

fn malformed(token: &Token, reason: &str) -> Error {
    Error::new(
        ErrorImpl::MalformedLiteral {
            literal: token.value.clone(),
            reason: String::from(reason),
        },
        token.span.start,
    )
}
