use crate::{
    ast::expressions::{
        AssignOperator, AssignTarget, BinaryOperator, CallSite, Expr, ExprKind, Literal,
        UnaryOperator,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

fn make_expr(parser: &mut Parser<'_>, kind: ExprKind, span: Span) -> Expr {
    Expr {
        id: parser.advance_id(),
        kind,
        span,
    }
}

pub fn parse_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected(&["expression"])),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected(&[])),
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = parser.advance();

    let kind = match token.kind {
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(value) => ExprKind::Literal(Literal::Number(value)),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => ExprKind::Literal(Literal::String(token.value.clone())),
        TokenKind::CharLiteral => match token.value.chars().next() {
            Some(value) => ExprKind::Literal(Literal::Char(value)),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::True => ExprKind::Literal(Literal::Bool(true)),
        TokenKind::False => ExprKind::Literal(Literal::Bool(false)),
        TokenKind::Null => ExprKind::Literal(Literal::Null),
        TokenKind::Identifier => ExprKind::Get {
            object: None,
            name: token.value.clone(),
        },
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value,
                    expected: vec![String::from("expression")],
                },
                token.span.start,
            ))
        }
    };

    Ok(make_expr(parser, kind, token.span))
}

pub fn parse_binary_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match BinaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                    expected: vec![String::from("operator")],
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(make_expr(
        parser,
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

/// `^` binds its right operand first: `a ^ b ^ c` is `a ^ (b ^ c)`.
pub fn parse_power_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parse_binary_expr(parser, left, BindingPower::Multiplicative)
}

pub fn parse_prefix_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match UnaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => return Err(parser.unexpected(&["!", "-", "++", "--"])),
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = operator_token.span.to(&operand.span);

    Ok(make_expr(
        parser,
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
            postfix: false,
        },
        span,
    ))
}

pub fn parse_postfix_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = if operator_token.kind == TokenKind::PlusPlus {
        UnaryOperator::Increment
    } else {
        UnaryOperator::Decrement
    };
    let span = left.span.to(&operator_token.span);

    Ok(make_expr(
        parser,
        ExprKind::Unary {
            operator,
            operand: Box::new(left),
            postfix: true,
        },
        span,
    ))
}

/// Parses the right hand side and turns the already parsed left side into
/// an assignment target. Only names, members and indexed elements qualify.
pub fn parse_assignment_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match AssignOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => return Err(parser.unexpected(&["="])),
    };

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = left.span.to(&value.span);
    let target_position = left.span.start.clone();

    let target = match left.kind {
        ExprKind::Get { object: None, name } => AssignTarget::Name(name),
        ExprKind::Get {
            object: Some(object),
            name,
        } => AssignTarget::Member { object, name },
        ExprKind::Call {
            site: CallSite::Index,
            callee,
            mut arguments,
        } if arguments.len() == 1 => AssignTarget::Index {
            object: callee,
            index: Box::new(arguments.remove(0)),
        },
        _ => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget,
                target_position,
            ))
        }
    };

    Ok(make_expr(
        parser,
        ExprKind::Set {
            target,
            operator,
            value: Box::new(value),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(&start);
    Ok(make_expr(parser, ExprKind::Group(Box::new(expr)), span))
}

/// Parses `expr, expr, ...` up to and including `closer`.
fn parse_arguments(parser: &mut Parser<'_>, closer: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    while parser.current_token_kind() != closer {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != closer {
            let closer_name = closer.to_string();
            return Err(parser.unexpected(&[",", closer_name.as_str()]));
        }
    }

    parser.expect(closer)?;
    Ok(arguments)
}

pub fn parse_call_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let arguments = parse_arguments(parser, TokenKind::CloseParen)?;
    let span = parser.span_from(&left.span.start);

    Ok(make_expr(
        parser,
        ExprKind::Call {
            site: CallSite::Invoke,
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

pub fn parse_index_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let arguments = parse_arguments(parser, TokenKind::CloseBracket)?;
    let span = parser.span_from(&left.span.start);

    Ok(make_expr(
        parser,
        ExprKind::Call {
            site: CallSite::Index,
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

pub fn parse_member_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier)?.value;
    let span = parser.span_from(&left.span.start);

    Ok(make_expr(
        parser,
        ExprKind::Get {
            object: Some(Box::new(left)),
            name,
        },
        span,
    ))
}

pub fn parse_cast_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let target = parse_type(parser, BindingPower::Default)?;
    let span = parser.span_from(&left.span.start);

    Ok(make_expr(
        parser,
        ExprKind::Cast {
            operand: Box::new(left),
            target,
        },
        span,
    ))
}

/// `new Type(arguments)`
pub fn parse_new_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let start: Position = parser.advance().span.start;
    let target = parse_type(parser, BindingPower::Default)?;

    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_arguments(parser, TokenKind::CloseParen)?;
    let span = parser.span_from(&start);

    Ok(make_expr(parser, ExprKind::New { target, arguments }, span))
}
