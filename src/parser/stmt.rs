use crate::{
    ast::{
        ast::VariableDecl,
        expressions::Expr,
        statements::{
            BlockStmt, ControlKind, ControlStmt, ExpressionStmt, ForStmt, IfStmt, Stmt, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    if parser.at_declaration() {
        return parse_var_decl_stmt(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: parser.span_from(&expression.span.start),
        expression,
    }))
}

/// Parses `Type name (= value)?` without the terminating semicolon.
pub fn parse_variable(parser: &mut Parser<'_>) -> Result<VariableDecl, Error> {
    let start = parser.get_position();
    let ty = parse_type(parser, BindingPower::Default)?;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let name = parser
        .expect_error(TokenKind::Identifier, Some(error))?
        .value;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(VariableDecl {
        ty,
        name,
        initializer,
        span: parser.span_from(&start),
    })
}

/// Parses a variable declaration including its semicolon.
pub fn parse_variable_decl(parser: &mut Parser<'_>) -> Result<VariableDecl, Error> {
    let mut variable = parse_variable(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    variable.span = parser.span_from(&variable.span.start);

    Ok(variable)
}

pub fn parse_var_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    Ok(Stmt::VarDecl(parse_variable_decl(parser)?))
}

/// Parses `(condition)`.
fn parse_condition(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;

    let next = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        body: Box::new(body),
        next,
        span: parser.span_from(&start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
        span: parser.span_from(&start),
    }))
}

/// `for (init, init; condition; iterator, iterator) body`, every part optional.
pub fn parse_for_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(TokenKind::OpenParen)?;

    let mut initializers = vec![];
    while parser.current_token_kind() != TokenKind::Semicolon {
        if parser.at_declaration() {
            initializers.push(Stmt::VarDecl(parse_variable(parser)?));
        } else {
            let expression = parse_expr(parser, BindingPower::Default)?;
            initializers.push(Stmt::Expression(ExpressionStmt {
                span: expression.span.clone(),
                expression,
            }));
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::Semicolon {
            return Err(parser.unexpected(&[",", ";"]));
        }
    }
    parser.expect(TokenKind::Semicolon)?;

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let mut iterators = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        iterators.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected(&[",", ")"]));
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::For(ForStmt {
        initializers,
        condition,
        iterators,
        body: Box::new(body),
        span: parser.span_from(&start),
    }))
}

pub fn parse_block(parser: &mut Parser<'_>) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected(&["}"]));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(&start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `return value?;`, `break;` and `continue;`
pub fn parse_control_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let token = parser.advance();
    let kind = match token.kind {
        TokenKind::Break => ControlKind::Break,
        TokenKind::Continue => ControlKind::Continue,
        _ => ControlKind::Return,
    };

    let value = if kind == ControlKind::Return
        && parser.current_token_kind() != TokenKind::Semicolon
    {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Control(ControlStmt {
        kind,
        value,
        span: parser.span_from(&token.span.start),
    }))
}
