//! Top level declarations.
//!
//! The header functions parse only what `harvest` needs to know about a
//! declaration (its name and signature). The full parsers reuse them and
//! then parse the body.

use crate::{
    ast::{
        ast::{
            DelegateDecl, Declaration, EnumDecl, EnumMember, FunctionDecl, Parameter, StructDecl,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    registry::registry::DelegateSignature,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_variable_decl},
    types::parse_type,
};

/// Parses one top level declaration and registers its concrete shape.
pub fn parse_declaration(parser: &mut Parser<'_>) -> Result<Declaration, Error> {
    match parser.current_token_kind() {
        TokenKind::Struct => parse_struct_decl(parser),
        TokenKind::Enum => parse_enum_decl(parser),
        TokenKind::Delegate => parse_delegate_decl(parser),
        _ => {
            let start = parser.pos();
            parse_type(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Identifier)?;
            let is_function = parser.current_token_kind() == TokenKind::OpenParen;
            parser.seek(start);

            if is_function {
                parse_function_decl(parser)
            } else {
                let variable = parse_variable_decl(parser)?;
                parser
                    .registry_mut()
                    .register_global(&variable.name, &variable.ty);
                Ok(Declaration::Variable(variable))
            }
        }
    }
}

/// `struct Name` or `enum Name`, returning the name token.
pub fn parse_named_header(parser: &mut Parser<'_>, keyword: TokenKind) -> Result<Token, Error> {
    parser.expect(keyword)?;
    parser.expect(TokenKind::Identifier)
}

pub fn parse_struct_decl(parser: &mut Parser<'_>) -> Result<Declaration, Error> {
    let start = parser.get_position();
    let name = parse_named_header(parser, TokenKind::Struct)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        fields.push(parse_variable_decl(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    parser.registry_mut().register_struct(
        &name,
        fields
            .iter()
            .map(|field| (field.name.clone(), field.ty.clone()))
            .collect(),
    );

    Ok(Declaration::Struct(StructDecl {
        name,
        fields,
        span: parser.span_from(&start),
    }))
}

/// Parses an enum member value, an optionally negated integer.
fn parse_enum_value(parser: &mut Parser<'_>) -> Result<i64, Error> {
    let negative = parser.current_token_kind() == TokenKind::Dash;
    if negative {
        parser.advance();
    }

    let token = parser.expect(TokenKind::Number)?;
    let value = match token.value.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            return Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(if negative { -value } else { value })
}

pub fn parse_enum_decl(parser: &mut Parser<'_>) -> Result<Declaration, Error> {
    let start = parser.get_position();
    let name = parse_named_header(parser, TokenKind::Enum)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut members: Vec<EnumMember> = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let member = parser.expect(TokenKind::Identifier)?;
        let previous = members.last().map(|member| member.value);

        let value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            let value_position = parser.get_position();
            let value = parse_enum_value(parser)?;

            if let Some(minimum) = previous {
                if value < minimum {
                    return Err(Error::new(
                        ErrorImpl::EnumValueDecreasing {
                            member: member.value,
                            value,
                            minimum,
                        },
                        value_position,
                    ));
                }
            }

            value
        } else {
            match previous {
                Some(previous) => previous.checked_add(1).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::EnumValueOverflow {
                            member: member.value.clone(),
                        },
                        member.span.start.clone(),
                    )
                })?,
                None => 0,
            }
        };

        members.push(EnumMember {
            name: member.value,
            value,
            span: parser.span_from(&member.span.start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseCurly {
            return Err(parser.unexpected(&[",", "}"]));
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    parser.registry_mut().register_enum(
        &name,
        members
            .iter()
            .map(|member| (member.name.clone(), member.value))
            .collect(),
    );

    Ok(Declaration::Enum(EnumDecl {
        name,
        members,
        span: parser.span_from(&start),
    }))
}

/// Parses a complete `delegate Ret Name(Type name?, ...);`. The delegate
/// has no body, so the header is the whole declaration.
pub fn parse_delegate_header(parser: &mut Parser<'_>) -> Result<DelegateDecl, Error> {
    let start = parser.expect(TokenKind::Delegate)?.span.start;
    let return_type = parse_type(parser, BindingPower::Default)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_type(parser, BindingPower::Default)?);

        // Parameter names are optional and carry no meaning
        if parser.current_token_kind() == TokenKind::Identifier {
            parser.advance();
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected(&[",", ")"]));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(DelegateDecl {
        name,
        return_type,
        parameters,
        span: parser.span_from(&start),
    })
}

pub fn parse_delegate_decl(parser: &mut Parser<'_>) -> Result<Declaration, Error> {
    let delegate = parse_delegate_header(parser)?;
    parser.registry_mut().register_delegate(
        &delegate.name,
        DelegateSignature {
            return_type: delegate.return_type.clone(),
            parameters: delegate.parameters.clone(),
        },
    );

    Ok(Declaration::Delegate(delegate))
}

/// The part of a function before its body.
pub struct FunctionHeader {
    pub return_type: Type,
    pub name: Token,
    pub parameters: Vec<Parameter>,
}

impl FunctionHeader {
    pub fn signature(&self) -> DelegateSignature {
        DelegateSignature {
            return_type: self.return_type.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|parameter| parameter.ty.clone())
                .collect(),
        }
    }
}

/// Parses `Ret name(Type a, Type b)`.
pub fn parse_function_header(parser: &mut Parser<'_>) -> Result<FunctionHeader, Error> {
    let return_type = parse_type(parser, BindingPower::Default)?;
    let name = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let start = parser.get_position();
        let ty = parse_type(parser, BindingPower::Default)?;
        let parameter_name = parser.expect(TokenKind::Identifier)?.value;

        parameters.push(Parameter {
            ty,
            name: parameter_name,
            span: parser.span_from(&start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected(&[",", ")"]));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(FunctionHeader {
        return_type,
        name,
        parameters,
    })
}

pub fn parse_function_decl(parser: &mut Parser<'_>) -> Result<Declaration, Error> {
    let start = parser.get_position();
    let header = parse_function_header(parser)?;

    // Bodiless functions are not part of the grammar
    let body = parse_block(parser)?;
    let delegate = parser
        .registry_mut()
        .register_function(&header.name.value, header.signature());

    Ok(Declaration::Function(FunctionDecl {
        return_type: header.return_type,
        name: header.name.value,
        parameters: header.parameters,
        body: Some(body),
        delegate,
        span: parser.span_from(&start),
    }))
}
