//! First parsing phase.
//!
//! `harvest` walks a file's top level declarations with the same grammar as
//! the full parser, but only parses names and signatures. Bodies and
//! initializers are skipped by bracket depth. Every name is claimed in the
//! registry, and function and global signatures are registered, so that any
//! file may refer to any declaration before it is fully parsed.

use tracing::debug;

use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    registry::registry::{DelegateSignature, NameOwner, Registry},
};

use super::{
    decl::{parse_delegate_header, parse_function_header, parse_named_header},
    lookups::BindingPower,
    parser::Parser,
    types::parse_type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Struct,
    Enum,
    Delegate,
    Function,
    Global,
}

/// A declaration found by `harvest`: its name and its token range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSkeleton {
    pub kind: DeclarationKind,
    pub name: String,
    /// Index of the declaration's first token
    pub start: usize,
    /// Index one past the declaration's last token
    pub end: usize,
}

fn closer_for(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
        TokenKind::OpenParen => Some(TokenKind::CloseParen),
        TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
        _ => None,
    }
}

fn is_closer(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::CloseCurly | TokenKind::CloseParen | TokenKind::CloseBracket
    )
}

/// Skips from an opening bracket to just past its matching closer.
pub fn skip_balanced(parser: &mut Parser<'_>) -> Result<(), Error> {
    let mut expected = match closer_for(parser.current_token_kind()) {
        Some(closer) => vec![closer],
        None => return Err(parser.unexpected(&["{", "(", "["])),
    };
    parser.advance();

    while let Some(closer) = expected.last().copied() {
        let kind = parser.current_token_kind();

        if kind == TokenKind::EOF {
            let closer_name = closer.to_string();
            return Err(parser.unexpected(&[closer_name.as_str()]));
        }

        if let Some(nested) = closer_for(kind) {
            expected.push(nested);
        } else if kind == closer {
            expected.pop();
        } else if is_closer(kind) {
            let closer_name = closer.to_string();
            return Err(parser.unexpected(&[closer_name.as_str()]));
        }

        parser.advance();
    }

    Ok(())
}

/// Skips an initializer up to, not including, its terminating semicolon.
fn skip_until_semicolon(parser: &mut Parser<'_>) -> Result<(), Error> {
    loop {
        let kind = parser.current_token_kind();
        match kind {
            TokenKind::Semicolon => return Ok(()),
            TokenKind::EOF => return Err(parser.unexpected(&[";"])),
            _ if closer_for(kind).is_some() => skip_balanced(parser)?,
            _ if is_closer(kind) => return Err(parser.unexpected(&[";"])),
            _ => {
                parser.advance();
            }
        }
    }
}

fn harvest_declaration(
    parser: &mut Parser<'_>,
) -> Result<(DeclarationKind, String), Error> {
    match parser.current_token_kind() {
        kind @ (TokenKind::Struct | TokenKind::Enum) => {
            let name = parse_named_header(parser, kind)?;
            let (owner, declaration) = if kind == TokenKind::Struct {
                (NameOwner::Struct, DeclarationKind::Struct)
            } else {
                (NameOwner::Enum, DeclarationKind::Enum)
            };

            parser
                .registry_mut()
                .declare_name(&name.value, owner, &name.span.start)?;

            if parser.current_token_kind() != TokenKind::OpenCurly {
                return Err(parser.unexpected(&["{"]));
            }
            skip_balanced(parser)?;

            Ok((declaration, name.value))
        }
        TokenKind::Delegate => {
            let position = parser.get_position();
            let delegate = parse_delegate_header(parser)?;

            let registry = parser.registry_mut();
            registry.declare_name(&delegate.name, NameOwner::Delegate, &position)?;
            registry.register_delegate(
                &delegate.name,
                DelegateSignature {
                    return_type: delegate.return_type,
                    parameters: delegate.parameters,
                },
            );

            Ok((DeclarationKind::Delegate, delegate.name))
        }
        _ => {
            let start = parser.pos();
            let ty = parse_type(parser, BindingPower::Default)?;
            let name = parser.expect(TokenKind::Identifier)?;

            if parser.current_token_kind() == TokenKind::OpenParen {
                parser.seek(start);
                let header = parse_function_header(parser)?;

                let registry = parser.registry_mut();
                registry.declare_name(
                    &header.name.value,
                    NameOwner::Function,
                    &header.name.span.start,
                )?;
                registry.register_function(&header.name.value, header.signature());

                if parser.current_token_kind() != TokenKind::OpenCurly {
                    return Err(parser.unexpected(&["{"]));
                }
                skip_balanced(parser)?;

                return Ok((DeclarationKind::Function, header.name.value));
            }

            let registry = parser.registry_mut();
            registry.declare_name(&name.value, NameOwner::Global, &name.span.start)?;
            registry.register_global(&name.value, &ty);

            match parser.current_token_kind() {
                TokenKind::Assignment => {
                    parser.advance();
                    skip_until_semicolon(parser)?;
                }
                TokenKind::Semicolon => {}
                _ => return Err(parser.unexpected(&["(", "=", ";"])),
            }
            parser.expect(TokenKind::Semicolon)?;

            Ok((DeclarationKind::Global, name.value))
        }
    }
}

/// Finds every top level declaration of one file and claims its name.
///
/// Returns the declarations in source order with the token range each one
/// occupies, to be handed to `parse`.
pub fn harvest(
    tokens: &[Token],
    registry: &mut Registry,
) -> Result<Vec<DeclarationSkeleton>, Error> {
    let mut parser = Parser::new(tokens, registry, 0);
    let mut skeletons = vec![];

    while parser.has_tokens() {
        let start = parser.pos();
        let (kind, name) = harvest_declaration(&mut parser)?;

        skeletons.push(DeclarationSkeleton {
            kind,
            name,
            start,
            end: parser.pos(),
        });
    }

    debug!(file = %parser.file(), declarations = skeletons.len(), "harvested file");
    Ok(skeletons)
}
