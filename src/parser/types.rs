//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive types (`bool`, `num`, `char`, `string`, `object`, `void`)
//! - Named types (structs, enums and delegates)
//! - Array types, `T[]`
//! - Map types, `V[K]`
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers. Suffixes compose left to right, so `T[][K]` is a map
//! from `K` to `T[]`.

use std::collections::HashMap;

use crate::{ast::types::Type, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser<'_>) -> Result<Type, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser<'_>, Type, BindingPower) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser<'_>) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    for kind in [
        TokenKind::Bool,
        TokenKind::Num,
        TokenKind::Char,
        TokenKind::StringType,
        TokenKind::Object,
        TokenKind::Void,
    ] {
        parser.type_nud(kind, parse_symbol_type);
    }

    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_bracket_type);
}

pub fn parse_symbol_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    let token = parser.advance();
    Ok(Type::Primitive(token.value))
}

/// `[]` wraps the left type in an array, `[K]` in a map keyed by `K`.
pub fn parse_bracket_type(
    parser: &mut Parser<'_>,
    left: Type,
    _bp: BindingPower,
) -> Result<Type, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let ty = if parser.current_token_kind() == TokenKind::CloseBracket {
        Type::array(left)
    } else {
        let key = parse_type(parser, BindingPower::Default)?;
        Type::map(key, left)
    };

    parser.expect(TokenKind::CloseBracket)?;
    parser.registry_mut().register_type(&ty);

    Ok(ty)
}

pub fn parse_type(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Type, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected(&["type"])),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected(&[])),
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}
