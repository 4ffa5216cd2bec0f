//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - The file marker and EOF tokens
//! - Keywords, primitive types and identifiers
//! - Numeric, string and char literals
//! - Operators and punctuation
//! - Comments and positions
//! - Error cases

use crate::errors::errors::ErrorImpl;

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.sc".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_stream_starts_with_file_marker() {
    let tokens = tokenize("num x;".to_string(), Some("src/main.sc".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::File);
    assert_eq!(tokens[0].value, "src/main.sc");
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_keywords() {
    let source = "struct enum delegate if else while for return break continue new as true false null";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::File,
            TokenKind::Struct,
            TokenKind::Enum,
            TokenKind::Delegate,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::New,
            TokenKind::As,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_primitive_types() {
    let tokens = kinds("bool num char string object void");

    assert!(tokens[1..7].iter().all(|kind| kind.is_primitive_type()));
    assert_eq!(tokens[4], TokenKind::StringType);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _under CamelCase".to_string(), None).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_under");
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0".to_string(), None).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "42");
    assert_eq!(tokens[2].value, "3.14");
    assert_eq!(tokens[3].value, "0");
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "quote\"d" "hex\x41""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "hello\nworld");
    assert_eq!(tokens[2].value, "quote\"d");
    assert_eq!(tokens[3].value, "hexA");
}

#[test]
fn test_tokenize_chars() {
    let tokens = tokenize(r"'a' '\n' '\''".to_string(), None).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[1].value, "a");
    assert_eq!(tokens[2].value, "\n");
    assert_eq!(tokens[3].value, "'");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % ^ == != ~= < > <= >= = && || ! ++ -- += -= *= /= %=";

    assert_eq!(
        kinds(source)[1..],
        [
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::TildeEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ;")[1..],
        [
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let source = "num // trailing\n/* block\n comment */ x";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::File,
            TokenKind::Num,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("num x;\n  string y;".to_string(), None).unwrap();

    assert_eq!(tokens[1].span.start.line, 1);
    assert_eq!(tokens[1].span.start.column, 1);
    assert_eq!(tokens[2].span.start.column, 5);
    assert_eq!(tokens[4].kind, TokenKind::StringType);
    assert_eq!(tokens[4].span.start.line, 2);
    assert_eq!(tokens[4].span.start.column, 3);
}

#[test]
fn test_target_reserved_identifier_is_rejected() {
    let error = tokenize("num function = 1;".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ReservedIdentifier {
            identifier: "function".to_string()
        }
    );
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("string s = \"open;".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("num x = 1 @ 2;".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnrecognisedToken {
            token: "@".to_string()
        }
    );
}
