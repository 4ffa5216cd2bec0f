use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, TARGET_RESERVED};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).unwrap(),
        handler,
    }
}

lazy_static! {
    // Every pattern is anchored; the first one matching at the cursor wins, so
    // longer operators are listed before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^[0-9]+(\\.[0-9]+)?", number_handler),
        pattern("^\\s+", skip_handler),
        pattern("^//[^\n]*", skip_handler),
        pattern("^/\\*(?s:.*?)\\*/", skip_handler),
        pattern("^/\\*", unterminated_handler),
        pattern("^\"(\\\\.|[^\"\\\\\n])*\"", string_handler),
        pattern("^\"", unterminated_handler),
        pattern("^'(\\\\.|[^'\\\\\n])*'", char_handler),
        pattern("^'", unterminated_handler),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("^~=", MK_DEFAULT_HANDLER!(TokenKind::TildeEquals, "~=")),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern("^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern("^\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("^\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern("^%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("^\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Moves the cursor forward by `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }

    /// Consumes `text` and pushes it as a single token.
    fn push_consumed(&mut self, kind: TokenKind, value: String, text_len: usize) {
        let start = self.position();
        self.advance_n(text_len);
        let span = Span {
            start,
            end: self.position(),
        };
        self.push(MK_TOKEN!(kind, value, span));
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.push_consumed(TokenKind::Number, matched.clone(), matched.len());
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let line_end = lexer.remainder().find('\n').unwrap_or(lexer.remainder().len());
    Err(Error::new(
        ErrorImpl::UnterminatedLiteral {
            token: lexer.remainder()[..line_end].to_string(),
        },
        lexer.position(),
    ))
}

/// Resolves backslash escapes inside a string or char literal body.
pub fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek().copied() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some(quote @ ('\\' | '"' | '\'')) => {
                result.push(quote);
                chars.next();
            }
            Some('x') => {
                let mut hex = String::new();
                chars.next();

                for _ in 0..2 {
                    match chars.peek() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            hex.push(*ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => result.push_str("\\x"),
                }
            }
            // Unknown escapes and a trailing backslash are kept as written
            _ => result.push(ch),
        }
    }

    result
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let value = unescape(&matched[1..matched.len() - 1]);
    lexer.push_consumed(TokenKind::String, value, matched.len());
    Ok(())
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let value = unescape(&matched[1..matched.len() - 1]);

    if value.chars().count() != 1 {
        return Err(Error::new(
            ErrorImpl::UnrecognisedToken { token: matched },
            lexer.position(),
        ));
    }

    lexer.push_consumed(TokenKind::CharLiteral, value, matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex);

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push_consumed(*kind, value.clone(), value.len());
        return Ok(());
    }

    if TARGET_RESERVED.contains(value.as_str()) {
        return Err(Error::new(
            ErrorImpl::ReservedIdentifier { identifier: value },
            lexer.position(),
        ));
    }

    lexer.push_consumed(TokenKind::Identifier, value.clone(), value.len());
    Ok(())
}

/// Splits a source file into tokens.
///
/// The stream opens with a `TokenKind::File` marker carrying the file name
/// and closes with `TokenKind::EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    let start = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::File,
        lex.file.to_string(),
        Span {
            start: start.clone(),
            end: start
        }
    ));

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.position(),
            ));
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: end.clone(),
            end
        }
    ));

    trace!(file = %lex.file, tokens = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
