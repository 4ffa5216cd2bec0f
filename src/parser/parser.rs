//! Parser implementation for building the parse tree.
//!
//! This module contains the main Parser struct and the entry points for both
//! parsing phases. The parser uses a Pratt parser approach with NUD/LED
//! handlers for expression parsing and specialized functions for statement
//! and declaration parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::{File, NodeId},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    registry::registry::{NameOwner, Registry},
    Position, Span,
};

use super::{
    decl::parse_declaration,
    harvest::{harvest, DeclarationSkeleton},
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// The main parser structure that maintains parsing state.
///
/// The parser walks one file's token stream and shares the session's
/// registry, registering every type it builds as soon as it is parsed.
pub struct Parser<'a> {
    /// The tokens of one file, starting with its `File` marker
    tokens: &'a [Token],
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    registry: &'a mut Registry,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
    /// Next expression id to hand out
    next_id: u32,
}

impl<'a> Parser<'a> {
    /// Creates a parser with all lookup tables populated.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token stream of one file, as produced by `tokenize`
    /// * `registry` - The session's registry
    /// * `first_id` - The first expression id this parser may hand out
    pub fn new(tokens: &'a [Token], registry: &'a mut Registry, first_id: u32) -> Self {
        let file = match tokens.first() {
            Some(token) if token.kind == TokenKind::File => Rc::new(token.value.clone()),
            Some(token) => Rc::clone(&token.span.start.file),
            None => Rc::new(String::from("shell")),
        };

        let mut parser = Parser {
            tokens,
            pos: 0,
            file,
            registry,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            next_id: first_id,
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);

        if parser.current_token_kind() == TokenKind::File {
            parser.pos += 1;
        }

        parser
    }

    /// Returns the current token without advancing. Past the end of the
    /// stream this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        if self.tokens.is_empty() {
            return TokenKind::EOF;
        }

        self.current_token().kind
    }

    /// Returns the kind of the token `offset` positions ahead.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => {
                let expected_name = expected_kind.to_string();
                Err(self.unexpected(&[expected_name.as_str()]))
            }
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedToken` error for the current token.
    pub fn unexpected(&self, expected: &[&str]) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.iter().map(|kind| kind.to_string()).collect(),
            },
            token.span.start.clone(),
        )
    }

    /// Builds an `UnexpectedTokenDetailed` error for the current token.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut *self.registry
    }

    /// Whether `name` is a declared struct, enum or delegate.
    pub fn is_type_name(&self, name: &str) -> bool {
        matches!(
            self.registry.owner(name),
            Some(NameOwner::Struct | NameOwner::Enum | NameOwner::Delegate)
        )
    }

    /// Whether the cursor sits at the start of a variable declaration.
    pub fn at_declaration(&self) -> bool {
        let kind = self.current_token_kind();
        if kind.is_primitive_type() {
            return true;
        }

        kind == TokenKind::Identifier
            && self.is_type_name(&self.current_token().value)
            && matches!(
                self.peek_kind(1),
                TokenKind::Identifier | TokenKind::OpenBracket
            )
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token. Tokens that
    /// also have a LED keep the LED's binding power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Hands out the next expression id.
    pub fn advance_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next expression would receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns the end of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.end.clone(),
            None => self.get_position(),
        }
    }

    /// A span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.previous_end(),
        }
    }
}

/// Parses the full declarations of one file.
///
/// `skeletons` must come from `harvest` over the same tokens. Each recorded
/// range is parsed again with the full grammar, and every declaration's
/// concrete shape is registered as soon as it has been parsed.
///
/// # Arguments
///
/// * `tokens` - The file's token stream
/// * `skeletons` - The declaration ranges found by `harvest`
/// * `registry` - The session's registry
/// * `next_id` - The session's expression id counter, advanced past every id used
pub fn parse(
    tokens: &[Token],
    skeletons: &[DeclarationSkeleton],
    registry: &mut Registry,
    next_id: &mut u32,
) -> Result<File, Error> {
    let mut parser = Parser::new(tokens, registry, *next_id);
    let mut declarations = Vec::with_capacity(skeletons.len());

    for skeleton in skeletons {
        parser.seek(skeleton.start);
        let declaration = parse_declaration(&mut parser)?;

        if parser.pos() != skeleton.end {
            return Err(parser.unexpected_detailed(&format!(
                "declaration of `{}` ended in a different place than its signature",
                skeleton.name
            )));
        }

        declarations.push(declaration);
    }

    *next_id = parser.next_id();
    debug!(file = %parser.file(), declarations = declarations.len(), "parsed file");

    Ok(File {
        path: parser.file(),
        declarations,
    })
}

/// Harvests and parses a single token stream on its own.
pub fn parse_tokens(tokens: &[Token], registry: &mut Registry) -> Result<File, Error> {
    let skeletons = harvest(tokens, registry)?;
    let mut next_id = 0;
    parse(tokens, &skeletons, registry, &mut next_id)
}
