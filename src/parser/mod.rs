//! Parser module for building the parse tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a parse tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Declaration parsing (structs, enums, delegates, functions, globals)
//! - Statement parsing (variable declarations, control flow)
//! - Expression parsing (binary ops, calls, indexing, literals)
//! - Type parsing, registering arrays and maps as they are built
//!
//! Parsing runs in two phases over the same grammar: `harvest` claims every
//! top level name and records where each declaration lives, then `parse`
//! parses those ranges completely.

pub mod decl;
pub mod expr;
pub mod harvest;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
