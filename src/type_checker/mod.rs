//! Type checking and semantic analysis module.
//!
//! The checker walks parsed files against the registry filled by the parser.
//! It:
//!
//! - Resolves every name through a stack of lexical scopes
//! - Computes the type of every expression and records it by node id
//! - Checks assignments, calls, indexing and construction against the
//!   assignability rules of the registry
//! - Enforces return contracts of functions
//!
//! Checking stops at the first error.

pub mod builtins;
pub mod environment;
pub mod type_checker;
pub mod type_table;

#[cfg(test)]
mod tests;
