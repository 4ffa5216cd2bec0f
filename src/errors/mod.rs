//! Error types and error handling for the compiler.
//!
//! Every stage reports failures through the same `Error` type:
//!
//! - Error structures with source position information
//! - Specific error variants for the scanner, parser, registry and checker
//! - A stage tag and a category for every variant
//! - Helpful error messages and suggestions

pub mod errors;
