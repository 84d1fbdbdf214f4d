//! Error types and error handling.
//!
//! This module defines the diagnostics produced by the lexer and the parser:
//!
//! - Error structures with source position information
//! - The syntax error taxonomy (unexpected token, premature end, malformed literal)
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
