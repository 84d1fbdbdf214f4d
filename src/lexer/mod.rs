//! Lexical analysis module.
//!
//! A reference token source for the parser. It converts source text into the
//! classified token stream the parser consumes:
//!
//! - Regex table driven tokenization
//! - Keywords, identifiers, literals, operators and punctuation
//! - Line and column tracking for diagnostics
//! - Comments and whitespace handling
//! - Feature-gated keywords (see [`crate::features::Features`])

pub mod lexer;
pub mod tokens;
