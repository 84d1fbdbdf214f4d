//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses precedence climbing for expressions
//! and first-token dispatch for everything else:
//!
//! - Function, parameter and declaration parsing
//! - Statement parsing (assignments, calls, control flow, I/O)
//! - Expression parsing (prefix and binary operators, calls, array access)
//! - Type parsing for basic and array types
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
