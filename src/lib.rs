#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    features::Features,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod features;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses `source` in one step.
///
/// A lexical error stops the pipeline and is returned as the only diagnostic.
pub fn parse_source(
    source: &str,
    file: Option<String>,
    features: Features,
) -> Result<Program, Vec<Error>> {
    let tokens = tokenize(source, file, features).map_err(|error| vec![error])?;
    parse(tokens, features)
}

/// Returns the text of the given 1-based line, if the source has it.
pub fn get_line_at_position(source: &str, position: &Position) -> Option<String> {
    let index = (position.line as usize).checked_sub(1)?;
    source
        .split_inclusive('\n')
        .nth(index)
        .map(|line| line.trim_end_matches(['\n', '\r']).to_string())
}

/// Renders a diagnostic with the offending source line and a caret.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `endfunc`, did you miss a semicolon?)
/// -> prog.asl
///   |
/// 4 | endfunc
///   | ^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let position = error.get_position();
    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    let Some(line_text) = get_line_at_position(source, position) else {
        // End-of-input diagnostics can point past the last line
        out.push_str(&format!("{:>padding$} at {}\n", "|", position));
        return out;
    };

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();
    (String::from(&string[start..]), start)
}
