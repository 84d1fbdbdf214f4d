//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level entry
//! point. Expressions use a precedence-climbing loop driven by NUD/LED
//! handlers; statements and types dispatch on their first token. All of the
//! dispatch happens through lookup tables filled from the active
//! [`Features`], so a disabled construct is simply absent from the tables.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions and atoms
//! - LED (left denotation) handlers for binary operators
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Syntax errors are collected rather than returned one at a time: sequence
//! parsers record a failed item and resynchronize on the next statement
//! boundary so that one mistake does not hide the rest of the file.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    features::Features,
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    decl::parse_function,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// Tokens that end error recovery without being consumed.
const SYNC_KINDS: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Read,
    TokenKind::Write,
    TokenKind::Return,
    TokenKind::Try,
    TokenKind::Throw,
    TokenKind::Else,
    TokenKind::EndIf,
    TokenKind::EndWhile,
    TokenKind::EndFunc,
    TokenKind::Catch,
    TokenKind::EndTry,
    TokenKind::Func,
];

/// Tokens that open a block closed by its own terminator.
const BLOCK_OPENERS: &[TokenKind] = &[TokenKind::If, TokenKind::While, TokenKind::Try];

/// Terminators matching [`BLOCK_OPENERS`].
const BLOCK_TERMINATORS: &[TokenKind] =
    &[TokenKind::EndIf, TokenKind::EndWhile, TokenKind::EndTry];

/// Deepest nesting of statements and expressions accepted before giving up.
pub const MAX_NESTING: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// The token vector always ends with an EOF token and the cursor never moves
/// past it, so the current token is always available.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Grammar constructs recognised by this parse
    features: Features,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
    /// Syntax errors recorded so far, in source order
    diagnostics: Vec<Error>,
    /// Whether an end-of-input error has already been recorded
    reported_premature_end: bool,
    /// Current statement and expression nesting
    depth: usize,
    /// Whether a nesting limit error has already been recorded
    reported_nesting: bool,
    /// Cursor right after the last block skipped by [`Parser::skip_block`]
    skipped_block_end: Option<usize>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An EOF token is appended when the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, features: Features) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_else(Position::null);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end, end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            features,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            diagnostics: Vec::new(),
            reported_premature_end: false,
            depth: 0,
            reported_nesting: false,
            skipped_block_end: None,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// At EOF the cursor stays put and EOF is returned again.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Consumes a token of the expected kind or fails without consuming.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(vec![expected_kind]))
        }
    }

    /// Consumes the terminator of a statement block.
    ///
    /// On failure the error also lists every token that could have continued
    /// the block, since the statement loop stopped at a token that starts none.
    pub fn expect_block_end(&mut self, terminators: &[TokenKind]) -> Result<Token, Error> {
        if terminators.contains(&self.current_token_kind()) {
            return Ok(self.advance().clone());
        }

        let mut expected = terminators.to_vec();
        expected.extend(self.statement_starters());
        Err(self.unexpected(expected))
    }

    /// Builds the error for the current token given what would have been accepted.
    ///
    /// The end marker produces [`ErrorImpl::PrematureEnd`], anything else
    /// [`ErrorImpl::UnexpectedToken`].
    pub fn unexpected(&self, mut expected: Vec<TokenKind>) -> Error {
        expected.sort();
        expected.dedup();

        let token = self.current_token();
        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::PrematureEnd { expected }
        } else {
            ErrorImpl::UnexpectedToken {
                expected,
                found: token.kind,
                lexeme: token.value.clone(),
            }
        };

        Error::new(error, token.span.start)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Index of the current token, used to detect progress during recovery.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn starts_statement(&self) -> bool {
        self.stmt_lookup.contains_key(&self.current_token_kind())
    }

    pub fn starts_expression(&self) -> bool {
        self.nud_lookup.contains_key(&self.current_token_kind())
    }

    /// Every token kind that can begin a statement.
    pub fn statement_starters(&self) -> Vec<TokenKind> {
        self.stmt_lookup.keys().copied().collect()
    }

    /// Every token kind that can begin an expression.
    pub fn expression_starters(&self) -> Vec<TokenKind> {
        self.nud_lookup.keys().copied().collect()
    }

    /// Every token kind that can begin a type.
    pub fn type_starters(&self) -> Vec<TokenKind> {
        self.type_nud_lookup.keys().copied().collect()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Enters one level of statement or expression nesting.
    ///
    /// Fails without consuming once [`MAX_NESTING`] levels are open. Every
    /// successful call must be paired with [`Parser::leave_nested`].
    pub fn enter_nested(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                self.get_position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Records a syntax error.
    ///
    /// Only the first end-of-input error and the first nesting limit error are
    /// kept: once either happens every enclosing rule fails the same way.
    pub fn report(&mut self, error: Error) {
        let seen = match error.get_impl() {
            ErrorImpl::PrematureEnd { .. } => Some(&mut self.reported_premature_end),
            ErrorImpl::NestingTooDeep { .. } => Some(&mut self.reported_nesting),
            _ => None,
        };
        if let Some(seen) = seen {
            if *seen {
                trace!(%error, "dropping repeated error");
                return;
            }
            *seen = true;
        }

        debug!(%error, "syntax error");
        self.diagnostics.push(error);
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Skips to the next statement boundary after an error.
    ///
    /// Stops after a `;` or before a synchronizing keyword. A failed statement
    /// that already skipped its whole block (see [`Parser::skip_block`]) sits on
    /// a boundary and nothing more is skipped. If nothing was consumed since
    /// `start`, one token is dropped so the caller's loop always makes progress.
    pub fn synchronize(&mut self, start: usize) {
        let from = self.pos;

        if self.skipped_block_end.take() == Some(self.pos) && self.pos > start {
            debug!(resumed_at = %self.get_position(), "resumed after skipped block");
            return;
        }

        while self.has_tokens() {
            let kind = self.current_token_kind();
            if kind == TokenKind::Semicolon {
                self.advance();
                break;
            }
            if SYNC_KINDS.contains(&kind) {
                break;
            }
            self.advance();
        }

        if self.pos == start && self.has_tokens() {
            self.advance();
        }

        debug!(
            skipped = self.pos - from,
            resumed_at = %self.get_position(),
            "resynchronized after syntax error"
        );
    }

    /// Skips the rest of a block whose header failed, through its terminator.
    ///
    /// Nested blocks are counted so that an inner terminator does not end the
    /// skip. Stops before `endfunc` or `func` when the terminator is missing.
    pub fn skip_block(&mut self) {
        let from = self.pos;
        let mut depth = 1usize;

        while self.has_tokens()
            && !self
                .current_token()
                .is_one_of(&[TokenKind::EndFunc, TokenKind::Func])
        {
            let kind = self.current_token_kind();
            self.advance();

            if BLOCK_OPENERS.contains(&kind) {
                depth += 1;
            } else if BLOCK_TERMINATORS.contains(&kind) {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }

        if self.pos > from && BLOCK_TERMINATORS.contains(&self.tokens[self.pos - 1].kind) {
            self.skipped_block_end = Some(self.pos);
        }
        debug!(skipped = self.pos - from, "skipped block after malformed header");
    }

    /// Skips tokens until one of `kinds` or EOF is current.
    pub fn skip_until(&mut self, kinds: &[TokenKind]) {
        let from = self.pos;
        while self.has_tokens() && !self.current_token().is_one_of(kinds) {
            self.advance();
        }
        debug!(skipped = self.pos - from, "skipped to next item");
    }

    /// Consumes the parser, returning the recorded diagnostics.
    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }
}

/// Parses a stream of tokens into a Program.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables for the given feature set, and parses
/// functions until EOF.
///
/// # Returns
///
/// The program when the stream parsed without a single syntax error,
/// otherwise every recorded diagnostic in source order.
pub fn parse(tokens: Vec<Token>, features: Features) -> Result<Program, Vec<Error>> {
    let mut parser = Parser::new(tokens, features);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut functions = vec![];

    while parser.has_tokens() {
        if parser.current_token_kind() != TokenKind::Func {
            let error = parser.unexpected(vec![TokenKind::Func]);
            parser.report(error);
            parser.skip_until(&[TokenKind::Func]);
            continue;
        }

        match parse_function(&mut parser) {
            Ok(function) => {
                trace!(name = %function.name, "parsed function");
                functions.push(function);
            }
            Err(error) => {
                parser.report(error);
                parser.skip_until(&[TokenKind::Func]);
            }
        }
    }

    // A program needs at least one function
    if functions.is_empty() && !parser.has_errors() {
        let error = parser.unexpected(vec![TokenKind::Func]);
        parser.report(error);
    }

    debug!(
        functions = functions.len(),
        diagnostics = parser.diagnostics().len(),
        "parsed program"
    );

    if parser.has_errors() {
        Err(parser.into_diagnostics())
    } else {
        Ok(Program { functions })
    }
}
