//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing definitions, functions, types and imports
//! - `statements`: Parsing statements (if, for, blocks, jumps)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Lookahead
//!
//! The parser pulls tokens from its [`Lexer`] on demand and keeps exactly one
//! token of lookahead in `current`. Consuming a token always replaces it with
//! the next one from the lexer.
//!
//! # Failure
//!
//! Every rule returns `Result`. Nodes built before a syntax error are owned
//! locals of the failing rule, so the early `?` return releases them; a failed
//! parse never leaves partial trees behind.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer produced an invalid token
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(
        "Parse error at line {}, column {}: expected {expected}, found {found}",
        .location.line,
        .location.column
    )]
    Unexpected {
        expected: String,
        found: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Unexpected { location, .. } => *location,
        }
    }
}

/// Recursive descent parser with one token of lookahead
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
}

impl Parser {
    /// Create a parser over `lexer`, eagerly pulling the first token.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        Self { lexer, current }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source))
    }

    /// Parse the whole input as a sequence of statements.
    ///
    /// The statements are collected into a single `Body` node.
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(AstNode::body(statements))
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token, returning it
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if its kind appears in `table`, returning
    /// the mapped operator
    pub(crate) fn match_operator(&mut self, table: &[(TokenKind, Operator)]) -> Option<Operator> {
        let op = table
            .iter()
            .find(|(kind, _)| *kind == self.current.kind)
            .map(|&(_, op)| op)?;
        self.advance();
        Some(op)
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, ctx: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&format!("{} {}", kind, ctx)))
        }
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, ctx).map(|_| ())
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        self.expect_token(TokenKind::Identifier, ctx)
            .map(|token| token.lexeme)
    }

    /// Build the error for an unacceptable current token.
    ///
    /// An invalid token reports the lexer's reason instead.
    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        if self.current.kind == TokenKind::Invalid {
            if let Some(err) = self.lexer.last_error() {
                return ParseError::Lex(err.clone());
            }
        }

        ParseError::Unexpected {
            expected: expected.to_string(),
            found: self.current.to_string(),
            location: self.current.location,
        }
    }
}
