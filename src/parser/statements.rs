//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Control flow: `if`/`else`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Blocks: `{ ... }`
//! - Declarations (see `declarations`): `define`, typed definitions, `fun`, `import`
//! - Expression statements: assignments, calls
//!
//! # Grammar
//!
//! ```text
//! statement ::= return_stmt | break_stmt | continue_stmt | block
//!             | if_stmt | for_stmt | import_stmt | definition
//!             | function_decl | expr_stmt
//! return_stmt ::= "return" [expression] ";"
//! block       ::= "{" statement* "}"
//! if_stmt     ::= "if" "(" expression ")" statement ["else" statement]
//! for_stmt    ::= "for" "(" [expression] ";" [expression] ";" [expression] ")" statement
//! expr_stmt   ::= expression ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::{debug, trace};

impl Parser {
    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current.location;

        let result = match self.current.kind {
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => self.parse_jump_statement(AstNode::break_stmt(), "after 'break'"),
            TokenKind::Continue => {
                self.parse_jump_statement(AstNode::continue_stmt(), "after 'continue'")
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Define
            | TokenKind::Const
            | TokenKind::Static
            | TokenKind::Function
            | TokenKind::Int
            | TokenKind::Long
            | TokenKind::Float
            | TokenKind::Double
            | TokenKind::String => self.parse_declaration(),
            _ => self.parse_expression_statement(),
        };

        match &result {
            Ok(node) => trace!(line = location.line, kind = ?node.kind(), "parsed statement"),
            Err(err) => debug!(
                line = location.line,
                column = location.column,
                error = %err,
                "statement failed to parse"
            ),
        }

        result
    }

    /// Parse block: `{` statement* `}`
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        self.expect_token(TokenKind::LBrace, "to open block")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(TokenKind::RBrace, "to close block")?;
        Ok(AstNode::body(statements))
    }

    /// Parse `break;` / `continue;`
    fn parse_jump_statement(&mut self, node: AstNode, ctx: &str) -> Result<AstNode, ParseError> {
        self.advance(); // consume keyword
        self.expect_semicolon(ctx)?;
        Ok(node)
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'return'

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_semicolon("after return value")?;
        Ok(AstNode::return_stmt(value))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'if'

        self.expect_token(TokenKind::LParen, "after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "after if condition")?;

        let then_branch = self.parse_statement()?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };

        Ok(AstNode::if_stmt(condition, then_branch, else_branch))
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'for'

        self.expect_token(TokenKind::LParen, "after 'for'")?;

        let init = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.expect_semicolon("after for initializer")?;

        let condition = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.expect_semicolon("after for condition")?;

        let increment = self.parse_optional_expression(TokenKind::RParen)?;
        self.expect_token(TokenKind::RParen, "after for clauses")?;

        let body = self.parse_statement()?;

        Ok(AstNode::for_stmt(init, condition, increment, body))
    }

    /// Parse an expression unless the current token is `terminator`
    fn parse_optional_expression(
        &mut self,
        terminator: TokenKind,
    ) -> Result<Option<AstNode>, ParseError> {
        if self.check(terminator) {
            Ok(None)
        } else {
            self.parse_expression().map(Some)
        }
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(expr)
    }
}
