//! Expression parsing implementation
//!
//! Binary operators are parsed by precedence climbing: each level parses its
//! operands with the next-higher level and folds same-level operators into
//! left-deep [`AstNode::DataOperation`] nodes. The token-to-operator mapping of
//! every level is a small table.
//!
//! # Precedence (lowest first)
//!
//! ```text
//! assignment      =            (rhs parsed at logical-or level)
//! logical_or      ||
//! logical_and     &&
//! equality        == !=
//! relational      < <= > >=
//! additive        + -
//! multiplicative  * / %
//! unary           ! - + * &    (prefix, right-associative)
//! postfix         name(args)  name[index]
//! primary         literal | identifier | ( expression )
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const LOGICAL_OR: &[(TokenKind, Operator)] = &[(TokenKind::Or, Operator::Or)];

const LOGICAL_AND: &[(TokenKind, Operator)] = &[(TokenKind::And, Operator::And)];

const EQUALITY: &[(TokenKind, Operator)] = &[
    (TokenKind::EqualEqual, Operator::Equal),
    (TokenKind::NotEqual, Operator::NotEqual),
];

const RELATIONAL: &[(TokenKind, Operator)] = &[
    (TokenKind::Less, Operator::Less),
    (TokenKind::LessEqual, Operator::LessOrEqual),
    (TokenKind::Greater, Operator::Greater),
    (TokenKind::GreaterEqual, Operator::GreaterOrEqual),
];

const ADDITIVE: &[(TokenKind, Operator)] = &[
    (TokenKind::Plus, Operator::Plus),
    (TokenKind::Minus, Operator::Minus),
];

const MULTIPLICATIVE: &[(TokenKind, Operator)] = &[
    (TokenKind::Star, Operator::Multiply),
    (TokenKind::Slash, Operator::Divide),
    (TokenKind::Percent, Operator::Modulo),
];

const UNARY: &[(TokenKind, Operator)] = &[
    (TokenKind::Not, Operator::Not),
    (TokenKind::Minus, Operator::Minus),
    (TokenKind::Plus, Operator::Plus),
    (TokenKind::Star, Operator::Dereference),
    (TokenKind::Address, Operator::Address),
];

type Rule = fn(&mut Parser) -> Result<AstNode, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment: logical_or [= logical_or]
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let target = self.parse_logical_or()?;

        if self.match_token(TokenKind::Equal) {
            let value = self.parse_logical_or()?;
            return Ok(AstNode::assignment(target, value));
        }

        Ok(target)
    }

    /// Parse one left-associative binary level
    fn parse_binary_level(
        &mut self,
        table: &[(TokenKind, Operator)],
        operand: Rule,
    ) -> Result<AstNode, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.match_operator(table) {
            let right = operand(self)?;
            left = AstNode::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(LOGICAL_OR, Parser::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(LOGICAL_AND, Parser::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(EQUALITY, Parser::parse_relational)
    }

    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(RELATIONAL, Parser::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(ADDITIVE, Parser::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_level(MULTIPLICATIVE, Parser::parse_unary)
    }

    /// Parse unary (! - + * &)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if let Some(op) = self.match_operator(UNARY) {
            let operand = self.parse_unary()?;
            return Ok(AstNode::unary(op, operand));
        }

        self.parse_primary()
    }

    /// Parse primary (literals, identifiers with call/index suffix,
    /// parenthesized expressions)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            kind if kind.is_literal() => {
                let token = self.advance();
                let location = token.location;
                token.value.map(AstNode::value).ok_or_else(|| ParseError::Unexpected {
                    expected: "literal value".to_string(),
                    found: kind.to_string(),
                    location,
                })
            }
            TokenKind::Identifier => {
                let name = self.advance().lexeme;
                self.parse_postfix(name)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            _ => Err(self.error_expected("expression")),
        }
    }

    /// Parse the optional call or index suffix of an identifier
    fn parse_postfix(&mut self, name: String) -> Result<AstNode, ParseError> {
        if self.match_token(TokenKind::LParen) {
            let args = self.parse_argument_list()?;
            self.expect_token(TokenKind::RParen, "after function arguments")?;
            return Ok(AstNode::call(AstNode::identifier(&name), args));
        }

        if self.match_token(TokenKind::LBracket) {
            let index = self.parse_expression()?;
            self.expect_token(TokenKind::RBracket, "after array index")?;
            return Ok(AstNode::array_access(&name, index));
        }

        Ok(AstNode::identifier(&name))
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}
