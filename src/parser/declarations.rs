//! Declaration parsing implementation
//!
//! This module handles the declaration forms of the language:
//!
//! - Untyped definitions: `define x = 1;`
//! - Typed definitions: `const int x = 1;`, `string* s;`, `int[3] xs = {1, 2, 3};`
//! - Function declarations: `static fun add(int a, int b) -> int { ... }`
//! - Imports: `import std.io;`
//!
//! # Grammar
//!
//! ```text
//! declaration   ::= qualifier* (untyped_def | typed_def | function_decl)
//! qualifier     ::= "const" | "static"
//! untyped_def   ::= "define" identifier ["=" expression] ";"
//! typed_def     ::= type identifier ["=" initializer] ";"
//! initializer   ::= expression | "{" [expression ("," expression)*] "}"
//! function_decl ::= "fun" identifier "(" [param ("," param)*] ")" ["->" type] block
//! param         ::= type identifier
//! type          ::= primitive "*"* ["[" [expression] "]"]
//! import_stmt   ::= "import" identifier ("." identifier)* ";"
//! ```
//!
//! Types are represented as nodes: an `Identifier` naming the primitive,
//! wrapped in `Pointer` nodes per `*` and in an `Array` node for `[...]`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a definition or function declaration, including its qualifiers
    pub(crate) fn parse_declaration(&mut self) -> Result<AstNode, ParseError> {
        let qualifiers = self.parse_qualifiers();

        match self.current.kind {
            TokenKind::Function => self.parse_function(qualifiers),
            TokenKind::Define => self.parse_untyped_definition(qualifiers),
            _ => self.parse_typed_definition(qualifiers),
        }
    }

    /// Parse any number of `const` / `static` keywords
    fn parse_qualifiers(&mut self) -> Qualifiers {
        let mut qualifiers = Qualifiers::default();

        loop {
            if self.match_token(TokenKind::Const) {
                qualifiers.is_const = true;
            } else if self.match_token(TokenKind::Static) {
                qualifiers.is_static = true;
            } else {
                break;
            }
        }

        qualifiers
    }

    /// Parse `define name [= expr];`
    fn parse_untyped_definition(&mut self, qualifiers: Qualifiers) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'define'

        let name = self.expect_identifier("after 'define'")?;

        let init = if self.match_token(TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("after definition")?;
        Ok(AstNode::define(None, &name, init, qualifiers))
    }

    /// Parse `type name [= initializer];`
    fn parse_typed_definition(&mut self, qualifiers: Qualifiers) -> Result<AstNode, ParseError> {
        let mut var_type = self.parse_type()?;
        let name = self.expect_identifier("after type")?;

        let mut init = None;
        if self.match_token(TokenKind::Equal) {
            if matches!(var_type, AstNode::Array { .. }) && self.check(TokenKind::LBrace) {
                let list = self.parse_initializer_list()?;
                if let AstNode::Array { elements, .. } = &mut var_type {
                    *elements = Some(Box::new(AstNode::body(list)));
                }
            } else {
                init = Some(self.parse_expression()?);
            }
        }

        self.expect_semicolon("after definition")?;
        Ok(AstNode::define(Some(var_type), &name, init, qualifiers))
    }

    /// Parse `{ expr, expr, ... }`
    fn parse_initializer_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        self.expect_token(TokenKind::LBrace, "to open initializer list")?;

        let mut elements = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                elements.push(self.parse_expression()?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(TokenKind::RBrace, "to close initializer list")?;
        Ok(elements)
    }

    /// Parse type: primitive [*]* [[size]]
    pub(crate) fn parse_type(&mut self) -> Result<AstNode, ParseError> {
        let primitive = match self.current.kind {
            TokenKind::Int => DataType::Int,
            TokenKind::Long => DataType::Long,
            TokenKind::Float => DataType::Float,
            TokenKind::Double => DataType::Double,
            TokenKind::String => DataType::String,
            _ => return Err(self.error_expected("type")),
        };
        self.advance();

        let mut var_type = AstNode::identifier(primitive.name());

        while self.match_token(TokenKind::Star) {
            var_type = AstNode::pointer(var_type);
        }

        if self.match_token(TokenKind::LBracket) {
            let size = if self.check(TokenKind::RBracket) {
                None
            } else {
                Some(self.parse_expression()?)
            };
            self.expect_token(TokenKind::RBracket, "after array size")?;
            var_type = AstNode::array(var_type, size, None);
        }

        Ok(var_type)
    }

    /// Parse function declaration: fun name(params) [-> type] { body }
    fn parse_function(&mut self, qualifiers: Qualifiers) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'fun'

        let name = self.expect_identifier("after 'fun'")?;

        self.expect_token(TokenKind::LParen, "after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RParen, "after parameters")?;

        let return_type = if self.match_token(TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        if !self.check(TokenKind::LBrace) {
            return Err(self.error_expected("'{' before function body"));
        }
        let body = self.parse_block()?;

        Ok(AstNode::function(&name, return_type, params, body, qualifiers))
    }

    /// Parse parameter list: type name, type name, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let param_type = self.parse_type()?;
            let param_name = self.expect_identifier("after parameter type")?;
            params.push(AstNode::define(
                Some(param_type),
                &param_name,
                None,
                Qualifiers::default(),
            ));

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse import: import name(.name)*;
    pub(crate) fn parse_import(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // consume 'import'

        let mut path = self.expect_identifier("after 'import'")?;
        while self.match_token(TokenKind::Dot) {
            let segment = self.expect_identifier("after '.' in import path")?;
            path.push('.');
            path.push_str(&segment);
        }

        self.expect_semicolon("after import")?;
        Ok(AstNode::import(AstNode::identifier(&path)))
    }
}
