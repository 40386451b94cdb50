//! tinyfront source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens), pulled one token at a time
//! - [`parse`]: Parsing (tokens → AST), with one token of lookahead
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `long`, `float`, `double`, `string`, pointers, arrays
//! - Statements: definitions, functions, `import`, blocks, `if`/`else`, `for`,
//!   `return`, `break`, `continue`, expression statements
//! - Expressions: arithmetic, comparison, logical, unary `! - + * &`,
//!   assignment, calls, array indexing
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::{AstNode, Literal, NodeKind, Operator, SourceLocation};
pub use lexer::{LexError, LexErrorKind, Lexer, Token, TokenKind};
pub use parse::{ParseError, Parser};

/// Parse a complete source string into a program `Body` node
pub fn parse_source(source: &str) -> Result<AstNode, ParseError> {
    Parser::from_source(source).parse_program()
}
