//! # Introduction
//!
//! tinyfront is the front end of a small imperative language: a pull-based
//! lexer and a recursive-descent parser that turn source text into an owned
//! abstract syntax tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`]: produces one [`parser::Token`] per call; lexical
//!    failures surface as an invalid token.
//! 2. [`parser::parse`]: recursive descent with one token of lookahead and
//!    precedence climbing for binary operators.
//! 3. [`parser::ast`]: the closed set of node variants. Every child is
//!    exclusively owned, so dropping the root releases the whole tree.
//! 4. [`ui`]: ratatui-based AST viewer used by the `tinyfront` binary; not
//!    part of the stable library API.
//!
//! ```
//! use tinyfront::parser::parse_source;
//!
//! let program = parse_source("return 1 + 2 * 3;").unwrap();
//! assert_eq!(program.to_string(), "(block (return (+ 1 (* 2 3))))");
//! ```

pub mod parser;
pub mod ui;
