//! Lexer (tokenizer) for tinyfront source code
//!
//! The lexer is pull-based: the parser calls [`Lexer::next_token`] whenever it
//! needs a new lookahead token. Lexical failures never abort the scan; they
//! surface as a [`TokenKind::Invalid`] token and the structured reason is kept
//! in [`Lexer::last_error`] for the parser to report.

use super::ast::{Literal, SourceLocation};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, trace};

/// Kind of a lexical unit.
///
/// The declaration order is part of the contract with the parser and must
/// stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Const,
    Static,
    Int,
    IntLiteral,
    Long,
    LongLiteral,
    Float,
    FloatLiteral,
    Double,
    String,
    StringLiteral,

    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    And, // &&
    Or,  // ||
    Not, // !

    Equal,        // =
    EqualEqual,   // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    If,
    Else,
    For,
    Define,
    Import,
    Function, // fun
    Return,
    Break,
    Continue,

    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;
    Address,   // &
    Dot,       // .
    Arrow,     // ->

    Invalid,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Const => "'const'",
            TokenKind::Static => "'static'",
            TokenKind::Int => "'int'",
            TokenKind::IntLiteral => "int literal",
            TokenKind::Long => "'long'",
            TokenKind::LongLiteral => "long literal",
            TokenKind::Float => "'float'",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::Double => "'double'",
            TokenKind::String => "'string'",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Not => "'!'",
            TokenKind::Equal => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Define => "'define'",
            TokenKind::Import => "'import'",
            TokenKind::Function => "'fun'",
            TokenKind::Return => "'return'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Address => "'&'",
            TokenKind::Dot => "'.'",
            TokenKind::Arrow => "'->'",
            TokenKind::Invalid => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::LongLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("for", TokenKind::For),
            ("define", TokenKind::Define),
            ("import", TokenKind::Import),
            ("fun", TokenKind::Function),
            ("return", TokenKind::Return),
            ("break", TokenKind::Break),
            ("continue", TokenKind::Continue),
            ("const", TokenKind::Const),
            ("static", TokenKind::Static),
            ("int", TokenKind::Int),
            ("long", TokenKind::Long),
            ("float", TokenKind::Float),
            ("double", TokenKind::Double),
            ("string", TokenKind::String),
        ]
        .into_iter()
        .collect()
    })
}

/// One lexical unit.
///
/// `value` is present for literals and identifiers (identifiers carry their
/// name as [`Literal::Text`]). `location` points at the first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Literal>,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLiteral
            | TokenKind::LongLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral => write!(f, "{} {}", self.kind, self.lexeme),
            TokenKind::Invalid => write!(f, "invalid token '{}'", self.lexeme),
            kind => f.write_str(kind.describe()),
        }
    }
}

/// Reason a piece of input could not be tokenized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("integer literal {0} is out of range")]
    IntegerOutOfRange(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {kind}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

/// Lexer over an owned copy of the source text
pub struct Lexer {
    source: String,
    position: usize,
    line: usize,
    column: usize,
    last_error: Option<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            position: 0,
            line: 1,
            column: 1,
            last_error: None,
        }
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every further call returns an
    /// [`TokenKind::Eof`] token. A lexical failure yields a
    /// [`TokenKind::Invalid`] token; see [`Lexer::last_error`].
    pub fn next_token(&mut self) -> Token {
        let start = self.position;
        match self.scan() {
            Ok(token) => {
                trace!(
                    kind = ?token.kind,
                    line = token.location.line,
                    column = token.location.column,
                    "token"
                );
                token
            }
            Err(err) => {
                debug!(error = %err, "lexical error");
                let lexeme = self.source[start..self.position].trim_start().to_owned();
                let location = err.location;
                self.last_error = Some(err);
                Token {
                    kind: TokenKind::Invalid,
                    value: None,
                    lexeme,
                    location,
                }
            }
        }
    }

    /// Tokenize the entire input, stopping at the first lexical error.
    ///
    /// The returned vector always ends with an [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// The reason for the most recent invalid token, if any
    pub fn last_error(&self) -> Option<&LexError> {
        self.last_error.as_ref()
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(self.make_token(TokenKind::Eof, None, start, loc));
        };

        match ch {
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(start, loc)),
            '0'..='9' => self.number_literal(start, loc),
            '"' | '\'' => self.string_literal(ch, start, loc),
            _ => self.operator(ch, start, loc),
        }
    }

    /// Operators and punctuation, longest match first
    fn operator(&mut self, ch: char, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '-' => {
                if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::And
                } else {
                    TokenKind::Address
                }
            }
            // '|' and '||' both spell logical or
            '|' => {
                self.match_char('|');
                TokenKind::Or
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            _ => {
                return Err(LexError {
                    kind: LexErrorKind::UnexpectedCharacter(ch),
                    location: loc,
                });
            }
        };

        Ok(self.make_token(kind, None, start, loc))
    }

    /// Parse string literal delimited by `quote` (either `"` or `'`)
    fn string_literal(&mut self, quote: char, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();

        loop {
            match self.advance() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        location: loc,
                    });
                }
                Some('\\') if self.peek() == Some(quote) => {
                    self.advance();
                    text.push(quote);
                }
                Some(ch) if ch == quote => break,
                Some(ch) => text.push(ch),
            }
        }

        Ok(self.make_token(TokenKind::StringLiteral, Some(Literal::Text(text)), start, loc))
    }

    /// Parse numeric literal: int, long (beyond 32 bits) or floating
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        self.skip_digits();

        let is_float = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|ch| ch.is_ascii_digit());

        if is_float {
            self.advance(); // consume '.'
            self.skip_digits();
            let text = &self.source[start..self.position];
            // digits '.' digits always parses as f64
            let value = text.parse::<f64>().unwrap_or(f64::NAN);
            return Ok(self.make_token(
                TokenKind::FloatLiteral,
                Some(Literal::Double(value)),
                start,
                loc,
            ));
        }

        let text = &self.source[start..self.position];
        let (kind, value) = if let Ok(n) = text.parse::<i32>() {
            (TokenKind::IntLiteral, Literal::Int(n))
        } else if let Ok(n) = text.parse::<i64>() {
            (TokenKind::LongLiteral, Literal::Long(n))
        } else {
            return Err(LexError {
                kind: LexErrorKind::IntegerOutOfRange(text.to_owned()),
                location: loc,
            });
        };

        Ok(self.make_token(kind, Some(value), start, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.position];
        match keywords().get(text) {
            Some(&kind) => self.make_token(kind, None, start, loc),
            None => {
                let name = Literal::Text(text.to_owned());
                self.make_token(TokenKind::Identifier, Some(name), start, loc)
            }
        }
    }

    fn make_token(
        &self,
        kind: TokenKind,
        value: Option<Literal>,
        start: usize,
        location: SourceLocation,
    ) -> Token {
        Token {
            kind,
            value,
            lexeme: self.source[start..self.position].to_owned(),
            location,
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        // is_ascii_whitespace leaves out vertical tab
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_whitespace() || ch == '\x0B')
        {
            self.advance();
        }
    }

    /// Consume the next character if it is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advance to next character; a no-op at end of input
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("fun main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].value, Some(Literal::Text("main".into())));
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::Return);
        assert_eq!(tokens[6].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[6].value, Some(Literal::Int(0)));
        assert_eq!(tokens[7].kind, TokenKind::Semicolon);
        assert_eq!(tokens[8].kind, TokenKind::RBrace);
        assert_eq!(tokens[9].kind, TokenKind::Eof);
    }

    #[test]
    fn test_all_keywords() {
        assert_eq!(
            kinds("if else for define import fun return break continue const static int long float double string"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::For,
                TokenKind::Define,
                TokenKind::Import,
                TokenKind::Function,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Const,
                TokenKind::Static,
                TokenKind::Int,
                TokenKind::Long,
                TokenKind::Float,
                TokenKind::Double,
                TokenKind::String,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            kinds("iffy _for int32"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== = != ! <= < >= > && & || -> - + * / % . , ;"),
            vec![
                TokenKind::EqualEqual,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Not,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::And,
                TokenKind::Address,
                TokenKind::Or,
                TokenKind::Arrow,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_maximal_munch_without_spaces() {
        assert_eq!(
            kinds("a==b"),
            vec![
                TokenKind::Identifier,
                TokenKind::EqualEqual,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("===") ,
            vec![TokenKind::EqualEqual, TokenKind::Equal, TokenKind::Eof]
        );
    }

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new("42 2147483647 2147483648 3.25 7.");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].value, Some(Literal::Int(42)));
        assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].value, Some(Literal::Int(i32::MAX)));
        assert_eq!(tokens[2].kind, TokenKind::LongLiteral);
        assert_eq!(tokens[2].value, Some(Literal::Long(2_147_483_648)));
        assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[3].value, Some(Literal::Double(3.25)));
        // no digit after '.', so the dot is its own token
        assert_eq!(tokens[4].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[5].kind, TokenKind::Dot);
    }

    #[test]
    fn test_integer_beyond_64_bits_is_invalid() {
        let mut lexer = Lexer::new("99999999999999999999");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert!(matches!(
            lexer.last_error().map(|e| &e.kind),
            Some(LexErrorKind::IntegerOutOfRange(_))
        ));
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""say \"hi\"" 'it\'s' "a\nb""#);
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, Some(Literal::Text("say \"hi\"".into())));
        assert_eq!(tokens[1].value, Some(Literal::Text("it's".into())));
        // only the quote escape is collapsed
        assert_eq!(tokens[2].value, Some(Literal::Text("a\\nb".into())));
        assert_eq!(tokens[0].lexeme, r#""say \"hi\"""#);
    }

    #[test]
    fn test_escaped_other_quote_is_kept() {
        let mut lexer = Lexer::new(r#"'a\"b' "c\'d""#);
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].value, Some(Literal::Text("a\\\"b".into())));
        assert_eq!(tokens[1].value, Some(Literal::Text("c\\'d".into())));
    }

    #[test]
    fn test_single_and_double_pipe_are_or() {
        let kinds = |source: &str| -> Vec<TokenKind> {
            Lexer::new(source)
                .tokenize()
                .unwrap()
                .into_iter()
                .map(|token| token.kind)
                .collect()
        };

        let expected = vec![
            TokenKind::Identifier,
            TokenKind::Or,
            TokenKind::Identifier,
            TokenKind::Eof,
        ];
        assert_eq!(kinds("a | b"), expected);
        assert_eq!(kinds("a || b"), expected);
        assert_eq!(kinds("a|||b").iter().filter(|&&k| k == TokenKind::Or).count(), 2);
    }

    #[test]
    fn test_vertical_tab_and_form_feed_are_whitespace() {
        let mut lexer = Lexer::new("a\x0Bb\x0Cc");
        let tokens = lexer.tokenize().unwrap();

        let names: Vec<&str> = tokens.iter().map(|token| token.lexeme.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", ""]);
        assert!(tokens[..3].iter().all(|token| token.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("x = \"open");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().kind, TokenKind::Equal);

        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Invalid);
        let err = lexer.last_error().unwrap();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("a # b");
        assert!(matches!(
            lexer.tokenize(),
            Err(LexError {
                kind: LexErrorKind::UnexpectedCharacter('#'),
                ..
            })
        ));

        let mut lexer = Lexer::new("@");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(token.lexeme, "@");
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut lexer = Lexer::new("a\n  bb\tc");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 6));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  ");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
