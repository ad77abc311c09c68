//! Token readers for path and filter expressions.

use tracing::trace;

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseResult};

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text as written.
    pub text: String,
    /// Character offset where the token starts.
    pub position: usize,
}

impl Token {
    /// Returns true if the token equals `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }

    /// Returns the token text without a trailing `[`, if it has one.
    pub fn strip_bracket(&self) -> Option<&str> {
        self.text.strip_suffix('[')
    }
}

/// Lexer reading path and filter tokens from a shared cursor.
///
/// The path parser and the filter parser call into each other while reading
/// the same expression, so both token readers live on one lexer.
pub struct Lexer<'a> {
    cursor: Cursor,
    config: &'a ParserConfig,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &str, config: &'a ParserConfig) -> Self {
        Self::with_cursor(Cursor::new(input), config)
    }

    /// Creates a lexer reading from an existing cursor.
    pub fn with_cursor(cursor: Cursor, config: &'a ParserConfig) -> Self {
        Self { cursor, config }
    }

    /// The underlying cursor.
    pub fn cursor(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Reads one path token.
    ///
    /// A path token is an attribute name terminated by `.` (consumed, not
    /// included), by `[` (consumed and included so the caller can detect a
    /// value filter), or by the end of input. The token is empty when a `.`
    /// directly follows the previous terminator.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn next_path_token(&mut self) -> ParseResult<Option<Token>> {
        self.cursor.mark();
        let position = self.cursor.position();
        let mut text = String::new();

        while let Some(c) = self.cursor.read() {
            if c == '.' {
                if self.cursor.is_at_end() {
                    return Err(ParseError::UnexpectedEndOfInput);
                }
                return Ok(Some(self.token(text, position)));
            } else if c == '[' {
                text.push(c);
                return Ok(Some(self.token(text, position)));
            } else if self.config.is_name_char(c) {
                text.push(c);
            } else {
                return Err(ParseError::unexpected_character(
                    c,
                    self.cursor.position() - 1,
                ));
            }
        }

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.token(text, position)))
        }
    }

    /// Reads one filter token, skipping leading spaces.
    ///
    /// Tokens end at a space (consumed). `(` and `)` end a pending token and
    /// are pushed back, or form a token on their own. Outside a value filter
    /// `[` ends the token and is included in it; inside a value filter `]`
    /// behaves like a parenthesis.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn next_filter_token(&mut self, value_filter: bool) -> ParseResult<Option<Token>> {
        let mut next;
        loop {
            self.cursor.mark();
            next = self.cursor.read();
            if next != Some(' ') {
                break;
            }
        }

        let position = self.cursor.marked();
        let mut text = String::new();

        while let Some(c) = next {
            match c {
                ' ' => return Ok(Some(self.token(text, position))),
                '(' | ')' => return Ok(Some(self.single_or_pushback(text, c, position))),
                '[' if !value_filter => {
                    text.push(c);
                    return Ok(Some(self.token(text, position)));
                }
                ']' if value_filter => {
                    return Ok(Some(self.single_or_pushback(text, c, position)));
                }
                '.' | ':' => text.push(c),
                _ if self.config.is_name_char(c) => text.push(c),
                _ => {
                    return Err(ParseError::unexpected_character(
                        c,
                        self.cursor.position() - 1,
                    ));
                }
            }
            next = self.cursor.read();
        }

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.token(text, position)))
        }
    }

    /// Returns the pending token with `c` pushed back, or `c` alone if
    /// nothing is pending.
    fn single_or_pushback(&mut self, mut text: String, c: char, position: usize) -> Token {
        if text.is_empty() {
            text.push(c);
        } else {
            self.cursor.unread();
        }
        self.token(text, position)
    }

    fn token(&self, text: String, position: usize) -> Token {
        trace!(token = %text, position, "read token");
        Token { text, position }
    }
}
