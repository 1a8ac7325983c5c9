//! Tokens and a cursor over them, for parsers layered on [`TextReader`].
//!
//! A lexer reads a [`TextReader`] and records each token with
//! [`TextReader::create_token`], which spans from the location the token
//! started at to the reader's current location. [`TokenParser`] then walks the
//! token list and builds [`ParseError`]s whose ranges point back into the
//! source text.
//!
//! [`TextReader`]: crate::TextReader
//! [`TextReader::create_token`]: crate::TextReader::create_token

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use crate::{ParseError, SourceLocation, SourceRange, UString};

/// One lexed token: its kind, its text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
    pub kind: T,
    pub value: UString,
    pub range: SourceRange,
}

impl<T> Token<T> {
    pub fn new(kind: T, value: UString, range: SourceRange) -> Self {
        Self { kind, value, range }
    }

    #[must_use]
    pub fn start(&self) -> SourceLocation {
        self.range.start
    }

    #[must_use]
    pub fn end(&self) -> SourceLocation {
        self.range.end
    }
}

/// A forward cursor over a list of tokens.
#[derive(Debug, Clone)]
pub struct TokenParser<T> {
    tokens: Vec<Token<T>>,
    offset: usize,
}

impl<T: Copy + PartialEq + fmt::Debug> TokenParser<T> {
    #[must_use]
    pub fn new(tokens: Vec<Token<T>>) -> Self {
        Self { tokens, offset: 0 }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token<T>] {
        &self.tokens
    }

    /// Whether every token has been consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.tokens.len()
    }

    /// Index of the next token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The source range covered by `size` tokens starting at index `start`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or the tokens run past the end.
    #[must_use]
    pub fn range(&self, start: usize, size: usize) -> SourceRange {
        assert!(size > 0, "empty token range");
        SourceRange::new(
            self.tokens[start].start(),
            self.tokens[start + size - 1].end(),
        )
    }

    /// Consumes the next token.
    pub fn get(&mut self) -> Option<&Token<T>> {
        let index = self.advance()?;
        Some(&self.tokens[index])
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Token<T>> {
        self.tokens.get(self.offset)
    }

    #[must_use]
    pub fn next_token_is(&self, kind: T) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the next token, which must be of `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at the last token if the tokens ran out, or
    /// at the consumed token if it is of another kind.
    pub fn expect(&mut self, kind: T) -> Result<&Token<T>, ParseError> {
        let Some(index) = self.advance() else {
            return Err(self.error("unexpected end of input"));
        };
        let token = &self.tokens[index];
        if token.kind != kind {
            tracing::debug!(expected = ?kind, got = ?token.kind, index, "unexpected token");
            return Err(self.expected(format_args!("{kind:?}"), token));
        }
        Ok(token)
    }

    /// An error at the next token, or at the last one once all are consumed.
    /// Without any tokens the range is empty at the start of the text.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let range = self
            .tokens
            .get(self.offset)
            .or_else(|| self.tokens.last())
            .map(|token| token.range)
            .unwrap_or_default();
        ParseError::new(message, range)
    }

    /// An error at the token with index `token`.
    ///
    /// # Panics
    ///
    /// Panics if `token` is out of range.
    #[must_use]
    pub fn error_at_token(&self, message: impl Into<String>, token: usize) -> ParseError {
        ParseError::new(message, self.tokens[token].range)
    }

    /// An error at the most recently consumed token.
    #[must_use]
    pub fn error_in_already_read(&self, message: impl Into<String>) -> ParseError {
        let range = self
            .offset
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map(|token| token.range)
            .unwrap_or_default();
        ParseError::new(message, range)
    }

    /// `expected {what}, got '{value}'`, at `got`.
    #[must_use]
    pub fn expected(&self, what: impl fmt::Display, got: &Token<T>) -> ParseError {
        ParseError::new(format!("expected {what}, got '{}'", got.value), got.range)
    }

    fn advance(&mut self) -> Option<usize> {
        if self.is_eof() {
            return None;
        }
        self.offset += 1;
        Some(self.offset - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySource, TextReader};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Ident,
        Number,
        Equals,
        Semicolon,
    }

    fn lex(text: &str) -> Vec<Token<Kind>> {
        let mut source = MemorySource::from(text);
        let mut reader = TextReader::new(&mut source);
        let mut tokens = Vec::new();
        loop {
            reader.ignore_whitespace().unwrap();
            let start = reader.location();
            let Some(byte) = reader.peek().unwrap() else {
                break;
            };
            let (kind, value) = match byte {
                b'=' | b';' => {
                    reader.consume().unwrap();
                    let kind = if byte == b'=' { Kind::Equals } else { Kind::Semicolon };
                    (kind, UString::from(char::from(byte)))
                }
                b'0'..=b'9' => (
                    Kind::Number,
                    reader.consume_while(|b| b.is_ascii_digit()).unwrap(),
                ),
                b'a'..=b'z' => (
                    Kind::Ident,
                    reader.consume_while(|b| b.is_ascii_alphanumeric()).unwrap(),
                ),
                other => panic!("unexpected byte {other:#04x}"),
            };
            tokens.push(reader.create_token(kind, value, start));
        }
        tokens
    }

    fn at(line: usize, column: usize, offset: usize) -> SourceLocation {
        SourceLocation {
            line,
            column,
            offset,
        }
    }

    const ASSIGNMENTS: &str = "width = 42;\nheight = x;";

    #[test]
    fn tokens_span_their_text() {
        let tokens = lex(ASSIGNMENTS);
        assert_eq!(tokens.len(), 8);

        assert_eq!(tokens[0].kind, Kind::Ident);
        assert_eq!(tokens[0].value, "width");
        assert_eq!(tokens[0].start(), at(0, 0, 0));
        assert_eq!(tokens[0].end(), at(0, 5, 5));

        assert_eq!(tokens[2].value, "42");
        assert_eq!(tokens[2].range, SourceRange::new(at(0, 8, 8), at(0, 10, 10)));

        assert_eq!(tokens[6].value, "x");
        assert_eq!(tokens[6].start(), at(1, 9, 21));
    }

    #[test]
    fn cursor_moves_forward() {
        let mut parser = TokenParser::new(lex(ASSIGNMENTS));
        assert_eq!(parser.offset(), 0);
        assert!(parser.next_token_is(Kind::Ident));
        assert!(!parser.next_token_is(Kind::Equals));
        assert_eq!(parser.peek().map(|t| t.kind), Some(Kind::Ident));
        assert_eq!(parser.get().map(|t| t.kind), Some(Kind::Ident));
        assert_eq!(parser.offset(), 1);
        assert!(parser.next_token_is(Kind::Equals));

        while parser.get().is_some() {}
        assert!(parser.is_eof());
        assert_eq!(parser.offset(), 8);
        assert!(parser.peek().is_none());
        assert!(!parser.next_token_is(Kind::Semicolon));
    }

    #[test]
    fn range_covers_consecutive_tokens() {
        let parser = TokenParser::new(lex(ASSIGNMENTS));
        assert_eq!(parser.range(0, 4), SourceRange::new(at(0, 0, 0), at(0, 11, 11)));
        assert_eq!(parser.range(3, 2), SourceRange::new(at(0, 10, 10), at(1, 6, 18)));
    }

    #[test]
    fn expect_checks_kinds() {
        let mut parser = TokenParser::new(lex(ASSIGNMENTS));
        for kind in [Kind::Ident, Kind::Equals, Kind::Number, Kind::Semicolon] {
            assert_eq!(parser.expect(kind).map(|t| t.kind), Ok(kind));
        }
        let name = parser.expect(Kind::Ident).map(|t| t.value.clone());
        assert_eq!(name, Ok(UString::from("height")));
        parser.expect(Kind::Equals).unwrap();

        let error = parser.expect(Kind::Number).unwrap_err();
        assert_eq!(error.location.start, at(1, 9, 21));
        insta::assert_snapshot!(error, @"expected Number, got 'x' at 2:10");
        assert_eq!(parser.offset(), 7);
    }

    #[test]
    fn errors_point_at_tokens() {
        let mut parser = TokenParser::new(lex(ASSIGNMENTS));
        let error = parser.error_in_already_read("nothing read");
        insta::assert_snapshot!(error, @"nothing read at 1:1");
        insta::assert_snapshot!(parser.error("bad start"), @"bad start at 1:1");

        for _ in 0..7 {
            parser.get();
        }
        insta::assert_snapshot!(parser.error("next"), @"next at 2:11");
        insta::assert_snapshot!(parser.error_in_already_read("previous"), @"previous at 2:10");
        insta::assert_snapshot!(parser.error_at_token("second", 1), @"second at 1:7");

        parser.get();
        assert!(parser.is_eof());
        insta::assert_snapshot!(parser.error("after the end"), @"after the end at 2:11");
        let error = parser.expect(Kind::Semicolon).unwrap_err();
        insta::assert_snapshot!(error, @"unexpected end of input at 2:11");
    }

    #[test]
    fn empty_token_lists_use_the_start_of_text() {
        let mut parser = TokenParser::<Kind>::new(Vec::new());
        assert!(parser.is_eof());
        let error = parser.expect(Kind::Ident).unwrap_err();
        assert_eq!(error.location, SourceRange::default());
        insta::assert_snapshot!(error, @"unexpected end of input at 1:1");
    }

    #[test]
    #[should_panic(expected = "empty token range")]
    fn empty_ranges_are_rejected() {
        let _ = TokenParser::new(lex(ASSIGNMENTS)).range(0, 0);
    }
}
