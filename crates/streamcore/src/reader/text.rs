use alloc::{string::String, vec::Vec};

use super::Reader;
use crate::{
    ByteSource, OsError, ParseError, ReaderOptions, SourceLocation, SourceRange, TextError,
    Token, UString,
};

/// C-locale `isspace`.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// A [`Reader`] for text that tracks where in the stream it is.
///
/// Only consuming calls move [`TextReader::location`]; the position counts
/// bytes, so a multi-byte UTF-8 sequence advances the column once per byte.
#[derive(Debug)]
pub struct TextReader<'a, S: ByteSource + ?Sized> {
    reader: Reader<'a, S>,
    location: SourceLocation,
}

impl<'a, S: ByteSource + ?Sized> TextReader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: &'a mut S, options: ReaderOptions) -> Self {
        Self {
            reader: Reader::with_options(source, options),
            location: SourceLocation::default(),
        }
    }

    /// Position of the next byte.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.reader.is_eof()
    }

    #[must_use]
    pub fn into_inner(self) -> Reader<'a, S> {
        self.reader
    }

    /// # Errors
    ///
    /// Returns the source error.
    pub fn peek(&mut self) -> Result<Option<u8>, OsError> {
        self.reader.peek()
    }

    /// Consumes one byte and moves the location past it.
    ///
    /// # Errors
    ///
    /// Returns the source error.
    pub fn consume(&mut self) -> Result<Option<u8>, OsError> {
        let byte = self.reader.get()?;
        if let Some(byte) = byte {
            self.location.advance(byte);
        }
        Ok(byte)
    }

    /// Consumes up to the next `delimiter` and decodes what came before it.
    /// The delimiter is consumed but not returned.
    ///
    /// # Errors
    ///
    /// Returns the source error, or a [`ParseError`] over the consumed range
    /// if the bytes do not decode.
    pub fn consume_until(&mut self, delimiter: u8) -> Result<UString, TextError> {
        let start = self.location;
        let mut bytes = Vec::new();
        while let Some(byte) = self.consume()? {
            if byte == delimiter {
                break;
            }
            bytes.push(byte);
        }
        Ok(self.decode(&bytes, start)?)
    }

    /// Consumes while `predicate` holds and decodes the consumed bytes. The
    /// first byte that fails it stays unread.
    ///
    /// # Errors
    ///
    /// See [`TextReader::consume_until`].
    pub fn consume_while(
        &mut self,
        mut predicate: impl FnMut(u8) -> bool,
    ) -> Result<UString, TextError> {
        let start = self.location;
        let mut bytes = Vec::new();
        while let Some(byte) = self.peek()? {
            if !predicate(byte) {
                break;
            }
            self.consume()?;
            bytes.push(byte);
        }
        Ok(self.decode(&bytes, start)?)
    }

    /// Consumes a line, dropping its `\n`.
    ///
    /// # Errors
    ///
    /// See [`TextReader::consume_until`].
    pub fn consume_line(&mut self) -> Result<UString, TextError> {
        self.consume_until(b'\n')
    }

    /// Skips whitespace, returning whether there was any.
    ///
    /// # Errors
    ///
    /// Returns the source error.
    pub fn ignore_whitespace(&mut self) -> Result<bool, OsError> {
        let mut skipped = false;
        while self.peek()?.is_some_and(is_space) {
            self.consume()?;
            skipped = true;
        }
        Ok(skipped)
    }

    /// A [`ParseError`] spanning from `start` to the current location.
    #[must_use]
    pub fn error_at(&self, message: impl Into<String>, start: SourceLocation) -> ParseError {
        ParseError::new(message, SourceRange::new(start, self.location))
    }

    /// A [`ParseError`] at the current location.
    #[must_use]
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        self.error_at(message, self.location)
    }

    /// A [`Token`] for `value`, spanning from `start` to the current location.
    #[must_use]
    pub fn create_token<T>(&self, kind: T, value: UString, start: SourceLocation) -> Token<T> {
        Token::new(kind, value, SourceRange::new(start, self.location))
    }

    fn decode(&self, bytes: &[u8], start: SourceLocation) -> Result<UString, ParseError> {
        let options = self.reader.options();
        let decoded = UString::decode_with_replacement(bytes, options.encoding, options.replacement);
        if decoded.had_errors {
            tracing::warn!(
                line = start.line,
                column = start.column,
                bytes = bytes.len(),
                "consumed text does not decode"
            );
            return Err(self.error_at("invalid UTF-8 in text", start));
        }
        Ok(decoded.string)
    }
}
