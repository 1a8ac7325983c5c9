//! Buffered reading on top of a [`ByteSource`].
//!
//! # Overview
//!
//! [`Reader`] keeps a lookahead cache of at most
//! [`ReaderOptions::capacity`] bytes in front of the source. Byte-at-a-time
//! access ([`Reader::get`], [`Reader::peek`]) is served from the cache, which
//! is refilled with a single source read whenever it runs dry. Bulk reads
//! drain the cache first; a remainder larger than the capacity then goes
//! straight to the source.
//!
//! [`BinaryReader`] adds fixed-width numbers and delimiter scans over this;
//! [`TextReader`] adds decoding and position tracking.
//!
//! # Invariants
//!
//! - `offset <= buffer.len()`; the bytes in `buffer[offset..]` have been read
//!   from the source but not handed out yet.
//! - The cache is refilled only once drained, and never after the source
//!   reported end of stream.
//! - A source error that follows bytes already copied out of the cache is
//!   held back and returned by the next call that reaches the source, so no
//!   byte is lost or handed out twice.

mod binary;
mod text;


pub use binary::BinaryReader;
pub use text::TextReader;

use crate::{Buffer, ByteSource, OsError, ReaderOptions, SeekDirection};

/// A byte reader with a lookahead cache in front of a borrowed source.
#[derive(Debug)]
pub struct Reader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    buffer: Buffer,
    offset: usize,
    deferred: Option<OsError>,
    options: ReaderOptions,
}

impl<'a, S: ByteSource + ?Sized> Reader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: &'a mut S, mut options: ReaderOptions) -> Self {
        options.capacity = options.capacity.max(1);
        Self {
            source,
            buffer: Buffer::new(),
            offset: 0,
            deferred: None,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &*self.source
    }

    /// Bytes read from the source but not consumed yet.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }

    /// Whether the cache is drained and the source has hit end of stream.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.buffered().is_empty() && self.deferred.is_none() && self.source.is_eof()
    }

    /// Reads up to `dest.len()` bytes, returning how many were read.
    ///
    /// At most one source read is issued. Fewer bytes than requested does
    /// not imply end of stream.
    ///
    /// # Errors
    ///
    /// Returns a source error if nothing could be read before it.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError> {
        let mut count = self.read_buffered(dest);
        let rest = &mut dest[count..];
        if rest.is_empty() {
            return Ok(count);
        }
        if let Some(error) = self.deferred.take() {
            return self.surface(count, error);
        }

        if rest.len() > self.options.capacity {
            return match self.source.read(rest) {
                Ok(direct) => {
                    tracing::trace!(bytes = direct, "read past lookahead cache");
                    Ok(count + direct)
                }
                Err(error) => self.surface(count, error),
            };
        }

        match self.refill() {
            Ok(_) => {
                count += self.read_buffered(rest);
                Ok(count)
            }
            Err(error) => self.surface(count, error),
        }
    }

    /// Fills `dest` completely, returning `false` if the stream ended first.
    ///
    /// # Errors
    ///
    /// Returns the first source error.
    pub fn read_all(&mut self, dest: &mut [u8]) -> Result<bool, OsError> {
        let mut filled = 0;
        while filled < dest.len() {
            match self.read(&mut dest[filled..])? {
                0 => return Ok(false),
                count => filled += count,
            }
        }
        Ok(true)
    }

    /// Consumes the next byte; `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns the source error of a refill.
    pub fn get(&mut self) -> Result<Option<u8>, OsError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    /// The next byte, without consuming it; `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns the source error of a refill.
    pub fn peek(&mut self) -> Result<Option<u8>, OsError> {
        if self.buffered().is_empty() {
            if let Some(error) = self.deferred.take() {
                return Err(error);
            }
            self.refill()?;
        }
        Ok(self.buffered().first().copied())
    }

    /// Seeks the source, relative to what the caller has consumed rather than
    /// what the cache has read ahead.
    ///
    /// # Errors
    ///
    /// Returns the source's seek error; the cache is kept in that case.
    pub fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        let offset = match direction {
            SeekDirection::FromCurrent => {
                let unread = i64::try_from(self.buffered().len()).unwrap_or(i64::MAX);
                offset.saturating_sub(unread)
            }
            SeekDirection::FromStart | SeekDirection::FromEnd => offset,
        };
        self.source.seek(offset, direction)?;
        tracing::debug!(offset, ?direction, discarded = self.buffered().len(), "seek reader");
        self.buffer.clear();
        self.offset = 0;
        self.deferred = None;
        Ok(())
    }

    /// Copies cached bytes into `dest`.
    fn read_buffered(&mut self, dest: &mut [u8]) -> usize {
        let available = self.buffered();
        let count = available.len().min(dest.len());
        dest[..count].copy_from_slice(&available[..count]);
        self.offset += count;
        count
    }

    /// Replaces the drained cache with one source read.
    fn refill(&mut self) -> Result<usize, OsError> {
        debug_assert!(self.buffered().is_empty());
        self.offset = 0;
        if self.source.is_eof() {
            self.buffer.clear();
            return Ok(0);
        }

        self.buffer.resize(self.options.capacity);
        match self.source.read(&mut self.buffer) {
            Ok(count) => {
                self.buffer.resize(count);
                tracing::trace!(bytes = count, capacity = self.options.capacity, "refilled lookahead cache");
                Ok(count)
            }
            Err(error) => {
                self.buffer.clear();
                Err(error)
            }
        }
    }

    /// Returns `error` now if nothing was copied, otherwise holds it back for
    /// the next call.
    fn surface(&mut self, count: usize, error: OsError) -> Result<usize, OsError> {
        if count == 0 {
            return Err(error);
        }
        tracing::debug!(bytes = count, %error, "deferring source error after short read");
        self.deferred = Some(error);
        Ok(count)
    }
}
