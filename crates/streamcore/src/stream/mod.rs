//! The minimal byte-level capabilities readers and writers are built on.
//!
//! A [`ByteSource`] hands out bytes and reports end of stream; a [`ByteSink`]
//! accepts them. Both may transfer fewer bytes than asked for. Seeking is
//! optional: the provided `seek` fails with `ESPIPE`.

mod memory;
#[cfg(feature = "std")]
mod io;

#[cfg(feature = "std")]
pub use io::{
    FileOpenOptions, FileSink, FileSource, IoSink, IoSource, getenv_or_error, std_err, std_in,
    std_out,
};
pub use memory::{MemorySink, MemorySource};

use crate::{OsError, error::ILLEGAL_SEEK};

/// Reference point of a seek offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    /// `SEEK_SET`
    FromStart,
    /// `SEEK_CUR`
    FromCurrent,
    /// `SEEK_END`
    FromEnd,
}

/// A stream of bytes that can be read.
pub trait ByteSource {
    /// Reads up to `dest.len()` bytes, returning how many were read. Zero
    /// means end of stream.
    ///
    /// # Errors
    ///
    /// Returns the failing OS call.
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError>;

    /// Whether a read into a non-empty destination has returned zero bytes.
    fn is_eof(&self) -> bool;

    /// Moves the read position.
    ///
    /// # Errors
    ///
    /// Fails with `ESPIPE` unless the source supports seeking.
    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        let _ = (offset, direction);
        Err(OsError::new("seek", ILLEGAL_SEEK))
    }
}

/// A stream of bytes that can be written.
pub trait ByteSink {
    /// Writes up to `src.len()` bytes, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns the failing OS call.
    fn write(&mut self, src: &[u8]) -> Result<usize, OsError>;

    /// Moves the write position.
    ///
    /// # Errors
    ///
    /// Fails with `ESPIPE` unless the sink supports seeking.
    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        let _ = (offset, direction);
        Err(OsError::new("seek", ILLEGAL_SEEK))
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError> {
        (**self).read(dest)
    }

    fn is_eof(&self) -> bool {
        (**self).is_eof()
    }

    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        (**self).seek(offset, direction)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, src: &[u8]) -> Result<usize, OsError> {
        (**self).write(src)
    }

    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        (**self).seek(offset, direction)
    }
}
