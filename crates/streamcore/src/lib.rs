//! Buffered byte and text streams built on a statically checked error union.
//!
//! The crate has two layers:
//!
//! - [`error_set!`] declares closed sets of error types. A `Result` over such
//!   a set propagates with `?` into any set that contains it, and the
//!   containment is checked by the compiler.
//! - [`Reader`], [`BinaryReader`], [`TextReader`] and [`Writer`] sit on top of
//!   the minimal [`ByteSource`] / [`ByteSink`] capabilities and report every
//!   failure through that error machinery.
//!
//! ```rust
//! use streamcore::{MemorySource, TextReader};
//!
//! let mut source = MemorySource::from("name = value\nnext");
//! let mut reader = TextReader::new(&mut source);
//! let key = reader.consume_until(b'=').unwrap();
//! assert_eq!(key.to_string(), "name ");
//! reader.ignore_whitespace().unwrap();
//! assert_eq!(reader.consume_line().unwrap().to_string(), "value");
//! assert_eq!(reader.location().line, 1);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod endian;
mod error;
mod error_set;
mod options;
mod reader;
mod stream;
mod token;
pub mod utf8;
mod ustring;
mod writer;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use endian::{BigEndian, ByteOrder, FixedWidth, LittleEndian, NativeEndian};
pub use error::{
    OsError, OsErrorOr, ParseError, ParseErrorOr, SourceLocation, SourceRange, TextError,
    os_to_parse_error,
};
pub use error_set::{ErrorOr, ErrorOrExt, ErrorSet, Member, Remove, SubsetOf};
pub use options::{Encoding, ReaderOptions, WriterOptions};
pub use reader::{BinaryReader, Reader, TextReader};
#[cfg(feature = "std")]
pub use stream::{
    FileOpenOptions, FileSink, FileSource, IoSink, IoSource, getenv_or_error, std_err, std_in,
    std_out,
};
pub use stream::{ByteSink, ByteSource, MemorySink, MemorySource, SeekDirection};
pub use token::{Token, TokenParser};
pub use ustring::{Decoded, UString};
pub use writer::Writer;
