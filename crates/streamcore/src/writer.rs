use alloc::vec::Vec;
use core::fmt;

use crate::{
    BigEndian, ByteOrder, ByteSink, Encoding, FixedWidth, LittleEndian, OsError, SeekDirection,
    UString, WriterOptions, endian::MAX_WIDTH,
};

/// Writes bytes, numbers and text to a borrowed [`ByteSink`].
///
/// Formatted output goes through [`write!`]:
///
/// ```rust
/// use streamcore::{MemorySink, Writer};
///
/// let mut sink = MemorySink::new();
/// let mut writer = Writer::new(&mut sink);
/// write!(writer, "{}-{:03}", "id", 7).unwrap();
/// assert_eq!(sink.data(), b"id-007");
/// ```
#[derive(Debug)]
pub struct Writer<'a, S: ByteSink + ?Sized> {
    sink: &'a mut S,
    options: WriterOptions,
}

impl<'a, S: ByteSink + ?Sized> Writer<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self::with_options(sink, WriterOptions::default())
    }

    pub fn with_options(sink: &'a mut S, options: WriterOptions) -> Self {
        Self { sink, options }
    }

    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &*self.sink
    }

    /// Issues one sink write, which may accept only part of `src`.
    ///
    /// # Errors
    ///
    /// Returns the sink error.
    pub fn write(&mut self, src: &[u8]) -> Result<usize, OsError> {
        self.sink.write(src)
    }

    /// Writes all of `src`, looping over partial writes.
    ///
    /// # Errors
    ///
    /// Returns the first sink error, or an [`OsError`] if the sink stops
    /// accepting bytes.
    pub fn write_all(&mut self, mut src: &[u8]) -> Result<(), OsError> {
        while !src.is_empty() {
            match self.sink.write(src)? {
                0 => return Err(OsError::eof("write_all: sink accepted no bytes")),
                count => src = &src[count..],
            }
        }
        Ok(())
    }

    /// Encodes `string` with the configured encoding and writes all of it.
    ///
    /// # Errors
    ///
    /// See [`Writer::write_all`].
    pub fn write_string(&mut self, string: &UString) -> Result<(), OsError> {
        let encoded = string.encode(self.options.encoding);
        self.write_all(&encoded)
    }

    /// Writes `text` with the configured encoding.
    ///
    /// # Errors
    ///
    /// See [`Writer::write_all`].
    pub fn write_str(&mut self, text: &str) -> Result<(), OsError> {
        match self.options.encoding {
            Encoding::Utf8 => self.write_all(text.as_bytes()),
            // Every byte of a multi-byte sequence is >= 0x80.
            Encoding::Ascii => {
                let ascii: Vec<u8> = text.bytes().filter(u8::is_ascii).collect();
                self.write_all(&ascii)
            }
        }
    }

    /// Writes `value` in byte order `B`.
    ///
    /// # Errors
    ///
    /// See [`Writer::write_all`].
    pub fn write_endian<B: ByteOrder, T: FixedWidth>(&mut self, value: T) -> Result<(), OsError> {
        let mut bytes = [0u8; MAX_WIDTH];
        let bytes = &mut bytes[..T::WIDTH];
        value.to_bytes::<B>(bytes);
        self.write_all(bytes)
    }

    /// # Errors
    ///
    /// See [`Writer::write_all`].
    pub fn write_little_endian<T: FixedWidth>(&mut self, value: T) -> Result<(), OsError> {
        self.write_endian::<LittleEndian, T>(value)
    }

    /// # Errors
    ///
    /// See [`Writer::write_all`].
    pub fn write_big_endian<T: FixedWidth>(&mut self, value: T) -> Result<(), OsError> {
        self.write_endian::<BigEndian, T>(value)
    }

    /// Backs [`write!`]: formats `args` and writes the text.
    ///
    /// # Errors
    ///
    /// Returns the first sink error.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), OsError> {
        struct Adapter<'w, 'a, S: ByteSink + ?Sized> {
            writer: &'w mut Writer<'a, S>,
            error: Option<OsError>,
        }

        impl<S: ByteSink + ?Sized> fmt::Write for Adapter<'_, '_, S> {
            fn write_str(&mut self, text: &str) -> fmt::Result {
                self.writer.write_str(text).map_err(|error| {
                    self.error = Some(error);
                    fmt::Error
                })
            }
        }

        if let Some(text) = args.as_str() {
            return self.write_str(text);
        }
        let mut adapter = Adapter {
            writer: self,
            error: None,
        };
        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(adapter
                .error
                .unwrap_or(OsError::eof("write_fmt: formatter failed"))),
        }
    }

    /// # Errors
    ///
    /// Returns the sink's seek error.
    pub fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        self.sink.seek(offset, direction)
    }
}
