use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use super::Reader;
use crate::{
    BigEndian, Buffer, ByteOrder, ByteSource, FixedWidth, LittleEndian, OsError, ReaderOptions,
    endian::MAX_WIDTH,
};

/// A [`Reader`] for binary data: fixed-width numbers and byte scans.
///
/// Everything [`Reader`] offers is reachable through `Deref`.
#[derive(Debug)]
pub struct BinaryReader<'a, S: ByteSource + ?Sized> {
    reader: Reader<'a, S>,
}

impl<'a, S: ByteSource + ?Sized> BinaryReader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: &'a mut S, options: ReaderOptions) -> Self {
        Self {
            reader: Reader::with_options(source, options),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Reader<'a, S> {
        self.reader
    }

    /// Reads a `T` stored in byte order `B`.
    ///
    /// # Errors
    ///
    /// Returns the source error, or an [`OsError`] named `eof_function` if the
    /// stream ends before `T::WIDTH` bytes.
    fn read_endian_named<B: ByteOrder, T: FixedWidth>(
        &mut self,
        eof_function: &'static str,
    ) -> Result<T, OsError> {
        let mut bytes = [0u8; MAX_WIDTH];
        let bytes = &mut bytes[..T::WIDTH];
        if !self.reader.read_all(bytes)? {
            return Err(OsError::eof(eof_function));
        }
        Ok(T::from_bytes::<B>(bytes))
    }

    /// Reads a `T` stored in byte order `B`.
    ///
    /// # Errors
    ///
    /// Returns the source error, or an end-of-stream [`OsError`] if fewer
    /// than `T::WIDTH` bytes remain.
    pub fn read_endian<B: ByteOrder, T: FixedWidth>(&mut self) -> Result<T, OsError> {
        self.read_endian_named::<B, T>("EOF in read_endian")
    }

    /// # Errors
    ///
    /// See [`BinaryReader::read_endian`].
    pub fn read_little_endian<T: FixedWidth>(&mut self) -> Result<T, OsError> {
        self.read_endian_named::<LittleEndian, T>("EOF in read_little_endian")
    }

    /// # Errors
    ///
    /// See [`BinaryReader::read_endian`].
    pub fn read_big_endian<T: FixedWidth>(&mut self) -> Result<T, OsError> {
        self.read_endian_named::<BigEndian, T>("EOF in read_big_endian")
    }

    /// Reads up to the next `delimiter`, which is consumed but not returned.
    /// At end of stream everything left is returned.
    ///
    /// # Errors
    ///
    /// Returns the source error.
    pub fn read_until(&mut self, delimiter: u8) -> Result<Buffer, OsError> {
        let mut bytes = Vec::new();
        while let Some(byte) = self.reader.get()? {
            if byte == delimiter {
                break;
            }
            bytes.push(byte);
        }
        Ok(Buffer::from(bytes))
    }

    /// Reads while `predicate` holds. The first byte that fails it stays
    /// unread.
    ///
    /// # Errors
    ///
    /// Returns the source error.
    pub fn read_while(&mut self, mut predicate: impl FnMut(u8) -> bool) -> Result<Buffer, OsError> {
        let mut bytes = Vec::new();
        while let Some(byte) = self.reader.peek()? {
            if !predicate(byte) {
                break;
            }
            self.reader.get()?;
            bytes.push(byte);
        }
        Ok(Buffer::from(bytes))
    }
}

impl<'a, S: ByteSource + ?Sized> Deref for BinaryReader<'a, S> {
    type Target = Reader<'a, S>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl<S: ByteSource + ?Sized> DerefMut for BinaryReader<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}
