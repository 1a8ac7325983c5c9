use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{Decoded, Encoding, UString};

/// Owned, resizable bytes.
///
/// Every size change reallocates to exactly the new length; no spare capacity
/// is kept. Cloning copies the bytes, and [`Buffer::take`] moves them out,
/// leaving an empty buffer behind.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Buffer {
    data: Box<[u8]>,
}

impl Buffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self::filled(len, 0)
    }

    #[must_use]
    pub fn filled(len: usize, byte: u8) -> Self {
        Self {
            data: alloc::vec![byte; len].into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Moves the bytes out, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_vec()
    }

    pub fn append(&mut self, byte: u8) {
        self.reallocate(self.len(), &[byte]);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.reallocate(self.len(), bytes);
        }
    }

    /// Drops `count` bytes from the back, or every byte if there are fewer.
    pub fn truncate_back(&mut self, count: usize) {
        if count > 0 {
            self.reallocate(self.len().saturating_sub(count), &[]);
        }
    }

    /// Resizes to exactly `len` bytes. New bytes are zero.
    pub fn resize(&mut self, len: usize) {
        match len.checked_sub(self.len()) {
            Some(0) => {}
            Some(grow) => {
                let mut data = Vec::with_capacity(len);
                data.extend_from_slice(&self.data);
                data.resize(data.len() + grow, 0);
                self.data = data.into_boxed_slice();
            }
            None => self.reallocate(len, &[]),
        }
    }

    pub fn clear(&mut self) {
        self.data = Box::default();
    }

    /// Decodes the bytes, substituting U+FFFD for malformed input.
    #[must_use]
    pub fn decode(&self, encoding: Encoding) -> UString {
        UString::decode(&self.data, encoding)
    }

    #[must_use]
    pub fn decode_with_replacement(&self, encoding: Encoding, replacement: u32) -> Decoded {
        UString::decode_with_replacement(&self.data, encoding, replacement)
    }

    /// Keeps the first `keep` bytes and appends `extra`, in a fresh allocation
    /// of exactly the resulting size.
    fn reallocate(&mut self, keep: usize, extra: &[u8]) {
        let mut data = Vec::with_capacity(keep + extra.len());
        data.extend_from_slice(&self.data[..keep]);
        data.extend_from_slice(extra);
        self.data = data.into_boxed_slice();
    }
}

impl Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self { data: bytes.into() }
    }
}

impl<const N: usize> From<[u8; N]> for Buffer {
    fn from(bytes: [u8; N]) -> Self {
        Self::from(&bytes[..])
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            data: bytes.into_boxed_slice(),
        }
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.into_vec()
    }
}

impl FromIterator<u8> for Buffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<u8>>())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Buffer")
            .field(&bstr::BStr::new(&self.data))
            .finish()
    }
}

/// Hex dump of the first ten bytes, as in `{de ad be ef}`.
impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 10;
        f.write_str("{")?;
        for (index, byte) in self.data.iter().take(SHOWN).enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        if self.len() > SHOWN {
            f.write_str(" ...")?;
        }
        f.write_str("}")
    }
}
