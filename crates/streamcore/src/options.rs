use crate::utf8::REPLACEMENT_CHARACTER;

/// Character encoding used to move between bytes and code points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Every byte is one code point. Encoding drops code points above
    /// `0x7F`.
    Ascii,
    /// UTF-8, including the legacy five- and six-byte forms.
    #[default]
    Utf8,
}

/// Configuration for [`Reader`](crate::Reader) and the readers built on it.
///
/// # Default
///
/// A 4096-byte lookahead, UTF-8 text, and U+FFFD as the replacement
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Size of the lookahead cache in bytes.
    ///
    /// A single read asking for more than this many bytes, once the cache is
    /// drained, goes straight to the source instead of through the cache.
    /// Values below one are treated as one.
    ///
    /// # Default
    ///
    /// `4096`
    pub capacity: usize,

    /// Encoding used by the text reader to decode consumed bytes.
    ///
    /// # Default
    ///
    /// [`Encoding::Utf8`]
    pub encoding: Encoding,

    /// Code point substituted for malformed input while decoding.
    ///
    /// The text reader still reports malformed input as an error; the
    /// replacement shows up in lossy decoding through
    /// [`Buffer::decode`](crate::Buffer::decode) and
    /// [`UString::decode_with_replacement`](crate::UString::decode_with_replacement).
    ///
    /// # Default
    ///
    /// `0xFFFD`
    pub replacement: u32,
}

impl ReaderOptions {
    pub const DEFAULT_CAPACITY: usize = 4096;
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            encoding: Encoding::default(),
            replacement: REPLACEMENT_CHARACTER,
        }
    }
}

/// Configuration for [`Writer`](crate::Writer).
///
/// # Default
///
/// UTF-8 output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Encoding applied to [`UString`](crate::UString)s and formatted text.
    ///
    /// # Default
    ///
    /// [`Encoding::Utf8`]
    pub encoding: Encoding,
}
