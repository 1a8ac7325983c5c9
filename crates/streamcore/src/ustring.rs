use alloc::{boxed::Box, vec::Vec};
use core::{fmt, ops::Add};

use crate::{
    Encoding,
    utf8::{self, REPLACEMENT_CHARACTER},
};

/// An immutable string of 32-bit code points.
///
/// Code points are not restricted to Unicode scalar values: surrogates and
/// values above `0x10FFFF` survive a round trip through the extended UTF-8
/// codec. Every operation returns a new string of exactly the needed size.
/// Ordering is lexicographic over code points.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UString {
    storage: Box<[u32]>,
}

/// A decoded string, and whether any input was malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub string: UString,
    /// Malformed input was replaced while decoding.
    pub had_errors: bool,
}

impl UString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_code_point(code_point: u32) -> Self {
        Self {
            storage: Box::new([code_point]),
        }
    }

    #[must_use]
    pub fn from_code_points(code_points: &[u32]) -> Self {
        Self {
            storage: code_points.into(),
        }
    }

    /// Decodes `bytes`, substituting U+FFFD for malformed input.
    #[must_use]
    pub fn decode(bytes: &[u8], encoding: Encoding) -> Self {
        Self::decode_with_replacement(bytes, encoding, REPLACEMENT_CHARACTER).string
    }

    #[must_use]
    pub fn decode_with_replacement(bytes: &[u8], encoding: Encoding, replacement: u32) -> Decoded {
        match encoding {
            Encoding::Ascii => Decoded {
                string: bytes.iter().map(|&b| u32::from(b)).collect(),
                had_errors: false,
            },
            Encoding::Utf8 => {
                let (code_points, report) = utf8::decode(bytes, replacement);
                Decoded {
                    string: Self::from(code_points),
                    had_errors: report.has_errors(),
                }
            }
        }
    }

    /// Encodes into bytes. ASCII drops code points above `0x7F`.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        match encoding {
            #[allow(clippy::cast_possible_truncation)]
            Encoding::Ascii => self
                .storage
                .iter()
                .filter(|&&cp| cp <= 0x7F)
                .map(|&cp| cp as u8)
                .collect(),
            Encoding::Utf8 => utf8::encode(&self.storage),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn code_points(&self) -> &[u32] {
        &self.storage
    }

    /// The code point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> u32 {
        self.storage[index]
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.storage.get(index).copied()
    }

    /// `len` code points starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end.
    #[must_use]
    pub fn substring(&self, start: usize, len: usize) -> Self {
        Self::from_code_points(&self.storage[start..start + len])
    }

    /// Everything from `start` on.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end.
    #[must_use]
    pub fn suffix(&self, start: usize) -> Self {
        Self::from_code_points(&self.storage[start..])
    }

    /// Position of the first occurrence of `needle` at or after `start`.
    ///
    /// An empty needle matches at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end.
    #[must_use]
    pub fn find(&self, needle: &UString, start: usize) -> Option<usize> {
        let haystack = &self.storage[start..];
        if needle.is_empty() {
            return Some(start);
        }
        haystack
            .windows(needle.len())
            .position(|window| window == &*needle.storage)
            .map(|position| start + position)
    }

    /// Removes `count` code points at `start`, or everything after `start` if
    /// fewer remain.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end.
    #[must_use]
    pub fn erase(&self, start: usize, count: usize) -> Self {
        assert!(start <= self.len(), "erase start {start} past end {}", self.len());
        let end = start.saturating_add(count).min(self.len());
        let mut storage = Vec::with_capacity(self.len() - (end - start));
        storage.extend_from_slice(&self.storage[..start]);
        storage.extend_from_slice(&self.storage[end..]);
        Self::from(storage)
    }

    /// Inserts `other` before position `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is past the end.
    #[must_use]
    pub fn insert(&self, other: &UString, at: usize) -> Self {
        let (head, tail) = self.storage.split_at(at);
        let mut storage = Vec::with_capacity(self.len() + other.len());
        storage.extend_from_slice(head);
        storage.extend_from_slice(&other.storage);
        storage.extend_from_slice(tail);
        Self::from(storage)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.storage.iter().copied()
    }
}

impl From<Vec<u32>> for UString {
    fn from(code_points: Vec<u32>) -> Self {
        Self {
            storage: code_points.into_boxed_slice(),
        }
    }
}

impl From<&str> for UString {
    fn from(text: &str) -> Self {
        text.chars().collect()
    }
}

impl From<char> for UString {
    fn from(c: char) -> Self {
        Self::from_code_point(u32::from(c))
    }
}

impl FromIterator<u32> for UString {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<u32>>())
    }
}

impl FromIterator<char> for UString {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        iter.into_iter().map(u32::from).collect()
    }
}

impl PartialEq<str> for UString {
    fn eq(&self, other: &str) -> bool {
        self.storage.iter().copied().eq(other.chars().map(u32::from))
    }
}

impl PartialEq<&str> for UString {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Add<&UString> for &UString {
    type Output = UString;

    fn add(self, rhs: &UString) -> UString {
        self.insert(rhs, self.len())
    }
}

impl Add for UString {
    type Output = UString;

    fn add(self, rhs: UString) -> UString {
        &self + &rhs
    }
}

/// Renders code points that are not Unicode scalar values as U+FFFD.
impl fmt::Display for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use core::fmt::Write;

        for &code_point in &*self.storage {
            f.write_char(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{:?}", alloc::string::ToString::to_string(self))
    }
}
