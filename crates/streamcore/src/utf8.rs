//! UTF-8 conversion between bytes and 32-bit code points.
//!
//! The codec accepts the original, pre-RFC 3629 form of UTF-8: sequences of
//! one to six bytes, covering code points up to `0x7FFF_FFFF`. Decoding never
//! stops early. Malformed input is replaced and counted:
//!
//! - a leading byte of `0xFE` or `0xFF`, or a continuation byte (`10xxxxxx`)
//!   where a leading byte is expected, becomes one replacement code point;
//! - a sequence cut short by a byte that is not a continuation byte becomes
//!   one replacement code point, and decoding resumes at that byte;
//! - a sequence cut short by the end of input becomes one replacement code
//!   point.
//!
//! Overlong encodings (a code point stored in more bytes than it needs) are
//! decoded as-is and counted separately in [`DecodeReport::overlong`].

use alloc::vec::Vec;

/// U+FFFD REPLACEMENT CHARACTER
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// What went wrong while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Malformed sequences replaced by the replacement code point.
    pub errors: usize,
    /// Sequences longer than the shortest form of their code point.
    pub overlong: usize,
}

impl DecodeReport {
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Number of bytes the shortest encoding of `code_point` takes.
#[must_use]
pub const fn encoded_len(code_point: u32) -> usize {
    if code_point < 0x80 {
        1
    } else if code_point < 0x800 {
        2
    } else if code_point < 0x1_0000 {
        3
    } else if code_point < 0x20_0000 {
        4
    } else if code_point < 0x400_0000 {
        5
    } else {
        6
    }
}

/// Leading-byte marker and payload mask, indexed by sequence length.
const LEADING: [(u8, u8); 7] = [
    (0, 0),
    (0x00, 0x7F),
    (0xC0, 0x1F),
    (0xE0, 0x0F),
    (0xF0, 0x07),
    (0xF8, 0x03),
    (0xFC, 0x01),
];

/// Sequence length announced by a leading byte, or `None` if the byte cannot
/// start a sequence.
#[inline]
fn sequence_len(leading: u8) -> Option<usize> {
    match leading {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        0xF8..=0xFB => Some(5),
        0xFC..=0xFD => Some(6),
        _ => None,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes `bytes`, appending code points to `out`.
pub fn decode_into(bytes: &[u8], replacement: u32, out: &mut Vec<u32>) -> DecodeReport {
    let mut report = DecodeReport::default();
    let mut index = 0;

    while index < bytes.len() {
        let leading = bytes[index];
        let Some(len) = sequence_len(leading) else {
            tracing::warn!(
                offset = index,
                byte = format_args!("{leading:#04x}"),
                "invalid utf-8 leading byte"
            );
            report.errors += 1;
            out.push(replacement);
            index += 1;
            continue;
        };

        let mut code_point = u32::from(leading & LEADING[len].1);
        let end = index + len;
        let mut cursor = index + 1;
        while cursor < end {
            match bytes.get(cursor) {
                Some(&byte) if is_continuation(byte) => {
                    code_point = (code_point << 6) | u32::from(byte & 0x3F);
                    cursor += 1;
                }
                _ => break,
            }
        }

        if cursor < end {
            tracing::warn!(
                offset = index,
                expected = len,
                got = cursor - index,
                "unfinished utf-8 sequence"
            );
            report.errors += 1;
            out.push(replacement);
            index = cursor;
            continue;
        }

        if encoded_len(code_point) < len {
            tracing::debug!(
                offset = index,
                code_point = format_args!("{code_point:#x}"),
                bytes = len,
                required = encoded_len(code_point),
                "overlong utf-8 sequence"
            );
            report.overlong += 1;
        }

        out.push(code_point);
        index = end;
    }

    report
}

/// Decodes `bytes` into a fresh vector.
#[must_use]
pub fn decode(bytes: &[u8], replacement: u32) -> (Vec<u32>, DecodeReport) {
    let mut out = Vec::new();
    let report = decode_into(bytes, replacement, &mut out);
    (out, report)
}

/// Encodes every code point in its shortest form, appending to `out`.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_into(code_points: &[u32], out: &mut Vec<u8>) {
    out.reserve(code_points.iter().map(|&cp| encoded_len(cp)).sum());
    for &code_point in code_points {
        let len = encoded_len(code_point);
        let mut bytes = [0u8; 6];
        let mut rest = code_point;
        for slot in bytes[1..len].iter_mut().rev() {
            *slot = 0x80 | (rest & 0x3F) as u8;
            rest >>= 6;
        }
        let (marker, mask) = LEADING[len];
        bytes[0] = marker | (rest as u8 & mask);
        out.extend_from_slice(&bytes[..len]);
    }
}

#[must_use]
pub fn encode(code_points: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(code_points, &mut out);
    out
}
