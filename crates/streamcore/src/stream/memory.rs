use alloc::vec::Vec;

use super::{ByteSink, ByteSource, SeekDirection};
use crate::{Buffer, OsError, error::INVALID_ARGUMENT};

/// A seekable source over bytes held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Buffer,
    position: usize,
    max_read: Option<usize>,
    eof: bool,
}

impl MemorySource {
    pub fn new(data: impl Into<Buffer>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Caps every read at `limit` bytes (at least one), to exercise callers
    /// against short reads.
    #[must_use]
    pub fn with_max_read(mut self, limit: usize) -> Self {
        self.max_read = Some(limit.max(1));
        self
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not read yet.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        self.data.get(self.position..).unwrap_or_default()
    }

    #[must_use]
    pub fn into_inner(self) -> Buffer {
        self.data
    }
}

macro_rules! impl_from_bytes_for_memory_source {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MemorySource {
                fn from(data: $t) -> Self {
                    Self::new(data)
                }
            }
        )*
    };
}

impl_from_bytes_for_memory_source!(Buffer, Vec<u8>, &[u8], &str);

impl ByteSource for MemorySource {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError> {
        if dest.is_empty() {
            return Ok(0);
        }
        let remaining = self.remaining();
        let count = dest
            .len()
            .min(remaining.len())
            .min(self.max_read.unwrap_or(usize::MAX));
        dest[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        if count == 0 {
            self.eof = true;
        }
        Ok(count)
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        let base = match direction {
            SeekDirection::FromStart => 0,
            SeekDirection::FromCurrent => self.position,
            SeekDirection::FromEnd => self.data.len(),
        };
        let invalid = OsError::new("MemorySource::seek", INVALID_ARGUMENT);
        let target = i64::try_from(base)
            .ok()
            .and_then(|base| base.checked_add(offset))
            .and_then(|target| usize::try_from(target).ok())
            .ok_or(invalid)?;
        tracing::debug!(from = self.position, to = target, "seek memory source");
        self.position = target;
        self.eof = false;
        Ok(())
    }
}

/// A sink collecting written bytes in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    data: Vec<u8>,
    max_write: Option<usize>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps every write at `limit` bytes (at least one).
    #[must_use]
    pub fn with_max_write(mut self, limit: usize) -> Self {
        self.max_write = Some(limit.max(1));
        self
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteSink for MemorySink {
    fn write(&mut self, src: &[u8]) -> Result<usize, OsError> {
        let count = src.len().min(self.max_write.unwrap_or(usize::MAX));
        self.data.extend_from_slice(&src[..count]);
        Ok(count)
    }
}
