use std::{
    env,
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use super::{ByteSink, ByteSource, SeekDirection};
use crate::{
    Encoding, OsError, UString,
    error::{INVALID_ARGUMENT, NO_SUCH_ENTRY},
};

/// Adapts any [`Read`] into a [`ByteSource`].
///
/// Interrupted reads are retried.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    eof: bool,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, eof: false }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError> {
        loop {
            match self.inner.read(dest) {
                Ok(0) if !dest.is_empty() => {
                    self.eof = true;
                    return Ok(0);
                }
                Ok(count) => return Ok(count),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(OsError::from_io("read", &error)),
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.eof
    }
}

/// Adapts any [`Write`] into a [`ByteSink`].
///
/// Interrupted writes are retried. Writes go straight to the inner writer;
/// buffered writers such as [`io::Stdout`] still need flushing.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// # Errors
    ///
    /// Returns the failing flush.
    pub fn flush(&mut self) -> Result<(), OsError> {
        self.inner
            .flush()
            .map_err(|error| OsError::from_io("flush", &error))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write(&mut self, src: &[u8]) -> Result<usize, OsError> {
        loop {
            match self.inner.write(src) {
                Ok(count) => return Ok(count),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(OsError::from_io("write", &error)),
            }
        }
    }
}

fn seek_file(file: &mut File, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
    let target = match direction {
        SeekDirection::FromStart => SeekFrom::Start(
            u64::try_from(offset).map_err(|_| OsError::new("lseek", INVALID_ARGUMENT))?,
        ),
        SeekDirection::FromCurrent => SeekFrom::Current(offset),
        SeekDirection::FromEnd => SeekFrom::End(offset),
    };
    let position = file
        .seek(target)
        .map_err(|error| OsError::from_io("lseek", &error))?;
    tracing::debug!(?direction, offset, position, "seek file");
    Ok(())
}

/// A seekable source reading from a file it owns.
#[derive(Debug)]
pub struct FileSource {
    inner: IoSource<File>,
}

impl FileSource {
    /// # Errors
    ///
    /// Returns the failing `open`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OsError> {
        let file = File::open(path).map_err(|error| OsError::from_io("open", &error))?;
        Ok(Self::from_file(file))
    }

    #[must_use]
    pub fn from_file(file: File) -> Self {
        Self {
            inner: IoSource::new(file),
        }
    }

    #[must_use]
    pub fn into_file(self) -> File {
        self.inner.into_inner()
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, OsError> {
        self.inner.read(dest)
    }

    fn is_eof(&self) -> bool {
        self.inner.is_eof()
    }

    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        seek_file(&mut self.inner.inner, offset, direction)?;
        self.inner.eof = false;
        Ok(())
    }
}

/// How [`FileSink::create`] treats an existing file.
///
/// # Default
///
/// Existing files are opened and overwritten from the start without
/// truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOpenOptions {
    /// Empty an existing file first.
    ///
    /// # Default
    ///
    /// `false`
    pub truncate: bool,

    /// Fail if the file already exists.
    ///
    /// # Default
    ///
    /// `false`
    pub fail_if_exists: bool,
}

/// A seekable sink writing to a file it owns.
#[derive(Debug)]
pub struct FileSink {
    inner: IoSink<File>,
}

impl FileSink {
    /// Opens `path` for writing, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns the failing `open`.
    pub fn create(path: impl AsRef<Path>, options: FileOpenOptions) -> Result<Self, OsError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .create_new(options.fail_if_exists)
            .truncate(options.truncate)
            .open(path)
            .map_err(|error| OsError::from_io("open", &error))?;
        Ok(Self::from_file(file))
    }

    #[must_use]
    pub fn from_file(file: File) -> Self {
        Self {
            inner: IoSink::new(file),
        }
    }

    #[must_use]
    pub fn into_file(self) -> File {
        self.inner.into_inner()
    }
}

impl ByteSink for FileSink {
    fn write(&mut self, src: &[u8]) -> Result<usize, OsError> {
        self.inner.write(src)
    }

    fn seek(&mut self, offset: i64, direction: SeekDirection) -> Result<(), OsError> {
        seek_file(&mut self.inner.inner, offset, direction)
    }
}

/// The process's standard input.
#[must_use]
pub fn std_in() -> IoSource<io::Stdin> {
    IoSource::new(io::stdin())
}

/// The process's standard output.
#[must_use]
pub fn std_out() -> IoSink<io::Stdout> {
    IoSink::new(io::stdout())
}

/// The process's standard error.
#[must_use]
pub fn std_err() -> IoSink<io::Stderr> {
    IoSink::new(io::stderr())
}

/// The value of the environment variable `name`, decoded as UTF-8.
///
/// # Errors
///
/// Returns `ENOENT` if the variable is not set.
pub fn getenv_or_error(name: &str) -> Result<UString, OsError> {
    let Some(value) = env::var_os(name) else {
        tracing::warn!(name, "environment variable is not set");
        return Err(OsError::new("getenv_or_error", NO_SUCH_ENTRY));
    };
    Ok(UString::decode(value.as_encoded_bytes(), Encoding::Utf8))
}

#[cfg(test)]
mod tests {
    use std::{process, vec::Vec};

    use super::*;

    struct Interrupting {
        interrupted: bool,
        data: &'static [u8],
    }

    impl Read for Interrupting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn io_source_retries_interrupted_reads() {
        let mut source = IoSource::new(Interrupting {
            interrupted: false,
            data: b"ok",
        });
        let mut dest = [0; 4];
        assert_eq!(source.read(&mut dest), Ok(2));
        assert_eq!(source.read(&mut dest), Ok(0));
        assert!(source.is_eof());
    }

    #[test]
    fn io_sink_writes_through() {
        let mut sink = IoSink::new(Vec::new());
        assert_eq!(sink.write(b"abc"), Ok(3));
        sink.flush().unwrap();
        assert_eq!(sink.into_inner(), b"abc");
    }

    #[test]
    fn files_round_trip_and_seek() {
        let path = env::temp_dir().join(std::format!("streamcore-io-{}.bin", process::id()));

        let mut sink = FileSink::create(
            &path,
            FileOpenOptions {
                truncate: true,
                ..FileOpenOptions::default()
            },
        )
        .unwrap();
        assert_eq!(sink.write(b"hello world"), Ok(11));
        sink.seek(0, SeekDirection::FromStart).unwrap();
        assert_eq!(sink.write(b"J"), Ok(1));
        drop(sink);

        let exclusive = FileSink::create(
            &path,
            FileOpenOptions {
                fail_if_exists: true,
                ..FileOpenOptions::default()
            },
        );
        assert!(exclusive.is_err());

        let mut source = FileSource::open(&path).unwrap();
        source.seek(-5, SeekDirection::FromEnd).unwrap();
        let mut dest = [0; 16];
        assert_eq!(source.read(&mut dest), Ok(5));
        assert_eq!(&dest[..5], b"world");
        assert_eq!(source.read(&mut dest), Ok(0));
        assert!(source.is_eof());

        source.seek(0, SeekDirection::FromStart).unwrap();
        assert!(!source.is_eof());
        assert_eq!(source.read(&mut dest), Ok(11));
        assert_eq!(&dest[..11], b"Jello world");

        assert!(source.seek(-1, SeekDirection::FromStart).is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_reports_the_os_code() {
        let error = FileSource::open("/nonexistent/streamcore/input").unwrap_err();
        assert_eq!(error.function, "open");
        assert!(error.has_code());
    }

    #[test]
    fn set_variables_are_read() {
        let Some(expected) = env::var_os("PATH") else {
            return;
        };
        let value = getenv_or_error("PATH").unwrap();
        assert_eq!(value, &*expected.to_string_lossy());
    }

    #[test]
    fn missing_variables_are_enoent() {
        let error = getenv_or_error("STREAMCORE_SURELY_UNSET_VARIABLE").unwrap_err();
        assert_eq!(error, OsError::new("getenv_or_error", NO_SUCH_ENTRY));
        assert_eq!(error.code, 2);
    }
}
