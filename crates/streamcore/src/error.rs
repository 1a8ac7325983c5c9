use alloc::string::String;
use core::fmt;

/// A failed operating-system call, or a stream operation that ended early.
///
/// `code` is the OS error number. A code of `0` carries no errno and the
/// failing operation is described by `function` alone, as in
/// `"EOF in read_little_endian"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsError {
    pub function: &'static str,
    pub code: i32,
}

pub type OsErrorOr<T> = Result<T, OsError>;

/// `ENOENT`
pub(crate) const NO_SUCH_ENTRY: i32 = 2;
/// `EINVAL`
pub(crate) const INVALID_ARGUMENT: i32 = 22;
/// `ESPIPE`
pub(crate) const ILLEGAL_SEEK: i32 = 29;

impl OsError {
    #[must_use]
    pub const fn new(function: &'static str, code: i32) -> Self {
        Self { function, code }
    }

    /// An early end of stream, which has no errno of its own.
    #[must_use]
    pub const fn eof(function: &'static str) -> Self {
        Self { function, code: 0 }
    }

    /// Whether the OS reported an error number.
    #[must_use]
    pub const fn has_code(&self) -> bool {
        self.code != 0
    }

    #[cfg(feature = "std")]
    #[must_use]
    pub fn from_io(function: &'static str, error: &std::io::Error) -> Self {
        Self {
            function,
            code: error.raw_os_error().unwrap_or(0),
        }
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_code() {
            write!(f, "{}: os error {}", self.function, self.code)
        } else {
            f.write_str(self.function)
        }
    }
}

impl core::error::Error for OsError {}

/// A zero-based position in a text stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourceLocation {
    /// Moves past one consumed byte.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.offset += 1;
    }
}

/// The span between two [`SourceLocation`]s, end exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    #[must_use]
    pub const fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// An empty range at `location`.
    #[must_use]
    pub const fn at(location: SourceLocation) -> Self {
        Self {
            start: location,
            end: location,
        }
    }
}

/// Malformed text, with the range it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceRange,
}

pub type ParseErrorOr<T> = Result<T, ParseError>;

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, location: SourceRange) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

// Locations are zero-based; humans count from one.
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.message,
            self.location.start.line + 1,
            self.location.start.column + 1
        )
    }
}

impl core::error::Error for ParseError {}

crate::error_set! {
    /// Failures of the text layer: the stream failed, or its bytes did not
    /// decode.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum TextError {
        #[error(transparent)]
        Os(OsError),
        #[error(transparent)]
        Parse(ParseError),
    }
}

crate::narrow_error_set!(TextError: Os(OsError) => ParseError { Parse });
crate::narrow_error_set!(TextError: Parse(ParseError) => OsError { Os });

/// Folds an [`OsError`] into a [`ParseError`] spanning `range`, for callers
/// that only report parse failures.
///
/// The message is the failing function's description.
pub fn os_to_parse_error(range: SourceRange) -> impl FnOnce(OsError) -> ParseError {
    move |error| ParseError::new(error.function, range)
}
