use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::person::FieldParseError;

/// A `Result` type that all fallible API calls in PersonDB will return.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible error cases that can be return by API calls in PersonDB.
///
/// Absence of a record is never an error, lookups return `None` or `false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// An error occured while reading or writing the database file.
    IO,
    /// The input (e.g., a field value) is invalid.
    InputInvalid,
    /// The database has no file to save to.
    NoBackingFile,
}

#[derive(Debug)]
pub struct Error {
    code: ErrorCode,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl Display for ErrorCode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::IO => "IO error",
            Self::InputInvalid => "invalid input argument",
            Self::NoBackingFile => "no backing file",
        })
    }
}

impl Error {
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.source)
    }
}

impl std::error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[derive(Error, Debug)]
#[error("{field} must be a single non-empty token, got {value:?}")]
pub(crate) struct InputInvalid {
    pub(crate) field: &'static str,
    pub(crate) value: String,
}

#[derive(Error, Debug)]
#[error("the database was opened in memory and has no file to save to")]
pub(crate) struct NoBackingFile;

impl From<std::io::Error> for Error {
    #[inline]
    fn from(value: std::io::Error) -> Self {
        Self {
            code: ErrorCode::IO,
            source: Box::new(value),
        }
    }
}

impl From<InputInvalid> for Error {
    #[inline]
    fn from(value: InputInvalid) -> Self {
        Self {
            code: ErrorCode::InputInvalid,
            source: Box::new(value),
        }
    }
}

impl From<FieldParseError> for Error {
    #[inline]
    fn from(value: FieldParseError) -> Self {
        Self {
            code: ErrorCode::InputInvalid,
            source: Box::new(value),
        }
    }
}

impl From<NoBackingFile> for Error {
    #[inline]
    fn from(value: NoBackingFile) -> Self {
        Self {
            code: ErrorCode::NoBackingFile,
            source: Box::new(value),
        }
    }
}
