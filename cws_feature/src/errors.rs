//! Errors of feature extraction, table I/O and model persistence.

use std::error::Error;
use std::fmt;

pub type Result<T, E = CwsError> = core::result::Result<T, E>;

/// Error returned by the builder, the encoder, the model and the table functions.
#[derive(Debug)]
pub enum CwsError {
    /// A loaded model has an inconsistent vocabulary or word length range.
    InvalidModel(InvalidModelError),

    /// A setting, a table line or a label was rejected.
    InvalidArgument(InvalidArgumentError),

    /// An index or a header of a text table is not a number.
    ParseIntError(std::num::ParseIntError),

    /// A count does not fit in the persisted or indexed integer type.
    CastError(std::num::TryFromIntError),

    DecodeError(bincode::error::DecodeError),

    EncodeError(bincode::error::EncodeError),

    IOError(std::io::Error),
}

impl CwsError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for CwsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::ParseIntError(e) => e.fmt(f),
            Self::CastError(e) => e.fmt(f),
            Self::DecodeError(e) => e.fmt(f),
            Self::EncodeError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for CwsError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::num::ParseIntError> for CwsError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseIntError(error)
    }
}

impl From<std::num::TryFromIntError> for CwsError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::CastError(error)
    }
}

impl From<bincode::error::DecodeError> for CwsError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for CwsError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for CwsError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
