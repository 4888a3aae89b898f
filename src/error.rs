use std::fmt;

use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::value::ConversionError;

/// Message surfaced when a single-item fetch finds nothing under the key.
pub const NOT_FOUND_MESSAGE: &str = "cannot get a item by key";

#[derive(Debug)]
pub enum Error {
    /// The store returned no item for the requested key.
    NotFound,
    /// Error reported by the DynamoDB client, forwarded untouched.
    Store(aws_sdk_dynamodb::Error),
    /// A request struct could not be assembled from a descriptor.
    Build(BuildError),
    /// An item returned by the store could not be mapped back into values.
    Conversion(ConversionError),
    /// Text that failed JSON validation, kept verbatim for diagnosis.
    InvalidJson(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "{NOT_FOUND_MESSAGE}"),
            Error::Store(err) => write!(f, "{}", DisplayErrorContext(err)),
            Error::Build(err) => write!(f, "invalid request: {err}"),
            Error::Conversion(err) => write!(f, "{err}"),
            Error::InvalidJson(text) => write!(f, "{text}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Build(err) => Some(err),
            Error::Conversion(err) => Some(err),
            Error::NotFound | Error::InvalidJson(_) => None,
        }
    }
}

impl From<aws_sdk_dynamodb::Error> for Error {
    fn from(err: aws_sdk_dynamodb::Error) -> Self {
        Error::Store(err)
    }
}

impl<E, R> From<SdkError<E, R>> for Error
where
    aws_sdk_dynamodb::Error: From<SdkError<E, R>>,
{
    fn from(err: SdkError<E, R>) -> Self {
        Error::Store(err.into())
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Error::Build(err)
    }
}

impl From<ConversionError> for Error {
    fn from(err: ConversionError) -> Self {
        Error::Conversion(err)
    }
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
