use std::fmt::Display;
use std::io;
use std::string::FromUtf8Error;

use serde::ser;

/// Error type for `querify`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `%` that is not followed by two hexadecimal digits.
    ///
    /// `position` is the byte offset of the `%` within the key or value
    /// being decoded, not within the whole querystring.
    #[error("malformed percent-encoding {sequence:?} at offset {position} of a key or value")]
    MalformedEscape { sequence: String, position: usize },

    /// Percent-decoded bytes that do not form valid UTF-8.
    #[error("decoded input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Generate a decoding error for the escape starting at `position` of
    /// the component `input`.
    pub(crate) fn malformed_escape(input: &[u8], position: usize) -> Self {
        let end = (position + 3).min(input.len());
        Error::MalformedEscape {
            sequence: String::from_utf8_lossy(&input[position..end]).into_owned(),
            position,
        }
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
