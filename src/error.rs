//! Error handling for the strand CLI and bindings loader.

use std::ops::Range;

use derive_more::{Display, Error, From};
use strand_ctype::TypeParseError;

/// Result type for bindings-file operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// I/O errors when reading a bindings file or writing output.
    #[display("I/O error: {_0}")]
    Io(#[error(source)] std::io::Error),

    /// The bindings file is not valid TOML or has the wrong shape.
    #[display("invalid bindings file: {_0}")]
    Toml(toml::de::Error),

    /// A parameter or return type spelling could not be parsed.
    #[from(ignore)]
    #[display("invalid type in `{function}`: {source}")]
    InvalidType {
        function: String,
        span: Range<usize>,
        source: TypeParseError,
    },
}

impl Error {
    /// Byte range in the bindings file the error points at, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Error::Io(_) => None,
            Error::Toml(error) => error.span(),
            Error::InvalidType { span, .. } => Some(span.clone()),
        }
    }
}
