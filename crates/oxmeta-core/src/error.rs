//! Error types for oxmeta

use thiserror::Error;

use crate::exif::ExifError;
use crate::icc::IccError;

/// Result type for oxmeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in oxmeta operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// EXIF block could not be parsed or a value could not be applied
    #[error("EXIF error: {0}")]
    Exif(#[from] ExifError),

    /// ICC profile could not be parsed
    #[error("ICC error: {0}")]
    Icc(#[from] IccError),

    /// A built-in profile could not be loaded
    #[error("Built-in profile '{name}' unavailable: {reason}")]
    Builtin { name: String, reason: String },
}

impl Error {
    /// True when the error means the whole buffer was structurally unusable
    pub fn is_format_error(&self) -> bool {
        match self {
            Self::Exif(e) => e.is_format_error(),
            Self::Icc(e) => e.is_format_error(),
            Self::Builtin { .. } => false,
        }
    }
}
