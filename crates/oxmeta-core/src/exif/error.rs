//! EXIF Error Types

use std::fmt;

use super::tag::ExifTag;
use super::types::ExifDataType;

/// Errors that can occur when reading or editing EXIF profiles
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExifError {
    /// Data is too small to contain a TIFF header or IFD0 entry count
    TooSmall { expected: usize, actual: usize },
    /// Byte order mark is neither `II` nor `MM`
    InvalidByteOrder([u8; 2]),
    /// TIFF magic number is not 42
    InvalidMagic(u16),
    /// IFD0 offset points outside the data
    DirectoryOutOfBounds { offset: u32, len: usize },
    /// Supplied value does not fit the declared data type of the tag
    TypeMismatch {
        tag: ExifTag,
        expected: ExifDataType,
    },
    /// Pointer and thumbnail-location tags are managed by the writer
    StructuralTag(ExifTag),
}

impl ExifError {
    /// True for errors that make the whole buffer unusable
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::TypeMismatch { .. } | Self::StructuralTag(_))
    }
}

impl fmt::Display for ExifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { expected, actual } => {
                write!(
                    f,
                    "EXIF data too small: expected at least {} bytes, got {}",
                    expected, actual
                )
            }
            Self::InvalidByteOrder(mark) => {
                write!(
                    f,
                    "Invalid byte order mark: 0x{:02X}{:02X} (expected 'II' or 'MM')",
                    mark[0], mark[1]
                )
            }
            Self::InvalidMagic(magic) => {
                write!(f, "Invalid TIFF magic number: {} (expected 42)", magic)
            }
            Self::DirectoryOutOfBounds { offset, len } => {
                write!(
                    f,
                    "IFD0 at offset {} is outside the {} byte buffer",
                    offset, len
                )
            }
            Self::TypeMismatch { tag, expected } => {
                write!(
                    f,
                    "Value for tag {} does not fit declared type {:?}",
                    tag, expected
                )
            }
            Self::StructuralTag(tag) => {
                write!(f, "Tag {} is regenerated on write and cannot be set", tag)
            }
        }
    }
}

impl std::error::Error for ExifError {}
