//! ICC Profile Error Types

use std::fmt;

/// Errors that can occur when reading ICC profiles or their tags
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Profile data is too small for the header and tag count
    TooSmall { expected: usize, actual: usize },
    /// Invalid profile signature (should be 'acsp')
    InvalidSignature(u32),
    /// Profile size in header exceeds the data
    SizeMismatch {
        header_size: u32,
        actual_size: usize,
    },
    /// Tag payload could not be decoded as its declared type
    CorruptedTag { type_sig: u32, reason: String },
}

impl IccError {
    /// True for errors that make the whole buffer unusable
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::CorruptedTag { .. })
    }

    pub(crate) fn corrupted(type_sig: u32, reason: impl Into<String>) -> Self {
        Self::CorruptedTag {
            type_sig,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { expected, actual } => {
                write!(
                    f,
                    "Profile too small: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Self::InvalidSignature(sig) => {
                write!(
                    f,
                    "Invalid profile signature: 0x{:08X} (expected 'acsp')",
                    sig
                )
            }
            Self::SizeMismatch {
                header_size,
                actual_size,
            } => {
                write!(
                    f,
                    "Size mismatch: header says {} bytes, data is {} bytes",
                    header_size, actual_size
                )
            }
            Self::CorruptedTag { type_sig, reason } => {
                write!(f, "Corrupted '{}' tag: {}", fourcc(*type_sig), reason)
            }
        }
    }
}

impl std::error::Error for IccError {}

/// Printable form of a four character code
pub(crate) fn fourcc(sig: u32) -> String {
    sig.to_be_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect()
}
