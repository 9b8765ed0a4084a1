//! EXIF Profile Support
//!
//! Reads and writes EXIF blocks: TIFF-structured tag directories as found in
//! the JPEG APP1 segment, optionally prefixed with `Exif\0\0`.
//!
//! # Structure
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────┐
//! │ "Exif\0\0"   │ TIFF header  │ IFD0 -> Exif -> Interop      │
//! │ (optional)   │ II/MM, 42    │      -> GPS                  │
//! │              │ IFD0 offset  │ IFD1 (thumbnail)             │
//! └──────────────┴──────────────┴──────────────────────────────┘
//! ```
//!
//! Each directory is a list of 12-byte entries (tag, type, count,
//! value-or-offset). Entries pointing outside the buffer are skipped rather
//! than failing the whole profile.
//!
//! # Example
//!
//! ```
//! use oxmeta_core::exif::{ExifProfile, ExifTag};
//!
//! let mut profile = ExifProfile::new();
//! profile.set_value(ExifTag::MAKE, "Canon").unwrap();
//! profile.set_value(ExifTag::ORIENTATION, 1u16).unwrap();
//!
//! let bytes = profile.to_byte_array();
//! let parsed = ExifProfile::from_bytes(&bytes).unwrap();
//! assert_eq!(parsed.get_value(ExifTag::MAKE).unwrap().as_str(), Some("Canon"));
//! ```

mod error;
mod profile;
mod reader;
mod tag;
mod types;
mod value;
mod writer;

pub use error::ExifError;
pub use profile::ExifProfile;
pub use reader::EXIF_PREFIX;
pub use tag::{ExifIfd, ExifTag, KNOWN_TAGS, TagInfo, TagShape};
pub use types::{ByteOrder, ExifDataType, Rational, SignedRational};
pub use value::{ExifData, ExifInput, ExifValue};
pub use writer::ExifParts;
