//! # oxmeta - EXIF and ICC metadata codec
//!
//! Reads, edits and re-serializes the metadata blocks image files embed:
//! EXIF tag directories and ICC color profiles.
//!
//! ## Goals
//!
//! - **Lossless**: an unmodified profile serializes to its input, byte for byte
//! - **Robust**: malformed entries are skipped, never panicked on
//! - **Typed**: values are checked against the tag's declared type on write
//!
//! ## Quick Start
//!
//! ```
//! use oxmeta_core::exif::{ExifProfile, ExifTag, Rational};
//! use oxmeta_core::icc::ColorProfile;
//!
//! let mut exif = ExifProfile::new();
//! exif.set_value(ExifTag::X_RESOLUTION, Rational::new(300, 1))?;
//! let block = exif.to_byte_array();
//! assert!(block.starts_with(b"Exif\0\0"));
//!
//! let srgb = ColorProfile::srgb();
//! assert_eq!(srgb.description(), Some("sRGB"));
//! # Ok::<(), oxmeta_core::Error>(())
//! ```

pub mod cache;
pub mod color;
pub mod error;
pub mod exif;
pub mod icc;
pub mod math;
pub mod profile;

pub use cache::ProfileCache;
pub use error::{Error, Result};
pub use exif::{ExifProfile, ExifTag, ExifValue};
pub use icc::ColorProfile;
pub use profile::ImageProfile;

/// Version of oxmeta
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
