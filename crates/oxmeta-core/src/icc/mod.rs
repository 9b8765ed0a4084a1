//! ICC Profile Support
//!
//! Reads, edits and writes ICC profiles according to ICC.1:2022.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may be shared between tags)
//!
//! Text, XYZ, curve, sf32 and signature tags are decoded; every other tag
//! type is carried as raw bytes and written back unchanged.
//!
//! # Example
//!
//! ```
//! use oxmeta_core::icc::{ColorProfile, ColorSpace};
//!
//! let profile = ColorProfile::adobe_rgb_1998();
//! assert_eq!(profile.color_space(), ColorSpace::Rgb);
//! assert!(profile.copyright().is_some());
//! ```

pub mod header;
pub mod tags;

mod builtin;
mod error;
mod profile;
mod reader;
mod types;
mod writer;

pub use builtin::BUILTIN_NAMES;
pub use error::IccError;
pub use header::{ColorSpace, IccHeader, ProfileClass, ProfileVersion, RenderingIntent};
pub use profile::ColorProfile;
pub use tags::{CurveData, LocalizedString, ParametricCurveData, TagData, TextData};
pub use types::{DateTimeNumber, S15Fixed16, TagSignature, TypeSignature, XyzNumber};
