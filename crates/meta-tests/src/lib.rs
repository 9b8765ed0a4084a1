//! # meta-tests
//!
//! Cross-implementation parity testing for oxmeta.
//!
//! This crate provides:
//! - An independent TIFF/EXIF block builder for fixtures
//! - JSON tag dumps for comparing profiles across round trips
//! - Wrappers around the reference implementations
//! - Seeded corruption of valid blocks
//!
//! ## Reference Implementations
//!
//! - **kamadak-exif**: pure Rust EXIF reader
//! - **lcms2**: industry standard CMS, strict ICC parser
//! - **moxcms**: pure Rust CMS
//! - **qcms**: Firefox's CMS (pure Rust)

pub mod corrupt;
pub mod dump;
pub mod fixtures;
pub mod reference;

pub use dump::{TagDump, dump_exif};
pub use fixtures::TiffBuilder;
