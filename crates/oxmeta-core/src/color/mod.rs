//! Color primitives
//!
//! - CIE XYZ tristimulus values
//! - White points and chromaticity coordinates

pub mod white_point;
pub mod xyz;

pub use white_point::{Chromaticity, D50, D65, WhitePoint};
pub use xyz::Xyz;
