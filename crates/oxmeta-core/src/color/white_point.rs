//! White Points
//!
//! D50 is the ICC profile connection space illuminant, encoded exactly as
//! the header and `wtpt` tags of v4 profiles carry it.

use crate::color::Xyz;

/// CIE xy chromaticity coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
}

impl Chromaticity {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// XYZ at unit luminance
    pub fn to_xyz(self) -> Xyz {
        Xyz::from_xyy(self.x, self.y, 1.0)
    }
}

/// A named white point (Y normalized to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    pub name: &'static str,
    pub xyz: Xyz,
}

impl WhitePoint {
    pub const fn new(name: &'static str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name,
            xyz: Xyz::new(x, y, z),
        }
    }

    /// White point from xy chromaticity
    pub fn from_chromaticity(name: &'static str, xy: Chromaticity) -> Self {
        Self {
            name,
            xyz: xy.to_xyz(),
        }
    }
}

/// ICC PCS illuminant (ICC.1:2022 7.2.16)
pub const D50: WhitePoint = WhitePoint::new("D50", 0.9642, 1.0, 0.8249);

/// CIE D65, as tabulated
pub const D65: WhitePoint = WhitePoint::new("D65", 0.95047, 1.0, 1.08883);
