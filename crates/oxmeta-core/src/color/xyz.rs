//! CIE XYZ Color Space
//!
//! ICC profiles store colorants, white points and the PCS illuminant as XYZ.

/// CIE 1931 XYZ tristimulus values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    /// Luminance
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// XYZ from xyY chromaticity coordinates; black for y = 0
    pub fn from_xyy(x: f64, y: f64, big_y: f64) -> Self {
        if y > 0.0 {
            Self::new(x * big_y / y, big_y, (1.0 - x - y) * big_y / y)
        } else {
            Self::default()
        }
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl From<[f64; 3]> for Xyz {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xyy() {
        // D65 chromaticity at unit luminance
        let white = Xyz::from_xyy(0.3127, 0.3290, 1.0);
        assert!(white.approx_eq(&Xyz::new(0.95046, 1.0, 1.08906), 1e-4));
    }

    #[test]
    fn test_from_xyy_zero_y() {
        assert_eq!(Xyz::from_xyy(0.3, 0.0, 1.0), Xyz::default());
    }
}
