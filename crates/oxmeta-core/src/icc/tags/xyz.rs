//! XYZ Tag Type
//!
//! The XYZType contains an array of XYZ values. Used for colorant tags,
//! white point, black point, etc.
//!
//! See ICC.1:2022 Section 10.31

use crate::color::Xyz;
use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, XyzNumber};

/// XYZ tag data - contains one or more XYZ values
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTagData {
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    pub fn new(xyz: Xyz) -> Self {
        Self {
            values: vec![XyzNumber::from_xyz(xyz)],
        }
    }

    /// Parse XYZ data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let values: Vec<_> = data
            .chunks_exact(12)
            .filter_map(XyzNumber::from_bytes)
            .collect();

        if values.is_empty() {
            return Err(IccError::corrupted(TypeSignature::XYZ.0, "no XYZ values"));
        }

        Ok(Self { values })
    }

    pub(crate) fn encode_body(&self, out: &mut Vec<u8>) {
        for v in &self.values {
            out.extend_from_slice(&v.to_bytes());
        }
    }

    /// The first XYZ value
    pub fn to_xyz(&self) -> Option<Xyz> {
        self.values.first().map(|v| v.to_xyz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xyz_tag() {
        // D50 white point
        let data: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642 (approximately)
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249 (approximately)
        ];

        let tag = XyzTagData::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 1);
        assert!((tag.to_xyz().unwrap().y - 1.0).abs() < 0.001);

        let mut body = Vec::new();
        tag.encode_body(&mut body);
        assert_eq!(body, data);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = vec![0u8; 24];
        data.extend_from_slice(&[1, 2, 3]);
        assert_eq!(XyzTagData::parse(&data).unwrap().values.len(), 2);
    }

    #[test]
    fn test_parse_xyz_too_small() {
        assert!(XyzTagData::parse(&[0u8; 4]).is_err());
    }
}
