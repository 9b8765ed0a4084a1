//! ICC Profile Tag Parsing
//!
//! Tags contain the actual profile data. Each tag has:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! Every variant of [`TagData`] can be encoded back into that layout.
//! Types this crate does not model are kept byte for byte.
//!
//! See ICC.1:2022 Section 9.

mod curves;
mod text;
mod xyz;

pub use curves::{CurveData, ParametricCurveData, ParametricCurveType};
pub use text::{LocalizedString, TextData};
pub use xyz::XyzTagData;

use super::error::IccError;
use super::types::{S15Fixed16, TypeSignature};

/// Parsed tag data
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    /// XYZ type data (colorants, white point)
    Xyz(XyzTagData),
    /// Curve type (TRC)
    Curve(CurveData),
    /// Parametric curve type
    ParametricCurve(ParametricCurveData),
    /// Plain ASCII text ('text')
    Text(TextData),
    /// v2 profile description ('desc')
    Description(TextData),
    /// Multi-localized Unicode text ('mluc')
    MultiLocalizedUnicode(TextData),
    /// s15Fixed16 array ('sf32'), e.g. the chromatic adaptation matrix
    S15Fixed16Array(Vec<S15Fixed16>),
    /// Signature ('sig '), e.g. the technology tag
    Signature(u32),
    /// Unknown, unsupported or undecodable tag; `data` is the whole tag
    Unknown { type_sig: u32, data: Vec<u8> },
}

impl TagData {
    /// Parse tag data from bytes, starting at the type signature
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let Some(head) = data.get(..8) else {
            let type_sig = data
                .get(..4)
                .map_or(0, |b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]));
            return Err(IccError::corrupted(type_sig, "tag data too small for header"));
        };

        let type_sig = TypeSignature(u32::from_be_bytes([head[0], head[1], head[2], head[3]]));
        // Bytes 4-7 are reserved (should be 0)
        let body = &data[8..];

        match type_sig {
            TypeSignature::XYZ => XyzTagData::parse(body).map(TagData::Xyz),
            TypeSignature::CURVE => CurveData::parse(body).map(TagData::Curve),
            TypeSignature::PARA => ParametricCurveData::parse(body).map(TagData::ParametricCurve),
            TypeSignature::TEXT => TextData::parse_text(body).map(TagData::Text),
            TypeSignature::DESC => TextData::parse_desc(body).map(TagData::Description),
            TypeSignature::MLUC => TextData::parse_mluc(body).map(TagData::MultiLocalizedUnicode),
            TypeSignature::SF32 => Ok(TagData::S15Fixed16Array(
                body.chunks_exact(4)
                    .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            )),
            TypeSignature::SIG => body
                .get(..4)
                .map(|b| TagData::Signature(u32::from_be_bytes([b[0], b[1], b[2], b[3]])))
                .ok_or_else(|| IccError::corrupted(type_sig.0, "signature missing")),
            _ => Ok(TagData::Unknown {
                type_sig: type_sig.0,
                data: data.to_vec(),
            }),
        }
    }

    /// Parse, falling back to [`TagData::Unknown`] when the payload does
    /// not decode as its declared type
    pub fn parse_lenient(data: &[u8]) -> Self {
        Self::parse(data).unwrap_or_else(|err| {
            log::debug!("keeping undecodable tag as raw bytes: {}", err);
            TagData::Unknown {
                type_sig: data
                    .get(..4)
                    .map_or(0, |b| u32::from_be_bytes([b[0], b[1], b[2], b[3]])),
                data: data.to_vec(),
            }
        })
    }

    pub fn type_signature(&self) -> TypeSignature {
        match self {
            TagData::Xyz(_) => TypeSignature::XYZ,
            TagData::Curve(_) => TypeSignature::CURVE,
            TagData::ParametricCurve(_) => TypeSignature::PARA,
            TagData::Text(_) => TypeSignature::TEXT,
            TagData::Description(_) => TypeSignature::DESC,
            TagData::MultiLocalizedUnicode(_) => TypeSignature::MLUC,
            TagData::S15Fixed16Array(_) => TypeSignature::SF32,
            TagData::Signature(_) => TypeSignature::SIG,
            TagData::Unknown { type_sig, .. } => TypeSignature(*type_sig),
        }
    }

    /// Encode the whole tag, type signature included
    pub fn encode(&self) -> Vec<u8> {
        if let TagData::Unknown { data, .. } = self {
            return data.clone();
        }

        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&self.type_signature().0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        match self {
            TagData::Xyz(xyz) => xyz.encode_body(&mut out),
            TagData::Curve(curve) => curve.encode_body(&mut out),
            TagData::ParametricCurve(curve) => curve.encode_body(&mut out),
            TagData::Text(text) => text.encode_text_body(&mut out),
            TagData::Description(text) => text.encode_desc_body(&mut out),
            TagData::MultiLocalizedUnicode(text) => text.encode_mluc_body(&mut out),
            TagData::S15Fixed16Array(values) => {
                for v in values {
                    out.extend_from_slice(&v.to_be_bytes());
                }
            }
            TagData::Signature(sig) => out.extend_from_slice(&sig.to_be_bytes()),
            TagData::Unknown { .. } => {}
        }
        out
    }

    pub fn as_xyz(&self) -> Option<&XyzTagData> {
        match self {
            TagData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&CurveData> {
        match self {
            TagData::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_parametric_curve(&self) -> Option<&ParametricCurveData> {
        match self {
            TagData::ParametricCurve(curve) => Some(curve),
            _ => None,
        }
    }

    /// Text of 'text', 'desc' and 'mluc' tags
    pub fn as_text(&self) -> Option<&TextData> {
        match self {
            TagData::Text(text) | TagData::Description(text) | TagData::MultiLocalizedUnicode(text) => {
                Some(text)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unknown_type() {
        let data = [
            b'u', b'n', b'k', b'n', // type sig "unkn"
            0, 0, 0, 0, // reserved
            1, 2, 3, 4, // payload
        ];

        let tag = TagData::parse(&data).unwrap();
        assert_eq!(
            tag,
            TagData::Unknown {
                type_sig: u32::from_be_bytes(*b"unkn"),
                data: data.to_vec(),
            }
        );
        assert_eq!(tag.encode(), data);
    }

    #[test]
    fn test_truncated_mluc_is_kept_raw() {
        let tag = TagData::parse_lenient(b"m");
        assert!(matches!(tag, TagData::Unknown { type_sig: 0, .. }));
        assert!(tag.as_text().is_none());

        let mut short = b"mluc\0\0\0\0".to_vec();
        short.push(1);
        let tag = TagData::parse_lenient(&short);
        assert_eq!(tag.type_signature(), TypeSignature::MLUC);
        assert!(tag.as_text().is_none());
    }

    #[test]
    fn test_encode_parses_back() {
        let tags = [
            TagData::Xyz(XyzTagData::new(crate::color::D50.xyz)),
            TagData::Curve(CurveData::gamma(1.8)),
            TagData::ParametricCurve(ParametricCurveData::srgb()),
            TagData::Text(TextData::new("Public Domain")),
            TagData::Description(TextData::new("Display")),
            TagData::MultiLocalizedUnicode(TextData::new("Display")),
            TagData::S15Fixed16Array(vec![S15Fixed16::ONE; 9]),
            TagData::Signature(u32::from_be_bytes(*b"CRT ")),
        ];
        for tag in tags {
            let parsed = TagData::parse(&tag.encode()).unwrap();
            assert_eq!(parsed.type_signature(), tag.type_signature());
            assert_eq!(parsed.encode(), tag.encode());
        }
    }

    #[test]
    fn test_text_accessor() {
        let mut data = b"text\0\0\0\0".to_vec();
        data.extend_from_slice(b"Copyright\0");
        let tag = TagData::parse(&data).unwrap();
        assert_eq!(tag.as_text().unwrap().text, "Copyright");
    }
}
