//! Curve Tag Types
//!
//! ICC profiles use curves for tone reproduction (TRC).
//! Two main types:
//! - curv: Simple gamma or lookup table
//! - para: Parametric curves with formula
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para)

use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature};

/// Curve tag data (curv type)
#[derive(Debug, Clone, PartialEq)]
pub enum CurveData {
    /// Identity curve (count = 0)
    Identity,
    /// Simple gamma, stored as u8Fixed8 (count = 1)
    Gamma(u16),
    /// Lookup table (count > 1)
    Table(Vec<u16>),
}

impl CurveData {
    /// Gamma curve, rounded to the nearest u8Fixed8 value
    pub fn gamma(g: f64) -> Self {
        Self::Gamma((g * 256.0).round().clamp(0.0, u16::MAX as f64) as u16)
    }

    /// Parse curve data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let corrupted = |reason: &'static str| IccError::corrupted(TypeSignature::CURVE.0, reason);
        let count_bytes = data.get(..4).ok_or_else(|| corrupted("missing entry count"))?;
        let count = u32::from_be_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]])
            as usize;

        let entries = count
            .checked_mul(2)
            .and_then(|len| data.get(4..len.checked_add(4)?))
            .ok_or_else(|| corrupted("curve table truncated"))?;
        let table: Vec<u16> = entries
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        Ok(match table.len() {
            0 => CurveData::Identity,
            1 => CurveData::Gamma(table[0]),
            _ => CurveData::Table(table),
        })
    }

    pub(crate) fn encode_body(&self, out: &mut Vec<u8>) {
        let entries: &[u16] = match self {
            CurveData::Identity => &[],
            CurveData::Gamma(g) => std::slice::from_ref(g),
            CurveData::Table(table) => table,
        };
        out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for v in entries {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    /// Gamma exponent for identity and gamma curves
    pub fn gamma_value(&self) -> Option<f64> {
        match self {
            CurveData::Identity => Some(1.0),
            CurveData::Gamma(g) => Some(*g as f64 / 256.0),
            CurveData::Table(_) => None,
        }
    }
}

/// ICC Parametric Curve Type
///
/// As defined in ICC.1:2022 Section 10.18
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricCurveType {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    CIE122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    IEC61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX (sRGB-like)
    IEC61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl ParametricCurveType {
    pub fn from_icc(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::CIE122),
            2 => Some(Self::IEC61966_3),
            3 => Some(Self::IEC61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn to_icc(self) -> u16 {
        match self {
            Self::Gamma => 0,
            Self::CIE122 => 1,
            Self::IEC61966_3 => 2,
            Self::IEC61966_2_1 => 3,
            Self::Full => 4,
        }
    }

    /// Number of parameters stored for this function type
    pub fn param_count(self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::CIE122 => 3,
            Self::IEC61966_3 => 4,
            Self::IEC61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// Parametric curve data (para type)
///
/// Parameters are kept in their fixed-point encoding, in the order
/// g, a, b, c, d, e, f.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricCurveData {
    pub curve_type: ParametricCurveType,
    pub params: Vec<S15Fixed16>,
}

impl ParametricCurveData {
    pub fn new(curve_type: ParametricCurveType, params: &[f64]) -> Self {
        Self {
            curve_type,
            params: params.iter().map(|&p| S15Fixed16::from_f64(p)).collect(),
        }
    }

    /// IEC 61966-2-1 (sRGB) transfer function
    pub fn srgb() -> Self {
        Self::new(
            ParametricCurveType::IEC61966_2_1,
            &[2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045],
        )
    }

    /// Parse parametric curve from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let corrupted = |reason: String| IccError::corrupted(TypeSignature::PARA.0, reason);
        let head = data
            .get(..4)
            .ok_or_else(|| corrupted("missing function type".to_string()))?;
        let func_type = u16::from_be_bytes([head[0], head[1]]);
        // Bytes 2-3 are reserved

        let curve_type = ParametricCurveType::from_icc(func_type)
            .ok_or_else(|| corrupted(format!("unknown function type {}", func_type)))?;

        let count = curve_type.param_count();
        let params = data
            .get(4..4 + count * 4)
            .ok_or_else(|| corrupted(format!("expected {} parameters", count)))?
            .chunks_exact(4)
            .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self { curve_type, params })
    }

    pub(crate) fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.curve_type.to_icc().to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        for p in &self.params {
            out.extend_from_slice(&p.to_be_bytes());
        }
    }

    /// Parameter `i` (0 = g) as f64
    pub fn param(&self, i: usize) -> Option<f64> {
        self.params.get(i).map(|p| p.to_f64())
    }
}
