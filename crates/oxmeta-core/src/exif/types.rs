//! EXIF Basic Types
//!
//! Byte order handling, TIFF data type codes and rational numbers.

use std::fmt;
use std::str::FromStr;

/// Byte order of a TIFF structure, declared by its `II`/`MM` mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// `II` (Intel)
    #[default]
    LittleEndian,
    /// `MM` (Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Detect the byte order from the first two bytes of a TIFF header
    pub fn from_mark(mark: [u8; 2]) -> Option<Self> {
        match &mark {
            b"II" => Some(Self::LittleEndian),
            b"MM" => Some(Self::BigEndian),
            _ => None,
        }
    }

    /// The two-byte mark for this byte order
    pub fn mark(self) -> [u8; 2] {
        match self {
            Self::LittleEndian => *b"II",
            Self::BigEndian => *b"MM",
        }
    }

    #[inline]
    pub fn u16_from(self, b: [u8; 2]) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes(b),
            Self::BigEndian => u16::from_be_bytes(b),
        }
    }

    #[inline]
    pub fn u32_from(self, b: [u8; 4]) -> u32 {
        match self {
            Self::LittleEndian => u32::from_le_bytes(b),
            Self::BigEndian => u32::from_be_bytes(b),
        }
    }

    #[inline]
    pub fn u64_from(self, b: [u8; 8]) -> u64 {
        match self {
            Self::LittleEndian => u64::from_le_bytes(b),
            Self::BigEndian => u64::from_be_bytes(b),
        }
    }

    #[inline]
    pub fn u16_bytes(self, v: u16) -> [u8; 2] {
        match self {
            Self::LittleEndian => v.to_le_bytes(),
            Self::BigEndian => v.to_be_bytes(),
        }
    }

    #[inline]
    pub fn u32_bytes(self, v: u32) -> [u8; 4] {
        match self {
            Self::LittleEndian => v.to_le_bytes(),
            Self::BigEndian => v.to_be_bytes(),
        }
    }

    #[inline]
    pub fn u64_bytes(self, v: u64) -> [u8; 8] {
        match self {
            Self::LittleEndian => v.to_le_bytes(),
            Self::BigEndian => v.to_be_bytes(),
        }
    }

    /// Read a u16 at `offset`, or None past the end of `data`
    pub fn read_u16(self, data: &[u8], offset: usize) -> Option<u16> {
        let b = data.get(offset..offset.checked_add(2)?)?;
        Some(self.u16_from([b[0], b[1]]))
    }

    /// Read a u32 at `offset`, or None past the end of `data`
    pub fn read_u32(self, data: &[u8], offset: usize) -> Option<u32> {
        let b = data.get(offset..offset.checked_add(4)?)?;
        Some(self.u32_from([b[0], b[1], b[2], b[3]]))
    }
}

/// TIFF/EXIF data type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifDataType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SignedByte,
    Undefined,
    SignedShort,
    SignedLong,
    SignedRational,
    Float,
    Double,
    /// A code outside the TIFF 6.0 set; payload is kept as opaque bytes
    Unknown(u16),
}

impl ExifDataType {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Byte,
            2 => Self::Ascii,
            3 => Self::Short,
            4 => Self::Long,
            5 => Self::Rational,
            6 => Self::SignedByte,
            7 => Self::Undefined,
            8 => Self::SignedShort,
            9 => Self::SignedLong,
            10 => Self::SignedRational,
            11 => Self::Float,
            12 => Self::Double,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::Byte => 1,
            Self::Ascii => 2,
            Self::Short => 3,
            Self::Long => 4,
            Self::Rational => 5,
            Self::SignedByte => 6,
            Self::Undefined => 7,
            Self::SignedShort => 8,
            Self::SignedLong => 9,
            Self::SignedRational => 10,
            Self::Float => 11,
            Self::Double => 12,
            Self::Unknown(code) => code,
        }
    }

    /// Size in bytes of a single element of this type
    ///
    /// The TIFF-EP IFD type (13) and the BigTIFF 8-byte types (16-18) are
    /// sized even though their payloads stay opaque. Any other unknown code
    /// counts as one byte per element.
    pub fn element_size(self) -> usize {
        match self {
            Self::Byte | Self::Ascii | Self::SignedByte | Self::Undefined => 1,
            Self::Short | Self::SignedShort => 2,
            Self::Long | Self::SignedLong | Self::Float | Self::Unknown(13) => 4,
            Self::Rational | Self::SignedRational | Self::Double => 8,
            Self::Unknown(16..=18) => 8,
            Self::Unknown(_) => 1,
        }
    }
}

/// Unsigned EXIF rational (numerator / denominator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Value as f64; a zero denominator yields NaN or infinity
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Rational {
    type Err = std::num::ParseIntError;

    /// Parse `"n/d"`, or a bare integer as `n/1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((n, d)) => Ok(Self::new(n.trim().parse()?, d.trim().parse()?)),
            None => Ok(Self::new(s.trim().parse()?, 1)),
        }
    }
}

/// Signed EXIF rational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignedRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SignedRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for SignedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for SignedRational {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((n, d)) => Ok(Self::new(n.trim().parse()?, d.trim().parse()?)),
            None => Ok(Self::new(s.trim().parse()?, 1)),
        }
    }
}
