//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.
//!
//! Parsing is lenient: unrecognised class, color space and intent values are
//! kept as raw numbers so that malformed profiles still load. Use
//! [`IccHeader::validate`] for the strict checks.

use super::error::IccError;
use super::types::{DateTimeNumber, XyzNumber};

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header size in bytes
pub const HEADER_SIZE: usize = 128;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version (major.minor.patch)
    pub version: ProfileVersion,
    /// Device class (display, input, output, etc.)
    pub device_class: ProfileClass,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    pub creation_date: DateTimeNumber,
    /// Profile file signature (must be 'acsp')
    pub signature: u32,
    /// Primary platform signature
    pub platform: u32,
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    pub attributes: u64,
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl IccHeader {
    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let Some(h) = data.get(..HEADER_SIZE) else {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        };
        let u32_at = |i: usize| u32::from_be_bytes([h[i], h[i + 1], h[i + 2], h[i + 3]]);

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&h[84..100]);

        Ok(Self {
            size: u32_at(0),
            cmm_type: u32_at(4),
            version: ProfileVersion {
                major: h[8],
                minor: h[9] >> 4,
                patch: h[9] & 0x0F,
            },
            device_class: ProfileClass::from_u32(u32_at(12)),
            color_space: ColorSpace::from_u32(u32_at(16)),
            pcs: ColorSpace::from_u32(u32_at(20)),
            creation_date: DateTimeNumber::from_bytes(&h[24..36]).unwrap_or_default(),
            signature: u32_at(36),
            platform: u32_at(40),
            flags: u32_at(44),
            manufacturer: u32_at(48),
            model: u32_at(52),
            attributes: u64::from_be_bytes([
                h[56], h[57], h[58], h[59], h[60], h[61], h[62], h[63],
            ]),
            rendering_intent: RenderingIntent::from_u32(u32_at(64)),
            illuminant: XyzNumber::from_bytes(&h[68..80]).unwrap_or_default(),
            creator: u32_at(80),
            profile_id,
        })
    }

    /// Encode into the 128-byte header layout; reserved bytes are zero
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut put = |i: usize, v: u32| out[i..i + 4].copy_from_slice(&v.to_be_bytes());
        put(0, self.size);
        put(4, self.cmm_type);
        put(12, self.device_class.to_u32());
        put(16, self.color_space.to_u32());
        put(20, self.pcs.to_u32());
        put(36, self.signature);
        put(40, self.platform);
        put(44, self.flags);
        put(48, self.manufacturer);
        put(52, self.model);
        put(64, self.rendering_intent.to_u32());
        put(80, self.creator);
        out[8] = self.version.major;
        out[9] = (self.version.minor << 4) | (self.version.patch & 0x0F);
        out[24..36].copy_from_slice(&self.creation_date.to_bytes());
        out[56..64].copy_from_slice(&self.attributes.to_be_bytes());
        out[68..80].copy_from_slice(&self.illuminant.to_bytes());
        out[84..100].copy_from_slice(&self.profile_id);
        out
    }

    /// Strict checks: 'acsp' signature and a declared size that fits the data
    pub fn validate(&self, data_len: usize) -> Result<(), IccError> {
        if self.signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(self.signature));
        }

        if self.size as usize > data_len {
            return Err(IccError::SizeMismatch {
                header_size: self.size,
                actual_size: data_len,
            });
        }

        Ok(())
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    pub const V4_3: Self = Self {
        major: 4,
        minor: 3,
        patch: 0,
    };

    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

/// Some writers pad signatures with NUL instead of space ("RGB\0")
fn normalize_signature(val: u32) -> [u8; 4] {
    val.to_be_bytes().map(|b| if b == 0 { b' ' } else { b })
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    Abstract,
    NamedColor,
    /// Unrecognised signature, kept as read
    Unknown(u32),
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Self {
        match &normalize_signature(val) {
            b"scnr" => Self::Input,
            b"mntr" => Self::Display,
            b"prtr" => Self::Output,
            b"link" => Self::DeviceLink,
            b"spac" => Self::ColorSpace,
            b"abst" => Self::Abstract,
            b"nmcl" => Self::NamedColor,
            _ => Self::Unknown(val),
        }
    }

    pub fn to_u32(self) -> u32 {
        let sig = match self {
            Self::Input => b"scnr",
            Self::Display => b"mntr",
            Self::Output => b"prtr",
            Self::DeviceLink => b"link",
            Self::ColorSpace => b"spac",
            Self::Abstract => b"abst",
            Self::NamedColor => b"nmcl",
            Self::Unknown(val) => return val,
        };
        u32::from_be_bytes(*sig)
    }
}

/// ICC Color Space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    /// n-color spaces (2CLR .. FCLR), carrying n
    Color(u8),
    /// Unrecognised signature, kept as read
    Unknown(u32),
}

impl ColorSpace {
    pub fn from_u32(val: u32) -> Self {
        match &normalize_signature(val) {
            b"XYZ " => Self::Xyz,
            b"Lab " => Self::Lab,
            b"Luv " => Self::Luv,
            b"YCbr" => Self::YCbCr,
            b"Yxy " => Self::Yxy,
            b"RGB " => Self::Rgb,
            b"GRAY" => Self::Gray,
            b"HSV " => Self::Hsv,
            b"HLS " => Self::Hls,
            b"CMYK" => Self::Cmyk,
            b"CMY " => Self::Cmy,
            [n, b'C', b'L', b'R'] => match char::from(*n).to_digit(16) {
                Some(count @ 2..=15) => Self::Color(count as u8),
                _ => Self::Unknown(val),
            },
            _ => Self::Unknown(val),
        }
    }

    pub fn to_u32(self) -> u32 {
        let sig = match self {
            Self::Xyz => *b"XYZ ",
            Self::Lab => *b"Lab ",
            Self::Luv => *b"Luv ",
            Self::YCbCr => *b"YCbr",
            Self::Yxy => *b"Yxy ",
            Self::Rgb => *b"RGB ",
            Self::Gray => *b"GRAY",
            Self::Hsv => *b"HSV ",
            Self::Hls => *b"HLS ",
            Self::Cmyk => *b"CMYK",
            Self::Cmy => *b"CMY ",
            Self::Color(n) => {
                let digit = char::from_digit(n as u32, 16)
                    .map_or(b'?', |c| c.to_ascii_uppercase() as u8);
                [digit, b'C', b'L', b'R']
            }
            Self::Unknown(val) => return val,
        };
        u32::from_be_bytes(sig)
    }

    /// Number of channels, if known
    pub fn channels(self) -> Option<usize> {
        match self {
            Self::Gray => Some(1),
            Self::Xyz
            | Self::Lab
            | Self::Luv
            | Self::YCbCr
            | Self::Yxy
            | Self::Rgb
            | Self::Hsv
            | Self::Hls
            | Self::Cmy => Some(3),
            Self::Cmyk => Some(4),
            Self::Color(n) => Some(n as usize),
            Self::Unknown(_) => None,
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    #[default]
    Perceptual,
    RelativeColorimetric,
    Saturation,
    AbsoluteColorimetric,
    /// Out-of-range value, kept as read
    Unknown(u32),
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Self {
        match val {
            0 => Self::Perceptual,
            1 => Self::RelativeColorimetric,
            2 => Self::Saturation,
            3 => Self::AbsoluteColorimetric,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
            Self::Unknown(val) => val,
        }
    }
}
