//! Built-in RGB Profiles
//!
//! Synthesized ICC v4.3 matrix/TRC display profiles. Colorants are derived
//! from each space's primaries and white point and Bradford-adapted to the
//! D50 connection space; the adaptation matrix is stored in 'chad'.
//!
//! Profiles are built on first use and shared through
//! [`ProfileCache::global`].

use std::sync::Arc;

use super::header::{
    ColorSpace, IccHeader, PROFILE_SIGNATURE, ProfileClass, ProfileVersion, RenderingIntent,
};
use super::profile::ColorProfile;
use super::tags::{CurveData, ParametricCurveData, TagData, TextData, XyzTagData};
use super::types::{DateTimeNumber, S15Fixed16, TagSignature, XyzNumber};
use crate::cache::ProfileCache;
use crate::color::{Chromaticity, D50, D65, WhitePoint};
use crate::error::{Error, Result};
use crate::math::{Matrix3x3, bradford_matrix, rgb_to_xyz_matrix};

const COPYRIGHT: &str = "No copyright, use freely";

#[derive(Debug, Clone, Copy)]
enum Trc {
    /// IEC 61966-2-1 parametric curve
    Srgb,
    /// u8Fixed8 gamma
    Gamma(u16),
}

#[derive(Debug, Clone, Copy)]
struct RgbSpace {
    name: &'static str,
    description: &'static str,
    primaries: [Chromaticity; 3],
    white: WhitePoint,
    trc: Trc,
}

const SRGB: RgbSpace = RgbSpace {
    name: "sRGB",
    description: "sRGB",
    primaries: [
        Chromaticity::new(0.64, 0.33),
        Chromaticity::new(0.30, 0.60),
        Chromaticity::new(0.15, 0.06),
    ],
    white: D65,
    trc: Trc::Srgb,
};

const ADOBE_RGB_1998: RgbSpace = RgbSpace {
    name: "AdobeRGB1998",
    description: "Adobe RGB (1998) compatible",
    primaries: [
        Chromaticity::new(0.64, 0.33),
        Chromaticity::new(0.21, 0.71),
        Chromaticity::new(0.15, 0.06),
    ],
    white: D65,
    // 2.19921875
    trc: Trc::Gamma(563),
};

const APPLE_RGB: RgbSpace = RgbSpace {
    name: "AppleRGB",
    description: "Apple RGB",
    primaries: [
        Chromaticity::new(0.625, 0.34),
        Chromaticity::new(0.28, 0.595),
        Chromaticity::new(0.155, 0.07),
    ],
    white: D65,
    trc: Trc::Gamma(0x01CD),
};

const COLOR_MATCH_RGB: RgbSpace = RgbSpace {
    name: "ColorMatchRGB",
    description: "ColorMatch RGB",
    primaries: [
        Chromaticity::new(0.630, 0.340),
        Chromaticity::new(0.295, 0.605),
        Chromaticity::new(0.150, 0.075),
    ],
    white: D50,
    trc: Trc::Gamma(0x01CD),
};

const BUILTINS: [RgbSpace; 4] = [SRGB, ADOBE_RGB_1998, APPLE_RGB, COLOR_MATCH_RGB];

/// Names accepted by [`ColorProfile::builtin`]
pub const BUILTIN_NAMES: [&str; 4] = [
    SRGB.name,
    ADOBE_RGB_1998.name,
    APPLE_RGB.name,
    COLOR_MATCH_RGB.name,
];

impl ColorProfile {
    /// sRGB IEC 61966-2.1
    pub fn srgb() -> Arc<ColorProfile> {
        cached(&SRGB)
    }

    /// A profile with the Adobe RGB (1998) primaries and gamma
    pub fn adobe_rgb_1998() -> Arc<ColorProfile> {
        cached(&ADOBE_RGB_1998)
    }

    pub fn apple_rgb() -> Arc<ColorProfile> {
        cached(&APPLE_RGB)
    }

    pub fn color_match_rgb() -> Arc<ColorProfile> {
        cached(&COLOR_MATCH_RGB)
    }

    /// Built-in profile by name, see [`BUILTIN_NAMES`]
    pub fn builtin(name: &str) -> Result<Arc<ColorProfile>> {
        BUILTINS
            .iter()
            .find(|space| space.name.eq_ignore_ascii_case(name))
            .map(cached)
            .ok_or_else(|| Error::Builtin {
                name: name.to_string(),
                reason: format!("expected one of {}", BUILTIN_NAMES.join(", ")),
            })
    }
}

fn cached(space: &RgbSpace) -> Arc<ColorProfile> {
    ProfileCache::global().get_or_insert_with(space.name, || synthesize(space))
}

fn synthesize(space: &RgbSpace) -> ColorProfile {
    log::debug!("synthesizing built-in profile '{}'", space.name);

    // Constant primaries and white points, never singular
    let adapt = bradford_matrix(&space.white, &D50).unwrap_or(Matrix3x3::IDENTITY);
    let to_xyz = rgb_to_xyz_matrix(space.primaries, &space.white).unwrap_or(Matrix3x3::IDENTITY);
    let colorants = adapt * to_xyz;

    let xyz_tag = |v: [f64; 3]| TagData::Xyz(XyzTagData::new(v.into()));
    let trc = match space.trc {
        Trc::Srgb => TagData::ParametricCurve(ParametricCurveData::srgb()),
        Trc::Gamma(g) => TagData::Curve(CurveData::Gamma(g)),
    };
    let chad = adapt
        .m
        .iter()
        .flatten()
        .map(|&v| S15Fixed16::from_f64(v))
        .collect();

    let tags = vec![
        (
            TagSignature::DESC,
            TagData::MultiLocalizedUnicode(TextData::new(space.description)),
        ),
        (
            TagSignature::COPYRIGHT,
            TagData::MultiLocalizedUnicode(TextData::new(COPYRIGHT)),
        ),
        (TagSignature::MEDIA_WHITE, xyz_tag(D50.xyz.to_array())),
        (TagSignature::CHAD, TagData::S15Fixed16Array(chad)),
        (TagSignature::RED_COLORANT, xyz_tag(colorants.column(0))),
        (TagSignature::GREEN_COLORANT, xyz_tag(colorants.column(1))),
        (TagSignature::BLUE_COLORANT, xyz_tag(colorants.column(2))),
        (TagSignature::RED_TRC, trc.clone()),
        (TagSignature::GREEN_TRC, trc.clone()),
        (TagSignature::BLUE_TRC, trc),
    ];

    ColorProfile::assemble(display_header(), tags)
}

fn display_header() -> IccHeader {
    IccHeader {
        size: 0,
        cmm_type: 0,
        version: ProfileVersion::V4_3,
        device_class: ProfileClass::Display,
        color_space: ColorSpace::Rgb,
        pcs: ColorSpace::Xyz,
        creation_date: DateTimeNumber::default(),
        signature: PROFILE_SIGNATURE,
        platform: 0,
        flags: 0,
        manufacturer: 0,
        model: 0,
        attributes: 0,
        rendering_intent: RenderingIntent::Perceptual,
        illuminant: XyzNumber::from_xyz(D50.xyz),
        creator: 0,
        profile_id: [0; 16],
    }
}
