//! Reference implementation wrappers
//!
//! Provides unified interfaces to the reference EXIF reader and CMSs.

use anyhow::{Context as _, anyhow};
use oxmeta_core::exif::{EXIF_PREFIX, ExifData, ExifIfd, ExifTag};

/// EXIF payload reduced to what both readers agree on
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Unsigned(Vec<u32>),
    Ascii(String),
    Rationals(Vec<(u32, u32)>),
    Bytes(Vec<u8>),
    /// Kinds not compared
    Other,
}

/// One field as kamadak-exif reads it
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceField {
    pub ifd: ExifIfd,
    pub tag: u16,
    pub value: Normalized,
}

/// Read an EXIF block with kamadak-exif, with or without `Exif\0\0`
pub fn kamadak_read(data: &[u8]) -> anyhow::Result<exif::Exif> {
    let tiff = data.strip_prefix(&EXIF_PREFIX[..]).unwrap_or(data);
    exif::Reader::new()
        .read_raw(tiff.to_vec())
        .context("kamadak-exif rejected the block")
}

/// Non-structural fields of a kamadak-exif parse
pub fn kamadak_fields(exif: &exif::Exif) -> Vec<ReferenceField> {
    exif.fields()
        .filter(|f| !ExifTag(f.tag.number()).is_structural())
        .filter_map(|f| {
            let ifd = match (f.tag.context(), f.ifd_num) {
                (exif::Context::Tiff, exif::In::PRIMARY) => ExifIfd::Primary,
                (exif::Context::Tiff, exif::In::THUMBNAIL) => ExifIfd::Thumbnail,
                (exif::Context::Exif, _) => ExifIfd::Exif,
                (exif::Context::Gps, _) => ExifIfd::Gps,
                (exif::Context::Interop, _) => ExifIfd::Interop,
                _ => return None,
            };
            Some(ReferenceField {
                ifd,
                tag: f.tag.number(),
                value: normalize_kamadak(&f.value),
            })
        })
        .collect()
}

pub fn normalize_kamadak(value: &exif::Value) -> Normalized {
    use exif::Value;
    match value {
        Value::Byte(v) => Normalized::Unsigned(v.iter().map(|&x| x as u32).collect()),
        Value::Short(v) => Normalized::Unsigned(v.iter().map(|&x| x as u32).collect()),
        Value::Long(v) => Normalized::Unsigned(v.clone()),
        Value::Ascii(parts) => Normalized::Ascii(
            parts
                .first()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .unwrap_or_default(),
        ),
        Value::Rational(v) => Normalized::Rationals(v.iter().map(|r| (r.num, r.denom)).collect()),
        Value::Undefined(bytes, _) => Normalized::Bytes(bytes.clone()),
        _ => Normalized::Other,
    }
}

pub fn normalize_oxmeta(data: &ExifData) -> Normalized {
    match data {
        ExifData::Byte(v) => Normalized::Unsigned(v.iter().map(|&x| x as u32).collect()),
        ExifData::Short(v) => Normalized::Unsigned(v.iter().map(|&x| x as u32).collect()),
        ExifData::Long(v) => Normalized::Unsigned(v.clone()),
        ExifData::Ascii(_) => Normalized::Ascii(data.text().unwrap_or_default().into_owned()),
        ExifData::Rational(v) => {
            Normalized::Rationals(v.iter().map(|r| (r.numerator, r.denominator)).collect())
        }
        ExifData::Undefined(v) => Normalized::Bytes(v.clone()),
        _ => Normalized::Other,
    }
}

/// Profile description as lcms2 reads it
pub fn lcms2_description(icc: &[u8]) -> anyhow::Result<Option<String>> {
    let profile = lcms2::Profile::new_icc(icc).context("lcms2 profile")?;
    Ok(profile.info(lcms2::InfoType::Description, lcms2::Locale::none()))
}

pub fn lcms2_copyright(icc: &[u8]) -> anyhow::Result<Option<String>> {
    let profile = lcms2::Profile::new_icc(icc).context("lcms2 profile")?;
    Ok(profile.info(lcms2::InfoType::Copyright, lcms2::Locale::none()))
}

/// Transform RGB pixels from `src` to lcms2's built-in sRGB
pub fn transform_lcms2_to_srgb(src: &[u8], pixels: &[[u8; 3]]) -> anyhow::Result<Vec<[u8; 3]>> {
    use lcms2::{Intent, PixelFormat, Profile, Transform};

    let src_profile = Profile::new_icc(src).context("lcms2 src profile")?;
    let dst_profile = Profile::new_srgb();

    let transform = Transform::new(
        &src_profile,
        PixelFormat::RGB_8,
        &dst_profile,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .context("lcms2 transform")?;

    let mut out = vec![[0u8; 3]; pixels.len()];
    transform.transform_pixels(pixels, &mut out);
    Ok(out)
}

/// Transform RGB pixels from `src` to moxcms' built-in sRGB
pub fn transform_moxcms_to_srgb(src: &[u8], pixels: &[u8]) -> anyhow::Result<Vec<u8>> {
    use moxcms::{ColorProfile, Layout, TransformOptions};

    let src_profile = ColorProfile::new_from_slice(src)
        .map_err(|e| anyhow!("moxcms src profile: {:?}", e))?;
    let dst_profile = ColorProfile::new_srgb();

    let transform = src_profile
        .create_transform_8bit(
            Layout::Rgb,
            &dst_profile,
            Layout::Rgb,
            TransformOptions::default(),
        )
        .map_err(|e| anyhow!("moxcms transform: {:?}", e))?;

    let mut out = vec![0u8; pixels.len()];
    transform
        .transform(pixels, &mut out)
        .map_err(|e| anyhow!("moxcms execute: {:?}", e))?;
    Ok(out)
}

/// Transform RGB pixels from `src` to qcms' built-in sRGB
pub fn transform_qcms_to_srgb(src: &[u8], pixels: &[u8]) -> anyhow::Result<Vec<u8>> {
    let src_profile =
        qcms::Profile::new_from_slice(src, false).ok_or_else(|| anyhow!("qcms rejected profile"))?;
    let dst_profile = qcms::Profile::new_sRGB();

    let transform = qcms::Transform::new(
        &src_profile,
        &dst_profile,
        qcms::DataType::RGB8,
        qcms::Intent::Perceptual,
    )
    .ok_or_else(|| anyhow!("qcms transform"))?;

    let mut out = pixels.to_vec();
    transform.apply(&mut out);
    Ok(out)
}

/// Largest per-channel difference between two RGB8 buffers
pub fn max_channel_diff(a: &[u8], b: &[u8]) -> u8 {
    a.iter().zip(b).map(|(&x, &y)| x.abs_diff(y)).max().unwrap_or(0)
}
