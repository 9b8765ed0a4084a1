//! Bounds safety under truncation and seeded corruption
//!
//! Neither parser may panic on any input. Whatever parses must serialize,
//! and a modified serialization must parse again. Decoded data stays within
//! a small multiple of the input size.

use meta_tests::corrupt::{mutate, truncations};
use meta_tests::fixtures::camera_exif;
use oxmeta_core::exif::{ExifProfile, ExifTag};
use oxmeta_core::icc::{ColorProfile, TagData};
use rayon::prelude::*;

const SEEDS: u64 = 2000;

fn decoded_exif_bytes(profile: &ExifProfile) -> usize {
    let order = profile.byte_order();
    profile.values().map(|v| v.data().encode(order).len()).sum()
}

fn decoded_icc_bytes(profile: &ColorProfile) -> usize {
    profile
        .tags()
        .map(|(_, tag)| match tag {
            TagData::Unknown { data, .. } => data.len(),
            other => other.encode().len(),
        })
        .sum()
}

/// Little-endian IFD0 whose `entries` Undefined values all cover the same
/// `region` bytes
fn overlapping_exif(entries: u16, region: usize) -> Vec<u8> {
    let table_end = 8 + 2 + entries as usize * 12 + 4;
    let mut data = b"II*\0".to_vec();
    data.extend_from_slice(&8u32.to_le_bytes());
    data.extend_from_slice(&entries.to_le_bytes());
    for i in 0..entries {
        data.extend_from_slice(&(0xC000 + i).to_le_bytes());
        data.extend_from_slice(&7u16.to_le_bytes());
        data.extend_from_slice(&(region as u32).to_le_bytes());
        data.extend_from_slice(&(table_end as u32).to_le_bytes());
    }
    data.extend_from_slice(&0u32.to_le_bytes());
    data.resize(table_end + region, 0x5A);
    data
}

/// ICC profile whose `entries` tags all cover the same `region` bytes
fn overlapping_icc(entries: u32, region: usize) -> Vec<u8> {
    let table_end = 132 + entries as usize * 12;
    let mut data = vec![0u8; 128];
    data[36..40].copy_from_slice(b"acsp");
    data.extend_from_slice(&entries.to_be_bytes());
    for i in 0..entries {
        data.extend_from_slice(&(0x7A7A_0000 + i).to_be_bytes());
        data.extend_from_slice(&(table_end as u32).to_be_bytes());
        data.extend_from_slice(&(region as u32).to_be_bytes());
    }
    data.extend_from_slice(b"zzzz");
    data.resize(table_end + region, 0x5A);
    let size = data.len() as u32;
    data[..4].copy_from_slice(&size.to_be_bytes());
    data
}

fn exercise_exif(data: &[u8]) {
    let Ok(profile) = ExifProfile::from_bytes(data) else {
        return;
    };
    assert_eq!(profile.to_byte_array(), data);
    // Out-of-line payloads are capped at twice the input; inline ones take
    // at most 4 of every 12 entry bytes in each of the five directories
    assert!(decoded_exif_bytes(&profile) <= data.len() * 4);
    for value in profile.values() {
        let _ = value.string_value();
    }

    let mut modified = profile.clone();
    // A corrupted entry may have claimed the tag with a non-text type
    if modified.set_value(ExifTag::SOFTWARE, "fuzz").is_err() {
        return;
    }
    let out = modified.to_byte_array();
    let reparsed = ExifProfile::from_bytes(&out).unwrap();
    assert_eq!(reparsed.get_value(ExifTag::SOFTWARE).unwrap().as_str(), Some("fuzz"));
}

fn exercise_icc(data: &[u8]) {
    let Ok(profile) = ColorProfile::from_bytes(data) else {
        return;
    };
    assert_eq!(profile.to_byte_array(), data);
    let _ = profile.description();
    let _ = profile.copyright();
    let _ = profile.validate();

    let mut modified = profile.clone();
    modified.set_copyright("fuzz");
    let reparsed = ColorProfile::from_bytes(&modified.to_byte_array()).unwrap();
    assert_eq!(reparsed.copyright(), Some("fuzz"));
    assert_eq!(reparsed.tag_count(), modified.tag_count());
}

#[test]
fn test_exif_truncations() {
    let data = camera_exif(false);
    let mut parsed = 0;
    for prefix in truncations(&data) {
        if ExifProfile::from_bytes(prefix).is_ok() {
            parsed += 1;
        }
        exercise_exif(prefix);
    }
    // Everything from the IFD0 entry count onwards yields a partial profile
    assert!(parsed > data.len() / 2, "only {} prefixes parsed", parsed);
}

#[test]
fn test_exif_truncation_drops_values_not_profile() {
    let data = camera_exif(true);
    let full = ExifProfile::from_bytes(&data).unwrap();
    let half = ExifProfile::from_bytes(&data[..data.len() / 2]).unwrap();
    assert!(half.len() < full.len());
    for value in half.values() {
        assert_eq!(full.get_value_in(value.ifd(), value.tag()), Some(value));
    }
}

#[test]
fn test_exif_seeded_corruption() {
    let fixtures = [camera_exif(false), camera_exif(true)];
    (0..SEEDS).into_par_iter().for_each(|seed| {
        for data in &fixtures {
            exercise_exif(&mutate(data, seed));
        }
    });
}

#[test]
fn test_exif_overlapping_payloads_stay_bounded() {
    let data = overlapping_exif(4000, 64 * 1024);
    let profile = ExifProfile::from_bytes(&data).unwrap();
    let decoded = decoded_exif_bytes(&profile);
    assert!(!profile.is_empty());
    assert!(
        decoded <= data.len() * 3,
        "input={} bytes decoded={} bytes",
        data.len(),
        decoded
    );
}

#[test]
fn test_icc_overlapping_tags_stay_bounded() {
    let data = overlapping_icc(4000, 64 * 1024);
    let profile = ColorProfile::from_bytes(&data).unwrap();
    let decoded = decoded_icc_bytes(&profile);
    assert!(profile.tag_count() > 0);
    assert!(
        decoded <= data.len() * 8,
        "input={} bytes decoded={} bytes",
        data.len(),
        decoded
    );
    assert_eq!(profile.to_byte_array(), data);
}

#[test]
fn test_icc_truncations() {
    let data = ColorProfile::srgb().to_byte_array();
    for prefix in truncations(&data) {
        let result = ColorProfile::from_bytes(prefix);
        assert_eq!(result.is_ok(), prefix.len() >= 132, "len {}", prefix.len());
        exercise_icc(prefix);
    }
}

#[test]
fn test_icc_seeded_corruption() {
    let fixtures = [
        ColorProfile::srgb().to_byte_array(),
        ColorProfile::apple_rgb().to_byte_array(),
        lcms2::Profile::new_srgb().icc().unwrap(),
    ];
    (0..SEEDS).into_par_iter().for_each(|seed| {
        for data in &fixtures {
            exercise_icc(&mutate(data, seed));
        }
    });
}
