//! kamadak-exif parity tests
//!
//! Every field kamadak-exif reads must be present in the oxmeta profile,
//! in the same directory and with the same value, both for fixtures and
//! for blocks oxmeta wrote itself.

use meta_tests::fixtures::{TINY_JPEG, camera_exif};
use meta_tests::reference::{
    Normalized, kamadak_fields, kamadak_read, normalize_kamadak, normalize_oxmeta,
};
use oxmeta_core::exif::{ExifIfd, ExifProfile, ExifTag, Rational};

fn assert_parity(data: &[u8]) {
    let profile = ExifProfile::from_bytes(data).unwrap();
    let reference = kamadak_read(data).unwrap();
    let fields = kamadak_fields(&reference);

    assert_eq!(
        fields.len(),
        profile.len(),
        "field count differs: kamadak {:?}",
        fields.iter().map(|f| (f.ifd, f.tag)).collect::<Vec<_>>()
    );

    for field in &fields {
        let ours = profile
            .get_value_in(field.ifd, ExifTag(field.tag))
            .unwrap_or_else(|| panic!("missing {:?} 0x{:04X}", field.ifd, field.tag));
        if field.value == Normalized::Other {
            continue;
        }
        assert_eq!(
            normalize_oxmeta(ours.data()),
            field.value,
            "{:?} 0x{:04X}",
            field.ifd,
            field.tag
        );
    }
}

#[test]
fn test_fixture_parity() {
    assert_parity(&camera_exif(false));
    assert_parity(&camera_exif(true));
}

#[test]
fn test_written_block_parity() {
    for big_endian in [false, true] {
        let mut profile = ExifProfile::from_bytes(&camera_exif(big_endian)).unwrap();
        profile.set_value(ExifTag::COPYRIGHT, "CC-BY 4.0").unwrap();
        profile.set_value(ExifTag::F_NUMBER, Rational::new(4, 1)).unwrap();
        profile
            .set_value(ExifTag::LENS_MODEL, "EF 24-70mm f/2.8L II USM")
            .unwrap();

        let out = profile.to_byte_array();
        assert_parity(&out);

        let reference = kamadak_read(&out).unwrap();
        assert_eq!(reference.little_endian(), !big_endian);
    }
}

#[test]
fn test_fresh_profile_parity() {
    let mut profile = ExifProfile::new();
    profile.set_value(ExifTag::MAKE, "Fujifilm").unwrap();
    profile.set_value(ExifTag::ORIENTATION, 8u16).unwrap();
    profile.set_value(ExifTag::GPS_LATITUDE_REF, "S").unwrap();
    profile
        .set_value_in(ExifIfd::Interop, ExifTag::INTEROPERABILITY_INDEX, "R98")
        .unwrap();
    profile
        .set_value(ExifTag::EXPOSURE_TIME, Rational::new(1, 60))
        .unwrap();

    let out = profile.to_byte_array();
    assert_parity(&out);

    let reference = kamadak_read(&out).unwrap();
    let interop = reference
        .get_field(exif::Tag::InteroperabilityIndex, exif::In::PRIMARY)
        .unwrap();
    assert_eq!(
        normalize_kamadak(&interop.value),
        Normalized::Ascii("R98".to_string())
    );
}

#[test]
fn test_thumbnail_location() {
    let mut profile = ExifProfile::from_bytes(&camera_exif(false)).unwrap();
    profile.set_value(ExifTag::ARTIST, "Someone").unwrap();
    let out = profile.to_byte_array();

    let reference = kamadak_read(&out).unwrap();
    let uint = |tag| {
        reference
            .get_field(tag, exif::In::THUMBNAIL)
            .and_then(|f| f.value.get_uint(0))
            .unwrap() as usize
    };
    let offset = uint(exif::Tag::JPEGInterchangeFormat);
    let length = uint(exif::Tag::JPEGInterchangeFormatLength);
    assert_eq!(&reference.buf()[offset..offset + length], TINY_JPEG);
}
