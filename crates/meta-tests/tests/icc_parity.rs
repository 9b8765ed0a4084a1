//! ICC parity tests
//!
//! Built-in and edited profiles must load in lcms2, moxcms and qcms, and
//! transforms through them must match the references' own sRGB.

use meta_tests::reference::{
    lcms2_copyright, lcms2_description, max_channel_diff, transform_lcms2_to_srgb,
    transform_moxcms_to_srgb, transform_qcms_to_srgb,
};
use oxmeta_core::icc::{BUILTIN_NAMES, ColorProfile, TagSignature};

const TEST_COLORS: [[u8; 3]; 8] = [
    [0, 0, 0],
    [255, 255, 255],
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [128, 128, 128],
    [200, 100, 50],
    [17, 240, 96],
];

fn flat(colors: &[[u8; 3]]) -> Vec<u8> {
    colors.iter().flatten().copied().collect()
}

#[test]
fn test_builtins_load_in_references() {
    for name in BUILTIN_NAMES {
        let profile = ColorProfile::builtin(name).unwrap();
        let data = profile.to_byte_array();

        let description = lcms2_description(&data).unwrap();
        assert_eq!(description.as_deref(), profile.description(), "{}", name);
        assert!(
            moxcms::ColorProfile::new_from_slice(&data).is_ok(),
            "moxcms rejected {}",
            name
        );
        assert!(
            qcms::Profile::new_from_slice(&data, false).is_some(),
            "qcms rejected {}",
            name
        );
    }
}

#[test]
fn test_srgb_matches_reference_srgb() {
    let data = ColorProfile::srgb().to_byte_array();
    let pixels = flat(&TEST_COLORS);

    let mox = transform_moxcms_to_srgb(&data, &pixels).unwrap();
    let qcms = transform_qcms_to_srgb(&data, &pixels).unwrap();
    let lcms = flat(&transform_lcms2_to_srgb(&data, &TEST_COLORS).unwrap());

    eprintln!("\nsynthesized sRGB -> reference sRGB:");
    for (name, out) in [("moxcms", &mox), ("qcms", &qcms), ("lcms2", &lcms)] {
        let diff = max_channel_diff(&pixels, out);
        eprintln!("  {:<7} max diff {}", name, diff);
        assert!(diff <= 1, "{} sRGB transform not near identity: {:?}", name, out);
    }
}

#[test]
fn test_builtins_agree_across_references() {
    let pixels = flat(&TEST_COLORS);
    for name in BUILTIN_NAMES {
        let data = ColorProfile::builtin(name).unwrap().to_byte_array();
        let mox = transform_moxcms_to_srgb(&data, &pixels).unwrap();
        let lcms = flat(&transform_lcms2_to_srgb(&data, &TEST_COLORS).unwrap());
        let diff = max_channel_diff(&mox, &lcms);
        assert!(diff <= 2, "{}: moxcms {:?} vs lcms2 {:?}", name, mox, lcms);
    }
}

#[test]
fn test_edited_profile_keeps_colorimetry() {
    let original = ColorProfile::adobe_rgb_1998().to_byte_array();
    let mut edited = ColorProfile::from_bytes(&original).unwrap();
    edited.set_copyright("Edited copy");
    edited.set_description("Adobe RGB (1998) compatible, edited");
    let data = edited.to_byte_array();

    assert_eq!(lcms2_copyright(&data).unwrap().as_deref(), Some("Edited copy"));
    assert_eq!(
        lcms2_description(&data).unwrap().as_deref(),
        Some("Adobe RGB (1998) compatible, edited")
    );
    assert_eq!(
        transform_lcms2_to_srgb(&data, &TEST_COLORS).unwrap(),
        transform_lcms2_to_srgb(&original, &TEST_COLORS).unwrap()
    );
}

#[test]
fn test_reads_lcms2_profile() {
    let data = lcms2::Profile::new_srgb().icc().unwrap();
    let profile = ColorProfile::from_bytes(&data).unwrap();

    assert!(profile.validate().is_ok());
    assert_eq!(profile.to_byte_array(), data);
    assert_eq!(
        profile.description().map(str::to_string),
        lcms2_description(&data).unwrap()
    );
    assert!(profile.get_tag(TagSignature::RED_COLORANT).is_some());

    let mut edited = profile.clone();
    edited.set_copyright("Relabelled");
    let out = edited.to_byte_array();
    assert_eq!(lcms2_copyright(&out).unwrap().as_deref(), Some("Relabelled"));
    assert_eq!(
        transform_lcms2_to_srgb(&out, &TEST_COLORS).unwrap(),
        transform_lcms2_to_srgb(&data, &TEST_COLORS).unwrap()
    );
}

#[test]
fn test_removed_tag_is_gone_for_references() {
    let mut profile = ColorProfile::from_bytes(&ColorProfile::srgb().to_byte_array()).unwrap();
    assert!(profile.remove_tag(TagSignature::COPYRIGHT).is_some());
    let data = profile.to_byte_array();

    assert_eq!(lcms2_copyright(&data).unwrap(), None);
    assert!(moxcms::ColorProfile::new_from_slice(&data).is_ok());
}
