//! Common interface of the embedded metadata profiles

use crate::exif::ExifProfile;
use crate::icc::ColorProfile;

/// A metadata block an image encoder embeds as-is
pub trait ImageProfile: Send + Sync {
    /// Short name of the block, as image formats label it
    fn name(&self) -> &'static str;

    /// Encoded block, ready to embed
    fn to_byte_array(&self) -> Vec<u8>;
}

impl ImageProfile for ExifProfile {
    fn name(&self) -> &'static str {
        "exif"
    }

    fn to_byte_array(&self) -> Vec<u8> {
        ExifProfile::to_byte_array(self)
    }
}

impl ImageProfile for ColorProfile {
    fn name(&self) -> &'static str {
        "icc"
    }

    fn to_byte_array(&self) -> Vec<u8> {
        ColorProfile::to_byte_array(self)
    }
}
