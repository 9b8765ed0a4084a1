//! EXIF Profile Container

use super::error::ExifError;
use super::reader::ExifReader;
use super::tag::{ExifIfd, ExifTag};
use super::types::{ByteOrder, ExifDataType};
use super::value::{ExifInput, ExifValue};
use super::writer::{ExifParts, ExifWriter};

/// An EXIF profile: the source buffer plus its decoded values
///
/// Values are kept in the order they were read or inserted. Until the
/// profile is modified, [`ExifProfile::to_byte_array`] hands back the
/// source bytes unchanged.
#[derive(Debug, Clone)]
pub struct ExifProfile {
    data: Option<Vec<u8>>,
    order: ByteOrder,
    has_prefix: bool,
    values: Vec<ExifValue>,
    thumbnail: Option<Vec<u8>>,
    parts: ExifParts,
    modified: bool,
}

impl Default for ExifProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl ExifProfile {
    /// Empty little-endian profile
    pub fn new() -> Self {
        Self::with_byte_order(ByteOrder::default())
    }

    /// Empty profile written with the given byte order
    pub fn with_byte_order(order: ByteOrder) -> Self {
        Self {
            data: None,
            order,
            has_prefix: true,
            values: Vec::new(),
            thumbnail: None,
            parts: ExifParts::default(),
            modified: false,
        }
    }

    /// Parse an EXIF block, with or without the `Exif\0\0` prefix
    pub fn from_bytes(data: &[u8]) -> Result<Self, ExifError> {
        let contents = ExifReader::read(data)?;
        Ok(Self {
            data: Some(data.to_vec()),
            order: contents.order,
            has_prefix: contents.has_prefix,
            values: contents.values,
            thumbnail: contents.thumbnail,
            parts: ExifParts::default(),
            modified: false,
        })
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn parts(&self) -> ExifParts {
        self.parts
    }

    /// Select the directories written by [`ExifProfile::to_byte_array`]
    pub fn set_parts(&mut self, parts: ExifParts) {
        if parts != self.parts {
            self.parts = parts;
            self.modified = true;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &ExifValue> {
        self.values.iter()
    }

    /// Value for `tag`, looked up in the tag's home directory first
    pub fn get_value(&self, tag: ExifTag) -> Option<&ExifValue> {
        self.position(tag).map(|i| &self.values[i])
    }

    /// Value for `tag` in a specific directory
    pub fn get_value_in(&self, ifd: ExifIfd, tag: ExifTag) -> Option<&ExifValue> {
        self.values.iter().find(|v| v.tag() == tag && v.ifd() == ifd)
    }

    /// Insert or replace the value of `tag`
    ///
    /// Existing values keep their type; new ones take the declared type of
    /// a known tag or one inferred from `input`. On mismatch the profile is
    /// left unchanged.
    pub fn set_value(&mut self, tag: ExifTag, input: impl Into<ExifInput>) -> Result<(), ExifError> {
        let ifd = match self.position(tag) {
            Some(i) => self.values[i].ifd(),
            None => tag.info().map_or(ExifIfd::Primary, |info| info.ifd),
        };
        self.set_value_in(ifd, tag, input)
    }

    /// Insert or replace the value of `tag` in a specific directory
    pub fn set_value_in(
        &mut self,
        ifd: ExifIfd,
        tag: ExifTag,
        input: impl Into<ExifInput>,
    ) -> Result<(), ExifError> {
        if tag.is_structural() {
            return Err(ExifError::StructuralTag(tag));
        }
        let input = input.into();

        if let Some(existing) = self
            .values
            .iter_mut()
            .find(|v| v.tag() == tag && v.ifd() == ifd)
        {
            let expected = existing.data_type();
            if !existing.try_set_value(input) {
                return Err(ExifError::TypeMismatch { tag, expected });
            }
            self.modified = true;
            return Ok(());
        }

        let (data_type, is_array) = match declared_type(ifd, tag) {
            Some(declared) => declared,
            None => input.inferred_type().ok_or(ExifError::TypeMismatch {
                tag,
                expected: ExifDataType::SignedLong,
            })?,
        };
        let mut value = ExifValue::declared(tag, ifd, data_type, is_array);
        if !value.try_set_value(input) {
            return Err(ExifError::TypeMismatch {
                tag,
                expected: data_type,
            });
        }
        self.values.push(value);
        self.modified = true;
        Ok(())
    }

    /// Remove the value of `tag`; false when it was not present
    pub fn remove_value(&mut self, tag: ExifTag) -> bool {
        match self.position(tag) {
            Some(i) => {
                self.values.remove(i);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn remove_value_in(&mut self, ifd: ExifIfd, tag: ExifTag) -> bool {
        let before = self.values.len();
        self.values.retain(|v| !(v.tag() == tag && v.ifd() == ifd));
        let removed = self.values.len() != before;
        self.modified |= removed;
        removed
    }

    /// Embedded thumbnail image, as raw bytes
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    /// Drop the thumbnail together with its IFD1 description
    pub fn remove_thumbnail(&mut self) -> bool {
        let had_ifd1 = self.values.iter().any(|v| v.ifd() == ExifIfd::Thumbnail);
        if self.thumbnail.is_none() && !had_ifd1 {
            return false;
        }
        self.thumbnail = None;
        self.values.retain(|v| v.ifd() != ExifIfd::Thumbnail);
        self.modified = true;
        true
    }

    /// Serialize the profile
    ///
    /// Unmodified profiles return their source bytes. Otherwise a fresh
    /// TIFF structure is written in the profile's byte order; a profile
    /// with nothing to write yields an empty buffer.
    pub fn to_byte_array(&self) -> Vec<u8> {
        if let (Some(data), false) = (&self.data, self.modified) {
            return data.clone();
        }
        ExifWriter::new(&self.values, self.thumbnail.as_deref(), self.order, self.parts)
            .write(self.has_prefix)
    }

    fn position(&self, tag: ExifTag) -> Option<usize> {
        let home = tag.info().map(|info| info.ifd);
        home.and_then(|ifd| {
            self.values
                .iter()
                .position(|v| v.tag() == tag && v.ifd() == ifd)
        })
        .or_else(|| {
            self.values
                .iter()
                .position(|v| v.tag() == tag && v.ifd() != ExifIfd::Thumbnail)
        })
    }
}

/// Declared type and shape of a well-known tag when placed in `ifd`
fn declared_type(ifd: ExifIfd, tag: ExifTag) -> Option<(ExifDataType, bool)> {
    tag.info_in(ifd)
        .map(|info| (info.data_type, info.shape.is_array()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::{ExifData, Rational};

    fn camera_block() -> Vec<u8> {
        let mut profile = ExifProfile::new();
        profile.set_value(ExifTag::MAKE, "Nikon").unwrap();
        profile.set_value(ExifTag::ORIENTATION, 6u16).unwrap();
        profile
            .set_value(ExifTag::EXPOSURE_TIME, Rational::new(1, 125))
            .unwrap();
        profile.to_byte_array()
    }

    #[test]
    fn test_new_profile_is_empty() {
        let profile = ExifProfile::new();
        assert!(profile.is_empty());
        assert!(profile.to_byte_array().is_empty());
        assert!(profile.get_value(ExifTag::MAKE).is_none());
    }

    #[test]
    fn test_unmodified_round_trip_is_verbatim() {
        let data = camera_block();
        let profile = ExifProfile::from_bytes(&data).unwrap();
        assert_eq!(profile.to_byte_array(), data);
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_set_values_survive_reparse() {
        let data = camera_block();
        let mut profile = ExifProfile::from_bytes(&data).unwrap();
        profile.set_value(ExifTag::MAKE, "Pentax").unwrap();
        profile.set_value(ExifTag::ARTIST, "someone").unwrap();

        let reparsed = ExifProfile::from_bytes(&profile.to_byte_array()).unwrap();
        assert_eq!(reparsed.get_value(ExifTag::MAKE).unwrap().as_str(), Some("Pentax"));
        assert_eq!(reparsed.get_value(ExifTag::ARTIST).unwrap().as_str(), Some("someone"));
        assert_eq!(reparsed.get_value(ExifTag::ORIENTATION).unwrap().as_u32(), Some(6));
        assert_eq!(
            reparsed.get_value(ExifTag::EXPOSURE_TIME).unwrap().ifd(),
            ExifIfd::Exif
        );
    }

    #[test]
    fn test_type_mismatch_leaves_value() {
        let mut profile = ExifProfile::new();
        profile.set_value(ExifTag::ORIENTATION, 1u16).unwrap();
        let err = profile.set_value(ExifTag::ORIENTATION, "upright").unwrap_err();
        assert!(matches!(err, ExifError::TypeMismatch { .. }));
        assert_eq!(profile.get_value(ExifTag::ORIENTATION).unwrap().as_u32(), Some(1));
    }

    #[test]
    fn test_new_known_tag_rejects_wrong_kind() {
        let mut profile = ExifProfile::new();
        assert!(profile.set_value(ExifTag::MAKE, 5u32).is_err());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_unknown_tag_type_is_inferred() {
        let mut profile = ExifProfile::new();
        let private = ExifTag(0xC5F0);
        profile.set_value(private, 70_000u32).unwrap();
        profile.set_value(ExifTag(0xC5F1), -3i32).unwrap();
        profile.set_value(ExifTag(0xC5F2), vec![1u8, 2, 3]).unwrap();

        assert_eq!(profile.get_value(private).unwrap().data_type(), ExifDataType::Long);
        assert_eq!(
            profile.get_value(ExifTag(0xC5F1)).unwrap().data_type(),
            ExifDataType::SignedLong
        );
        let bytes = profile.get_value(ExifTag(0xC5F2)).unwrap();
        assert!(bytes.is_array());
        assert_eq!(bytes.string_value(), "010203");
    }

    #[test]
    fn test_structural_tags_are_refused() {
        let mut profile = ExifProfile::new();
        let err = profile.set_value(ExifTag::EXIF_IFD_POINTER, 8u32).unwrap_err();
        assert_eq!(err, ExifError::StructuralTag(ExifTag::EXIF_IFD_POINTER));
    }

    #[test]
    fn test_remove_value() {
        let mut profile = ExifProfile::from_bytes(&camera_block()).unwrap();
        assert!(profile.remove_value(ExifTag::MAKE));
        assert!(!profile.remove_value(ExifTag::MAKE));

        let reparsed = ExifProfile::from_bytes(&profile.to_byte_array()).unwrap();
        assert!(reparsed.get_value(ExifTag::MAKE).is_none());
        assert_eq!(reparsed.len(), 2);
    }

    #[test]
    fn test_interop_and_gps_share_tag_number() {
        let mut profile = ExifProfile::new();
        profile.set_value(ExifTag::GPS_LATITUDE_REF, "N").unwrap();
        profile
            .set_value_in(ExifIfd::Interop, ExifTag::INTEROPERABILITY_INDEX, "R98")
            .unwrap();

        let reparsed = ExifProfile::from_bytes(&profile.to_byte_array()).unwrap();
        assert_eq!(reparsed.get_value(ExifTag::GPS_LATITUDE_REF).unwrap().as_str(), Some("N"));
        assert_eq!(
            reparsed
                .get_value_in(ExifIfd::Interop, ExifTag::INTEROPERABILITY_INDEX)
                .unwrap()
                .as_str(),
            Some("R98")
        );
    }

    #[test]
    fn test_big_endian_profile() {
        let mut profile = ExifProfile::with_byte_order(ByteOrder::BigEndian);
        profile
            .set_value(ExifTag::X_RESOLUTION, Rational::new(300, 1))
            .unwrap();
        let data = profile.to_byte_array();
        assert_eq!(&data[6..8], b"MM");

        let reparsed = ExifProfile::from_bytes(&data).unwrap();
        assert_eq!(reparsed.byte_order(), ByteOrder::BigEndian);
        assert_eq!(
            reparsed.get_value(ExifTag::X_RESOLUTION).unwrap().string_value(),
            "300/1"
        );
    }

    #[test]
    fn test_set_parts_drops_from_output_only() {
        let mut profile = ExifProfile::from_bytes(&camera_block()).unwrap();
        profile.set_parts(ExifParts::IFD_TAGS);
        assert!(profile.get_value(ExifTag::EXPOSURE_TIME).is_some());

        let reparsed = ExifProfile::from_bytes(&profile.to_byte_array()).unwrap();
        assert!(reparsed.get_value(ExifTag::EXPOSURE_TIME).is_none());
        assert!(reparsed.get_value(ExifTag::MAKE).is_some());
    }

    #[test]
    fn test_fixed_length_array() {
        let mut profile = ExifProfile::new();
        let lat = [
            Rational::new(52, 1),
            Rational::new(22, 1),
            Rational::new(1234, 100),
        ];
        profile.set_value(ExifTag::GPS_LATITUDE, lat).unwrap();
        assert!(profile
            .set_value(ExifTag::GPS_LATITUDE, vec![Rational::new(1, 1)])
            .is_err());
        assert_eq!(
            profile.get_value(ExifTag::GPS_LATITUDE).unwrap().data(),
            &ExifData::Rational(lat.to_vec())
        );
    }
}
