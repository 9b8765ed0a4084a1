//! ICC Profile Container
//!
//! [`ColorProfile`] keeps the bytes it was loaded from next to the decoded
//! tags. An untouched profile serializes to exactly those bytes; once a tag
//! is changed the profile is reassembled, re-emitting every unchanged tag
//! from its original bytes.

use std::borrow::Cow;
use std::ops::Range;

use super::error::IccError;
use super::header::{ColorSpace, HEADER_SIZE, IccHeader};
use super::reader::read_tag_table;
use super::tags::{TagData, TextData};
use super::types::TagSignature;
use super::writer::write_profile;

#[derive(Debug, Clone, PartialEq)]
struct TagEntry {
    signature: TagSignature,
    data: TagData,
    /// Location of the unchanged tag in `ColorProfile::data`
    raw: Option<Range<usize>>,
}

/// A parsed ICC color profile
///
/// # Example
///
/// ```
/// use oxmeta_core::icc::ColorProfile;
///
/// let srgb = ColorProfile::srgb();
/// let mut profile = ColorProfile::from_bytes(&srgb.to_byte_array())?;
/// assert_eq!(profile.description(), Some("sRGB"));
///
/// profile.set_copyright("CC0");
/// let copy = ColorProfile::from_bytes(&profile.to_byte_array())?;
/// assert_eq!(copy.copyright(), Some("CC0"));
/// # Ok::<(), oxmeta_core::icc::IccError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorProfile {
    data: Vec<u8>,
    header: IccHeader,
    tags: Vec<TagEntry>,
    modified: bool,
}

impl ColorProfile {
    /// Parse a profile
    ///
    /// Only a buffer too small for the header and tag count is rejected.
    /// Tags that point outside the buffer are dropped and tags that do not
    /// decode as their declared type are kept as [`TagData::Unknown`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccError> {
        let (header, located) = read_tag_table(data)?;
        let tags = located
            .into_iter()
            .map(|tag| TagEntry {
                signature: tag.signature,
                data: TagData::parse_lenient(&data[tag.range.clone()]),
                raw: Some(tag.range),
            })
            .collect();

        Ok(Self {
            data: data.to_vec(),
            header,
            tags,
            modified: false,
        })
    }

    /// Build a profile from a header and tags, serializing it once so that
    /// [`ColorProfile::to_byte_array`] is a plain copy afterwards
    pub(crate) fn assemble(mut header: IccHeader, tags: Vec<(TagSignature, TagData)>) -> Self {
        let tags: Vec<TagEntry> = tags
            .into_iter()
            .map(|(signature, data)| TagEntry {
                signature,
                data,
                raw: None,
            })
            .collect();
        header.profile_id = [0; 16];
        let data = Self::serialize(&header.to_bytes(), &[], &tags);
        header.size = data.len() as u32;

        Self {
            data,
            header,
            tags,
            modified: false,
        }
    }

    pub fn header(&self) -> &IccHeader {
        &self.header
    }

    pub fn color_space(&self) -> ColorSpace {
        self.header.color_space
    }

    /// Strict checks on the loaded bytes, see [`IccHeader::validate`]
    pub fn validate(&self) -> Result<(), IccError> {
        self.header.validate(self.data.len())
    }

    /// Copyright text ('cprt')
    pub fn copyright(&self) -> Option<&str> {
        self.text(TagSignature::COPYRIGHT)
    }

    /// Profile description ('desc')
    pub fn description(&self) -> Option<&str> {
        self.text(TagSignature::DESC)
    }

    /// Device manufacturer description ('dmnd')
    pub fn manufacturer(&self) -> Option<&str> {
        self.text(TagSignature::DMND)
    }

    /// Device model description ('dmdd')
    pub fn model(&self) -> Option<&str> {
        self.text(TagSignature::DMDD)
    }

    fn text(&self, signature: TagSignature) -> Option<&str> {
        self.get_tag(signature)
            .and_then(TagData::as_text)
            .map(|t| t.text.as_str())
    }

    pub fn get_tag(&self, signature: TagSignature) -> Option<&TagData> {
        self.tags
            .iter()
            .find(|t| t.signature == signature)
            .map(|t| &t.data)
    }

    /// Tags in table order
    pub fn tags(&self) -> impl Iterator<Item = (TagSignature, &TagData)> + '_ {
        self.tags.iter().map(|t| (t.signature, &t.data))
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Replace a tag in place, or append it to the table
    pub fn set_tag(&mut self, signature: TagSignature, data: TagData) {
        match self.tags.iter_mut().find(|t| t.signature == signature) {
            Some(entry) => {
                entry.data = data;
                entry.raw = None;
            }
            None => self.tags.push(TagEntry {
                signature,
                data,
                raw: None,
            }),
        }
        self.modified = true;
    }

    pub fn remove_tag(&mut self, signature: TagSignature) -> Option<TagData> {
        let index = self.tags.iter().position(|t| t.signature == signature)?;
        self.modified = true;
        Some(self.tags.remove(index).data)
    }

    /// Set 'cprt' using the text type matching the profile version
    pub fn set_copyright(&mut self, text: &str) {
        let data = if self.header.version.at_least(4, 0) {
            TagData::MultiLocalizedUnicode(TextData::new(text))
        } else {
            TagData::Text(TextData::new(text))
        };
        self.set_tag(TagSignature::COPYRIGHT, data);
    }

    /// Set 'desc' using the text type matching the profile version
    pub fn set_description(&mut self, text: &str) {
        let data = if self.header.version.at_least(4, 0) {
            TagData::MultiLocalizedUnicode(TextData::new(text))
        } else {
            TagData::Description(TextData::new(text))
        };
        self.set_tag(TagSignature::DESC, data);
    }

    /// Serialize the profile
    pub fn to_byte_array(&self) -> Vec<u8> {
        if !self.modified {
            return self.data.clone();
        }

        let header = match self.data.get(..HEADER_SIZE).and_then(|h| h.try_into().ok()) {
            Some(original) => original,
            None => self.header.to_bytes(),
        };
        Self::serialize(&header, &self.data, &self.tags)
    }

    fn serialize(header: &[u8; HEADER_SIZE], source: &[u8], tags: &[TagEntry]) -> Vec<u8> {
        let payloads: Vec<(TagSignature, Cow<'_, [u8]>)> = tags
            .iter()
            .map(|t| {
                let payload = match t.raw.clone().and_then(|r| source.get(r)) {
                    Some(raw) => Cow::Borrowed(raw),
                    None => Cow::Owned(t.data.encode()),
                };
                (t.signature, payload)
            })
            .collect();
        let refs: Vec<(TagSignature, &[u8])> = payloads
            .iter()
            .map(|(sig, payload)| (*sig, payload.as_ref()))
            .collect();
        write_profile(header, &refs)
    }
}
