//! EXIF Directory Writer
//!
//! Serializes a value set into a fresh, self-contained TIFF structure.
//!
//! # Layout
//!
//! ```text
//! [Exif\0\0] header | IFD0 + data | Exif IFD + data | Interop IFD + data
//!                   | GPS IFD + data | IFD1 + data | thumbnail
//! ```
//!
//! Every directory is followed by its own data area holding the payloads
//! larger than four bytes, each word aligned. Sub-IFD pointers and the
//! thumbnail offset are written as placeholders and patched once the
//! target position is known.

use std::ops::{BitOr, BitOrAssign};

use super::reader::{ENTRY_SIZE, EXIF_PREFIX, TIFF_HEADER_SIZE, TIFF_MAGIC};
use super::tag::{ExifIfd, ExifTag};
use super::types::{ByteOrder, ExifDataType};
use super::value::ExifValue;

/// Directories to include when writing a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExifParts(u8);

impl ExifParts {
    pub const NONE: Self = Self(0);
    /// IFD0 tags
    pub const IFD_TAGS: Self = Self(1);
    /// Exif sub-IFD tags (and the Interop IFD inside it)
    pub const EXIF_TAGS: Self = Self(2);
    /// GPS sub-IFD tags
    pub const GPS_TAGS: Self = Self(4);
    pub const ALL: Self = Self(1 | 2 | 4);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether values of `ifd` are written with these parts
    pub fn includes(self, ifd: ExifIfd) -> bool {
        match ifd {
            ExifIfd::Primary => self.contains(Self::IFD_TAGS),
            ExifIfd::Exif | ExifIfd::Interop => self.contains(Self::EXIF_TAGS),
            ExifIfd::Gps => self.contains(Self::GPS_TAGS),
            ExifIfd::Thumbnail => true,
        }
    }
}

impl Default for ExifParts {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for ExifParts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExifParts {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// One entry to be written
struct DirEntry {
    tag: ExifTag,
    type_code: u16,
    count: u32,
    payload: Vec<u8>,
}

impl DirEntry {
    fn from_value(value: &ExifValue, order: ByteOrder) -> Self {
        Self {
            tag: value.tag(),
            type_code: value.data_type().code(),
            count: value.data().count() as u32,
            payload: value.data().encode(order),
        }
    }

    /// LONG placeholder, patched later
    fn placeholder(tag: ExifTag) -> Self {
        Self {
            tag,
            type_code: ExifDataType::Long.code(),
            count: 1,
            payload: vec![0; 4],
        }
    }
}

/// Positions of the value fields of a written directory
struct WrittenIfd {
    start: usize,
    fields: Vec<(ExifTag, usize)>,
}

impl WrittenIfd {
    fn field(&self, tag: ExifTag) -> Option<usize> {
        self.fields.iter().find(|(t, _)| *t == tag).map(|&(_, pos)| pos)
    }
}

pub(crate) struct ExifWriter<'a> {
    values: &'a [ExifValue],
    thumbnail: Option<&'a [u8]>,
    order: ByteOrder,
    parts: ExifParts,
    out: Vec<u8>,
}

impl<'a> ExifWriter<'a> {
    pub(crate) fn new(
        values: &'a [ExifValue],
        thumbnail: Option<&'a [u8]>,
        order: ByteOrder,
        parts: ExifParts,
    ) -> Self {
        Self {
            values,
            thumbnail,
            order,
            parts,
            out: Vec::new(),
        }
    }

    fn entries(&self, ifd: ExifIfd) -> Vec<DirEntry> {
        if !self.parts.includes(ifd) {
            return Vec::new();
        }
        self.values
            .iter()
            .filter(|v| v.ifd() == ifd)
            .map(|v| DirEntry::from_value(v, self.order))
            .collect()
    }

    /// Serialize; returns an empty buffer when there is nothing to write
    pub(crate) fn write(mut self, with_prefix: bool) -> Vec<u8> {
        let mut primary = self.entries(ExifIfd::Primary);
        let mut exif = self.entries(ExifIfd::Exif);
        let interop = self.entries(ExifIfd::Interop);
        let gps = self.entries(ExifIfd::Gps);
        let mut ifd1 = self.entries(ExifIfd::Thumbnail);

        if primary.is_empty()
            && exif.is_empty()
            && interop.is_empty()
            && gps.is_empty()
            && ifd1.is_empty()
            && self.thumbnail.is_none()
        {
            return Vec::new();
        }

        let has_interop = !interop.is_empty();
        let has_exif = !exif.is_empty() || has_interop;
        let has_gps = !gps.is_empty();
        let has_ifd1 = !ifd1.is_empty() || self.thumbnail.is_some();

        if has_interop {
            exif.push(DirEntry::placeholder(ExifTag::INTEROP_IFD_POINTER));
        }
        if has_exif {
            primary.push(DirEntry::placeholder(ExifTag::EXIF_IFD_POINTER));
        }
        if has_gps {
            primary.push(DirEntry::placeholder(ExifTag::GPS_IFD_POINTER));
        }
        if let Some(thumb) = self.thumbnail {
            ifd1.push(DirEntry::placeholder(ExifTag::JPEG_INTERCHANGE_FORMAT));
            let mut length = DirEntry::placeholder(ExifTag::JPEG_INTERCHANGE_FORMAT_LENGTH);
            length.payload = self.order.u32_bytes(thumb.len() as u32).to_vec();
            ifd1.push(length);
        }

        self.out.extend_from_slice(&self.order.mark());
        self.out.extend_from_slice(&self.order.u16_bytes(TIFF_MAGIC));
        self.out.extend_from_slice(&self.order.u32_bytes(TIFF_HEADER_SIZE as u32));

        let ifd0 = self.write_ifd(&primary);

        if has_exif {
            let exif_ifd = self.write_ifd(&exif);
            self.patch(&ifd0, ExifTag::EXIF_IFD_POINTER, exif_ifd.start);
            if has_interop {
                let interop_ifd = self.write_ifd(&interop);
                self.patch(&exif_ifd, ExifTag::INTEROP_IFD_POINTER, interop_ifd.start);
            }
        }

        if has_gps {
            let gps_ifd = self.write_ifd(&gps);
            self.patch(&ifd0, ExifTag::GPS_IFD_POINTER, gps_ifd.start);
        }

        if has_ifd1 {
            let ifd1_written = self.write_ifd(&ifd1);
            self.patch_at(next_field(&ifd0, primary.len()), ifd1_written.start);
            if let Some(thumb) = self.thumbnail {
                self.align();
                let offset = self.out.len();
                self.out.extend_from_slice(thumb);
                self.patch(&ifd1_written, ExifTag::JPEG_INTERCHANGE_FORMAT, offset);
            }
        }

        log::trace!(
            "wrote {} EXIF bytes ({} values, {:?})",
            self.out.len(),
            self.values.len(),
            self.order
        );

        if with_prefix {
            let mut data = Vec::with_capacity(EXIF_PREFIX.len() + self.out.len());
            data.extend_from_slice(EXIF_PREFIX);
            data.extend_from_slice(&self.out);
            data
        } else {
            self.out
        }
    }

    fn align(&mut self) {
        if self.out.len() % 2 != 0 {
            self.out.push(0);
        }
    }

    /// Append a directory and its data area
    fn write_ifd(&mut self, entries: &[DirEntry]) -> WrittenIfd {
        self.align();
        let start = self.out.len();
        let data_start = start + 2 + entries.len() * ENTRY_SIZE + 4;

        let mut data_area = Vec::new();
        let mut fields = Vec::with_capacity(entries.len());

        self.out
            .extend_from_slice(&self.order.u16_bytes(entries.len() as u16));
        for entry in entries {
            self.out.extend_from_slice(&self.order.u16_bytes(entry.tag.0));
            self.out.extend_from_slice(&self.order.u16_bytes(entry.type_code));
            self.out.extend_from_slice(&self.order.u32_bytes(entry.count));

            fields.push((entry.tag, self.out.len()));
            if entry.payload.len() <= 4 {
                let mut field = [0u8; 4];
                field[..entry.payload.len()].copy_from_slice(&entry.payload);
                self.out.extend_from_slice(&field);
            } else {
                let offset = data_start + data_area.len();
                self.out.extend_from_slice(&self.order.u32_bytes(offset as u32));
                data_area.extend_from_slice(&entry.payload);
                if data_area.len() % 2 != 0 {
                    data_area.push(0);
                }
            }
        }
        // Next IFD offset
        self.out.extend_from_slice(&[0; 4]);
        self.out.extend_from_slice(&data_area);

        WrittenIfd { start, fields }
    }

    fn patch(&mut self, ifd: &WrittenIfd, tag: ExifTag, target: usize) {
        if let Some(pos) = ifd.field(tag) {
            self.patch_at(pos, target);
        }
    }

    fn patch_at(&mut self, pos: usize, target: usize) {
        let bytes = self.order.u32_bytes(target as u32);
        self.out[pos..pos + 4].copy_from_slice(&bytes);
    }
}

/// Position of the next-IFD field of a directory with `count` entries
fn next_field(ifd: &WrittenIfd, count: usize) -> usize {
    ifd.start + 2 + count * ENTRY_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::reader::ExifReader;
    use crate::exif::value::ExifData;

    fn value(tag: ExifTag, ifd: ExifIfd, data: ExifData) -> ExifValue {
        ExifValue::new(tag, ifd, false, data)
    }

    #[test]
    fn test_empty_writes_nothing() {
        let out = ExifWriter::new(&[], None, ByteOrder::LittleEndian, ExifParts::ALL).write(true);
        assert!(out.is_empty());
    }

    #[test]
    fn test_header_layout() {
        let values = [value(
            ExifTag::IMAGE_WIDTH,
            ExifIfd::Primary,
            ExifData::Long(vec![42]),
        )];
        let out = ExifWriter::new(&values, None, ByteOrder::LittleEndian, ExifParts::ALL).write(true);

        assert_eq!(&out[..6], EXIF_PREFIX);
        assert_eq!(&out[6..8], b"II");
        assert_eq!(&out[8..10], &[42, 0]);
        assert_eq!(&out[10..14], &[8, 0, 0, 0]);
        // Entry count, then the tag of the first entry at offset 16
        assert_eq!(&out[14..16], &[1, 0]);
        assert_eq!(&out[16..18], &[0x00, 0x01]);
        assert_eq!(&out[24..28], &[42, 0, 0, 0]);
    }

    #[test]
    fn test_sub_ifds_round_trip() {
        let values = [
            value(ExifTag::MAKE, ExifIfd::Primary, ExifData::ascii("Fujifilm")),
            value(
                ExifTag::EXPOSURE_TIME,
                ExifIfd::Exif,
                ExifData::Rational(vec![crate::exif::Rational::new(1, 250)]),
            ),
            value(
                ExifTag::INTEROPERABILITY_INDEX,
                ExifIfd::Interop,
                ExifData::ascii("R98"),
            ),
            value(ExifTag::GPS_ALTITUDE_REF, ExifIfd::Gps, ExifData::Byte(vec![0])),
        ];
        let out = ExifWriter::new(&values, None, ByteOrder::BigEndian, ExifParts::ALL).write(false);
        let contents = ExifReader::read(&out).unwrap();

        assert_eq!(contents.order, ByteOrder::BigEndian);
        assert_eq!(contents.values.len(), 4);
        for v in &values {
            let read = contents
                .values
                .iter()
                .find(|r| r.tag() == v.tag() && r.ifd() == v.ifd())
                .unwrap();
            assert_eq!(read.data(), v.data());
        }
    }

    #[test]
    fn test_parts_filter() {
        let values = [
            value(ExifTag::MAKE, ExifIfd::Primary, ExifData::ascii("Canon")),
            value(ExifTag::GPS_ALTITUDE_REF, ExifIfd::Gps, ExifData::Byte(vec![1])),
        ];
        let out = ExifWriter::new(&values, None, ByteOrder::LittleEndian, ExifParts::IFD_TAGS)
            .write(false);
        let contents = ExifReader::read(&out).unwrap();
        assert_eq!(contents.values.len(), 1);
        assert_eq!(contents.values[0].tag(), ExifTag::MAKE);
    }

    #[test]
    fn test_thumbnail_written_after_ifd1() {
        let values = [value(ExifTag::ORIENTATION, ExifIfd::Primary, ExifData::Short(vec![1]))];
        let thumb = [0xFF, 0xD8, 0xFF, 0xD9, 0x00];
        let out = ExifWriter::new(&values, Some(&thumb), ByteOrder::LittleEndian, ExifParts::ALL)
            .write(false);
        let contents = ExifReader::read(&out).unwrap();
        assert_eq!(contents.thumbnail.as_deref(), Some(&thumb[..]));
        assert_eq!(contents.values.len(), 1);
    }

    #[test]
    fn test_parts_bit_ops() {
        let parts = ExifParts::IFD_TAGS | ExifParts::GPS_TAGS;
        assert!(parts.includes(ExifIfd::Primary));
        assert!(parts.includes(ExifIfd::Gps));
        assert!(!parts.includes(ExifIfd::Exif));
        assert!(!parts.includes(ExifIfd::Interop));
        assert!(ExifParts::NONE.includes(ExifIfd::Thumbnail));
        assert_eq!(ExifParts::default(), ExifParts::ALL);
    }
}
