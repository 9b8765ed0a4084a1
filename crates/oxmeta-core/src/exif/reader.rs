//! EXIF Directory Reader
//!
//! Walks the TIFF structure of an EXIF block:
//! 1. Optional `Exif\0\0` marker
//! 2. 8-byte TIFF header (byte order, magic 42, IFD0 offset)
//! 3. IFD0 and the Exif, GPS and Interop sub-IFDs it points to
//! 4. IFD1 and the thumbnail it locates
//!
//! Only a missing header or an unreadable IFD0 is fatal. Individual entries
//! that point outside the buffer are dropped and reading continues.
//!
//! Entries may point at overlapping payloads, so the bytes copied out of
//! the block are capped at [`MAX_PAYLOAD_EXPANSION`] times its size.
//! Entries past the cap are dropped like out-of-range ones.

use std::collections::HashSet;

use super::error::ExifError;
use super::tag::{ExifIfd, ExifTag};
use super::types::{ByteOrder, ExifDataType};
use super::value::{ExifData, ExifValue};

/// APP1 marker some hosts keep in front of the TIFF header
pub const EXIF_PREFIX: &[u8; 6] = b"Exif\0\0";

/// TIFF header size
pub const TIFF_HEADER_SIZE: usize = 8;

/// TIFF magic number
pub const TIFF_MAGIC: u16 = 42;

/// Size of one IFD entry
pub const ENTRY_SIZE: usize = 12;

/// TIFF type code for IFD offsets (TIFF-EP)
const IFD_TYPE_CODE: u16 = 13;

/// Cap on decoded out-of-line payload bytes, as a multiple of the block size
pub const MAX_PAYLOAD_EXPANSION: usize = 2;

/// Everything read out of an EXIF block
#[derive(Debug, Clone)]
pub(crate) struct ExifContents {
    pub order: ByteOrder,
    pub has_prefix: bool,
    pub values: Vec<ExifValue>,
    pub thumbnail: Option<Vec<u8>>,
}

/// Directory entry as stored in the IFD
#[derive(Debug, Clone, Copy)]
struct RawEntry {
    tag: ExifTag,
    data_type: ExifDataType,
    count: u32,
    /// Position of the 4-byte value/offset field
    field_pos: usize,
}

struct Directory {
    entries: Vec<RawEntry>,
    next: u32,
}

pub(crate) struct ExifReader<'a> {
    data: &'a [u8],
    order: ByteOrder,
    visited: Vec<u32>,
    seen: HashSet<(ExifIfd, u16)>,
    /// Out-of-line payload bytes that may still be decoded
    budget: usize,
}

impl<'a> ExifReader<'a> {
    /// Parse an EXIF block
    pub(crate) fn read(data: &[u8]) -> Result<ExifContents, ExifError> {
        let (tiff, has_prefix) = match data.strip_prefix(EXIF_PREFIX.as_slice()) {
            Some(rest) => (rest, true),
            None => (data, false),
        };

        if tiff.len() < TIFF_HEADER_SIZE {
            let prefix = if has_prefix { EXIF_PREFIX.len() } else { 0 };
            return Err(ExifError::TooSmall {
                expected: prefix + TIFF_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let order = ByteOrder::from_mark([tiff[0], tiff[1]])
            .ok_or(ExifError::InvalidByteOrder([tiff[0], tiff[1]]))?;

        let magic = order.u16_from([tiff[2], tiff[3]]);
        if magic != TIFF_MAGIC {
            return Err(ExifError::InvalidMagic(magic));
        }

        let ifd0 = order.u32_from([tiff[4], tiff[5], tiff[6], tiff[7]]);

        let mut reader = ExifReader {
            data: tiff,
            order,
            visited: Vec::new(),
            seen: HashSet::new(),
            budget: tiff.len().saturating_mul(MAX_PAYLOAD_EXPANSION),
        };

        let primary = reader
            .read_directory(ifd0)
            .ok_or(ExifError::DirectoryOutOfBounds {
                offset: ifd0,
                len: tiff.len(),
            })?;

        let mut values = Vec::new();
        reader.collect(&primary, ExifIfd::Primary, &mut values);

        let mut thumbnail = None;
        if primary.next != 0 {
            match reader.read_directory(primary.next) {
                Some(ifd1) => {
                    thumbnail = reader.thumbnail(&ifd1);
                    reader.collect(&ifd1, ExifIfd::Thumbnail, &mut values);
                }
                None => log::debug!("IFD1 at offset {} unreadable, skipped", primary.next),
            }
        }

        log::trace!(
            "read {} EXIF values ({:?}, thumbnail: {})",
            values.len(),
            order,
            thumbnail.is_some()
        );

        Ok(ExifContents {
            order,
            has_prefix,
            values,
            thumbnail,
        })
    }

    /// Read the entry table at `offset`
    ///
    /// Returns None when the entry count itself cannot be read or the
    /// directory was already visited. The count is clamped to the entries
    /// that fit in the buffer.
    fn read_directory(&mut self, offset: u32) -> Option<Directory> {
        if self.visited.contains(&offset) {
            log::debug!("IFD at offset {} already visited, skipped", offset);
            return None;
        }
        self.visited.push(offset);

        let start = offset as usize;
        let count = self.order.read_u16(self.data, start)? as usize;
        let table = start + 2;
        let available = self.data.len().saturating_sub(table) / ENTRY_SIZE;
        if available < count {
            log::debug!(
                "IFD at offset {} declares {} entries, only {} fit",
                offset,
                count,
                available
            );
        }

        let entries = (0..count.min(available))
            .map(|i| {
                let pos = table + i * ENTRY_SIZE;
                let d = &self.data[pos..pos + ENTRY_SIZE];
                RawEntry {
                    tag: ExifTag(self.order.u16_from([d[0], d[1]])),
                    data_type: ExifDataType::from_code(self.order.u16_from([d[2], d[3]])),
                    count: self.order.u32_from([d[4], d[5], d[6], d[7]]),
                    field_pos: pos + 8,
                }
            })
            .collect();

        let next = self
            .order
            .read_u32(self.data, table + count * ENTRY_SIZE)
            .unwrap_or(0);

        Some(Directory { entries, next })
    }

    /// Decode the entries of `dir` into `values`, following sub-IFD pointers
    fn collect(&mut self, dir: &Directory, ifd: ExifIfd, values: &mut Vec<ExifValue>) {
        for entry in &dir.entries {
            if let Some(sub) = sub_directory(ifd, entry.tag) {
                let sub_dir = match self.pointer(entry) {
                    Some(offset) => self.read_directory(offset),
                    None => None,
                };
                match sub_dir {
                    Some(sub_dir) => self.collect(&sub_dir, sub, values),
                    None => log::debug!("{:?} IFD pointer in {:?} unreadable, skipped", sub, ifd),
                }
                continue;
            }

            if entry.tag.is_structural() {
                continue;
            }

            if self.seen.contains(&(ifd, entry.tag.0)) {
                log::debug!("duplicate tag {} in {:?} IFD, skipped", entry.tag, ifd);
                continue;
            }

            let Some(bytes) = self.payload(entry) else {
                log::debug!(
                    "tag {} ({:?} x {}) outside buffer, skipped",
                    entry.tag,
                    entry.data_type,
                    entry.count
                );
                continue;
            };
            if bytes.len() > 4 {
                if bytes.len() > self.budget {
                    log::debug!(
                        "tag {} payload of {} bytes exceeds the remaining decode budget, skipped",
                        entry.tag,
                        bytes.len()
                    );
                    continue;
                }
                self.budget -= bytes.len();
            }

            self.seen.insert((ifd, entry.tag.0));
            values.push(self.decode(entry, ifd, bytes));
        }
    }

    /// Resolve the payload bytes of an entry, or None if out of bounds
    ///
    /// An inline payload of an unknown type keeps the whole value field,
    /// since its true element size is unknown.
    fn payload(&self, entry: &RawEntry) -> Option<&'a [u8]> {
        let size = (entry.count as usize).checked_mul(entry.data_type.element_size())?;
        let (start, len) = if size <= 4 {
            match entry.data_type {
                ExifDataType::Unknown(_) => (entry.field_pos, 4),
                _ => (entry.field_pos, size),
            }
        } else {
            (self.order.read_u32(self.data, entry.field_pos)? as usize, size)
        };
        let data: &'a [u8] = self.data;
        data.get(start..start.checked_add(len)?)
    }

    fn decode(&self, entry: &RawEntry, ifd: ExifIfd, bytes: &[u8]) -> ExifValue {
        let data = match entry.data_type {
            ExifDataType::Unknown(code) => ExifData::Unknown {
                code,
                count: entry.count,
                bytes: bytes.to_vec(),
            },
            data_type => ExifData::decode(data_type, bytes, self.order),
        };
        let is_array = match entry.tag.info_in(ifd) {
            Some(info) if info.data_type != ExifDataType::Ascii => {
                info.shape.is_array() || entry.count != 1
            }
            _ => entry.data_type != ExifDataType::Ascii && entry.count != 1,
        };
        ExifValue::new(entry.tag, ifd, is_array, data)
    }

    /// Offset stored in a sub-IFD pointer entry
    fn pointer(&self, entry: &RawEntry) -> Option<u32> {
        let code = entry.data_type.code();
        if entry.count != 1 || !(code == 4 || code == IFD_TYPE_CODE) {
            return None;
        }
        self.order.read_u32(self.data, entry.field_pos)
    }

    /// Extract the JPEG thumbnail located by IFD1
    fn thumbnail(&self, ifd1: &Directory) -> Option<Vec<u8>> {
        let scalar = |tag: ExifTag| {
            let entry = ifd1.entries.iter().find(|e| e.tag == tag)?;
            match ExifData::decode(entry.data_type, self.payload(entry)?, self.order) {
                ExifData::Long(v) => v.first().copied(),
                ExifData::Short(v) => v.first().map(|&x| x as u32),
                _ => None,
            }
        };

        let offset = scalar(ExifTag::JPEG_INTERCHANGE_FORMAT)? as usize;
        let length = scalar(ExifTag::JPEG_INTERCHANGE_FORMAT_LENGTH)? as usize;
        match self.data.get(offset..offset.checked_add(length)?) {
            Some(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
            _ => {
                log::debug!(
                    "thumbnail at {}+{} outside buffer, ignored",
                    offset,
                    length
                );
                None
            }
        }
    }
}

/// Directory a pointer tag leads to, when read inside `ifd`
fn sub_directory(ifd: ExifIfd, tag: ExifTag) -> Option<ExifIfd> {
    match (ifd, tag) {
        (ExifIfd::Primary, ExifTag::EXIF_IFD_POINTER) => Some(ExifIfd::Exif),
        (ExifIfd::Primary, ExifTag::GPS_IFD_POINTER) => Some(ExifIfd::Gps),
        (ExifIfd::Exif, ExifTag::INTEROP_IFD_POINTER) => Some(ExifIfd::Interop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Little-endian block with IFD0 holding one SHORT (Orientation = 6)
    fn orientation_block() -> Vec<u8> {
        let mut data = b"II".to_vec();
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&0x0112u16.to_le_bytes());
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[6, 0, 0, 0]);
        data.extend_from_slice(&0u32.to_le_bytes());
        data
    }

    #[test]
    fn test_read_single_entry() {
        let contents = ExifReader::read(&orientation_block()).unwrap();
        assert_eq!(contents.order, ByteOrder::LittleEndian);
        assert!(!contents.has_prefix);
        assert_eq!(contents.values.len(), 1);
        assert_eq!(contents.values[0].tag(), ExifTag::ORIENTATION);
        assert_eq!(contents.values[0].as_u32(), Some(6));
        assert!(!contents.values[0].is_array());
    }

    #[test]
    fn test_read_with_exif_prefix() {
        let mut data = EXIF_PREFIX.to_vec();
        data.extend_from_slice(&orientation_block());
        let contents = ExifReader::read(&data).unwrap();
        assert!(contents.has_prefix);
        assert_eq!(contents.values.len(), 1);
    }

    #[test]
    fn test_header_too_small() {
        let err = ExifReader::read(b"II*\0").unwrap_err();
        assert!(matches!(err, ExifError::TooSmall { expected: 8, actual: 4 }));
        assert!(ExifReader::read(&[]).is_err());
    }

    #[test]
    fn test_bad_byte_order_and_magic() {
        let mut data = orientation_block();
        data[0] = b'X';
        assert!(matches!(
            ExifReader::read(&data),
            Err(ExifError::InvalidByteOrder(_))
        ));

        let mut data = orientation_block();
        data[2] = 43;
        assert!(matches!(
            ExifReader::read(&data),
            Err(ExifError::InvalidMagic(43))
        ));
    }

    #[test]
    fn test_ifd0_out_of_bounds() {
        let mut data = orientation_block();
        data[4..8].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            ExifReader::read(&data),
            Err(ExifError::DirectoryOutOfBounds { offset: 1000, .. })
        ));
    }

    #[test]
    fn test_entry_past_end_is_skipped() {
        let mut data = orientation_block();
        // Second entry: ASCII Make, 20 bytes at offset 500
        data[8..10].copy_from_slice(&2u16.to_le_bytes());
        data.truncate(22);
        data.extend_from_slice(&0x010Fu16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&20u32.to_le_bytes());
        data.extend_from_slice(&500u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());

        let contents = ExifReader::read(&data).unwrap();
        assert_eq!(contents.values.len(), 1);
        assert_eq!(contents.values[0].tag(), ExifTag::ORIENTATION);
    }

    #[test]
    fn test_truncated_directory_reads_what_fits() {
        let mut data = orientation_block();
        data[8..10].copy_from_slice(&500u16.to_le_bytes());
        let contents = ExifReader::read(&data).unwrap();
        assert_eq!(contents.values.len(), 1);
    }

    #[test]
    fn test_huge_count_does_not_overflow() {
        let mut data = orientation_block();
        data[12..14].copy_from_slice(&4u16.to_le_bytes());
        data[14..18].copy_from_slice(&u32::MAX.to_le_bytes());
        let contents = ExifReader::read(&data).unwrap();
        assert!(contents.values.is_empty());
    }

    /// Little-endian IFD0 of `(tag, type, count, field)` entries, followed
    /// by `tail` at offset [`tail_offset`]
    fn block(entries: &[(u16, u16, u32, [u8; 4])], tail: &[u8]) -> Vec<u8> {
        let mut data = b"II".to_vec();
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for &(tag, code, count, field) in entries {
            data.extend_from_slice(&tag.to_le_bytes());
            data.extend_from_slice(&code.to_le_bytes());
            data.extend_from_slice(&count.to_le_bytes());
            data.extend_from_slice(&field);
        }
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(tail);
        data
    }

    fn tail_offset(entries: usize) -> u32 {
        (8 + 2 + entries * ENTRY_SIZE + 4) as u32
    }

    #[test]
    fn test_shared_payloads_are_capped() {
        let entries = 400;
        let region = vec![0x5Au8; 4096];
        let offset = tail_offset(entries).to_le_bytes();
        let table: Vec<_> = (0..entries as u16)
            .map(|i| (0xC100 + i, 7, region.len() as u32, offset))
            .collect();
        let data = block(&table, &region);

        let contents = ExifReader::read(&data).unwrap();
        let decoded: usize = contents.values.iter().map(|v| v.data().count()).sum();
        assert!(!contents.values.is_empty());
        assert!(
            decoded <= data.len() * MAX_PAYLOAD_EXPANSION,
            "decoded {} bytes from {}",
            decoded,
            data.len()
        );
    }

    #[test]
    fn test_unknown_type_keeps_field_and_count() {
        let data = block(
            &[
                (0xC001, 13, 1, [0x44, 0x33, 0x22, 0x11]),
                (0xC002, 99, 2, [0xAA, 0xBB, 0xCC, 0xDD]),
            ],
            &[],
        );
        let contents = ExifReader::read(&data).unwrap();
        assert_eq!(
            contents.values[0].data(),
            &ExifData::Unknown {
                code: 13,
                count: 1,
                bytes: vec![0x44, 0x33, 0x22, 0x11],
            }
        );
        assert_eq!(
            contents.values[1].data(),
            &ExifData::Unknown {
                code: 99,
                count: 2,
                bytes: vec![0xAA, 0xBB, 0xCC, 0xDD],
            }
        );
    }

    #[test]
    fn test_gps_number_in_ifd0_uses_entry_shape() {
        // 0x0002 is GPSLatitude (three rationals) only inside the GPS IFD
        let data = block(&[(0x0002, 3, 1, [5, 0, 0, 0])], &[]);
        let contents = ExifReader::read(&data).unwrap();
        assert_eq!(contents.values[0].ifd(), ExifIfd::Primary);
        assert!(!contents.values[0].is_array());
        assert_eq!(contents.values[0].as_u32(), Some(5));
    }

    #[test]
    fn test_self_referencing_next_ifd() {
        let mut data = orientation_block();
        let len = data.len();
        data[len - 4..].copy_from_slice(&8u32.to_le_bytes());
        let contents = ExifReader::read(&data).unwrap();
        assert_eq!(contents.values.len(), 1);
        assert!(contents.thumbnail.is_none());
    }
}
