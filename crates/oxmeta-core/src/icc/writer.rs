//! ICC Profile Writer
//!
//! ```text
//! header (128) | tag count | tag table (12 × n) | tag data, 4-byte aligned
//! ```
//!
//! Identical payloads are written once and shared by all tags that carry
//! them, the way `desc`/`dmdd` commonly share data in the wild.

use std::collections::HashMap;

use super::header::HEADER_SIZE;
use super::reader::{TAG_ENTRY_SIZE, TAG_TABLE_OFFSET};
use super::types::TagSignature;

/// Assemble a profile from a header and encoded tags
///
/// The size field is set to the output length and the profile ID is zeroed,
/// since it no longer matches the content.
pub(crate) fn write_profile(header: &[u8; HEADER_SIZE], tags: &[(TagSignature, &[u8])]) -> Vec<u8> {
    let table_end = TAG_TABLE_OFFSET + tags.len() * TAG_ENTRY_SIZE;
    let mut out = Vec::with_capacity(table_end + tags.iter().map(|(_, d)| d.len() + 3).sum::<usize>());
    out.extend_from_slice(header);
    out.extend_from_slice(&(tags.len() as u32).to_be_bytes());
    out.resize(table_end, 0);

    let mut written: HashMap<&[u8], (u32, u32)> = HashMap::new();
    for (i, (signature, payload)) in tags.iter().enumerate() {
        let (offset, size) = match written.get(payload) {
            Some(&location) => location,
            None => {
                align4(&mut out);
                let location = (out.len() as u32, payload.len() as u32);
                out.extend_from_slice(payload);
                written.insert(payload, location);
                location
            }
        };

        let at = TAG_TABLE_OFFSET + i * TAG_ENTRY_SIZE;
        out[at..at + 4].copy_from_slice(&signature.0.to_be_bytes());
        out[at + 4..at + 8].copy_from_slice(&offset.to_be_bytes());
        out[at + 8..at + 12].copy_from_slice(&size.to_be_bytes());
    }
    align4(&mut out);

    let size = out.len() as u32;
    out[0..4].copy_from_slice(&size.to_be_bytes());
    out[84..100].fill(0);
    log::trace!("wrote {} byte ICC profile with {} tags", size, tags.len());
    out
}

fn align4(out: &mut Vec<u8>) {
    let padded = out.len().next_multiple_of(4);
    out.resize(padded, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::reader::read_tag_table;

    #[test]
    fn test_layout_and_sharing() {
        let mut header = [0u8; HEADER_SIZE];
        header[84] = 0xAA;
        let desc: &[u8] = b"text\0\0\0\0abc\0";
        let odd: &[u8] = b"sig \0\0\0\0RGB";
        let tags = [
            (TagSignature::DESC, desc),
            (TagSignature::TECH, odd),
            (TagSignature::DMDD, desc),
        ];
        let out = write_profile(&header, &tags);

        assert_eq!(out.len() % 4, 0);
        assert_eq!(u32::from_be_bytes([out[0], out[1], out[2], out[3]]) as usize, out.len());
        assert_eq!(out[84], 0);

        let (_, located) = read_tag_table(&out).unwrap();
        assert_eq!(located.len(), 3);
        assert_eq!(located[0].range, located[2].range);
        assert_eq!(&out[located[1].range.clone()], odd);
        for tag in &located {
            assert_eq!(tag.range.start % 4, 0);
        }
    }

    #[test]
    fn test_empty_table() {
        let out = write_profile(&[0u8; HEADER_SIZE], &[]);
        assert_eq!(out.len(), TAG_TABLE_OFFSET);
    }
}
