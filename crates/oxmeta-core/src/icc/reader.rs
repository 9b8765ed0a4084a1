//! ICC Tag Table Reader
//!
//! Locates the tags of a profile without decoding them. The tag count is
//! clamped to what fits in the buffer and tags pointing outside it are
//! dropped, so a damaged table still yields its readable part.
//!
//! Tags may share data, so the bytes they cover together are capped at
//! [`MAX_TAG_EXPANSION`] times the profile size.

use std::collections::HashSet;
use std::ops::Range;

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader};
use super::types::TagSignature;

/// Header plus the tag count
pub const TAG_TABLE_OFFSET: usize = HEADER_SIZE + 4;

/// signature(4) + offset(4) + size(4)
pub const TAG_ENTRY_SIZE: usize = 12;

/// Cap on the summed size of all tags, as a multiple of the profile size
pub const MAX_TAG_EXPANSION: usize = 8;

/// Location of one tag inside the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagLocation {
    pub signature: TagSignature,
    pub range: Range<usize>,
}

pub(crate) fn read_tag_table(data: &[u8]) -> Result<(IccHeader, Vec<TagLocation>), IccError> {
    if data.len() < TAG_TABLE_OFFSET {
        return Err(IccError::TooSmall {
            expected: TAG_TABLE_OFFSET,
            actual: data.len(),
        });
    }
    let header = IccHeader::parse(data)?;

    let declared = u32::from_be_bytes([data[128], data[129], data[130], data[131]]) as usize;
    let available = (data.len() - TAG_TABLE_OFFSET) / TAG_ENTRY_SIZE;
    if declared > available {
        log::debug!(
            "tag table declares {} entries, only {} fit in {} bytes",
            declared,
            available,
            data.len()
        );
    }
    let count = declared.min(available);

    let mut tags: Vec<TagLocation> = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    let mut budget = data.len().saturating_mul(MAX_TAG_EXPANSION);
    for entry in data[TAG_TABLE_OFFSET..]
        .chunks_exact(TAG_ENTRY_SIZE)
        .take(count)
    {
        let field = |i: usize| u32::from_be_bytes([entry[i], entry[i + 1], entry[i + 2], entry[i + 3]]);
        let signature = TagSignature(field(0));
        let offset = field(4) as usize;
        let size = field(8) as usize;

        let Some(end) = offset.checked_add(size).filter(|&end| end <= data.len()) else {
            log::debug!(
                "skipping tag '{}': offset {} + size {} exceeds {} bytes",
                signature,
                offset,
                size,
                data.len()
            );
            continue;
        };
        if seen.contains(&signature) {
            log::debug!("skipping duplicate tag '{}'", signature);
            continue;
        }
        if size > budget {
            log::debug!(
                "skipping tag '{}': {} bytes exceed the remaining decode budget",
                signature,
                size
            );
            continue;
        }
        budget -= size;
        seen.insert(signature);
        tags.push(TagLocation {
            signature,
            range: offset..end,
        });
    }

    log::trace!("read {} of {} ICC tags", tags.len(), declared);
    Ok((header, tags))
}
