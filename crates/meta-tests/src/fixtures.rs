//! EXIF block builder
//!
//! Builds TIFF structures independently of the oxmeta writer: entries
//! sorted by tag, all directories first and all out-of-line data after
//! them, the layout most camera firmware produces.

/// Directory of a fixture entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Ifd0,
    Exif,
    Gps,
    Ifd1,
}

const DIRS: [Dir; 4] = [Dir::Ifd0, Dir::Exif, Dir::Gps, Dir::Ifd1];

#[derive(Debug, Clone)]
struct Entry {
    tag: u16,
    type_code: u16,
    count: u32,
    payload: Vec<u8>,
}

/// Minimal JPEG stream usable as a thumbnail
pub const TINY_JPEG: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x04, 0x01, 0x02, 0xFF, 0xC0, 0x00, 0x03, 0x08, 0xFF, 0xD9,
];

#[derive(Debug, Clone)]
pub struct TiffBuilder {
    big_endian: bool,
    prefix: bool,
    dirs: [Vec<Entry>; 4],
    thumbnail: Option<Vec<u8>>,
}

impl TiffBuilder {
    pub fn little_endian() -> Self {
        Self {
            big_endian: false,
            prefix: false,
            dirs: Default::default(),
            thumbnail: None,
        }
    }

    pub fn big_endian() -> Self {
        Self {
            big_endian: true,
            ..Self::little_endian()
        }
    }

    /// Prepend `Exif\0\0`, as the JPEG APP1 segment carries it
    pub fn with_prefix(mut self) -> Self {
        self.prefix = true;
        self
    }

    fn u16_bytes(&self, v: u16) -> [u8; 2] {
        if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() }
    }

    fn u32_bytes(&self, v: u32) -> [u8; 4] {
        if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() }
    }

    /// Entry with a pre-encoded payload
    pub fn raw(mut self, dir: Dir, tag: u16, type_code: u16, count: u32, payload: Vec<u8>) -> Self {
        self.dirs[dir as usize].push(Entry {
            tag,
            type_code,
            count,
            payload,
        });
        self
    }

    pub fn ascii(self, dir: Dir, tag: u16, text: &str) -> Self {
        let mut payload = text.as_bytes().to_vec();
        payload.push(0);
        let count = payload.len() as u32;
        self.raw(dir, tag, 2, count, payload)
    }

    pub fn byte(self, dir: Dir, tag: u16, values: &[u8]) -> Self {
        self.raw(dir, tag, 1, values.len() as u32, values.to_vec())
    }

    pub fn short(self, dir: Dir, tag: u16, values: &[u16]) -> Self {
        let payload = values.iter().flat_map(|&v| self.u16_bytes(v)).collect();
        self.raw(dir, tag, 3, values.len() as u32, payload)
    }

    pub fn long(self, dir: Dir, tag: u16, values: &[u32]) -> Self {
        let payload = values.iter().flat_map(|&v| self.u32_bytes(v)).collect();
        self.raw(dir, tag, 4, values.len() as u32, payload)
    }

    pub fn rational(self, dir: Dir, tag: u16, values: &[(u32, u32)]) -> Self {
        let payload = values
            .iter()
            .flat_map(|&(n, d)| [self.u32_bytes(n), self.u32_bytes(d)])
            .flatten()
            .collect();
        self.raw(dir, tag, 5, values.len() as u32, payload)
    }

    pub fn undefined(self, dir: Dir, tag: u16, bytes: &[u8]) -> Self {
        self.raw(dir, tag, 7, bytes.len() as u32, bytes.to_vec())
    }

    pub fn thumbnail(mut self, jpeg: &[u8]) -> Self {
        self.thumbnail = Some(jpeg.to_vec());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let present = |d: Dir| match d {
            Dir::Ifd0 => true,
            Dir::Ifd1 => !self.dirs[d as usize].is_empty() || self.thumbnail.is_some(),
            _ => !self.dirs[d as usize].is_empty(),
        };

        // Pointer entries are inline, so directory sizes are known up front
        let mut dir_offsets = [0u32; 4];
        let mut cursor = 8usize;
        let mut entry_lists: [Vec<Entry>; 4] = Default::default();
        for d in DIRS.into_iter().filter(|&d| present(d)) {
            let mut entries = self.dirs[d as usize].clone();
            let pointers = match d {
                Dir::Ifd0 => [(0x8769, Dir::Exif), (0x8825, Dir::Gps)]
                    .into_iter()
                    .filter(|&(_, sub)| present(sub))
                    .count(),
                Dir::Ifd1 if self.thumbnail.is_some() => 2,
                _ => 0,
            };
            dir_offsets[d as usize] = cursor as u32;
            cursor += 2 + 12 * (entries.len() + pointers) + 4;
            entries.sort_by_key(|e| e.tag);
            entry_lists[d as usize] = entries;
        }

        let data_start = cursor;
        let data_len: usize = entry_lists
            .iter()
            .flatten()
            .filter(|e| e.payload.len() > 4)
            .map(|e| e.payload.len().next_multiple_of(2))
            .sum();
        let thumb_offset = (data_start + data_len) as u32;

        if present(Dir::Exif) {
            entry_lists[0].push(self.pointer(0x8769, dir_offsets[Dir::Exif as usize]));
        }
        if present(Dir::Gps) {
            entry_lists[0].push(self.pointer(0x8825, dir_offsets[Dir::Gps as usize]));
        }
        if let Some(thumb) = &self.thumbnail {
            entry_lists[3].push(self.pointer(0x0201, thumb_offset));
            entry_lists[3].push(self.pointer(0x0202, thumb.len() as u32));
        }
        for entries in &mut entry_lists {
            entries.sort_by_key(|e| e.tag);
        }

        let mut out = Vec::new();
        out.extend_from_slice(if self.big_endian { b"MM" } else { b"II" });
        out.extend_from_slice(&self.u16_bytes(42));
        out.extend_from_slice(&self.u32_bytes(8));

        let mut data = Vec::new();
        for d in DIRS.into_iter().filter(|&d| present(d)) {
            let entries = &entry_lists[d as usize];
            out.extend_from_slice(&self.u16_bytes(entries.len() as u16));
            for e in entries {
                out.extend_from_slice(&self.u16_bytes(e.tag));
                out.extend_from_slice(&self.u16_bytes(e.type_code));
                out.extend_from_slice(&self.u32_bytes(e.count));
                if e.payload.len() > 4 {
                    let offset = (data_start + data.len()) as u32;
                    out.extend_from_slice(&self.u32_bytes(offset));
                    data.extend_from_slice(&e.payload);
                    data.resize(data.len().next_multiple_of(2), 0);
                } else {
                    let mut inline = [0u8; 4];
                    inline[..e.payload.len()].copy_from_slice(&e.payload);
                    out.extend_from_slice(&inline);
                }
            }
            let next = match d {
                Dir::Ifd0 if present(Dir::Ifd1) => dir_offsets[Dir::Ifd1 as usize],
                _ => 0,
            };
            out.extend_from_slice(&self.u32_bytes(next));
        }
        out.extend_from_slice(&data);
        if let Some(thumb) = &self.thumbnail {
            out.extend_from_slice(thumb);
        }

        if self.prefix {
            let mut prefixed = b"Exif\0\0".to_vec();
            prefixed.extend_from_slice(&out);
            prefixed
        } else {
            out
        }
    }

    fn pointer(&self, tag: u16, value: u32) -> Entry {
        Entry {
            tag,
            type_code: 4,
            count: 1,
            payload: self.u32_bytes(value).to_vec(),
        }
    }
}

/// A typical camera block: IFD0, Exif, GPS and a thumbnail
pub fn camera_exif(big_endian: bool) -> Vec<u8> {
    let builder = if big_endian {
        TiffBuilder::big_endian()
    } else {
        TiffBuilder::little_endian()
    };
    builder
        .with_prefix()
        .ascii(Dir::Ifd0, 0x010F, "Canon")
        .ascii(Dir::Ifd0, 0x0110, "Canon EOS 5D Mark IV")
        .short(Dir::Ifd0, 0x0112, &[1])
        .rational(Dir::Ifd0, 0x011A, &[(72, 1)])
        .rational(Dir::Ifd0, 0x011B, &[(72, 1)])
        .short(Dir::Ifd0, 0x0128, &[2])
        .ascii(Dir::Ifd0, 0x0132, "2024:05:17 14:03:22")
        .rational(Dir::Exif, 0x829A, &[(1, 250)])
        .rational(Dir::Exif, 0x829D, &[(28, 10)])
        .short(Dir::Exif, 0x8827, &[400])
        .undefined(Dir::Exif, 0x9000, b"0231")
        .ascii(Dir::Exif, 0x9003, "2024:05:17 14:03:22")
        .short(Dir::Exif, 0x9209, &[16])
        .undefined(Dir::Exif, 0x927C, &[0x4D, 0x4E, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06])
        // Vendor tag not in any public table
        .long(Dir::Exif, 0xC6F3, &[0xDEAD_BEEF, 7])
        .byte(Dir::Gps, 0x0000, &[2, 3, 0, 0])
        .ascii(Dir::Gps, 0x0001, "N")
        .rational(Dir::Gps, 0x0002, &[(52, 1), (22, 1), (1234, 100)])
        .ascii(Dir::Gps, 0x0003, "E")
        .rational(Dir::Gps, 0x0004, &[(4, 1), (53, 1), (3120, 100)])
        .short(Dir::Ifd1, 0x0103, &[6])
        .thumbnail(TINY_JPEG)
        .build()
}
