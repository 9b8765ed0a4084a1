//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format)
//! - mluc: Multi-localized Unicode (v4 format)
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.14 (desc), 10.15 (mluc)

use crate::icc::error::IccError;
use crate::icc::types::TypeSignature;

/// Size of the type signature plus reserved bytes preceding every tag body
const TAG_HEADER: usize = 8;

/// mluc record: language, country, length, offset
const MLUC_RECORD_SIZE: usize = 12;

/// One localized string of an mluc tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    /// ISO 639-1 language code, e.g. `en`
    pub language: [u8; 2],
    /// ISO 3166-1 country code, e.g. `US`
    pub country: [u8; 2],
    pub text: String,
}

impl LocalizedString {
    pub fn new(language: [u8; 2], country: [u8; 2], text: impl Into<String>) -> Self {
        Self {
            language,
            country,
            text: text.into(),
        }
    }

    /// Locale as `ll-CC`
    pub fn locale(&self) -> String {
        let code = |b: [u8; 2]| String::from_utf8_lossy(&b).into_owned();
        format!("{}-{}", code(self.language), code(self.country))
    }
}

/// Text tag data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    /// Primary text content (English or default)
    pub text: String,
    /// All mluc records, in tag order
    pub localized: Vec<LocalizedString>,
}

impl TextData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            localized: Vec::new(),
        }
    }

    /// Parse 'text' type (simple ASCII)
    pub fn parse_text(data: &[u8]) -> Result<Self, IccError> {
        Ok(Self::new(ascii_until_nul(data)))
    }

    /// Parse 'desc' type (v2 profile description)
    pub fn parse_desc(data: &[u8]) -> Result<Self, IccError> {
        let corrupted = |reason: &'static str| IccError::corrupted(TypeSignature::DESC.0, reason);
        let count = data
            .get(..4)
            .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize)
            .ok_or_else(|| corrupted("description tag too small"))?;
        let ascii = count
            .checked_add(4)
            .and_then(|end| data.get(4..end))
            .ok_or_else(|| corrupted("description ASCII data truncated"))?;

        // The Unicode and ScriptCode parts that follow are rarely
        // populated and often broken
        Ok(Self::new(ascii_until_nul(ascii)))
    }

    /// Parse 'mluc' type (multi-localized Unicode)
    ///
    /// String offsets are relative to the start of the tag, eight bytes
    /// before `data`.
    pub fn parse_mluc(data: &[u8]) -> Result<Self, IccError> {
        let corrupted = |reason: &'static str| IccError::corrupted(TypeSignature::MLUC.0, reason);
        let u32_at = |i: usize| -> Option<usize> {
            let b = data.get(i..i + 4)?;
            Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize)
        };

        let (record_count, record_size) = u32_at(0)
            .zip(u32_at(4))
            .ok_or_else(|| corrupted("mluc tag too small"))?;
        if record_size < MLUC_RECORD_SIZE {
            return Err(corrupted("mluc record size too small"));
        }

        let mut localized = Vec::new();
        for i in 0..record_count {
            let Some(record) = i
                .checked_mul(record_size)
                .and_then(|off| off.checked_add(8))
                .and_then(|off| data.get(off..off + MLUC_RECORD_SIZE))
            else {
                break;
            };

            let len = u32::from_be_bytes([record[4], record[5], record[6], record[7]]) as usize;
            let offset = u32::from_be_bytes([record[8], record[9], record[10], record[11]]) as usize;
            let utf16 = offset
                .checked_sub(TAG_HEADER)
                .and_then(|start| data.get(start..start.checked_add(len)?));
            if let Some(text) = utf16.and_then(decode_utf16be) {
                localized.push(LocalizedString::new(
                    [record[0], record[1]],
                    [record[2], record[3]],
                    text,
                ));
            }
        }

        let text = localized
            .iter()
            .find(|l| &l.language == b"en")
            .or(localized.first())
            .map(|l| l.text.clone())
            .unwrap_or_default();

        Ok(Self { text, localized })
    }

    pub(crate) fn encode_text_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.text.as_bytes());
        out.push(0);
    }

    pub(crate) fn encode_desc_body(&self, out: &mut Vec<u8>) {
        let ascii: Vec<u8> = self
            .text
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect();
        out.extend_from_slice(&(ascii.len() as u32 + 1).to_be_bytes());
        out.extend_from_slice(&ascii);
        out.push(0);
        // Empty Unicode (language code, count) and ScriptCode (code, count, 67 bytes)
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&[0; 3]);
        out.extend_from_slice(&[0; 67]);
    }

    pub(crate) fn encode_mluc_body(&self, out: &mut Vec<u8>) {
        let fallback;
        let records = if self.localized.is_empty() {
            fallback = [LocalizedString::new(*b"en", *b"US", self.text.clone())];
            &fallback[..]
        } else {
            &self.localized[..]
        };

        let strings: Vec<Vec<u8>> = records
            .iter()
            .map(|r| r.text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            .collect();

        out.extend_from_slice(&(records.len() as u32).to_be_bytes());
        out.extend_from_slice(&(MLUC_RECORD_SIZE as u32).to_be_bytes());

        let mut offset = TAG_HEADER + 8 + records.len() * MLUC_RECORD_SIZE;
        for (record, s) in records.iter().zip(&strings) {
            out.extend_from_slice(&record.language);
            out.extend_from_slice(&record.country);
            out.extend_from_slice(&(s.len() as u32).to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            offset += s.len();
        }
        for s in &strings {
            out.extend_from_slice(s);
        }
    }

    /// Text for a language code such as `"de"`
    pub fn get_locale(&self, lang: &str) -> Option<&str> {
        self.localized
            .iter()
            .find(|l| l.language == lang.as_bytes())
            .map(|l| l.text.as_str())
    }
}

fn ascii_until_nul(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Decode UTF-16BE bytes to String, stopping at a NUL
fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let utf16: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();

    String::from_utf16(&utf16).ok()
}
