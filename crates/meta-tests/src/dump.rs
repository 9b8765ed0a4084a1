//! JSON tag dumps
//!
//! Flattens an EXIF profile into serializable rows so two profiles can be
//! compared, or a failing comparison printed, as JSON.

use oxmeta_core::exif::ExifProfile;
use serde::{Deserialize, Serialize};

/// One EXIF value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDump {
    pub ifd: String,
    pub tag: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data_type: String,
    pub value: String,
}

/// Rows for every value, in profile order
pub fn dump_exif(profile: &ExifProfile) -> Vec<TagDump> {
    profile
        .values()
        .map(|v| TagDump {
            ifd: format!("{:?}", v.ifd()),
            tag: v.tag().0,
            name: v.tag().name().map(str::to_string),
            data_type: format!("{:?}", v.data_type()),
            value: v.string_value(),
        })
        .collect()
}

/// Rows sorted by directory and tag, for order-insensitive comparison
pub fn sorted_dump(profile: &ExifProfile) -> Vec<TagDump> {
    let mut rows = dump_exif(profile);
    rows.sort_by(|a, b| (&a.ifd, a.tag).cmp(&(&b.ifd, b.tag)));
    rows
}

pub fn to_json(rows: &[TagDump]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::camera_exif;

    #[test]
    fn test_dump_round_trips_through_json() {
        let profile = ExifProfile::from_bytes(&camera_exif(false)).unwrap();
        let rows = dump_exif(&profile);
        let json = to_json(&rows).unwrap();
        let back: Vec<TagDump> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rows);
        assert!(json.contains("\"Make\""));
    }
}
