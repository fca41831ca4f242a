//! Song records as served by `GET /api/songs`.

use crate::error::{CatalogError, Result};
use lyra_playback::Track;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One entry of the song list.
///
/// Every field is read leniently: missing fields and `null` become empty
/// strings, numbers and booleans are stringified, nested values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub artist: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl SongRecord {
    /// Map to a playable track.
    ///
    /// The song table has no album column, so every track gets `album`.
    pub fn into_track(self, album: &str) -> Track {
        Track::new(self.title, self.file_url, self.artist, album)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    })
}

/// Parse a song list response body.
///
/// The body must be a JSON array. Elements that are not objects are skipped
/// with a warning; the rest of the batch is kept.
pub fn parse_records(body: &str) -> Result<Vec<SongRecord>> {
    let values: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| CatalogError::Parse(format!("Expected a JSON array of songs: {}", e)))?;

    let mut records = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!(position, "Skipping song entry that is not an object");
            continue;
        }

        match serde_json::from_value::<SongRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(position, error = %e, "Skipping unreadable song entry"),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_records() {
        let body = r#"[
            {"id": 1, "title": "Song A", "artist": "Band", "file_url": "/music/a.mp3", "created_at": "2024-01-01T00:00:00Z"}
        ]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].title, "Song A");
        assert_eq!(records[0].file_url, "/music/a.mp3");
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let body = r#"[{"title": null, "file_url": "/music/x.mp3"}]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].artist, "");
        assert_eq!(records[0].file_url, "/music/x.mp3");
    }

    #[test]
    fn odd_field_types_are_tolerated() {
        let body = r#"[{"title": 42, "artist": true, "file_url": ["nested"]}]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records[0].title, "42");
        assert_eq!(records[0].artist, "true");
        assert_eq!(records[0].file_url, "");
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = r#"[1, "two", {"title": "Three"}, null]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Three");
    }

    #[test]
    fn non_array_body_is_an_error() {
        assert!(matches!(
            parse_records(r#"{"error": "Database error"}"#),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(parse_records("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn into_track_uses_album_placeholder() {
        let record = SongRecord {
            title: "Song".to_string(),
            artist: "Band".to_string(),
            file_url: "/music/song.mp3".to_string(),
            ..SongRecord::default()
        };

        let track = record.into_track("Album");
        assert_eq!(track.display_name(), "Song");
        assert_eq!(track.artist_name(), "Band");
        assert_eq!(track.source_locator(), "/music/song.mp3");
        assert_eq!(track.album_name(), "Album");
    }
}
