use crate::error::RollupError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One scraped video record, exactly as the history scraper emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVideo {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "videoUrl", default)]
    pub video_url: Option<String>,
    #[serde(rename = "canal", default)]
    pub channel: Option<String>,
    #[serde(rename = "duracion", default)]
    pub duration_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDayEntry {
    #[serde(rename = "fecha", default)]
    pub date_label: Option<String>,
    #[serde(default)]
    pub videos: Vec<RawVideo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVideo {
    pub raw: RawVideo,
    pub duration_seconds: u64,
    pub category: String,
}

impl NormalizedVideo {
    pub fn label(&self) -> &str {
        self.raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("(sin título)")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.raw.thumbnail_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub videos: Vec<NormalizedVideo>,
}

pub fn load_day_entries(path: &Path) -> Result<Vec<RawDayEntry>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: Vec<RawDayEntry> = serde_json::from_str(&raw).map_err(|err| {
        RollupError::InvalidInput(format!("failed to parse {}: {err}", path.display()))
    })?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scraper_payload_deserializes_with_nulls_and_missing_tag() {
        let raw = r#"[{
            "fecha": "hoy",
            "videos": [
                {"titulo": "Song", "thumbnail": null, "videoUrl": "https://y/1",
                 "canal": "Band", "duracion": "3:20"},
                {"titulo": null, "thumbnail": "https://i/2", "videoUrl": null,
                 "canal": null, "duracion": null, "tag": "rock"}
            ]
        }]"#;
        let entries: Vec<RawDayEntry> = serde_json::from_str(raw).expect("parse");
        assert_eq!(entries[0].date_label.as_deref(), Some("hoy"));
        assert_eq!(entries[0].videos.len(), 2);
        assert_eq!(entries[0].videos[0].tag, None);
        assert_eq!(entries[0].videos[1].tag.as_deref(), Some("rock"));
        assert!(entries[0].videos[1].duration_label.is_none());
    }

    #[test]
    fn untitled_video_gets_placeholder_label() {
        let video = NormalizedVideo {
            raw: RawVideo {
                title: Some("   ".into()),
                thumbnail_url: None,
                video_url: None,
                channel: None,
                duration_label: None,
                tag: None,
            },
            duration_seconds: 0,
            category: "Otros".into(),
        };
        assert_eq!(video.label(), "(sin título)");
    }
}
