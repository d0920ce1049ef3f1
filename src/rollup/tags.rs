use crate::error::WarnCode;
use crate::rollup::models::{RawDayEntry, RawVideo};
use crate::rollup::warn::Warning;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Titles mapped to the tag the external tagger assigned them.
pub type TagStore = BTreeMap<String, String>;

pub fn load_tag_store(path: &Path) -> Result<TagStore> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: TagStore = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed
        .into_iter()
        .map(|(title, tag)| (title.trim().to_string(), tag.trim().to_string()))
        .filter(|(title, tag)| !title.is_empty() && !tag.is_empty())
        .collect())
}

/// Missing store files are fine; unreadable ones are reported and skipped.
pub fn load_optional_tag_store(path: &Path, warnings: &mut Vec<Warning>) -> TagStore {
    if !path.exists() {
        return TagStore::new();
    }
    match load_tag_store(path) {
        Ok(store) => store,
        Err(err) => {
            warnings.push(Warning::new(
                WarnCode::W004TagStoreUnreadable,
                "tag-store",
                path.display().to_string(),
                format!("{err:#}"),
            ));
            TagStore::new()
        }
    }
}

fn has_tag(video: &RawVideo) -> bool {
    video
        .tag
        .as_deref()
        .is_some_and(|tag| !tag.trim().is_empty())
}

fn stored_tag<'a>(video: &RawVideo, store: &'a TagStore) -> Option<&'a String> {
    let title = video.title.as_deref()?.trim();
    store.get(title)
}

/// Copy of `entries` with stored tags filled in for untagged videos, plus how
/// many videos received one.
pub fn apply_tag_store(entries: &[RawDayEntry], store: &TagStore) -> (Vec<RawDayEntry>, usize) {
    let mut applied = 0usize;
    let merged: Vec<RawDayEntry> = entries
        .iter()
        .map(|entry| RawDayEntry {
            date_label: entry.date_label.clone(),
            videos: entry
                .videos
                .iter()
                .map(|video| {
                    let mut out = video.clone();
                    if !has_tag(video)
                        && let Some(tag) = stored_tag(video, store)
                    {
                        out.tag = Some(tag.clone());
                        applied += 1;
                    }
                    out
                })
                .collect(),
        })
        .collect();
    (merged, applied)
}

/// Distinct titles that still carry no tag, in first-seen order.
pub fn untagged_titles(entries: &[RawDayEntry]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for video in entries.iter().flat_map(|entry| entry.videos.iter()) {
        if has_tag(video) {
            continue;
        }
        let Some(title) = video.title.as_deref().map(str::trim) else {
            continue;
        };
        if !title.is_empty() && seen.insert(title.to_string()) {
            out.push(title.to_string());
        }
    }
    out
}
