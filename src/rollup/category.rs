use crate::error::{RollupError, WarnCode};
use crate::rollup::warn::Warning;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_CATEGORY: &str = "Otros";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryInfo {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Category table in the order the metadata file declares it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMetadata {
    pub categories: Vec<(String, CategoryInfo)>,
}

impl CategoryMetadata {
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(RollupError::InvalidMetadata(
                "expected an object keyed by category name".into(),
            )
            .into());
        };
        let mut categories = Vec::with_capacity(map.len());
        for (name, raw) in map {
            let info: CategoryInfo = serde_json::from_value(raw).map_err(|err| {
                RollupError::InvalidMetadata(format!("category `{name}`: {err}"))
            })?;
            categories.push((name, info));
        }
        Ok(Self { categories })
    }

    /// Accepts plain JSON as well as JSON5 (comments, trailing commas).
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value =
            json5::from_str(raw).map_err(|err| RollupError::InvalidMetadata(err.to_string()))?;
        Self::from_value(value)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn get(&self, name: &str) -> Option<&CategoryInfo> {
        self.categories
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, info)| info)
    }
}

/// A tag listed under more than one category. The last category wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagAmbiguity {
    pub tag: String,
    pub categories: Vec<String>,
}

impl TagAmbiguity {
    pub fn winner(&self) -> &str {
        self.categories.last().map(String::as_str).unwrap_or("")
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    metadata: CategoryMetadata,
    lookup: HashMap<String, String>,
    ambiguities: Vec<TagAmbiguity>,
    default_category: String,
    fallback_color: String,
}

impl CategoryClassifier {
    pub fn new(
        metadata: CategoryMetadata,
        default_category: impl Into<String>,
        fallback_color: impl Into<String>,
    ) -> Self {
        let mut lookup: HashMap<String, String> = HashMap::new();
        let mut seen_under: HashMap<String, usize> = HashMap::new();
        let mut ambiguities: Vec<TagAmbiguity> = Vec::new();

        for (name, info) in &metadata.categories {
            for tag in &info.tags {
                let key = normalize_tag(tag);
                if key.is_empty() {
                    continue;
                }
                if let Some(previous) = lookup.insert(key.clone(), name.clone())
                    && previous != *name
                {
                    match seen_under.get(&key) {
                        Some(&idx) => ambiguities[idx].categories.push(name.clone()),
                        None => {
                            seen_under.insert(key.clone(), ambiguities.len());
                            ambiguities.push(TagAmbiguity {
                                tag: key,
                                categories: vec![previous, name.clone()],
                            });
                        }
                    }
                }
            }
        }

        Self {
            metadata,
            lookup,
            ambiguities,
            default_category: default_category.into(),
            fallback_color: fallback_color.into(),
        }
    }

    pub fn classify(&self, tag: Option<&str>) -> &str {
        tag.map(normalize_tag)
            .and_then(|key| self.lookup.get(&key))
            .map(String::as_str)
            .unwrap_or(&self.default_category)
    }

    pub fn color_of(&self, category: &str) -> &str {
        self.metadata
            .get(category)
            .and_then(|info| info.color.as_deref())
            .filter(|color| !color.trim().is_empty())
            .unwrap_or(&self.fallback_color)
    }

    pub fn emoji_of(&self, category: &str) -> Option<&str> {
        self.metadata
            .get(category)
            .map(|info| info.emoji.as_str())
            .filter(|emoji| !emoji.trim().is_empty())
    }

    pub fn ambiguities(&self) -> &[TagAmbiguity] {
        &self.ambiguities
    }

    pub fn ambiguity_warnings(&self) -> Vec<Warning> {
        self.ambiguities
            .iter()
            .map(|amb| {
                Warning::new(
                    WarnCode::W003TagAmbiguous,
                    "classifier",
                    amb.tag.clone(),
                    format!(
                        "tag listed under {}; `{}` wins",
                        amb.categories.join(", "),
                        amb.winner()
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = r##"{
        // comments are allowed in metadata files
        "Música": { "tags": ["Rock", "pop ", "jazz"], "emoji": "🎵", "color": "#e15759" },
        "Gaming": { "tags": ["videojuegos", "speedrun"], "emoji": "🎮", "color": "#4e79a7" },
        "Cine":   { "tags": ["trailer", "Rock"], "emoji": "🎬" },
    }"##;

    fn classifier() -> CategoryClassifier {
        let metadata = CategoryMetadata::parse(METADATA).expect("parse metadata");
        CategoryClassifier::new(metadata, DEFAULT_CATEGORY, "#ddd")
    }

    #[test]
    fn metadata_keeps_declaration_order() {
        let metadata = CategoryMetadata::parse(METADATA).expect("parse metadata");
        let names: Vec<&str> = metadata
            .categories
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Música", "Gaming", "Cine"]);
    }

    #[test]
    fn tags_classify_case_insensitively() {
        let c = classifier();
        assert_eq!(c.classify(Some("POP")), "Música");
        assert_eq!(c.classify(Some(" Speedrun ")), "Gaming");
    }

    #[test]
    fn missing_or_unknown_tag_falls_back() {
        let c = classifier();
        assert_eq!(c.classify(None), "Otros");
        assert_eq!(c.classify(Some("cocina")), "Otros");
    }

    #[test]
    fn duplicate_tag_is_last_write_wins_and_flagged() {
        let c = classifier();
        assert_eq!(c.classify(Some("rock")), "Cine");
        assert_eq!(
            c.ambiguities(),
            &[TagAmbiguity {
                tag: "rock".into(),
                categories: vec!["Música".into(), "Cine".into()],
            }]
        );
        let warnings = c.ambiguity_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarnCode::W003TagAmbiguous);
    }

    #[test]
    fn colors_fall_back_when_missing() {
        let c = classifier();
        assert_eq!(c.color_of("Gaming"), "#4e79a7");
        assert_eq!(c.color_of("Cine"), "#ddd");
        assert_eq!(c.color_of("Otros"), "#ddd");
        assert_eq!(c.emoji_of("Cine"), Some("🎬"));
        assert_eq!(c.emoji_of("Otros"), None);
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        assert!(CategoryMetadata::parse("[1, 2]").is_err());
    }
}
