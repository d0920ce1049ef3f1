pub mod pending_tags;
pub mod rollup;
pub mod status;
pub mod verify;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::error::RollupError;
use crate::rollup::category::{CategoryClassifier, CategoryMetadata};
use crate::rollup::config::RollupConfig;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Build the classifier from the metadata file. A missing file means every
/// video lands in the default category; strict configs reject ambiguous tags.
pub fn load_classifier(
    metadata_file: &Path,
    cfg: &RollupConfig,
    report: &mut CommandReport,
) -> Result<CategoryClassifier> {
    let metadata = if metadata_file.exists() {
        CategoryMetadata::load(metadata_file)?
    } else {
        report.detail(format!(
            "metadata file {} missing; every video falls back to `{}`",
            metadata_file.display(),
            cfg.classify.default_category
        ));
        CategoryMetadata::default()
    };

    let classifier = CategoryClassifier::new(
        metadata,
        cfg.classify.default_category.clone(),
        cfg.classify.fallback_color.clone(),
    );
    if cfg.classify.reject_ambiguous_tags && !classifier.ambiguities().is_empty() {
        let tags: Vec<&str> = classifier
            .ambiguities()
            .iter()
            .map(|amb| amb.tag.as_str())
            .collect();
        return Err(RollupError::InvalidMetadata(format!(
            "tags listed under several categories: {}",
            tags.join(", ")
        ))
        .into());
    }
    Ok(classifier)
}
