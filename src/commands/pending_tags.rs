use anyhow::Result;
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::rollup::models::load_day_entries;
use crate::rollup::paths::resolve_paths;
use crate::rollup::tags::{apply_tag_store, load_optional_tag_store, untagged_titles};
use crate::rollup::warn;

#[derive(Debug, Clone, Default)]
pub struct PendingTagsOptions {
    pub input: Option<PathBuf>,
    pub tags: Option<PathBuf>,
}

pub fn run(opts: &PendingTagsOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?.with_overrides(opts.input.clone(), None, opts.tags.clone(), None);
    let mut report = CommandReport::new("pending-tags");

    let entries = load_day_entries(&paths.input_file)?;
    let mut warnings = Vec::new();
    let store = load_optional_tag_store(&paths.tag_store_file, &mut warnings);
    warn::emit_all(&warnings);
    let (merged, applied) = apply_tag_store(&entries, &store);

    let pending = untagged_titles(&merged);
    report.detail(format!("tag_store={}", paths.tag_store_file.display()));
    report.detail(format!("tags_applied={applied}"));
    report.detail(format!("pending={}", pending.len()));
    for title in pending {
        report.detail(format!("untagged: {title}"));
    }
    Ok(report)
}
