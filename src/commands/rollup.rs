use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::commands::{CommandReport, load_classifier};
use crate::rollup::config::{load_config, parse_reference_date};
use crate::rollup::models::load_day_entries;
use crate::rollup::paths::resolve_paths;
use crate::rollup::pipeline::run_rollup;
use crate::rollup::tags::{apply_tag_store, load_optional_tag_store};
use crate::rollup::util::{format_watch_time, sha256_hex};
use crate::rollup::warn;

#[derive(Debug, Clone, Default)]
pub struct RollupOptions {
    pub input: Option<PathBuf>,
    pub metadata: Option<PathBuf>,
    pub tags: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub today: Option<String>,
}

pub fn run(opts: &RollupOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    let paths = resolve_paths()?.with_overrides(
        opts.input.clone(),
        opts.metadata.clone(),
        opts.tags.clone(),
        opts.output.clone(),
    );
    let mut report = CommandReport::new("rollup");

    let reference_date = match opts.today.as_deref() {
        Some(raw) => parse_reference_date(raw)?,
        None => cfg.clock.reference_date()?,
    };
    report.detail(format!("reference_date={reference_date}"));
    report.detail(format!("input={}", paths.input_file.display()));

    let raw_entries = load_day_entries(&paths.input_file)?;
    let mut tag_warnings = Vec::new();
    let store = load_optional_tag_store(&paths.tag_store_file, &mut tag_warnings);
    let (entries, tags_applied) = apply_tag_store(&raw_entries, &store);
    report.detail(format!("tags_applied={tags_applied}"));

    let classifier = load_classifier(&paths.metadata_file, &cfg, &mut report)?;
    let mut outcome = run_rollup(
        &entries,
        reference_date,
        &classifier,
        &cfg.output.root_label,
    );
    tag_warnings.append(&mut outcome.warnings);
    let warnings = tag_warnings;

    let serialized = if cfg.output.pretty {
        serde_json::to_string_pretty(&outcome.tree)?
    } else {
        serde_json::to_string(&outcome.tree)?
    };
    if let Some(parent) = paths.output_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&paths.output_file, format!("{serialized}\n"))
        .with_context(|| format!("failed to write {}", paths.output_file.display()))?;

    let stats = &outcome.stats;
    report.detail(format!("output={}", paths.output_file.display()));
    report.detail(format!("entries={}", stats.entries));
    report.detail(format!("dropped_entries={}", stats.dropped_entries));
    report.detail(format!("dropped_videos={}", stats.dropped_videos));
    report.detail(format!("videos={}", stats.videos));
    report.detail(format!("days={}", stats.days));
    report.detail(format!("weeks={}", stats.weeks));
    report.detail(format!("watch_time={}", format_watch_time(stats.watch_seconds)));
    report.detail(format!("leaves={}", outcome.tree.leaves().len()));
    for week in outcome.tree.children() {
        report.detail(format!(
            "week `{}` watch_time={}",
            week.name,
            format_watch_time(week.total_value())
        ));
    }
    report.detail(format!("tree_sha256={}", sha256_hex(serialized.as_bytes())));

    warn::emit_all(&warnings);
    for warning in &warnings {
        report.detail(format!("warning: {}", warning.line()));
    }

    Ok(report)
}
