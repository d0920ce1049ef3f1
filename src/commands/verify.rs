use anyhow::Result;
use std::path::PathBuf;

use crate::commands::{CommandReport, load_classifier};
use crate::rollup::config::{RollupConfig, load_config, parse_reference_date};
use crate::rollup::dates;
use crate::rollup::models::load_day_entries;
use crate::rollup::paths::resolve_paths;

#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub input: Option<PathBuf>,
    pub metadata: Option<PathBuf>,
    pub today: Option<String>,
    pub strict: bool,
}

pub fn run(opts: &VerifyOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("verify");

    let cfg = match load_config() {
        Ok(cfg) => {
            report.detail("config: ok");
            cfg
        }
        Err(err) => {
            report.issue(format!("config invalid: {err:#}"));
            RollupConfig::default()
        }
    };
    let paths = resolve_paths()?.with_overrides(
        opts.input.clone(),
        opts.metadata.clone(),
        None,
        None,
    );

    // Ambiguities are reported below, so the strict rejection is not wanted here.
    let mut lenient = cfg.clone();
    lenient.classify.reject_ambiguous_tags = false;
    match load_classifier(&paths.metadata_file, &lenient, &mut report) {
        Ok(classifier) => {
            report.detail(format!("metadata={}", paths.metadata_file.display()));
            for amb in classifier.ambiguities() {
                report.issue(format!(
                    "tag `{}` listed under {}; `{}` currently wins",
                    amb.tag,
                    amb.categories.join(", "),
                    amb.winner()
                ));
            }
        }
        Err(err) => report.issue(format!("metadata invalid: {err:#}")),
    }

    if !paths.input_file.exists() {
        report.detail(format!(
            "input {} not present; skipping date checks",
            paths.input_file.display()
        ));
        return Ok(report);
    }

    let reference_date = match opts.today.as_deref() {
        Some(raw) => parse_reference_date(raw)?,
        None => cfg.clock.reference_date()?,
    };
    match load_day_entries(&paths.input_file) {
        Ok(entries) => {
            report.detail(format!("input entries={}", entries.len()));
            for entry in &entries {
                let label = entry.date_label.as_deref().unwrap_or("");
                if dates::resolve(label, reference_date).is_some() {
                    continue;
                }
                let text = format!(
                    "unresolvable date label `{label}` ({} videos would be dropped)",
                    entry.videos.len()
                );
                if opts.strict {
                    report.issue(text);
                } else {
                    report.detail(text);
                }
            }
        }
        Err(err) => report.issue(format!("input invalid: {err:#}")),
    }

    Ok(report)
}
