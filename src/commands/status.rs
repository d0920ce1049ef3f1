use anyhow::Result;
use std::env;

use crate::commands::CommandReport;
use crate::rollup::config::{load_config, resolve_config_path};
use crate::rollup::paths::resolve_paths;

include!(concat!(env!("OUT_DIR"), "/rollup_env_allowlist.rs"));

pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let mut report = CommandReport::new("status");

    report.detail(format!("build_id={}", env!("BUILD_UUID")));
    report.detail(format!("rollup_home={}", paths.rollup_home.display()));
    report.detail(format!("input_file={}", paths.input_file.display()));
    report.detail(format!("metadata_file={}", paths.metadata_file.display()));
    report.detail(format!("tag_store_file={}", paths.tag_store_file.display()));
    report.detail(format!("output_file={}", paths.output_file.display()));
    match resolve_config_path() {
        Some(path) if path.exists() => report.detail(format!("config_path={}", path.display())),
        Some(path) => report.detail(format!("config_path={} (absent, defaults)", path.display())),
        None => report.detail("config_path=unresolved (defaults)"),
    }

    for key in GENERATED_ROLLUP_ENV_ALLOWLIST {
        if let Ok(value) = env::var(key) {
            report.detail(format!("env.{key}={value}"));
        }
    }

    match load_config() {
        Ok(cfg) => {
            report.detail(format!(
                "classify.default_category={}",
                cfg.classify.default_category
            ));
            report.detail(format!(
                "classify.fallback_color={}",
                cfg.classify.fallback_color
            ));
            report.detail(format!(
                "classify.reject_ambiguous_tags={}",
                cfg.classify.reject_ambiguous_tags
            ));
            report.detail(format!("clock.timezone={}", cfg.clock.timezone));
            match cfg.clock.reference_date() {
                Ok(date) => report.detail(format!("clock.reference_date={date}")),
                Err(err) => report.issue(format!("clock unusable: {err:#}")),
            }
            report.detail(format!("output.root_label={}", cfg.output.root_label));
            report.detail(format!("output.pretty={}", cfg.output.pretty));
        }
        Err(err) => report.issue(format!("config invalid: {err:#}")),
    }

    if !paths.input_file.exists() {
        report.issue(format!(
            "missing input file ({}); run the history scraper first",
            paths.input_file.display()
        ));
    }

    Ok(report)
}
