use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RollupPaths {
    pub rollup_home: PathBuf,
    pub input_file: PathBuf,
    pub metadata_file: PathBuf,
    pub tag_store_file: PathBuf,
    pub output_file: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<RollupPaths> {
    let rollup_home = match env::var("ROLLUP_HOME") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => required_home_dir()?.join(".watch_rollup"),
    };

    let input_file = env_or_default_path("ROLLUP_INPUT", rollup_home.join("videos-scrap.json"));
    let metadata_file =
        env_or_default_path("ROLLUP_METADATA", rollup_home.join("categories.json"));
    let tag_store_file = env_or_default_path("ROLLUP_TAG_STORE", rollup_home.join("tags.json"));
    let output_file = env_or_default_path("ROLLUP_OUTPUT", rollup_home.join("treemap.json"));

    Ok(RollupPaths {
        rollup_home,
        input_file,
        metadata_file,
        tag_store_file,
        output_file,
    })
}

impl RollupPaths {
    /// Apply per-invocation overrides from the command line.
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        metadata: Option<PathBuf>,
        tag_store: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(input) = input {
            self.input_file = input;
        }
        if let Some(metadata) = metadata {
            self.metadata_file = metadata;
        }
        if let Some(tag_store) = tag_store {
            self.tag_store_file = tag_store;
        }
        if let Some(output) = output {
            self.output_file = output;
        }
        self
    }
}
