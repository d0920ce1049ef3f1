use crate::error::RollupError;
use crate::rollup::category::DEFAULT_CATEGORY;
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub default_category: String,
    pub fallback_color: String,
    pub reject_ambiguous_tags: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            fallback_color: "#ddd".to_string(),
            reject_ambiguous_tags: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// `local` or an IANA zone name such as `Europe/Madrid`.
    pub timezone: String,
    pub reference_date: Option<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            reference_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root_label: String,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_label: "root".to_string(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RollupConfig {
    pub classify: ClassifyConfig,
    pub clock: ClockConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialRollupConfig {
    classify: Option<ClassifyConfig>,
    clock: Option<ClockConfig>,
    output: Option<OutputConfig>,
}

impl ClockConfig {
    /// The pinned reference date, if one is configured.
    pub fn pinned_date(&self) -> Result<Option<NaiveDate>> {
        let Some(raw) = self.reference_date.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        parse_reference_date(raw).map(Some)
    }

    /// Today's date in the configured zone.
    pub fn today(&self) -> Result<NaiveDate> {
        if self.timezone.trim().eq_ignore_ascii_case("local") {
            return Ok(Local::now().date_naive());
        }
        let tz = parse_timezone(&self.timezone)?;
        Ok(Utc::now().with_timezone(&tz).date_naive())
    }

    pub fn reference_date(&self) -> Result<NaiveDate> {
        match self.pinned_date()? {
            Some(date) => Ok(date),
            None => self.today(),
        }
    }
}

pub fn parse_reference_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| anyhow!("invalid reference date `{raw}`: expected YYYY-MM-DD ({err})"))
}

fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|err| anyhow!("invalid timezone `{raw}`: {err}"))
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => {
            let trimmed = v.trim();
            match trimmed {
                "1" | "true" | "TRUE" | "yes" | "on" => true,
                "0" | "false" | "FALSE" | "no" | "off" => false,
                _ => fallback,
            }
        }
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_optional_string(var: &str, fallback: Option<String>) -> Option<String> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => fallback,
    }
}

fn validate(cfg: &RollupConfig) -> Result<()> {
    if cfg.classify.default_category.trim().is_empty() {
        return Err(anyhow!("invalid default category: cannot be empty"));
    }
    if cfg.output.root_label.trim().is_empty() {
        return Err(anyhow!("invalid root label: cannot be empty"));
    }
    if !cfg.clock.timezone.trim().eq_ignore_ascii_case("local") {
        parse_timezone(&cfg.clock.timezone)?;
    }
    cfg.clock.pinned_date()?;
    Ok(())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("ROLLUP_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".watch_rollup").join("rollup.toml"))
}

fn merge_file_config(base: &mut RollupConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialRollupConfig = toml::from_str(&raw).map_err(|err| {
        RollupError::InvalidConfig(format!("failed to parse {}: {err}", path.display()))
    })?;
    if let Some(classify) = parsed.classify {
        base.classify = classify;
    }
    if let Some(clock) = parsed.clock {
        base.clock = clock;
    }
    if let Some(output) = parsed.output {
        base.output = output;
    }
    Ok(())
}

pub fn load_config() -> Result<RollupConfig> {
    let mut cfg = RollupConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.classify.default_category =
        env_or_string("ROLLUP_DEFAULT_CATEGORY", &cfg.classify.default_category);
    cfg.classify.fallback_color =
        env_or_string("ROLLUP_FALLBACK_COLOR", &cfg.classify.fallback_color);
    cfg.classify.reject_ambiguous_tags = env_or_bool(
        "ROLLUP_REJECT_AMBIGUOUS_TAGS",
        cfg.classify.reject_ambiguous_tags,
    );
    cfg.clock.timezone = env_or_string("ROLLUP_TIMEZONE", &cfg.clock.timezone);
    cfg.clock.reference_date =
        env_or_optional_string("ROLLUP_REFERENCE_DATE", cfg.clock.reference_date.clone());
    cfg.output.root_label = env_or_string("ROLLUP_ROOT_LABEL", &cfg.output.root_label);
    cfg.output.pretty = env_or_bool("ROLLUP_OUTPUT_PRETTY", cfg.output.pretty);

    validate(&cfg)?;
    Ok(cfg)
}
