use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown report format '{other}', expected text or json")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_file: PathBuf,
    pub report_format: ReportFormat,
    pub initial_setup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("log.txt"),
            report_format: ReportFormat::Text,
            initial_setup: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    log_file: Option<PathBuf>,
    report_format: Option<ReportFormat>,
    initial_setup: Option<bool>,
}

/// Defaults, then `config_path` if it exists, then the process environment.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", config_path.display()))?,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", config_path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.log_file {
        settings.log_file = v;
    }
    if let Some(v) = file_cfg.report_format {
        settings.report_format = v;
    }
    if let Some(v) = file_cfg.initial_setup {
        settings.initial_setup = v;
    }
    Ok(())
}

/// `APP__*` wins over `TRAINER_*` when both are set.
fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let var = |short: &str, long: &str| lookup(long).or_else(|| lookup(short));

    if let Some(v) = var("TRAINER_LOG_FILE", "APP__LOG_FILE") {
        settings.log_file = PathBuf::from(v);
    }
    if let Some(v) = var("TRAINER_REPORT_FORMAT", "APP__REPORT_FORMAT") {
        settings.report_format = v.parse()?;
    }
    if let Some(v) = var("TRAINER_INITIAL_SETUP", "APP__INITIAL_SETUP") {
        settings.initial_setup = parse_flag(&v)
            .with_context(|| format!("invalid initial setup flag '{v}'"))?;
    }
    Ok(())
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("expected true or false")),
    }
}
