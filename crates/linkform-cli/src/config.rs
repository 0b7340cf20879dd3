//! Batch configuration files.
//!
//! A configuration file holds the batch (`jobs`, `default_hidden`) and an
//! optional `rules` table overriding the control heuristics. The format is
//! chosen by extension: `.json` is JSON, anything else is TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use linkform_model::BatchConfig;
use linkform_transform::ControlRules;
use serde::Deserialize;
use tracing::debug;

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub rules: ControlRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") | None => Ok(ConfigFormat::Toml),
        Some(other) => bail!("unsupported config format .{other} (expected .toml or .json)"),
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let format = detect_format(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config = parse_config(&text, format)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(
        path = %path.display(),
        jobs = config.batch.jobs.len(),
        hidden = config.batch.default_hidden.len(),
        rewrites = config.rules.label_rewrites.len(),
        "loaded configuration"
    );
    Ok(config)
}

fn parse_config(text: &str, format: ConfigFormat) -> Result<ConfigFile> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            detect_format(Path::new("jobs.JSON")).expect("format"),
            ConfigFormat::Json
        );
        assert_eq!(
            detect_format(Path::new("jobs.toml")).expect("format"),
            ConfigFormat::Toml
        );
        assert_eq!(
            detect_format(Path::new("jobs")).expect("format"),
            ConfigFormat::Toml
        );
        assert!(detect_format(Path::new("jobs.yaml")).is_err());
    }

    #[test]
    fn rules_table_overrides_defaults() {
        let text = r#"
[[jobs]]
source_table_id = "t"
destination_container_id = "d"
status = 1
layout = ["", "title"]

[rules]
textarea_labels = ["備考"]
"#;
        let config = parse_config(text, ConfigFormat::Toml).expect("parse");
        assert_eq!(config.batch.jobs.len(), 1);
        assert_eq!(config.rules.textarea_labels, vec!["備考"]);
        assert_eq!(
            config.rules.id_label_markers,
            ControlRules::default().id_label_markers
        );
    }
}
