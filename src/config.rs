//! Configuration file support for `codescope`.
//!
//! Provides loading of TOML configuration and merging with command-line
//! arguments. CLI arguments take precedence over config file values, which
//! take precedence over the core's built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use codescope_core::settings::{ProjectOptions, Settings};

/// Default configuration file names to search for.
const DEFAULT_CONFIG_FILES: &[&str] = &["Codescope.toml", ".codescope.toml", "codescope.toml"];

/// A `codescope` configuration file.
///
/// Merge strategy, highest priority first:
/// 1. CLI arguments
/// 2. Config file values
/// 3. [`Settings`]/[`ProjectOptions`] defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CodescopeConfig {
    /// General settings that apply to every command.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Walker settings forwarded to per-module analysis.
    #[serde(default)]
    pub settings: Settings,

    /// Project-level analysis options.
    #[serde(default)]
    pub project: ProjectOptions,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Default path to analyze if not specified via CLI.
    pub path: Option<PathBuf>,

    /// Default output format (`table`, `json`, or `yaml`).
    pub output: Option<String>,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Loads configuration from a specific file path.
///
/// Returns `Ok(None)` if the file doesn't exist; an error if it exists but
/// can't be parsed.
pub fn load_config_from_path(path: &Path) -> Result<Option<CodescopeConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file from {}", path.display()))?;

    let config: CodescopeConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse configuration file from {}", path.display()))?;

    Ok(Some(config))
}

/// Searches the current directory and its ancestors for one of
/// [`DEFAULT_CONFIG_FILES`].
pub fn discover_and_load_config() -> Result<Option<(PathBuf, CodescopeConfig)>> {
    let mut current_dir = std::env::current_dir().context("failed to get current directory")?;

    loop {
        for config_name in DEFAULT_CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if let Some(config) = load_config_from_path(&config_path)? {
                return Ok(Some((config_path, config)));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Loads configuration from `config_path` if given, else discovers it from
/// default locations.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<(PathBuf, CodescopeConfig)>> {
    if let Some(path) = config_path {
        load_config_from_path(path).map(|opt| opt.map(|config| (path.to_path_buf(), config)))
    } else {
        discover_and_load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        write!(file, "{content}").expect("failed to write temp file");
        file
    }

    #[test]
    fn missing_file_returns_none() {
        let result = load_config_from_path(Path::new("/nonexistent/codescope.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let file = write_config("");
        let config = load_config_from_path(file.path()).unwrap().unwrap();
        assert_eq!(config, CodescopeConfig::default());
    }

    #[test]
    fn settings_and_project_sections_override_defaults() {
        let file = write_config(
            r#"
            [settings]
            forin = true
            newmi = true

            [project]
            no_core_size = true
            "#,
        );
        let config = load_config_from_path(file.path()).unwrap().unwrap();
        assert!(config.settings.forin);
        assert!(config.settings.newmi);
        // Untouched settings keep their core default.
        assert!(config.settings.switchcase);
        assert!(config.project.no_core_size);
        assert!(!config.project.skip_calculation);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let file = write_config("typo_field = true");
        let result = load_config_from_path(file.path());
        assert!(result.is_err());
    }
}
