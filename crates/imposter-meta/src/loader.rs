//! Settings loading
//!
//! Format is detected from the file extension. YAML is the native format
//! and the fallback for unknown extensions.

use std::fs;
use std::path::{Path, PathBuf};

use crate::path::resolve_settings_path_with;
use crate::{Error, Result, Settings};

/// Settings files larger than this are rejected before parsing.
pub const MAX_SETTINGS_SIZE: u64 = 1024 * 1024;

/// Serialization format of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Yaml,
    Json,
    Toml,
}

impl SettingsFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => SettingsFormat::Json,
            "toml" => SettingsFormat::Toml,
            _ => SettingsFormat::Yaml,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SettingsFormat::Yaml => "YAML",
            SettingsFormat::Json => "JSON",
            SettingsFormat::Toml => "TOML",
        }
    }
}

/// Load settings from `path`, expanding a leading `~` first.
pub fn load_settings(path: &str) -> Result<Settings> {
    load_settings_with_home(path, dirs::home_dir)
}

/// Like [`load_settings`], asking `home_dir` for the directory `~` stands for.
pub fn load_settings_with_home<F>(path: &str, home_dir: F) -> Result<Settings>
where
    F: FnOnce() -> Option<PathBuf>,
{
    let native = resolve_settings_path_with(path, home_dir)?;
    tracing::debug!(path = %native.display(), "Loading settings");

    let metadata = fs::metadata(&native).map_err(|e| Error::io(path, e))?;
    if metadata.len() > MAX_SETTINGS_SIZE {
        return Err(Error::ConfigTooLarge {
            path: native,
            size: metadata.len(),
            max: MAX_SETTINGS_SIZE,
        });
    }

    let content = fs::read_to_string(&native).map_err(|e| Error::io(path, e))?;
    let settings = parse_settings(&content, SettingsFormat::from_path(&native), &native)?;

    tracing::debug!(
        rules = settings.branch_protection_rules.len(),
        "Loaded branch protection rules"
    );
    Ok(settings)
}

/// Decode settings text in the given format. `origin` is only used in errors.
pub fn parse_settings(content: &str, format: SettingsFormat, origin: &Path) -> Result<Settings> {
    let parse_error = |message: String| Error::ConfigParse {
        path: origin.to_path_buf(),
        format: format.name().into(),
        message,
    };

    match format {
        SettingsFormat::Yaml => {
            // An empty document decodes to nothing rather than an error
            if content.trim().is_empty() {
                return Ok(Settings::default());
            }
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        SettingsFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        SettingsFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("a/config.yaml")),
            SettingsFormat::Yaml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("a/config.YML")),
            SettingsFormat::Yaml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("config.json")),
            SettingsFormat::Json
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("config.toml")),
            SettingsFormat::Toml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("config")),
            SettingsFormat::Yaml
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let settings = parse_settings("  \n", SettingsFormat::Yaml, Path::new("x.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = parse_settings("{not json", SettingsFormat::Json, Path::new("x.json"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("JSON"), "unexpected message: {message}");
        assert!(message.contains("x.json"), "unexpected message: {message}");
    }
}
