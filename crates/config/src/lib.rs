//! Configuration loading, validation, and management for ucatable.
//!
//! Loads configuration from `~/.ucatable/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ucatable_core::{Diagnostic, Mode};
use ucatable_text::Tense;

/// The root configuration structure.
///
/// Maps directly to `~/.ucatable/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display mode used when none is given: "provided", "notProvided" or "both"
    #[serde(default = "default_mode")]
    pub default_mode: String,

    /// Ceiling on the number of context combinations in one table
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Sentence generation settings
    #[serde(default)]
    pub text: TextConfig,
}

fn default_mode() -> String {
    "both".into()
}
fn default_max_rows() -> usize {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Verb tense of generated context clauses: "present" or "past"
    #[serde(default = "default_tense")]
    pub tense: String,

    /// Suffix appended to free-text suggestions
    #[serde(default = "default_draft_marker")]
    pub draft_marker: String,
}

fn default_tense() -> String {
    "past".into()
}
fn default_draft_marker() -> String {
    "TODO".into()
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            tense: default_tense(),
            draft_marker: default_draft_marker(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ucatable/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `UCATABLE_MODE`
    /// - `UCATABLE_MAX_ROWS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup, then re-validate.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(mode) = lookup("UCATABLE_MODE") {
            self.default_mode = mode;
        }

        if let Some(raw) = lookup("UCATABLE_MAX_ROWS") {
            self.max_rows = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "UCATABLE_MAX_ROWS must be a positive integer, got '{raw}'"
                ))
            })?;
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ucatable")
    }

    /// The configured display mode. Unknown strings fall back to `both`
    /// and come with an `InvalidMode` diagnostic.
    pub fn mode(&self) -> (Mode, Option<Diagnostic>) {
        Mode::parse_lenient(&self.default_mode)
    }

    /// Verb tense of generated context clauses.
    pub fn tense(&self) -> Tense {
        self.text.tense.parse().unwrap_or_default()
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "max_rows must be greater than 0".into(),
            ));
        }

        if let Err(e) = self.text.tense.parse::<Tense>() {
            return Err(ConfigError::ValidationError(format!("text.tense: {e}")));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            max_rows: default_max_rows(),
            text: TextConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucatable_core::DiagnosticKind;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_mode, "both");
        assert_eq!(config.max_rows, 10_000);
        assert_eq!(config.tense(), Tense::Past);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_mode, config.default_mode);
        assert_eq!(parsed.max_rows, config.max_rows);
    }

    #[test]
    fn zero_max_rows_rejected() {
        let config = AppConfig {
            max_rows: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_tense_rejected() {
        let mut config = AppConfig::default();
        config.text.tense = "future".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().default_mode, "both");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_mode = "provided"
max_rows = 64

[text]
tense = "present"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.mode().0, Mode::ProvidedOnly);
        assert_eq!(config.max_rows, 64);
        assert_eq!(config.tense(), Tense::Present);
        assert_eq!(config.text.draft_marker, "TODO");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_rows = \"lots\"").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| match key {
                "UCATABLE_MODE" => Some("notProvided".into()),
                "UCATABLE_MAX_ROWS" => Some("12".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.mode().0, Mode::NotProvidedOnly);
        assert_eq!(config.max_rows, 12);
    }

    #[test]
    fn bad_env_max_rows_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "UCATABLE_MAX_ROWS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn unknown_mode_is_a_diagnostic_not_an_error() {
        let config = AppConfig {
            default_mode: "sideways".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
        let (mode, diagnostic) = config.mode();
        assert_eq!(mode, Mode::Both);
        assert_eq!(diagnostic.unwrap().kind, DiagnosticKind::InvalidMode);
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("both"));
        assert!(toml_str.contains("10000"));
    }
}
