//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.huginn/config.toml` (user)
//! 3. `/etc/huginn/config.toml` (system)
//!
//! The result is read once at startup and passed explicitly to the pieces
//! that need it. Only the translation catalog can change afterwards, and
//! only when `[i18n] hot_reload` is set.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, SemanticError};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "paraphrase-multilingual-MiniLM-L12-v2";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// Embedding model configuration.
///
/// Fixed at first provider construction; later values are ignored by the
/// [`ModelGuard`](crate::ModelGuard).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    /// Model name (default: paraphrase-multilingual-MiniLM-L12-v2).
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Directory for model downloads.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Print download progress bars (default: false).
    #[serde(default)]
    pub show_download_progress: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            cache_dir: None,
            show_download_progress: false,
        }
    }
}

fn default_model_name() -> String {
    DEFAULT_MODEL.to_string()
}

impl ModelConfig {
    /// Configuration for a named model with default paths.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Download directory: `cache_dir`, else `$HUGINN_CACHE_DIR`, else
    /// `<user cache dir>/huginn/models`.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        std::env::var("HUGINN_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::cache_dir()
                    .unwrap_or_else(|| PathBuf::from(".cache"))
                    .join("huginn")
                    .join("models")
            })
    }
}

/// Translation catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct I18nConfig {
    /// Directory holding `<locale>.json` files (default: "locales").
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,
    /// Supported locales (default: ["en", "zh"]).
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
    /// Locale used for unknown or missing hints (default: "en").
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Reload the files when they change on disk (default: false).
    #[serde(default)]
    pub hot_reload: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            supported: default_supported(),
            default_locale: default_locale(),
            hot_reload: false,
        }
    }
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from("locales")
}

fn default_supported() -> Vec<String> {
    vec!["en".to_string(), "zh".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.huginn/config.toml`
    /// 3. `/etc/huginn/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?.ok_or_else(|| {
            SemanticError::Configuration(
                "No config file found. Create ~/.huginn/config.toml or /etc/huginn/config.toml"
                    .to_string(),
            )
        })?;
        Self::load_from_file(&path)
    }

    /// Like [`Config::load`], but falls back to defaults when no file exists.
    ///
    /// An explicit path that does not exist is still an error.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SemanticError::Configuration(format!("Failed to parse config: {e}")))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SemanticError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SemanticError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path; `None` when no candidate exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SemanticError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".huginn").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/huginn/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.model.name, DEFAULT_MODEL);
        assert_eq!(config.model.cache_dir, None);
        assert!(!config.model.show_download_progress);
        assert_eq!(config.i18n.locales_dir, PathBuf::from("locales"));
        assert_eq!(config.i18n.supported, vec!["en", "zh"]);
        assert_eq!(config.i18n.default_locale, "en");
        assert!(!config.i18n.hot_reload);
    }

    #[test]
    fn parse_minimal_config() {
        let config = Config::from_toml(
            r#"
            [model]
            name = "bge-small-zh-v1.5"
        "#,
        )
        .unwrap();
        assert_eq!(config.model.name, "bge-small-zh-v1.5");
        // Defaults preserved
        assert_eq!(config.i18n.default_locale, "en");
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_toml(
            r#"
            [model]
            name = "all-MiniLM-L6-v2"
            cache_dir = "/opt/models"
            show_download_progress = true

            [i18n]
            locales_dir = "/srv/locales"
            supported = ["zh"]
            default_locale = "zh"
            hot_reload = true
        "#,
        )
        .unwrap();
        assert_eq!(config.model.cache_dir, Some(PathBuf::from("/opt/models")));
        assert!(config.model.show_download_progress);
        assert_eq!(config.i18n.locales_dir, PathBuf::from("/srv/locales"));
        assert_eq!(config.i18n.supported, vec!["zh"]);
        assert_eq!(config.i18n.default_locale, "zh");
        assert!(config.i18n.hot_reload);
    }

    #[test]
    fn explicit_cache_dir_wins() {
        let config = ModelConfig {
            cache_dir: Some(PathBuf::from("/custom/cache")),
            ..Default::default()
        };
        assert_eq!(config.resolved_cache_dir(), PathBuf::from("/custom/cache"));
    }

    #[test]
    fn invalid_toml_is_configuration_error() {
        let err = Config::from_toml("[model\nname = 1").unwrap_err();
        assert!(matches!(err, SemanticError::Configuration(_)));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));

        assert!(Config::load_or_default(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
