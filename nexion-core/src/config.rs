//! Configuration parsing and management.

use nexion_types::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Main configuration struct matching the nexion.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub docs: PathBuf,

    /// Directory of `<code>.yml` translation files (None means use built-in)
    #[serde(default)]
    pub locales: Option<PathBuf>,

    #[serde(default = "default_state_dir")]
    pub state: PathBuf,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".nexion")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default = "default_language")]
    pub default_language: Language,

    #[serde(default = "default_language")]
    pub fallback_language: Language,
}

fn default_language() -> Language {
    Language::En
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            fallback_language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_slug")]
    pub default_slug: String,
}

fn default_slug() -> String {
    String::from("getting-started")
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            default_slug: default_slug(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text (paths stay relative to the cwd)
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        if config.site.title.trim().is_empty() {
            return Err(ConfigError::MissingField("site.title".to_string()));
        }
        Ok(config)
    }

    /// Get the docs directory, resolved relative to config file
    pub fn docs_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.docs)
    }

    /// Get the locales directory (None means use the built-in catalog)
    pub fn locales_dir(&self) -> Option<PathBuf> {
        self.paths.locales.as_ref().map(|p| self.resolve_path(p))
    }

    /// Get the state directory holding persisted preferences
    pub fn state_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.state)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Get a nested config value using dotted path (e.g., "site.title")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["site", "title"] => Some(self.site.title.clone()),
            ["site", "url"] => self.site.url.clone(),
            ["site", "repository"] => self.site.repository.clone(),
            ["i18n", "default_language"] => Some(self.i18n.default_language.to_string()),
            ["i18n", "fallback_language"] => Some(self.i18n.fallback_language.to_string()),
            ["docs", "default_slug"] => Some(self.docs.default_slug.clone()),
            _ => None,
        }
    }

    /// Repository link for the "edit this page" footer
    pub fn edit_url(&self) -> Option<String> {
        self.site
            .repository
            .as_ref()
            .map(|repo| repo.trim_end_matches('/').to_string())
    }

    /// Issue tracker link for the "report issue" footer
    pub fn issues_url(&self) -> Option<String> {
        self.site
            .repository
            .as_ref()
            .map(|repo| format!("{}/issues", repo.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
site:
  title: "Nexion"
paths:
  docs: "docs"
"#;

    #[test]
    fn test_default_values() {
        let config = Config::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.i18n.default_language, Language::En);
        assert_eq!(config.i18n.fallback_language, Language::En);
        assert_eq!(config.docs.default_slug, "getting-started");
        assert_eq!(config.paths.state, PathBuf::from(".nexion"));
        assert!(config.locales_dir().is_none());
    }

    #[test]
    fn test_get_nested_value() {
        let config = Config::from_yaml(
            r#"
site:
  title: "My Site"
  repository: "https://github.com/AceXiamo/Nexion/"
paths:
  docs: "content"
i18n:
  default_language: zh
docs:
  default_slug: intro
"#,
        )
        .unwrap();

        assert_eq!(config.get("site.title"), Some("My Site".into()));
        assert_eq!(config.get("site.url"), None);
        assert_eq!(config.get("i18n.default_language"), Some("zh".into()));
        assert_eq!(config.get("i18n.fallback_language"), Some("en".into()));
        assert_eq!(config.get("docs.default_slug"), Some("intro".into()));
        assert_eq!(config.get("nonexistent.key"), None);
        assert_eq!(
            config.issues_url().as_deref(),
            Some("https://github.com/AceXiamo/Nexion/issues")
        );
        assert_eq!(
            config.edit_url().as_deref(),
            Some("https://github.com/AceXiamo/Nexion")
        );
    }

    #[test]
    fn test_paths_resolve_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nexion.yml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.docs_dir(), dir.path().join("docs"));
        assert_eq!(config.state_dir(), dir.path().join(".nexion"));
    }

    #[test]
    fn test_missing_title() {
        let result = Config::from_yaml("site:\n  title: \"\"\npaths:\n  docs: docs\n");
        match result {
            Err(ConfigError::MissingField(field)) => assert_eq!(field, "site.title"),
            other => panic!("Expected MissingField error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unknown_language_rejected() {
        let result = Config::from_yaml(
            "site:\n  title: x\npaths:\n  docs: docs\ni18n:\n  default_language: fr\n",
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
