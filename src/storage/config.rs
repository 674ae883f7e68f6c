//! Configuration handling for jekyll2zola
//!
//! Configuration is read from, in order of preference:
//! 1. the file given with `--config`
//! 2. `jekyll2zola.toml` in the current directory
//! 3. `config.toml` in the platform config directory
//!    (e.g. `~/.config/jekyll2zola/config.toml`)
//!
//! Every key is optional; missing keys fall back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldRules;

/// Name of the per-site configuration file
pub const LOCAL_CONFIG_FILE: &str = "jekyll2zola.toml";

/// Input path when neither flag nor config names one
pub const DEFAULT_INPATH: &str = "_posts";

/// Output path when neither flag nor config names one
pub const DEFAULT_OUTPATH: &str = "content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default input file or directory
    pub inpath: Option<PathBuf>,

    /// Default output file or directory
    pub outpath: Option<PathBuf>,

    /// Extension (without the dot) of posts picked up from a directory
    pub extension: String,

    /// Report per-file failures and carry on instead of aborting
    pub keep_going: bool,

    /// Drop/rename rules for extra front matter keys
    pub fields: FieldRules,

    /// File this configuration was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inpath: None,
            outpath: None,
            extension: "md".to_string(),
            keep_going: false,
            fields: FieldRules::default(),
            source: None,
        }
    }
}

impl Config {
    /// Loads configuration, preferring an explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(&local);
        }

        match Self::global_config_dir().map(|dir| dir.join("config.toml")) {
            Some(global) if global.is_file() => Self::load_from(&global),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.extension = config.extension.trim_start_matches('.').to_string();
        if config.extension.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "jekyll2zola", "jekyll2zola")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Input path: flag, then config, then the built-in default
    pub fn resolve_inpath(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.inpath.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPATH))
    }

    /// Output path: flag, then config, then the built-in default
    pub fn resolve_outpath(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.outpath.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.extension, "md");
        assert!(!config.keep_going);
        assert_eq!(config.fields.drop, vec!["layout"]);
        assert_eq!(
            config.fields.rename.get("header-img").map(String::as_str),
            Some("cover")
        );
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
inpath = "site/_posts"
outpath = "zola/content/blog"
extension = ".markdown"
keep_going = true

[fields]
drop = ["layout", "permalink"]

[fields.rename]
"header-img" = "cover"
"header-mask" = "mask"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.inpath, Some(PathBuf::from("site/_posts")));
        assert_eq!(config.outpath, Some(PathBuf::from("zola/content/blog")));
        assert_eq!(config.extension, "markdown");
        assert!(config.keep_going);
        assert_eq!(config.fields.drop, vec!["layout", "permalink"]);
        assert_eq!(
            config.fields.rename,
            BTreeMap::from([
                ("header-img".to_string(), "cover".to_string()),
                ("header-mask".to_string(), "mask".to_string()),
            ])
        );
    }

    #[test]
    fn partial_fields_keep_defaults() {
        let config = Config::parse("[fields]\ndrop = []\n").unwrap();
        assert!(config.fields.drop.is_empty());
        assert_eq!(config.fields.rename.len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            Config::parse("keep_going = \"maybe\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::parse("extension = \".\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn flags_win_over_config() {
        let config = Config {
            inpath: Some(PathBuf::from("from-config")),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_inpath(Some(PathBuf::from("from-flag"))),
            PathBuf::from("from-flag")
        );
        assert_eq!(config.resolve_inpath(None), PathBuf::from("from-config"));
        assert_eq!(config.resolve_outpath(None), PathBuf::from(DEFAULT_OUTPATH));
    }

    #[test]
    fn load_from_records_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "outpath = \"out\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.outpath, Some(PathBuf::from("out")));
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }
}
