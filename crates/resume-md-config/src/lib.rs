use resume_md_engine::SectionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {message}")]
    ConfigInvalidError {
        config_path: PathBuf,
        message: String,
    },
}

/// User settings for resume-md.
///
/// ```toml
/// replace_defaults = false
///
/// [sections]
/// experience = ["Career"]
/// awards = ["Awards", "受賞歴"]
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only recognize the sections listed here, ignoring the built-in titles.
    pub replace_defaults: bool,
    /// Extra heading titles per section id.
    pub sections: BTreeMap<String, Vec<String>>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(id) = config.sections.keys().find(|id| id.trim().is_empty()) {
            return Err(ConfigError::ConfigInvalidError {
                config_path: config_path.to_path_buf(),
                message: format!("section id {id:?} is blank"),
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/resume-md");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The section registry these settings describe.
    ///
    /// Titles from `[sections]` are merged into the built-in table, or
    /// replace it entirely when `replace_defaults` is set. Ids are added in
    /// key order.
    pub fn registry(&self) -> SectionRegistry {
        let base = if self.replace_defaults {
            SectionRegistry::empty()
        } else {
            SectionRegistry::default()
        };
        base.extend(
            self.sections
                .iter()
                .map(|(id, titles)| (id.as_str(), titles.iter())),
        )
    }
}
