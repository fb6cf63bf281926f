//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `OILEMPIRES_*` environment variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR: &str = "oilempires";
const DATABASE_FILE_NAME: &str = "content.db";
const ENV_PREFIX: &str = "OILEMPIRES_";

/// Everything the binary can be told from outside.
///
/// Later layers win: the environment (`OILEMPIRES_FEEDBACK__DEFAULT_TITLE`
/// and so on) overrides `~/.config/oilempires/config.toml`, which overrides
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where feedback and companies are kept.
    pub store: StoreConfig,
    /// Feedback form behavior.
    pub feedback: FeedbackConfig,
    /// Presentation knobs.
    pub display: DisplayConfig,
}

/// `[store]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `SQLite` file; unset means `<data dir>/oilempires/content.db`.
    pub database_path: Option<PathBuf>,
}

/// `[feedback]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Let an authenticated visitor leave the name field empty.
    pub identity_waives_name: bool,
    /// Heading shown above the form.
    pub default_title: String,
}

/// `[display]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per page in the companies table.
    pub companies_page_size: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            identity_waives_name: true,
            default_title: "Visitor Feedback".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            companies_page_size: 5,
        }
    }
}

impl Config {
    /// [`Config::load_from`] with the default file location.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from`].
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Resolve every layer, reading `config_path` in place of the default file.
    ///
    /// The file is optional; when it does not exist only defaults and the
    /// environment apply.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, type mismatches, or values rejected by
    /// [`Config::validate`].
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let file = config_path.unwrap_or_else(Self::default_config_path);
        let figment = Self::file_layers(&file).merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::finish(&figment)
    }

    /// Check one TOML file against the defaults. The environment is not read
    /// and, unlike [`Config::load_from`], the file must exist.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or would not load.
    pub fn validate_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidConfig {
                message: format!("config file not found: {}", path.display()),
            });
        }
        Self::finish(&Self::file_layers(path))
    }

    fn file_layers(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path))
    }

    fn finish(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/oilempires/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR)
            .join(CONFIG_FILE_NAME)
    }

    /// `<local data dir>/oilempires`.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR)
    }

    /// Reject values the rest of the crate cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.display.companies_page_size == 0 {
            Some("companies_page_size must be greater than 0")
        } else if self.feedback.default_title.trim().is_empty() {
            Some("default_title must not be empty")
        } else if self
            .store
            .database_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            Some("database_path must not be empty")
        } else {
            None
        };

        match problem {
            Some(message) => Err(Error::InvalidConfig {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// The configured database file, or the default under the data dir.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.store
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
