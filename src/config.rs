//! Configuration file handling for PennyWise.
//!
//! The configuration file is stored at `$PENNYWISE_HOME/config.json` and holds the display
//! currency and the location of the data directory.

use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::model::{CurrencyFormat, Grouping, DEFAULT_SYMBOL};
use crate::storage::{FileStore, Persistence};
use crate::store::ExpenseStore;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "pennywise";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$PENNYWISE_HOME` and from there it loads `$PENNYWISE_HOME/config.json`. It
/// provides the paths of the items kept in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
}

impl Config {
    /// Creates the home directory, the data directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/pennywise`
    /// - `format` - How amounts are displayed.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operation fails.
    pub fn create(dir: impl Into<PathBuf>, format: &CurrencyFormat) -> Result<Self> {
        Self::create_inner(dir.into(), format).pub_result(ErrorType::Config)
    }

    fn create_inner(maybe_relative: PathBuf, format: &CurrencyFormat) -> Res<Self> {
        utils::make_dir(&maybe_relative)
            .context("Unable to create the pennywise home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display());
        }

        let config_file = ConfigFile {
            currency_symbol: format.symbol().to_string(),
            grouping: format.grouping(),
            ..ConfigFile::default()
        };
        let data_dir = config_file.data_dir(&root);
        utils::make_dir(&data_dir)?;
        config_file.save(&config_path)?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    /// This will
    /// - validate that `pennywise_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub fn load(pennywise_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(pennywise_home.into()).pub_result(ErrorType::Config)
    }

    fn load_inner(maybe_relative: PathBuf) -> Res<Self> {
        let root = utils::canonicalize(&maybe_relative).context("PennyWise home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'pennywise init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;
        let data_dir = config_file.data_dir(&root);
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(&self.config_file.currency_symbol, self.config_file.grouping)
    }

    /// The persistence adapter over the data directory.
    pub fn persistence(&self) -> Result<Persistence<FileStore>> {
        let kv = FileStore::open(self.data_dir.clone()).pub_result(ErrorType::Storage)?;
        Ok(Persistence::new(kv))
    }

    /// Opens the expense store over the data directory, loading whatever it holds.
    pub fn open_store(&self) -> Result<ExpenseStore<FileStore>> {
        Ok(ExpenseStore::open(self.persistence()?))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "pennywise",
///   "config_version": 1,
///   "currency_symbol": "₹",
///   "grouping": "indian",
///   "data_dir": "data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "pennywise"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Printed in front of every amount
    #[serde(default = "default_symbol")]
    currency_symbol: String,

    #[serde(default)]
    grouping: Grouping,

    /// Where the expense data is kept (optional, relative to the home directory or absolute).
    /// Defaults to $PENNYWISE_HOME/data if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: default_symbol(),
            grouping: Grouping::default(),
            data_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app
    fn load(path: &Path) -> Res<Self> {
        let config: ConfigFile = utils::deserialize(path)?;
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        Ok(config)
    }

    fn save(&self, path: &Path) -> Res<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).context("Unable to write config file")
    }

    /// Returns the stored `data_dir` if it is absolute, otherwise resolves it against `root`.
    fn data_dir(&self, root: &Path) -> PathBuf {
        match &self.data_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(DATA_DIR),
        }
    }
}
