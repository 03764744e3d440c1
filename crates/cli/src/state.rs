use std::path::{Path, PathBuf};
use std::{fs, io};

use common::data_file::DEFAULT_ENC_SUFFIX;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "boxkey";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Our private key file, used when `--key` is not given.
    /// Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PathBuf>,
    /// The counterparty's public key file, used when `--sender` /
    /// `--recipient` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_public_key: Option<PathBuf>,
    /// Suffix marking encrypted data files
    #[serde(default = "default_enc_suffix")]
    pub enc_suffix: String,
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_enc_suffix() -> String {
    DEFAULT_ENC_SUFFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            peer_public_key: None,
            enc_suffix: default_enc_suffix(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> Result<tracing::Level, StateError> {
        self.log_level
            .parse()
            .map_err(|_| StateError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the boxkey directory (~/.boxkey)
    pub config_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration, defaults if the file does not exist
    pub config: AppConfig,
}

impl AppState {
    /// Get the boxkey directory path (custom or default ~/.boxkey)
    pub fn config_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Write a default config file into the boxkey directory
    pub fn init(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized(config_path));
        }

        fs::create_dir_all(&config_dir)?;

        let config = AppConfig::default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        tracing::info!(path = ?config_path, "wrote default config");

        Ok(Self {
            config_dir,
            config_path,
            config,
        })
    }

    /// Load state from the boxkey directory.
    ///
    /// A missing config file is not an error; every command works from
    /// flags alone.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let config = match fs::read_to_string(&config_path) {
            Ok(config_toml) => toml::from_str(&config_toml)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            config_dir,
            config_path,
            config,
        })
    }

    /// The private key to use: the explicit flag, else the configured one
    pub fn private_key_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.pick(explicit, self.config.private_key.as_deref())
    }

    /// The counterparty public key to use: the explicit flag, else the configured one
    pub fn peer_public_key_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.pick(explicit, self.config.peer_public_key.as_deref())
    }

    /// The encrypted file suffix: the explicit flag, else the configured one
    pub fn enc_suffix<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(self.config.enc_suffix.as_str())
    }

    // Flags are taken as given; config paths are relative to the config dir.
    fn pick(&self, explicit: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
        match (explicit, configured) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(path)) => Some(self.config_dir.join(path)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("boxkey config already exists at {0:?}")]
    AlreadyInitialized(PathBuf),

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("invalid log level in config: {0}")]
    InvalidLogLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
